//! The kinds of node held by a [`DicomObject`](crate::DicomObject).
//!
//! A [`DataElement`] is a leaf holding the encoded value.
//! A [`Sequence`] holds an ordered list of [`Item`]s,
//! and an item holds either further elements
//! or, in encapsulated pixel data, a raw fragment.

use dcmtree_core::header::HasLength;
use dcmtree_core::value::PrimitiveValue;
use dcmtree_core::{Length, Tag, VR};
use dcmtree_encoding::codec::{swap_words, ByteCodec, DecodeValueError, EncodeValueError};
use dcmtree_encoding::Endianness;
use std::borrow::Cow;

/// A primitive data element, with its value in binary form.
///
/// The binary is always the source of truth:
/// it is what gets written and compared.
/// The decoded value is kept alongside it
/// for every VR other than the bulk ones (OB, OD, OF, OL, OV, OW, UN).
#[derive(Debug, Clone, PartialEq)]
pub struct DataElement {
    tag: Tag,
    vr: VR,
    name: String,
    bin: Vec<u8>,
    value: Option<PrimitiveValue>,
    endianness: Endianness,
}

impl DataElement {
    /// Create a data element by encoding the given value
    /// in little endian.
    pub fn new<V>(tag: Tag, vr: VR, value: V) -> Result<Self, EncodeValueError>
    where
        V: Into<PrimitiveValue>,
    {
        let mut elem = DataElement {
            tag,
            vr,
            name: String::new(),
            bin: Vec::new(),
            value: None,
            endianness: Endianness::Little,
        };
        elem.set_value(value)?;
        Ok(elem)
    }

    /// Create a data element from a value already in binary form.
    pub fn from_binary(tag: Tag, vr: VR, bin: Vec<u8>, endianness: Endianness) -> Self {
        DataElement {
            tag,
            vr,
            name: String::new(),
            bin,
            value: None,
            endianness,
        }
    }

    /// Attach the attribute name to this element.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach an already decoded value to this element,
    /// without touching its binary.
    pub(crate) fn with_decoded(mut self, value: Option<PrimitiveValue>) -> Self {
        self.value = value;
        self
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: Tag) {
        self.tag = tag;
    }

    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The attribute name, empty if unknown.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value in binary form, in the byte order of [`endianness`](Self::endianness).
    pub fn bin(&self) -> &[u8] {
        &self.bin
    }

    /// The byte order which the binary value is encoded in.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The decoded value, if it was retained.
    pub fn value(&self) -> Option<&PrimitiveValue> {
        self.value.as_ref()
    }

    /// Obtain the value, decoding it from the binary if it was not retained.
    pub fn decoded(&self) -> Result<PrimitiveValue, DecodeValueError> {
        match &self.value {
            Some(v) => Ok(v.clone()),
            None => ByteCodec::new(self.endianness).decode(&self.bin, self.vr),
        }
    }

    /// Obtain the value as a single string.
    pub fn to_str(&self) -> Result<String, DecodeValueError> {
        self.decoded().map(|v| v.to_str().into_owned())
    }

    /// Replace the value,
    /// re-encoding the binary in this element's byte order.
    pub fn set_value<V>(&mut self, value: V) -> Result<(), EncodeValueError>
    where
        V: Into<PrimitiveValue>,
    {
        let value = value.into();
        self.bin = ByteCodec::new(self.endianness).encode(&value, self.vr)?;
        self.value = if self.vr.is_bulk() { None } else { Some(value) };
        Ok(())
    }

    /// The binary value in little endian,
    /// padded to an even length.
    pub fn canonical_bin(&self) -> Cow<'_, [u8]> {
        let odd = self.bin.len() % 2 == 1;
        if self.endianness == Endianness::Little && !odd {
            return Cow::Borrowed(&self.bin);
        }
        let mut bin = self.bin.clone();
        if odd {
            bin.push(self.vr.padding());
        }
        if self.endianness == Endianness::Big {
            swap_words(&mut bin, self.vr);
        }
        Cow::Owned(bin)
    }

    /// The binary value in the given byte order,
    /// padded to an even length.
    pub fn bin_in(&self, endianness: Endianness) -> Cow<'_, [u8]> {
        let odd = self.bin.len() % 2 == 1;
        if self.endianness == endianness && !odd {
            return Cow::Borrowed(&self.bin);
        }
        let mut bin = self.bin.clone();
        if odd {
            bin.push(self.vr.padding());
        }
        if self.endianness != endianness {
            swap_words(&mut bin, self.vr);
        }
        Cow::Owned(bin)
    }
}

impl HasLength for DataElement {
    fn length(&self) -> Length {
        Length(self.bin.len() as u32)
    }
}

/// A sequence header.
///
/// Besides proper `SQ` sequences,
/// this also describes encapsulated pixel data,
/// whose items are the pixel data fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    tag: Tag,
    vr: VR,
    name: String,
    length: Length,
}

impl Sequence {
    /// Create a sequence of undefined length.
    pub fn new(tag: Tag) -> Self {
        Sequence::with_length(tag, Length::UNDEFINED)
    }

    /// Create a sequence with the given length.
    /// Only whether the length is defined matters when writing,
    /// the actual value is recomputed from the items.
    pub fn with_length(tag: Tag, length: Length) -> Self {
        Sequence {
            tag,
            vr: VR::SQ,
            name: String::new(),
            length,
        }
    }

    /// Create the header of encapsulated pixel data.
    pub fn encapsulated(tag: Tag, vr: VR) -> Self {
        Sequence {
            tag,
            vr,
            name: String::new(),
            length: Length::UNDEFINED,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Keep the given VR in place of `SQ`,
    /// for elements of undefined length holding items.
    pub fn with_vr(mut self, vr: VR) -> Self {
        self.vr = vr;
        self
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: Tag) {
        self.tag = tag;
    }

    pub fn vr(&self) -> VR {
        self.vr
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn set_length(&mut self, length: Length) {
        self.length = length;
    }

    /// Whether this holds encapsulated pixel data fragments.
    pub fn is_encapsulated(&self) -> bool {
        self.vr != VR::SQ && self.tag == Tag::PIXEL_DATA
    }
}

/// A sequence item.
///
/// An item is either structured, holding data elements as children,
/// or a fragment, holding a raw payload.
/// Setting a payload discards the children,
/// and adding a child discards the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    length: Length,
    payload: Option<Vec<u8>>,
}

impl Default for Item {
    fn default() -> Self {
        Item::with_length(Length::UNDEFINED)
    }
}

impl Item {
    /// Create a structured item of undefined length.
    pub fn new() -> Self {
        Item::default()
    }

    /// Create a structured item with the given length.
    pub fn with_length(length: Length) -> Self {
        Item {
            length,
            payload: None,
        }
    }

    /// Create a fragment item.
    pub fn fragment(payload: Vec<u8>) -> Self {
        Item {
            length: Length(payload.len() as u32),
            payload: Some(payload),
        }
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn set_length(&mut self, length: Length) {
        self.length = length;
    }

    /// The raw payload of a fragment item.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub(crate) fn set_payload(&mut self, payload: Option<Vec<u8>>) {
        if let Some(p) = &payload {
            self.length = Length(p.len() as u32);
        }
        self.payload = payload;
    }
}

/// A node of the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The top level data set, which has no tag of its own.
    Root,
    Element(DataElement),
    Sequence(Sequence),
    Item(Item),
}

impl Node {
    /// The tag of the node.
    /// Items carry the item tag, the root has none.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Node::Root => None,
            Node::Element(e) => Some(e.tag()),
            Node::Sequence(s) => Some(s.tag()),
            Node::Item(_) => Some(Tag::ITEM),
        }
    }

    /// The value representation,
    /// if the node has one.
    pub fn vr(&self) -> Option<VR> {
        match self {
            Node::Element(e) => Some(e.vr()),
            Node::Sequence(s) => Some(s.vr()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Root => "",
            Node::Element(e) => e.name(),
            Node::Sequence(s) => s.name(),
            Node::Item(_) => "Item",
        }
    }

    pub fn as_element(&self) -> Option<&DataElement> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut DataElement> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Node::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Node::Item(_))
    }

    /// Whether the node can hold data elements and sequences.
    pub(crate) fn holds_elements(&self) -> bool {
        matches!(self, Node::Root | Node::Item(_))
    }
}

impl From<DataElement> for Node {
    fn from(e: DataElement) -> Self {
        Node::Element(e)
    }
}

impl From<Sequence> for Node {
    fn from(s: Sequence) -> Self {
        Node::Sequence(s)
    }
}

impl From<Item> for Node {
    fn from(i: Item) -> Self {
        Node::Item(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmtree_core::dicom_value;

    #[test]
    fn element_value_is_encoded() {
        let elem = DataElement::new(Tag(0x0010, 0x0010), VR::PN, "DOE^J").unwrap();
        assert_eq!(elem.bin(), b"DOE^J ");
        assert_eq!(elem.length(), Length(6));
        assert_eq!(elem.value(), Some(&dicom_value!(Str, "DOE^J")));
        assert_eq!(elem.to_str().unwrap(), "DOE^J");
    }

    #[test]
    fn bulk_values_keep_only_binary() {
        let elem = DataElement::new(Tag(0x7FE0, 0x0010), VR::OW, dicom_value!(U16, [1, 2])).unwrap();
        assert_eq!(elem.value(), None);
        assert_eq!(elem.bin(), &[1, 0, 2, 0]);
        assert_eq!(elem.decoded().unwrap(), dicom_value!(U16, [1, 2]));
    }

    #[test]
    fn canonical_binary_is_little_endian() {
        let big = DataElement::from_binary(Tag(0x0028, 0x0010), VR::US, vec![0x02, 0x00], Endianness::Big);
        let little = DataElement::new(Tag(0x0028, 0x0010), VR::US, 512_u16).unwrap();
        assert_eq!(big.canonical_bin(), little.canonical_bin());
        assert_eq!(little.bin_in(Endianness::Big).as_ref(), &[0x02, 0x00]);
        assert_eq!(big.decoded().unwrap(), dicom_value!(U16, [512]));
    }

    #[test]
    fn odd_binaries_are_padded() {
        let elem = DataElement::from_binary(Tag(0x0008, 0x0018), VR::UI, b"1.2.3".to_vec(), Endianness::Little);
        assert_eq!(elem.canonical_bin().as_ref(), b"1.2.3\0");
    }

    #[test]
    fn fragment_items() {
        let item = Item::fragment(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(item.length(), Length(4));
        assert_eq!(item.payload(), Some(&[0xFF, 0xD8, 0xFF, 0xE0][..]));
        assert!(Item::new().length().is_undefined());
    }
}
