//! Basic data types for interpreting DICOM data element headers:
//! the attribute tag, the value representation and the value length.

use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::cmp::Ordering;
use std::fmt;
use std::str::{from_utf8, FromStr};

/// Error type for reading a tag from its textual form.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ParseTagError {
    /// The text does not have any of the admitted tag layouts.
    #[snafu(display("Invalid tag syntax `{}`", text))]
    Syntax {
        /// The text given
        text: String,
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// A tag component is not a 16-bit hexadecimal number.
    #[snafu(display("Invalid hexadecimal number in tag `{}`", text))]
    Number {
        /// The text given
        text: String,
        /// The number parsing error
        source: std::num::ParseIntError,
        /// The error's backtrace
        backtrace: Backtrace,
    },
}

/// Trait for any DICOM entity (element or item) which may have a length.
pub trait HasLength {
    /// Retrieve the value data's length as specified by the data element or
    /// item, in bytes.
    ///
    /// According to the standard, the concrete value size may be undefined,
    /// which can be the case for sequence elements or specific primitive
    /// values.
    fn length(&self) -> Length;

    /// Check whether the value is empty (0 length).
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// An enum type for a DICOM value representation.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Single
    FL,
    /// Floating Point Double
    FD,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Double
    OD,
    /// Other Float
    OF,
    /// Other Long
    OL,
    /// Other Very Long
    OV,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Signed Very Long
    SV,
    /// Time
    TM,
    /// Unlimited Characters
    UC,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Universal Resource Identifier or Universal Resource Locator (URI/URL)
    UR,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
    /// Unsigned Very Long
    UV,
}

impl VR {
    /// Obtain the value representation corresponding to the given two bytes.
    /// Each byte should represent an alphabetic character in upper case.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        from_utf8(chars.as_ref())
            .ok()
            .and_then(|s| VR::from_str(s).ok())
    }

    /// Retrieve a string representation of this VR.
    pub fn as_str(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE",
            AS => "AS",
            AT => "AT",
            CS => "CS",
            DA => "DA",
            DS => "DS",
            DT => "DT",
            FL => "FL",
            FD => "FD",
            IS => "IS",
            LO => "LO",
            LT => "LT",
            OB => "OB",
            OD => "OD",
            OF => "OF",
            OL => "OL",
            OV => "OV",
            OW => "OW",
            PN => "PN",
            SH => "SH",
            SL => "SL",
            SQ => "SQ",
            SS => "SS",
            ST => "ST",
            SV => "SV",
            TM => "TM",
            UC => "UC",
            UI => "UI",
            UL => "UL",
            UN => "UN",
            UR => "UR",
            US => "US",
            UT => "UT",
            UV => "UV",
        }
    }

    /// Retrieve a copy of this VR's byte representation.
    /// The function returns two alphabetic characters in upper case.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.as_str().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// Whether an explicit VR header for this representation
    /// carries two reserved bytes and a 32-bit length field
    /// instead of a 16-bit length field.
    pub fn has_long_length(self) -> bool {
        use VR::*;
        matches!(
            self,
            OB | OD | OF | OL | OV | OW | SQ | SV | UC | UN | UR | UT | UV
        )
    }

    /// Whether values of this representation are opaque bulk data,
    /// kept only in their binary form.
    pub fn is_bulk(self) -> bool {
        use VR::*;
        matches!(self, OB | OD | OF | OL | OV | OW | UN)
    }

    /// Whether values of this representation are character strings.
    pub fn is_text(self) -> bool {
        use VR::*;
        matches!(
            self,
            AE | AS | CS | DA | DS | DT | IS | LO | LT | PN | SH | ST | TM | UC | UI | UR | UT
        )
    }

    /// The byte used to pad a value of this representation to even length.
    pub fn padding(self) -> u8 {
        match self {
            VR::UI | VR::OB | VR::UN => 0,
            _ => b' ',
        }
    }

    /// The size in bytes of each unit affected by byte order.
    /// Representations insensitive to byte order have a width of 1.
    pub fn word_width(self) -> usize {
        use VR::*;
        match self {
            US | SS | OW | AT => 2,
            UL | SL | FL | OF | OL => 4,
            FD | OD | SV | UV | OV => 8,
            _ => 1,
        }
    }
}

/// Obtain the value representation corresponding to the given string.
/// The string should hold exactly two UTF-8 encoded alphabetic characters
/// in upper case, otherwise no match is made.
impl FromStr for VR {
    type Err = &'static str;

    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        use VR::*;
        match string {
            "AE" => Ok(AE),
            "AS" => Ok(AS),
            "AT" => Ok(AT),
            "CS" => Ok(CS),
            "DA" => Ok(DA),
            "DS" => Ok(DS),
            "DT" => Ok(DT),
            "FL" => Ok(FL),
            "FD" => Ok(FD),
            "IS" => Ok(IS),
            "LO" => Ok(LO),
            "LT" => Ok(LT),
            "OB" => Ok(OB),
            "OD" => Ok(OD),
            "OF" => Ok(OF),
            "OL" => Ok(OL),
            "OV" => Ok(OV),
            "OW" => Ok(OW),
            "PN" => Ok(PN),
            "SH" => Ok(SH),
            "SL" => Ok(SL),
            "SQ" => Ok(SQ),
            "SS" => Ok(SS),
            "ST" => Ok(ST),
            "SV" => Ok(SV),
            "TM" => Ok(TM),
            "UC" => Ok(UC),
            "UI" => Ok(UI),
            "UL" => Ok(UL),
            "UN" => Ok(UN),
            "UR" => Ok(UR),
            "US" => Ok(US),
            "UT" => Ok(UT),
            "UV" => Ok(UV),
            _ => Err("no such value representation"),
        }
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Idiomatic alias for a tag's group number.
pub type GroupNumber = u16;
/// Idiomatic alias for a tag's element number.
pub type ElementNumber = u16;

/// The data type for DICOM data element tags.
///
/// Tags are ordered by group, then by element,
/// which is also the order in which elements are encoded.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// Item pseudo-element (FFFE,E000)
    pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
    /// Item Delimitation Item (FFFE,E00D)
    pub const ITEM_DELIMITER: Tag = Tag(0xFFFE, 0xE00D);
    /// Sequence Delimitation Item (FFFE,E0DD)
    pub const SEQUENCE_DELIMITER: Tag = Tag(0xFFFE, 0xE0DD);
    /// Pixel Data (7FE0,0010)
    pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }

    /// Whether the tag belongs to a private (odd) group.
    #[inline]
    pub fn is_private(self) -> bool {
        self.0 & 1 == 1
    }

    /// Whether the tag is a private creator slot `(gggg,0010-00FF)`.
    #[inline]
    pub fn is_private_creator(self) -> bool {
        self.is_private() && (0x0010..=0x00FF).contains(&self.1)
    }

    /// Whether the tag refers to a group length element `(gggg,0000)`.
    #[inline]
    pub fn is_group_length(self) -> bool {
        self.1 == 0
    }

    /// Whether the tag is part of the file meta group `(0002,eeee)`.
    #[inline]
    pub fn is_meta(self) -> bool {
        self.0 == 0x0002
    }

    /// Whether the tag is in the reserved pseudo-element group `(FFFE,eeee)`.
    #[inline]
    pub fn is_pseudo(self) -> bool {
        self.0 == 0xFFFE
    }

    /// Whether the tag is the item tag.
    #[inline]
    pub fn is_item(self) -> bool {
        self == Tag::ITEM
    }

    /// Whether the tag is the item delimiter tag.
    #[inline]
    pub fn is_item_delimiter(self) -> bool {
        self == Tag::ITEM_DELIMITER
    }

    /// Whether the tag is the sequence delimiter tag.
    #[inline]
    pub fn is_sequence_delimiter(self) -> bool {
        self == Tag::SEQUENCE_DELIMITER
    }

    /// Whether the tag is one of the two delimiter tags.
    #[inline]
    pub fn is_delimiter(self) -> bool {
        self.is_item_delimiter() || self.is_sequence_delimiter()
    }

    /// Whether the tag is the pixel data tag.
    #[inline]
    pub fn is_pixel_data(self) -> bool {
        self == Tag::PIXEL_DATA
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

/// Parse a tag from one of the layouts
/// `GGGG,EEEE`, `(GGGG,EEEE)` or `GGGGEEEE`.
/// Hexadecimal digits may be in either case.
impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let inner = match text.strip_prefix('(') {
            Some(rest) => rest.strip_suffix(')').context(SyntaxSnafu { text })?,
            None => text,
        };
        let (group, element) = match inner.split_once(',') {
            Some((g, e)) => (g.trim(), e.trim()),
            None if inner.len() == 8 && inner.is_char_boundary(4) => inner.split_at(4),
            None => return SyntaxSnafu { text }.fail(),
        };
        ensure!(
            group.len() == 4
                && element.len() == 4
                && group.chars().chain(element.chars()).all(|c| c.is_ascii_hexdigit()),
            SyntaxSnafu { text }
        );
        let group = u16::from_str_radix(group, 16).context(NumberSnafu { text })?;
        let element = u16::from_str_radix(element, 16).context(NumberSnafu { text })?;
        Ok(Tag(group, element))
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl PartialEq<[u16; 2]> for Tag {
    fn eq(&self, other: &[u16; 2]) -> bool {
        self.0 == other[0] && self.1 == other[1]
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<[u16; 2]> for Tag {
    #[inline]
    fn from(value: [u16; 2]) -> Tag {
        Tag(value[0], value[1])
    }
}

/// A type for representing data set content length, in bytes.
/// An internal value of `0xFFFF_FFFF` represents an undefined
/// (unspecified) length, which is closed by a delimiter in the stream.
///
/// Two undefined lengths are not equal,
/// and any arithmetic involving an undefined length stays undefined.
///
/// ```
/// # use dcmtree_core::Length;
/// assert_ne!(Length::UNDEFINED, Length::UNDEFINED);
/// assert!(Length(64).checked_add(Length::UNDEFINED).unwrap().is_undefined());
/// assert!(Length(16) < Length(64));
/// assert!(!(Length::UNDEFINED < Length(64)));
/// ```
#[derive(Clone, Copy)]
pub struct Length(pub u32);

const UNDEFINED_LEN: u32 = 0xFFFF_FFFF;

impl Length {
    /// A length that is undefined.
    pub const UNDEFINED: Self = Length(UNDEFINED_LEN);

    /// Check whether this length is undefined (unknown).
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED_LEN
    }

    /// Check whether this length is well defined (not undefined).
    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// Fetch the concrete length value, if available.
    /// Returns `None` if it represents an undefined length.
    #[inline]
    pub fn get(self) -> Option<u32> {
        match self.0 {
            UNDEFINED_LEN => None,
            v => Some(v),
        }
    }

    /// Add two lengths, yielding `None` if the sum of two defined lengths
    /// cannot be represented.
    /// Undefined lengths propagate.
    pub fn checked_add(self, rhs: Length) -> Option<Length> {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => Some(Length::UNDEFINED),
            (l1, l2) => l1
                .checked_add(l2)
                .filter(|&o| o != UNDEFINED_LEN)
                .map(Length),
        }
    }
}

impl From<u32> for Length {
    #[inline]
    fn from(o: u32) -> Self {
        Length(o)
    }
}

impl PartialEq<Length> for Length {
    fn eq(&self, rhs: &Length) -> bool {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => false,
            (l1, l2) => l1 == l2,
        }
    }
}

impl PartialOrd<Length> for Length {
    fn partial_cmp(&self, rhs: &Length) -> Option<Ordering> {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => None,
            (l1, l2) => Some(l1.cmp(&l2)),
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("Length(Undefined)"),
            l => f.debug_tuple("Length").field(&l).finish(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("U/L"),
            l => write!(f, "{}", &l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_from_text() {
        let expected = Tag(0x0010, 0x0020);
        assert_eq!("0010,0020".parse::<Tag>().unwrap(), expected);
        assert_eq!("(0010,0020)".parse::<Tag>().unwrap(), expected);
        assert_eq!("00100020".parse::<Tag>().unwrap(), expected);
        assert_eq!("7fe0,0010".parse::<Tag>().unwrap(), Tag::PIXEL_DATA);
        assert_eq!(" (FFFE,E000) ".parse::<Tag>().unwrap(), Tag::ITEM);
    }

    #[test]
    fn tag_from_bad_text() {
        for text in ["", "0010", "0010,002", "(0010,0020", "0010;0020", "GGGG,EEEE", "+010,0020", "0010,0020,0030"] {
            assert!(text.parse::<Tag>().is_err(), "{:?} should not parse", text);
        }
    }

    #[test]
    fn tag_display_roundtrip() {
        let tag = Tag(0x0008, 0x103E);
        assert_eq!(tag.to_string(), "(0008,103E)");
        assert_eq!(tag.to_string().parse::<Tag>().unwrap(), tag);
        assert_eq!(format!("{:?}", tag), "Tag(0x0008, 0x103E)");
    }

    #[test]
    fn tag_predicates() {
        assert!(Tag(0x0009, 0x1001).is_private());
        assert!(!Tag(0x0008, 0x0001).is_private());
        assert!(Tag(0x0009, 0x0010).is_private_creator());
        assert!(!Tag(0x0009, 0x1000).is_private_creator());
        assert!(Tag(0x0002, 0x0000).is_group_length());
        assert!(Tag(0x0002, 0x0000).is_meta());
        assert!(Tag::ITEM.is_pseudo());
        assert!(Tag::ITEM_DELIMITER.is_delimiter());
        assert!(Tag::SEQUENCE_DELIMITER.is_delimiter());
        assert!(!Tag::ITEM.is_delimiter());
    }

    #[test]
    fn vr_classes() {
        assert!(VR::OB.has_long_length());
        assert!(VR::SQ.has_long_length());
        assert!(VR::UT.has_long_length());
        assert!(!VR::US.has_long_length());
        assert!(!VR::LO.has_long_length());
        assert_eq!(VR::UI.padding(), 0);
        assert_eq!(VR::LO.padding(), b' ');
        assert_eq!(VR::US.word_width(), 2);
        assert_eq!(VR::FD.word_width(), 8);
        assert_eq!(VR::LO.word_width(), 1);
        assert_eq!(VR::from_binary(*b"OW"), Some(VR::OW));
        assert_eq!(VR::from_binary(*b"ZZ"), None);
        assert_eq!(VR::SV.to_bytes(), *b"SV");
    }

    #[test]
    fn length_arithmetic() {
        assert_eq!(Length(4).checked_add(Length(6)), Some(Length(10)));
        assert!(Length(4)
            .checked_add(Length::UNDEFINED)
            .unwrap()
            .is_undefined());
        assert!(Length(0xFFFF_FFF0).checked_add(Length(0x0F)).is_none());
        assert_ne!(Length::UNDEFINED, Length::UNDEFINED);
        assert_eq!(Length::UNDEFINED.to_string(), "U/L");
    }
}
