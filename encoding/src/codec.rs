//! Packing and unpacking of DICOM values under a chosen byte order.
//!
//! [`ByteCodec`] converts between the binary form of a value
//! and a [`PrimitiveValue`], as driven by the value representation.
//! The primitives it uses are chosen by comparing the host byte order
//! with the byte order declared for the stream:
//! when both match, native primitives are used,
//! otherwise the swapping primitives are used.

use byteordered::{ByteOrdered, Endianness};
use dcmtree_core::value::{ConvertValueError, PrimitiveValue, C};
use dcmtree_core::{Tag, VR};
use snafu::{ensure, Backtrace, ResultExt, Snafu};

/// An error which may occur when decoding a value from its binary form.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeValueError {
    /// The value length is not a multiple of the value unit size.
    #[snafu(display(
        "Length {} is not a multiple of {} bytes required by {}",
        len,
        width,
        vr
    ))]
    UnalignedLength {
        len: usize,
        width: usize,
        vr: VR,
        backtrace: Backtrace,
    },
    /// Sequences have no primitive value.
    #[snafu(display("Cannot decode a primitive value of VR SQ"))]
    SequenceValue { backtrace: Backtrace },
    #[snafu(display("Could not read binary value"))]
    ReadBinary {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// An error which may occur when encoding a value into its binary form.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EncodeValueError {
    /// The value cannot be represented with the element's VR.
    #[snafu(display("Value not compatible with VR {}", vr))]
    Convert {
        vr: VR,
        #[snafu(backtrace)]
        source: ConvertValueError,
    },
    /// Sequences have no primitive value.
    #[snafu(display("Cannot encode a primitive value of VR SQ"))]
    SequenceVr { backtrace: Backtrace },
    #[snafu(display("Could not write binary value"))]
    WriteBinary {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// Encoder and decoder of primitive values for one declared byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteCodec {
    /// the byte order of the stream
    declared: Endianness,
    /// whether the declared order differs from the host order
    swapped: bool,
}

impl ByteCodec {
    /// Create a codec for a stream in the given byte order.
    pub fn new(declared: Endianness) -> Self {
        ByteCodec {
            declared,
            swapped: declared != Endianness::native(),
        }
    }

    /// Create a codec for a little endian stream.
    pub fn little_endian() -> Self {
        ByteCodec::new(Endianness::Little)
    }

    /// Create a codec for a big endian stream.
    pub fn big_endian() -> Self {
        ByteCodec::new(Endianness::Big)
    }

    /// The byte order declared for the stream.
    pub fn declared(&self) -> Endianness {
        self.declared
    }

    /// Whether values are byte swapped relative to the host.
    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// The byte order of the primitives in use.
    #[inline]
    fn order(&self) -> Endianness {
        if self.swapped {
            Endianness::native().to_opposite()
        } else {
            Endianness::native()
        }
    }

    /// Encode a tag as two 16-bit words (group, then element).
    pub fn encode_tag(&self, tag: Tag) -> [u8; 4] {
        let mut out = [0; 4];
        let (group, element) = out.split_at_mut(2);
        self.put_u16(group, tag.0);
        self.put_u16(element, tag.1);
        out
    }

    /// Decode a tag from the first four bytes of `bytes`.
    /// Returns `None` if fewer than four bytes are available.
    pub fn decode_tag(&self, bytes: &[u8]) -> Option<Tag> {
        let group = self.get_u16(bytes.get(0..2)?)?;
        let element = self.get_u16(bytes.get(2..4)?)?;
        Some(Tag(group, element))
    }

    /// Decode a 16-bit unsigned integer from the start of `bytes`.
    pub fn get_u16(&self, bytes: &[u8]) -> Option<u16> {
        ByteOrdered::runtime(bytes, self.order()).read_u16().ok()
    }

    /// Decode a 32-bit unsigned integer from the start of `bytes`.
    pub fn get_u32(&self, bytes: &[u8]) -> Option<u32> {
        ByteOrdered::runtime(bytes, self.order()).read_u32().ok()
    }

    fn put_u16(&self, target: &mut [u8], value: u16) {
        let bytes = match self.order() {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        };
        target.copy_from_slice(&bytes);
    }

    /// Append a 16-bit unsigned integer to `out`.
    pub fn write_u16(&self, out: &mut Vec<u8>, value: u16) {
        let mut word = [0; 2];
        self.put_u16(&mut word, value);
        out.extend_from_slice(&word);
    }

    /// Append a 32-bit unsigned integer to `out`.
    pub fn write_u32(&self, out: &mut Vec<u8>, value: u32) {
        match self.order() {
            Endianness::Little => out.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Decode the binary form of a value with the given VR.
    ///
    /// Textual values have their trailing whitespace and null padding
    /// removed, and keep backslash separators as they are.
    /// Binary values are decoded as arrays.
    pub fn decode(&self, bytes: &[u8], vr: VR) -> Result<PrimitiveValue, DecodeValueError> {
        if bytes.is_empty() {
            return Ok(PrimitiveValue::Empty);
        }
        if vr.is_text() {
            let text = String::from_utf8_lossy(bytes);
            let text = text.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
            return Ok(PrimitiveValue::Str(text.to_owned()));
        }

        let width = vr.word_width();
        ensure!(
            bytes.len() % width == 0,
            UnalignedLengthSnafu {
                len: bytes.len(),
                width,
                vr
            }
        );
        let n = bytes.len() / width;
        let mut src = ByteOrdered::runtime(bytes, self.order());

        macro_rules! read_into {
            ($typ: ty, $method: ident, $variant: ident) => {{
                let mut buf: C<$typ> = C::from_elem(Default::default(), n);
                src.$method(&mut buf).context(ReadBinarySnafu)?;
                PrimitiveValue::$variant(buf)
            }};
        }

        Ok(match vr {
            VR::SQ => return SequenceValueSnafu.fail(),
            VR::AT => {
                let mut words: C<u16> = C::from_elem(0, n);
                src.read_u16_into(&mut words).context(ReadBinarySnafu)?;
                if words.len() % 2 != 0 {
                    return UnalignedLengthSnafu {
                        len: bytes.len(),
                        width: 4_usize,
                        vr,
                    }
                    .fail();
                }
                PrimitiveValue::Tags(words.chunks(2).map(|w| Tag(w[0], w[1])).collect())
            }
            VR::US | VR::OW => read_into!(u16, read_u16_into, U16),
            VR::SS => read_into!(i16, read_i16_into, I16),
            VR::UL | VR::OL => read_into!(u32, read_u32_into, U32),
            VR::SL => read_into!(i32, read_i32_into, I32),
            VR::UV | VR::OV => read_into!(u64, read_u64_into, U64),
            VR::SV => read_into!(i64, read_i64_into, I64),
            VR::FL | VR::OF => read_into!(f32, read_f32_into, F32),
            VR::FD | VR::OD => read_into!(f64, read_f64_into, F64),
            // OB, UN
            _ => PrimitiveValue::U8(C::from_slice(bytes)),
        })
    }

    /// Encode a value into its binary form with the given VR.
    ///
    /// Text is parsed when the VR is numeric,
    /// and numbers are formatted when the VR is textual.
    /// The output always has an even length:
    /// an odd-length value gains one padding byte,
    /// a null byte for UI, OB and UN, and a space otherwise.
    pub fn encode(&self, value: &PrimitiveValue, vr: VR) -> Result<Vec<u8>, EncodeValueError> {
        let mut out = Vec::new();
        if vr.is_text() {
            out.extend_from_slice(value.to_str().as_bytes());
        } else {
            self.encode_binary(&mut out, value, vr)?;
        }
        if out.len() % 2 == 1 {
            out.push(vr.padding());
        }
        Ok(out)
    }

    fn encode_binary(
        &self,
        out: &mut Vec<u8>,
        value: &PrimitiveValue,
        vr: VR,
    ) -> Result<(), EncodeValueError> {
        ensure!(vr != VR::SQ, SequenceVrSnafu);
        if vr.word_width() == 1 {
            // OB, UN
            match value {
                PrimitiveValue::U8(bytes) => out.extend_from_slice(bytes),
                other => out.extend(other.to_multi_num::<u8>().context(ConvertSnafu { vr })?),
            }
            return Ok(());
        }

        let mut dst = ByteOrdered::runtime(out, self.order());

        macro_rules! write_each {
            ($typ: ty, $method: ident) => {
                for v in value.to_multi_num::<$typ>().context(ConvertSnafu { vr })? {
                    dst.$method(v).context(WriteBinarySnafu)?;
                }
            };
        }

        match vr {
            VR::AT => {
                for tag in value.to_tags().context(ConvertSnafu { vr })? {
                    dst.write_u16(tag.0).context(WriteBinarySnafu)?;
                    dst.write_u16(tag.1).context(WriteBinarySnafu)?;
                }
            }
            VR::SS => write_each!(i16, write_i16),
            VR::UL | VR::OL => write_each!(u32, write_u32),
            VR::SL => write_each!(i32, write_i32),
            VR::UV | VR::OV => write_each!(u64, write_u64),
            VR::SV => write_each!(i64, write_i64),
            VR::FL | VR::OF => write_each!(f32, write_f32),
            VR::FD | VR::OD => write_each!(f64, write_f64),
            // US, OW
            _ => write_each!(u16, write_u16),
        }
        Ok(())
    }
}

/// Reverse the byte order of every unit of a binary value in place,
/// converting it between little and big endian.
/// Values insensitive to byte order are left untouched.
pub fn swap_words(bin: &mut [u8], vr: VR) {
    let width = vr.word_width();
    if width == 1 {
        return;
    }
    for word in bin.chunks_exact_mut(width) {
        word.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmtree_core::dicom_value;
    use rstest::rstest;

    #[rstest]
    #[case(Endianness::Little)]
    #[case(Endianness::Big)]
    fn tag_roundtrip(#[case] order: Endianness) {
        let codec = ByteCodec::new(order);
        let tag: Tag = "0010,0020".parse().unwrap();
        let bytes = codec.encode_tag(tag);
        assert_eq!(codec.decode_tag(&bytes), Some(tag));
        assert_eq!(codec.decode_tag(&bytes[..3]), None);
    }

    #[test]
    fn tag_layout_follows_declared_order() {
        let tag = Tag(0x0010, 0x0020);
        assert_eq!(
            ByteCodec::little_endian().encode_tag(tag),
            [0x10, 0x00, 0x20, 0x00]
        );
        assert_eq!(
            ByteCodec::big_endian().encode_tag(tag),
            [0x00, 0x10, 0x00, 0x20]
        );
    }

    #[test]
    fn native_order_is_not_swapped() {
        let codec = ByteCodec::new(Endianness::native());
        assert!(!codec.is_swapped());
        let codec = ByteCodec::new(Endianness::native().to_opposite());
        assert!(codec.is_swapped());
        assert_eq!(codec.declared(), Endianness::native().to_opposite());
    }

    #[rstest]
    #[case(Endianness::Little)]
    #[case(Endianness::Big)]
    fn numbers_roundtrip(#[case] order: Endianness) {
        let codec = ByteCodec::new(order);
        let value = dicom_value!(U16, [512, 1, 0xFFFF]);
        let bytes = codec.encode(&value, VR::US).unwrap();
        assert_eq!(bytes.len(), 6);
        assert_eq!(codec.decode(&bytes, VR::US).unwrap(), value);

        let value = dicom_value!(F64, [1.5, -2.25]);
        let bytes = codec.encode(&value, VR::FD).unwrap();
        assert_eq!(codec.decode(&bytes, VR::FD).unwrap(), value);

        let value = dicom_value!(Tags, [Tag(0x0008, 0x0016), Tag(0x7FE0, 0x0010)]);
        let bytes = codec.encode(&value, VR::AT).unwrap();
        assert_eq!(codec.decode(&bytes, VR::AT).unwrap(), value);
    }

    #[test]
    fn numbers_from_text() {
        let codec = ByteCodec::little_endian();
        let bytes = codec.encode(&dicom_value!(Str, "1\\2"), VR::UL).unwrap();
        assert_eq!(bytes, [1, 0, 0, 0, 2, 0, 0, 0]);
        assert!(codec.encode(&dicom_value!(Str, "one"), VR::UL).is_err());
    }

    #[test]
    fn text_is_padded_to_even_length() {
        let codec = ByteCodec::little_endian();
        assert_eq!(
            codec.encode(&dicom_value!(Str, "1.2.3"), VR::UI).unwrap(),
            b"1.2.3\0"
        );
        assert_eq!(
            codec.encode(&dicom_value!(Str, "DOE^J"), VR::PN).unwrap(),
            b"DOE^J "
        );
        assert_eq!(
            codec.encode(&dicom_value!(Str, "ABCD"), VR::CS).unwrap(),
            b"ABCD"
        );
        assert_eq!(
            codec
                .encode(&dicom_value!(U8, [1, 2, 3]), VR::OB)
                .unwrap(),
            [1, 2, 3, 0]
        );
    }

    #[test]
    fn text_is_trimmed() {
        let codec = ByteCodec::little_endian();
        assert_eq!(
            codec.decode(b"1.2.3\0", VR::UI).unwrap(),
            dicom_value!(Str, "1.2.3")
        );
        assert_eq!(
            codec.decode(b"A\\B ", VR::CS).unwrap(),
            dicom_value!(Str, "A\\B")
        );
        assert_eq!(codec.decode(b"", VR::LO).unwrap(), PrimitiveValue::Empty);
    }

    #[test]
    fn reencoding_is_idempotent() {
        let codec = ByteCodec::big_endian();
        let bytes = codec.encode(&dicom_value!(I32, [-7, 9]), VR::SL).unwrap();
        let value = codec.decode(&bytes, VR::SL).unwrap();
        assert_eq!(codec.encode(&value, VR::SL).unwrap(), bytes);
    }

    #[test]
    fn unaligned_binary_value() {
        let codec = ByteCodec::little_endian();
        assert!(matches!(
            codec.decode(&[1, 2, 3], VR::US),
            Err(DecodeValueError::UnalignedLength { .. })
        ));
        assert!(codec.decode(&[1, 2], VR::SQ).is_err());
    }

    #[test]
    fn swapping_words() {
        let mut bin = vec![1, 0, 2, 0];
        swap_words(&mut bin, VR::US);
        assert_eq!(bin, [0, 1, 0, 2]);
        swap_words(&mut bin, VR::UL);
        assert_eq!(bin, [2, 0, 1, 0]);
        swap_words(&mut bin, VR::OB);
        assert_eq!(bin, [2, 0, 1, 0]);
    }
}
