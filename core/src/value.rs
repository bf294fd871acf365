//! Declaration and implementation of a DICOM primitive value.
//!
//! See [`PrimitiveValue`].

use crate::header::Tag;
use num_traits::NumCast;
use smallvec::SmallVec;
use snafu::{Backtrace, OptionExt, Snafu};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// An error which may occur when converting a value
/// into another representation.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConvertValueError {
    /// The value type cannot be converted to the requested type.
    #[snafu(display("Cannot convert {:?} value to {}", original, requested))]
    Incompatible {
        /// The type of the original value
        original: ValueType,
        /// The name of the requested type
        requested: &'static str,
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// A textual component could not be parsed.
    #[snafu(display("Could not parse `{}` as {}", text, requested))]
    ParseText {
        /// The text which failed to parse
        text: String,
        /// The name of the requested type
        requested: &'static str,
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// A number does not fit in the requested type.
    #[snafu(display("Value {} out of range for {}", value, requested))]
    OutOfRange {
        /// The value, printed
        value: String,
        /// The name of the requested type
        requested: &'static str,
        /// The error's backtrace
        backtrace: Backtrace,
    },
}

/// An enum representing a primitive value from a DICOM element.
///
/// Multiple elements are contained in a [`smallvec`] vector,
/// conveniently aliased to the type [`C`].
/// See the macro [`dicom_value!`](crate::dicom_value)
/// for a more intuitive means of constructing these values.
///
/// # Example
///
/// ```
/// # use dcmtree_core::PrimitiveValue;
/// # use smallvec::smallvec;
/// let value = PrimitiveValue::from("Smith^John");
/// assert_eq!(value, PrimitiveValue::Str("Smith^John".to_string()));
/// assert_eq!(value.multiplicity(), 1);
///
/// let value = PrimitiveValue::from(512_u16);
/// assert_eq!(value, PrimitiveValue::U16(smallvec![512]));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub enum PrimitiveValue {
    /// No data. Usually employed for zero-lengthed values.
    Empty,

    /// A sequence of strings.
    Strs(C<String>),

    /// A single string,
    /// possibly holding several backslash separated values.
    Str(String),

    /// A sequence of attribute tags.
    /// Used specifically for AT.
    Tags(C<Tag>),

    /// A sequence of bytes.
    /// Used for OB and UN.
    U8(C<u8>),

    /// A sequence of signed 16-bit integers.
    /// Used for SS.
    I16(C<i16>),

    /// A sequence of unsigned 16-bit integers.
    /// Used for US and OW.
    U16(C<u16>),

    /// A sequence of signed 32-bit integers.
    /// Used for SL.
    I32(C<i32>),

    /// A sequence of unsigned 32-bit integers.
    /// Used for UL and OL.
    U32(C<u32>),

    /// A sequence of signed 64-bit integers.
    /// Used for SV.
    I64(C<i64>),

    /// A sequence of unsigned 64-bit integers.
    /// Used for UV and OV.
    U64(C<u64>),

    /// A sequence of 32-bit floating point numbers.
    /// Used for OF and FL.
    F32(C<f32>),

    /// A sequence of 64-bit floating point numbers.
    /// Used for OD and FD.
    F64(C<f64>),
}

/// The type of a primitive value, without its content.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValueType {
    /// No data.
    Empty,
    /// A sequence of strings.
    Strs,
    /// A single string.
    Str,
    /// A sequence of attribute tags.
    Tags,
    /// A sequence of bytes.
    U8,
    /// A sequence of signed 16-bit integers.
    I16,
    /// A sequence of unsigned 16-bit integers.
    U16,
    /// A sequence of signed 32-bit integers.
    I32,
    /// A sequence of unsigned 32-bit integers.
    U32,
    /// A sequence of signed 64-bit integers.
    I64,
    /// A sequence of unsigned 64-bit integers.
    U64,
    /// A sequence of 32-bit floating point numbers.
    F32,
    /// A sequence of 64-bit floating point numbers.
    F64,
}

/// A utility macro for implementing the conversion from a core type into a
/// DICOM primitive value with a single element.
macro_rules! impl_from_for_primitive {
    ($typ: ty, $variant: ident) => {
        impl From<$typ> for PrimitiveValue {
            fn from(value: $typ) -> Self {
                PrimitiveValue::$variant(C::from_elem(value, 1))
            }
        }

        impl From<Vec<$typ>> for PrimitiveValue {
            fn from(value: Vec<$typ>) -> Self {
                PrimitiveValue::$variant(C::from_vec(value))
            }
        }
    };
}

impl_from_for_primitive!(u8, U8);
impl_from_for_primitive!(u16, U16);
impl_from_for_primitive!(i16, I16);
impl_from_for_primitive!(u32, U32);
impl_from_for_primitive!(i32, I32);
impl_from_for_primitive!(u64, U64);
impl_from_for_primitive!(i64, I64);
impl_from_for_primitive!(f32, F32);
impl_from_for_primitive!(f64, F64);
impl_from_for_primitive!(Tag, Tags);

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        PrimitiveValue::Str(value)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::Str(value.to_owned())
    }
}

impl From<&[u8]> for PrimitiveValue {
    fn from(value: &[u8]) -> Self {
        PrimitiveValue::U8(C::from(value))
    }
}

/// Construct a DICOM primitive value.
///
/// ```
/// # use dcmtree_core::{dicom_value, PrimitiveValue};
/// let value = dicom_value!(U16, [256, 0, 16]);
/// assert_eq!(value.multiplicity(), 3);
/// let value = dicom_value!(Str, "ORIGINAL\\PRIMARY");
/// assert_eq!(value.to_multi_str(), vec!["ORIGINAL", "PRIMARY"]);
/// assert_eq!(dicom_value!(), PrimitiveValue::Empty);
/// ```
#[macro_export]
macro_rules! dicom_value {
    () => {
        $crate::value::PrimitiveValue::Empty
    };
    (Str, $elem: expr) => {
        $crate::value::PrimitiveValue::Str(::std::string::String::from($elem))
    };
    (Strs, [ $($elem: expr),* $(,)? ]) => {
        $crate::value::PrimitiveValue::Strs(
            $crate::smallvec::smallvec![$(::std::string::String::from($elem),)*]
        )
    };
    ($typ: ident, [ $($elem: expr),* $(,)? ]) => {
        $crate::value::PrimitiveValue :: $typ ($crate::smallvec::smallvec![$($elem,)*])
    };
    ($typ: ident, $elem: expr) => {
        $crate::value::PrimitiveValue :: $typ ($crate::value::C::from_elem($elem, 1))
    };
}

/// Numeric types which a primitive value can be converted to.
pub trait ValueNumber: NumCast + FromStr + Copy {
    /// A name for the type, used in error reporting.
    const NAME: &'static str;
}

macro_rules! impl_value_number {
    ($($typ: ty),*) => {
        $(
            impl ValueNumber for $typ {
                const NAME: &'static str = stringify!($typ);
            }
        )*
    };
}

impl_value_number!(u8, u16, i16, u32, i32, u64, i64, f32, f64);

fn parse_number<T: ValueNumber>(text: &str) -> Result<T, ConvertValueError> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if let Ok(v) = text.parse::<T>() {
        return Ok(v);
    }
    // integer strings with a decimal part or exponent
    let v: f64 = text.parse().ok().context(ParseTextSnafu {
        text,
        requested: T::NAME,
    })?;
    cast_number(v)
}

fn cast_number<T: ValueNumber, N: NumCast + fmt::Display + Copy>(
    v: N,
) -> Result<T, ConvertValueError> {
    <T as NumCast>::from(v).context(OutOfRangeSnafu {
        value: v.to_string(),
        requested: T::NAME,
    })
}

impl PrimitiveValue {
    /// Obtain the type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            PrimitiveValue::Empty => ValueType::Empty,
            PrimitiveValue::Strs(_) => ValueType::Strs,
            PrimitiveValue::Str(_) => ValueType::Str,
            PrimitiveValue::Tags(_) => ValueType::Tags,
            PrimitiveValue::U8(_) => ValueType::U8,
            PrimitiveValue::I16(_) => ValueType::I16,
            PrimitiveValue::U16(_) => ValueType::U16,
            PrimitiveValue::I32(_) => ValueType::I32,
            PrimitiveValue::U32(_) => ValueType::U32,
            PrimitiveValue::I64(_) => ValueType::I64,
            PrimitiveValue::U64(_) => ValueType::U64,
            PrimitiveValue::F32(_) => ValueType::F32,
            PrimitiveValue::F64(_) => ValueType::F64,
        }
    }

    /// Obtain the number of individual values.
    /// A single string counts its backslash separated components.
    pub fn multiplicity(&self) -> u32 {
        use self::PrimitiveValue::*;
        match self {
            Empty => 0,
            Str(s) if s.is_empty() => 0,
            Str(s) => s.split('\\').count() as u32,
            Strs(c) => c.len() as u32,
            Tags(c) => c.len() as u32,
            U8(c) => c.len() as u32,
            I16(c) => c.len() as u32,
            U16(c) => c.len() as u32,
            I32(c) => c.len() as u32,
            U32(c) => c.len() as u32,
            I64(c) => c.len() as u32,
            U64(c) => c.len() as u32,
            F32(c) => c.len() as u32,
            F64(c) => c.len() as u32,
        }
    }

    /// Check whether the value holds no data.
    pub fn is_empty(&self) -> bool {
        self.multiplicity() == 0
    }

    /// Convert the value to a single string,
    /// joining multiple values with a backslash.
    pub fn to_str(&self) -> Cow<str> {
        match self {
            PrimitiveValue::Empty => Cow::from(""),
            PrimitiveValue::Str(value) => Cow::from(value.as_str()),
            PrimitiveValue::Strs(values) if values.len() == 1 => Cow::from(values[0].as_str()),
            prim => Cow::from(prim.to_string()),
        }
    }

    /// Convert the value to a list of strings, one per value.
    pub fn to_multi_str(&self) -> Vec<String> {
        fn each<T: fmt::Display>(c: &[T]) -> Vec<String> {
            c.iter().map(|v| v.to_string()).collect()
        }
        match self {
            PrimitiveValue::Empty => Vec::new(),
            PrimitiveValue::Str(s) if s.is_empty() => Vec::new(),
            PrimitiveValue::Str(s) => s.split('\\').map(str::to_owned).collect(),
            PrimitiveValue::Strs(c) => c.to_vec(),
            PrimitiveValue::Tags(c) => each(c),
            PrimitiveValue::U8(c) => each(c),
            PrimitiveValue::I16(c) => each(c),
            PrimitiveValue::U16(c) => each(c),
            PrimitiveValue::I32(c) => each(c),
            PrimitiveValue::U32(c) => each(c),
            PrimitiveValue::I64(c) => each(c),
            PrimitiveValue::U64(c) => each(c),
            PrimitiveValue::F32(c) => each(c),
            PrimitiveValue::F64(c) => each(c),
        }
    }

    /// Convert the value to a list of numbers of type `T`.
    ///
    /// Textual values are parsed,
    /// numeric values are cast with range checking.
    pub fn to_multi_num<T: ValueNumber>(&self) -> Result<Vec<T>, ConvertValueError> {
        fn each<T: ValueNumber, N: NumCast + fmt::Display + Copy>(
            c: &[N],
        ) -> Result<Vec<T>, ConvertValueError> {
            c.iter().map(|&v| cast_number(v)).collect()
        }
        match self {
            PrimitiveValue::Empty => Ok(Vec::new()),
            PrimitiveValue::Str(_) | PrimitiveValue::Strs(_) => self
                .to_multi_str()
                .iter()
                .map(|s| parse_number(s))
                .collect(),
            PrimitiveValue::Tags(_) => IncompatibleSnafu {
                original: ValueType::Tags,
                requested: T::NAME,
            }
            .fail(),
            PrimitiveValue::U8(c) => each(c),
            PrimitiveValue::I16(c) => each(c),
            PrimitiveValue::U16(c) => each(c),
            PrimitiveValue::I32(c) => each(c),
            PrimitiveValue::U32(c) => each(c),
            PrimitiveValue::I64(c) => each(c),
            PrimitiveValue::U64(c) => each(c),
            PrimitiveValue::F32(c) => each(c),
            PrimitiveValue::F64(c) => each(c),
        }
    }

    /// Convert the value to a list of attribute tags.
    ///
    /// Strings are parsed as tags,
    /// and 16-bit words are taken in (group, element) pairs.
    pub fn to_tags(&self) -> Result<Vec<Tag>, ConvertValueError> {
        match self {
            PrimitiveValue::Empty => Ok(Vec::new()),
            PrimitiveValue::Tags(c) => Ok(c.to_vec()),
            PrimitiveValue::Str(_) | PrimitiveValue::Strs(_) => self
                .to_multi_str()
                .iter()
                .map(|s| {
                    s.parse::<Tag>().ok().context(ParseTextSnafu {
                        text: s.as_str(),
                        requested: "Tag",
                    })
                })
                .collect(),
            PrimitiveValue::U16(c) if c.len() % 2 == 0 => {
                Ok(c.chunks(2).map(|w| Tag(w[0], w[1])).collect())
            }
            other => IncompatibleSnafu {
                original: other.value_type(),
                requested: "Tag",
            }
            .fail(),
        }
    }
}

/// Values are rendered with the DICOM multi-value separator `\`.
impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter, c: &[T]) -> fmt::Result {
            for (i, v) in c.iter().enumerate() {
                if i > 0 {
                    f.write_str("\\")?;
                }
                write!(f, "{}", v)?;
            }
            Ok(())
        }
        match self {
            PrimitiveValue::Empty => Ok(()),
            PrimitiveValue::Str(s) => f.write_str(s),
            PrimitiveValue::Strs(c) => join(f, c),
            PrimitiveValue::Tags(c) => join(f, c),
            PrimitiveValue::U8(c) => join(f, c),
            PrimitiveValue::I16(c) => join(f, c),
            PrimitiveValue::U16(c) => join(f, c),
            PrimitiveValue::I32(c) => join(f, c),
            PrimitiveValue::U32(c) => join(f, c),
            PrimitiveValue::I64(c) => join(f, c),
            PrimitiveValue::U64(c) => join(f, c),
            PrimitiveValue::F32(c) => join(f, c),
            PrimitiveValue::F64(c) => join(f, c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_with_backslash() {
        assert_eq!(dicom_value!(U16, [256, 0, 16]).to_string(), "256\\0\\16");
        assert_eq!(
            dicom_value!(Strs, ["ORIGINAL", "PRIMARY"]).to_str(),
            "ORIGINAL\\PRIMARY"
        );
        assert_eq!(
            dicom_value!(Tags, [Tag(0x0010, 0x0020)]).to_string(),
            "(0010,0020)"
        );
        assert_eq!(PrimitiveValue::Empty.to_str(), "");
    }

    #[test]
    fn multiplicity_of_text() {
        assert_eq!(dicom_value!(Str, "").multiplicity(), 0);
        assert_eq!(dicom_value!(Str, "A").multiplicity(), 1);
        assert_eq!(dicom_value!(Str, "1\\2\\3").multiplicity(), 3);
        assert!(dicom_value!(Str, "").is_empty());
    }

    #[test]
    fn numbers_from_text() {
        let value = dicom_value!(Str, " 12\\-3 \\4.0");
        assert_eq!(value.to_multi_num::<i32>().unwrap(), vec![12, -3, 4]);
        assert_eq!(value.to_multi_num::<f64>().unwrap(), vec![12., -3., 4.]);
        assert!(dicom_value!(Str, "abc").to_multi_num::<u16>().is_err());
        assert!(matches!(
            dicom_value!(Str, "-1").to_multi_num::<u16>(),
            Err(ConvertValueError::OutOfRange { .. })
        ));
    }

    #[test]
    fn numbers_from_numbers() {
        let value = dicom_value!(U32, [1, 70_000]);
        assert_eq!(value.to_multi_num::<u64>().unwrap(), vec![1, 70_000]);
        assert!(value.to_multi_num::<u16>().is_err());
        assert!(matches!(
            dicom_value!(Tags, [Tag(1, 2)]).to_multi_num::<u16>(),
            Err(ConvertValueError::Incompatible { .. })
        ));
    }

    #[test]
    fn tags_from_various() {
        let expected = vec![Tag(0x0010, 0x0020), Tag(0x0008, 0x0018)];
        assert_eq!(
            dicom_value!(Str, "(0010,0020)\\0008,0018").to_tags().unwrap(),
            expected
        );
        assert_eq!(
            dicom_value!(U16, [0x0010, 0x0020, 0x0008, 0x0018])
                .to_tags()
                .unwrap(),
            expected
        );
        assert!(dicom_value!(U16, [0x0010]).to_tags().is_err());
    }
}
