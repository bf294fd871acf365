//! Core data element dictionary types.
//!
//! A data dictionary translates attribute tags to names and typical
//! value representations and vice versa.
//! Dictionaries are explicitly constructed values
//! which are passed by reference to whatever needs them,
//! so several dictionaries may coexist in one process.

pub mod stub;

pub use self::stub::StubDataDictionary;

use crate::header::{Tag, VR};
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::str::FromStr;

/// Specification of a range of tags pertaining to an attribute.
/// Very often, the dictionary of attributes indicates a unique
/// group part and element part `(group,elem)`,
/// but occasionally an attribute may cover
/// a range of groups or elements instead.
/// For example,
/// _Overlay Data_ (60xx,3000) has more than one possible tag,
/// since it is part of a repeating group.
/// Moreover, a unique variant is defined for group length tags
/// and another one for private creator tags.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TagRange {
    /// Only a specific tag
    Single(Tag),
    /// The two rightmost digits of the _group_ portion are open:
    /// `(GGxx,EEEE)`
    Group100(Tag),
    /// The two rightmost digits of the _element_ portion are open:
    /// `(GGGG,EExx)`
    Element100(Tag),
    /// Generic group length tag,
    /// refers to any attribute of the form `(GGGG,0000)`,
    /// save for those which have their own single tag record.
    GroupLength,
    /// Generic private creator tag,
    /// refers to any tag from (GGGG,0010) to (GGGG,00FF),
    /// where `GGGG` is an odd number.
    PrivateCreator,
}

impl TagRange {
    /// Retrieve the inner tag representation of this range.
    ///
    /// Open components are zeroed out.
    /// Returns a zeroed out tag if it is a group length tag.
    /// If it is a private creator tag,
    /// this method returns `Tag(0x0009, 0x0010)`.
    pub fn inner(self) -> Tag {
        match self {
            TagRange::Single(tag) => tag,
            TagRange::Group100(tag) => tag,
            TagRange::Element100(tag) => tag,
            TagRange::GroupLength => Tag(0x0000, 0x0000),
            TagRange::PrivateCreator => Tag(0x0009, 0x0010),
        }
    }

    /// Check whether the given tag is covered by this range.
    pub fn contains(self, tag: Tag) -> bool {
        match self {
            TagRange::Single(t) => t == tag,
            TagRange::Group100(t) => tag.0 & 0xFF00 == t.0 && tag.1 == t.1,
            TagRange::Element100(t) => tag.0 == t.0 && tag.1 & 0xFF00 == t.1,
            TagRange::GroupLength => tag.is_group_length(),
            TagRange::PrivateCreator => tag.is_private_creator(),
        }
    }
}

/// An error returned when parsing an invalid tag range.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum TagRangeParseError {
    /// The text has no tag components.
    #[snafu(display("Not enough tag components, expected tag (group, element)"))]
    MissingTag {
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// The text has a group but no element.
    #[snafu(display("Not enough tag components, expected tag element"))]
    MissingTagElement {
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// The group component does not have 4 digits.
    #[snafu(display(
        "tag component `group` has an invalid length: got {} but must be 4",
        got
    ))]
    InvalidGroupLength {
        /// The length of the component
        got: usize,
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// The element component does not have 4 digits.
    #[snafu(display(
        "tag component `element` has an invalid length: got {} but must be 4",
        got
    ))]
    InvalidElementLength {
        /// The length of the component
        got: usize,
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// Both components hold wildcards.
    #[snafu(display("unsupported tag range"))]
    UnsupportedTagRange {
        /// The error's backtrace
        backtrace: Backtrace,
    },
    /// The group component is not hexadecimal.
    #[snafu(display("invalid tag component `group`"))]
    InvalidTagGroup {
        /// The error's backtrace
        backtrace: Backtrace,
        /// The number parsing error
        source: std::num::ParseIntError,
    },
    /// The element component is not hexadecimal.
    #[snafu(display("invalid tag component `element`"))]
    InvalidTagElement {
        /// The error's backtrace
        backtrace: Backtrace,
        /// The number parsing error
        source: std::num::ParseIntError,
    },
}

impl FromStr for TagRange {
    type Err = TagRangeParseError;

    fn from_str(mut s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('(') && s.ends_with(')') {
            s = &s[1..s.len() - 1];
        }
        let mut parts = s.split(',');
        let group = parts.next().context(MissingTagSnafu)?;
        let elem = parts.next().context(MissingTagElementSnafu)?;
        ensure!(
            group.len() == 4,
            InvalidGroupLengthSnafu { got: group.len() }
        );
        ensure!(
            elem.len() == 4,
            InvalidElementLengthSnafu { got: elem.len() }
        );

        match (&group.as_bytes()[2..], &elem.as_bytes()[2..]) {
            (b"xx", b"xx") => UnsupportedTagRangeSnafu.fail(),
            (b"xx", _) => {
                let group =
                    u16::from_str_radix(&group[..2], 16).context(InvalidTagGroupSnafu)? << 8;
                let elem = u16::from_str_radix(elem, 16).context(InvalidTagElementSnafu)?;
                Ok(TagRange::Group100(Tag(group, elem)))
            }
            (_, b"xx") => {
                let group = u16::from_str_radix(group, 16).context(InvalidTagGroupSnafu)?;
                let elem =
                    u16::from_str_radix(&elem[..2], 16).context(InvalidTagElementSnafu)? << 8;
                Ok(TagRange::Element100(Tag(group, elem)))
            }
            (_, _) => {
                let group = u16::from_str_radix(group, 16).context(InvalidTagGroupSnafu)?;
                let elem = u16::from_str_radix(elem, 16).context(InvalidTagElementSnafu)?;
                Ok(TagRange::Single(Tag(group, elem)))
            }
        }
    }
}

/// The data element dictionary entry type,
/// representing a DICOM attribute.
pub trait DataDictionaryEntry {
    /// The full possible tag range of the attribute,
    /// which this dictionary entry can represent.
    fn tag_range(&self) -> TagRange;

    /// Fetch a single tag applicable to this attribute.
    ///
    /// Note that this is not necessarily
    /// the original tag used as key for this entry.
    fn tag(&self) -> Tag {
        self.tag_range().inner()
    }

    /// The alias of the attribute, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;

    /// The _typical_ value representation of the attribute.
    fn vr(&self) -> VR;

    /// The value multiplicity, such as `1`, `1-n` or `2-2n`.
    fn vm(&self) -> &str;

    /// Whether the attribute is retired from the standard.
    fn retired(&self) -> bool;
}

/// A data type for a dictionary entry with string slices for its text fields.
#[derive(Debug, PartialEq, Clone)]
pub struct DataDictionaryEntryRef<'a> {
    /// The attribute tag or tag range
    pub tag: TagRange,
    /// The alias of the attribute, with no spaces, usually InCapitalizedCamelCase
    pub alias: &'a str,
    /// The _typical_ value representation of the attribute
    pub vr: VR,
    /// The value multiplicity
    pub vm: &'a str,
    /// Whether the attribute is retired
    pub retired: bool,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag_range(&self) -> TagRange {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VR {
        self.vr
    }
    fn vm(&self) -> &str {
        self.vm
    }
    fn retired(&self) -> bool {
        self.retired
    }
}

/// The outcome of resolving an element tag,
/// after applying the fallback rules of [`DataDictionary::lookup_element`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementInfo<'a> {
    /// The attribute name (alias)
    pub name: &'a str,
    /// The typical value representation
    pub vr: VR,
    /// The value multiplicity
    pub vm: &'a str,
    /// Whether the attribute is retired
    pub retired: bool,
}

impl ElementInfo<'static> {
    /// Resolution of a private tag without a dictionary record.
    pub const PRIVATE: ElementInfo<'static> = ElementInfo {
        name: "Private",
        vr: VR::UN,
        vm: "1",
        retired: false,
    };

    /// Resolution of a tag unknown to the dictionary.
    pub const UNKNOWN: ElementInfo<'static> = ElementInfo {
        name: "Unknown",
        vr: VR::UN,
        vm: "1",
        retired: false,
    };

    /// Resolution of a group length tag without a dictionary record.
    pub const GROUP_LENGTH: ElementInfo<'static> = ElementInfo {
        name: "GenericGroupLength",
        vr: VR::UL,
        vm: "1",
        retired: true,
    };
}

/// Type trait for a dictionary of DICOM attributes.
///
/// The main purpose of an attribute dictionary is
/// to retrieve a record containing additional information about a data element,
/// in one of the following ways:
///
/// - By DICOM tag, via [`by_tag`][1];
/// - By its keyword (also known as alias) via [`by_name`][2];
/// - By a keyword or a tag printed in one of its standard forms,
///   using [`parse_tag`][3].
///
/// These methods will return `None`
/// when the tag or name is not recognized by the dictionary.
/// [`lookup_element`][4] never fails,
/// resorting to the documented fallbacks instead.
///
/// Implementations are expected to be immutable once constructed,
/// so that they can be shared between threads for reading.
///
/// [1]: DataDictionary::by_tag
/// [2]: DataDictionary::by_name
/// [3]: DataDictionary::parse_tag
/// [4]: DataDictionary::lookup_element
pub trait DataDictionary {
    /// The type of the dictionary entry.
    type Entry: DataDictionaryEntry;

    /// Fetch a data element entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Fetch an entry by its usual alias
    /// (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases (or keyword)
    /// are usually in UpperCamelCase,
    /// not separated by spaces,
    /// and are case sensitive.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Use this data element dictionary to interpret a DICOM tag,
    /// written either as a tag literal or as a keyword.
    fn parse_tag(&self, tag: &str) -> Option<Tag> {
        tag.parse().ok().or_else(|| self.by_name(tag).map(|e| e.tag()))
    }

    /// Resolve the name, typical VR, multiplicity and retirement status
    /// of an element.
    ///
    /// When the dictionary has no record for the tag:
    ///
    /// - a group length tag `(gggg,0000)` is a retired `UL` element
    ///   named `GenericGroupLength`;
    /// - a private tag (odd group) is named `Private` with VR `UN`;
    /// - any other tag is named `Unknown` with VR `UN`.
    fn lookup_element(&self, tag: Tag) -> ElementInfo<'_> {
        match self.by_tag(tag) {
            Some(entry) => ElementInfo {
                name: entry.alias(),
                vr: entry.vr(),
                vm: entry.vm(),
                retired: entry.retired(),
            },
            None if tag.is_group_length() => ElementInfo::GROUP_LENGTH,
            None if tag.is_private() => ElementInfo::PRIVATE,
            None => ElementInfo::UNKNOWN,
        }
    }
}

impl<D> DataDictionary for &D
where
    D: DataDictionary + ?Sized,
{
    type Entry = D::Entry;

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }
}

impl<D> DataDictionary for std::sync::Arc<D>
where
    D: DataDictionary + ?Sized,
{
    type Entry = D::Entry;

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }
}
