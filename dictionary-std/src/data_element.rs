use crate::entries::ENTRIES;
use dcmtree_core::dictionary::{DataDictionary, DataDictionaryEntryRef, TagRange::*};
use dcmtree_core::header::Tag;
use dcmtree_core::VR;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Generic Group Length dictionary entry.
static GROUP_LENGTH_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: GroupLength,
    alias: "GenericGroupLength",
    vr: VR::UL,
    vm: "1",
    retired: true,
};

/// Generic Private Creator dictionary entry.
static PRIVATE_CREATOR_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: PrivateCreator,
    alias: "PrivateCreator",
    vr: VR::LO,
    vm: "1",
    retired: false,
};

/// The standard DICOM data element dictionary.
///
/// The dictionary is built once by [`StandardDataDictionary::new`]
/// and never changes afterwards,
/// so a single instance can be shared by reference between threads.
/// Constructing several instances is allowed,
/// each with its own index.
#[derive(Debug, Clone)]
pub struct StandardDataDictionary {
    /// mapping: name → entry
    by_name: HashMap<&'static str, &'static DataDictionaryEntryRef<'static>>,
    /// mapping: tag → entry
    by_tag: HashMap<Tag, &'static DataDictionaryEntryRef<'static>>,
    /// repeating elements of the form (ggxx, eeee). The `xx` portion is zeroed.
    repeating_ggxx: HashSet<Tag>,
    /// repeating elements of the form (gggg, eexx). The `xx` portion is zeroed.
    repeating_eexx: HashSet<Tag>,
}

impl StandardDataDictionary {
    /// Build the dictionary index from the standard records.
    pub fn new() -> StandardDataDictionary {
        let mut d = StandardDataDictionary {
            by_name: HashMap::with_capacity(ENTRIES.len() + 2),
            by_tag: HashMap::with_capacity(ENTRIES.len()),
            repeating_ggxx: HashSet::new(),
            repeating_eexx: HashSet::new(),
        };
        for entry in ENTRIES {
            d.index(entry);
        }
        // generic entries are not part of the records,
        // inserting them manually
        d.by_name.insert("GenericGroupLength", &GROUP_LENGTH_ENTRY);
        d.by_name.insert("PrivateCreator", &PRIVATE_CREATOR_ENTRY);
        d
    }

    /// record the given dictionary entry reference
    fn index(&mut self, entry: &'static DataDictionaryEntryRef<'static>) -> &mut Self {
        self.by_name.insert(entry.alias, entry);
        self.by_tag.insert(entry.tag.inner(), entry);
        match entry.tag {
            Group100(tag) => {
                self.repeating_ggxx.insert(tag);
            }
            Element100(tag) => {
                self.repeating_eexx.insert(tag);
            }
            _ => {}
        }
        self
    }

    /// The number of attribute records in the dictionary.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Whether the dictionary has no records.
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    fn indexed_tag(&self, tag: Tag) -> Option<&'static DataDictionaryEntryRef<'static>> {
        self.by_tag
            .get(&tag)
            .or_else(|| {
                // check tags repeating in different groups
                let group_trimmed = Tag(tag.0 & 0xFF00, tag.1);
                if self.repeating_ggxx.contains(&group_trimmed) {
                    return self.by_tag.get(&group_trimmed);
                }
                // check tags repeating in different elements
                let elem_trimmed = Tag(tag.0, tag.1 & 0xFF00);
                if self.repeating_eexx.contains(&elem_trimmed) {
                    return self.by_tag.get(&elem_trimmed);
                }

                None
            })
            .copied()
            .or_else(|| {
                if tag.is_private_creator() {
                    return Some(&PRIVATE_CREATOR_ENTRY);
                }
                if tag.is_group_length() {
                    return Some(&GROUP_LENGTH_ENTRY);
                }

                None
            })
    }
}

impl Default for StandardDataDictionary {
    fn default() -> Self {
        StandardDataDictionary::new()
    }
}

impl DataDictionary for StandardDataDictionary {
    type Entry = DataDictionaryEntryRef<'static>;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        self.by_name.get(name).copied()
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        self.indexed_tag(tag)
    }
}

impl Display for StandardDataDictionary {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str("Standard DICOM Data Dictionary")
    }
}

#[cfg(test)]
mod tests {
    use super::StandardDataDictionary;
    use crate::tags;
    use dcmtree_core::dictionary::{DataDictionary, DataDictionaryEntryRef, ElementInfo, TagRange::*};
    use dcmtree_core::header::{Tag, VR};

    // tests for just a few attributes to make sure that the entries
    // were well installed into the crate
    #[test]
    fn smoke_test() {
        let dict = StandardDataDictionary::new();

        assert_eq!(
            dict.by_name("PatientName"),
            Some(&DataDictionaryEntryRef {
                tag: Single(Tag(0x0010, 0x0010)),
                alias: "PatientName",
                vr: VR::PN,
                vm: "1",
                retired: false,
            })
        );

        assert_eq!(
            dict.by_name("Modality"),
            Some(&DataDictionaryEntryRef {
                tag: Single(Tag(0x0008, 0x0060)),
                alias: "Modality",
                vr: VR::CS,
                vm: "1",
                retired: false,
            })
        );

        let pixel_data = dict
            .by_tag(tags::PIXEL_DATA)
            .expect("Pixel Data attribute should exist");
        assert_eq!(pixel_data.alias, "PixelData");
        assert_eq!(pixel_data.vr, VR::OW);
    }

    #[test]
    fn can_parse_tags() {
        let dict = StandardDataDictionary::new();

        assert_eq!(dict.parse_tag("(7FE0,0010)"), Some(tags::PIXEL_DATA));
        assert_eq!(dict.parse_tag("0010,21B0"), Some(Tag(0x0010, 0x21B0)));
        assert_eq!(dict.parse_tag("00101010"), Some(Tag(0x0010, 0x1010)));
        assert_eq!(dict.parse_tag("PatientName"), Some(tags::PATIENT_NAME));
        assert_eq!(dict.parse_tag("NoSuchAttribute"), None);
    }

    #[test]
    fn repeating_groups() {
        let dict = StandardDataDictionary::new();

        let overlay = dict.lookup_element(Tag(0x6002, 0x3000));
        assert_eq!(overlay.name, "OverlayData");
        assert_eq!(overlay.vr, VR::OW);

        let curve = dict.lookup_element(Tag(0x5010, 0x0005));
        assert_eq!(curve.name, "CurveDimensions");
        assert!(curve.retired);

        let source = dict.lookup_element(Tag(0x0020, 0x3105));
        assert_eq!(source.name, "SourceImageIDs");
    }

    #[test]
    fn generic_entries() {
        let dict = StandardDataDictionary::new();

        let creator = dict.lookup_element(Tag(0x0009, 0x0010));
        assert_eq!(creator.name, "PrivateCreator");
        assert_eq!(creator.vr, VR::LO);

        let length = dict.lookup_element(Tag(0x0018, 0x0000));
        assert_eq!(length.name, "GenericGroupLength");
        assert_eq!(length.vr, VR::UL);

        // the meta group length has its own record
        let meta_length = dict.lookup_element(tags::FILE_META_INFORMATION_GROUP_LENGTH);
        assert_eq!(meta_length.name, "FileMetaInformationGroupLength");

        assert_eq!(dict.lookup_element(Tag(0x0009, 0x1001)), ElementInfo::PRIVATE);
        assert_eq!(dict.lookup_element(Tag(0x0010, 0x9999)), ElementInfo::UNKNOWN);
    }

    #[test]
    fn retired_flags() {
        let dict = StandardDataDictionary::new();
        assert!(dict.lookup_element(Tag(0x0008, 0x0010)).retired);
        assert!(!dict.lookup_element(tags::SOP_INSTANCE_UID).retired);
        assert_eq!(dict.lookup_element(tags::IMAGE_TYPE).vm, "2-n");
    }
}
