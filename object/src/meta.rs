//! File meta group synthesis.
//!
//! Before an object is written as a file,
//! its meta group (group 0002) is completed with the elements
//! that a reader needs to interpret the rest of the data set.
//! Elements already present are kept,
//! except for the transfer syntax UID, which names the target syntax,
//! and the group length, which is always recomputed.

use crate::node::{DataElement, Node};
use crate::tree::DicomObject;
use crate::write::{header_len, EncodeMetaSnafu, PlaceMetaSnafu, WriteError};
use crate::{IMPLEMENTATION_CLASS_UID, IMPLEMENTATION_VERSION_NAME};
use dcmtree_core::value::PrimitiveValue;
use dcmtree_core::dictionary::DataDictionary;
use dcmtree_core::{Tag, VR};
use dcmtree_dictionary_std::{tags, StandardDataDictionary};
use dcmtree_encoding::transfer_syntax::trim_uid;
use snafu::ResultExt;
use std::collections::BTreeMap;

type Result<T, E = WriteError> = std::result::Result<T, E>;

/// The file meta information version, `00\01`.
const META_VERSION: [u8; 2] = [0x00, 0x01];

/// Build the complete meta group for writing the object
/// in the given transfer syntax, sorted by tag.
pub fn build_meta_group(obj: &DicomObject, transfer_syntax: &str) -> Result<Vec<DataElement>> {
    let dict = StandardDataDictionary::new();
    let mut group = existing_elements(obj);

    group
        .entry(tags::FILE_META_INFORMATION_VERSION)
        .or_insert(meta_element(
            &dict,
            tags::FILE_META_INFORMATION_VERSION,
            VR::OB,
            &META_VERSION[..],
        )?);
    let mirrored = [
        (tags::MEDIA_STORAGE_SOP_CLASS_UID, tags::SOP_CLASS_UID),
        (tags::MEDIA_STORAGE_SOP_INSTANCE_UID, tags::SOP_INSTANCE_UID),
    ];
    for (meta_tag, source_tag) in mirrored {
        if group.contains_key(&meta_tag) {
            continue;
        }
        if let Some(uid) = obj.element(source_tag).ok().and_then(|e| e.to_str().ok()) {
            group.insert(meta_tag, meta_element(&dict, meta_tag, VR::UI, uid)?);
        }
    }
    group.insert(
        tags::TRANSFER_SYNTAX_UID,
        meta_element(&dict, tags::TRANSFER_SYNTAX_UID, VR::UI, trim_uid(transfer_syntax))?,
    );
    group
        .entry(tags::IMPLEMENTATION_CLASS_UID)
        .or_insert(meta_element(
            &dict,
            tags::IMPLEMENTATION_CLASS_UID,
            VR::UI,
            IMPLEMENTATION_CLASS_UID,
        )?);
    group
        .entry(tags::IMPLEMENTATION_VERSION_NAME)
        .or_insert(meta_element(
            &dict,
            tags::IMPLEMENTATION_VERSION_NAME,
            VR::SH,
            IMPLEMENTATION_VERSION_NAME,
        )?);

    with_group_length(&dict, group)
}

/// The meta group elements already in the object, sorted by tag.
/// The group length is recomputed if it was present.
pub fn existing_meta_group(obj: &DicomObject) -> Result<Vec<DataElement>> {
    let had_length = obj.element(tags::FILE_META_INFORMATION_GROUP_LENGTH).is_ok();
    let group = existing_elements(obj);
    if had_length {
        with_group_length(&StandardDataDictionary::new(), group)
    } else {
        Ok(group.into_values().collect())
    }
}

/// Complete the meta group of the object in place,
/// as it would be written in the given transfer syntax.
pub fn synthesize(obj: &mut DicomObject, transfer_syntax: &str) -> Result<()> {
    for elem in build_meta_group(obj, transfer_syntax)? {
        let tag = elem.tag();
        obj.put(elem).context(PlaceMetaSnafu { tag })?;
    }
    tracing::debug!("Synthesized meta group for {}", trim_uid(transfer_syntax));
    Ok(())
}

/// The number of bytes taken by the given meta group elements,
/// which is the value of the group length element.
pub fn group_length<'a>(elements: impl IntoIterator<Item = &'a DataElement>) -> u32 {
    elements
        .into_iter()
        .filter(|e| e.tag() != tags::FILE_META_INFORMATION_GROUP_LENGTH)
        .map(|e| {
            let len = e.bin().len() as u64;
            header_len(e.vr(), true) + len + len % 2
        })
        .sum::<u64>()
        .min(u64::from(u32::MAX)) as u32
}

fn existing_elements(obj: &DicomObject) -> BTreeMap<Tag, DataElement> {
    obj.children(obj.root())
        .filter_map(|id| obj.get(id).and_then(Node::as_element))
        .filter(|e| e.tag().is_meta() && e.tag() != tags::FILE_META_INFORMATION_GROUP_LENGTH)
        .map(|e| (e.tag(), e.clone()))
        .collect()
}

fn with_group_length(
    dict: &StandardDataDictionary,
    group: BTreeMap<Tag, DataElement>,
) -> Result<Vec<DataElement>> {
    let length = group_length(group.values());
    let mut elements = Vec::with_capacity(group.len() + 1);
    elements.push(meta_element(
        dict,
        tags::FILE_META_INFORMATION_GROUP_LENGTH,
        VR::UL,
        length,
    )?);
    elements.extend(group.into_values());
    Ok(elements)
}

fn meta_element(
    dict: &StandardDataDictionary,
    tag: Tag,
    vr: VR,
    value: impl Into<PrimitiveValue>,
) -> Result<DataElement> {
    Ok(DataElement::new(tag, vr, value)
        .context(EncodeMetaSnafu { tag })?
        .with_name(dict.lookup_element(tag).name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmtree_dictionary_std::uids;

    fn instance() -> DicomObject {
        let mut obj = DicomObject::new();
        obj.put(DataElement::new(tags::SOP_CLASS_UID, VR::UI, uids::MR_IMAGE_STORAGE).unwrap())
            .unwrap();
        obj.put(DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, "2.25.1234").unwrap())
            .unwrap();
        obj
    }

    #[test]
    fn fills_in_missing_elements() {
        let group = build_meta_group(&instance(), uids::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();
        let order: Vec<_> = group.iter().map(DataElement::tag).collect();
        assert_eq!(
            order,
            vec![
                tags::FILE_META_INFORMATION_GROUP_LENGTH,
                tags::FILE_META_INFORMATION_VERSION,
                tags::MEDIA_STORAGE_SOP_CLASS_UID,
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
                tags::TRANSFER_SYNTAX_UID,
                tags::IMPLEMENTATION_CLASS_UID,
                tags::IMPLEMENTATION_VERSION_NAME,
            ]
        );
        assert_eq!(group[2].to_str().unwrap(), uids::MR_IMAGE_STORAGE);
        assert_eq!(group[3].to_str().unwrap(), "2.25.1234");
        assert_eq!(group[4].to_str().unwrap(), uids::EXPLICIT_VR_LITTLE_ENDIAN);
        assert_eq!(group[1].bin(), &[0x00, 0x01]);
    }

    #[test]
    fn group_length_counts_headers_and_values() {
        let group = build_meta_group(&instance(), uids::IMPLICIT_VR_LITTLE_ENDIAN).unwrap();
        let expected: u64 = group[1..]
            .iter()
            .map(|e| header_len(e.vr(), true) + e.bin().len() as u64)
            .sum();
        assert_eq!(
            group[0].decoded().unwrap(),
            PrimitiveValue::from(expected as u32)
        );
        // OB version: 12 + 2
        assert_eq!(header_len(group[1].vr(), true) + 2, 14);
    }

    #[test]
    fn keeps_existing_elements_but_not_the_transfer_syntax() {
        let mut obj = instance();
        obj.put(DataElement::new(tags::IMPLEMENTATION_VERSION_NAME, VR::SH, "OTHER 1.0").unwrap())
            .unwrap();
        obj.put(DataElement::new(tags::TRANSFER_SYNTAX_UID, VR::UI, uids::EXPLICIT_VR_BIG_ENDIAN).unwrap())
            .unwrap();
        let group = build_meta_group(&obj, uids::IMPLICIT_VR_LITTLE_ENDIAN).unwrap();
        let find = |tag| group.iter().find(|e| e.tag() == tag).unwrap();
        assert_eq!(find(tags::IMPLEMENTATION_VERSION_NAME).to_str().unwrap(), "OTHER 1.0");
        assert_eq!(
            find(tags::TRANSFER_SYNTAX_UID).to_str().unwrap(),
            uids::IMPLICIT_VR_LITTLE_ENDIAN
        );
    }

    #[test]
    fn existing_group_without_length_is_left_alone() {
        let mut obj = instance();
        obj.put(DataElement::new(tags::TRANSFER_SYNTAX_UID, VR::UI, uids::EXPLICIT_VR_LITTLE_ENDIAN).unwrap())
            .unwrap();
        let group = existing_meta_group(&obj).unwrap();
        assert_eq!(group.len(), 1);

        obj.put(DataElement::new(tags::FILE_META_INFORMATION_GROUP_LENGTH, VR::UL, 999_u32).unwrap())
            .unwrap();
        let group = existing_meta_group(&obj).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].decoded().unwrap(), PrimitiveValue::from(28_u32));
    }

    #[test]
    fn synthesize_into_the_tree() {
        let mut obj = instance();
        synthesize(&mut obj, uids::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();
        assert_eq!(
            obj.element(tags::MEDIA_STORAGE_SOP_CLASS_UID).unwrap().name(),
            "MediaStorageSOPClassUID"
        );
        assert!(obj.element(tags::FILE_META_INFORMATION_GROUP_LENGTH).is_ok());
        assert_eq!(obj.child_count(obj.root()), 9);
    }

    #[test]
    fn synthesized_elements_take_their_dictionary_names() {
        let mut obj = instance();
        // a sequence under a meta tag is replaced by the element
        obj.put(crate::node::Sequence::new(tags::TRANSFER_SYNTAX_UID))
            .unwrap();
        synthesize(&mut obj, uids::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();
        let ts = obj.element(tags::TRANSFER_SYNTAX_UID).unwrap();
        assert_eq!(ts.name(), "TransferSyntaxUID");
        assert_eq!(ts.to_str().unwrap(), uids::EXPLICIT_VR_LITTLE_ENDIAN);
        assert_eq!(
            obj.element(tags::FILE_META_INFORMATION_GROUP_LENGTH).unwrap().name(),
            "FileMetaInformationGroupLength"
        );
        assert_eq!(
            obj.element(tags::IMPLEMENTATION_VERSION_NAME).unwrap().name(),
            "ImplementationVersionName"
        );
    }
}
