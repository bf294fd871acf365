use dcmtree_core::{dicom_value, Length, Tag, VR};
use dcmtree_dictionary_std::{tags, uids};
use dcmtree_encoding::Endianness;
use dcmtree_object::meta;
use dcmtree_object::{
    open_file, DataElement, Diagnostic, DicomObject, Item, Node, NodeId, Reader, Sequence,
    TreeError, WriteOptions, Writer,
};
use rstest::rstest;

const PRIVATE_CREATOR: Tag = Tag(0x0009, 0x0010);
const PRIVATE_VALUE: Tag = Tag(0x0009, 0x1001);

/// An object with primitive values of several kinds,
/// a sequence of undefined length holding two items,
/// a nested sequence of defined length,
/// a private block and native pixel data.
fn sample_object() -> DicomObject {
    let mut obj = DicomObject::new();
    obj.put(DataElement::new(tags::SOP_CLASS_UID, VR::UI, uids::SECONDARY_CAPTURE_IMAGE_STORAGE).unwrap())
        .unwrap();
    obj.put(DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, "2.25.987654321").unwrap())
        .unwrap();
    obj.put(
        DataElement::new(tags::IMAGE_TYPE, VR::CS, dicom_value!(Strs, ["DERIVED", "SECONDARY"]))
            .unwrap(),
    )
    .unwrap();
    obj.put(DataElement::new(tags::PATIENT_NAME, VR::PN, "Doe^Jo").unwrap())
        .unwrap();
    obj.put(DataElement::new(tags::PATIENT_ID, VR::LO, "ABC").unwrap())
        .unwrap();
    obj.put(DataElement::new(tags::ROWS, VR::US, 8_u16).unwrap())
        .unwrap();
    obj.put(DataElement::new(tags::COLUMNS, VR::US, 4_u16).unwrap())
        .unwrap();
    obj.put(DataElement::new(tags::PIXEL_SPACING, VR::DS, "0.5\\0.5").unwrap())
        .unwrap();
    obj.put(DataElement::new(PRIVATE_CREATOR, VR::LO, "ACME 1.0").unwrap())
        .unwrap();
    obj.put(DataElement::from_binary(
        PRIVATE_VALUE,
        VR::UN,
        vec![1, 2, 3, 4],
        Endianness::Little,
    ))
    .unwrap();

    let seq = obj
        .put(Sequence::new(tags::REFERENCED_IMAGE_SEQUENCE))
        .unwrap();
    for i in 0..2 {
        let item = obj.add_item(seq, None, None).unwrap();
        obj.add(
            item,
            DataElement::new(tags::REFERENCED_SOP_CLASS_UID, VR::UI, uids::CT_IMAGE_STORAGE).unwrap(),
        )
        .unwrap();
        obj.add(
            item,
            DataElement::new(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, format!("1.2.3.{}", i))
                .unwrap(),
        )
        .unwrap();
    }
    let first = obj.item(seq, 0).unwrap();
    let nested = obj
        .add(first, Sequence::with_length(tags::CONTENT_SEQUENCE, Length(0)))
        .unwrap();
    let nested_item = obj
        .add_item(nested, Some(Item::with_length(Length(0))), None)
        .unwrap();
    obj.add(nested_item, DataElement::new(tags::MODALITY, VR::CS, "OT").unwrap())
        .unwrap();

    obj.put(DataElement::from_binary(
        tags::PIXEL_DATA,
        VR::OW,
        (0..64).collect(),
        Endianness::Little,
    ))
    .unwrap();
    obj
}

fn writer_for(ts: &str) -> Writer {
    Writer::new().with_options(WriteOptions::new().transfer_syntax(ts))
}

fn all_elements(obj: &DicomObject, id: NodeId, out: &mut Vec<DataElement>) {
    for child in obj.children(id) {
        match obj.get(child) {
            Some(Node::Element(e)) => out.push(e.clone()),
            _ => all_elements(obj, child, out),
        }
    }
}

#[rstest]
#[case(uids::IMPLICIT_VR_LITTLE_ENDIAN)]
#[case(uids::EXPLICIT_VR_LITTLE_ENDIAN)]
#[case(uids::EXPLICIT_VR_BIG_ENDIAN)]
fn round_trip(#[case] ts: &str) {
    let mut original = sample_object();
    meta::synthesize(&mut original, ts).unwrap();

    let written = writer_for(ts).to_bytes(&original);
    assert!(written.success, "{:?}", written.diagnostics);
    let read = Reader::new().read(&written.output);
    assert!(read.success, "{:?}", read.diagnostics);
    assert!(read.diagnostics.is_empty(), "{:?}", read.diagnostics);

    assert_eq!(read.object, original);
    assert_eq!(
        read.object.element(tags::TRANSFER_SYNTAX_UID).unwrap().to_str().unwrap(),
        ts
    );
}

#[rstest]
#[case(uids::IMPLICIT_VR_LITTLE_ENDIAN)]
#[case(uids::EXPLICIT_VR_BIG_ENDIAN)]
fn reencoding_is_stable(#[case] ts: &str) {
    let writer = writer_for(ts);
    let first = writer.to_bytes(&sample_object()).output;
    let reread = Reader::new().read(&first);
    let second = writer.to_bytes(&reread.object).output;
    assert_eq!(first, second);
}

#[test]
fn unchanged_value_encodes_to_the_same_bytes() {
    let mut elem = DataElement::new(tags::PATIENT_NAME, VR::PN, "Doe^Jo").unwrap();
    let before = elem.bin().to_vec();
    let value = elem.decoded().unwrap();
    elem.set_value(value).unwrap();
    assert_eq!(elem.bin(), &before[..]);
}

#[rstest]
#[case(uids::IMPLICIT_VR_LITTLE_ENDIAN)]
#[case(uids::EXPLICIT_VR_LITTLE_ENDIAN)]
#[case(uids::EXPLICIT_VR_BIG_ENDIAN)]
fn written_values_have_even_length(#[case] ts: &str) {
    let bytes = writer_for(ts).to_bytes(&sample_object()).output;
    let obj = Reader::new().read(&bytes).object;
    let mut elements = Vec::new();
    all_elements(&obj, obj.root(), &mut elements);
    assert!(elements.len() > 10);
    for e in elements {
        assert_eq!(e.bin().len() % 2, 0, "{} has odd length", e.tag());
    }
    // "ABC" gained exactly one pad byte
    assert_eq!(obj.element(tags::PATIENT_ID).unwrap().bin(), b"ABC ");
}

#[rstest]
fn segments_concatenate_to_the_whole(
    #[values(32, 48, 100, 4096)] max: usize,
    #[values(uids::IMPLICIT_VR_LITTLE_ENDIAN, uids::EXPLICIT_VR_BIG_ENDIAN)] ts: &str,
) {
    let mut obj = sample_object();
    meta::synthesize(&mut obj, ts).unwrap();
    let whole = Writer::new()
        .with_options(WriteOptions::new().transfer_syntax(ts).data_set_only())
        .to_bytes(&obj)
        .output;
    let segmented = writer_for(ts).encode_segments(&obj, max).unwrap();
    assert!(segmented.success);
    assert!(segmented.output.iter().all(|s| s.len() <= max && !s.is_empty()));
    assert_eq!(segmented.output.concat(), whole);

    // no preamble and no meta group, the first data set element comes first
    let first = obj
        .children(obj.root())
        .filter_map(|id| obj.get(id).and_then(Node::tag))
        .find(|tag| !tag.is_meta())
        .unwrap();
    let expected = if ts == uids::EXPLICIT_VR_BIG_ENDIAN {
        [first.group().to_be_bytes(), first.element().to_be_bytes()].concat()
    } else {
        [first.group().to_le_bytes(), first.element().to_le_bytes()].concat()
    };
    assert_eq!(&segmented.output[0][..4], &expected[..]);
}

#[rstest]
#[case(100, 1000)]
#[case(100, 1002)]
#[case(64, 4096)]
fn large_value_spans_segments(#[case] max: usize, #[case] value_len: usize) {
    let mut obj = DicomObject::new();
    obj.put(DataElement::from_binary(
        tags::PIXEL_DATA,
        VR::OB,
        vec![0xAB; value_len],
        Endianness::Little,
    ))
    .unwrap();
    let segments = writer_for(uids::EXPLICIT_VR_LITTLE_ENDIAN)
        .encode_segments(&obj, max)
        .unwrap()
        .output;
    // the 12 byte header, then the value
    assert_eq!(segments[0].len(), 12);
    assert_eq!(segments.len() - 1, (value_len + max - 1) / max);
}

#[test]
fn segment_size_must_fit_a_header() {
    let result = Writer::new().encode_segments(&sample_object(), 8);
    assert!(matches!(
        result,
        Err(dcmtree_object::WriteError::SegmentTooSmall { .. })
    ));
}

#[test]
fn undefined_length_sequence_with_two_items() {
    let mut obj = DicomObject::new();
    let seq = obj
        .put(Sequence::new(tags::REFERENCED_IMAGE_SEQUENCE))
        .unwrap();
    for uid in ["1.2.1", "1.2.2"] {
        let item = obj.add_item(seq, None, None).unwrap();
        obj.add(item, DataElement::new(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, uid).unwrap())
            .unwrap();
    }
    meta::synthesize(&mut obj, uids::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();

    let bytes = writer_for(uids::EXPLICIT_VR_LITTLE_ENDIAN).to_bytes(&obj).output;
    let read = Reader::new().read(&bytes);
    assert!(read.success);
    let read_obj = read.object;
    let read_seq = read_obj
        .child(read_obj.root(), tags::REFERENCED_IMAGE_SEQUENCE)
        .unwrap();
    let items: Vec<_> = read_obj.items(read_seq).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(read_obj.item_index(items[0]), Some(0));
    assert_eq!(read_obj.item_index(items[1]), Some(1));
    assert!(read_obj
        .get(read_seq)
        .and_then(Node::as_sequence)
        .unwrap()
        .length()
        .is_undefined());
    assert_eq!(read_obj, obj);
}

#[test]
fn defined_length_sequence_gets_the_written_length() {
    let mut obj = DicomObject::new();
    let seq = obj
        .put(Sequence::with_length(tags::REFERENCED_IMAGE_SEQUENCE, Length(0)))
        .unwrap();
    let item = obj
        .add_item(seq, Some(Item::with_length(Length(0))), None)
        .unwrap();
    obj.add(item, DataElement::new(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, "1.2.1").unwrap())
        .unwrap();
    let writer = Writer::new().with_options(
        WriteOptions::new()
            .transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN)
            .without_signature()
            .without_meta_synthesis(),
    );
    let bytes = writer.to_bytes(&obj).output;
    let read = Reader::new().read(&bytes).object;
    let read_seq = read.child(read.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
    // item header (8) + element header (8) + "1.2.1\0" (6)
    assert_eq!(
        read.get(read_seq).and_then(Node::as_sequence).unwrap().length(),
        Length(22)
    );
    assert_eq!(read, obj);
}

#[rstest]
#[case(uids::IMPLICIT_VR_LITTLE_ENDIAN)]
#[case(uids::EXPLICIT_VR_LITTLE_ENDIAN)]
fn private_element_without_dictionary_entry(#[case] ts: &str) {
    let mut obj = DicomObject::new();
    obj.put(DataElement::new(Tag(0x0011, 0x1010), VR::UN, &[9_u8, 8, 7, 6][..]).unwrap())
        .unwrap();
    let written = writer_for(ts).to_bytes(&obj);
    assert!(written.success);
    let read = Reader::new().read(&written.output);
    assert!(read.success);
    let elem = read.object.element(Tag(0x0011, 0x1010)).unwrap();
    assert_eq!(elem.name(), "Private");
    assert_eq!(elem.vr(), VR::UN);
    assert_eq!(elem.bin(), &[9, 8, 7, 6]);
}

#[test]
fn encapsulated_pixel_data_round_trip() {
    let mut obj = sample_object();
    obj.remove(obj.root(), tags::PIXEL_DATA);
    let pixel_data = obj
        .put(Sequence::encapsulated(tags::PIXEL_DATA, VR::OB))
        .unwrap();
    obj.add_item(pixel_data, Some(Item::fragment(Vec::new())), None)
        .unwrap();
    obj.add_item(pixel_data, Some(Item::fragment(vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9])), None)
        .unwrap();
    meta::synthesize(&mut obj, uids::JPEG_BASELINE8_BIT).unwrap();

    let written = writer_for(uids::JPEG_BASELINE8_BIT).to_bytes(&obj);
    assert!(written.success);
    let read = Reader::new().read(&written.output);
    assert!(read.success, "{:?}", read.diagnostics);
    let read_obj = read.object;
    let read_pixels = read_obj.child(read_obj.root(), tags::PIXEL_DATA).unwrap();
    let fragments: Vec<_> = read_obj
        .items(read_pixels)
        .map(|i| {
            read_obj
                .get(i)
                .and_then(Node::as_item)
                .and_then(Item::payload)
                .unwrap()
                .to_vec()
        })
        .collect();
    // odd fragments are padded
    assert_eq!(fragments, vec![vec![], vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9, 0x00]]);
}

#[test]
fn missing_signature_falls_back_to_the_data_set() {
    let writer = Writer::new().with_options(
        WriteOptions::new()
            .transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN)
            .without_signature()
            .without_meta_synthesis(),
    );
    let obj = sample_object();
    let bytes = writer.to_bytes(&obj).output;
    let read = Reader::new().read(&bytes);
    assert!(read.success);
    assert!(matches!(
        read.diagnostics.first(),
        Some(Diagnostic::MissingSignature)
    ));
    assert_eq!(read.object, obj);
}

#[test]
fn write_file_and_open_it_again() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.dcm");
    let mut obj = sample_object();
    meta::synthesize(&mut obj, uids::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();

    let outcome = writer_for(uids::EXPLICIT_VR_LITTLE_ENDIAN).write_file(&obj, &path);
    assert!(outcome.success);
    let read = open_file(&path);
    assert!(read.success);
    assert_eq!(read.object, obj);
    assert_eq!(
        read.object.element(tags::MEDIA_STORAGE_SOP_INSTANCE_UID).unwrap().to_str().unwrap(),
        "2.25.987654321"
    );
}

#[test]
fn readers_can_be_shared_between_threads() {
    let reader = Reader::new();
    let inputs: Vec<Vec<u8>> = [
        uids::IMPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_BIG_ENDIAN,
    ]
    .iter()
    .map(|ts| writer_for(ts).to_bytes(&sample_object()).output)
    .collect();

    let reader = &reader;
    std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|bytes| s.spawn(move || reader.read(bytes)))
            .collect();
        for handle in handles {
            let outcome = handle.join().unwrap();
            assert!(outcome.success);
            let obj = outcome.object;
            let seq = obj.child(obj.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
            assert_eq!(obj.items(seq).count(), 2);
        }
    });
}

/// An implicit VR little endian header followed by the value.
fn implicit_element(tag: Tag, len: u32, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend(tag.group().to_le_bytes());
    out.extend(tag.element().to_le_bytes());
    out.extend(len.to_le_bytes());
    out.extend(value);
    out
}

#[test]
fn sequence_shorter_than_its_items_keeps_them() {
    let body = implicit_element(tags::REFERENCED_SOP_INSTANCE_UID, 6, b"1.2.3\0");
    let mut data = implicit_element(tags::REFERENCED_IMAGE_SEQUENCE, 10, &[]);
    for _ in 0..2 {
        data.extend(implicit_element(Tag::ITEM, body.len() as u32, &body));
    }
    data.extend(implicit_element(tags::PATIENT_ID, 4, b"ID01"));

    let outcome = Reader::new().read(&data);
    assert!(outcome.success, "{:?}", outcome.diagnostics);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::HierarchyOvershoot { .. })));
    let obj = outcome.object;
    let seq = obj.child(obj.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
    assert_eq!(obj.items(seq).count(), 2);
    for item in obj.items(seq) {
        assert!(obj.child(item, tags::REFERENCED_SOP_INSTANCE_UID).is_some());
    }
    let patient_id = obj.child(obj.root(), tags::PATIENT_ID).unwrap();
    assert_eq!(obj.parent(patient_id), Some(obj.root()));
    assert_eq!(obj.element(tags::PATIENT_ID).unwrap().to_str().unwrap(), "ID01");
}

#[test]
fn replaced_and_discarded_ids_stay_invalid() {
    let mut obj = DicomObject::new();
    let old = obj
        .put(DataElement::new(tags::PATIENT_NAME, VR::PN, "Doe^Jo").unwrap())
        .unwrap();
    let new = obj
        .put(DataElement::new(tags::PATIENT_NAME, VR::PN, "Roe^Ann").unwrap())
        .unwrap();
    assert!(obj.get(old).is_none());
    assert!(obj.parent(old).is_none());
    assert!(obj.get(new).is_some());

    let seq = obj.put(Sequence::new(tags::REFERENCED_IMAGE_SEQUENCE)).unwrap();
    let item = obj.add_item(seq, None, None).unwrap();
    obj.discard(seq).unwrap();
    assert!(obj.get(seq).is_none());
    assert!(obj.get(item).is_none());
    assert!(matches!(obj.discard(item), Err(TreeError::NoSuchNode { .. })));

    // the freed slots are taken by new nodes
    let id = obj
        .put(DataElement::new(tags::PATIENT_ID, VR::LO, "ABC").unwrap())
        .unwrap();
    let other = obj
        .put(DataElement::new(tags::MODALITY, VR::CS, "OT").unwrap())
        .unwrap();
    assert!(obj.get(seq).is_none());
    assert!(obj.get(item).is_none());
    assert!(obj.get_mut(old).is_none());
    assert_eq!(obj.get(id).and_then(Node::tag), Some(tags::PATIENT_ID));
    assert_eq!(obj.get(other).and_then(Node::tag), Some(tags::MODALITY));
    assert_eq!(obj.child_count(obj.root()), 3);
}
