//! Reading a DICOM object from an in-memory byte buffer.
//!
//! The reader is a recursive descent over the data set.
//! The file meta group is read in explicit VR little endian,
//! and the first element outside of it adopts the transfer syntax
//! found in the meta group, or given as an override.
//! Sequences and items of defined length end at their byte boundary,
//! those of undefined length end at their delimiter.

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::node::{DataElement, Item, Node, Sequence};
use crate::tree::{DicomObject, NodeId, TreeError};
use dcmtree_core::dictionary::DataDictionary;
use dcmtree_core::{Length, Tag, VR};
use dcmtree_dictionary_std::{tags, StandardDataDictionary};
use dcmtree_encoding::transfer_syntax::{trim_uid, TransferSyntaxIndex, IMPLICIT_VR_LITTLE_ENDIAN};
use dcmtree_encoding::{ByteCodec, Stream};
use dcmtree_transfer_syntax_registry::TransferSyntaxRegistry;
use smallvec::SmallVec;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::path::{Path, PathBuf};

/// The size of the preamble before the `DICM` signature.
pub const PREAMBLE_LENGTH: usize = 128;

/// The file signature following the preamble.
pub const SIGNATURE: &[u8; 4] = b"DICM";

/// A fatal problem which stops the reading of an object.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ReadError {
    #[snafu(display("Could not read file '{}'", filename.display()))]
    ReadFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Missing DICM signature"))]
    MissingSignature { backtrace: Backtrace },
    #[snafu(display("Truncated header of element {} at offset {}", tag, position))]
    TruncatedHeader {
        tag: Tag,
        position: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Item at offset {} is not inside a sequence", position))]
    ItemOutsideSequence { position: usize, backtrace: Backtrace },
    #[snafu(display(
        "Element {} at offset {} is inside a sequence but is not an item",
        tag,
        position
    ))]
    NotAnItem {
        tag: Tag,
        position: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Element {} exceeds the maximum nesting depth of {}", tag, max_depth))]
    DepthExceeded {
        tag: Tag,
        max_depth: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Pixel data fragment at offset {} has undefined length", position))]
    UndefinedFragmentLength { position: usize, backtrace: Backtrace },
    #[snafu(display("Could not place element in the tree"))]
    BuildTree {
        #[snafu(backtrace)]
        source: TreeError,
    },
}

type Result<T, E = ReadError> = std::result::Result<T, E>;

/// Options for reading an object.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ReadOptions {
    /// transfer syntax UID used instead of the one in the meta group
    pub transfer_syntax: Option<String>,
    /// the maximum number of nested sequences and items
    pub max_depth: usize,
    /// whether a buffer without the `DICM` signature is read as a plain data set
    pub allow_missing_signature: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            transfer_syntax: None,
            max_depth: 64,
            allow_missing_signature: true,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        ReadOptions::default()
    }

    /// Read the data set with the given transfer syntax,
    /// whatever the meta group says.
    pub fn transfer_syntax(mut self, uid: impl Into<String>) -> Self {
        self.transfer_syntax = Some(uid.into());
        self
    }

    /// Set the maximum nesting depth of sequences and items.
    /// Going deeper is a fatal error.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fail when the `DICM` signature is missing,
    /// instead of reading the buffer as a plain data set.
    pub fn require_signature(mut self) -> Self {
        self.allow_missing_signature = false;
        self
    }
}

/// The result of reading an object.
///
/// The object holds whatever was read before any fatal problem,
/// in which case `success` is false.
#[derive(Debug)]
pub struct ReadOutcome {
    pub object: DicomObject,
    pub success: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadOutcome {
    /// The error which stopped the reading, if any.
    pub fn fatal_error(&self) -> Option<&ReadError> {
        self.diagnostics.iter().find_map(|d| match d {
            Diagnostic::ReadFailed(e) => Some(e),
            _ => None,
        })
    }
}

/// A reader of DICOM objects.
///
/// The data dictionary resolves implicit VRs and element names,
/// and the transfer syntax index resolves the encoding of the data set.
/// Both are only read, so they can be shared by reference
/// between readers on different threads.
#[derive(Debug, Clone)]
pub struct Reader<D = StandardDataDictionary, R = TransferSyntaxRegistry> {
    dict: D,
    ts_index: R,
    options: ReadOptions,
}

impl Reader {
    /// Create a reader with the standard dictionary and transfer syntaxes.
    pub fn new() -> Self {
        Reader::new_with(StandardDataDictionary::new(), TransferSyntaxRegistry::new())
    }
}

impl Default for Reader {
    fn default() -> Self {
        Reader::new()
    }
}

impl<D, R> Reader<D, R> {
    /// Create a reader with the given dictionary and transfer syntax index.
    pub fn new_with(dict: D, ts_index: R) -> Self {
        Reader {
            dict,
            ts_index,
            options: ReadOptions::default(),
        }
    }

    /// Replace the reading options.
    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }
}

impl<D, R> Reader<D, R>
where
    D: DataDictionary,
    R: TransferSyntaxIndex,
{
    /// Read an object from a whole buffer.
    pub fn read(&self, data: &[u8]) -> ReadOutcome {
        let mut state = ReadState::new(self, data);
        match state.read_all() {
            Ok(()) => state.check_last_length(),
            Err(e) => state.diagnostics.push(Diagnostic::ReadFailed(e)),
        }
        let success = !state.diagnostics.has_fatal();
        ReadOutcome {
            object: state.obj,
            success,
            diagnostics: state.diagnostics.into_vec(),
        }
    }

    /// Read an object from a file,
    /// loading the whole file into memory first.
    pub fn read_file(&self, path: impl AsRef<Path>) -> ReadOutcome {
        let path = path.as_ref();
        match std::fs::read(path).context(ReadFileSnafu { filename: path }) {
            Ok(data) => self.read(&data),
            Err(e) => {
                let mut diagnostics = Diagnostics::default();
                diagnostics.push(Diagnostic::ReadFailed(e));
                ReadOutcome {
                    object: DicomObject::new(),
                    success: false,
                    diagnostics: diagnostics.into_vec(),
                }
            }
        }
    }
}

/// An open sequence or item.
#[derive(Debug, Clone, Copy)]
struct Level {
    /// the offset where the container ends, if its length is defined
    end: Option<usize>,
    /// the delimiter closing the container
    delimiter: Tag,
}

/// The value read last, for the final length check.
#[derive(Debug, Clone, Copy)]
struct LastValue {
    tag: Tag,
    declared: u32,
    actual: usize,
}

/// What an element turned out to be.
enum Step {
    Node,
    Delimiter(Tag),
}

struct ReadState<'a, 'r, D, R> {
    reader: &'r Reader<D, R>,
    stream: Stream<'a>,
    obj: DicomObject,
    explicit: bool,
    switched: bool,
    encapsulated: bool,
    meta_ts: Option<String>,
    hierarchy: SmallVec<[Level; 8]>,
    overshoot_reported: bool,
    recovering: bool,
    last: Option<LastValue>,
    diagnostics: Diagnostics,
}

impl<'a, 'r, D, R> ReadState<'a, 'r, D, R>
where
    D: DataDictionary,
    R: TransferSyntaxIndex,
{
    fn new(reader: &'r Reader<D, R>, data: &'a [u8]) -> Self {
        ReadState {
            reader,
            stream: Stream::new(data, ByteCodec::little_endian()),
            obj: DicomObject::new(),
            explicit: true,
            switched: false,
            encapsulated: false,
            meta_ts: None,
            hierarchy: SmallVec::new(),
            overshoot_reported: false,
            recovering: false,
            last: None,
            diagnostics: Diagnostics::default(),
        }
    }

    fn read_all(&mut self) -> Result<()> {
        let start = self.detect_signature()?;
        self.stream.seek(start);
        let root = self.obj.root();
        self.read_level(root)
    }

    /// Find where the data set starts.
    fn detect_signature(&mut self) -> Result<usize> {
        let data = self.stream.data();
        if data.get(PREAMBLE_LENGTH..PREAMBLE_LENGTH + 4) == Some(&SIGNATURE[..]) {
            return Ok(PREAMBLE_LENGTH + 4);
        }
        if data.starts_with(SIGNATURE) {
            return Ok(SIGNATURE.len());
        }
        ensure!(
            self.reader.options.allow_missing_signature,
            MissingSignatureSnafu
        );
        self.diagnostics.push(Diagnostic::MissingSignature);
        // a meta group without a VR after its first tag is implicit
        self.explicit = data.len() < 6 || VR::from_binary([data[4], data[5]]).is_some();
        Ok(0)
    }

    /// Decode the next tag,
    /// switching to the data set transfer syntax when leaving the meta group.
    fn next_tag(&mut self) -> Option<Tag> {
        let tag = self.stream.decode_tag()?;
        if self.switched || tag.is_meta() {
            return Some(tag);
        }
        let codec = self.stream.codec();
        self.switch_transfer_syntax();
        if self.stream.codec() != codec {
            self.stream.rewind(4);
            return self.stream.decode_tag();
        }
        Some(tag)
    }

    fn switch_transfer_syntax(&mut self) {
        self.switched = true;
        let uid = self
            .reader
            .options
            .transfer_syntax
            .as_deref()
            .or(self.meta_ts.as_deref())
            .unwrap_or(IMPLICIT_VR_LITTLE_ENDIAN.uid())
            .to_owned();
        let info = self.reader.ts_index.resolve(&uid);
        if !info.valid {
            self.diagnostics.push(Diagnostic::InvalidTransferSyntax {
                uid: trim_uid(&uid).to_owned(),
            });
        }
        tracing::debug!(
            "Reading data set as {} VR {:?} endian ({})",
            if info.explicit_vr { "explicit" } else { "implicit" },
            info.endianness(),
            trim_uid(&uid)
        );
        self.explicit = info.explicit_vr;
        self.stream.set_codec(info.codec());
    }

    /// Read the children of a node until its level ends.
    ///
    /// Once a child runs past the end of a defined length level,
    /// an item level closes right away,
    /// while a sequence level keeps taking items
    /// and closes at the first element which is not one.
    fn read_level(&mut self, node: NodeId) -> Result<()> {
        let level = self.hierarchy.last().copied();
        let end = level.and_then(|l| l.end);
        let in_sequence = self.obj.get(node).map_or(false, Node::is_sequence);
        let mut overshot = false;
        loop {
            if let Some(end) = end {
                if !overshot && self.stream.position() >= end {
                    return Ok(());
                }
            }
            let position = self.stream.position();
            let Some(tag) = self.next_tag() else {
                return Ok(());
            };
            if in_sequence && self.recovering && !tag.is_item() && !tag.is_delimiter() {
                self.stream.seek(position);
                return Ok(());
            }
            match self.read_element(node, tag, position)? {
                Step::Delimiter(t) if level.map(|l| l.delimiter) == Some(t) => return Ok(()),
                Step::Delimiter(t) => self
                    .diagnostics
                    .push(Diagnostic::StrayDelimiter { tag: t, position }),
                Step::Node => {}
            }
            if let Some(end) = end {
                let position = self.stream.position();
                if !overshot && position > end {
                    self.report_overshoot(tag, position, end);
                    self.recovering = true;
                    if !in_sequence {
                        return Ok(());
                    }
                    overshot = true;
                }
            }
        }
    }

    /// Reading continues after an overshoot,
    /// which is reported only the first time.
    fn report_overshoot(&mut self, tag: Tag, position: usize, boundary: usize) {
        if self.overshoot_reported {
            tracing::trace!("Element {} overshoots its parent again", tag);
            return;
        }
        self.overshoot_reported = true;
        self.diagnostics.push(Diagnostic::HierarchyOvershoot {
            tag,
            position,
            boundary,
        });
    }

    /// Open a level for a sequence or item and read its children.
    fn read_children(&mut self, node: NodeId, tag: Tag, len: Length, delimiter: Tag) -> Result<()> {
        let max_depth = self.reader.options.max_depth;
        ensure!(
            self.hierarchy.len() < max_depth,
            DepthExceededSnafu { tag, max_depth }
        );
        let end = len
            .get()
            .map(|len| self.stream.position().saturating_add(len as usize));
        self.hierarchy.push(Level { end, delimiter });
        let result = self.read_level(node);
        self.hierarchy.pop();
        result
    }

    fn read_element(&mut self, parent: NodeId, tag: Tag, position: usize) -> Result<Step> {
        if tag.is_item() || tag.is_delimiter() {
            let len = self
                .stream
                .read_u32()
                .context(TruncatedHeaderSnafu { tag, position })?;
            if tag.is_item() {
                self.read_item(parent, Length(len), position)?;
                return Ok(Step::Node);
            }
            return Ok(Step::Delimiter(tag));
        }

        ensure!(
            !self.obj.get(parent).map_or(false, Node::is_sequence),
            NotAnItemSnafu { tag, position }
        );

        let info = self.reader.dict.lookup_element(tag);
        let name = info.name.to_owned();
        let (vr, len) = if self.explicit {
            self.read_explicit_header(tag, position)?
        } else {
            let len = self
                .stream
                .read_u32()
                .context(TruncatedHeaderSnafu { tag, position })?;
            (implicit_vr(tag, info.vr), len)
        };
        let len = Length(len);
        if let Some(n) = len.get() {
            if n % 2 == 1 {
                self.diagnostics.push(Diagnostic::OddLength { tag, len: n });
            }
        }

        // zero length pixel data is an empty element,
        // only undefined length opens encapsulated fragments
        if tag.is_pixel_data() && len.is_undefined() && vr != VR::SQ {
            let seq = Sequence::encapsulated(tag, vr).with_name(name);
            let id = self.obj.add(parent, seq).context(BuildTreeSnafu)?;
            let was = std::mem::replace(&mut self.encapsulated, true);
            let result = self.read_children(id, tag, len, Tag::SEQUENCE_DELIMITER);
            self.encapsulated = was;
            result?;
            return Ok(Step::Node);
        }
        if vr == VR::SQ || len.is_undefined() {
            // a short length field cannot be undefined when written back
            let vr = if vr.has_long_length() { vr } else { VR::SQ };
            let seq = Sequence::with_length(tag, len).with_name(name).with_vr(vr);
            let id = self.obj.add(parent, seq).context(BuildTreeSnafu)?;
            self.read_children(id, tag, len, Tag::SEQUENCE_DELIMITER)?;
            return Ok(Step::Node);
        }

        self.read_primitive(parent, tag, vr, len.0, name)?;
        Ok(Step::Node)
    }

    fn read_explicit_header(&mut self, tag: Tag, position: usize) -> Result<(VR, u32)> {
        let code = self
            .stream
            .read_vr_code()
            .context(TruncatedHeaderSnafu { tag, position })?;
        let (vr, long) = match VR::from_binary(code) {
            Some(vr) => (vr, vr.has_long_length()),
            None => {
                self.diagnostics.push(Diagnostic::UnknownVr { tag, code });
                (VR::UN, false)
            }
        };
        let len = if long {
            self.stream
                .skip(2)
                .and_then(|_| self.stream.read_u32())
                .context(TruncatedHeaderSnafu { tag, position })?
        } else {
            self.stream
                .read_u16()
                .map(u32::from)
                .context(TruncatedHeaderSnafu { tag, position })?
        };
        Ok((vr, len))
    }

    fn read_primitive(&mut self, parent: NodeId, tag: Tag, vr: VR, len: u32, name: String) -> Result<()> {
        let bytes = self.stream.read_available(len as usize);
        self.last = Some(LastValue {
            tag,
            declared: len,
            actual: bytes.len(),
        });

        let codec = self.stream.codec();
        let value = if vr.is_bulk() {
            None
        } else {
            match codec.decode(bytes, vr) {
                Ok(value) => Some(value),
                Err(e) => {
                    self.diagnostics.push(Diagnostic::UndecodableValue {
                        tag,
                        vr,
                        message: e.to_string(),
                    });
                    None
                }
            }
        };
        if tag == tags::TRANSFER_SYNTAX_UID && parent == self.obj.root() {
            self.meta_ts = value.as_ref().map(|v| v.to_str().into_owned());
        }

        let elem = DataElement::from_binary(tag, vr, bytes.to_vec(), codec.declared())
            .with_name(name)
            .with_decoded(value);
        self.obj.add(parent, elem).context(BuildTreeSnafu)?;
        Ok(())
    }

    fn read_item(&mut self, parent: NodeId, len: Length, position: usize) -> Result<()> {
        ensure!(
            self.obj.get(parent).map_or(false, Node::is_sequence),
            ItemOutsideSequenceSnafu { position }
        );
        if self.encapsulated {
            let declared = len.get().context(UndefinedFragmentLengthSnafu { position })?;
            let bytes = self.stream.read_available(declared as usize);
            self.last = Some(LastValue {
                tag: Tag::ITEM,
                declared,
                actual: bytes.len(),
            });
            self.obj
                .add_item(parent, Some(Item::fragment(bytes.to_vec())), None)
                .context(BuildTreeSnafu)?;
            return Ok(());
        }
        let id = self
            .obj
            .add_item(parent, Some(Item::with_length(len)), None)
            .context(BuildTreeSnafu)?;
        self.read_children(id, Tag::ITEM, len, Tag::ITEM_DELIMITER)
    }

    /// The value read last must not be cut short by the end of the buffer.
    fn check_last_length(&mut self) {
        if let Some(last) = self.last {
            if last.actual < last.declared as usize {
                self.diagnostics.push(Diagnostic::LengthMismatch {
                    tag: last.tag,
                    declared: last.declared,
                    actual: last.actual,
                });
            }
        }
    }
}

/// The VR of an element in an implicit VR data set.
fn implicit_vr(tag: Tag, dictionary_vr: VR) -> VR {
    if tag.is_group_length() {
        VR::UL
    } else if tag.is_pixel_data() && !matches!(dictionary_vr, VR::OB | VR::OW) {
        VR::OW
    } else {
        dictionary_vr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmtree_core::dicom_value;

    fn le_header(tag: Tag) -> Vec<u8> {
        let mut out = tag.0.to_le_bytes().to_vec();
        out.extend(tag.1.to_le_bytes());
        out
    }

    fn implicit(tag: Tag, value: &[u8]) -> Vec<u8> {
        let mut out = le_header(tag);
        out.extend((value.len() as u32).to_le_bytes());
        out.extend(value);
        out
    }

    fn explicit(tag: Tag, vr: VR, value: &[u8]) -> Vec<u8> {
        let mut out = le_header(tag);
        out.extend(vr.to_bytes());
        if vr.has_long_length() {
            out.extend([0, 0]);
            out.extend((value.len() as u32).to_le_bytes());
        } else {
            out.extend((value.len() as u16).to_le_bytes());
        }
        out.extend(value);
        out
    }

    fn explicit_be(tag: Tag, vr: VR, value: &[u8]) -> Vec<u8> {
        let mut out = tag.0.to_be_bytes().to_vec();
        out.extend(tag.1.to_be_bytes());
        out.extend(vr.to_bytes());
        out.extend((value.len() as u16).to_be_bytes());
        out.extend(value);
        out
    }

    fn pseudo(tag: Tag, len: u32) -> Vec<u8> {
        let mut out = le_header(tag);
        out.extend(len.to_le_bytes());
        out
    }

    fn file_with_meta(ts: &str, dataset: &[u8]) -> Vec<u8> {
        let mut uid = ts.as_bytes().to_vec();
        if uid.len() % 2 == 1 {
            uid.push(0);
        }
        let mut data = vec![0; PREAMBLE_LENGTH];
        data.extend(SIGNATURE);
        data.extend(explicit(tags::TRANSFER_SYNTAX_UID, VR::UI, &uid));
        data.extend(dataset);
        data
    }

    #[test]
    fn empty_file_is_read() {
        let mut data = vec![0; PREAMBLE_LENGTH];
        data.extend(SIGNATURE);
        let outcome = Reader::new().read(&data);
        assert!(outcome.success);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.object.count_all(outcome.object.root()), 0);
    }

    #[test]
    fn bare_implicit_data_set() {
        let mut data = implicit(tags::SOP_CLASS_UID, b"1.2.3\0");
        data.extend(implicit(tags::PATIENT_NAME, b"DOE^JOHN"));
        data.extend(implicit(tags::ROWS, &[0x00, 0x02]));
        let outcome = Reader::new().read(&data);

        assert!(outcome.success);
        assert!(matches!(
            outcome.diagnostics.as_slice(),
            [Diagnostic::MissingSignature]
        ));
        let obj = outcome.object;
        assert_eq!(obj.element(tags::SOP_CLASS_UID).unwrap().to_str().unwrap(), "1.2.3");
        let name = obj.element(tags::PATIENT_NAME).unwrap();
        assert_eq!(name.vr(), VR::PN);
        assert_eq!(name.name(), "PatientName");
        assert_eq!(obj.value(tags::ROWS).unwrap(), dicom_value!(U16, [512]));
    }

    #[test]
    fn other_dictionaries_can_be_used() {
        use dcmtree_core::dictionary::StubDataDictionary;

        let data = implicit(tags::PATIENT_NAME, b"DOE^JOHN");
        let reader = Reader::new_with(StubDataDictionary, TransferSyntaxRegistry::new());
        let outcome = reader.read(&data);
        assert!(outcome.success);
        let name = outcome.object.element(tags::PATIENT_NAME).unwrap();
        assert_eq!(name.vr(), VR::UN);
        assert_eq!(name.name(), "Unknown");
        assert_eq!(name.bin(), b"DOE^JOHN");
    }

    #[test]
    fn signature_can_be_required() {
        let data = implicit(tags::PATIENT_NAME, b"DOE^JOHN");
        let reader = Reader::new().with_options(ReadOptions::new().require_signature());
        let outcome = reader.read(&data);
        assert!(!outcome.success);
        assert!(matches!(
            outcome.fatal_error(),
            Some(ReadError::MissingSignature { .. })
        ));
    }

    #[test]
    fn signature_without_preamble() {
        let mut data = SIGNATURE.to_vec();
        data.extend(explicit(tags::TRANSFER_SYNTAX_UID, VR::UI, b"1.2.840.10008.1.2.1\0"));
        data.extend(explicit(tags::MODALITY, VR::CS, b"MR"));
        let outcome = Reader::new().read(&data);
        assert!(outcome.success);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.object.element(tags::MODALITY).unwrap().to_str().unwrap(), "MR");
    }

    #[test]
    fn switches_to_big_endian() {
        let mut dataset = explicit_be(tags::ROWS, VR::US, &[0x02, 0x00]);
        dataset.extend(explicit_be(tags::PATIENT_ID, VR::LO, b"ID01"));
        let data = file_with_meta("1.2.840.10008.1.2.2", &dataset);
        let outcome = Reader::new().read(&data);

        assert!(outcome.success, "{:?}", outcome.diagnostics);
        let obj = outcome.object;
        let rows = obj.element(tags::ROWS).unwrap();
        assert_eq!(rows.decoded().unwrap(), dicom_value!(U16, [512]));
        assert_eq!(rows.endianness(), dcmtree_encoding::Endianness::Big);
        assert_eq!(obj.element(tags::PATIENT_ID).unwrap().to_str().unwrap(), "ID01");
        // the meta group stays little endian
        let ts = obj.element(tags::TRANSFER_SYNTAX_UID).unwrap();
        assert_eq!(ts.endianness(), dcmtree_encoding::Endianness::Little);
    }

    #[test]
    fn override_wins_over_meta_group() {
        let dataset = implicit(tags::PATIENT_ID, b"ID01");
        let data = file_with_meta("1.2.840.10008.1.2.1", &dataset);
        let reader = Reader::new()
            .with_options(ReadOptions::new().transfer_syntax("1.2.840.10008.1.2"));
        let outcome = reader.read(&data);
        assert!(outcome.success);
        assert_eq!(
            outcome.object.element(tags::PATIENT_ID).unwrap().to_str().unwrap(),
            "ID01"
        );
    }

    #[test]
    fn unknown_transfer_syntax_is_not_fatal() {
        let dataset = explicit(tags::PATIENT_ID, VR::LO, b"ID01");
        let data = file_with_meta("1.2.3.999", &dataset);
        let outcome = Reader::new().read(&data);
        assert!(outcome.success);
        assert!(outcome.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::InvalidTransferSyntax { uid } if uid == "1.2.3.999"
        )));
        assert!(outcome.object.element(tags::PATIENT_ID).is_ok());
    }

    #[test]
    fn undefined_length_sequence() {
        let mut item = implicit(tags::REFERENCED_SOP_CLASS_UID, b"1.2\0");
        let mut data = pseudo(tags::REFERENCED_IMAGE_SEQUENCE, u32::MAX);
        data.extend(pseudo(Tag::ITEM, u32::MAX));
        data.extend(&item);
        data.extend(pseudo(Tag::ITEM_DELIMITER, 0));
        data.extend(pseudo(Tag::ITEM, item.len() as u32));
        data.append(&mut item);
        data.extend(pseudo(Tag::SEQUENCE_DELIMITER, 0));
        data.extend(implicit(tags::PATIENT_ID, b"ID01"));

        let outcome = Reader::new().read(&data);
        assert!(outcome.success, "{:?}", outcome.diagnostics);
        let obj = outcome.object;
        let seq = obj.child(obj.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        let sequence = obj.get(seq).and_then(Node::as_sequence).unwrap();
        assert!(sequence.length().is_undefined());
        assert_eq!(sequence.name(), "ReferencedImageSequence");
        assert_eq!(obj.items(seq).count(), 2);
        let second = obj.item(seq, 1).unwrap();
        assert_eq!(obj.get(second).and_then(Node::as_item).unwrap().length(), Length(12));
        assert_eq!(obj.child_count(second), 1);
        assert!(obj.element(tags::PATIENT_ID).is_ok());
    }

    #[test]
    fn undefined_length_element_keeps_its_vr() {
        let private = Tag(0x0009, 0x1010);
        let mut dataset = le_header(private);
        dataset.extend(VR::UN.to_bytes());
        dataset.extend([0, 0]);
        dataset.extend(u32::MAX.to_le_bytes());
        dataset.extend(pseudo(Tag::ITEM, u32::MAX));
        dataset.extend(explicit(tags::REFERENCED_SOP_CLASS_UID, VR::UI, b"1.2\0"));
        dataset.extend(pseudo(Tag::ITEM_DELIMITER, 0));
        dataset.extend(pseudo(Tag::SEQUENCE_DELIMITER, 0));
        let data = file_with_meta("1.2.840.10008.1.2.1", &dataset);

        let outcome = Reader::new().read(&data);
        assert!(outcome.success, "{:?}", outcome.diagnostics);
        let obj = outcome.object;
        let id = obj.child(obj.root(), private).unwrap();
        assert_eq!(obj.get(id).and_then(Node::vr), Some(VR::UN));
        assert_eq!(obj.items(id).count(), 1);

        let written = crate::write::Writer::new().to_bytes(&obj);
        assert!(written.success);
        let again = Reader::new().read(&written.output).object;
        let id = again.child(again.root(), private).unwrap();
        assert_eq!(again.get(id).and_then(Node::vr), Some(VR::UN));
        assert_eq!(again.items(id).count(), 1);
    }

    #[test]
    fn defined_length_sequence() {
        let item_body = implicit(tags::REFERENCED_SOP_CLASS_UID, b"1.2\0");
        let mut item = pseudo(Tag::ITEM, item_body.len() as u32);
        item.extend(&item_body);
        let mut data = implicit(tags::REFERENCED_IMAGE_SEQUENCE, &item);
        data.extend(implicit(tags::PATIENT_ID, b"ID01"));

        let outcome = Reader::new().read(&data);
        assert!(outcome.success, "{:?}", outcome.diagnostics);
        let obj = outcome.object;
        let seq = obj.child(obj.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(
            obj.get(seq).and_then(Node::as_sequence).unwrap().length(),
            Length(20)
        );
        assert_eq!(obj.items(seq).count(), 1);
        assert_eq!(obj.child_count(obj.root()), 2);
    }

    #[test]
    fn encapsulated_pixel_data() {
        let mut dataset = le_header(tags::PIXEL_DATA);
        dataset.extend(VR::OB.to_bytes());
        dataset.extend([0, 0]);
        dataset.extend(u32::MAX.to_le_bytes());
        dataset.extend(pseudo(Tag::ITEM, 0));
        dataset.extend(pseudo(Tag::ITEM, 4));
        dataset.extend([0xFF, 0xD8, 0xFF, 0xD9]);
        dataset.extend(pseudo(Tag::SEQUENCE_DELIMITER, 0));
        let data = file_with_meta("1.2.840.10008.1.2.4.50", &dataset);

        let outcome = Reader::new().read(&data);
        assert!(outcome.success, "{:?}", outcome.diagnostics);
        let obj = outcome.object;
        let pixel_data = obj.child(obj.root(), tags::PIXEL_DATA).unwrap();
        assert!(obj.get(pixel_data).and_then(Node::as_sequence).unwrap().is_encapsulated());
        let fragments: Vec<_> = obj
            .items(pixel_data)
            .map(|i| obj.get(i).and_then(Node::as_item).unwrap().payload().unwrap().to_vec())
            .collect();
        assert_eq!(fragments, vec![vec![], vec![0xFF, 0xD8, 0xFF, 0xD9]]);
    }

    #[test]
    fn empty_pixel_data_is_an_element() {
        let data = implicit(tags::PIXEL_DATA, &[]);
        let outcome = Reader::new().read(&data);
        assert!(outcome.success);
        let pixel_data = outcome.object.element(tags::PIXEL_DATA).unwrap();
        assert_eq!(pixel_data.vr(), VR::OW);
        assert!(pixel_data.bin().is_empty());
    }

    #[test]
    fn odd_length_and_unknown_vr_are_reported() {
        let mut dataset = explicit(tags::PATIENT_ID, VR::LO, b"ID1");
        let mut unknown = le_header(Tag(0x0009, 0x1001));
        unknown.extend(b"ZZ");
        unknown.extend(2_u16.to_le_bytes());
        unknown.extend([1, 2]);
        dataset.extend(unknown);
        let data = file_with_meta("1.2.840.10008.1.2.1", &dataset);

        let outcome = Reader::new().read(&data);
        assert!(outcome.success);
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::OddLength { len: 3, .. })));
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::UnknownVr { code, .. } if code == b"ZZ")));
        let private = outcome.object.element(Tag(0x0009, 0x1001)).unwrap();
        assert_eq!(private.vr(), VR::UN);
        assert_eq!(private.name(), "Private");
    }

    #[test]
    fn truncated_value_fails() {
        let mut data = implicit(tags::PATIENT_ID, b"ID01");
        data.extend(le_header(tags::PIXEL_DATA));
        data.extend(100_u32.to_le_bytes());
        data.extend([0; 10]);
        let outcome = Reader::new().read(&data);
        assert!(!outcome.success);
        assert!(outcome.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::LengthMismatch {
                declared: 100,
                actual: 10,
                ..
            }
        )));
        // what was read is kept
        assert!(outcome.object.element(tags::PATIENT_ID).is_ok());
    }

    #[test]
    fn truncated_header_is_fatal() {
        let mut data = implicit(tags::PATIENT_ID, b"ID01");
        data.extend(le_header(tags::PATIENT_NAME));
        data.extend([4, 0]);
        let outcome = Reader::new().read(&data);
        assert!(!outcome.success);
        assert!(matches!(
            outcome.fatal_error(),
            Some(ReadError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn nesting_depth_is_limited() {
        let mut data = Vec::new();
        for _ in 0..4 {
            data.extend(pseudo(tags::REFERENCED_IMAGE_SEQUENCE, u32::MAX));
            data.extend(pseudo(Tag::ITEM, u32::MAX));
        }
        let reader = Reader::new().with_options(ReadOptions::new().max_depth(5));
        let outcome = reader.read(&data);
        assert!(!outcome.success);
        assert!(matches!(
            outcome.fatal_error(),
            Some(ReadError::DepthExceeded { max_depth: 5, .. })
        ));
    }

    #[test]
    fn stray_delimiters_are_skipped() {
        let mut data = pseudo(Tag::SEQUENCE_DELIMITER, 0);
        data.extend(implicit(tags::PATIENT_ID, b"ID01"));
        let outcome = Reader::new().read(&data);
        assert!(outcome.success);
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::StrayDelimiter { .. })));
        assert!(outcome.object.element(tags::PATIENT_ID).is_ok());
    }

    #[test]
    fn item_outside_sequence_is_fatal() {
        let mut data = implicit(tags::PATIENT_ID, b"ID01");
        data.extend(pseudo(Tag::ITEM, 0));
        let outcome = Reader::new().read(&data);
        assert!(!outcome.success);
        assert!(matches!(
            outcome.fatal_error(),
            Some(ReadError::ItemOutsideSequence { .. })
        ));
    }

    #[test]
    fn overshoot_is_reported_once() {
        // both items declare 4 bytes but hold a 12 byte element
        let body = implicit(tags::REFERENCED_SOP_CLASS_UID, b"1.2\0");
        let mut data = pseudo(tags::REFERENCED_IMAGE_SEQUENCE, u32::MAX);
        for _ in 0..2 {
            data.extend(pseudo(Tag::ITEM, 4));
            data.extend(&body);
        }
        data.extend(pseudo(Tag::SEQUENCE_DELIMITER, 0));
        let outcome = Reader::new().read(&data);
        assert!(outcome.success);
        let overshoots = outcome
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::HierarchyOvershoot { .. }))
            .count();
        assert_eq!(overshoots, 1);
        let obj = outcome.object;
        let seq = obj.child(obj.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(obj.items(seq).count(), 2);
    }

    #[test]
    fn items_past_a_short_sequence_stay_in_it() {
        // the sequence declares 8 bytes but holds two 20 byte items
        let body = implicit(tags::REFERENCED_SOP_CLASS_UID, b"1.2\0");
        let mut data = pseudo(tags::REFERENCED_IMAGE_SEQUENCE, 8);
        for _ in 0..2 {
            data.extend(pseudo(Tag::ITEM, body.len() as u32));
            data.extend(&body);
        }
        data.extend(implicit(tags::PATIENT_ID, b"ID01"));

        let outcome = Reader::new().read(&data);
        assert!(outcome.success, "{:?}", outcome.diagnostics);
        assert!(matches!(
            outcome.diagnostics[..],
            [
                Diagnostic::MissingSignature,
                Diagnostic::HierarchyOvershoot {
                    position: 28,
                    boundary: 16,
                    ..
                }
            ]
        ));
        let obj = outcome.object;
        let seq = obj.child(obj.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(obj.items(seq).count(), 2);
        assert_eq!(obj.element(tags::PATIENT_ID).unwrap().to_str().unwrap(), "ID01");
        assert_eq!(obj.parent(obj.child(obj.root(), tags::PATIENT_ID).unwrap()), Some(obj.root()));
    }

    #[test]
    fn elements_past_a_short_item_end_its_sequence() {
        // the item declares 4 bytes but holds a 12 byte element
        let mut data = pseudo(tags::REFERENCED_IMAGE_SEQUENCE, 24);
        data.extend(pseudo(Tag::ITEM, 4));
        data.extend(implicit(tags::REFERENCED_SOP_CLASS_UID, b"1.2\0"));
        data.extend(implicit(tags::PATIENT_ID, b"ID01"));

        let outcome = Reader::new().read(&data);
        assert!(outcome.success, "{:?}", outcome.diagnostics);
        let obj = outcome.object;
        let seq = obj.child(obj.root(), tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(obj.items(seq).count(), 1);
        assert!(obj.element(tags::PATIENT_ID).is_ok());
    }

    #[test]
    fn zero_length_pixel_data_is_an_empty_element() {
        let mut data = implicit(tags::PATIENT_ID, b"ID01");
        data.extend(implicit(tags::PIXEL_DATA, b""));

        let outcome = Reader::new().read(&data);
        assert!(outcome.success, "{:?}", outcome.diagnostics);
        let obj = outcome.object;
        let pixels = obj.element(tags::PIXEL_DATA).unwrap();
        assert_eq!(pixels.vr(), VR::OW);
        assert!(pixels.bin().is_empty());
    }
}
