//! Writing a DICOM object to a sink.
//!
//! The writer mirrors the reader:
//! the optional preamble and signature come first,
//! then the file meta group in explicit VR little endian,
//! and the rest of the data set in the target transfer syntax.
//! Defined sequence and item lengths are recomputed
//! from what is actually written.

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::meta;
use crate::node::{DataElement, Item, Node, Sequence};
use crate::read::{PREAMBLE_LENGTH, SIGNATURE};
use crate::segment::{SegmentSink, Sink, StreamSink};
use crate::tree::{DicomObject, NodeId, TreeError};
use dcmtree_core::{Length, Tag, VR};
use dcmtree_dictionary_std::tags;
use dcmtree_encoding::codec::EncodeValueError;
use dcmtree_encoding::transfer_syntax::{trim_uid, TransferSyntaxIndex, IMPLICIT_VR_LITTLE_ENDIAN};
use dcmtree_encoding::{ByteCodec, Endianness};
use dcmtree_transfer_syntax_registry::TransferSyntaxRegistry;
use snafu::{Backtrace, ResultExt, Snafu};
use std::path::{Path, PathBuf};

/// A fatal problem which stops the writing of an object.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum WriteError {
    #[snafu(display("Value of {} is too long ({} bytes) for its length field", tag, len))]
    ValueTooLong {
        tag: Tag,
        len: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not encode meta group element {}", tag))]
    EncodeMeta {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncodeValueError,
    },
    #[snafu(display("Could not place meta group element {}", tag))]
    PlaceMeta {
        tag: Tag,
        #[snafu(backtrace)]
        source: TreeError,
    },
    #[snafu(display("Could not write to sink"))]
    WriteSink {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write to file '{}'", filename.display()))]
    WriteFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Segment size {} is below the minimum of {}", max, min))]
    SegmentTooSmall {
        max: usize,
        min: usize,
        backtrace: Backtrace,
    },
}

type Result<T, E = WriteError> = std::result::Result<T, E>;

/// Options for writing an object.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct WriteOptions {
    /// the target transfer syntax UID,
    /// defaults to the one in the object's meta group
    pub transfer_syntax: Option<String>,
    /// whether to write the preamble and the `DICM` signature
    pub signature: bool,
    /// whether to fill in the file meta group
    pub synthesize_meta: bool,
    /// whether to write the file meta group at all
    pub file_meta: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            transfer_syntax: None,
            signature: true,
            synthesize_meta: true,
            file_meta: true,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        WriteOptions::default()
    }

    /// Write the data set in the given transfer syntax.
    pub fn transfer_syntax(mut self, uid: impl Into<String>) -> Self {
        self.transfer_syntax = Some(uid.into());
        self
    }

    /// Leave out the preamble and the `DICM` signature.
    pub fn without_signature(mut self) -> Self {
        self.signature = false;
        self
    }

    /// Write the meta group elements of the object as they are,
    /// only recomputing the group length.
    pub fn without_meta_synthesis(mut self) -> Self {
        self.synthesize_meta = false;
        self
    }

    /// Write only the data set,
    /// with neither the signature nor the file meta group,
    /// as sent over a network connection.
    pub fn data_set_only(mut self) -> Self {
        self.signature = false;
        self.synthesize_meta = false;
        self.file_meta = false;
        self
    }
}

/// The result of writing an object.
#[derive(Debug)]
pub struct WriteOutcome<T> {
    /// what was written, incomplete if `success` is false
    pub output: T,
    pub success: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> WriteOutcome<T> {
    /// The error which stopped the writing, if any.
    pub fn fatal_error(&self) -> Option<&WriteError> {
        self.diagnostics.iter().find_map(|d| match d {
            Diagnostic::WriteFailed(e) => Some(e),
            _ => None,
        })
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> WriteOutcome<U> {
        WriteOutcome {
            output: f(self.output),
            success: self.success,
            diagnostics: self.diagnostics,
        }
    }
}

/// A writer of DICOM objects.
#[derive(Debug, Clone)]
pub struct Writer<R = TransferSyntaxRegistry> {
    ts_index: R,
    options: WriteOptions,
}

impl Writer {
    /// Create a writer with the standard transfer syntaxes.
    pub fn new() -> Self {
        Writer::new_with(TransferSyntaxRegistry::new())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new()
    }
}

impl<R> Writer<R> {
    /// Create a writer with the given transfer syntax index.
    pub fn new_with(ts_index: R) -> Self {
        Writer {
            ts_index,
            options: WriteOptions::default(),
        }
    }

    /// Replace the writing options.
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }
}

impl<R> Writer<R>
where
    R: TransferSyntaxIndex,
{
    /// Write an object to the given sink.
    ///
    /// The sink is given back in the outcome.
    pub fn write<S: Sink>(&self, obj: &DicomObject, sink: S) -> WriteOutcome<S> {
        self.write_with(obj, sink, &self.options)
    }

    fn write_with<S: Sink>(&self, obj: &DicomObject, sink: S, options: &WriteOptions) -> WriteOutcome<S> {
        let mut diagnostics = Diagnostics::default();
        let mut state = WriteState {
            sink,
            codec: ByteCodec::little_endian(),
            explicit: true,
        };
        let result = self
            .write_all(obj, &mut state, options, &mut diagnostics)
            .and_then(|()| state.sink.finish());
        if let Err(e) = result {
            diagnostics.push(Diagnostic::WriteFailed(e));
        }
        WriteOutcome {
            output: state.sink,
            success: !diagnostics.has_fatal(),
            diagnostics: diagnostics.into_vec(),
        }
    }

    /// Encode an object in memory.
    pub fn to_bytes(&self, obj: &DicomObject) -> WriteOutcome<Vec<u8>> {
        self.write(obj, StreamSink::new(Vec::new()))
            .map(StreamSink::into_inner)
    }

    /// Encode the data set of an object
    /// into segments of at most `max` bytes each, for transport.
    ///
    /// Segments never carry the signature or the file meta group:
    /// concatenating them gives the same bytes as [`to_bytes`](Self::to_bytes)
    /// with [`WriteOptions::data_set_only`].
    pub fn encode_segments(&self, obj: &DicomObject, max: usize) -> Result<WriteOutcome<Vec<Vec<u8>>>> {
        let sink = SegmentSink::new(max)?;
        let options = self.options.clone().data_set_only();
        Ok(self
            .write_with(obj, sink, &options)
            .map(SegmentSink::into_segments))
    }

    /// Write an object to a file.
    ///
    /// The object is encoded in memory first,
    /// and the file is only created if encoding succeeded.
    pub fn write_file(&self, obj: &DicomObject, path: impl AsRef<Path>) -> WriteOutcome<()> {
        let path = path.as_ref();
        let mut outcome = self.to_bytes(obj);
        if outcome.success {
            let written = std::fs::write(path, &outcome.output).context(WriteFileSnafu { filename: path });
            if let Err(e) = written {
                let diagnostic = Diagnostic::WriteFailed(e);
                diagnostic.log();
                outcome.diagnostics.push(diagnostic);
                outcome.success = false;
            }
        }
        outcome.map(|_| ())
    }

    fn write_all<S: Sink>(
        &self,
        obj: &DicomObject,
        state: &mut WriteState<S>,
        options: &WriteOptions,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let uid = target_transfer_syntax(obj, options);
        let info = self.ts_index.resolve(&uid);
        if !info.valid {
            diagnostics.push(Diagnostic::InvalidTransferSyntax {
                uid: trim_uid(&uid).to_owned(),
            });
        }

        if options.signature {
            let mut header = vec![0; PREAMBLE_LENGTH];
            header.extend_from_slice(SIGNATURE);
            state.sink.write_chunk(&header)?;
        }

        let meta_group = if !options.file_meta {
            Vec::new()
        } else if options.synthesize_meta {
            meta::build_meta_group(obj, &uid)?
        } else {
            meta::existing_meta_group(obj)?
        };
        for elem in &meta_group {
            state.write_element(elem)?;
        }

        tracing::debug!(
            "Writing data set as {} VR {:?} endian ({})",
            if info.explicit_vr { "explicit" } else { "implicit" },
            info.endianness(),
            trim_uid(&uid)
        );
        state.codec = info.codec();
        state.explicit = info.explicit_vr;

        let root = obj.root();
        for child in obj.children(root) {
            if obj.get(child).and_then(Node::tag).map_or(false, |t| t.is_meta()) {
                continue;
            }
            state.write_node(obj, child)?;
        }
        Ok(())
    }
}

/// The option, else the object's meta group, else implicit VR little endian.
fn target_transfer_syntax(obj: &DicomObject, options: &WriteOptions) -> String {
    if let Some(uid) = &options.transfer_syntax {
        return uid.clone();
    }
    obj.element(tags::TRANSFER_SYNTAX_UID)
        .ok()
        .and_then(|e| e.to_str().ok())
        .filter(|uid| !uid.is_empty())
        .unwrap_or_else(|| IMPLICIT_VR_LITTLE_ENDIAN.uid().to_owned())
}

/// The size of an element header.
pub(crate) fn header_len(vr: VR, explicit: bool) -> u64 {
    if explicit && vr.has_long_length() {
        12
    } else {
        8
    }
}

/// The size of a pseudo element header: tag and 4 byte length.
const PSEUDO_HEADER_LEN: u64 = 8;

struct WriteState<S> {
    sink: S,
    codec: ByteCodec,
    explicit: bool,
}

impl<S: Sink> WriteState<S> {
    fn write_node(&mut self, obj: &DicomObject, id: NodeId) -> Result<()> {
        match obj.get(id) {
            Some(Node::Element(elem)) => self.write_element(elem),
            Some(Node::Sequence(seq)) if seq.is_encapsulated() => self.write_pixel_fragments(obj, id, seq),
            Some(Node::Sequence(seq)) => self.write_sequence(obj, id, seq),
            Some(Node::Item(item)) => self.write_item(obj, id, item),
            Some(Node::Root) | None => Ok(()),
        }
    }

    fn write_element(&mut self, elem: &DataElement) -> Result<()> {
        let tag = elem.tag();
        if tag.is_group_length() && !tag.is_meta() {
            return Ok(());
        }
        let endianness = if tag.is_meta() {
            Endianness::Little
        } else {
            self.codec.declared()
        };
        let bin = elem.bin_in(endianness);
        self.write_header(tag, elem.vr(), Length(length_field(tag, bin.len() as u64)?))?;
        if !bin.is_empty() {
            self.sink.write_chunk(&bin)?;
        }
        Ok(())
    }

    fn write_sequence(&mut self, obj: &DicomObject, id: NodeId, seq: &Sequence) -> Result<()> {
        let tag = seq.tag();
        let len = if seq.length().is_undefined() {
            Length::UNDEFINED
        } else {
            Length(length_field(tag, self.content_len(obj, id))?)
        };
        self.write_header(tag, seq.vr(), len)?;
        for item in obj.children(id) {
            self.write_node(obj, item)?;
        }
        if len.is_undefined() {
            self.write_pseudo(Tag::SEQUENCE_DELIMITER, 0)?;
        }
        Ok(())
    }

    fn write_item(&mut self, obj: &DicomObject, id: NodeId, item: &Item) -> Result<()> {
        let len = if item.length().is_undefined() {
            Length::UNDEFINED
        } else {
            Length(length_field(Tag::ITEM, self.content_len(obj, id))?)
        };
        self.write_pseudo(Tag::ITEM, len.0)?;
        for child in obj.children(id) {
            self.write_node(obj, child)?;
        }
        if len.is_undefined() {
            self.write_pseudo(Tag::ITEM_DELIMITER, 0)?;
        }
        Ok(())
    }

    /// Encapsulated pixel data always has undefined length,
    /// and its fragments always have defined length.
    fn write_pixel_fragments(&mut self, obj: &DicomObject, id: NodeId, seq: &Sequence) -> Result<()> {
        self.write_header(seq.tag(), seq.vr(), Length::UNDEFINED)?;
        for item in obj.items(id) {
            let payload = obj
                .get(item)
                .and_then(Node::as_item)
                .and_then(Item::payload)
                .unwrap_or_default();
            let padded = payload.len() as u64 + payload.len() as u64 % 2;
            self.write_pseudo(Tag::ITEM, length_field(Tag::ITEM, padded)?)?;
            if !payload.is_empty() {
                self.sink.write_chunk(payload)?;
            }
            if payload.len() % 2 == 1 {
                self.sink.write_chunk(&[0])?;
            }
        }
        self.write_pseudo(Tag::SEQUENCE_DELIMITER, 0)
    }

    fn write_header(&mut self, tag: Tag, vr: VR, len: Length) -> Result<()> {
        let (codec, explicit) = if tag.is_meta() {
            (ByteCodec::little_endian(), true)
        } else {
            (self.codec, self.explicit)
        };
        let mut header = Vec::with_capacity(12);
        header.extend_from_slice(&codec.encode_tag(tag));
        if explicit {
            header.extend_from_slice(&vr.to_bytes());
            if vr.has_long_length() {
                header.extend_from_slice(&[0, 0]);
                codec.write_u32(&mut header, len.0);
            } else {
                let short = u16::try_from(len.0).map_err(|_| {
                    ValueTooLongSnafu {
                        tag,
                        len: u64::from(len.0),
                    }
                    .build()
                })?;
                codec.write_u16(&mut header, short);
            }
        } else {
            codec.write_u32(&mut header, len.0);
        }
        self.sink.write_chunk(&header)
    }

    fn write_pseudo(&mut self, tag: Tag, len: u32) -> Result<()> {
        let mut header = Vec::with_capacity(8);
        header.extend_from_slice(&self.codec.encode_tag(tag));
        self.codec.write_u32(&mut header, len);
        self.sink.write_chunk(&header)
    }

    /// The number of bytes written for the children of a node.
    fn content_len(&self, obj: &DicomObject, id: NodeId) -> u64 {
        obj.children(id).map(|c| self.encoded_len(obj, c)).sum()
    }

    /// The number of bytes written for a node, header included.
    fn encoded_len(&self, obj: &DicomObject, id: NodeId) -> u64 {
        match obj.get(id) {
            Some(Node::Element(elem)) => {
                let tag = elem.tag();
                if tag.is_group_length() && !tag.is_meta() {
                    return 0;
                }
                let len = elem.bin().len() as u64;
                header_len(elem.vr(), self.explicit) + len + len % 2
            }
            Some(Node::Sequence(seq)) if seq.is_encapsulated() => {
                let fragments: u64 = obj
                    .items(id)
                    .map(|i| {
                        let len = obj
                            .get(i)
                            .and_then(Node::as_item)
                            .and_then(Item::payload)
                            .map_or(0, |p| p.len() as u64);
                        PSEUDO_HEADER_LEN + len + len % 2
                    })
                    .sum();
                header_len(seq.vr(), self.explicit) + fragments + PSEUDO_HEADER_LEN
            }
            Some(Node::Sequence(seq)) => {
                let delimiter = if seq.length().is_undefined() {
                    PSEUDO_HEADER_LEN
                } else {
                    0
                };
                header_len(seq.vr(), self.explicit) + self.content_len(obj, id) + delimiter
            }
            Some(Node::Item(item)) => {
                let delimiter = if item.length().is_undefined() {
                    PSEUDO_HEADER_LEN
                } else {
                    0
                };
                PSEUDO_HEADER_LEN + self.content_len(obj, id) + delimiter
            }
            Some(Node::Root) | None => 0,
        }
    }
}

/// Fit a length in a length field, leaving out the undefined length value.
fn length_field(tag: Tag, len: u64) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&len| len != Length::UNDEFINED.0)
        .ok_or_else(|| ValueTooLongSnafu { tag, len }.build())
}
