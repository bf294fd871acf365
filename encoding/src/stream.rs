//! A cursor over an in-memory byte buffer.
//!
//! Every read primitive returns `None` when the requested bytes
//! lie past the end of the buffer.
//! Running out of input is the normal way for a data set to end,
//! so it is kept apart from decoding errors.

use crate::codec::{ByteCodec, DecodeValueError};
use dcmtree_core::value::PrimitiveValue;
use dcmtree_core::{Tag, VR};

/// A byte cursor decoding values with a [`ByteCodec`].
#[derive(Debug, Clone)]
pub struct Stream<'a> {
    data: &'a [u8],
    position: usize,
    codec: ByteCodec,
}

impl<'a> Stream<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8], codec: ByteCodec) -> Self {
        Stream {
            data,
            position: 0,
            codec,
        }
    }

    /// The current byte offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to an absolute offset,
    /// clamped to the end of the buffer.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }

    /// Move the cursor back by `n` bytes.
    pub fn rewind(&mut self, n: usize) {
        self.position = self.position.saturating_sub(n);
    }

    /// The number of bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Whether the whole buffer has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The full underlying buffer.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The codec currently in use.
    #[inline]
    pub fn codec(&self) -> ByteCodec {
        self.codec
    }

    /// Replace the codec, which takes effect on the next read.
    pub fn set_codec(&mut self, codec: ByteCodec) {
        self.codec = codec;
    }

    /// Take the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.position.checked_add(len)?;
        let bytes = self.data.get(self.position..end)?;
        self.position = end;
        Some(bytes)
    }

    /// Take whatever is left of the buffer, up to `len` bytes.
    pub fn read_available(&mut self, len: usize) -> &'a [u8] {
        let end = self.position.saturating_add(len).min(self.data.len());
        let bytes = &self.data[self.position..end];
        self.position = end;
        bytes
    }

    /// Advance the cursor by `len` bytes.
    pub fn skip(&mut self, len: usize) -> Option<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read a 16-bit unsigned integer.
    pub fn read_u16(&mut self) -> Option<u16> {
        let codec = self.codec;
        self.read_bytes(2).and_then(|b| codec.get_u16(b))
    }

    /// Read a 32-bit unsigned integer.
    pub fn read_u32(&mut self) -> Option<u32> {
        let codec = self.codec;
        self.read_bytes(4).and_then(|b| codec.get_u32(b))
    }

    /// Read an attribute tag.
    pub fn decode_tag(&mut self) -> Option<Tag> {
        let codec = self.codec;
        self.read_bytes(4).and_then(|b| codec.decode_tag(b))
    }

    /// Read a two-character VR code, without interpreting it.
    pub fn read_vr_code(&mut self) -> Option<[u8; 2]> {
        self.read_bytes(2).map(|b| [b[0], b[1]])
    }

    /// Read `len` bytes and decode them as a value of the given VR.
    ///
    /// Returns `Ok(None)` if the value would extend past the end of the buffer,
    /// in which case the cursor does not move.
    pub fn decode(&mut self, len: usize, vr: VR) -> Result<Option<PrimitiveValue>, DecodeValueError> {
        let codec = self.codec;
        match self.read_bytes(len) {
            Some(bytes) => codec.decode(bytes, vr).map(Some),
            None => Ok(None),
        }
    }
}
