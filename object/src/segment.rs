//! Output sinks for the writer.
//!
//! The writer hands over encoded bytes in chunks:
//! an element header, then its value.
//! A [`StreamSink`] passes them on to any [`Write`] implementation,
//! while a [`SegmentSink`] packs them into bounded segments
//! for message-oriented transports.

use crate::write::{SegmentTooSmallSnafu, WriteError, WriteSinkSnafu};
use snafu::{ensure, ResultExt};
use std::io::Write;

/// The smallest segment size accepted by a [`SegmentSink`],
/// enough for the largest element header followed by a few value bytes.
pub const MIN_SEGMENT_SIZE: usize = 32;

/// A destination for encoded bytes.
pub trait Sink {
    /// Take the next chunk of encoded bytes.
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), WriteError>;

    /// Complete the output after the last chunk.
    fn finish(&mut self) -> Result<(), WriteError> {
        Ok(())
    }
}

impl<S: ?Sized + Sink> Sink for &mut S {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), WriteError> {
        (**self).write_chunk(chunk)
    }

    fn finish(&mut self) -> Result<(), WriteError> {
        (**self).finish()
    }
}

/// A sink writing everything to a byte stream.
#[derive(Debug)]
pub struct StreamSink<W> {
    to: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(to: W) -> Self {
        StreamSink { to }
    }

    /// Retrieve the underlying writer.
    pub fn into_inner(self) -> W {
        self.to
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), WriteError> {
        self.to.write_all(chunk).context(WriteSinkSnafu)
    }

    fn finish(&mut self) -> Result<(), WriteError> {
        self.to.flush().context(WriteSinkSnafu)
    }
}

/// A sink packing the output into segments of bounded size.
///
/// A chunk which does not fit in the current segment
/// closes it and starts a new one.
/// A chunk larger than the maximum is spread
/// over as many full segments as needed,
/// and its tail opens the next segment.
#[derive(Debug)]
pub struct SegmentSink {
    max: usize,
    current: Vec<u8>,
    segments: Vec<Vec<u8>>,
}

impl SegmentSink {
    /// Create a segment sink with the given maximum segment size.
    pub fn new(max: usize) -> Result<Self, WriteError> {
        ensure!(
            max >= MIN_SEGMENT_SIZE,
            SegmentTooSmallSnafu {
                max,
                min: MIN_SEGMENT_SIZE
            }
        );
        Ok(SegmentSink {
            max,
            current: Vec::with_capacity(max),
            segments: Vec::new(),
        })
    }

    /// The maximum segment size.
    pub fn max_size(&self) -> usize {
        self.max
    }

    /// The segments completed so far.
    pub fn segments(&self) -> &[Vec<u8>] {
        &self.segments
    }

    /// Retrieve all segments, including the one still open.
    pub fn into_segments(mut self) -> Vec<Vec<u8>> {
        self.flush();
        self.segments
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let segment = std::mem::replace(&mut self.current, Vec::with_capacity(self.max));
        tracing::debug!(
            "Segment #{} complete with {} bytes",
            self.segments.len(),
            segment.len()
        );
        self.segments.push(segment);
    }
}

impl Sink for SegmentSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), WriteError> {
        if self.current.len() + chunk.len() <= self.max {
            self.current.extend_from_slice(chunk);
            return Ok(());
        }
        self.flush();
        let mut parts = chunk.chunks(self.max);
        if let Some(last) = parts.next_back() {
            for part in parts {
                self.segments.push(part.to_vec());
            }
            self.current.extend_from_slice(last);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), WriteError> {
        self.flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_chunks_share_a_segment() {
        let mut sink = SegmentSink::new(32).unwrap();
        sink.write_chunk(&[1; 10]).unwrap();
        sink.write_chunk(&[2; 22]).unwrap();
        sink.write_chunk(&[3; 4]).unwrap();
        let segments = sink.into_segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 32);
        assert_eq!(segments[1], vec![3; 4]);
    }

    #[test]
    fn large_chunk_is_split() {
        let mut sink = SegmentSink::new(32).unwrap();
        sink.write_chunk(&[0; 8]).unwrap();
        sink.write_chunk(&[1; 100]).unwrap();
        sink.write_chunk(&[2; 2]).unwrap();
        let segments = sink.into_segments();
        let lengths: Vec<_> = segments.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![8, 32, 32, 32, 6]);
        assert_eq!(segments[4], vec![1, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn rejects_tiny_segments() {
        assert!(matches!(
            SegmentSink::new(16),
            Err(WriteError::SegmentTooSmall { max: 16, min: 32, .. })
        ));
    }

    #[test]
    fn stream_sink_collects_bytes() {
        let mut sink = StreamSink::new(Vec::new());
        sink.write_chunk(b"DI").unwrap();
        sink.write_chunk(b"CM").unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.into_inner(), b"DICM");
    }
}
