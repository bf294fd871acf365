#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

//! DICOM encoding and decoding primitives.
//!
//! This crate provides the byte-level building blocks
//! for reading and writing DICOM data:
//!
//! - [`codec`] packs and unpacks values for a declared byte order;
//! - [`stream`] is a cursor over an in-memory buffer,
//!   signalling the end of input apart from decoding errors;
//! - [`transfer_syntax`] hosts the transfer syntax descriptor
//!   and the contract of a transfer syntax index.
//!
//! All APIs work on complete in-memory buffers.

pub mod codec;
pub mod stream;
pub mod transfer_syntax;

pub use byteordered::Endianness;
pub use codec::{ByteCodec, DecodeValueError, EncodeValueError};
pub use stream::Stream;
pub use transfer_syntax::{TransferSyntax, TransferSyntaxIndex, TransferSyntaxInfo};
