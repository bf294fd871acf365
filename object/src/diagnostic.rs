//! Diagnostics recorded while reading or writing an object.
//!
//! Readers and writers do not fail across their public boundary.
//! Instead, every irregularity found is recorded in order,
//! and a fatal one also clears the success flag of the outcome.

use crate::read::ReadError;
use crate::write::WriteError;
use dcmtree_core::{Tag, VR};
use std::fmt;

/// An irregularity found while reading or writing.
#[derive(Debug)]
#[non_exhaustive]
pub enum Diagnostic {
    /// The buffer did not start with a preamble and the `DICM` signature,
    /// so it was read as a bare data set from offset 0.
    MissingSignature,
    /// A value length was odd.
    OddLength { tag: Tag, len: u32 },
    /// An explicit VR code was not recognized.
    /// The element was kept with VR UN.
    UnknownVr { tag: Tag, code: [u8; 2] },
    /// The transfer syntax UID is unknown,
    /// so the data set was processed with the default settings.
    InvalidTransferSyntax { uid: String },
    /// An element ran past the declared end of its sequence or item.
    /// Reported once per read.
    HierarchyOvershoot {
        tag: Tag,
        position: usize,
        boundary: usize,
    },
    /// A delimiter was found where no open container expects it.
    StrayDelimiter { tag: Tag, position: usize },
    /// A value could not be decoded. Its binary was kept.
    UndecodableValue { tag: Tag, vr: VR, message: String },
    /// The last element read had fewer bytes than declared.
    LengthMismatch {
        tag: Tag,
        declared: u32,
        actual: usize,
    },
    /// Reading stopped.
    ReadFailed(ReadError),
    /// Writing stopped.
    WriteFailed(WriteError),
}

impl Diagnostic {
    /// Whether this diagnostic means that the outcome cannot be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Diagnostic::LengthMismatch { .. } | Diagnostic::ReadFailed(_) | Diagnostic::WriteFailed(_)
        )
    }

    /// Emit this diagnostic as a tracing event.
    pub(crate) fn log(&self) {
        if self.is_fatal() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::MissingSignature => {
                f.write_str("No DICM signature found, reading from the start as a plain data set")
            }
            Diagnostic::OddLength { tag, len } => {
                write!(f, "Element {} has an odd length of {} bytes", tag, len)
            }
            Diagnostic::UnknownVr { tag, code } => write!(
                f,
                "Element {} has unknown VR {:?}, reading it as UN",
                tag,
                String::from_utf8_lossy(code)
            ),
            Diagnostic::InvalidTransferSyntax { uid } => write!(
                f,
                "Unknown transfer syntax `{}`, assuming explicit VR little endian",
                uid
            ),
            Diagnostic::HierarchyOvershoot {
                tag,
                position,
                boundary,
            } => write!(
                f,
                "Element {} ends at offset {}, past the end of its parent at {}",
                tag, position, boundary
            ),
            Diagnostic::StrayDelimiter { tag, position } => {
                write!(f, "Unexpected delimiter {} at offset {}", tag, position)
            }
            Diagnostic::UndecodableValue { tag, vr, message } => {
                write!(f, "Could not decode {} value of element {}: {}", vr, tag, message)
            }
            Diagnostic::LengthMismatch {
                tag,
                declared,
                actual,
            } => write!(
                f,
                "Element {} declares {} bytes but only {} were available",
                tag, declared, actual
            ),
            Diagnostic::ReadFailed(e) => write!(f, "Reading failed: {}", e),
            Diagnostic::WriteFailed(e) => write!(f, "Writing failed: {}", e),
        }
    }
}

/// An ordered trail of diagnostics.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    list: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Log and record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.list.push(diagnostic);
    }

    pub fn has_fatal(&self) -> bool {
        self.list.iter().any(Diagnostic::is_fatal)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.list
    }
}
