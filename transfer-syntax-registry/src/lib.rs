//! This crate contains the DICOM transfer syntax registry.
//! The transfer syntax registry maps a DICOM UID of a transfer syntax into the
//! respective transfer syntax specifier.
//!
//! The registry is an ordinary value:
//! build it once with [`TransferSyntaxRegistry::new`]
//! and share it by reference with readers and writers.
//!
//! _Deflated Explicit VR Little Endian_ is not registered,
//! since its data sets cannot be read without inflating them first.
//! Its UID therefore resolves as an unknown transfer syntax.

pub mod entries;

use dcmtree_encoding::transfer_syntax::{trim_uid, TransferSyntax, TransferSyntaxIndex};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Data type for a registry of DICOM transfer syntaxes.
#[derive(Clone)]
pub struct TransferSyntaxRegistry {
    m: HashMap<&'static str, TransferSyntax>,
}

impl fmt::Debug for TransferSyntaxRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: HashMap<&str, &str> =
            self.m.iter().map(|(uid, ts)| (*uid, ts.name())).collect();
        f.debug_struct("TransferSyntaxRegistry")
            .field("m", &entries)
            .finish()
    }
}

impl TransferSyntaxRegistry {
    /// Create a registry with all built-in transfer syntaxes.
    pub fn new() -> Self {
        use crate::entries::*;

        let mut registry = TransferSyntaxRegistry {
            m: HashMap::with_capacity(24),
        };
        for ts in [
            // the three base transfer syntaxes, fully supported
            IMPLICIT_VR_LITTLE_ENDIAN,
            EXPLICIT_VR_LITTLE_ENDIAN,
            EXPLICIT_VR_BIG_ENDIAN,
            // encapsulated pixel data
            ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN,
            JPEG_BASELINE,
            JPEG_EXTENDED,
            JPEG_LOSSLESS_NON_HIERARCHICAL,
            JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
            JPEG_LS_LOSSLESS_IMAGE_COMPRESSION,
            JPEG_LS_LOSSY_IMAGE_COMPRESSION,
            JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
            JPEG_2000_IMAGE_COMPRESSION,
            JPEG_2000_PART2_MULTI_COMPONENT_IMAGE_COMPRESSION_LOSSLESS_ONLY,
            JPEG_2000_PART2_MULTI_COMPONENT_IMAGE_COMPRESSION,
            MPEG2_MAIN_PROFILE_MAIN_LEVEL,
            MPEG2_MAIN_PROFILE_HIGH_LEVEL,
            MPEG4_AVC_H264_HIGH_PROFILE,
            MPEG4_AVC_H264_BD_COMPATIBLE_HIGH_PROFILE,
            HEVC_H265_MAIN_PROFILE,
            HEVC_H265_MAIN_10_PROFILE,
            RLE_LOSSLESS,
        ] {
            registry.register(ts);
        }
        registry
    }

    /// Register the given transfer syntax (TS).
    /// A TS already registered under the same UID is kept,
    /// in which case this function returns `false`.
    pub fn register(&mut self, ts: TransferSyntax) -> bool {
        match self.m.entry(ts.uid()) {
            Entry::Occupied(_) => {
                tracing::warn!("Transfer syntax {} is already registered", ts.uid());
                false
            }
            Entry::Vacant(e) => {
                e.insert(ts);
                true
            }
        }
    }

    /// Iterate over all registered transfer syntaxes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        self.m.values()
    }
}

impl Default for TransferSyntaxRegistry {
    fn default() -> Self {
        TransferSyntaxRegistry::new()
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        self.m.get(trim_uid(uid))
    }
}

/// Retrieve the default transfer syntax.
pub fn default() -> TransferSyntax {
    entries::IMPLICIT_VR_LITTLE_ENDIAN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_keeps_first() {
        let mut registry = TransferSyntaxRegistry::new();
        let n = registry.iter().count();
        assert!(!registry.register(entries::RLE_LOSSLESS));
        assert_eq!(registry.iter().count(), n);
        assert!(registry.register(TransferSyntax::encapsulated("1.2.3.4", "Private Codec")));
        assert!(registry.get("1.2.3.4").is_some());
    }
}
