//! Module containing the DICOM transfer syntax descriptor
//! and the contract of a transfer syntax index.
//!
//! This crate only hosts the three uncompressed base transfer syntaxes.
//! A full index of the transfer syntaxes known to the program
//! is provided by the `dcmtree-transfer-syntax-registry` crate,
//! which implements [`TransferSyntaxIndex`].

use crate::codec::ByteCodec;
pub use byteordered::Endianness;

/// A DICOM transfer syntax specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// Whether pixel data is encapsulated in fragments.
    encapsulated: bool,
}

/// Implicit VR Little Endian, the default transfer syntax of DICOM.
pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2",
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
    false,
);

/// Explicit VR Little Endian.
pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2.1",
    "Explicit VR Little Endian",
    Endianness::Little,
    true,
    false,
);

/// Explicit VR Big Endian (retired).
pub const EXPLICIT_VR_BIG_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2.2",
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
    false,
);

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        encapsulated: bool,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            encapsulated,
        }
    }

    /// Create a descriptor for a transfer syntax with encapsulated pixel data
    /// in Explicit VR Little Endian, the encoding of every compressed syntax.
    pub const fn encapsulated(uid: &'static str, name: &'static str) -> Self {
        TransferSyntax::new(uid, name, Endianness::Little, true, true)
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Check whether this transfer syntax specifier provides an explicit VR.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Check whether pixel data is encapsulated.
    pub const fn is_encapsulated(&self) -> bool {
        self.encapsulated
    }

    /// Obtain a codec for the byte order of this transfer syntax.
    pub fn codec(&self) -> ByteCodec {
        ByteCodec::new(self.byte_order)
    }

    /// Describe the encoding of this transfer syntax.
    pub fn info(&self) -> TransferSyntaxInfo {
        TransferSyntaxInfo {
            valid: true,
            explicit_vr: self.explicit_vr,
            big_endian: self.byte_order == Endianness::Big,
            encapsulated: self.encapsulated,
        }
    }
}

/// The encoding parameters resolved for a transfer syntax UID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSyntaxInfo {
    /// Whether the UID is known to the index.
    pub valid: bool,
    /// Whether the value representation is explicit.
    pub explicit_vr: bool,
    /// Whether the data set is in big endian.
    pub big_endian: bool,
    /// Whether pixel data is encapsulated.
    pub encapsulated: bool,
}

impl TransferSyntaxInfo {
    /// The assumed encoding of an unknown transfer syntax:
    /// explicit VR little endian, likely with compressed pixel data.
    pub const UNKNOWN: TransferSyntaxInfo = TransferSyntaxInfo {
        valid: false,
        explicit_vr: true,
        big_endian: false,
        encapsulated: true,
    };

    /// The byte order of the data set.
    pub fn endianness(&self) -> Endianness {
        if self.big_endian {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    /// Obtain a codec for this byte order.
    pub fn codec(&self) -> ByteCodec {
        ByteCodec::new(self.endianness())
    }
}

/// Trait for containers of transfer syntax specifiers.
///
/// Implementations are expected to be immutable once constructed,
/// so that a single index can serve concurrent readers and writers.
pub trait TransferSyntaxIndex {
    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of trailing null characters (`\0`) or spaces in `uid`.
    fn get(&self, uid: &str) -> Option<&TransferSyntax>;

    /// Resolve the encoding parameters of a transfer syntax UID.
    ///
    /// UIDs unknown to the index resolve to [`TransferSyntaxInfo::UNKNOWN`].
    fn resolve(&self, uid: &str) -> TransferSyntaxInfo {
        self.get(uid)
            .map(TransferSyntax::info)
            .unwrap_or(TransferSyntaxInfo::UNKNOWN)
    }
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

impl<T: ?Sized> TransferSyntaxIndex for std::sync::Arc<T>
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

/// Remove the padding that may trail a UID value.
pub fn trim_uid(uid: &str) -> &str {
    uid.trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
}

/// An index of only the three uncompressed base transfer syntaxes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BaseTransferSyntaxes;

impl TransferSyntaxIndex for BaseTransferSyntaxes {
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        [
            &IMPLICIT_VR_LITTLE_ENDIAN,
            &EXPLICIT_VR_LITTLE_ENDIAN,
            &EXPLICIT_VR_BIG_ENDIAN,
        ]
        .into_iter()
        .find(|ts| ts.uid() == trim_uid(uid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_index_resolves_padded_uids() {
        let index = BaseTransferSyntaxes;
        let info = index.resolve("1.2.840.10008.1.2.2\0");
        assert!(info.valid);
        assert!(info.big_endian);
        assert!(info.explicit_vr);
        assert_eq!(
            index.get("1.2.840.10008.1.2 ").map(TransferSyntax::uid),
            Some("1.2.840.10008.1.2")
        );
    }

    #[test]
    fn unknown_uid_defaults() {
        let info = BaseTransferSyntaxes.resolve("1.2.3.4");
        assert_eq!(info, TransferSyntaxInfo::UNKNOWN);
        assert_eq!(info.endianness(), Endianness::Little);
        assert!(info.explicit_vr);
    }
}
