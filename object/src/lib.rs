//! This crate contains the in-memory DICOM object model
//! and the codec which reads it from and writes it to bytes.
//!
//! An object is a tree of nodes held by a [`DicomObject`]:
//! data elements, sequences, and the items inside sequences.
//! Nodes are addressed by [`NodeId`].
//!
//! Loading a DICOM file can be done via the function [`open_file`].
//! For additional reading options, use [`OpenFileOptions`].
//! Reading never fails across the API:
//! the outcome carries the object read so far,
//! a success flag, and the diagnostics found on the way.
//!
//! # Examples
//!
//! Read an object and fetch some attributes:
//!
//! ```no_run
//! use dcmtree_dictionary_std::{tags, StandardDataDictionary};
//! use dcmtree_object::open_file;
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome = open_file("0001.dcm");
//! if !outcome.success {
//!     return Err("could not read file".into());
//! }
//! let obj = outcome.object;
//!
//! let patient_name = obj.element(tags::PATIENT_NAME)?.to_str()?;
//! let dict = StandardDataDictionary::new();
//! let modality = obj.element_by_name("Modality", &dict)?.to_str()?;
//! # Ok(())
//! # }
//! ```
//!
//! Objects can be built from scratch and written back
//! into DICOM encoded bytes,
//! with the file meta group filled in automatically:
//!
//! ```
//! # use dcmtree_object::{DataElement, DicomObject, Writer, WriteOptions};
//! # use dcmtree_core::VR;
//! # use dcmtree_dictionary_std::{tags, uids};
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut obj = DicomObject::new();
//! obj.put(DataElement::new(tags::PATIENT_NAME, VR::PN, "Doe^John")?)?;
//!
//! let writer = Writer::new()
//!     .with_options(WriteOptions::new().transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN));
//! let outcome = writer.to_bytes(&obj);
//! assert!(outcome.success);
//! assert_eq!(&outcome.output[128..132], b"DICM");
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
pub mod diagnostic;
pub mod file;
pub mod meta;
pub mod node;
pub mod read;
pub mod segment;
pub mod tree;
pub mod write;

pub use crate::diagnostic::Diagnostic;
pub use crate::file::{from_bytes, open_file, OpenFileOptions};
pub use crate::node::{DataElement, Item, Node, Sequence};
pub use crate::read::{ReadError, ReadOptions, ReadOutcome, Reader};
pub use crate::segment::{SegmentSink, Sink, StreamSink};
pub use crate::tree::{ChildKey, DicomObject, NodeId, TreeError};
pub use crate::write::{WriteError, WriteOptions, WriteOutcome, Writer};
pub use dcmtree_core::Tag;
pub use dcmtree_dictionary_std::StandardDataDictionary;

use dcmtree_encoding::DecodeValueError;
use snafu::{Backtrace, Snafu};

/// The implementation class UID written to the file meta group.
///
/// Automatically generated as per the standard, part 5, section B.2.
pub const IMPLEMENTATION_CLASS_UID: &str = "2.25.130984950029899771041107395941696826170";

/// The implementation version name written to the file meta group.
pub const IMPLEMENTATION_VERSION_NAME: &str = "DCMTREE 0.1";

/// An error which may occur when looking up a DICOM object's attributes.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum AccessError {
    #[snafu(display("No such data element with tag {}", tag))]
    NoSuchDataElementTag { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Data element {} is not a primitive element", tag))]
    NotAPrimitiveElement { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Could not decode the value of {}", tag))]
    DecodeElement {
        tag: Tag,
        #[snafu(backtrace)]
        source: DecodeValueError,
    },
}

/// An error which may occur when looking up a DICOM object's attributes
/// by a keyword (or alias) instead of by tag.
///
/// These accesses incur a look-up at the data element dictionary,
/// which may fail if no such entry exists.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AccessByNameError {
    #[snafu(display("No such data element {} (with tag {})", alias, tag))]
    NoSuchDataElementAlias {
        tag: Tag,
        alias: String,
        backtrace: Backtrace,
    },

    /// Could not resolve attribute name from the data dictionary
    #[snafu(display("Unknown data attribute named `{}`", name))]
    NoSuchAttributeName { name: String, backtrace: Backtrace },
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmtree_core::VR;
    use dcmtree_dictionary_std::tags;

    #[test]
    fn errors_name_the_tag() {
        let obj = DicomObject::new();
        let e = obj.element(tags::PATIENT_NAME).unwrap_err();
        assert_eq!(e.to_string(), "No such data element with tag (0010,0010)");

        let dict = StandardDataDictionary::new();
        let e = obj.element_by_name("PatientName", &dict).unwrap_err();
        assert_eq!(
            e.to_string(),
            "No such data element PatientName (with tag (0010,0010))"
        );
        let e = obj.element_by_name("NoSuchThing", &dict).unwrap_err();
        assert!(matches!(e, AccessByNameError::NoSuchAttributeName { .. }));
    }

    #[test]
    fn sequences_are_not_primitive() {
        let mut obj = DicomObject::new();
        obj.put(Sequence::new(tags::REFERENCED_IMAGE_SEQUENCE)).unwrap();
        obj.put(DataElement::new(tags::MODALITY, VR::CS, "CT").unwrap())
            .unwrap();
        assert!(matches!(
            obj.element(tags::REFERENCED_IMAGE_SEQUENCE),
            Err(AccessError::NotAPrimitiveElement { .. })
        ));
        let dict = StandardDataDictionary::new();
        assert_eq!(
            obj.element_by_name("Modality", &dict).unwrap().to_str().unwrap(),
            "CT"
        );
    }
}
