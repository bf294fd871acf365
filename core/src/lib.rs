#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of dcmtree, containing the concepts and
//! data structures shared by the DICOM codec crates.
//!
//! - [`header`] comprises the data types of a DICOM element header:
//!   tags, value representations and value lengths.
//! - [`dictionary`] describes the contract of a DICOM data dictionary,
//!   which translates tags to attribute names and typical VRs,
//!   with the fallback rules applied to tags it does not know.
//! - [`value`] holds the primitive value type of DICOM elements,
//!   aware of value multiplicity.

pub mod dictionary;
pub mod header;
pub mod value;

pub use dictionary::{DataDictionary, DataDictionaryEntry, ElementInfo, TagRange};
pub use header::{HasLength, Length, Tag, VR};
pub use value::{PrimitiveValue, C};

// re-export crates that are part of the public API
pub use smallvec;
