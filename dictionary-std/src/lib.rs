//! This crate implements the standard DICOM data element dictionary
//! and constants.
//!
//! - [`data_element`] contains the attribute records
//!   and [`StandardDataDictionary`], an immutable index over them,
//!   constructed explicitly and passed to whatever needs it.
//!   When not using private tags, this dictionary should suffice.
//!
//! The following modules contain constant declarations,
//! which perform an equivalent mapping at compile time,
//! thus without incurring a look-up cost:
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
//! - [`uids`], for various normative DICOM unique identifiers
pub mod data_element;
mod entries;
pub mod tags;
pub mod uids;

pub use data_element::StandardDataDictionary;
