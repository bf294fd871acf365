use crate::read::{ReadOptions, ReadOutcome, Reader};
use dcmtree_core::DataDictionary;
use dcmtree_dictionary_std::StandardDataDictionary;
use dcmtree_encoding::transfer_syntax::TransferSyntaxIndex;
use dcmtree_transfer_syntax_registry::TransferSyntaxRegistry;
use std::path::Path;

/// Read a DICOM object from a file.
///
/// The file is expected to start with the 128-byte preamble
/// and the `DICM` signature,
/// but a bare data set is also accepted.
pub fn open_file<P>(path: P) -> ReadOutcome
where
    P: AsRef<Path>,
{
    OpenFileOptions::new().open_file(path)
}

/// Read a DICOM object from a byte buffer.
pub fn from_bytes(data: &[u8]) -> ReadOutcome {
    OpenFileOptions::new().from_bytes(data)
}

/// A builder type for reading a DICOM object with additional options.
///
/// # Example
///
/// ```no_run
/// # use dcmtree_object::OpenFileOptions;
/// let outcome = OpenFileOptions::new()
///     .max_depth(16)
///     .require_signature()
///     .open_file("path/to/file.dcm");
/// if !outcome.success {
///     for d in &outcome.diagnostics {
///         eprintln!("{}", d);
///     }
/// }
/// ```
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct OpenFileOptions<D = StandardDataDictionary, T = TransferSyntaxRegistry> {
    data_dictionary: D,
    ts_index: T,
    read: ReadOptions,
}

impl OpenFileOptions {
    pub fn new() -> Self {
        OpenFileOptions::default()
    }
}

impl<D, T> OpenFileOptions<D, T> {
    /// Read the data set with the given transfer syntax,
    /// whatever the meta group says.
    pub fn transfer_syntax(mut self, uid: impl Into<String>) -> Self {
        self.read = self.read.transfer_syntax(uid);
        self
    }

    /// Set the maximum nesting depth of sequences and items.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.read = self.read.max_depth(max_depth);
        self
    }

    /// Fail on a missing `DICM` signature.
    pub fn require_signature(mut self) -> Self {
        self.read = self.read.require_signature();
        self
    }

    /// Replace all reading options at once.
    pub fn read_options(mut self, options: ReadOptions) -> Self {
        self.read = options;
        self
    }

    /// Use a different data dictionary.
    pub fn dictionary<D2>(self, dict: D2) -> OpenFileOptions<D2, T> {
        OpenFileOptions {
            data_dictionary: dict,
            ts_index: self.ts_index,
            read: self.read,
        }
    }

    /// Use a different transfer syntax index.
    pub fn transfer_syntax_index<T2>(self, ts_index: T2) -> OpenFileOptions<D, T2> {
        OpenFileOptions {
            data_dictionary: self.data_dictionary,
            ts_index,
            read: self.read,
        }
    }

    fn into_reader(self) -> Reader<D, T> {
        Reader::new_with(self.data_dictionary, self.ts_index).with_options(self.read)
    }
}

impl<D, T> OpenFileOptions<D, T>
where
    D: DataDictionary,
    T: TransferSyntaxIndex,
{
    /// Read a DICOM object from a file.
    pub fn open_file<P>(self, path: P) -> ReadOutcome
    where
        P: AsRef<Path>,
    {
        self.into_reader().read_file(path)
    }

    /// Read a DICOM object from a byte buffer.
    pub fn from_bytes(self, data: &[u8]) -> ReadOutcome {
        self.into_reader().read(data)
    }
}
