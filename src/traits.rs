//! Traits for reading translation files in po-catalog.

use std::{
    io::{BufRead, Cursor},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing one translation file.
///
/// # Example
///
/// ```rust,no_run
/// use po_catalog::traits::Parser;
/// let format = po_catalog::formats::po::Format::read_from("fr.po")?;
/// println!("{} records for {}", format.records.len(), format.language);
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
