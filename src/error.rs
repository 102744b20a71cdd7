//! All error types for the po-catalog crate.
//!
//! Only loading can fail. Query misses are reported through
//! [`crate::catalog::LookupMiss`] instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read translation directory `{}`: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a directory error for `path`.
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Directory {
            path: path.into(),
            source,
        }
    }
}
