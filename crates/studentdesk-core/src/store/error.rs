//! Errors reported by the student store

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during store operations
///
/// A missing data file is not an error: it loads as an empty table.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Student table is full ({capacity} records)")]
    CapacityExceeded { capacity: usize },

    #[error("Position {position} out of range (table holds {len} records)")]
    IndexOutOfRange { position: usize, len: usize },

    #[error("Corrupt data file {}: {reason}", path.display())]
    CorruptData { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type used throughout the store
pub type Result<T> = std::result::Result<T, StoreError>;
