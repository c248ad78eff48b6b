//! Error types for the storage crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting or reading submissions
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error while touching the backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A submission could not be encoded
    #[error("Failed to serialize submission: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored line could not be decoded
    #[error("Corrupt record at line {line} in {path}: {reason}")]
    CorruptRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
