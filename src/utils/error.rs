//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a snapshot from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode snapshot: {0}")]
    Decode(#[from] DecodeError),
}

/// Errors that can occur while decoding snapshot bytes
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Snapshot is empty")]
    Empty,

    #[error("Gzip decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Malformed profile protobuf: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("String table must start with an empty string")]
    StringTable,

    #[error("String index {index} out of range (table has {len} entries)")]
    StringIndex { index: i64, len: usize },

    #[error("Multiple {kind}s with ID {id}")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error("{kind} uses reserved ID 0")]
    ReservedId { kind: &'static str },

    #[error("Location ID {0} not found")]
    MissingLocation(u64),

    #[error("Function ID {0} not found")]
    MissingFunction(u64),

    #[error("Sample {sample} has {found} values, expected {expected}")]
    ValueCount {
        sample: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
