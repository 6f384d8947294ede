//! Snapshot loader.
//!
//! Reads a pprof file from disk, transparently gunzips it, decodes the
//! protobuf payload and resolves it into a [`Snapshot`].

use super::proto;
use super::snapshot::Snapshot;
use crate::utils::config::GZIP_MAGIC;
use crate::utils::error::{DecodeError, LoadError};
use flate2::read::MultiGzDecoder;
use log::{debug, info};
use prost::Message;
use std::io::Read;
use std::path::Path;

/// Load a snapshot from a file
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `path` - Snapshot file, relative paths resolve against the current directory
///
/// # Errors
/// * `LoadError::Io` - file cannot be read
/// * `LoadError::Decode` - bytes are not a well-formed profile
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot, LoadError> {
    let path = path.as_ref();

    debug!("Reading snapshot from: {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(decode_snapshot(&bytes)?)
}

/// Decode snapshot bytes (gzip-compressed or raw protobuf)
///
/// **Public** - useful for in-memory profiles and tests
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let profile = if bytes.starts_with(&GZIP_MAGIC) {
        let payload = gunzip(bytes)?;
        debug!("Decompressed {} bytes to {}", bytes.len(), payload.len());
        proto::Profile::decode(payload.as_slice())?
    } else {
        proto::Profile::decode(bytes)?
    };

    debug!(
        "Decoded profile: {} samples, {} locations, {} functions, {} strings",
        profile.sample.len(),
        profile.location.len(),
        profile.function.len(),
        profile.string_table.len()
    );

    Snapshot::from_proto(profile)
}

/// Decompress a gzip stream, including every concatenated member
///
/// **Private** - internal helper for decode_snapshot
fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut payload = Vec::new();
    MultiGzDecoder::new(bytes)
        .read_to_end(&mut payload)
        .map_err(DecodeError::Decompress)?;
    Ok(payload)
}
