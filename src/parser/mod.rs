//! Snapshot loading and the call-graph model.
//!
//! This module handles:
//! - Reading pprof files (gzip or raw protobuf)
//! - Decoding the protobuf profile message
//! - Resolving IDs into samples, locations and frames

pub mod loader;
pub mod proto;
pub mod snapshot;

// Re-export main types
pub use loader::{decode_snapshot, load_snapshot};
pub use snapshot::{Frame, Location, Sample, SampleType, Snapshot};
