//! Attribution of snapshot samples to deserialized types.
//!
//! This module transforms a decoded snapshot into:
//! - Candidate frame detection (symbol filter)
//! - Receiver type extraction
//! - Per-type accumulated measurements, ranked by a primary metric

pub mod attribution;
pub mod metrics;
pub mod symbol;

// Re-export main types and functions
pub use attribution::{attribute_snapshot, Attribution, CountingMode, RankedEntry, TypeAccumulator};
pub use metrics::{Measurements, RankMetric, ScanStats};
pub use symbol::{MatchConfig, MatchMode, SymbolMatch, SymbolMatcher};
