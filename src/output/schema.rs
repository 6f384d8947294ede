//! JSON report schema.
//!
//! This module defines the structure of the JSON report written by `--json`.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{CountingMode, MatchMode, Measurements, RankMetric, ScanStats};
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Snapshot file the report was built from
    pub source: String,

    /// Sample type names declared by the snapshot
    pub sample_types: Vec<String>,

    /// When the snapshot was collected (RFC 3339), absent if the profile has no time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<String>,

    /// Collection duration recorded in the snapshot
    #[serde(default)]
    pub duration_nanos: i64,

    pub match_mode: MatchMode,
    pub counting: CountingMode,
    pub rank_by: RankMetric,

    pub stats: ScanStats,

    /// Ranked entries, highest first
    pub entries: Vec<ReportEntry>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One ranked type in the JSON report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub type_name: String,

    /// Value of the rank metric
    pub size: i64,

    /// Rank metric rendered for humans (e.g. "2.00 KB")
    pub human_size: String,

    pub measurements: Measurements,
}
