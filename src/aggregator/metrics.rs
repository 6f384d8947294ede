//! Measurement records and the metrics used to rank them.
//!
//! A heap profile sample carries four values in a fixed order:
//! allocated objects, allocated bytes, in-use objects, in-use bytes.
//! `Measurements` names those slots so ranking never depends on positions.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Named measurement slots of one sample (or a sum of samples)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    /// Objects allocated
    pub alloc_objects: i64,

    /// Bytes allocated
    pub alloc_space: i64,

    /// Objects still in use
    pub inuse_objects: i64,

    /// Bytes still in use
    pub inuse_space: i64,
}

impl Measurements {
    pub fn new(alloc_objects: i64, alloc_space: i64, inuse_objects: i64, inuse_space: i64) -> Self {
        Self {
            alloc_objects,
            alloc_space,
            inuse_objects,
            inuse_space,
        }
    }

    /// Build from a sample's value vector in heap-profile slot order
    ///
    /// **Public** - missing trailing slots read as 0, extra slots are ignored
    pub fn from_values(values: &[i64]) -> Self {
        let slot = |i: usize| values.get(i).copied().unwrap_or(0);
        Self::new(slot(0), slot(1), slot(2), slot(3))
    }
}

impl AddAssign for Measurements {
    fn add_assign(&mut self, rhs: Self) {
        self.alloc_objects = self.alloc_objects.saturating_add(rhs.alloc_objects);
        self.alloc_space = self.alloc_space.saturating_add(rhs.alloc_space);
        self.inuse_objects = self.inuse_objects.saturating_add(rhs.inuse_objects);
        self.inuse_space = self.inuse_space.saturating_add(rhs.inuse_space);
    }
}

/// Primary metric used to rank accumulated entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RankMetric {
    #[default]
    AllocSpace,
    AllocObjects,
    InuseSpace,
    InuseObjects,
}

impl RankMetric {
    /// Select the metric's field
    pub fn value(&self, m: &Measurements) -> i64 {
        match self {
            RankMetric::AllocSpace => m.alloc_space,
            RankMetric::AllocObjects => m.alloc_objects,
            RankMetric::InuseSpace => m.inuse_space,
            RankMetric::InuseObjects => m.inuse_objects,
        }
    }

    /// True if the metric is measured in bytes
    pub fn is_bytes(&self) -> bool {
        matches!(self, RankMetric::AllocSpace | RankMetric::InuseSpace)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankMetric::AllocSpace => "alloc space",
            RankMetric::AllocObjects => "alloc objects",
            RankMetric::InuseSpace => "inuse space",
            RankMetric::InuseObjects => "inuse objects",
        }
    }
}

/// Counters collected during one attribution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Samples walked
    pub samples_scanned: usize,

    /// Frames walked across all samples
    pub frames_scanned: usize,

    /// Frames passing the symbol filter
    pub candidate_frames: usize,

    /// Candidate frames with an accepted receiver type
    pub attributed_frames: usize,

    /// Distinct receiver types
    pub type_count: usize,

    /// Sum of every contribution added to an accumulator
    pub attributed_total: Measurements,
}

impl ScanStats {
    /// Share of candidate frames that yielded a type, in percent
    pub fn attribution_rate(&self) -> f64 {
        if self.candidate_frames == 0 {
            0.0
        } else {
            (self.attributed_frames as f64 / self.candidate_frames as f64) * 100.0
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Samples: {} | Frames: {} | Candidates: {} | Attributed: {} ({:.1}%) | Types: {}",
            self.samples_scanned,
            self.frames_scanned,
            self.candidate_frames,
            self.attributed_frames,
            self.attribution_rate(),
            self.type_count
        )
    }
}
