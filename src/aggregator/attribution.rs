//! Attribute sample measurements to deserialized types.
//!
//! Every frame of every sample is run through the [`SymbolMatcher`]. A frame
//! that names a receiver type adds its sample's measurements to that type's
//! running total. The totals are then ranked by a [`RankMetric`].

use super::metrics::{Measurements, RankMetric, ScanStats};
use super::symbol::SymbolMatcher;
use crate::parser::{Sample, Snapshot};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How often one sample may contribute to the same type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountingMode {
    /// Once per matching frame; recursive chains count the sample repeatedly
    #[default]
    PerFrame,
    /// At most once per sample and type
    PerSample,
}

/// A ranked (type, accumulated measurements) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Receiver as written in the symbol, e.g. `(*Pod)`
    pub type_name: String,
    pub measurements: Measurements,
}

/// Result of attributing a whole snapshot
#[derive(Debug, Clone, Default)]
pub struct Attribution {
    /// Entries sorted by the rank metric, highest first
    pub entries: Vec<RankedEntry>,
    pub stats: ScanStats,
}

/// Running per-type totals
///
/// **Public** - feed samples with `add_sample`, then rank with `into_ranked`
#[derive(Debug)]
pub struct TypeAccumulator<'m> {
    matcher: &'m SymbolMatcher,
    counting: CountingMode,
    totals: HashMap<String, Measurements>,
    stats: ScanStats,
}

impl<'m> TypeAccumulator<'m> {
    pub fn new(matcher: &'m SymbolMatcher, counting: CountingMode) -> Self {
        Self {
            matcher,
            counting,
            totals: HashMap::new(),
            stats: ScanStats::default(),
        }
    }

    /// Walk one sample's stack and add its measurements to every attributed type
    pub fn add_sample(&mut self, sample: &Sample) {
        let values = Measurements::from_values(&sample.values);
        let mut seen: HashSet<&str> = HashSet::new();

        self.stats.samples_scanned += 1;

        for frame in sample.frames() {
            self.stats.frames_scanned += 1;

            let Some(symbol) = self.matcher.match_symbol(&frame.function_name) else {
                continue;
            };
            self.stats.candidate_frames += 1;

            let Some(type_name) = symbol.receiver else {
                continue;
            };
            self.stats.attributed_frames += 1;

            if self.counting == CountingMode::PerSample && !seen.insert(type_name) {
                continue;
            }

            self.accumulate(type_name, values);
        }
    }

    fn accumulate(&mut self, type_name: &str, values: Measurements) {
        // First occurrence is assigned, later ones are summed
        match self.totals.get_mut(type_name) {
            Some(existing) => *existing += values,
            None => {
                self.totals.insert(type_name.to_string(), values);
            }
        }
        self.stats.attributed_total += values;
    }

    /// Current totals keyed by type name
    pub fn totals(&self) -> &HashMap<String, Measurements> {
        &self.totals
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Freeze the totals into a ranked sequence
    ///
    /// Sorted by `metric`, highest first; equal metrics fall back to
    /// type name order so the output is stable across runs.
    pub fn into_ranked(self, metric: RankMetric) -> Attribution {
        let mut stats = self.stats;
        stats.type_count = self.totals.len();

        let mut entries: Vec<RankedEntry> = self
            .totals
            .into_iter()
            .map(|(type_name, measurements)| RankedEntry {
                type_name,
                measurements,
            })
            .collect();

        entries.sort_by(|a, b| {
            metric
                .value(&b.measurements)
                .cmp(&metric.value(&a.measurements))
                .then_with(|| a.type_name.cmp(&b.type_name))
        });

        Attribution { entries, stats }
    }
}

/// Attribute every sample of a snapshot and rank the result
///
/// **Public** - main entry point for attribution
///
/// # Arguments
/// * `snapshot` - Decoded snapshot
/// * `matcher` - Symbol filter and receiver extraction
/// * `counting` - Per-frame or per-sample counting
/// * `metric` - Primary metric for ranking
pub fn attribute_snapshot(
    snapshot: &Snapshot,
    matcher: &SymbolMatcher,
    counting: CountingMode,
    metric: RankMetric,
) -> Attribution {
    debug!(
        "Attributing {} samples ({:?} matching, {:?} counting)",
        snapshot.samples.len(),
        matcher.config().mode,
        counting
    );

    let mut accumulator = TypeAccumulator::new(matcher, counting);
    for sample in &snapshot.samples {
        accumulator.add_sample(sample);
    }

    let attribution = accumulator.into_ranked(metric);

    debug!("Attribution: {}", attribution.stats.summary());

    attribution
}
