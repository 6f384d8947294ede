use crate::aggregator::{CountingMode, MatchConfig, MatchMode, RankMetric};
use crate::utils::config::{DEFAULT_ENTRY_POINT, DEFAULT_FAMILY_PATH, DEFAULT_FAMILY_ROOT};
use std::path::PathBuf;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Snapshot file to analyse
    pub input: PathBuf,

    /// Family filter variant
    pub match_mode: MatchMode,

    /// Deserialization entry-point method name
    pub entry_point: String,

    /// Family root identifier (strict matching)
    pub family_root: String,

    /// Family path substring (permissive matching)
    pub family_path: String,

    /// Primary metric for ranking
    pub rank_by: RankMetric,

    /// Per-frame or per-sample counting
    pub counting: CountingMode,

    /// Print only the top N entries (None = all)
    pub top: Option<usize>,

    /// Also write a JSON report here
    pub output_json: Option<PathBuf>,

    /// Print a totals footer after the report lines
    pub print_summary: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            match_mode: MatchMode::Strict,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            family_root: DEFAULT_FAMILY_ROOT.to_string(),
            family_path: DEFAULT_FAMILY_PATH.to_string(),
            rank_by: RankMetric::AllocSpace,
            counting: CountingMode::PerFrame,
            top: None,
            output_json: None,
            print_summary: false,
        }
    }
}

impl ReportArgs {
    /// Symbol matching configuration for these arguments
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            entry_point: self.entry_point.clone(),
            family_root: self.family_root.clone(),
            family_path: self.family_path.clone(),
            mode: self.match_mode,
        }
    }
}
