//! Unmarshal Heap CLI
//!
//! Ranks the memory allocated under `Unmarshal` methods of data-model
//! types in a pprof heap profile.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::io::Write;
use std::path::PathBuf;

use unmarshal_heap::aggregator::{CountingMode, MatchMode, RankMetric};
use unmarshal_heap::commands::{execute_report, validate_args, ReportArgs};
use unmarshal_heap::utils::config::{DEFAULT_ENTRY_POINT, DEFAULT_FAMILY_PATH, DEFAULT_FAMILY_ROOT};

/// Unmarshal Heap - attribute heap memory to deserialized types
#[derive(Parser, Debug)]
#[command(name = "unmarshal-heap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Heap profile (pprof, gzip or raw protobuf)
    file: PathBuf,

    /// Family filter: first component must match (strict) or path may appear anywhere (permissive)
    #[arg(long = "match", value_enum, default_value_t = MatchMode::Strict)]
    match_mode: MatchMode,

    /// Deserialization entry-point method name
    #[arg(long, default_value = DEFAULT_ENTRY_POINT)]
    entry_point: String,

    /// Family root identifier (strict matching)
    #[arg(long, default_value = DEFAULT_FAMILY_ROOT)]
    family_root: String,

    /// Family path substring (permissive matching)
    #[arg(long, default_value = DEFAULT_FAMILY_PATH)]
    family_path: String,

    /// Metric used to rank types
    #[arg(long, value_enum, default_value_t = RankMetric::AllocSpace)]
    rank_by: RankMetric,

    /// Count a sample at most once per type
    #[arg(long)]
    per_sample: bool,

    /// Print only the top N types
    #[arg(long)]
    top: Option<usize>,

    /// Also write a JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print a totals footer
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_report_args(self) -> ReportArgs {
        ReportArgs {
            input: self.file,
            match_mode: self.match_mode,
            entry_point: self.entry_point,
            family_root: self.family_root,
            family_path: self.family_path,
            rank_by: self.rank_by,
            counting: if self.per_sample {
                CountingMode::PerSample
            } else {
                CountingMode::PerFrame
            },
            top: self.top,
            output_json: self.json,
            print_summary: self.summary,
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = cli.into_report_args();

    // Validate args first
    validate_args(&args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_report(&args, &mut out)?;
    out.flush()?;

    Ok(())
}
