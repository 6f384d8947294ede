//! Report command implementation.
//!
//! The report command:
//! 1. Loads the snapshot
//! 2. Attributes samples to deserialized types
//! 3. Writes the ranked report (and optional JSON)

use super::models::ReportArgs;
use crate::aggregator::{attribute_snapshot, Attribution, SymbolMatcher};
use crate::output::{format_summary, to_report_document, write_report_json, write_text_report, ReportSettings};
use crate::parser::load_snapshot;
use crate::utils::config::SYMBOL_SEPARATOR;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::Write;
use std::time::Instant;

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Report command arguments
/// * `out` - Destination of the report lines (stdout in the CLI)
///
/// # Returns
/// The full ranked attribution (before `--top` truncation)
///
/// # Errors
/// * Snapshot read or decode failures
/// * Write failures on `out` or the JSON report
pub fn execute_report<W: Write>(args: &ReportArgs, out: &mut W) -> Result<Attribution> {
    let start_time = Instant::now();

    info!("Starting report for snapshot: {}", args.input.display());

    // Step 1: Load snapshot
    info!("Step 1/3: Loading snapshot...");
    let snapshot = load_snapshot(&args.input)
        .with_context(|| format!("Failed to load snapshot {}", args.input.display()))?;

    debug!(
        "Loaded snapshot: {} samples, {} frames",
        snapshot.samples.len(),
        snapshot.frame_count()
    );

    if !snapshot.samples.is_empty() && !snapshot.is_heap_layout() {
        warn!(
            "Sample types {:?} do not look like a heap profile, values are read as alloc/inuse slots",
            snapshot
                .sample_types
                .iter()
                .map(|st| st.name.as_str())
                .collect::<Vec<_>>()
        );
    }

    // Step 2: Attribute
    info!("Step 2/3: Attributing samples to types...");
    let matcher = SymbolMatcher::new(args.match_config());
    let attribution = attribute_snapshot(&snapshot, &matcher, args.counting, args.rank_by);

    info!("Attribution: {}", attribution.stats.summary());

    // Step 3: Write outputs
    info!("Step 3/3: Writing report...");
    let shown = match args.top {
        Some(n) => &attribution.entries[..n.min(attribution.entries.len())],
        None => &attribution.entries[..],
    };

    write_text_report(out, shown, args.rank_by).context("Failed to write report")?;

    if args.print_summary {
        writeln!(out, "{}", format_summary(&attribution.stats, args.rank_by))
            .context("Failed to write summary")?;
    }

    if let Some(json_path) = &args.output_json {
        let settings = ReportSettings {
            match_mode: args.match_mode,
            counting: args.counting,
            rank_by: args.rank_by,
        };
        let document = to_report_document(&args.input, &snapshot, &attribution, settings);

        write_report_json(&document, json_path).context("Failed to write JSON report")?;

        info!("✓ JSON report written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(attribution)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Snapshot path cannot be empty");
    }

    if args.entry_point.is_empty() {
        anyhow::bail!("Entry point cannot be empty");
    }

    if args.entry_point.contains(SYMBOL_SEPARATOR) {
        anyhow::bail!("Entry point must be a single symbol component (no '.')");
    }

    if args.family_root.is_empty() {
        anyhow::bail!("Family root cannot be empty");
    }

    if args.family_root.contains(SYMBOL_SEPARATOR) {
        anyhow::bail!("Family root must be a single symbol component (no '.')");
    }

    if args.family_path.is_empty() {
        anyhow::bail!("Family path cannot be empty");
    }

    if args.top == Some(0) {
        anyhow::bail!("top must be greater than 0");
    }

    Ok(())
}
