//! JSON report writer.
//!
//! Writes ReportDocument structs to JSON files with proper formatting.

use super::schema::{ReportDocument, ReportEntry};
use super::text::human_size;
use crate::aggregator::{Attribution, CountingMode, MatchMode, RankMetric};
use crate::parser::Snapshot;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Settings a report was produced with
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportSettings {
    pub match_mode: MatchMode,
    pub counting: CountingMode,
    pub rank_by: RankMetric,
}

/// Convert an attribution result to the JSON report format
///
/// **Public** - used by commands to create final output
pub fn to_report_document(
    source: &Path,
    snapshot: &Snapshot,
    attribution: &Attribution,
    settings: ReportSettings,
) -> ReportDocument {
    let entries = attribution
        .entries
        .iter()
        .map(|entry| ReportEntry {
            type_name: entry.type_name.clone(),
            size: settings.rank_by.value(&entry.measurements),
            human_size: human_size(entry, settings.rank_by),
            measurements: entry.measurements,
        })
        .collect();

    ReportDocument {
        version: REPORT_SCHEMA_VERSION.to_string(),
        source: source.display().to_string(),
        sample_types: snapshot
            .sample_types
            .iter()
            .map(|st| st.name.clone())
            .collect(),
        collected_at: collection_time(snapshot.time_nanos),
        duration_nanos: snapshot.duration_nanos,
        match_mode: settings.match_mode,
        counting: settings.counting,
        rank_by: settings.rank_by,
        stats: attribution.stats.clone(),
        entries,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Render a snapshot's collection time as RFC 3339
///
/// **Private** - 0 means the profile did not record a time
fn collection_time(time_nanos: i64) -> Option<String> {
    if time_nanos == 0 {
        return None;
    }
    let secs = time_nanos.div_euclid(1_000_000_000);
    let nanos = time_nanos.rem_euclid(1_000_000_000) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos).map(|t| t.to_rfc3339())
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report_json(
    report: &ReportDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} entries)",
        report.entries.len()
    );

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report_json(input_path: impl AsRef<Path>) -> Result<ReportDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: ReportDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} entries",
        report.version,
        report.entries.len()
    );

    Ok(report)
}
