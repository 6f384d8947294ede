//! Line-oriented text report.
//!
//! One line per ranked type:
//! `(*Pod) 2.00 KB: alloc obj 10 alloc space 2048 / inuse obj 5 inuse space 1024`

use crate::aggregator::{RankMetric, RankedEntry, ScanStats};
use std::io::{self, Write};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with a binary unit suffix
///
/// **Public** - always two decimals, e.g. `512.00 B`, `1.50 KB`
pub fn format_bytes(bytes: i64) -> String {
    let mut value = bytes.unsigned_abs() as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let sign = if bytes < 0 { "-" } else { "" };
    format!("{}{:.2} {}", sign, value, BYTE_UNITS[unit])
}

/// Format an object count
pub fn format_count(count: i64) -> String {
    format!("{} objs", count)
}

/// Human-readable value of the rank metric
pub fn human_size(entry: &RankedEntry, metric: RankMetric) -> String {
    let value = metric.value(&entry.measurements);
    if metric.is_bytes() {
        format_bytes(value)
    } else {
        format_count(value)
    }
}

/// Format one report line
pub fn format_entry(entry: &RankedEntry, metric: RankMetric) -> String {
    let m = &entry.measurements;
    format!(
        "{} {}: alloc obj {} alloc space {} / inuse obj {} inuse space {}",
        entry.type_name,
        human_size(entry, metric),
        m.alloc_objects,
        m.alloc_space,
        m.inuse_objects,
        m.inuse_space
    )
}

/// Write one line per entry, in the given order
///
/// **Public** - main entry point for text output
pub fn write_text_report<W: Write>(
    writer: &mut W,
    entries: &[RankedEntry],
    metric: RankMetric,
) -> io::Result<()> {
    for entry in entries {
        writeln!(writer, "{}", format_entry(entry, metric))?;
    }
    Ok(())
}

/// Totals footer for `--summary`
pub fn format_summary(stats: &ScanStats, metric: RankMetric) -> String {
    let total = &stats.attributed_total;
    let mut lines = Vec::new();

    lines.push("=".repeat(72));
    lines.push(format!(
        "{} types from {} samples ({} of {} candidate frames attributed)",
        stats.type_count, stats.samples_scanned, stats.attributed_frames, stats.candidate_frames
    ));
    lines.push(format!(
        "Total alloc: {} in {} objects",
        format_bytes(total.alloc_space),
        total.alloc_objects
    ));
    lines.push(format!(
        "Total inuse: {} in {} objects",
        format_bytes(total.inuse_space),
        total.inuse_objects
    ));
    lines.push(format!("Ranked by {}", metric.label()));
    lines.push("=".repeat(72));

    lines.join("\n")
}
