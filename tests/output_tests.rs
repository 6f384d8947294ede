use pretty_assertions::assert_eq;
use std::path::Path;
use unmarshal_heap::aggregator::{
    Attribution, CountingMode, MatchMode, Measurements, RankMetric, RankedEntry, ScanStats,
};
use unmarshal_heap::output::{
    format_bytes, format_entry, format_summary, read_report_json, to_report_document,
    write_report_json, write_text_report, ReportSettings,
};
use unmarshal_heap::parser::{SampleType, Snapshot};

fn entry(name: &str, m: Measurements) -> RankedEntry {
    RankedEntry {
        type_name: name.to_string(),
        measurements: m,
    }
}

#[test]
fn test_format_entry_line() {
    let line = format_entry(
        &entry("(*Pod)", Measurements::new(10, 2048, 5, 1024)),
        RankMetric::AllocSpace,
    );
    assert_eq!(
        line,
        "(*Pod) 2.00 KB: alloc obj 10 alloc space 2048 / inuse obj 5 inuse space 1024"
    );
}

#[test]
fn test_human_size_follows_metric() {
    let e = entry("(*Pod)", Measurements::new(10, 2048, 5, 3 * 1024 * 1024));
    assert!(format_entry(&e, RankMetric::InuseSpace).starts_with("(*Pod) 3.00 MB:"));
    assert!(format_entry(&e, RankMetric::AllocObjects).starts_with("(*Pod) 10 objs:"));
}

#[test]
fn test_format_bytes_two_decimals() {
    assert_eq!(format_bytes(1024 * 1024 + 512 * 1024), "1.50 MB");
    assert_eq!(format_bytes(1023), "1023.00 B");
}

#[test]
fn test_write_text_report_one_line_per_entry() {
    let entries = vec![
        entry("(*Node)", Measurements::new(2, 4096, 1, 10)),
        entry("(*Pod)", Measurements::new(1, 1024, 1, 10)),
    ];
    let mut out = Vec::new();

    write_text_report(&mut out, &entries, RankMetric::AllocSpace).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("(*Node) 4.00 KB"));
    assert!(lines[1].starts_with("(*Pod) 1.00 KB"));
}

#[test]
fn test_write_text_report_empty() {
    let mut out = Vec::new();
    write_text_report(&mut out, &[], RankMetric::AllocSpace).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_format_summary() {
    let stats = ScanStats {
        samples_scanned: 4,
        candidate_frames: 3,
        attributed_frames: 2,
        type_count: 2,
        attributed_total: Measurements::new(3, 3072, 1, 1024),
        ..Default::default()
    };

    let summary = format_summary(&stats, RankMetric::AllocSpace);

    assert!(summary.contains("2 types from 4 samples (2 of 3 candidate frames attributed)"));
    assert!(summary.contains("Total alloc: 3.00 KB in 3 objects"));
    assert!(summary.contains("Total inuse: 1.00 KB in 1 objects"));
    assert!(summary.contains("Ranked by alloc space"));
}

#[test]
fn test_json_report_roundtrip() {
    let attribution = Attribution {
        entries: vec![entry("(*Pod)", Measurements::new(10, 2048, 5, 1024))],
        stats: ScanStats {
            samples_scanned: 1,
            type_count: 1,
            ..Default::default()
        },
    };
    let settings = ReportSettings {
        match_mode: MatchMode::Permissive,
        counting: CountingMode::PerSample,
        rank_by: RankMetric::InuseSpace,
    };
    let snapshot = Snapshot {
        sample_types: ["alloc_objects", "alloc_space"]
            .iter()
            .map(|name| SampleType {
                name: name.to_string(),
                unit: "count".to_string(),
            })
            .collect(),
        time_nanos: 1_700_000_000_000_000_000,
        duration_nanos: 30_000_000_000,
        ..Default::default()
    };
    let report = to_report_document(Path::new("heap.pb.gz"), &snapshot, &attribution, settings);

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("report.json");
    write_report_json(&report, &path).unwrap();
    let loaded = read_report_json(&path).unwrap();

    assert_eq!(loaded.source, "heap.pb.gz");
    assert_eq!(loaded.sample_types, vec!["alloc_objects", "alloc_space"]);
    assert_eq!(loaded.collected_at.as_deref(), Some("2023-11-14T22:13:20+00:00"));
    assert_eq!(loaded.duration_nanos, 30_000_000_000);
    assert_eq!(loaded.match_mode, MatchMode::Permissive);
    assert_eq!(loaded.counting, CountingMode::PerSample);
    assert_eq!(loaded.rank_by, RankMetric::InuseSpace);
    assert_eq!(loaded.entries, report.entries);
    assert_eq!(loaded.entries[0].size, 1024);
    assert_eq!(loaded.entries[0].human_size, "1.00 KB");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"rank_by\": \"inuse-space\""));
    assert!(raw.contains("\"match_mode\": \"permissive\""));
}

#[test]
fn test_read_report_json_missing() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(read_report_json(temp_dir.path().join("missing.json")).is_err());
}
