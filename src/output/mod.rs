//! Output writers for attribution results.
//!
//! This module handles:
//! - Text report lines (stdout)
//! - JSON reports
//! - Human-readable byte sizes

pub mod json;
pub mod schema;
pub mod text;

// Re-export main functions
pub use json::{read_report_json, to_report_document, write_report_json, ReportSettings};
pub use schema::{ReportDocument, ReportEntry};
pub use text::{format_bytes, format_entry, format_summary, write_text_report};
