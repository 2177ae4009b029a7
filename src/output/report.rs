//! Path length analysis report
//!
//! Lists the invalid and long paths of a scan, longest first, independent of
//! the tree rendering. Available as plain text and as JSON.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::analysis::PathLength;
use crate::document::StructureDocument;
use crate::error::Result;

use super::json::to_string_indented;

const RULE_WIDTH: usize = 50;

/// Serializable report; field names are part of the output format.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_date: DateTime<Local>,
    pub scanned_folder: String,
    pub max_path_length: usize,
    pub total_long_paths: usize,
    pub total_invalid_paths: usize,
    pub windows_path_limit: usize,
    #[serde(skip)]
    pub long_threshold: usize,
    pub long_paths: Vec<PathLength>,
    pub invalid_paths: Vec<PathLength>,
}

impl AnalysisReport {
    pub fn from_document(doc: &StructureDocument) -> Self {
        let summary = doc.summary();
        Self {
            analysis_date: doc.scanned_at(),
            scanned_folder: doc.absolute_root().display().to_string(),
            max_path_length: summary.max_path_length,
            total_long_paths: summary.long_paths.len(),
            total_invalid_paths: summary.invalid_paths.len(),
            windows_path_limit: doc.policy().reported_limit(),
            long_threshold: doc.policy().long_threshold,
            long_paths: summary.long_paths_by_length(),
            invalid_paths: summary.invalid_paths_by_length(),
        }
    }

    pub fn has_problems(&self) -> bool {
        !self.long_paths.is_empty() || !self.invalid_paths.is_empty()
    }
}

/// Write the two sorted path sections; a section is omitted when empty.
pub(crate) fn write_problem_sections(out: &mut String, report: &AnalysisReport) {
    let rule = "-".repeat(RULE_WIDTH);
    if !report.invalid_paths.is_empty() {
        out.push_str("INVALID PATHS (EXCEEDING WINDOWS LIMIT):\n");
        let _ = writeln!(out, "{rule}");
        for p in &report.invalid_paths {
            let _ = writeln!(out, "[{} chars] {}", p.length, p.path.display());
        }
        out.push('\n');
    }
    if !report.long_paths.is_empty() {
        let _ = writeln!(
            out,
            "LONG PATHS (>{} CHARACTERS):",
            report.long_threshold
        );
        let _ = writeln!(out, "{rule}");
        for p in &report.long_paths {
            let _ = writeln!(out, "[{} chars] {}", p.length, p.path.display());
        }
    }
}

/// Plain text report.
pub fn to_report_text(doc: &StructureDocument) -> String {
    let report = AnalysisReport::from_document(doc);
    let mut out = String::new();

    out.push_str("PATH LENGTH ANALYSIS REPORT\n");
    let _ = writeln!(out, "{}\n", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Analysis Date: {}", report.analysis_date.to_rfc3339());
    let _ = writeln!(out, "Scanned Folder: {}", report.scanned_folder);
    let _ = writeln!(
        out,
        "Maximum Path Length: {} characters",
        report.max_path_length
    );
    let _ = writeln!(
        out,
        "Long Paths (>{} chars): {}",
        report.long_threshold, report.total_long_paths
    );
    let _ = writeln!(
        out,
        "Invalid Paths (>{} chars): {}\n",
        report.windows_path_limit, report.total_invalid_paths
    );

    write_problem_sections(&mut out, &report);
    out
}

/// JSON report.
pub fn to_report_json(doc: &StructureDocument) -> Result<String> {
    to_string_indented(&AnalysisReport::from_document(doc), b"  ")
}
