//! Exporting scan results
//!
//! This module renders a `StructureDocument` in several formats:
//! - Plain indented text
//! - HTML (outline in `<pre>` or nested lists)
//! - JSON (rendered lines or nested mapping)
//! - Path length analysis report (text or JSON)
//! - Colored console output
//!
//! Every renderer is a pure function of the document. `export_to_file`
//! renders fully in memory before committing the result to disk.

mod config;
mod console;
mod html;
mod json;
mod report;
mod text;
mod writer;

use std::io;
use std::path::Path;

use crate::document::StructureDocument;
use crate::error::{Error, Result};

pub use config::OutputConfig;
pub use console::ConsoleFormatter;
pub use html::{escape_html, to_html, to_nested_html};
pub use json::{JsonAnalysis, to_json, to_nested_json};
pub use report::{AnalysisReport, to_report_json, to_report_text};
pub use text::{INDENT, render_line, render_lines, to_text};
pub use writer::write_atomic;

/// Artifact formats that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Html,
    NestedHtml,
    Json,
    NestedJson,
    Report,
    ReportJson,
}

impl ExportFormat {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text | ExportFormat::Report => "txt",
            ExportFormat::Html | ExportFormat::NestedHtml => "html",
            ExportFormat::Json | ExportFormat::NestedJson | ExportFormat::ReportJson => "json",
        }
    }
}

/// Render `doc` in the requested format.
pub fn render(doc: &StructureDocument, format: ExportFormat, config: &OutputConfig) -> Result<String> {
    Ok(match format {
        ExportFormat::Text => to_text(doc, config),
        ExportFormat::Html => to_html(doc, config),
        ExportFormat::NestedHtml => to_nested_html(doc),
        ExportFormat::Json => to_json(doc, config)?,
        ExportFormat::NestedJson => to_nested_json(doc)?,
        ExportFormat::Report => to_report_text(doc),
        ExportFormat::ReportJson => to_report_json(doc)?,
    })
}

/// Render `doc` and commit it to `dest`.
///
/// Every failure, including one while encoding, is reported as
/// `Error::ExportFailed` for `dest`.
pub fn export_to_file(
    doc: &StructureDocument,
    format: ExportFormat,
    config: &OutputConfig,
    dest: &Path,
) -> Result<()> {
    let contents = render(doc, format, config).map_err(|e| match e {
        Error::Serialize(source) => Error::export_failed(dest, io::Error::other(source)),
        other => other,
    })?;
    write_atomic(dest, &contents)
}
