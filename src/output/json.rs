//! JSON output formatting

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::document::{NestedNode, StructureDocument};
use crate::error::Result;

use super::config::OutputConfig;
use super::text::render_lines;

/// Summary block attached to every structure export.
#[derive(Debug, Clone, Serialize)]
pub struct JsonAnalysis {
    pub max_path_length: usize,
    pub long_paths_count: usize,
    pub invalid_paths_count: usize,
    pub generated_date: DateTime<Local>,
}

impl JsonAnalysis {
    pub fn from_document(doc: &StructureDocument) -> Self {
        let summary = doc.summary();
        Self {
            max_path_length: summary.max_path_length,
            long_paths_count: summary.long_paths.len(),
            invalid_paths_count: summary.invalid_paths.len(),
            generated_date: doc.scanned_at(),
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<T: Serialize> {
    folder_structure: T,
    analysis: JsonAnalysis,
}

/// Serialize with the given indent width.
pub(crate) fn to_string_indented<T: Serialize>(value: &T, indent: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// `{"folder_structure": [lines...], "analysis": {...}}`
pub fn to_json(doc: &StructureDocument, config: &OutputConfig) -> Result<String> {
    let document = JsonDocument {
        folder_structure: render_lines(doc, config),
        analysis: JsonAnalysis::from_document(doc),
    };
    to_string_indented(&document, b"    ")
}

/// `{"folder_structure": {name: substructure-or-null}, "analysis": {...}}`
pub fn to_nested_json(doc: &StructureDocument) -> Result<String> {
    let document: JsonDocument<NestedNode> = JsonDocument {
        folder_structure: doc.nested(),
        analysis: JsonAnalysis::from_document(doc),
    };
    to_string_indented(&document, b"  ")
}
