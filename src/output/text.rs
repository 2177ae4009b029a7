//! Plain indented text rendering

use crate::document::StructureDocument;
use crate::tree::{Entry, EntryKind};

use super::config::OutputConfig;

/// One indentation step.
pub const INDENT: &str = "    ";

/// Render one entry as a line, without the trailing newline.
pub fn render_line(entry: &Entry, config: &OutputConfig) -> String {
    let indent = INDENT.repeat(entry.indent_level());
    let mut line = match entry.kind {
        EntryKind::Directory => format!("{}{}/", indent, entry.name),
        EntryKind::File => format!("{}{}", indent, entry.name),
        EntryKind::Error => format!(
            "{}[error] {}",
            indent,
            entry.error.as_deref().unwrap_or("unreadable")
        ),
    };
    if config.show_lengths && entry.kind != EntryKind::Error {
        line.push_str(&format!(" [{} chars]", entry.absolute_length));
    }
    line
}

/// Render every entry in traversal order.
pub fn render_lines(doc: &StructureDocument, config: &OutputConfig) -> Vec<String> {
    doc.entries()
        .iter()
        .map(|item| render_line(&item.entry, config))
        .collect()
}

/// Plain text artifact: one newline-terminated line per entry.
pub fn to_text(doc: &StructureDocument, config: &OutputConfig) -> String {
    let mut output = String::new();
    for line in render_lines(doc, config) {
        output.push_str(&line);
        output.push('\n');
    }
    output
}
