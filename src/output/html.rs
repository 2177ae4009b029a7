//! HTML rendering
//!
//! `to_html` wraps the text outline in a `<pre>` block, one `<span>` per line
//! carrying the category class. `to_nested_html` renders the hierarchy as
//! nested `<ul>` lists instead.

use std::fmt::Write as _;

use crate::document::{NestedNode, StructureDocument};

use super::config::OutputConfig;
use super::text::render_line;

const STYLE: &str = "\
    body { font-family: 'Courier New', monospace; margin: 20px; }
    .header { background-color: #f0f8ff; padding: 10px; border-radius: 5px; margin-bottom: 20px; }
    .long-path { color: #ff8c00; }
    .invalid-path { color: #dc143c; background-color: #ffe4e1; }
    .normal-path { color: #333; }
    pre { white-space: pre-wrap; }
    .tree ul { margin-left: 20px; padding-left: 0; }
    .tree li { list-style-type: none; margin: 10px; position: relative; }
    .tree li::before { content: \"\u{251c}\u{2500}\u{2500} \"; font-family: monospace; }
";

/// Escape text for use inside HTML elements and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn open_document(out: &mut String, doc: &StructureDocument) {
    let summary = doc.summary();
    let policy = doc.policy();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Folder Structure - {title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"header\">\n\
         <h2>Folder Structure Analysis</h2>\n\
         <p>Scanned Folder: {root}</p>\n\
         <p>Generated on: {date}</p>\n\
         <p>Max Path Length: {max} characters</p>\n\
         <p>Long Paths (&gt;{long} chars): {long_count}</p>\n\
         <p>Invalid Paths (&gt;{limit} chars): {invalid_count}</p>\n\
         </div>\n",
        title = escape_html(&root_name(doc)),
        root = escape_html(&doc.absolute_root().display().to_string()),
        date = doc.scanned_at().format("%Y-%m-%d %H:%M:%S"),
        max = summary.max_path_length,
        long = policy.long_threshold,
        long_count = summary.long_paths.len(),
        limit = policy.reported_limit(),
        invalid_count = summary.invalid_paths.len(),
    );
}

fn root_name(doc: &StructureDocument) -> String {
    doc.entries()
        .first()
        .map(|item| item.entry.name.clone())
        .unwrap_or_default()
}

/// Standalone HTML document with the outline in a `<pre>` block.
pub fn to_html(doc: &StructureDocument, config: &OutputConfig) -> String {
    let mut out = String::new();
    open_document(&mut out, doc);

    out.push_str("<pre>");
    for item in doc.entries() {
        let _ = writeln!(
            out,
            "<span class=\"{}\">{}</span>",
            item.verdict.category.css_class(),
            escape_html(&render_line(&item.entry, config))
        );
    }
    out.push_str("</pre>\n</body>\n</html>\n");
    out
}

/// Standalone HTML document with the hierarchy as nested lists.
pub fn to_nested_html(doc: &StructureDocument) -> String {
    let mut out = String::new();
    open_document(&mut out, doc);

    out.push_str("<div class=\"tree\">\n");
    write_list(&mut out, &doc.nested());
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn write_list(out: &mut String, node: &NestedNode) {
    out.push_str("<ul>");
    for (name, child) in node.children() {
        let _ = write!(out, "<li>{}", escape_html(name));
        if !child.children().is_empty() {
            write_list(out, child);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>\n");
}
