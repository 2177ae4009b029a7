//! Shared utility functions for tree scanning

use std::path::Path;

use glob::{MatchOptions, Pattern};

/// Marker inserted where a name was cut.
pub const ELLIPSIS: &str = "...";

/// Get the display name of a path, falling back to the whole path for roots
/// such as `/` or `.` that have no final component.
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Match a glob pattern against a name, ignoring ASCII case.
pub fn glob_match_ignore_case(pattern: &str, name: &str) -> bool {
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    Pattern::new(pattern)
        .map(|p| p.matches_with(name, options))
        .unwrap_or(false)
}

/// Shorten a name to at most `limit` characters.
///
/// File names keep their extension when it leaves at least ten characters of
/// room; everything else is cut at the end. Either way an ellipsis marks the
/// cut, unless the limit is too small to hold one.
pub fn truncate_name(name: &str, limit: usize, is_file: bool) -> String {
    let len = name.chars().count();
    if len <= limit {
        return name.to_string();
    }

    // No room for the marker itself
    if limit < ELLIPSIS.len() {
        return name.chars().take(limit).collect();
    }

    let keep = limit - ELLIPSIS.len();

    if is_file && !name.starts_with('.') {
        if let Some(dot) = name.rfind('.') {
            let ext = &name[dot..];
            let ext_len = ext.chars().count();
            if ext_len + 10 < limit {
                let stem: String = name[..dot]
                    .chars()
                    .take(limit - ext_len - ELLIPSIS.len())
                    .collect();
                return format!("{stem}{ELLIPSIS}{ext}");
            }
        }
    }

    let head: String = name.chars().take(keep).collect();
    format!("{head}{ELLIPSIS}")
}
