//! Path length analysis
//!
//! Every visited path is measured by the character count of its absolute
//! form and put in one of three categories:
//!
//! - `Invalid` when the host enforces a path ceiling and the path exceeds it
//! - `Long` when the path exceeds the long threshold
//! - `Normal` otherwise
//!
//! `ScanSummary` accumulates the results of one scan.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::tree::Entry;

/// Paths longer than this many characters are reported as long.
pub const DEFAULT_LONG_THRESHOLD: usize = 200;

/// Classic `MAX_PATH` ceiling on Windows.
pub const WINDOWS_PATH_LIMIT: usize = 260;

/// Length thresholds used to classify paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPolicy {
    pub long_threshold: usize,
    /// Hard ceiling enforced by the host, if any
    pub path_limit: Option<usize>,
}

impl PathPolicy {
    /// Policy for the platform this binary was built for.
    pub fn host() -> Self {
        Self {
            long_threshold: DEFAULT_LONG_THRESHOLD,
            path_limit: if cfg!(windows) {
                Some(WINDOWS_PATH_LIMIT)
            } else {
                None
            },
        }
    }

    /// Policy that enforces the Windows ceiling regardless of host.
    pub fn windows() -> Self {
        Self {
            path_limit: Some(WINDOWS_PATH_LIMIT),
            ..Self::host()
        }
    }

    /// Policy that never reports a path as invalid.
    pub fn unlimited() -> Self {
        Self {
            path_limit: None,
            ..Self::host()
        }
    }

    /// Ceiling shown in reports; the Windows value when none is enforced.
    pub fn reported_limit(&self) -> usize {
        self.path_limit.unwrap_or(WINDOWS_PATH_LIMIT)
    }
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self::host()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathCategory {
    Normal,
    Long,
    Invalid,
}

impl PathCategory {
    /// CSS class used by the HTML exporter.
    pub fn css_class(self) -> &'static str {
        match self {
            PathCategory::Normal => "normal-path",
            PathCategory::Long => "long-path",
            PathCategory::Invalid => "invalid-path",
        }
    }
}

/// Result of classifying one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathVerdict {
    pub length: usize,
    pub category: PathCategory,
}

/// A path paired with its measured length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathLength {
    pub path: PathBuf,
    pub length: usize,
}

/// Make `path` absolute and fold away `.` and `..` components.
///
/// This is purely lexical: symlinks are not resolved and nothing needs to
/// exist. `..` at the filesystem root stays at the root.
pub fn normalize_absolute(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Count the characters of the normalized absolute form of `path`.
///
/// The path is made absolute lexically, without touching the filesystem, so
/// the result does not depend on whether the path exists.
pub fn absolute_length(path: &Path) -> usize {
    match normalize_absolute(path) {
        Ok(absolute) => char_count(&absolute),
        Err(_) => char_count(path),
    }
}

/// Count the characters of a path as displayed.
pub fn char_count(path: &Path) -> usize {
    path.to_string_lossy().chars().count()
}

/// Classifies entries and folds them into a `ScanSummary`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAnalyzer {
    policy: PathPolicy,
}

impl PathAnalyzer {
    pub fn new(policy: PathPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    /// Category for a path of the given length. The ceiling is checked first.
    pub fn category_for(&self, length: usize) -> PathCategory {
        if self.policy.path_limit.is_some_and(|limit| length > limit) {
            PathCategory::Invalid
        } else if length > self.policy.long_threshold {
            PathCategory::Long
        } else {
            PathCategory::Normal
        }
    }

    pub fn classify(&self, entry: &Entry) -> PathVerdict {
        PathVerdict {
            length: entry.absolute_length,
            category: self.category_for(entry.absolute_length),
        }
    }

    /// Fold one classified entry into the summary.
    ///
    /// The long bucket is filled by its own length test, so invalid paths
    /// land in both buckets. Error entries repeat the path of a directory
    /// that was already counted and are skipped.
    pub fn accumulate(&self, summary: &mut ScanSummary, entry: &Entry, verdict: &PathVerdict) {
        if entry.is_error() {
            return;
        }
        summary.max_path_length = summary.max_path_length.max(verdict.length);
        if verdict.length > self.policy.long_threshold {
            summary.long_paths.push(PathLength {
                path: entry.path.clone(),
                length: verdict.length,
            });
        }
        if verdict.category == PathCategory::Invalid {
            summary.invalid_paths.push(PathLength {
                path: entry.path.clone(),
                length: verdict.length,
            });
        }
    }
}

/// Aggregate statistics over one scan, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub max_path_length: usize,
    pub long_paths: Vec<PathLength>,
    pub invalid_paths: Vec<PathLength>,
}

impl ScanSummary {
    pub fn has_problems(&self) -> bool {
        !self.long_paths.is_empty() || !self.invalid_paths.is_empty()
    }

    /// Copy of the long paths, longest first.
    pub fn long_paths_by_length(&self) -> Vec<PathLength> {
        sorted_by_length(&self.long_paths)
    }

    /// Copy of the invalid paths, longest first.
    pub fn invalid_paths_by_length(&self) -> Vec<PathLength> {
        sorted_by_length(&self.invalid_paths)
    }
}

fn sorted_by_length(paths: &[PathLength]) -> Vec<PathLength> {
    let mut sorted = paths.to_vec();
    // Stable, so equal lengths keep traversal order
    sorted.sort_by(|a, b| b.length.cmp(&a.length));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::EntryKind;

    fn entry(path: &str, length: usize, kind: EntryKind) -> Entry {
        Entry {
            path: PathBuf::from(path),
            name: path.to_string(),
            depth: 0,
            kind,
            absolute_length: length,
            error: None,
        }
    }

    #[test]
    fn test_category_priority() {
        let analyzer = PathAnalyzer::new(PathPolicy::windows());
        assert_eq!(analyzer.category_for(200), PathCategory::Normal);
        assert_eq!(analyzer.category_for(201), PathCategory::Long);
        assert_eq!(analyzer.category_for(260), PathCategory::Long);
        assert_eq!(analyzer.category_for(261), PathCategory::Invalid);
    }

    #[test]
    fn test_no_ceiling_never_invalid() {
        let analyzer = PathAnalyzer::new(PathPolicy::unlimited());
        assert_eq!(analyzer.category_for(261), PathCategory::Long);
        assert_eq!(analyzer.category_for(10_000), PathCategory::Long);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let analyzer = PathAnalyzer::new(PathPolicy::windows());
        let e = entry("some/file.txt", 230, EntryKind::File);
        assert_eq!(analyzer.classify(&e), analyzer.classify(&e));
    }

    #[test]
    fn test_invalid_lands_in_both_buckets() {
        let analyzer = PathAnalyzer::new(PathPolicy::windows());
        let mut summary = ScanSummary::default();
        let e = entry("deep", 261, EntryKind::File);
        let verdict = analyzer.classify(&e);
        analyzer.accumulate(&mut summary, &e, &verdict);

        assert_eq!(verdict.category, PathCategory::Invalid);
        assert_eq!(summary.long_paths.len(), 1);
        assert_eq!(summary.invalid_paths.len(), 1);
        assert_eq!(summary.max_path_length, 261);
    }

    #[test]
    fn test_same_path_without_ceiling_is_only_long() {
        let analyzer = PathAnalyzer::new(PathPolicy::unlimited());
        let mut summary = ScanSummary::default();
        let e = entry("deep", 261, EntryKind::File);
        let verdict = analyzer.classify(&e);
        analyzer.accumulate(&mut summary, &e, &verdict);

        assert_eq!(verdict.category, PathCategory::Long);
        assert_eq!(summary.long_paths.len(), 1);
        assert!(summary.invalid_paths.is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let analyzer = PathAnalyzer::new(PathPolicy {
            long_threshold: 10,
            path_limit: Some(20),
        });
        assert_eq!(analyzer.category_for(10), PathCategory::Normal);
        assert_eq!(analyzer.category_for(11), PathCategory::Long);
        assert_eq!(analyzer.category_for(21), PathCategory::Invalid);
    }

    #[test]
    fn test_error_entries_are_not_counted() {
        let analyzer = PathAnalyzer::new(PathPolicy::windows());
        let mut summary = ScanSummary::default();
        let e = entry("locked", 300, EntryKind::Error);
        let verdict = analyzer.classify(&e);
        analyzer.accumulate(&mut summary, &e, &verdict);
        assert_eq!(summary, ScanSummary::default());
    }

    #[test]
    fn test_sorted_copies_leave_original_order() {
        let analyzer = PathAnalyzer::new(PathPolicy::unlimited());
        let mut summary = ScanSummary::default();
        for (path, len) in [("a", 210), ("b", 250), ("c", 210), ("d", 230)] {
            let e = entry(path, len, EntryKind::File);
            let verdict = analyzer.classify(&e);
            analyzer.accumulate(&mut summary, &e, &verdict);
        }

        let sorted: Vec<_> = summary
            .long_paths_by_length()
            .into_iter()
            .map(|p| p.path)
            .collect();
        assert_eq!(
            sorted,
            ["b", "d", "a", "c"].map(PathBuf::from).to_vec()
        );
        assert_eq!(summary.long_paths[0].path, PathBuf::from("a"));
    }

    #[test]
    fn test_absolute_length_of_relative_path() {
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.join("x.txt").to_string_lossy().chars().count();
        assert_eq!(absolute_length(Path::new("x.txt")), expected);
    }

    #[test]
    fn test_absolute_length_folds_parent_components() {
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.join("x.txt").to_string_lossy().chars().count();
        assert_eq!(absolute_length(Path::new("sub/../x.txt")), expected);
        assert_eq!(absolute_length(Path::new("./x.txt")), expected);
    }

    #[test]
    #[cfg(unix)]
    fn test_normalize_absolute_stops_at_root() {
        assert_eq!(
            normalize_absolute(Path::new("/a/../../b/./c")).unwrap(),
            PathBuf::from("/b/c")
        );
    }
}
