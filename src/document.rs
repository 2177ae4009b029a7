//! StructureDocument - the classified result of one scan
//!
//! Scanning, classification, and summary accumulation happen in one pass
//! here. Every exporter reads from the finished document and never changes it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::analysis::{PathAnalyzer, PathPolicy, PathVerdict, ScanSummary};
use crate::error::Result;
use crate::tree::{Entry, EntryKind, Scan, ScanConfig, TreeScanner};

/// An entry paired with its length verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub entry: Entry,
    pub verdict: PathVerdict,
}

/// Number of objects of each kind in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryCounts {
    pub directories: usize,
    pub files: usize,
    pub errors: usize,
}

/// One entry whose display name matched a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Position of the entry in the document
    pub index: usize,
    pub occurrences: usize,
}

/// Ordered name → substructure mapping; files map to `null` in JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedNode {
    File,
    Dir(Vec<(String, NestedNode)>),
}

impl NestedNode {
    pub fn children(&self) -> &[(String, NestedNode)] {
        match self {
            NestedNode::File => &[],
            NestedNode::Dir(children) => children,
        }
    }
}

impl Serialize for NestedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NestedNode::File => serializer.serialize_none(),
            NestedNode::Dir(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (name, child) in children {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
        }
    }
}

/// Full ordered result of one scan.
#[derive(Debug, Clone)]
pub struct StructureDocument {
    root: PathBuf,
    absolute_root: PathBuf,
    entries: Vec<ClassifiedEntry>,
    summary: ScanSummary,
    policy: PathPolicy,
    scanned_at: DateTime<Local>,
}

impl StructureDocument {
    /// Scan `root` and classify every entry.
    pub fn build(root: &Path, config: ScanConfig, policy: PathPolicy) -> Result<Self> {
        let scan = TreeScanner::new(config).scan(root)?;
        Ok(Self::from_scan(root, scan, PathAnalyzer::new(policy)))
    }

    /// Drain a scan, classifying entries as they arrive.
    ///
    /// The summary always starts empty, so nothing carries over between scans.
    pub fn from_scan(root: &Path, scan: Scan, analyzer: PathAnalyzer) -> Self {
        let absolute_root = scan.absolute_root().to_path_buf();
        let mut summary = ScanSummary::default();
        let entries: Vec<_> = scan
            .map(|entry| {
                let verdict = analyzer.classify(&entry);
                analyzer.accumulate(&mut summary, &entry, &verdict);
                ClassifiedEntry { entry, verdict }
            })
            .collect();

        info!(
            "scanned {}: {} entries, {} long, {} invalid",
            absolute_root.display(),
            entries.len(),
            summary.long_paths.len(),
            summary.invalid_paths.len()
        );

        Self {
            root: root.to_path_buf(),
            absolute_root,
            entries,
            summary,
            policy: *analyzer.policy(),
            scanned_at: Local::now(),
        }
    }

    /// Root as it was given to the scan.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root made absolute with `.` and `..` folded away.
    pub fn absolute_root(&self) -> &Path {
        &self.absolute_root
    }

    pub fn entries(&self) -> &[ClassifiedEntry] {
        &self.entries
    }

    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    pub fn scanned_at(&self) -> DateTime<Local> {
        self.scanned_at
    }

    /// Pin the timestamp used by exporters.
    pub fn with_scanned_at(mut self, at: DateTime<Local>) -> Self {
        self.scanned_at = at;
        self
    }

    pub fn counts(&self) -> EntryCounts {
        let mut counts = EntryCounts::default();
        for item in &self.entries {
            match item.entry.kind {
                EntryKind::Directory => counts.directories += 1,
                EntryKind::File => counts.files += 1,
                EntryKind::Error => counts.errors += 1,
            }
        }
        counts
    }

    /// Find entries whose display name contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<SearchHit> {
        if term.is_empty() {
            return Vec::new();
        }
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let occurrences = item.entry.name.to_lowercase().matches(&needle).count();
                (occurrences > 0).then_some(SearchHit { index, occurrences })
            })
            .collect()
    }

    /// Rebuild the hierarchy of the root's children from the flat entry list.
    ///
    /// Error entries are left out.
    pub fn nested(&self) -> NestedNode {
        let mut stack: Vec<(String, Vec<(String, NestedNode)>)> = Vec::new();

        for item in &self.entries {
            let entry = &item.entry;
            let parent_depth = match entry.kind {
                EntryKind::Directory if stack.is_empty() => {
                    stack.push((entry.name.clone(), Vec::new()));
                    continue;
                }
                EntryKind::Directory => entry.depth - 1,
                EntryKind::File => entry.depth,
                EntryKind::Error => continue,
            };

            while stack.len() > parent_depth + 1 {
                fold_top(&mut stack);
            }

            match entry.kind {
                EntryKind::Directory => stack.push((entry.name.clone(), Vec::new())),
                _ => {
                    if let Some((_, children)) = stack.last_mut() {
                        children.push((entry.name.clone(), NestedNode::File));
                    }
                }
            }
        }

        while stack.len() > 1 {
            fold_top(&mut stack);
        }
        NestedNode::Dir(stack.pop().map(|(_, children)| children).unwrap_or_default())
    }
}

fn fold_top(stack: &mut Vec<(String, Vec<(String, NestedNode)>)>) {
    if let Some((name, children)) = stack.pop() {
        if let Some((_, parent)) = stack.last_mut() {
            parent.push((name, NestedNode::Dir(children)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PathCategory;
    use crate::test_utils::TestTree;

    fn build(tree: &TestTree, config: ScanConfig) -> StructureDocument {
        StructureDocument::build(tree.path(), config, PathPolicy::windows()).unwrap()
    }

    #[test]
    fn test_max_length_matches_entries() {
        let tree = TestTree::new();
        tree.add_file("a/b/c.txt", "");
        tree.add_file("z.txt", "");
        let doc = build(&tree, ScanConfig::default());

        let max = doc
            .entries()
            .iter()
            .map(|e| e.entry.absolute_length)
            .max()
            .unwrap();
        assert_eq!(doc.summary().max_path_length, max);
    }

    #[test]
    fn test_entry_count_matches_filesystem() {
        let tree = TestTree::new();
        tree.add_file(".hidden/x", "");
        tree.add_file("a/b/c.txt", "");
        tree.add_file("d.txt", "");
        tree.add_dir("empty");
        let doc = build(&tree, ScanConfig::default().with_hidden(true));

        // .hidden, x, a, b, c.txt, d.txt, empty + root
        assert_eq!(doc.entries().len(), 8);
        assert_eq!(
            doc.counts(),
            EntryCounts {
                directories: 5,
                files: 3,
                errors: 0
            }
        );
    }

    #[test]
    fn test_long_path_is_flagged() {
        let tree = TestTree::new();
        let deep = tree.add_file_with_length(261);
        let doc = build(&tree, ScanConfig::default());

        let item = doc
            .entries()
            .iter()
            .find(|e| e.entry.path == deep)
            .unwrap();
        assert_eq!(item.verdict.length, 261);
        assert_eq!(item.verdict.category, PathCategory::Invalid);
        assert!(doc.summary().invalid_paths.iter().any(|p| p.path == deep));
        assert!(doc.summary().long_paths.iter().any(|p| p.path == deep));
    }

    #[test]
    fn test_search_ignores_case_and_counts_occurrences() {
        let tree = TestTree::new();
        tree.add_file("Readme.md", "");
        tree.add_file("docs/readme-readme.txt", "");
        tree.add_file("main.rs", "");
        let doc = build(&tree, ScanConfig::default());

        let hits = doc.search("README");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.iter().map(|h| h.occurrences).sum::<usize>(), 3);
        assert!(doc.search("").is_empty());
    }

    #[test]
    fn test_nested_structure() {
        let tree = TestTree::new();
        tree.add_file("src/lib.rs", "");
        tree.add_file("src/tree/mod.rs", "");
        tree.add_dir("empty");
        tree.add_file("Cargo.toml", "");
        let doc = build(&tree, ScanConfig::default());

        let expected = NestedNode::Dir(vec![
            ("empty".into(), NestedNode::Dir(vec![])),
            (
                "src".into(),
                NestedNode::Dir(vec![
                    (
                        "tree".into(),
                        NestedNode::Dir(vec![("mod.rs".into(), NestedNode::File)]),
                    ),
                    ("lib.rs".into(), NestedNode::File),
                ]),
            ),
            ("Cargo.toml".into(), NestedNode::File),
        ]);
        assert_eq!(doc.nested(), expected);
    }

    #[test]
    fn test_nested_serializes_files_as_null() {
        let node = NestedNode::Dir(vec![
            ("a".into(), NestedNode::Dir(vec![])),
            ("b.txt".into(), NestedNode::File),
        ]);
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"a":{},"b.txt":null}"#
        );
    }

    #[test]
    fn test_absolute_root_is_normalized() {
        let tree = TestTree::new();
        tree.add_dir("sub");
        let typed = tree.path().join("sub/..");
        let doc = StructureDocument::build(&typed, ScanConfig::default(), PathPolicy::windows())
            .unwrap();

        assert_eq!(doc.root(), typed);
        assert_eq!(doc.absolute_root(), std::path::absolute(tree.path()).unwrap());
    }
}
