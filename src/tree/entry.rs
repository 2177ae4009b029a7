//! Entries produced by the scanner

use std::path::PathBuf;

use serde::Serialize;

/// What kind of filesystem object an entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
    /// A directory whose children could not be listed.
    Error,
}

/// One object visited during a scan.
///
/// Directories carry their own level below the root (the root is 0). Files
/// and error entries carry the level of the directory that contains them, so
/// they render one step further in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Path as reached from the scan root (root joined with the child names)
    pub path: PathBuf,
    /// Display name, shortened when truncation is on
    pub name: String,
    pub depth: usize,
    pub kind: EntryKind,
    /// Character count of the absolute form of `path`
    pub absolute_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_error(&self) -> bool {
        self.kind == EntryKind::Error
    }

    /// Number of 4-space indents this entry is drawn with.
    pub fn indent_level(&self) -> usize {
        match self.kind {
            EntryKind::Directory => self.depth,
            EntryKind::File | EntryKind::Error => self.depth + 1,
        }
    }
}
