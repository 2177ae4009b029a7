//! Pathtree - outline a folder tree and flag paths that are too long

pub mod analysis;
pub mod document;
pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::{PathAnalyzer, PathCategory, PathLength, PathPolicy, PathVerdict, ScanSummary};
pub use document::{ClassifiedEntry, NestedNode, StructureDocument};
pub use error::{Error, Result};
pub use output::{ConsoleFormatter, ExportFormat, OutputConfig, export_to_file, render};
pub use tree::{Entry, EntryKind, Scan, ScanConfig, TreeScanner};
