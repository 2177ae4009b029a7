//! Child filtering for tree scanning

use super::config::ScanConfig;
use super::utils::glob_match_ignore_case;

/// Leading marker of hidden files and directories.
pub const HIDDEN_MARKER: char = '.';

/// Decides which children of a directory are kept.
#[derive(Debug, Clone)]
pub struct NameFilter {
    include_hidden: bool,
    excluded: Vec<String>,
}

impl NameFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            include_hidden: config.include_hidden,
            excluded: config
                .exclude_names
                .iter()
                .map(|n| n.to_lowercase())
                .collect(),
        }
    }

    /// Check if a name is hidden by the leading-dot convention.
    pub fn is_hidden(name: &str) -> bool {
        name.starts_with(HIDDEN_MARKER)
    }

    /// Check if a file with this name should be listed.
    pub fn keeps_file(&self, name: &str) -> bool {
        self.include_hidden || !Self::is_hidden(name)
    }

    /// Check if a directory with this name should be listed and descended into.
    pub fn keeps_dir(&self, name: &str) -> bool {
        if !self.include_hidden && Self::is_hidden(name) {
            return false;
        }
        !self.is_excluded(name)
    }

    /// Check if a directory name matches one of the excluded names.
    pub fn is_excluded(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.excluded
            .iter()
            .any(|pattern| *pattern == lower || glob_match_ignore_case(pattern, name))
    }
}
