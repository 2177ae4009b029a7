//! Configuration types for tree scanning

/// Default display width for truncated names.
pub const DEFAULT_TRUNCATE_LIMIT: usize = 50;

/// Configuration for one scan. Not changed while a scan is running.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Include names that start with `.`
    pub include_hidden: bool,
    /// Directory names to skip, compared case-insensitively.
    /// Glob patterns such as `target*` are accepted as well.
    pub exclude_names: Vec<String>,
    /// Shorten displayed names longer than `truncate_limit`
    pub truncate_names: bool,
    pub truncate_limit: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            exclude_names: Vec::new(),
            truncate_names: false,
            truncate_limit: DEFAULT_TRUNCATE_LIMIT,
        }
    }
}

impl ScanConfig {
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude_names.push(name.into());
        self
    }

    /// Skip `node_modules` folders at any depth.
    pub fn hide_node_modules(self) -> Self {
        self.exclude("node_modules")
    }

    pub fn with_truncation(mut self, limit: usize) -> Self {
        self.truncate_names = true;
        self.truncate_limit = limit;
        self
    }
}
