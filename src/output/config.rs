//! Output configuration types

/// Configuration for rendering a document.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Append ` [N chars]` to every line
    pub show_lengths: bool,
    /// Only honored by console output
    pub use_color: bool,
}

impl OutputConfig {
    pub fn with_lengths(mut self, show: bool) -> Self {
        self.show_lengths = show;
        self
    }
}
