//! Colored console output
//!
//! Lines are colored by path category: long paths yellow, invalid paths red.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::analysis::PathCategory;
use crate::document::StructureDocument;

use super::config::OutputConfig;
use super::report::{AnalysisReport, write_problem_sections};
use super::text::render_line;

fn category_color(category: PathCategory) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    match category {
        PathCategory::Normal => return None,
        PathCategory::Long => spec.set_fg(Some(Color::Yellow)),
        PathCategory::Invalid => spec.set_fg(Some(Color::Red)).set_intense(true),
    };
    Some(spec)
}

/// Writes documents to a color-capable stream.
pub struct ConsoleFormatter<W: WriteColor> {
    out: W,
    config: OutputConfig,
}

impl ConsoleFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(choice), config)
    }
}

impl<W: WriteColor> ConsoleFormatter<W> {
    pub fn new(out: W, config: OutputConfig) -> Self {
        Self { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the outline followed by the summary footer.
    pub fn write_document(&mut self, doc: &StructureDocument) -> io::Result<()> {
        for item in doc.entries() {
            self.write_line(&render_line(&item.entry, &self.config), item.verdict.category)?;
        }
        self.write_summary(doc)
    }

    /// Write lines for the entries matching `term`, then the match count.
    pub fn write_search(&mut self, doc: &StructureDocument, term: &str) -> io::Result<()> {
        let hits = doc.search(term);
        for hit in &hits {
            let item = &doc.entries()[hit.index];
            self.write_line(&render_line(&item.entry, &self.config), item.verdict.category)?;
        }
        let total: usize = hits.iter().map(|h| h.occurrences).sum();
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Search completed for '{}' - {} matches found!",
            term, total
        )
    }

    /// Write the sorted long and invalid path lists.
    pub fn write_problems(&mut self, doc: &StructureDocument) -> io::Result<()> {
        let report = AnalysisReport::from_document(doc);
        if !report.has_problems() {
            return writeln!(self.out, "No path length problems found!");
        }
        let mut sections = String::new();
        write_problem_sections(&mut sections, &report);
        write!(self.out, "{}", sections)
    }

    fn write_line(&mut self, line: &str, category: PathCategory) -> io::Result<()> {
        match category_color(category) {
            Some(spec) => {
                self.out.set_color(&spec)?;
                write!(self.out, "{}", line)?;
                self.out.reset()?;
                writeln!(self.out)
            }
            None => writeln!(self.out, "{}", line),
        }
    }

    fn write_summary(&mut self, doc: &StructureDocument) -> io::Result<()> {
        let summary = doc.summary();
        let policy = doc.policy();
        let counts = doc.counts();

        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} directories, {} files",
            counts.directories, counts.files
        )?;
        write!(self.out, "Max Path Length: {}  ", summary.max_path_length)?;

        if let Some(spec) = category_color(PathCategory::Long) {
            self.out.set_color(&spec)?;
        }
        write!(
            self.out,
            "Long Paths (>{} chars): {}",
            policy.long_threshold,
            summary.long_paths.len()
        )?;
        self.out.reset()?;
        write!(self.out, "  ")?;

        if let Some(spec) = category_color(PathCategory::Invalid) {
            self.out.set_color(&spec)?;
        }
        write!(
            self.out,
            "Invalid Paths (>{} chars): {}",
            policy.reported_limit(),
            summary.invalid_paths.len()
        )?;
        self.out.reset()?;
        writeln!(self.out)
    }
}

#[cfg(test)]
mod tests {
    use termcolor::{Ansi, NoColor};

    use super::*;
    use crate::analysis::PathPolicy;
    use crate::test_utils::TestTree;
    use crate::tree::ScanConfig;

    fn doc_for(tree: &TestTree) -> StructureDocument {
        StructureDocument::build(tree.path(), ScanConfig::default(), PathPolicy::windows()).unwrap()
    }

    fn plain(doc: &StructureDocument, f: impl FnOnce(&mut ConsoleFormatter<NoColor<Vec<u8>>>, &StructureDocument)) -> String {
        let mut formatter = ConsoleFormatter::new(NoColor::new(Vec::new()), OutputConfig::default());
        f(&mut formatter, doc);
        String::from_utf8(formatter.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_console_outline_and_footer() {
        let tree = TestTree::new();
        tree.add_file("src/main.rs", "");
        let output = plain(&doc_for(&tree), |f, d| f.write_document(d).unwrap());

        assert!(output.contains("    src/\n        main.rs\n"));
        assert!(output.contains("2 directories, 1 files"));
        assert!(output.contains("Long Paths (>200 chars): 0"));
        assert!(output.contains("Invalid Paths (>260 chars): 0"));
    }

    #[test]
    fn test_console_colors_invalid_lines() {
        let tree = TestTree::new();
        tree.add_file_with_length(270);
        let doc = doc_for(&tree);
        let mut formatter = ConsoleFormatter::new(Ansi::new(Vec::new()), OutputConfig::default());
        formatter.write_document(&doc).unwrap();
        let output = String::from_utf8(formatter.into_inner().into_inner()).unwrap();

        // Intense red foreground
        assert!(output.contains("\x1b[38;5;9m"));
    }

    #[test]
    fn test_console_search() {
        let tree = TestTree::new();
        tree.add_file("Notes.md", "");
        tree.add_file("docs/notes-old.md", "");
        tree.add_file("main.rs", "");
        let output = plain(&doc_for(&tree), |f, d| f.write_search(d, "notes").unwrap());

        assert!(output.contains("Notes.md"));
        assert!(output.contains("notes-old.md"));
        assert!(!output.contains("main.rs"));
        assert!(output.contains("Search completed for 'notes' - 2 matches found!"));
    }

    #[test]
    fn test_console_problems_when_clean() {
        let tree = TestTree::new();
        tree.add_file("a.txt", "");
        let output = plain(&doc_for(&tree), |f, d| f.write_problems(d).unwrap());
        assert_eq!(output, "No path length problems found!\n");
    }
}
