//! CLI entry point for pathtree

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use log::info;
use pathtree::{
    ConsoleFormatter, ExportFormat, OutputConfig, PathPolicy, ScanConfig, StructureDocument,
    export_to_file, render,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Indented plain text
    Text,
    /// HTML page with the outline in a <pre> block
    Html,
    /// HTML page with nested lists
    NestedHtml,
    /// JSON with one string per outline line
    Json,
    /// JSON with a nested name -> children mapping
    NestedJson,
    /// Path length analysis report as text
    Report,
    /// Path length analysis report as JSON
    ReportJson,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ExportFormat::Text,
            Format::Html => ExportFormat::Html,
            Format::NestedHtml => ExportFormat::NestedHtml,
            Format::Json => ExportFormat::Json,
            Format::NestedJson => ExportFormat::NestedJson,
            Format::Report => ExportFormat::Report,
            Format::ReportJson => ExportFormat::ReportJson,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pathtree")]
#[command(about = "Outline a folder tree and flag paths that are too long")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Include hidden files and folders (names starting with '.')
    #[arg(short, long)]
    all: bool,

    /// Skip node_modules folders
    #[arg(long = "hide-node-modules")]
    hide_node_modules: bool,

    /// Skip folders with this name, case-insensitive (can be used multiple times)
    #[arg(short = 'I', long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Truncate names longer than N characters (default: 50)
    #[arg(
        short = 't',
        long = "truncate",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "50",
        value_parser = parse_truncate_limit
    )]
    truncate: Option<usize>,

    /// Show the absolute path length next to each entry
    #[arg(short = 'l', long = "lengths")]
    lengths: bool,

    /// Output format (inferred from --output extension when omitted)
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<Format>,

    /// Write the export to FILE instead of stdout ('-' for stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Paths longer than N characters are reported as long
    #[arg(long = "long-threshold", value_name = "N", default_value = "200")]
    long_threshold: usize,

    /// Paths longer than N characters are reported as invalid
    /// (default: 260 on Windows, none elsewhere)
    #[arg(long = "path-limit", value_name = "N", conflicts_with = "no_path_limit")]
    path_limit: Option<usize>,

    /// Never report paths as invalid
    #[arg(long = "no-path-limit")]
    no_path_limit: bool,

    /// Show only entries whose name contains TERM (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TERM")]
    search: Option<String>,

    /// List long and invalid paths after the outline
    #[arg(short = 'p', long = "problems")]
    problems: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig {
            include_hidden: self.all,
            exclude_names: self.exclude.clone(),
            ..Default::default()
        };
        if self.hide_node_modules {
            config = config.hide_node_modules();
        }
        if let Some(limit) = self.truncate {
            config = config.with_truncation(limit);
        }
        config
    }

    fn path_policy(&self) -> PathPolicy {
        let host = PathPolicy::host();
        PathPolicy {
            long_threshold: self.long_threshold,
            path_limit: if self.no_path_limit {
                None
            } else {
                self.path_limit.or(host.path_limit)
            },
        }
    }
}

/// Parse a truncation limit; it must leave room for the "..." marker.
fn parse_truncate_limit(s: &str) -> Result<usize, String> {
    let limit: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if limit < 3 {
        return Err(format!("limit must be at least 3, got {}", limit));
    }
    Ok(limit)
}

/// Pick a format from the destination's extension.
fn infer_format(dest: &Path) -> ExportFormat {
    match dest
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("html") | Some("htm") => ExportFormat::Html,
        Some("json") => ExportFormat::Json,
        _ => ExportFormat::Text,
    }
}

fn is_stdout(dest: &Path) -> bool {
    dest == Path::new("-")
}

/// A reader that stopped listening (`pathtree | head`) is not a failure.
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn stdout_failed(source: io::Error) -> pathtree::Error {
    pathtree::Error::ExportFailed {
        path: PathBuf::from("<stdout>"),
        source,
    }
}

/// Render `doc` and write it to stdout.
fn print_export(
    doc: &StructureDocument,
    format: ExportFormat,
    config: &OutputConfig,
) -> pathtree::Result<()> {
    let contents = render(doc, format, config)?;
    let mut out = io::stdout().lock();
    let written = out.write_all(contents.as_bytes()).and_then(|_| out.flush());
    ignore_broken_pipe(written).map_err(stdout_failed)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let doc = match StructureDocument::build(&args.path, args.scan_config(), args.path_policy()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("pathtree: {}", e);
            process::exit(1);
        }
    };

    let output_config = OutputConfig {
        show_lengths: args.lengths,
        use_color: should_use_color(args.color),
    };

    let format = args.format.map(ExportFormat::from);
    let result = match &args.output {
        Some(dest) if !is_stdout(dest) => {
            let format = format.unwrap_or_else(|| infer_format(dest));
            export_to_file(&doc, format, &output_config, dest).map(|_| {
                info!("wrote {:?} export", format);
                eprintln!("pathtree: saved to {}", dest.display());
            })
        }
        Some(_) => print_export(&doc, format.unwrap_or(ExportFormat::Text), &output_config),
        None => match format {
            Some(format) => print_export(&doc, format, &output_config),
            None => {
                let mut console = ConsoleFormatter::stdout(output_config);
                let written = match &args.search {
                    Some(term) => console.write_search(&doc, term),
                    None => console.write_document(&doc),
                };
                let written = written.and_then(|_| {
                    if args.problems {
                        console.write_problems(&doc)
                    } else {
                        Ok(())
                    }
                });
                ignore_broken_pipe(written).map_err(stdout_failed)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("pathtree: {}", e);
        process::exit(1);
    }
}
