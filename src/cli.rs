use std::path::PathBuf;
use clap::{Parser, ValueEnum};

use crate::config::SplitDiffConfig;
use crate::diff::{DiffAlgorithmType, DiffMode, FormatMode};

#[derive(Parser, Debug)]
#[command(name = "splitdiff")]
#[command(version)]
#[command(about = "Compare two texts side by side with aligned, highlighted rows")]
#[command(long_about = "splitdiff aligns the lines of two texts into a split view, pairing changed lines by position, optionally refining modified lines word by word. Results can be browsed in a terminal UI, printed as plain text or JSON, copied, or exported to a .txt file.")]
pub struct Cli {
    /// Original text
    #[arg(value_name = "LEFT", help = "Path to the original text")]
    pub left: PathBuf,

    /// Updated text
    #[arg(value_name = "RIGHT", help = "Path to the updated text")]
    pub right: PathBuf,

    /// Highlight granularity for modified lines
    #[arg(short, long, help = "Diff mode (overrides config)")]
    pub mode: Option<DiffMode>,

    /// Pane format
    #[arg(short, long, help = "Display format (overrides config)")]
    pub format: Option<FormatMode>,

    /// Line diff algorithm
    #[arg(short, long, help = "Line diff algorithm (overrides config)")]
    pub algorithm: Option<DiffAlgorithmType>,

    /// Output format
    #[arg(short, long, default_value = "tui", help = "Output format")]
    pub output: OutputFormat,

    /// Write the plain diff to a .txt file
    #[arg(short, long, value_name = "PATH", help = "Export the plain diff (file or directory)")]
    pub export: Option<PathBuf>,

    /// Reload inputs when they change on disk
    #[arg(short, long, help = "Watch both inputs and re-diff on change")]
    pub watch: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colors in output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal user interface (default)
    Tui,
    /// Side-by-side rows: highlighted, or prefixed plain panes with --format plain
    Text,
    /// Rows and plain forms as JSON
    Json,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut SplitDiffConfig) {
        if let Some(mode) = self.mode {
            config.diff.mode = mode;
        }
        if let Some(format) = self.format {
            config.diff.format = format;
        }
        if let Some(algorithm) = self.algorithm {
            config.diff.algorithm = algorithm;
        }
    }

    pub fn setup_logging(&self) {
        // The TUI owns the terminal; only log there when explicitly asked.
        if self.output == OutputFormat::Tui && !self.verbose {
            return;
        }

        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(level)
            .with_ansi(!self.no_color)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        for path in [&self.left, &self.right] {
            if !path.exists() {
                return Err(format!("Path does not exist: {}", path.display()));
            }

            if !path.is_file() {
                return Err(format!("Path is not a file: {}", path.display()));
            }
        }

        if let Some(config) = &self.config {
            if !config.is_file() {
                return Err(format!("Config file not found: {}", config.display()));
            }
        }

        Ok(())
    }
}
