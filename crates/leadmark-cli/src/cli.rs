//! CLI argument definitions using Clap v4

use clap::{ArgAction, Parser, ValueEnum};
use leadmark_export::ExportFormat;
use std::path::PathBuf;

/// Leadmark - emphasize the leading letters of every word and reflow the text onto pages
#[derive(Parser, Debug)]
#[command(name = "leadmark")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input PDF, or a text file with pages separated by form feeds
    pub input: PathBuf,

    /// Output file
    pub output: PathBuf,

    /// How many leading letters of each word to emphasize
    #[arg(default_value_t = 2)]
    pub emphasis_count: usize,

    /// Output format (guessed from the output extension, else json)
    #[arg(short = 'O', long = "format")]
    pub format: Option<FormatArg>,

    /// JSON file with layout settings; flags below override it
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Font size in points
    #[arg(short = 's', long = "font-size")]
    pub font_size: Option<f32>,

    /// Distance between baselines in points
    #[arg(short = 'L', long = "line-height")]
    pub line_height: Option<f32>,

    /// Extra space after each paragraph in points
    #[arg(long = "paragraph-spacing")]
    pub paragraph_spacing: Option<f32>,

    /// Flow all source pages together instead of starting each on a new page
    #[arg(long = "continue-pages", action = ArgAction::SetTrue)]
    pub continue_pages: bool,

    /// Fail on characters without built-in metrics
    #[arg(long = "strict-metrics", action = ArgAction::SetTrue)]
    pub strict_metrics: bool,

    /// Disable the width cache (enabled by default)
    #[arg(long = "no-metrics-cache", action = ArgAction::SetTrue)]
    pub no_metrics_cache: bool,

    /// Pretty-print JSON output
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pub pretty: bool,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum FormatArg {
    /// Page objects with positioned runs
    Json,
    /// All pages stacked in one drawing
    Svg,
    /// PDF document, one page per laid-out page
    Pdf,
    /// PDF text operators, one block per run
    PdfOps,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Svg => Self::Svg,
            FormatArg::Pdf => Self::Pdf,
            FormatArg::PdfOps => Self::PdfOps,
        }
    }
}

impl Args {
    /// Explicit `--format`, then the output extension, then JSON
    pub fn export_format(&self) -> ExportFormat {
        self.format
            .map(ExportFormat::from)
            .or_else(|| ExportFormat::from_path(&self.output))
            .unwrap_or_default()
    }

    /// Filter for `env_logger` when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
