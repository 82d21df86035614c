use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "md2project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Create a project structure from code blocks in markdown")]
#[command(
    long_about = "md2project scans markdown documents for fenced code blocks labelled with \
                  a file path and writes each one to that path under the output directory."
)]
#[command(after_help = "EXAMPLES:\n  \
    md2project design.md\n  \
    md2project design.md --output ./my-project\n  \
    md2project part1.md part2.md --dry-run\n  \
    md2project notes.md --exclude '^docs/' --quiet\n  \
    md2project --generate-config")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Markdown documents to read, in order
    #[arg(required_unless_present = "generate_config")]
    pub markdown_files: Vec<PathBuf>,

    /// Output directory (defaults to the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show what would be created without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Quiet mode (suppress per-file messages)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Maximum size of an input document (e.g. 512KB, 10MB)
    #[arg(long, value_parser = parse_size_string)]
    pub max_size: Option<u64>,

    /// Regular expressions for extracted paths to skip (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_exclude_patterns(self.exclude.clone())
            .with_max_file_size(self.max_size)
            .with_output_dir(self.output.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn parse_size_string(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_lowercase();

    let (number_str, multiplier) = if s.ends_with("kb") || s.ends_with('k') {
        (s.trim_end_matches("kb").trim_end_matches('k'), 1024)
    } else if s.ends_with("mb") || s.ends_with('m') {
        (s.trim_end_matches("mb").trim_end_matches('m'), 1024 * 1024)
    } else if s.ends_with("gb") || s.ends_with('g') {
        (
            s.trim_end_matches("gb").trim_end_matches('g'),
            1024 * 1024 * 1024,
        )
    } else if s.ends_with('b') {
        (s.trim_end_matches('b'), 1)
    } else {
        (s.as_str(), 1)
    };

    let number: f64 = number_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number format: {}", number_str))?;

    if number < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    Ok((number * multiplier as f64) as u64)
}
