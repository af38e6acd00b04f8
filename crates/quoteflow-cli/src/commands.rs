//! CLI command definitions using clap

use crate::config::{ColorChoice, Verbosity};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Quoteflow: run data-driven insurance quote journeys in a browser
#[derive(Parser, Debug)]
#[command(name = "quoteflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log output format
    #[arg(long, default_value = "text", global = true, env = "QUOTEFLOW_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Verbosity from `-q` and `-v`
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Purchase Vehicle journey
    Run(RunArgs),

    /// Check that the data file has every field the journey reads
    CheckData(CheckDataArgs),

    /// Print the ordered journey steps
    Steps,

    /// Write a sample config and data file
    Init(InitArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments shared by commands that read the config file
#[derive(Parser, Debug, Clone, Default)]
pub struct ConfigSource {
    /// Config file (default: ./quoteflow.yaml if present)
    #[arg(short, long, env = "QUOTEFLOW_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Config file selection
    #[command(flatten)]
    pub source: ConfigSource,

    /// Test data file (csv, tsv, xls, xlsx, ods)
    #[arg(short, long, env = "QUOTEFLOW_DATA")]
    pub data: Option<PathBuf>,

    /// Output directory for the report and failure screenshot
    #[arg(short, long, env = "QUOTEFLOW_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Show the browser window
    #[arg(long, env = "QUOTEFLOW_HEADED")]
    pub headed: bool,

    /// Path to the chromium binary
    #[arg(long, env = "QUOTEFLOW_CHROMIUM")]
    pub chromium_path: Option<String>,

    /// Disable the chromium sandbox (containers, CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Implicit wait for each control, in milliseconds
    #[arg(long, env = "QUOTEFLOW_ELEMENT_TIMEOUT_MS")]
    pub element_timeout_ms: Option<u64>,

    /// Skip the screenshot on failure
    #[arg(long)]
    pub no_screenshot: bool,

    /// Run against the built-in simulated site instead of a browser
    #[arg(long)]
    pub simulate: bool,
}

/// Arguments for the check-data command
#[derive(Parser, Debug)]
pub struct CheckDataArgs {
    /// Config file selection
    #[command(flatten)]
    pub source: ConfigSource,

    /// Test data file (csv, tsv, xls, xlsx, ods)
    #[arg(short, long, env = "QUOTEFLOW_DATA")]
    pub data: Option<PathBuf>,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config file selection
    #[command(flatten)]
    pub source: ConfigSource,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Log line format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}
