//! Quoteflow CLI library
//!
//! Argument parsing, configuration, logging setup and the journey runner
//! behind the `quoteflow` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod logging;
mod output;
mod runner;

pub use commands::{
    CheckDataArgs, Cli, ColorArg, Commands, ConfigArgs, ConfigSource, InitArgs, LogFormat,
    RunArgs,
};
pub use config::{ColorChoice, RunConfig, Verbosity, DEFAULT_CONFIG_FILE};
pub use error::{CliError, CliResult};
pub use logging::{directive, init_logging};
pub use output::{step_line, ConsoleReporter};
pub use runner::{run_configured, run_journey};
