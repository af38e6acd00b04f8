//! Tracing subscriber setup

use crate::commands::LogFormat;
use crate::config::Verbosity;
use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level
///
/// `None` defers to `RUST_LOG`.
#[must_use]
pub const fn directive(verbosity: Verbosity) -> Option<&'static str> {
    match verbosity {
        Verbosity::Quiet => Some("error"),
        Verbosity::Normal => None,
        Verbosity::Verbose => Some("quoteflow=info,quoteflow_cli=info"),
        Verbosity::Debug => Some("quoteflow=debug,quoteflow_cli=debug"),
    }
}

/// Install the global subscriber; later calls are ignored
///
/// `-v`/`-q` take precedence over `RUST_LOG`, which defaults to `warn`.
pub fn init_logging(verbosity: Verbosity, format: LogFormat) {
    let filter = directive(verbosity).map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        EnvFilter::new,
    );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
