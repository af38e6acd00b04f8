//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Test data is missing fields the journey needs
    #[error("Test data incomplete: missing {fields}")]
    DataIncomplete {
        /// Comma-separated column names
        fields: String,
    },

    /// The journey stopped before reaching its last state
    #[error("Journey failed in {state}: {message}")]
    JourneyFailed {
        /// State the run stopped in
        state: String,
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Quoteflow library error
    #[error("Quoteflow error: {0}")]
    Quote(#[from] quoteflow::QuoteError),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_journey_failed_names_state() {
        let err = CliError::JourneyFailed {
            state: "insurant_data".to_string(),
            message: "Column 'FirstName' not found in test data".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("insurant_data"));
        assert!(msg.contains("FirstName"));
    }

    #[test]
    fn test_quote_error_from() {
        let err: CliError = quoteflow::QuoteError::ColumnNotFound {
            column: "City".to_string(),
        }
        .into();
        assert!(err.to_string().contains("City"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
