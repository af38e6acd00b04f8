//! Result and error types for quoteflow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for quoteflow operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Errors that can occur while running a journey
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Test data source could not be opened or parsed
    #[error("Test data source {path} is unreadable: {message}")]
    SourceUnreadable {
        /// Path of the data source
        path: String,
        /// Error message
        message: String,
    },

    /// No header in row 0 matches the requested column
    #[error("Column '{column}' not found in test data")]
    ColumnNotFound {
        /// Requested column header
        column: String,
    },

    /// Requested row lies outside the populated range
    #[error("Row {row} of column '{column}' is out of range ({rows} rows populated)")]
    RowOutOfRange {
        /// Requested column header
        column: String,
        /// Requested row index
        row: usize,
        /// Number of populated rows, header included
        rows: usize,
    },

    /// No node matched the control's selector within the wait budget
    #[error("Element '{label}' ({selector}) not found after {timeout_ms}ms")]
    ElementNotFound {
        /// Control label
        label: String,
        /// Selector used for resolution
        selector: String,
        /// Wait budget in milliseconds
        timeout_ms: u64,
    },

    /// Node is present but cannot receive input
    #[error("Element '{label}' is not interactable: {reason}")]
    NotInteractable {
        /// Control label
        label: String,
        /// Why the node rejected input
        reason: String,
    },

    /// List box has no option with the requested visible text
    #[error("Option '{option}' not found in '{label}'")]
    OptionNotFound {
        /// Control label
        label: String,
        /// Requested visible text
        option: String,
    },

    /// Node is present but not rendered
    #[error("Verification failed: '{label}' is not displayed")]
    VerificationFailed {
        /// Control label
        label: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Driver-level failure outside the element contract
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Discriminant of [`QuoteError`] for reports and matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteErrorKind {
    /// See [`QuoteError::SourceUnreadable`]
    SourceUnreadable,
    /// See [`QuoteError::ColumnNotFound`]
    ColumnNotFound,
    /// See [`QuoteError::RowOutOfRange`]
    RowOutOfRange,
    /// See [`QuoteError::ElementNotFound`]
    ElementNotFound,
    /// See [`QuoteError::NotInteractable`]
    NotInteractable,
    /// See [`QuoteError::OptionNotFound`]
    OptionNotFound,
    /// See [`QuoteError::VerificationFailed`]
    VerificationFailed,
    /// Browser, navigation and driver plumbing
    Driver,
    /// I/O and serialization
    Io,
}

impl QuoteError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Get the error kind
    #[must_use]
    pub const fn kind(&self) -> QuoteErrorKind {
        match self {
            Self::SourceUnreadable { .. } => QuoteErrorKind::SourceUnreadable,
            Self::ColumnNotFound { .. } => QuoteErrorKind::ColumnNotFound,
            Self::RowOutOfRange { .. } => QuoteErrorKind::RowOutOfRange,
            Self::ElementNotFound { .. } => QuoteErrorKind::ElementNotFound,
            Self::NotInteractable { .. } => QuoteErrorKind::NotInteractable,
            Self::OptionNotFound { .. } => QuoteErrorKind::OptionNotFound,
            Self::VerificationFailed { .. } => QuoteErrorKind::VerificationFailed,
            Self::BrowserLaunch { .. } | Self::Navigation { .. } | Self::Driver { .. } => {
                QuoteErrorKind::Driver
            }
            Self::Io(_) | Self::Json(_) => QuoteErrorKind::Io,
        }
    }

    /// Whether the failure came from the test data layer
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self.kind(),
            QuoteErrorKind::SourceUnreadable
                | QuoteErrorKind::ColumnNotFound
                | QuoteErrorKind::RowOutOfRange
        )
    }
}
