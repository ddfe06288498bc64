//! Error types for logger setup

use thiserror::Error;

/// Logger setup errors
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// Level filter could not be parsed
    #[error("invalid filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    /// Unknown output format name
    #[error("unknown log format '{0}' (expected pretty, compact or json)")]
    Format(String),

    /// A global subscriber is already installed
    #[error("logger initialization failed: {0}")]
    Init(String),
}

impl LogError {
    /// Create a filter parsing error
    pub fn filter(filter: impl Into<String>, reason: impl ToString) -> Self {
        Self::Filter {
            filter: filter.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an initialization error
    pub fn init(reason: impl ToString) -> Self {
        Self::Init(reason.to_string())
    }
}

/// Result type for logger operations
pub type LogResult<T> = Result<T, LogError>;
