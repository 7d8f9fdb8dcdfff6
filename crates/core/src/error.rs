//! Error types for the shared core

use thiserror::Error;

/// A filter model that does not name an offered category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("invalid timestamp: {0:?}")]
    Invalid(String),
}
