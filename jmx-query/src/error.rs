//! Errors for query construction and the name index

use thiserror::Error;

/// Error type for query operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The pattern string is not a valid object name
    #[error("Invalid name pattern: {0}")]
    InvalidPattern(#[from] jmx_core::Error),

    /// Only concrete names can be stored in a [`NameIndex`](crate::NameIndex)
    #[error("Cannot register a pattern name: {0}")]
    PatternNotAllowed(String),
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
