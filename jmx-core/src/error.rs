//! Error types for jmx
//!
//! Every operation in this crate either returns a fully valid, immutable value
//! or fails with one of the errors below. Nothing is partially constructed and
//! no existing value is ever left half-modified.
//!
//! # Error Categories
//!
//! The variants fall into a handful of categories, exposed through
//! [`Error::kind`] so callers can branch on the category rather than on the
//! message text:
//!
//! - **Malformed input**: a name string that violates the object-name grammar
//! - **Invalid argument**: a structurally required argument is empty or illegal
//! - **Read-only**: a mutating operation targeted an immutable value
//! - **Consistency**: duplicate fields or conflicting values during a merge
//! - **Serialization**: a codec failure
//!
//! # Examples
//!
//! ```rust
//! use jmx_core::{Error, ErrorKind, ObjectName};
//!
//! let err = ObjectName::parse("d:a=1,a=2").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Malformed);
//! assert!(err.to_string().contains("already defined"));
//! ```

use thiserror::Error;

/// Result type for jmx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Application-level error type for jmx operations
///
/// A malformed name reports the rule it broke, e.g. `"Invalid key (empty)"`
/// or `"Unterminated quoted value"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input violates the object-name grammar
    ///
    /// Holds the precise reason, for example `"Domain part must be specified"`.
    #[error("Malformed object name: {0}")]
    MalformedObjectName(String),

    /// A required argument is empty or otherwise illegal
    ///
    /// This is the "null argument" class: empty field names, mismatched
    /// array lengths, lookups of keys that do not exist.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A mutating operation was attempted on an immutable value
    #[error("Read-only: {0}")]
    ReadOnly(String),

    /// Two descriptors disagree on the value of a field during a merge
    #[error("Inconsistent values for descriptor field {field}: {existing} :: {conflicting}")]
    InconsistentValues {
        /// Field name, as first seen
        field: String,
        /// Value already present in the merge
        existing: String,
        /// Value that conflicts with it
        conflicting: String,
    },

    /// The same descriptor field was given twice (compared case-insensitively)
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Grammar violation in a name
    Malformed,
    /// Empty or illegal argument
    InvalidArgument,
    /// Mutation of an immutable value
    ReadOnly,
    /// Duplicate or conflicting data
    Consistency,
    /// Codec failure
    Serialization,
}

impl Error {
    /// Shorthand for a [`Error::MalformedObjectName`]
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedObjectName(reason.into())
    }

    /// Shorthand for a [`Error::InvalidArgument`]
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidArgument(reason.into())
    }

    /// The category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedObjectName(_) => ErrorKind::Malformed,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::ReadOnly(_) => ErrorKind::ReadOnly,
            Error::InconsistentValues { .. } | Error::DuplicateField(_) => {
                ErrorKind::Consistency
            }
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_serde() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json"#).unwrap_err();
        let error: Error = serde_error.into();

        match error {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_kinds() {
        let cases = vec![
            (Error::malformed("Invalid key (empty)"), ErrorKind::Malformed),
            (Error::invalid("Null or empty field name"), ErrorKind::InvalidArgument),
            (Error::ReadOnly("descriptor".into()), ErrorKind::ReadOnly),
            (Error::DuplicateField("a".into()), ErrorKind::Consistency),
            (
                Error::InconsistentValues {
                    field: "a".into(),
                    existing: "1".into(),
                    conflicting: "2".into(),
                },
                ErrorKind::Consistency,
            ),
            (Error::Serialization("eof".into()), ErrorKind::Serialization),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn test_inconsistent_values_display() {
        let error = Error::InconsistentValues {
            field: "Severity".into(),
            existing: "1".into(),
            conflicting: "2".into(),
        };
        let display = error.to_string();

        assert!(display.contains("Severity"));
        assert!(display.contains("1 :: 2"));
    }

    #[test]
    fn test_malformed_display_keeps_reason() {
        let error = Error::malformed("Unterminated quoted value");
        assert_eq!(
            error.to_string(),
            "Malformed object name: Unterminated quoted value"
        );
    }
}
