//! Errors raised while building permissions

use thiserror::Error;

/// Why a permission name or action list was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The target name is the empty string
    #[error("MBeanPermission name cannot be empty")]
    EmptyName,

    /// A `[` was found but the name does not end with `]`
    #[error("MBeanPermission: The ObjectName in the target name must be included in square brackets")]
    MissingBrackets,

    /// The bracketed segment is not a valid object name
    #[error("MBeanPermission: The target name does not specify a valid ObjectName")]
    InvalidObjectName(#[source] jmx_core::Error),

    /// The action string is empty
    #[error("MBeanPermission: actions can't be empty")]
    EmptyActions,

    /// The action string contains something other than known actions,
    /// commas and whitespace
    #[error("Invalid permission: {0}")]
    InvalidAction(String),

    /// The actions decode to no action at all
    #[error("Invalid actions mask")]
    NoActions,
}

/// Result type for permission construction
pub type Result<T> = std::result::Result<T, PermissionError>;
