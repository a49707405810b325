//! Permissions for management operations
//!
//! This crate models the permission checked before an operation on a
//! managed object is allowed:
//!
//! - **Actions**: the operations a permission grants ([`Action`], [`ActionMask`])
//! - **Targets**: which classes, members and object names it covers ([`Target`])
//! - **Permissions**: the two combined, with an `implies` check ([`MBeanPermission`])
//!
//! Every type here is an immutable value; nothing consults global state.
//!
//! # Example
//!
//! ```rust
//! use jmx_security::MBeanPermission;
//!
//! let policy = MBeanPermission::new("*#*[java.lang:*]", "getAttribute,queryMBeans").unwrap();
//! let request = MBeanPermission::new("-#HeapMemoryUsage[java.lang:type=Memory]", "getAttribute").unwrap();
//! assert!(policy.implies(&request));
//! ```

pub mod actions;
pub mod error;
pub mod permission;
pub mod target;

pub use actions::{Action, ActionMask};
pub use error::{PermissionError, Result};
pub use permission::MBeanPermission;
pub use target::{ClassNameMatch, Target};
