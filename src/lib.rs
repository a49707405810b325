//! JMX - Object names, descriptors and permissions for manageable objects
//!
//! This is the main convenience crate that re-exports all jmx sub-crates.
//!
//! # Architecture
//!
//! - **jmx-core**: Object names, descriptors, codec, error handling, observability
//! - **jmx-query**: Query expressions, name filters and a name index
//! - **jmx-security**: Permissions and action masks
//! - **jmx-macros**: Compile-time checked `object_name!`
//!
//! # Quick Start
//!
//! ```rust
//! use jmx::{MBeanPermission, NameIndex, ObjectName};
//!
//! let mut index = NameIndex::new();
//! index.insert(ObjectName::parse("java.lang:type=Memory").unwrap()).unwrap();
//! index.insert(ObjectName::parse("java.lang:type=Threading").unwrap()).unwrap();
//!
//! let pattern = ObjectName::parse("java.lang:type=Mem*").unwrap();
//! let found = index.query_names(Some(&pattern), None);
//! assert_eq!(found.len(), 1);
//!
//! let granted = MBeanPermission::new("*#*[java.lang:*]", "queryMBeans").unwrap();
//! let wanted = MBeanPermission::new("-#-[java.lang:type=Memory]", "queryNames").unwrap();
//! assert!(granted.implies(&wanted));
//! ```

// Re-export all public APIs from sub-crates
pub use jmx_core as core;
pub use jmx_macros as macros;
pub use jmx_query as query;
pub use jmx_security as security;

// Convenience re-exports of the most commonly used types
pub use jmx_core::{Descriptor, DescriptorSupport, ImmutableDescriptor, ObjectName};
pub use jmx_macros::object_name;
pub use jmx_query::{NameIndex, Query, QueryExp};
pub use jmx_security::{ActionMask, MBeanPermission};
