//! Core management types for jmx
//!
//! This crate provides the value types every other jmx crate builds on:
//!
//! - **Object names**: parsing, canonical form and wildcard matching of
//!   `domain:key=value,...` names ([`ObjectName`])
//! - **Descriptors**: case-insensitive metadata maps in an immutable and a
//!   mutable flavour ([`ImmutableDescriptor`], [`DescriptorSupport`])
//! - **Codec**: serde support and JSON helpers for both
//! - **Error handling**: one [`Error`] type with a coarse [`ErrorKind`]
//! - **Observability**: optional `tracing` subscriber setup
//!
//! # Overview
//!
//! Everything here is a plain value: immutable once built (except
//! [`DescriptorSupport`]), `Send + Sync`, and free of global state. Names are
//! canonicalized once at construction so equality, hashing and matching are
//! cheap afterwards.
//!
//! # Example
//!
//! ```rust
//! use jmx_core::{Descriptor, ImmutableDescriptor, ObjectName};
//!
//! let pattern = ObjectName::parse("java.lang:type=Memory*,*").unwrap();
//! let name = ObjectName::parse("java.lang:type=MemoryPool,name=Eden").unwrap();
//! assert!(pattern.apply(&name));
//!
//! let info = ImmutableDescriptor::from_fields(&["units=bytes"]).unwrap();
//! assert!(info.field_value("UNITS").unwrap().is_some());
//! ```

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod object_name;
pub mod observability;

pub use descriptor::{Descriptor, DescriptorSupport, ImmutableDescriptor};
pub use error::{Error, ErrorKind, Result};
pub use object_name::{KeyProperty, ObjectName};
pub use observability::{init_observability, ObservabilityConfig};
