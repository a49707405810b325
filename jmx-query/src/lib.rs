//! Query expressions and name lookup for jmx
//!
//! This crate builds on the object-name matching in `jmx-core`:
//!
//! - **Query expressions**: boolean combinations of name predicates
//!   ([`QueryExp`], [`Query`])
//! - **Filters**: exact-or-pattern name filters ([`NameFilter`])
//! - **Index**: a domain-grouped set of registered names answering
//!   pattern-plus-expression queries ([`NameIndex`])
//!
//! # Example
//!
//! ```rust
//! use jmx_core::ObjectName;
//! use jmx_query::{NameIndex, Query};
//!
//! let mut index = NameIndex::new();
//! index.insert(ObjectName::parse("app:type=Cache,name=users").unwrap()).unwrap();
//! index.insert(ObjectName::parse("app:type=Cache,name=sessions").unwrap()).unwrap();
//!
//! let skip_sessions = Query::not(Query::matches("*:name=sessions,*").unwrap());
//! let found = index.query_names(None, Some(&skip_sessions));
//! assert_eq!(found[0].key_property("name"), Some("users"));
//! ```

pub mod error;
pub mod filter;
pub mod query;

pub use error::{QueryError, Result};
pub use filter::{NameFilter, NameIndex};
pub use query::{AndQueryExp, NotQueryExp, OrQueryExp, Query, QueryExp};
