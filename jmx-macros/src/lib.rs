//! Procedural macros for jmx
//!
//! # Available Macros
//!
//! ## `object_name!` - Compile-Time Checked Object Names
//!
//! Parses a string literal with the same grammar as
//! `jmx_core::ObjectName::parse` while the crate is being compiled. A
//! malformed literal becomes a compile error pointing at the literal, with
//! the parser's reason; a valid literal expands to an expression producing
//! the `ObjectName`.
//!
//! Without the macro, a typo in a constant name only shows up at runtime:
//!
//! ```ignore
//! let name = ObjectName::parse("java.lang:type=Memory,").unwrap(); // panics
//! ```
//!
//! With it, the same typo fails the build:
//!
//! ```ignore
//! let name = object_name!("java.lang:type=Memory,");
//! // error: invalid object name: Malformed object name: Invalid ending comma
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use jmx_macros::object_name;
//!
//! let memory = object_name!("java.lang:type=Memory");
//! let pools = object_name!("java.lang:type=MemoryPool,*");
//! assert!(pools.is_property_list_pattern());
//! ```

mod object_name;

use proc_macro::TokenStream;

/// Build a `jmx_core::ObjectName` from a string literal checked at compile time
///
/// The expansion refers to `::jmx_core`, so the calling crate must depend on
/// `jmx-core` (directly or through `jmx`).
///
/// # Errors
///
/// Compilation fails if the argument is not a single string literal or the
/// literal is not a valid object name.
#[proc_macro]
pub fn object_name(input: TokenStream) -> TokenStream {
    object_name::expand(input.into()).into()
}
