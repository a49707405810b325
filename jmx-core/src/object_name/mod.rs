//! Structured, pattern-matchable object names
//!
//! An object name addresses a manageable object. It consists of a domain and
//! an unordered list of `key=value` properties:
//!
//! ```text
//! java.lang:type=MemoryPool,name="Eden Space"
//! ```
//!
//! A name can also be a pattern along three independent dimensions:
//!
//! - **Domain pattern**: the domain contains `*` or `?`
//! - **Property-list pattern**: the list ends with a bare `*`, allowing extra keys
//! - **Property-value pattern**: some value contains an unescaped `*` or `?`
//!
//! # Canonical Form
//!
//! Every name is reduced once, at construction, to a canonical string in
//! which the properties are sorted by key. Equality and hashing use only that
//! string, so `d:a=1,b=2` and `d:b=2,a=1` are the same name. An
//! [`ObjectName`] is immutable; a "changed" name is always a new value.
//!
//! # Examples
//!
//! ```rust
//! use jmx_core::ObjectName;
//!
//! let name = ObjectName::parse("d:type=Foo,name=Bar").unwrap();
//! assert_eq!(name.canonical_name(), "d:name=Bar,type=Foo");
//! assert_eq!(name.to_string(), "d:type=Foo,name=Bar");
//! assert_eq!(name.key_property("type"), Some("Foo"));
//!
//! let pattern = ObjectName::parse("d:type=Foo,*").unwrap();
//! assert!(pattern.is_property_list_pattern());
//! assert!(pattern.apply(&name));
//! ```

mod canonical;
mod matcher;
mod parser;
mod property;
mod quote;

pub use matcher::wildmatch;
pub use property::KeyProperty;
pub use quote::{quote, unquote};

use crate::error::{Error, Result};
use parser::ParsedName;
use property::PropertySpan;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Which pattern dimensions a name has
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PatternFlags {
    pub(crate) domain: bool,
    pub(crate) property_list: bool,
    pub(crate) property_value: bool,
}

/// An immutable, canonicalized object name
///
/// Construct with [`ObjectName::parse`], [`ObjectName::new`] or
/// [`ObjectName::from_properties`]. All accessors borrow from a single
/// canonical buffer.
#[derive(Clone)]
pub struct ObjectName {
    canonical: String,
    domain_len: usize,
    /// Sorted by key, spans into `canonical`
    properties: Vec<PropertySpan>,
    /// Canonical index of each property in construction order
    construction_order: Vec<usize>,
    flags: PatternFlags,
}

impl ObjectName {
    /// Parse a name string
    ///
    /// The empty string is accepted and yields [`ObjectName::wildcard`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedObjectName`] with the specific rule that was
    /// broken.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Ok(Self::wildcard());
        }

        match parser::parse(name) {
            Ok(parsed) => {
                let object_name = Self::from_parsed(name, &parsed);
                tracing::trace!(canonical = %object_name.canonical, "Parsed object name");
                Ok(object_name)
            }
            Err(e) => {
                tracing::debug!(input = %name.escape_debug(), error = %e, "Rejected object name");
                Err(e)
            }
        }
    }

    /// Build a name with a single key property
    ///
    /// ```rust
    /// use jmx_core::ObjectName;
    ///
    /// let name = ObjectName::new("d", "type", "Foo").unwrap();
    /// assert_eq!(name.canonical_name(), "d:type=Foo");
    /// ```
    pub fn new(domain: &str, key: &str, value: &str) -> Result<Self> {
        Self::from_properties(domain, [(key, value)])
    }

    /// Build a name from a domain and a list of key properties
    ///
    /// The iteration order becomes the construction order used by
    /// [`Display`](fmt::Display). Keys and values obey the same character
    /// rules as in a parsed string; values may be quoted or patterns.
    ///
    /// # Errors
    ///
    /// - `"key property list cannot be empty"` for an empty list
    /// - `"Invalid domain: ..."` if the domain contains `:` or a newline
    /// - a key or value error, or a duplicate key
    pub fn from_properties<I, K, V>(domain: &str, properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut flags = PatternFlags {
            domain: parser::check_domain(domain)?,
            ..PatternFlags::default()
        };

        let mut source = String::with_capacity(domain.len() + 16);
        source.push_str(domain);
        source.push(':');

        let mut spans = Vec::new();
        let mut seen = HashSet::new();
        for (key, value) in properties {
            let (key, value) = (key.as_ref(), value.as_ref());
            parser::check_key(key)?;
            let pattern = parser::check_value(value)?;
            if !seen.insert(key.to_string()) {
                return Err(Error::malformed(format!("key `{}' already defined", key)));
            }

            if !spans.is_empty() {
                source.push(',');
            }
            let key_start = source.len();
            source.push_str(key);
            let key_end = source.len();
            source.push('=');
            let value_start = source.len();
            source.push_str(value);

            spans.push(PropertySpan {
                key: key_start..key_end,
                value: value_start..source.len(),
                pattern,
            });
            flags.property_value |= pattern;
        }

        if spans.is_empty() {
            return Err(Error::malformed("key property list cannot be empty"));
        }

        let parsed = ParsedName {
            domain_len: domain.len(),
            properties: spans,
            flags,
        };
        Ok(Self::from_parsed(&source, &parsed))
    }

    /// The name matching every name: `*:*`
    pub fn wildcard() -> Self {
        Self {
            canonical: "*:*".to_string(),
            domain_len: 1,
            properties: Vec::new(),
            construction_order: Vec::new(),
            flags: PatternFlags {
                domain: true,
                property_list: true,
                property_value: false,
            },
        }
    }

    fn from_parsed(source: &str, parsed: &ParsedName) -> Self {
        let canonical = canonical::canonicalize(source, parsed);
        Self {
            canonical: canonical.name,
            domain_len: parsed.domain_len,
            properties: canonical.properties,
            construction_order: canonical.construction_order,
            flags: parsed.flags,
        }
    }

    /// The canonical string: keys sorted, `,*` appended for list patterns
    pub fn canonical_name(&self) -> &str {
        &self.canonical
    }

    /// The domain part
    pub fn domain(&self) -> &str {
        &self.canonical[..self.domain_len]
    }

    /// Value of `key`, raw (quoted values keep their quotes)
    pub fn key_property(&self, key: &str) -> Option<&str> {
        self.find(key)
            .map(|index| self.properties[index].value(&self.canonical))
    }

    /// Owned map of all key properties
    pub fn key_property_list(&self) -> HashMap<String, String> {
        self.canonical_key_properties()
            .map(|p| (p.key().to_string(), p.value().to_string()))
            .collect()
    }

    /// Key properties in the order they were given
    pub fn key_properties(&self) -> impl Iterator<Item = KeyProperty<'_>> + '_ {
        self.construction_order
            .iter()
            .map(move |&index| self.properties[index].view(&self.canonical))
    }

    /// Key properties in canonical (sorted) order
    pub fn canonical_key_properties(&self) -> impl Iterator<Item = KeyProperty<'_>> + '_ {
        self.properties
            .iter()
            .map(move |span| span.view(&self.canonical))
    }

    /// `k=v,...` in construction order, without the pattern marker
    ///
    /// Rebuilt on every call.
    pub fn key_property_list_string(&self) -> String {
        self.construction_order
            .iter()
            .map(|&index| self.properties[index].text(&self.canonical))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `k=v,...` in canonical order, without the pattern marker
    pub fn canonical_key_property_list_string(&self) -> &str {
        if self.properties.is_empty() {
            return "";
        }
        let mut end = self.canonical.len();
        if self.flags.property_list {
            end -= 2;
        }
        &self.canonical[self.domain_len + 1..end]
    }

    /// Whether any of the three pattern dimensions is set
    pub fn is_pattern(&self) -> bool {
        self.flags.domain || self.flags.property_list || self.flags.property_value
    }

    /// Whether the domain contains `*` or `?`
    pub fn is_domain_pattern(&self) -> bool {
        self.flags.domain
    }

    /// Whether this is a property-list or property-value pattern
    pub fn is_property_pattern(&self) -> bool {
        self.flags.property_list || self.flags.property_value
    }

    /// Whether the property list ends with `*`
    pub fn is_property_list_pattern(&self) -> bool {
        self.flags.property_list
    }

    /// Whether any property value is a wildcard
    pub fn is_property_value_pattern(&self) -> bool {
        self.flags.property_value
    }

    /// Whether the value of `key` is a wildcard
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the name has no such key.
    pub fn is_property_value_pattern_for(&self, key: &str) -> Result<bool> {
        self.find(key)
            .map(|index| self.properties[index].pattern)
            .ok_or_else(|| Error::invalid(format!("key property not found: {}", key)))
    }

    pub(crate) fn key_count(&self) -> usize {
        self.properties.len()
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.properties
            .binary_search_by(|span| span.key(&self.canonical).cmp(key))
            .ok()
    }

    fn write_key_properties<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for (i, &index) in self.construction_order.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            out.write_str(self.properties[index].text(&self.canonical))?;
        }
        Ok(())
    }
}

impl fmt::Display for ObjectName {
    /// Construction-order form, e.g. `d:type=Foo,name=Bar,*`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())?;
        f.write_str(":")?;
        self.write_key_properties(f)?;
        if self.flags.property_list {
            if !self.properties.is_empty() {
                f.write_str(",")?;
            }
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectName").field(&self.canonical).finish()
    }
}

impl FromStr for ObjectName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for ObjectName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ObjectName {}

impl Hash for ObjectName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl Ord for ObjectName {
    /// Domain first, then the `type` key (missing sorts as empty), then the
    /// canonical name
    fn cmp(&self, other: &Self) -> Ordering {
        self.domain()
            .cmp(other.domain())
            .then_with(|| {
                let mine = self.key_property("type").unwrap_or("");
                let theirs = other.key_property("type").unwrap_or("");
                mine.cmp(theirs)
            })
            .then_with(|| self.canonical.cmp(&other.canonical))
    }
}

impl PartialOrd for ObjectName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
