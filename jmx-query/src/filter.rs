//! Name filtering and a queryable index of registered names
//!
//! [`NameFilter`] wraps a name that is either matched exactly or used as a
//! wildcard pattern; the kind is decided by the name itself.
//!
//! [`NameIndex`] is the name-side half of a managed-object registry: it
//! stores concrete names grouped by domain and answers the same queries an
//! object server answers for "list the names matching this pattern and
//! this expression".
//!
//! # Examples
//!
//! ```rust
//! use jmx_core::ObjectName;
//! use jmx_query::NameIndex;
//!
//! let mut index = NameIndex::new();
//! for name in ["java.lang:type=Memory", "java.lang:type=Threading", "app:type=Cache,name=a"] {
//!     index.insert(ObjectName::parse(name).unwrap()).unwrap();
//! }
//!
//! let pattern = ObjectName::parse("java.lang:*").unwrap();
//! let found = index.query_names(Some(&pattern), None);
//! assert_eq!(found.len(), 2);
//! ```

use crate::error::{QueryError, Result};
use crate::query::QueryExp;
use jmx_core::ObjectName;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Name filter for selecting registered names
///
/// # Variants
///
/// - **Exact**: canonical-name equality
/// - **Pattern**: wildcard matching with [`ObjectName::apply`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameFilter {
    /// A concrete name
    Exact(ObjectName),

    /// A name with at least one pattern dimension
    Pattern(ObjectName),
}

impl NameFilter {
    /// Parse a filter; the result is a pattern if the name is one
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self::from_name(ObjectName::parse(name)?))
    }

    /// Wrap an already-parsed name
    pub fn from_name(name: ObjectName) -> Self {
        if name.is_pattern() {
            NameFilter::Pattern(name)
        } else {
            NameFilter::Exact(name)
        }
    }

    /// Check if a name passes this filter
    pub fn matches(&self, name: &ObjectName) -> bool {
        match self {
            NameFilter::Exact(exact) => exact == name,
            NameFilter::Pattern(pattern) => pattern.apply(name),
        }
    }

    /// The wrapped name
    pub fn as_name(&self) -> &ObjectName {
        match self {
            NameFilter::Exact(name) | NameFilter::Pattern(name) => name,
        }
    }
}

impl QueryExp for NameFilter {
    fn apply(&self, name: &ObjectName) -> bool {
        self.matches(name)
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_name(), f)
    }
}

/// Concrete names grouped by domain
#[derive(Debug, Default, Clone)]
pub struct NameIndex {
    /// Domain to names in that domain
    domains: BTreeMap<String, BTreeSet<ObjectName>>,
    len: usize,
}

impl NameIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns `false` if it was already present
    ///
    /// # Errors
    ///
    /// [`QueryError::PatternNotAllowed`] for a pattern name.
    pub fn insert(&mut self, name: ObjectName) -> Result<bool> {
        if name.is_pattern() {
            return Err(QueryError::PatternNotAllowed(name.to_string()));
        }
        tracing::trace!(name = %name, "Registering name");
        let added = self
            .domains
            .entry(name.domain().to_string())
            .or_default()
            .insert(name);
        if added {
            self.len += 1;
        }
        Ok(added)
    }

    /// Remove a name; returns whether it was present
    pub fn remove(&mut self, name: &ObjectName) -> bool {
        let Some(names) = self.domains.get_mut(name.domain()) else {
            return false;
        };
        let removed = names.remove(name);
        if names.is_empty() {
            self.domains.remove(name.domain());
        }
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &ObjectName) -> bool {
        self.domains
            .get(name.domain())
            .is_some_and(|names| names.contains(name))
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no names are registered
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Domains with at least one name, sorted
    pub fn domains(&self) -> Vec<&str> {
        self.domains.keys().map(String::as_str).collect()
    }

    /// Every registered name, sorted
    pub fn names(&self) -> impl Iterator<Item = &ObjectName> {
        self.domains.values().flatten()
    }

    /// Names selected by `name` and `query`, sorted
    ///
    /// - `name` of `None` (or `*:*`) selects every name; a concrete name
    ///   selects at most itself; a pattern selects what it matches
    /// - `query`, if given, must also hold
    #[tracing::instrument(level = "debug", skip(self, query), fields(filtered = query.is_some()))]
    pub fn query_names(
        &self,
        name: Option<&ObjectName>,
        query: Option<&dyn QueryExp>,
    ) -> Vec<ObjectName> {
        let candidates: Box<dyn Iterator<Item = &ObjectName> + '_> = match name {
            None => Box::new(self.names()),
            Some(exact) if !exact.is_pattern() => Box::new(
                self.domains
                    .get(exact.domain())
                    .and_then(|names| names.get(exact))
                    .into_iter(),
            ),
            Some(pattern) if !pattern.is_domain_pattern() => Box::new(
                self.domains
                    .get(pattern.domain())
                    .into_iter()
                    .flatten()
                    .filter(move |candidate| pattern.apply(candidate)),
            ),
            Some(pattern) => Box::new(self.names().filter(move |candidate| pattern.apply(candidate))),
        };

        let found: Vec<ObjectName> = candidates
            .filter(|candidate| query.map_or(true, |q| q.apply(candidate)))
            .cloned()
            .collect();

        tracing::trace!(matched = found.len(), "Name query complete");
        found
    }
}
