//! Key properties of an object name
//!
//! A parsed property never owns its text. It records byte ranges into the
//! string it was read from; once the canonical name is built, the ranges are
//! rebased onto the canonical string so a name carries a single buffer.

use std::ops::Range;

/// A key property located by byte ranges into a backing string
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertySpan {
    pub(crate) key: Range<usize>,
    pub(crate) value: Range<usize>,
    /// Value contains an unescaped `*` or `?`
    pub(crate) pattern: bool,
}

impl PropertySpan {
    pub(crate) fn key<'a>(&self, source: &'a str) -> &'a str {
        &source[self.key.clone()]
    }

    pub(crate) fn value<'a>(&self, source: &'a str) -> &'a str {
        &source[self.value.clone()]
    }

    /// `key=value` as it appears in `source`
    pub(crate) fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.key.start..self.value.end]
    }

    pub(crate) fn view<'a>(&self, source: &'a str) -> KeyProperty<'a> {
        KeyProperty {
            key: self.key(source),
            value: self.value(source),
            pattern: self.pattern,
        }
    }
}

/// A borrowed `key=value` pair of an [`ObjectName`](super::ObjectName)
///
/// Quoted values are returned verbatim, quotes and escapes included, which
/// is how they take part in canonical comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyProperty<'a> {
    key: &'a str,
    value: &'a str,
    pattern: bool,
}

impl<'a> KeyProperty<'a> {
    /// The property key
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// The raw property value
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// Whether the value is a wildcard pattern
    pub fn is_pattern(&self) -> bool {
        self.pattern
    }
}
