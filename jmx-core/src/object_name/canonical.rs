//! Canonical form of an object name
//!
//! The canonical string is `domain:k1=v1,k2=v2[,*]` with keys sorted by plain
//! code-point order (case-sensitive). It is built exactly once per name and is
//! the only thing equality and hashing look at.

use super::parser::ParsedName;
use super::property::PropertySpan;

/// Canonical string plus the properties rebased onto it
#[derive(Debug)]
pub(crate) struct Canonical {
    pub(crate) name: String,
    /// Properties in canonical (sorted) order, spans into `name`
    pub(crate) properties: Vec<PropertySpan>,
    /// `construction_order[i]` is the canonical index of the i-th property
    /// as originally given
    pub(crate) construction_order: Vec<usize>,
}

/// Build the canonical form of `parsed`, whose spans point into `source`
pub(crate) fn canonicalize(source: &str, parsed: &ParsedName) -> Canonical {
    let spans = &parsed.properties;

    // Stable, and keys are unique anyway
    let mut sorted: Vec<usize> = (0..spans.len()).collect();
    sorted.sort_by(|&a, &b| spans[a].key(source).cmp(spans[b].key(source)));

    let mut name = String::with_capacity(source.len() + 2);
    name.push_str(&source[..parsed.domain_len]);
    name.push(':');

    let mut properties = Vec::with_capacity(spans.len());
    let mut construction_order = vec![0; spans.len()];

    for (position, &original) in sorted.iter().enumerate() {
        let span = &spans[original];
        if position > 0 {
            name.push(',');
        }

        let key_start = name.len();
        name.push_str(span.key(source));
        let key_end = name.len();
        name.push('=');
        let value_start = name.len();
        name.push_str(span.value(source));

        properties.push(PropertySpan {
            key: key_start..key_end,
            value: value_start..name.len(),
            pattern: span.pattern,
        });
        construction_order[original] = position;
    }

    if parsed.flags.property_list {
        if !spans.is_empty() {
            name.push(',');
        }
        name.push('*');
    }

    Canonical {
        name,
        properties,
        construction_order,
    }
}
