//! Wildcard matching of object names
//!
//! A pattern name is matched against a concrete name in two independent
//! steps, both of which must succeed:
//!
//! - **Domain**: glob match if the pattern's domain is a pattern, otherwise
//!   exact equality
//! - **Keys**: every key named in the pattern must be present in the
//!   candidate with an equal (or glob-matching) value. A property-list
//!   pattern (`,*`) lets the candidate carry extra keys; a value pattern
//!   without `,*` requires the same number of keys
//!
//! # Wildcard Semantics
//!
//! - `*` - Matches any run of characters, including an empty one
//! - `?` - Matches exactly one character
//!
//! Matching is over raw characters and is case-sensitive. In a quoted value
//! a backslash escape is literal: `\*` matches only `\*`.
//!
//! # Examples
//!
//! ```rust
//! use jmx_core::ObjectName;
//!
//! let pattern = ObjectName::parse("d:type=F*o,name=Bar").unwrap();
//! assert!(pattern.apply(&ObjectName::parse("d:type=Frodo,name=Bar").unwrap()));
//! assert!(!pattern.apply(&ObjectName::parse("d:type=Frodo,name=Baz").unwrap()));
//! ```

use super::ObjectName;

/// One element of a compiled glob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `*`
    Any,
    /// `?`
    One,
    Literal(char),
}

/// Split `pattern` into tokens
///
/// With `escapes` set, a backslash and the character after it are both
/// literals, so `\*` matches only the two characters `\*`.
fn compile(pattern: &str, escapes: bool) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if escapes => {
                tokens.push(Token::Literal(c));
                if let Some(escaped) = chars.next() {
                    tokens.push(Token::Literal(escaped));
                }
            }
            '*' => tokens.push(Token::Any),
            '?' => tokens.push(Token::One),
            _ => tokens.push(Token::Literal(c)),
        }
    }
    tokens
}

/// Glob-match `text` against `pattern`
///
/// Greedy two-pointer matcher that backtracks to the most recent `*`.
pub fn wildmatch(text: &str, pattern: &str) -> bool {
    match_tokens(text, &compile(pattern, false))
}

/// Glob-match a key property value
///
/// Inside a quoted pattern value an escaped character is never a wildcard.
fn value_match(text: &str, pattern: &str) -> bool {
    match_tokens(text, &compile(pattern, pattern.starts_with('"')))
}

fn match_tokens(text: &str, pattern: &[Token]) -> bool {
    let text: Vec<char> = text.chars().collect();

    let (mut t, mut p) = (0, 0);
    // Position of the last `*` seen and the text index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(Token::Any) => {
                backtrack = Some((p, t));
                p += 1;
                continue;
            }
            Some(Token::One) => {
                p += 1;
                t += 1;
                continue;
            }
            Some(Token::Literal(c)) if *c == text[t] => {
                p += 1;
                t += 1;
                continue;
            }
            _ => {}
        }
        match backtrack {
            // Let the star swallow one more character
            Some((star, tried)) => {
                p = star + 1;
                t = tried + 1;
                backtrack = Some((star, tried + 1));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|token| *token == Token::Any)
}

impl ObjectName {
    /// Test whether `name` is matched by this name
    ///
    /// `name` must be concrete: a pattern never matches another pattern,
    /// even a textually identical one. If `self` is not a pattern this is
    /// plain equality.
    pub fn apply(&self, name: &ObjectName) -> bool {
        if name.is_pattern() {
            return false;
        }
        if !self.is_pattern() {
            return self.canonical_name() == name.canonical_name();
        }
        self.match_domains(name) && self.match_keys(name)
    }

    fn match_domains(&self, name: &ObjectName) -> bool {
        if self.is_domain_pattern() {
            wildmatch(name.domain(), self.domain())
        } else {
            self.domain() == name.domain()
        }
    }

    fn match_keys(&self, name: &ObjectName) -> bool {
        // A value pattern on its own must not match a superset of keys
        if self.is_property_value_pattern()
            && !self.is_property_list_pattern()
            && name.key_count() != self.key_count()
        {
            return false;
        }

        if self.is_property_pattern() {
            return self.canonical_key_properties().all(|property| {
                match name.key_property(property.key()) {
                    None => false,
                    Some(value) if property.is_pattern() => value_match(value, property.value()),
                    Some(value) => value == property.value(),
                }
            });
        }

        name.canonical_key_property_list_string() == self.canonical_key_property_list_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ObjectName {
        ObjectName::parse(s).unwrap()
    }

    #[test]
    fn test_wildmatch_literal() {
        assert!(wildmatch("abc", "abc"));
        assert!(!wildmatch("abc", "abd"));
        assert!(!wildmatch("abc", "ab"));
        assert!(wildmatch("", ""));
    }

    #[test]
    fn test_wildmatch_question_mark() {
        assert!(wildmatch("Foo", "F?o"));
        assert!(wildmatch("Fro", "F?o"));
        assert!(!wildmatch("Fo", "F?o"));
        assert!(!wildmatch("Frodo", "F?o"));
    }

    #[test]
    fn test_wildmatch_star() {
        assert!(wildmatch("Fo", "F*o"));
        assert!(wildmatch("Frodo", "F*o"));
        assert!(!wildmatch("Frod", "F*o"));
        assert!(wildmatch("", "*"));
        assert!(wildmatch("anything", "*"));
        assert!(wildmatch("abcabc", "*abc"));
        assert!(wildmatch("mississippi", "m*iss*ppi"));
        assert!(wildmatch("ab", "a**b"));
        assert!(!wildmatch("", "?"));
    }

    #[test]
    fn test_wildmatch_is_case_sensitive() {
        assert!(!wildmatch("foo", "F*"));
    }

    #[test]
    fn test_value_match_escapes() {
        assert!(value_match(r#""a\*bzz""#, r#""a\*b*""#));
        assert!(!value_match(r#""a\\QQbzz""#, r#""a\*b*""#));
        assert!(value_match(r#""a\?x""#, r#""a\??""#));
        assert!(!value_match(r#""abx""#, r#""a\??""#));
        // Unquoted values have no escapes
        assert!(value_match(r"a\x", r"a\?"));
    }

    #[test]
    fn test_apply_escaped_star_is_literal() {
        let pattern = name(r#"d:name="a\*b*""#);
        assert!(pattern.is_property_value_pattern());
        assert!(pattern.apply(&name(r#"d:name="a\*bzz""#)));
        assert!(!pattern.apply(&name(r#"d:name="a\\QQbzz""#)));
        assert!(!pattern.apply(&name(r#"d:name="aQQbzz""#)));
    }

    #[test]
    fn test_apply_exact() {
        let exact = name("d:type=Foo,name=Bar");
        assert!(exact.apply(&name("d:name=Bar,type=Foo")));
        assert!(!exact.apply(&name("d:type=Foo")));
    }

    #[test]
    fn test_apply_domain_pattern() {
        let pattern = name("*:type=Foo,name=Bar");
        assert!(pattern.apply(&name("d:type=Foo,name=Bar")));
        assert!(pattern.apply(&name("other:name=Bar,type=Foo")));
        assert!(!pattern.apply(&name("d:type=Foo,name=Bar,extra=1")));

        let pattern = name("jm?.*:type=Foo");
        assert!(pattern.apply(&name("jmx.server:type=Foo")));
        assert!(!pattern.apply(&name("java.lang:type=Foo")));
    }

    #[test]
    fn test_apply_list_pattern() {
        let pattern = name("d:type=Foo,name=Bar,*");
        assert!(pattern.apply(&name("d:type=Foo,name=Bar,extra=1")));
        assert!(pattern.apply(&name("d:type=Foo,name=Bar")));
        assert!(!pattern.apply(&name("d:type=Foo,extra=1")));
        assert!(!pattern.apply(&name("e:type=Foo,name=Bar")));
    }

    #[test]
    fn test_apply_value_pattern() {
        let pattern = name("d:type=F?o,name=Bar");
        assert!(pattern.apply(&name("d:type=Foo,name=Bar")));
        assert!(pattern.apply(&name("d:type=Fro,name=Bar")));
        assert!(!pattern.apply(&name("d:type=Frodo,name=Bar")));

        let pattern = name("d:type=F*o,name=Bar");
        assert!(pattern.apply(&name("d:type=Fo,name=Bar")));
        assert!(pattern.apply(&name("d:type=Frodo,name=Bar")));
    }

    #[test]
    fn test_value_pattern_requires_same_key_count() {
        let pattern = name("d:type=F*");
        assert!(pattern.apply(&name("d:type=Foo")));
        assert!(!pattern.apply(&name("d:type=Foo,name=Bar")));

        let pattern = name("d:type=F*,*");
        assert!(pattern.apply(&name("d:type=Foo,name=Bar")));
    }

    #[test]
    fn test_missing_key_is_a_mismatch() {
        let pattern = name("d:type=*,name=Bar");
        assert!(!pattern.apply(&name("d:kind=Foo,name=Bar")));
    }

    #[test]
    fn test_pattern_never_matches_pattern() {
        let pattern = name("d:type=Foo,*");
        assert!(!pattern.apply(&name("d:type=Foo,*")));
        assert!(!pattern.apply(&pattern.clone()));
        assert!(!name("d:type=Foo").apply(&pattern));
    }

    #[test]
    fn test_wildcard_matches_everything_concrete() {
        let all = ObjectName::wildcard();
        assert!(all.apply(&name("d:type=Foo")));
        assert!(all.apply(&name(":a=b")));
    }
}
