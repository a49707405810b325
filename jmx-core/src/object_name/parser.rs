//! Object-name grammar
//!
//! ```text
//! name        := "" | domain ":" properties
//! domain      := char*                 (no ':' or '\n'; '*'/'?' mark pattern)
//! properties  := "*" | property ("," property)* ["," "*"]
//! property    := key "=" value
//! key         := char+                 (no '*', '?', ',', ':', '\n')
//! value       := quoted | unquoted
//! quoted      := '"' qchar* '"'
//! qchar       := any-char-except('"', '\n', '\\') | '\\' ('\\' | '"' | '*' | '?' | 'n')
//! unquoted    := char*                 (no '=', ':', '"', '\n'; ',' terminates)
//! ```
//!
//! All delimiters are ASCII, so the scanner walks bytes; every offset it
//! stops at is therefore a char boundary of the input.

use super::property::PropertySpan;
use super::PatternFlags;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Result of scanning a non-empty name string
#[derive(Debug)]
pub(crate) struct ParsedName {
    /// Byte length of the domain; the `:` sits right after it
    pub(crate) domain_len: usize,
    /// Properties in construction order, spans into the scanned string
    pub(crate) properties: Vec<PropertySpan>,
    pub(crate) flags: PatternFlags,
}

/// Scan a non-empty name string
pub(crate) fn parse(input: &str) -> Result<ParsedName> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut flags = PatternFlags::default();

    let domain_len = scan_domain(input, &mut flags)?;
    let mut index = domain_len + 1;
    if index == len {
        return Err(Error::malformed("Key properties cannot be empty"));
    }

    let mut properties = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    while index < len {
        if bytes[index] == b'*' {
            if flags.property_list {
                return Err(Error::malformed(
                    "Cannot have several '*' characters in pattern property list",
                ));
            }
            flags.property_list = true;
            index += 1;
            if index < len {
                if bytes[index] != b',' {
                    return Err(Error::malformed(
                        "Invalid character found after '*': end of name or ',' expected",
                    ));
                }
                index = skip_separator(len, index)?;
            }
            continue;
        }

        let equals = scan_key(input, index)?;
        let (end, pattern) = scan_value(input, equals + 1)?;
        let span = PropertySpan {
            key: index..equals,
            value: equals + 1..end,
            pattern,
        };

        let key = span.key(input);
        if !seen.insert(key) {
            return Err(Error::malformed(format!("key `{}' already defined", key)));
        }
        flags.property_value |= pattern;
        properties.push(span);

        index = end;
        if index < len {
            // Only a quoted value can stop short of a comma
            if bytes[index] != b',' {
                return Err(Error::malformed(format!(
                    "Invalid character '{}' after quoted value",
                    describe(char_at(input, index))
                )));
            }
            index = skip_separator(len, index)?;
        }
    }

    Ok(ParsedName {
        domain_len,
        properties,
        flags,
    })
}

/// Validate a domain given on its own; returns whether it is a pattern
pub(crate) fn check_domain(domain: &str) -> Result<bool> {
    if domain.contains(':') || domain.contains('\n') {
        return Err(Error::malformed(format!("Invalid domain: {}", domain)));
    }
    Ok(domain.contains('*') || domain.contains('?'))
}

/// Validate a key given on its own
pub(crate) fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::malformed("Invalid key (empty)"));
    }
    match key
        .chars()
        .find(|c| matches!(c, '*' | '?' | ',' | ':' | '\n' | '='))
    {
        Some(c) => Err(Error::malformed(format!(
            "Invalid character '{}' in key",
            describe(c)
        ))),
        None => Ok(()),
    }
}

/// Validate a value given on its own; returns whether it is a pattern
pub(crate) fn check_value(value: &str) -> Result<bool> {
    if value.is_empty() {
        return Ok(false);
    }
    let (end, pattern) = scan_value(value, 0)?;
    if end < value.len() {
        return Err(Error::malformed(format!(
            "Invalid character '{}' in value",
            describe(char_at(value, end))
        )));
    }
    Ok(pattern)
}

/// Returns the byte length of the domain, i.e. the index of its `:`
fn scan_domain(input: &str, flags: &mut PatternFlags) -> Result<usize> {
    let bytes = input.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b':' => return Ok(index),
            b'=' => {
                // `type=Foo` with the domain left out entirely
                if !bytes[index + 1..].contains(&b':') {
                    return Err(Error::malformed("Domain part must be specified"));
                }
            }
            b'\n' => {
                return Err(Error::malformed("Invalid character '\\n' in domain name"));
            }
            b'*' | b'?' => flags.domain = true,
            _ => {}
        }
        index += 1;
    }
    Err(Error::malformed("Key properties cannot be empty"))
}

/// Returns the index of the `=` that ends the key starting at `start`
fn scan_key(input: &str, start: usize) -> Result<usize> {
    let bytes = input.as_bytes();
    if bytes.get(start) == Some(&b'=') {
        return Err(Error::malformed("Invalid key (empty)"));
    }
    for (offset, &byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'=' => return Ok(start + offset),
            b'*' | b'?' | b',' | b':' | b'\n' => {
                return Err(Error::malformed(format!(
                    "Invalid character '{}' in key part of property",
                    describe(byte as char)
                )));
            }
            _ => {}
        }
    }
    Err(Error::malformed("Unterminated key property part"))
}

/// Returns the end of the value starting at `start` and whether it is a pattern
fn scan_value(input: &str, start: usize) -> Result<(usize, bool)> {
    if input.as_bytes().get(start) == Some(&b'"') {
        scan_quoted(input, start)
    } else {
        scan_unquoted(input, start)
    }
}

fn scan_quoted(input: &str, start: usize) -> Result<(usize, bool)> {
    let bytes = input.as_bytes();
    let mut pattern = false;
    let mut index = start + 1;

    while index < bytes.len() {
        match bytes[index] {
            b'"' => return Ok((index + 1, pattern)),
            b'\\' => {
                index += 1;
                match bytes.get(index) {
                    None => return Err(Error::malformed("Unterminated quoted value")),
                    Some(b'\\' | b'"' | b'*' | b'?' | b'n') => {}
                    Some(_) => {
                        return Err(Error::malformed(format!(
                            "Invalid escape sequence '\\{}' in quoted value",
                            char_at(input, index)
                        )));
                    }
                }
            }
            b'\n' => return Err(Error::malformed("Newline in quoted value")),
            b'*' | b'?' => pattern = true,
            _ => {}
        }
        index += 1;
    }

    // Also reached when the last quote was escaped
    Err(Error::malformed("Unterminated quoted value"))
}

fn scan_unquoted(input: &str, start: usize) -> Result<(usize, bool)> {
    let bytes = input.as_bytes();
    let mut pattern = false;
    let mut index = start;

    while index < bytes.len() {
        match bytes[index] {
            b',' => break,
            b'*' | b'?' => pattern = true,
            byte @ (b'=' | b':' | b'"' | b'\n') => {
                return Err(Error::malformed(format!(
                    "Invalid character '{}' in value part of property",
                    describe(byte as char)
                )));
            }
            _ => {}
        }
        index += 1;
    }

    Ok((index, pattern))
}

/// Step over the `,` at `comma`; a comma may not end the name
fn skip_separator(len: usize, comma: usize) -> Result<usize> {
    let next = comma + 1;
    if next == len {
        return Err(Error::malformed("Invalid ending comma"));
    }
    Ok(next)
}

fn char_at(input: &str, index: usize) -> char {
    input[index..].chars().next().unwrap_or('\0')
}

fn describe(c: char) -> String {
    if c == '\n' {
        "\\n".to_string()
    } else {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(input: &str) -> String {
        match parse(input).unwrap_err() {
            Error::MalformedObjectName(reason) => reason,
            other => panic!("Expected MalformedObjectName, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_name() {
        let parsed = parse("d:type=Foo,name=Bar").unwrap();
        let source = "d:type=Foo,name=Bar";

        assert_eq!(parsed.domain_len, 1);
        assert_eq!(parsed.properties.len(), 2);
        assert_eq!(parsed.properties[0].key(source), "type");
        assert_eq!(parsed.properties[0].value(source), "Foo");
        assert_eq!(parsed.properties[1].key(source), "name");
        assert_eq!(parsed.flags, PatternFlags::default());
    }

    #[test]
    fn test_parse_pattern_flags() {
        let parsed = parse("d*:type=F?o,*").unwrap();
        assert!(parsed.flags.domain);
        assert!(parsed.flags.property_list);
        assert!(parsed.flags.property_value);
        assert!(parsed.properties[0].pattern);
    }

    #[test]
    fn test_parse_quoted_value() {
        let source = r#"d:name="a,b=c:d",type=x"#;
        let parsed = parse(source).unwrap();

        assert_eq!(parsed.properties[0].value(source), r#""a,b=c:d""#);
        assert!(!parsed.properties[0].pattern);
        assert_eq!(parsed.properties[1].value(source), "x");
    }

    #[test]
    fn test_escaped_wildcards_are_not_patterns() {
        let parsed = parse(r#"d:name="a\*b\?""#).unwrap();
        assert!(!parsed.flags.property_value);

        let parsed = parse(r#"d:name="a*b""#).unwrap();
        assert!(parsed.flags.property_value);
    }

    #[test]
    fn test_empty_unquoted_value_is_allowed() {
        let parsed = parse("d:a=").unwrap();
        assert_eq!(parsed.properties[0].value("d:a="), "");
    }

    #[test]
    fn test_equals_in_domain_with_colon_later() {
        let parsed = parse("a=b:c=d").unwrap();
        assert_eq!(parsed.domain_len, 3);
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(reason("type=Foo"), "Domain part must be specified");
        assert_eq!(reason("d\n:a=b"), "Invalid character '\\n' in domain name");
        assert_eq!(reason("domain"), "Key properties cannot be empty");
        assert_eq!(reason("d:"), "Key properties cannot be empty");
    }

    #[test]
    fn test_key_errors() {
        assert_eq!(reason("d:=1"), "Invalid key (empty)");
        assert_eq!(reason("d:a"), "Unterminated key property part");
        assert_eq!(reason("d:a*=1"), "Invalid character '*' in key part of property");
        assert_eq!(reason("d:a?=1"), "Invalid character '?' in key part of property");
        assert_eq!(reason("d:a:b=1"), "Invalid character ':' in key part of property");
        assert_eq!(reason("d:a\nb=1"), "Invalid character '\\n' in key part of property");
        assert_eq!(reason("d:a=1,,b=2"), "Invalid character ',' in key part of property");
    }

    #[test]
    fn test_value_errors() {
        assert_eq!(reason("d:a=b=c"), "Invalid character '=' in value part of property");
        assert_eq!(reason("d:a=b:c"), "Invalid character ':' in value part of property");
        assert_eq!(reason("d:a=b\"c"), "Invalid character '\"' in value part of property");
        assert_eq!(reason("d:a=1,"), "Invalid ending comma");
    }

    #[test]
    fn test_quoted_value_errors() {
        assert_eq!(reason(r#"d:a="abc"#), "Unterminated quoted value");
        assert_eq!(reason(r#"d:a="abc\""#), "Unterminated quoted value");
        assert_eq!(reason(r#"d:a="abc\"#), "Unterminated quoted value");
        assert_eq!(reason("d:a=\"ab\nc\""), "Newline in quoted value");
        assert_eq!(reason(r#"d:a="a\xb""#), "Invalid escape sequence '\\x' in quoted value");
        assert_eq!(reason(r#"d:a="x"y"#), "Invalid character 'y' after quoted value");
    }

    #[test]
    fn test_list_pattern_errors() {
        assert_eq!(
            reason("d:*,a=1,*"),
            "Cannot have several '*' characters in pattern property list"
        );
        assert_eq!(
            reason("d:*a"),
            "Invalid character found after '*': end of name or ',' expected"
        );
        assert_eq!(reason("d:a=1,*,"), "Invalid ending comma");
    }

    #[test]
    fn test_duplicate_key() {
        assert_eq!(reason("d:a=1,a=2"), "key `a' already defined");
        // Keys are case-sensitive
        assert!(parse("d:a=1,A=2").is_ok());
    }

    #[test]
    fn test_non_ascii_text() {
        let source = "домен:ключ=значение";
        let parsed = parse(source).unwrap();
        assert_eq!(&source[..parsed.domain_len], "домен");
        assert_eq!(parsed.properties[0].value(source), "значение");
    }

    #[test]
    fn test_check_helpers() {
        assert!(!check_domain("d").unwrap());
        assert!(check_domain("d*").unwrap());
        assert!(check_domain("a:b").is_err());

        assert!(check_key("type").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("a=b").is_err());

        assert!(!check_value("").unwrap());
        assert!(check_value("F*o").unwrap());
        assert!(!check_value(r#""a,b""#).unwrap());
        assert!(check_value("a,b").is_err());
        assert!(check_value(r#""a"b"#).is_err());
    }
}
