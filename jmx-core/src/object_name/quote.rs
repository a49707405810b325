//! Quoting of arbitrary strings for use as property values

use crate::error::{Error, Result};

/// Quote `s` so it can be used as a property value
///
/// The result is wrapped in `"` and escapes `\`, `"`, `*`, `?` and newline,
/// so it never contains a wildcard.
///
/// ```rust
/// use jmx_core::object_name::{quote, unquote};
///
/// let quoted = quote("a*b\nc");
/// assert_eq!(quoted, r#""a\*b\nc""#);
/// assert_eq!(unquote(&quoted).unwrap(), "a*b\nc");
/// ```
pub fn quote(s: &str) -> String {
    let mut buf = String::with_capacity(s.len() + 2);
    buf.push('"');
    for c in s.chars() {
        match c {
            '\n' => buf.push_str("\\n"),
            '\\' | '"' | '*' | '?' => {
                buf.push('\\');
                buf.push(c);
            }
            _ => buf.push(c),
        }
    }
    buf.push('"');
    buf
}

/// Reverse [`quote`]
///
/// Fails with [`Error::InvalidArgument`] if `q` is not wrapped in quotes,
/// ends in a lone backslash, uses an unknown escape, or contains an unescaped
/// `*`, `?`, `"` or newline.
pub fn unquote(q: &str) -> Result<String> {
    let inner = q
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| Error::invalid("Argument not quoted"))?;

    let mut buf = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                None => return Err(Error::invalid("Trailing backslash")),
                Some('n') => buf.push('\n'),
                Some(escaped @ ('\\' | '"' | '*' | '?')) => buf.push(escaped),
                Some(other) => {
                    return Err(Error::invalid(format!(
                        "Bad character '{}' after backslash",
                        other
                    )));
                }
            },
            '*' | '?' | '"' | '\n' => {
                return Err(Error::invalid(format!(
                    "Invalid unescaped character '{}' in the string to unquote",
                    c.escape_default()
                )));
            }
            _ => buf.push(c),
        }
    }
    Ok(buf)
}
