//! Permission target names
//!
//! A target name has the form `className#member[objectName]`. Every segment
//! is optional:
//!
//! | Segment      | Absent    | Empty | `-`     | Otherwise                      |
//! |--------------|-----------|-------|---------|--------------------------------|
//! | `className`  | any class | any   | nothing | `pkg.*` prefix, or exact name  |
//! | `member`     | any       | any   | nothing | exact name (`*` = any)         |
//! | `objectName` | `*:*`     | `*:*` | nothing | parsed object name or pattern  |
//!
//! "Nothing" means the segment matches only a required segment that is
//! itself `-`. The object-name segment starts at the first `[` and runs to
//! the final `]`, so brackets inside the embedded name are fine.

use crate::error::{PermissionError, Result};
use jmx_core::ObjectName;

/// How a target's class-name segment matches
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassNameMatch {
    /// `-`: matches no class
    Nothing,
    /// Empty, `*` or `pkg.*`: any class starting with the prefix
    Prefix(String),
    /// A single class name
    Exact(String),
}

impl ClassNameMatch {
    fn parse(class_name: &str) -> Self {
        match class_name {
            "-" => ClassNameMatch::Nothing,
            "" | "*" => ClassNameMatch::Prefix(String::new()),
            _ => match class_name.strip_suffix('*') {
                Some(prefix) if prefix.ends_with('.') => ClassNameMatch::Prefix(prefix.to_string()),
                _ => ClassNameMatch::Exact(class_name.to_string()),
            },
        }
    }

    fn implies(&self, required: &ClassNameMatch) -> bool {
        match (self, required) {
            (_, ClassNameMatch::Nothing) => true,
            (ClassNameMatch::Nothing, _) => false,
            (ClassNameMatch::Exact(held), ClassNameMatch::Exact(wanted)) => held == wanted,
            // An exact grant never covers a wildcard request
            (ClassNameMatch::Exact(_), ClassNameMatch::Prefix(_)) => false,
            (ClassNameMatch::Prefix(held), ClassNameMatch::Exact(wanted))
            | (ClassNameMatch::Prefix(held), ClassNameMatch::Prefix(wanted)) => {
                wanted.starts_with(held.as_str())
            }
        }
    }
}

/// A parsed `className#member[objectName]` target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    class_name: ClassNameMatch,
    /// `None` for `-`
    member: Option<String>,
    /// `None` for `[-]`
    object_name: Option<ObjectName>,
}

impl Target {
    /// Parse a target name
    ///
    /// # Errors
    ///
    /// - [`PermissionError::EmptyName`] for `""`
    /// - [`PermissionError::MissingBrackets`] if a `[` is not closed by a
    ///   final `]`
    /// - [`PermissionError::InvalidObjectName`] if the bracketed name does
    ///   not parse
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(PermissionError::EmptyName);
        }

        let (rest, object_name) = match name.find('[') {
            None => (name, Some(ObjectName::wildcard())),
            Some(open) => {
                let inner = name[open + 1..]
                    .strip_suffix(']')
                    .ok_or(PermissionError::MissingBrackets)?;
                let object_name = match inner {
                    "" => Some(ObjectName::wildcard()),
                    "-" => None,
                    _ => Some(ObjectName::parse(inner).map_err(PermissionError::InvalidObjectName)?),
                };
                (&name[..open], object_name)
            }
        };

        let (class_name, member) = match rest.split_once('#') {
            None => (rest, Some("*".to_string())),
            Some((class_name, "-")) => (class_name, None),
            Some((class_name, "")) => (class_name, Some("*".to_string())),
            Some((class_name, member)) => (class_name, Some(member.to_string())),
        };

        Ok(Self {
            class_name: ClassNameMatch::parse(class_name),
            member,
            object_name,
        })
    }

    /// Class-name segment
    pub fn class_name(&self) -> &ClassNameMatch {
        &self.class_name
    }

    /// Member segment; `None` for `-`, `Some("*")` for any
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Object-name segment; `None` for `-`
    pub fn object_name(&self) -> Option<&ObjectName> {
        self.object_name.as_ref()
    }

    /// Whether this target covers every target `required` covers
    pub fn implies(&self, required: &Target) -> bool {
        self.class_name.implies(&required.class_name)
            && member_implies(self.member.as_deref(), required.member.as_deref())
            && object_name_implies(self.object_name.as_ref(), required.object_name.as_ref())
    }
}

fn member_implies(held: Option<&str>, required: Option<&str>) -> bool {
    match (held, required) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some("*"), Some(_)) => true,
        (Some(held), Some(wanted)) => held == wanted,
    }
}

fn object_name_implies(held: Option<&ObjectName>, required: Option<&ObjectName>) -> bool {
    match (held, required) {
        (_, None) => true,
        (None, Some(_)) => false,
        // `apply` never matches a pattern, so equal names are accepted too
        (Some(held), Some(wanted)) => held.apply(wanted) || held == wanted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(s: &str) -> Target {
        Target::parse(s).unwrap()
    }

    #[test]
    fn test_parse_full_target() {
        let t = target("com.example.Cache#Size[d:type=Cache]");
        assert_eq!(t.class_name(), &ClassNameMatch::Exact("com.example.Cache".into()));
        assert_eq!(t.member(), Some("Size"));
        assert_eq!(t.object_name().unwrap().canonical_name(), "d:type=Cache");
    }

    #[test]
    fn test_parse_defaults() {
        let t = target("*");
        assert_eq!(t.class_name(), &ClassNameMatch::Prefix(String::new()));
        assert_eq!(t.member(), Some("*"));
        assert_eq!(t.object_name(), Some(&ObjectName::wildcard()));

        let t = target("#[]");
        assert_eq!(t.class_name(), &ClassNameMatch::Prefix(String::new()));
        assert_eq!(t.member(), Some("*"));
        assert_eq!(t.object_name(), Some(&ObjectName::wildcard()));
    }

    #[test]
    fn test_parse_nothing_segments() {
        let t = target("-#-[-]");
        assert_eq!(t.class_name(), &ClassNameMatch::Nothing);
        assert_eq!(t.member(), None);
        assert_eq!(t.object_name(), None);
    }

    #[test]
    fn test_parse_class_prefix() {
        assert_eq!(
            target("com.example.*").class_name(),
            &ClassNameMatch::Prefix("com.example.".into())
        );
        assert_eq!(
            target("com.example*").class_name(),
            &ClassNameMatch::Exact("com.example*".into())
        );
    }

    #[test]
    fn test_object_name_runs_to_final_bracket() {
        let t = target(r#"-#-[d:name="a[1]"]"#);
        assert_eq!(t.object_name().unwrap().key_property("name"), Some(r#""a[1]""#));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Target::parse(""), Err(PermissionError::EmptyName));
        assert_eq!(Target::parse("x[d:a=b"), Err(PermissionError::MissingBrackets));
        assert!(matches!(
            Target::parse("x[d:]"),
            Err(PermissionError::InvalidObjectName(_))
        ));
    }

    #[test]
    fn test_class_name_implies() {
        let any = ClassNameMatch::Prefix(String::new());
        let pkg = ClassNameMatch::Prefix("com.example.".into());
        let exact = ClassNameMatch::Exact("com.example.Cache".into());

        assert!(any.implies(&pkg));
        assert!(any.implies(&exact));
        assert!(pkg.implies(&exact));
        assert!(pkg.implies(&ClassNameMatch::Prefix("com.example.sub.".into())));
        assert!(!pkg.implies(&any));
        assert!(!exact.implies(&pkg));
        assert!(exact.implies(&exact.clone()));
        assert!(!ClassNameMatch::Nothing.implies(&exact));
        assert!(exact.implies(&ClassNameMatch::Nothing));
    }

    #[test]
    fn test_target_implies() {
        let broad = target("com.example.*#*[d:type=Cache,*]");

        assert!(broad.implies(&target("com.example.Cache#Size[d:type=Cache,name=x]")));
        assert!(broad.implies(&target("com.example.Cache#-[-]")));
        assert!(!broad.implies(&target("org.other.Cache#Size[d:type=Cache]")));
        assert!(!broad.implies(&target("com.example.Cache#Size[e:type=Cache]")));
    }

    #[test]
    fn test_pattern_target_implies_itself() {
        let t = target("-#-[d:type=Cache,*]");
        assert!(t.implies(&t.clone()));
    }

    #[test]
    fn test_nothing_implies_only_nothing() {
        let none = target("-#-[-]");
        assert!(none.implies(&target("-#-[-]")));
        assert!(!none.implies(&target("-#-[d:a=b]")));
        assert!(!none.implies(&target("x#-[-]")));
        assert!(!none.implies(&target("-#m[-]")));
    }
}
