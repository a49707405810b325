//! Boolean query expressions over object names
//!
//! A [`QueryExp`] is a pure predicate on an [`ObjectName`]. Object names are
//! themselves query expressions (a pattern selects the names it matches, a
//! concrete name selects itself), and [`Query`] combines expressions with
//! `and`, `or` and `not`.
//!
//! # Examples
//!
//! ```rust
//! use jmx_core::ObjectName;
//! use jmx_query::{Query, QueryExp};
//!
//! let pools = Query::matches("java.lang:type=MemoryPool,*").unwrap();
//! let eden = Query::matches("*:name=Eden,*").unwrap();
//! let exp = Query::and(pools, Query::not(eden));
//!
//! assert!(exp.apply(&ObjectName::parse("java.lang:type=MemoryPool,name=Survivor").unwrap()));
//! assert!(!exp.apply(&ObjectName::parse("java.lang:type=MemoryPool,name=Eden").unwrap()));
//! ```

use crate::error::Result;
use jmx_core::ObjectName;
use std::fmt;

/// A predicate over object names
///
/// Implementations must be pure: the answer depends only on the expression
/// and the candidate.
pub trait QueryExp: fmt::Debug + fmt::Display + Send + Sync {
    /// Whether `name` is selected by this expression
    fn apply(&self, name: &ObjectName) -> bool;
}

impl QueryExp for ObjectName {
    fn apply(&self, name: &ObjectName) -> bool {
        ObjectName::apply(self, name)
    }
}

impl<T: QueryExp + ?Sized> QueryExp for Box<T> {
    fn apply(&self, name: &ObjectName) -> bool {
        (**self).apply(name)
    }
}

/// Both sub-expressions hold
#[derive(Debug)]
pub struct AndQueryExp {
    left: Box<dyn QueryExp>,
    right: Box<dyn QueryExp>,
}

impl QueryExp for AndQueryExp {
    fn apply(&self, name: &ObjectName) -> bool {
        self.left.apply(name) && self.right.apply(name)
    }
}

impl fmt::Display for AndQueryExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) and ({})", self.left, self.right)
    }
}

/// At least one sub-expression holds
#[derive(Debug)]
pub struct OrQueryExp {
    left: Box<dyn QueryExp>,
    right: Box<dyn QueryExp>,
}

impl QueryExp for OrQueryExp {
    fn apply(&self, name: &ObjectName) -> bool {
        self.left.apply(name) || self.right.apply(name)
    }
}

impl fmt::Display for OrQueryExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) or ({})", self.left, self.right)
    }
}

/// The sub-expression does not hold
#[derive(Debug)]
pub struct NotQueryExp {
    inner: Box<dyn QueryExp>,
}

impl QueryExp for NotQueryExp {
    fn apply(&self, name: &ObjectName) -> bool {
        !self.inner.apply(name)
    }
}

impl fmt::Display for NotQueryExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not ({})", self.inner)
    }
}

/// Constructors for query expressions
pub struct Query;

impl Query {
    /// `left and right`
    pub fn and(left: impl QueryExp + 'static, right: impl QueryExp + 'static) -> AndQueryExp {
        AndQueryExp {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `left or right`
    pub fn or(left: impl QueryExp + 'static, right: impl QueryExp + 'static) -> OrQueryExp {
        OrQueryExp {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `not inner`
    pub fn not(inner: impl QueryExp + 'static) -> NotQueryExp {
        NotQueryExp {
            inner: Box::new(inner),
        }
    }

    /// Expression selecting the names matched by `pattern`
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidPattern`](crate::QueryError::InvalidPattern) if
    /// `pattern` is not a valid name.
    pub fn matches(pattern: &str) -> Result<ObjectName> {
        Ok(ObjectName::parse(pattern)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    fn name(s: &str) -> ObjectName {
        ObjectName::parse(s).unwrap()
    }

    #[test]
    fn test_object_name_as_query() {
        let exp: &dyn QueryExp = &name("d:type=*");
        assert!(exp.apply(&name("d:type=Foo")));
        assert!(!exp.apply(&name("e:type=Foo")));

        let exact: &dyn QueryExp = &name("d:type=Foo");
        assert!(exact.apply(&name("d:type=Foo")));
    }

    #[test]
    fn test_combinators() {
        let foo = name("*:type=Foo,*");
        let d = name("d:*");
        let candidate_d = name("d:type=Foo,id=1");
        let candidate_e = name("e:type=Foo");

        let both = Query::and(foo.clone(), d.clone());
        assert!(both.apply(&candidate_d));
        assert!(!both.apply(&candidate_e));

        let either = Query::or(foo.clone(), d.clone());
        assert!(either.apply(&candidate_e));
        assert!(!either.apply(&name("x:type=Bar")));

        let neither = Query::not(Query::or(foo, d));
        assert!(neither.apply(&name("x:type=Bar")));
        assert!(!neither.apply(&candidate_d));
    }

    #[test]
    fn test_display() {
        let exp = Query::and(name("d:*"), Query::not(name("*:type=X")));
        assert_eq!(exp.to_string(), "(d:*) and (not (*:type=X))");

        let exp = Query::or(name("a:x=1"), name("b:y=2"));
        assert_eq!(exp.to_string(), "(a:x=1) or (b:y=2)");
    }

    #[test]
    fn test_matches_rejects_bad_pattern() {
        let err = Query::matches("d:a=1,a=2").unwrap_err();
        assert!(matches!(err, QueryError::InvalidPattern(_)));
    }

    #[test]
    fn test_boxed_expressions_compose() {
        let parts: Vec<Box<dyn QueryExp>> = vec![Box::new(name("a:*")), Box::new(name("b:*"))];
        let mut iter = parts.into_iter();
        let (first, second) = (iter.next().unwrap(), iter.next().unwrap());
        let exp = Query::or(first, second);

        assert!(exp.apply(&name("b:k=v")));
        assert!(!exp.apply(&name("c:k=v")));
    }
}
