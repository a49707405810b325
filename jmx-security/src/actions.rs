//! Action lists of management permissions
//!
//! An action list is a comma-separated set of operation names such as
//! `"getAttribute, setAttribute"`, or the single token `"*"` for every
//! action. It is held as a bit mask ([`ActionMask`]) and always rendered
//! back in one fixed order, so two permissions granting the same actions
//! print the same action string.
//!
//! # Parsing Rules
//!
//! - Action names are case-sensitive
//! - Spaces, `\r`, `\n`, `\f` and `\t` may surround each name
//! - Empty names, unknown names and a trailing comma are rejected
//! - Names are matched longest first, so `unregisterMBean` is never read as
//!   a stray `un` followed by `registerMBean`
//!
//! # Examples
//!
//! ```rust
//! use jmx_security::{Action, ActionMask};
//!
//! let mask = ActionMask::parse("unregisterMBean, getClassLoader").unwrap();
//! assert!(mask.contains(Action::UnregisterMBean.into()));
//! assert!(!mask.contains(Action::RegisterMBean.into()));
//! assert_eq!(mask.to_string(), "getClassLoader,unregisterMBean");
//! ```

use crate::error::{PermissionError, Result};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// A single operation a permission may grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    AddNotificationListener,
    GetAttribute,
    GetClassLoader,
    GetClassLoaderFor,
    GetClassLoaderRepository,
    GetDomains,
    GetMBeanInfo,
    GetObjectInstance,
    Instantiate,
    Invoke,
    IsInstanceOf,
    QueryMBeans,
    QueryNames,
    RegisterMBean,
    RemoveNotificationListener,
    SetAttribute,
    UnregisterMBean,
}

impl Action {
    /// Every action, in rendering (and bit) order
    pub const ALL: [Action; 17] = [
        Action::AddNotificationListener,
        Action::GetAttribute,
        Action::GetClassLoader,
        Action::GetClassLoaderFor,
        Action::GetClassLoaderRepository,
        Action::GetDomains,
        Action::GetMBeanInfo,
        Action::GetObjectInstance,
        Action::Instantiate,
        Action::Invoke,
        Action::IsInstanceOf,
        Action::QueryMBeans,
        Action::QueryNames,
        Action::RegisterMBean,
        Action::RemoveNotificationListener,
        Action::SetAttribute,
        Action::UnregisterMBean,
    ];

    /// Every action, longest name first
    const BY_LENGTH: [Action; 17] = [
        Action::RemoveNotificationListener,
        Action::GetClassLoaderRepository,
        Action::AddNotificationListener,
        Action::GetClassLoaderFor,
        Action::GetObjectInstance,
        Action::UnregisterMBean,
        Action::GetClassLoader,
        Action::RegisterMBean,
        Action::GetAttribute,
        Action::GetMBeanInfo,
        Action::IsInstanceOf,
        Action::SetAttribute,
        Action::Instantiate,
        Action::QueryMBeans,
        Action::GetDomains,
        Action::QueryNames,
        Action::Invoke,
    ];

    /// The action's name as written in action strings
    pub fn name(self) -> &'static str {
        match self {
            Action::AddNotificationListener => "addNotificationListener",
            Action::GetAttribute => "getAttribute",
            Action::GetClassLoader => "getClassLoader",
            Action::GetClassLoaderFor => "getClassLoaderFor",
            Action::GetClassLoaderRepository => "getClassLoaderRepository",
            Action::GetDomains => "getDomains",
            Action::GetMBeanInfo => "getMBeanInfo",
            Action::GetObjectInstance => "getObjectInstance",
            Action::Instantiate => "instantiate",
            Action::Invoke => "invoke",
            Action::IsInstanceOf => "isInstanceOf",
            Action::QueryMBeans => "queryMBeans",
            Action::QueryNames => "queryNames",
            Action::RegisterMBean => "registerMBean",
            Action::RemoveNotificationListener => "removeNotificationListener",
            Action::SetAttribute => "setAttribute",
            Action::UnregisterMBean => "unregisterMBean",
        }
    }

    /// The action's bit in an [`ActionMask`]
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or_else(|| PermissionError::InvalidAction(s.to_string()))
    }
}

/// A set of [`Action`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionMask(u32);

impl ActionMask {
    /// No actions
    pub const NONE: ActionMask = ActionMask(0);

    /// Every action
    pub const ALL: ActionMask = ActionMask(0x1FFFF);

    /// Parse an action string
    ///
    /// # Errors
    ///
    /// - [`PermissionError::EmptyActions`] for `""`
    /// - [`PermissionError::InvalidAction`] carrying the whole input for
    ///   anything that is not a list of known actions
    pub fn parse(actions: &str) -> Result<Self> {
        if actions.is_empty() {
            return Err(PermissionError::EmptyActions);
        }
        if actions == "*" {
            return Ok(Self::ALL);
        }

        let invalid = || PermissionError::InvalidAction(actions.to_string());
        let mut mask = Self::NONE;
        let mut rest = actions;

        // Consume one action per iteration from the right-hand end
        loop {
            rest = rest.trim_end_matches(is_separator_space);
            let action = Action::BY_LENGTH
                .iter()
                .copied()
                .find(|action| rest.ends_with(action.name()))
                .ok_or_else(invalid)?;
            mask |= action;

            rest = rest[..rest.len() - action.name().len()].trim_end_matches(is_separator_space);
            if rest.is_empty() {
                return Ok(mask);
            }
            rest = rest.strip_suffix(',').ok_or_else(invalid)?;
        }
    }

    /// Mask with the given raw bits, if they name only known actions
    pub fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(ActionMask(bits))
        } else {
            None
        }
    }

    /// Raw bits
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether no action is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every action in `other` is also in `self`
    pub fn contains(self, other: ActionMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether holding `self` is enough for a request needing `required`
    ///
    /// Like [`contains`](Self::contains), except that `queryMBeans` also
    /// covers `queryNames`.
    pub fn implies(self, required: ActionMask) -> bool {
        let mut held = self;
        if held.contains(Action::QueryMBeans.into()) {
            held |= Action::QueryNames;
        }
        held.contains(required)
    }

    /// The actions in this mask, in rendering order
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL
            .into_iter()
            .filter(move |action| self.0 & action.bit() != 0)
    }
}

fn is_separator_space(c: char) -> bool {
    matches!(c, ' ' | '\r' | '\n' | '\u{000C}' | '\t')
}

impl From<Action> for ActionMask {
    fn from(action: Action) -> Self {
        ActionMask(action.bit())
    }
}

impl FromIterator<Action> for ActionMask {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, |mask, action| mask | action)
    }
}

impl BitOr for ActionMask {
    type Output = ActionMask;

    fn bitor(self, rhs: ActionMask) -> ActionMask {
        ActionMask(self.0 | rhs.0)
    }
}

impl BitOr for Action {
    type Output = ActionMask;

    fn bitor(self, rhs: Action) -> ActionMask {
        ActionMask(self.bit() | rhs.bit())
    }
}

impl BitOr<Action> for ActionMask {
    type Output = ActionMask;

    fn bitor(self, rhs: Action) -> ActionMask {
        ActionMask(self.0 | rhs.bit())
    }
}

impl BitOrAssign<Action> for ActionMask {
    fn bitor_assign(&mut self, rhs: Action) {
        self.0 |= rhs.bit();
    }
}

impl FromStr for ActionMask {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ActionMask {
    /// Comma-joined action names in fixed order, no spaces
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, action) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(action.name())?;
        }
        Ok(())
    }
}
