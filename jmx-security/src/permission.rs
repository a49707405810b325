//! Management permissions
//!
//! An [`MBeanPermission`] pairs a target name with an action list. A granted
//! permission *implies* a required one when its actions cover the required
//! actions and its target covers the required target.
//!
//! # Examples
//!
//! ```rust
//! use jmx_security::MBeanPermission;
//!
//! let granted = MBeanPermission::new("*#*[d:type=Cache,*]", "queryMBeans, getAttribute").unwrap();
//! let required = MBeanPermission::new("com.example.Cache#-[d:type=Cache,name=a]", "queryNames").unwrap();
//!
//! assert!(granted.implies(&required));
//! assert_eq!(granted.actions(), "getAttribute,queryMBeans");
//! ```

use crate::actions::ActionMask;
use crate::error::{PermissionError, Result};
use crate::target::Target;
use jmx_core::ObjectName;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A permission to perform actions on managed objects
#[derive(Debug, Clone)]
pub struct MBeanPermission {
    name: String,
    mask: ActionMask,
    target: Target,
}

impl MBeanPermission {
    /// Create a permission from a target name and an action string
    ///
    /// # Errors
    ///
    /// Any [`PermissionError`] from parsing the name or the actions.
    pub fn new(name: impl Into<String>, actions: &str) -> Result<Self> {
        let mask = ActionMask::parse(actions)?;
        Self::with_mask(name, mask)
    }

    /// Create a permission from a target name and an already-built mask
    ///
    /// # Errors
    ///
    /// [`PermissionError::NoActions`] for an empty mask, or a name error.
    pub fn with_mask(name: impl Into<String>, mask: ActionMask) -> Result<Self> {
        if mask.is_empty() {
            return Err(PermissionError::NoActions);
        }
        let name = name.into();
        let target = Target::parse(&name)?;
        Ok(Self { name, mask, target })
    }

    /// Create a permission from separate target parts
    ///
    /// Absent parts are written as `-`, and the object name is embedded in
    /// canonical form: `(Some("C"), None, Some(d:b=2,a=1))` becomes
    /// `C#-[d:a=1,b=2]`.
    pub fn from_parts(
        class_name: Option<&str>,
        member: Option<&str>,
        object_name: Option<&ObjectName>,
        actions: &str,
    ) -> Result<Self> {
        let name = format!(
            "{}#{}[{}]",
            class_name.unwrap_or("-"),
            member.unwrap_or("-"),
            object_name.map_or("-", ObjectName::canonical_name),
        );
        Self::new(name, actions)
    }

    /// The target name as given
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The actions in canonical form
    pub fn actions(&self) -> String {
        self.mask.to_string()
    }

    /// The actions as a mask
    pub fn mask(&self) -> ActionMask {
        self.mask
    }

    /// The parsed target
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Whether holding `self` grants everything `required` asks for
    pub fn implies(&self, required: &MBeanPermission) -> bool {
        let actions = self.mask.implies(required.mask);
        let granted = actions && self.target.implies(&required.target);
        if !granted {
            tracing::debug!(
                held = %self,
                required = %required,
                actions_covered = actions,
                "Permission does not imply required permission"
            );
        }
        granted
    }
}

impl PartialEq for MBeanPermission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.mask == other.mask
    }
}

impl Eq for MBeanPermission {}

impl Hash for MBeanPermission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.mask.hash(state);
    }
}

impl fmt::Display for MBeanPermission {
    /// `MBeanPermission(name, actions)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MBeanPermission({}, {})", self.name, self.mask)
    }
}
