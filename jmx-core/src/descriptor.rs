//! Case-insensitive metadata descriptors
//!
//! A descriptor is a bag of named fields attached to management metadata.
//! Field names are compared case-insensitively but reported in the case they
//! were first given: a descriptor built with `"Severity"` answers lookups for
//! `"severity"` and still lists the field as `"Severity"`.
//!
//! # Variants
//!
//! - [`ImmutableDescriptor`]: fixed at construction; every mutator fails with
//!   [`Error::ReadOnly`]. Cloning shares the underlying storage.
//! - [`DescriptorSupport`]: a plain mutable descriptor.
//!
//! # Values
//!
//! Values are [`serde_json::Value`]. `Value::Null` is the null value and
//! `Value::Array` the array case: arrays compare and hash element-wise, and
//! every read returns an owned copy, so a caller can never reach the stored
//! value through what it was handed.
//!
//! # Examples
//!
//! ```rust
//! use jmx_core::descriptor::{Descriptor, ImmutableDescriptor};
//! use serde_json::json;
//!
//! let d = ImmutableDescriptor::from_fields(&["Severity=6", "descriptorType=notification"]).unwrap();
//! assert_eq!(d.field_value("severity").unwrap(), Some(json!("6")));
//! assert_eq!(d.field_names(), vec!["descriptorType", "Severity"]);
//! ```

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Read and write access to descriptor fields
///
/// Implemented by both descriptor variants so metadata code and
/// [`ImmutableDescriptor::union`] can take either.
pub trait Descriptor: fmt::Debug + Send + Sync {
    /// Value of the named field, or `None` if absent
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an empty name.
    fn field_value(&self, name: &str) -> Result<Option<Value>>;

    /// Field names in case-insensitive order, original case preserved
    fn field_names(&self) -> Vec<String>;

    /// Values for `names`, or every value (in `field_names` order) for `None`
    ///
    /// Unknown or empty names yield `None` in their slot.
    fn field_values(&self, names: Option<&[&str]>) -> Vec<Option<Value>>;

    /// Every field rendered as `name=value`
    ///
    /// Strings are written as-is, null as an empty value and anything else
    /// in parentheses: `name=(value)`.
    fn fields(&self) -> Vec<String>;

    /// Set a field, adding it if absent
    fn set_field(&mut self, name: &str, value: Value) -> Result<()>;

    /// Set several fields; `names` and `values` are parallel
    fn set_fields(&mut self, names: &[&str], values: &[Value]) -> Result<()>;

    /// Remove a field; removing an absent field is not an error
    fn remove_field(&mut self, name: &str) -> Result<()>;

    /// Whether the field values are valid for this descriptor
    fn is_valid(&self) -> bool {
        true
    }

    /// Downcast to the immutable variant
    fn as_immutable(&self) -> Option<&ImmutableDescriptor> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Field {
    /// Name in the case it was first given
    name: String,
    value: Value,
}

/// Fields keyed by their lower-cased name
#[derive(Debug, Clone, Default)]
struct FieldMap {
    fields: BTreeMap<String, Field>,
}

impl FieldMap {
    fn normalize(name: &str) -> String {
        name.to_lowercase()
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .get(&Self::normalize(name))
            .map(|field| &field.value)
    }

    fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&Self::normalize(name))
    }

    /// Add a field that must not exist yet
    fn insert_new(&mut self, name: &str, value: Value) -> Result<()> {
        check_field_name(name)?;
        let key = Self::normalize(name);
        if self.fields.contains_key(&key) {
            return Err(Error::DuplicateField(name.to_string()));
        }
        self.fields.insert(
            key,
            Field {
                name: name.to_string(),
                value,
            },
        );
        Ok(())
    }

    /// Add or replace a field, keeping the first-seen name
    fn set(&mut self, name: &str, value: Value) {
        match self.fields.entry(Self::normalize(name)) {
            Entry::Occupied(mut entry) => entry.get_mut().value = value,
            Entry::Vacant(entry) => {
                entry.insert(Field {
                    name: name.to_string(),
                    value,
                });
            }
        }
    }

    fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields
            .remove(&Self::normalize(name))
            .map(|field| field.value)
    }

    /// Union step: a non-null value already present must agree
    fn merge(&mut self, name: &str, value: Value) -> Result<()> {
        if let Some(existing) = self.get(name) {
            if !existing.is_null() && *existing != value {
                return Err(Error::InconsistentValues {
                    field: name.to_string(),
                    existing: render_value(existing),
                    conflicting: render_value(&value),
                });
            }
        }
        self.set(name, value);
        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.fields.values().map(|field| field.name.clone()).collect()
    }

    fn values(&self, names: Option<&[&str]>) -> Vec<Option<Value>> {
        match names {
            None => self
                .fields
                .values()
                .map(|field| Some(field.value.clone()))
                .collect(),
            Some(names) => names
                .iter()
                .map(|name| self.get(name).cloned())
                .collect(),
        }
    }

    fn rendered_fields(&self) -> Vec<String> {
        self.fields
            .values()
            .map(|field| match &field.value {
                Value::Null => format!("{}=", field.name),
                Value::String(s) => format!("{}={}", field.name, s),
                other => format!("{}=({})", field.name, render_value(other)),
            })
            .collect()
    }

    /// Sum of per-field hashes, so field order never matters
    fn hash_code(&self) -> u64 {
        self.fields.iter().fold(0u64, |acc, (key, field)| {
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            acc.wrapping_add(hasher.finish() ^ value_hash(&field.value))
        })
    }

    fn write_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, field) in self.fields.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field.name, render_value(&field.value))?;
        }
        f.write_str("}")
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .values()
            .map(|field| (field.name.as_str(), &field.value))
    }
}

impl PartialEq for FieldMap {
    /// Same names (ignoring case) with deep-equal values
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|((k1, f1), (k2, f2))| k1 == k2 && f1.value == f2.value)
    }
}

impl FieldMap {
    /// Equal, and every field is spelled the same way
    fn identical(&self, other: &Self) -> bool {
        self == other
            && self
                .fields
                .values()
                .zip(other.fields.values())
                .all(|(f1, f2)| f1.name == f2.name)
    }
}

fn check_field_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid("Null or empty field name"));
    }
    Ok(())
}

/// Array-aware deep hash; null hashes to zero
fn value_hash(value: &Value) -> u64 {
    match value {
        Value::Null => 0,
        Value::Array(items) => items
            .iter()
            .fold(1u64, |acc, item| acc.wrapping_mul(31).wrapping_add(value_hash(item))),
        other => {
            let mut hasher = DefaultHasher::new();
            other.to_string().hash(&mut hasher);
            hasher.finish()
        }
    }
}

/// Human-readable value: strings bare, arrays as `[a, b]`
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", inner.join(", "))
        }
        other => other.to_string(),
    }
}

/// A descriptor whose fields are fixed at construction
///
/// Clones share storage; [`ImmutableDescriptor::ptr_eq`] tells whether two
/// handles are the same descriptor rather than merely equal ones.
#[derive(Debug, Clone, Default)]
pub struct ImmutableDescriptor {
    fields: Arc<FieldMap>,
}

impl ImmutableDescriptor {
    /// The descriptor with no fields
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `name=value` strings; every value is a string
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for an entry without `=` or with an empty name
    /// - [`Error::DuplicateField`] if two entries share a name (ignoring case)
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        let mut map = FieldMap::default();
        for field in fields {
            let field = field.as_ref();
            let (name, value) = field
                .split_once('=')
                .ok_or_else(|| Error::invalid(format!("Missing = character: {}", field)))?;
            if name.is_empty() {
                return Err(Error::invalid(format!("Empty name in field: {}", field)));
            }
            map.insert_new(name, Value::String(value.to_string()))?;
        }
        Ok(Self::from_field_map(map))
    }

    /// Build from parallel name and value arrays
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the lengths differ or a name is empty
    /// - [`Error::DuplicateField`] if two names are equal ignoring case
    pub fn from_arrays<S: AsRef<str>>(names: &[S], values: &[Value]) -> Result<Self> {
        if names.len() != values.len() {
            return Err(Error::invalid("Different size arrays"));
        }
        let mut map = FieldMap::default();
        for (name, value) in names.iter().zip(values) {
            map.insert_new(name.as_ref(), value.clone())?;
        }
        Ok(Self::from_field_map(map))
    }

    /// Build from `(name, value)` entries
    pub fn from_map<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut map = FieldMap::default();
        for (name, value) in entries {
            map.insert_new(name.as_ref(), value)?;
        }
        Ok(Self::from_field_map(map))
    }

    fn from_field_map(map: FieldMap) -> Self {
        Self {
            fields: Arc::new(map),
        }
    }

    /// Merge descriptors into one
    ///
    /// `None` entries and empty descriptors are skipped. A field present in
    /// several inputs must have equal values (arrays compared element-wise);
    /// a null value gives way to a non-null one.
    ///
    /// When only one non-empty input is given and it is already immutable,
    /// that very descriptor is returned; likewise when the merge adds nothing
    /// to the largest immutable input and keeps its field spelling.
    ///
    /// # Errors
    ///
    /// [`Error::InconsistentValues`] naming the field and both values.
    pub fn union(descriptors: &[Option<&dyn Descriptor>]) -> Result<Self> {
        let non_empty: Vec<&dyn Descriptor> = descriptors
            .iter()
            .flatten()
            .copied()
            .filter(|d| !d.field_names().is_empty())
            .collect();

        match non_empty.as_slice() {
            [] => return Ok(Self::empty()),
            [only] => {
                if let Some(immutable) = only.as_immutable() {
                    return Ok(immutable.clone());
                }
            }
            _ => {}
        }

        let mut merged = FieldMap::default();
        let mut biggest: Option<&ImmutableDescriptor> = None;
        for descriptor in &non_empty {
            if let Some(immutable) = descriptor.as_immutable() {
                if biggest.map_or(true, |b| immutable.len() > b.len()) {
                    biggest = Some(immutable);
                }
            }
            for name in descriptor.field_names() {
                let value = descriptor.field_value(&name)?.unwrap_or(Value::Null);
                if let Err(e) = merged.merge(&name, value) {
                    tracing::debug!(field = %name, error = %e, "Descriptor union conflict");
                    return Err(e);
                }
            }
        }

        if let Some(biggest) = biggest {
            if biggest.fields.identical(&merged) {
                return Ok(biggest.clone());
            }
        }
        Ok(Self::from_field_map(merged))
    }

    /// Whether two handles share the same storage
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.fields, &b.fields)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.len() == 0
    }

    /// Order-independent hash of names (ignoring case) and values
    pub fn hash_code(&self) -> u64 {
        self.fields.hash_code()
    }

    /// `(name, value)` pairs in case-insensitive name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter()
    }

    fn read_only(&self) -> Error {
        Error::ReadOnly("Descriptor is read-only".to_string())
    }
}

impl Descriptor for ImmutableDescriptor {
    fn field_value(&self, name: &str) -> Result<Option<Value>> {
        check_field_name(name)?;
        Ok(self.fields.get(name).cloned())
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.names()
    }

    fn field_values(&self, names: Option<&[&str]>) -> Vec<Option<Value>> {
        self.fields.values(names)
    }

    fn fields(&self) -> Vec<String> {
        self.fields.rendered_fields()
    }

    fn set_field(&mut self, name: &str, _value: Value) -> Result<()> {
        check_field_name(name)?;
        Err(self.read_only())
    }

    fn set_fields(&mut self, names: &[&str], values: &[Value]) -> Result<()> {
        if names.len() != values.len() {
            return Err(Error::invalid("Different array sizes"));
        }
        for name in names {
            check_field_name(name)?;
        }
        Err(self.read_only())
    }

    fn remove_field(&mut self, name: &str) -> Result<()> {
        if !name.is_empty() && self.fields.contains(name) {
            return Err(self.read_only());
        }
        Ok(())
    }

    fn as_immutable(&self) -> Option<&ImmutableDescriptor> {
        Some(self)
    }
}

impl PartialEq for ImmutableDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.fields == other.fields
    }
}

impl PartialEq<DescriptorSupport> for ImmutableDescriptor {
    fn eq(&self, other: &DescriptorSupport) -> bool {
        *self.fields == other.fields
    }
}

impl Hash for ImmutableDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for ImmutableDescriptor {
    /// `{name=value, ...}` with arrays shown as `[a, b]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.write_display(f)
    }
}

/// A mutable descriptor
///
/// Uses the same case-insensitive storage as [`ImmutableDescriptor`].
/// Replacing a field keeps the name's first-seen case.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSupport {
    fields: FieldMap,
}

impl DescriptorSupport {
    /// An empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `name=value` strings
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        let immutable = ImmutableDescriptor::from_fields(fields)?;
        Ok(Self::from_descriptor(&immutable))
    }

    /// Copy the fields of any descriptor
    pub fn from_descriptor(descriptor: &dyn Descriptor) -> Self {
        let mut fields = FieldMap::default();
        for name in descriptor.field_names() {
            if let Ok(Some(value)) = descriptor.field_value(&name) {
                fields.set(&name, value);
            }
        }
        Self { fields }
    }

    /// Freeze the current fields
    pub fn to_immutable(&self) -> ImmutableDescriptor {
        ImmutableDescriptor::from_field_map(self.fields.clone())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.len() == 0
    }

    /// Order-independent hash of names (ignoring case) and values
    pub fn hash_code(&self) -> u64 {
        self.fields.hash_code()
    }

    /// `(name, value)` pairs in case-insensitive name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter()
    }
}

impl Descriptor for DescriptorSupport {
    fn field_value(&self, name: &str) -> Result<Option<Value>> {
        check_field_name(name)?;
        Ok(self.fields.get(name).cloned())
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.names()
    }

    fn field_values(&self, names: Option<&[&str]>) -> Vec<Option<Value>> {
        self.fields.values(names)
    }

    fn fields(&self) -> Vec<String> {
        self.fields.rendered_fields()
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        check_field_name(name)?;
        self.fields.set(name, value);
        Ok(())
    }

    fn set_fields(&mut self, names: &[&str], values: &[Value]) -> Result<()> {
        if names.len() != values.len() {
            return Err(Error::invalid("Different array sizes"));
        }
        // Validate everything before touching anything
        for name in names {
            check_field_name(name)?;
        }
        for (name, value) in names.iter().zip(values) {
            self.fields.set(name, value.clone());
        }
        Ok(())
    }

    fn remove_field(&mut self, name: &str) -> Result<()> {
        self.fields.remove(name);
        Ok(())
    }
}

impl PartialEq for DescriptorSupport {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl PartialEq<ImmutableDescriptor> for DescriptorSupport {
    fn eq(&self, other: &ImmutableDescriptor) -> bool {
        self.fields == *other.fields
    }
}

impl Hash for DescriptorSupport {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for DescriptorSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.write_display(f)
    }
}
