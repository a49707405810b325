//! Serde support and JSON helpers for names and descriptors
//!
//! - [`ObjectName`] serializes as its display string (construction order,
//!   `,*` suffix for list patterns) and is fully re-validated on the way in.
//! - [`ImmutableDescriptor`] and [`DescriptorSupport`] serialize as a JSON
//!   object of field name to value. Decoding goes through the same checks as
//!   construction, so `{"a": 1, "A": 2}` is rejected as a duplicate.
//!
//! Failures from the helpers below come back as [`Error::Serialization`].
//!
//! # Examples
//!
//! ```rust
//! use jmx_core::{codec, ObjectName};
//!
//! let name = ObjectName::parse("d:type=Foo,*").unwrap();
//! let json = codec::encode_name(&name).unwrap();
//! assert_eq!(json, r#""d:type=Foo,*""#);
//! assert_eq!(codec::decode_name(&json).unwrap(), name);
//! ```

use crate::descriptor::{DescriptorSupport, ImmutableDescriptor};
use crate::error::Result;
use crate::object_name::ObjectName;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

impl Serialize for ObjectName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectName::parse(&s).map_err(de::Error::custom)
    }
}

fn serialize_fields<'a, S, I>(len: usize, fields: I, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    I: Iterator<Item = (&'a str, &'a Value)>,
{
    let mut map = serializer.serialize_map(Some(len))?;
    for (name, value) in fields {
        map.serialize_entry(name, value)?;
    }
    map.end()
}

impl Serialize for ImmutableDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_fields(self.len(), self.iter(), serializer)
    }
}

impl<'de> Deserialize<'de> for ImmutableDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        ImmutableDescriptor::from_map(fields).map_err(de::Error::custom)
    }
}

impl Serialize for DescriptorSupport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_fields(self.len(), self.iter(), serializer)
    }
}

impl<'de> Deserialize<'de> for DescriptorSupport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let immutable = ImmutableDescriptor::deserialize(deserializer)?;
        Ok(DescriptorSupport::from_descriptor(&immutable))
    }
}

/// Encode any serializable value to a JSON string
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a JSON string into any deserializable type
pub fn decode_as<'de, T: Deserialize<'de>>(data: &'de str) -> Result<T> {
    Ok(serde_json::from_str(data)?)
}

/// Encode a name as a JSON string literal
pub fn encode_name(name: &ObjectName) -> Result<String> {
    encode(name)
}

/// Decode a JSON string literal into a validated name
pub fn decode_name(data: &str) -> Result<ObjectName> {
    decode_as(data)
}

/// Encode a descriptor as a JSON object
///
/// ```rust
/// use jmx_core::{codec, ImmutableDescriptor};
///
/// let d = ImmutableDescriptor::from_fields(&["units=bytes"]).unwrap();
/// assert_eq!(codec::encode_descriptor(&d).unwrap(), r#"{"units":"bytes"}"#);
/// ```
pub fn encode_descriptor(descriptor: &ImmutableDescriptor) -> Result<String> {
    encode(descriptor)
}

/// Decode a JSON object into a descriptor
pub fn decode_descriptor(data: &str) -> Result<ImmutableDescriptor> {
    decode_as(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::error::{Error, ErrorKind};
    use serde_json::json;

    #[test]
    fn test_name_uses_display_form() {
        let name = ObjectName::parse("d:type=Foo,name=Bar").unwrap();
        assert_eq!(encode_name(&name).unwrap(), r#""d:type=Foo,name=Bar""#);

        let decoded = decode_name(r#""d:name=Bar,type=Foo""#).unwrap();
        assert_eq!(decoded, name);
    }

    #[test]
    fn test_name_decode_revalidates() {
        let err = decode_name(r#""d:""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);

        assert!(decode_name("42").is_err());
    }

    #[test]
    fn test_name_inside_other_structures() {
        let names = vec![
            ObjectName::parse("a:x=1").unwrap(),
            ObjectName::parse("b:*").unwrap(),
        ];
        let json = encode(&names).unwrap();
        assert_eq!(json, r#"["a:x=1","b:*"]"#);

        let back: Vec<ObjectName> = decode_as(&json).unwrap();
        assert_eq!(back, names);
    }

    #[test]
    fn test_descriptor_to_object() {
        let d = ImmutableDescriptor::from_arrays(
            &["Name", "sizes"],
            &[json!("heap"), json!([1, 2])],
        )
        .unwrap();

        let value: Value = serde_json::from_str(&encode_descriptor(&d).unwrap()).unwrap();
        assert_eq!(value, json!({"Name": "heap", "sizes": [1, 2]}));

        let decoded = decode_descriptor(&encode_descriptor(&d).unwrap()).unwrap();
        assert_eq!(decoded, d);
        assert_eq!(decoded.field_names(), vec!["Name", "sizes"]);
    }

    #[test]
    fn test_descriptor_decode_rejects_case_duplicates() {
        let err = decode_descriptor(r#"{"a": 1, "A": 2}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().contains("Duplicate field name"));
    }

    #[test]
    fn test_descriptor_decode_rejects_empty_name() {
        assert!(decode_descriptor(r#"{"": 1}"#).is_err());
        assert!(decode_descriptor("[1, 2]").is_err());
    }

    #[test]
    fn test_descriptor_support_serde() {
        let mut d = DescriptorSupport::new();
        d.set_field("enabled", json!(true)).unwrap();

        let json = encode(&d).unwrap();
        assert_eq!(json, r#"{"enabled":true}"#);

        let back: DescriptorSupport = decode_as(&json).unwrap();
        assert_eq!(back, d);
    }
}
