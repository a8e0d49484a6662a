//! The configuration tree node type

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub type Mapping = BTreeMap<String, ConfigValue>;

/// A node of the configuration tree.
///
/// Every consumer matches on the closed set of shapes, so scalars,
/// sequences and mappings are always handled explicitly.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(Mapping),
}

impl ConfigValue {
    /// An empty mapping, the shape of a freshly created tree.
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// True for `Null` and for empty mappings.
    pub fn is_empty_tree(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Mapping(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the node shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Convert any serializable value (typically a user struct) into a tree node.
    pub fn from_serializable<T: Serialize + ?Sized>(data: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(data).map(Self::from)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Sequence(_) | Self::Mapping(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<serde_yaml::Value> for ConfigValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Mapping(
                map.into_iter().map(|(k, v)| (yaml_key_to_string(k), Self::from(v))).collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// YAML allows non-string keys; the tree addresses everything by string.
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => ConfigValue::from(other).to_string(),
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),
            toml::Value::Integer(i) => Self::Int(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Datetime(dt) => Self::String(dt.to_string()),
            toml::Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => {
                Self::Mapping(table.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConfigValue>> From<BTreeMap<String, T>> for ConfigValue {
    fn from(map: BTreeMap<String, T>) -> Self {
        Self::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<ConfigValue>> From<HashMap<String, T>> for ConfigValue {
    fn from(map: HashMap<String, T>) -> Self {
        Self::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_integer_and_float_apart() {
        let value = ConfigValue::from(json!({"port": 8080, "ratio": 0.5, "tags": ["a", 1]}));
        let map = value.as_mapping().expect("mapping");
        assert_eq!(map["port"], ConfigValue::Int(8080));
        assert_eq!(map["ratio"], ConfigValue::Float(0.5));
        assert_eq!(
            map["tags"],
            ConfigValue::Sequence(vec![ConfigValue::from("a"), ConfigValue::Int(1)])
        );
    }

    #[test]
    fn test_from_json_large_unsigned_becomes_float() {
        let value = ConfigValue::from(json!(u64::MAX));
        assert!(matches!(value, ConfigValue::Float(_)));
    }

    #[test]
    fn test_from_yaml_stringifies_keys() {
        let raw: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\n").expect("yaml");
        let value = ConfigValue::from(raw);
        let map = value.as_mapping().expect("mapping");
        assert_eq!(map["1"], ConfigValue::from("one"));
        assert_eq!(map["true"], ConfigValue::from("yes"));
    }

    #[test]
    fn test_from_toml_datetime_becomes_string() {
        let raw: toml::Value = toml::from_str("at = 1979-05-27T07:32:00Z\n").expect("toml");
        let value = ConfigValue::from(raw);
        assert_eq!(value.as_mapping().expect("mapping")["at"], ConfigValue::from("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn test_from_serializable_struct() {
        #[derive(serde::Serialize)]
        struct Db {
            host: String,
            port: u16,
        }

        let value = ConfigValue::from_serializable(&Db { host: "localhost".into(), port: 5432 })
            .expect("serializable");
        let map = value.as_mapping().expect("mapping");
        assert_eq!(map["host"], ConfigValue::from("localhost"));
        assert_eq!(map["port"], ConfigValue::Int(5432));
    }

    #[test]
    fn test_display_renders_containers_as_json() {
        let value = ConfigValue::from(vec!["a", "b"]);
        assert_eq!(value.to_string(), r#"["a","b"]"#);
        assert_eq!(ConfigValue::Int(3).to_string(), "3");
    }

    #[test]
    fn test_empty_tree() {
        assert!(ConfigValue::Null.is_empty_tree());
        assert!(ConfigValue::empty_mapping().is_empty_tree());
        assert!(!ConfigValue::Int(0).is_empty_tree());
    }
}
