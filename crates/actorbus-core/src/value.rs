//! Generic mapping representation.
//!
//! Every record and envelope projects to a [`Mapping`]: string keys, values
//! drawn from the small set of shapes the value schema allows. The external
//! payload codec turns mappings into bytes and back; this crate never sees
//! the bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-keyed mapping exchanged with the payload codec.
pub type Mapping = BTreeMap<String, Value>;

/// Free-form string properties carried by several records.
pub type Properties = BTreeMap<String, String>;

/// A single value inside a [`Mapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    /// Uninterpreted binary payload.
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(Mapping),
}

impl Value {
    /// Short shape name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Map(m)
    }
}

impl From<Properties> for Value {
    fn from(p: Properties) -> Self {
        Value::Map(p.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(l: Vec<String>) -> Self {
        Value::List(l.into_iter().map(Value::String).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Self {
        o.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_become_string_maps() {
        let mut props = Properties::new();
        props.insert("abc".into(), "def".into());
        let value = Value::from(props);
        let map = value.as_map().unwrap();
        assert_eq!(map.get("abc"), Some(&Value::String("def".into())));
    }

    #[test]
    fn none_becomes_null() {
        let value = Value::from(None::<String>);
        assert!(value.is_null());
        assert_eq!(value.kind(), "null");
    }

    #[test]
    fn bytes_survive_json() {
        let value = Value::Bytes(vec![0x80, 0x04, 0x95, 0x00]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
