//! The loosely-typed parameter value model.
//!
//! Megawidget specifications are authored as key-value maps whose values are
//! drawn from a small recursive union: booleans, numbers, strings, ordered
//! lists, and nested maps. This module provides that union as [`ParamValue`]
//! and the map type as [`ParameterMap`].
//!
//! Values are plain owned data. Handing a map to a specifier transfers (or
//! clones) ownership, so a caller mutating its own copy afterwards can never
//! reach into validated state.
//!
//! # JSON Interop
//!
//! Parameter maps are commonly authored or generated as JSON. [`ParamValue`]
//! converts to and from [`serde_json::Value`] (integral JSON numbers become
//! [`ParamValue::Int`], all others [`ParamValue::Float`]), and a whole map can
//! be parsed from a JSON object string:
//!
//! ```
//! use horizon_formwork_core::ParameterMap;
//!
//! let map = ParameterMap::from_json_str(
//!     r#"{"field": "severity", "type": "combo_box", "choices": ["low", "high"]}"#,
//! ).unwrap();
//! assert_eq!(map.get("field").and_then(|v| v.as_str()), Some("severity"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// A single loosely-typed configuration value.
///
/// This is the recursive union underlying every megawidget parameter map.
/// Conversion helpers in [`crate::convert`] turn these into typed values with
/// structured errors; no reflection-style dispatch is ever performed on them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    /// An explicitly absent value. Treated like a missing key by the
    /// conversion helpers.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<ParamValue>),
    /// A nested map of values.
    Map(ParameterMap),
}

impl ParamValue {
    /// A short human-readable name for the value's variant, used in
    /// validation error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "number",
            ParamValue::String(_) => "string",
            ParamValue::List(_) => "list",
            ParamValue::Map(_) => "map",
        }
    }

    /// Returns `true` if the value is [`ParamValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Returns the boolean if this is a [`ParamValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`ParamValue::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as `f64` if this is numeric (int or float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(n) => Some(*n as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`ParamValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the element slice if this is a [`ParamValue::List`].
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested map if this is a [`ParamValue::Map`].
    pub fn as_map(&self) -> Option<&ParameterMap> {
        match self {
            ParamValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns `true` if the value is a scalar (bool, int, float, or string).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ParamValue::Bool(_) | ParamValue::Int(_) | ParamValue::Float(_) | ParamValue::String(_)
        )
    }

    /// The canonical string rendering of a scalar value.
    ///
    /// Choice trees identify scalar leaves by this rendering, so `42` and
    /// `"42"` address the same choice. Returns `None` for null, lists, and
    /// maps.
    pub fn canonical_string(&self) -> Option<String> {
        match self {
            ParamValue::Bool(b) => Some(b.to_string()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::Float(f) => Some(f.to_string()),
            ParamValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::String(s) => write!(f, "\"{s}\""),
            ParamValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            ParamValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{key}\": {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(value: Vec<ParamValue>) -> Self {
        ParamValue::List(value)
    }
}

impl From<ParameterMap> for ParamValue {
    fn from(value: ParameterMap) -> Self {
        ParamValue::Map(value)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ParamValue::Int(i)
                } else {
                    ParamValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => ParamValue::String(s),
            serde_json::Value::Array(items) => {
                ParamValue::List(items.into_iter().map(ParamValue::from).collect())
            }
            serde_json::Value::Object(entries) => {
                let mut map = ParameterMap::new();
                for (key, value) in entries {
                    map.insert(key, ParamValue::from(value));
                }
                ParamValue::Map(map)
            }
        }
    }
}

impl From<ParamValue> for serde_json::Value {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Null => serde_json::Value::Null,
            ParamValue::Bool(b) => serde_json::Value::Bool(b),
            ParamValue::Int(n) => serde_json::Value::from(n),
            ParamValue::Float(f) => {
                serde_json::Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            ParamValue::String(s) => serde_json::Value::String(s),
            ParamValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            ParamValue::Map(map) => {
                let mut entries = serde_json::Map::new();
                for (key, value) in map {
                    entries.insert(key, serde_json::Value::from(value));
                }
                serde_json::Value::Object(entries)
            }
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null => serializer.serialize_unit(),
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Int(n) => serializer.serialize_i64(*n),
            ParamValue::Float(f) => serializer.serialize_f64(*f),
            ParamValue::String(s) => serializer.serialize_str(s),
            ParamValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ParamValue::Map(map) => {
                let mut entries = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    entries.serialize_entry(key, value)?;
                }
                entries.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(ParamValue::from(value))
    }
}

/// An ordered map of parameter names to values.
///
/// This is the sole specification input format: consumers hand-author or
/// generate these maps (typically from JSON) and pass them to the specifier
/// factory. Keys are kept in sorted order, which also fixes the validation
/// order of bulk property updates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a map from a JSON object string.
    ///
    /// Fails if the string is not valid JSON or the top-level value is not
    /// an object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render the map as a JSON object string.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Insert a value, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert for fluent map construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Returns `true` if the map contains the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a value by key, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.entries.iter()
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

impl From<BTreeMap<String, ParamValue>> for ParameterMap {
    fn from(entries: BTreeMap<String, ParamValue>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, ParamValue)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
