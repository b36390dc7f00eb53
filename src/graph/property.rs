//! Property value types for graph nodes
//!
//! Bulk-loaded nodes carry arbitrary scalar attributes next to the
//! `name` (base symbol) attribute the k-mer index reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Scalar property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Null,
}

impl PropertyValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Interpret the value as a positive node id.
    ///
    /// Accepts integers and integer-looking strings, since bulk files often
    /// quote every attribute.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            PropertyValue::Integer(i) if *i > 0 => Some(*i as u64),
            PropertyValue::String(s) => s.trim().parse::<u64>().ok().filter(|id| *id > 0),
            _ => None,
        }
    }

    /// Interpret the value as a single base symbol, uppercased.
    pub fn as_base(&self) -> Option<char> {
        let s = self.as_string()?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c.to_ascii_uppercase()),
            _ => None,
        }
    }

    /// Selector comparison: values match when their textual forms agree,
    /// so `3` matches `"3"`.
    pub fn matches(&self, other: &PropertyValue) -> bool {
        self == other || self.to_text() == other.to_text()
    }

    /// Unquoted textual form
    pub fn to_text(&self) -> String {
        match self {
            PropertyValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Convert a JSON scalar. Nested arrays/objects are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Bool(b) => PropertyValue::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => PropertyValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => PropertyValue::String(s.clone()),
            nested => PropertyValue::String(nested.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<char> for PropertyValue {
    fn from(c: char) -> Self {
        PropertyValue::String(c.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<u64> for PropertyValue {
    fn from(i: u64) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

/// Property map for storing node attributes
pub type PropertyMap = HashMap<String, PropertyValue>;
