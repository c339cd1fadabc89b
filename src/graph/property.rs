//! Property value types for graph nodes
//!
//! Property bags are untyped: any node may carry any key with any scalar
//! value. Callers are responsible for consistent key naming.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar property value
///
/// Equality is type-exact: `Integer(1)` is not equal to `Float(1.0)` and
/// `String("1")` is not equal to `Integer(1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
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

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "String",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::Boolean(_) => "Boolean",
        }
    }
}

/// Strings display bare (no quotes) so values can be dropped into
/// human-facing text such as rendered node boxes.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
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

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
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

/// Property map for node properties, keeping keys in insertion order
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// Build a [`PropertyMap`] from `key => value` pairs
///
/// ```rust
/// use kgraph::props;
///
/// let p = props! { "name" => "Alpha", "founded" => 1903i64 };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::graph::PropertyMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::graph::PropertyMap::new();
        $( map.insert(::std::string::String::from($key), $crate::graph::PropertyValue::from($value)); )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_types() {
        assert_eq!(
            PropertyValue::String("test".to_string()).type_name(),
            "String"
        );
        assert_eq!(PropertyValue::Integer(42).type_name(), "Integer");
        assert_eq!(PropertyValue::Float(3.5).type_name(), "Float");
        assert_eq!(PropertyValue::Boolean(true).type_name(), "Boolean");
    }

    #[test]
    fn test_property_value_conversions() {
        let string_prop: PropertyValue = "hello".into();
        assert_eq!(string_prop.as_string(), Some("hello"));

        let int_prop: PropertyValue = 42i64.into();
        assert_eq!(int_prop.as_integer(), Some(42));

        let float_prop: PropertyValue = 2.5.into();
        assert_eq!(float_prop.as_float(), Some(2.5));

        let bool_prop: PropertyValue = true.into();
        assert_eq!(bool_prop.as_boolean(), Some(true));
        assert_eq!(bool_prop.as_string(), None);
    }

    #[test]
    fn test_equality_is_type_exact() {
        assert_ne!(PropertyValue::Integer(1), PropertyValue::Float(1.0));
        assert_ne!(PropertyValue::String("1".into()), PropertyValue::Integer(1));
        assert_ne!(PropertyValue::String("true".into()), PropertyValue::Boolean(true));
        assert_eq!(PropertyValue::from("x"), PropertyValue::String("x".into()));
    }

    #[test]
    fn test_display_is_bare() {
        assert_eq!(PropertyValue::from("Alpha").to_string(), "Alpha");
        assert_eq!(PropertyValue::from(7i64).to_string(), "7");
        assert_eq!(PropertyValue::from(false).to_string(), "false");
    }

    #[test]
    fn test_property_map_keeps_insertion_order() {
        let props = props! { "name" => "Alice", "age" => 30i64, "active" => true };
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "age", "active"]);
        assert_eq!(props.get("age").unwrap().as_integer(), Some(30));
    }

    #[test]
    fn test_serde_untagged_roundtrip() {
        let props = props! { "name" => "Beta", "rank" => 2i64, "ratio" => 0.5, "home" => false };
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"name":"Beta","rank":2,"ratio":0.5,"home":false}"#);
        let back: PropertyMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }
}
