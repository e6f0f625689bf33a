//! Loosely typed key/value maps used for properties, traits and settings.
//!
//! The host delivers every map as untyped JSON. Lookups are lenient in the
//! same way the host's own accessors are: booleans may arrive as the strings
//! `"true"`/`"false"`, and scalar values can be read back as strings.

use serde_json::{Map, Value};

/// Ordered string-keyed map of JSON values.
///
/// Iteration follows insertion order, so pairs copied out of a payload keep
/// the order the host produced them in.
pub type ValueMap = Map<String, Value>;

/// Lenient accessors over a [`ValueMap`].
pub trait ValueMapExt {
    /// Read a boolean, falling back to `default` when the key is missing or
    /// holds something that is not a boolean.
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Read a value as a string. Numbers and booleans are stringified;
    /// `null`, arrays and objects yield `None`.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Insert a value, returning the map for chaining.
    fn put_value(self, key: impl Into<String>, value: impl Into<Value>) -> Self;
}

impl ValueMapExt for ValueMap {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            _ => default,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn put_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), value.into());
        self
    }
}

/// True when `text` is absent, empty, or only whitespace.
pub fn is_null_or_empty(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_bool_native() {
        let map = ValueMap::new().put_value("enabled", false);
        assert!(!map.get_bool("enabled", true));
    }

    #[test]
    fn test_get_bool_from_string() {
        let map = ValueMap::new()
            .put_value("a", "false")
            .put_value("b", " TRUE ");
        assert!(!map.get_bool("a", true));
        assert!(map.get_bool("b", false));
    }

    #[test]
    fn test_get_bool_default_when_missing_or_garbage() {
        let map = ValueMap::new().put_value("weird", "maybe").put_value("n", 1);
        assert!(map.get_bool("missing", true));
        assert!(map.get_bool("weird", true));
        assert!(!map.get_bool("n", false));
    }

    #[test]
    fn test_get_string_scalars() {
        let map = ValueMap::new()
            .put_value("s", "foo")
            .put_value("n", 42)
            .put_value("b", true)
            .put_value("o", json!({"k": "v"}));
        assert_eq!(map.get_string("s"), Some("foo".to_string()));
        assert_eq!(map.get_string("n"), Some("42".to_string()));
        assert_eq!(map.get_string("b"), Some("true".to_string()));
        assert_eq!(map.get_string("o"), None);
        assert_eq!(map.get_string("missing"), None);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let map = ValueMap::new()
            .put_value("zeta", 1)
            .put_value("alpha", 2)
            .put_value("mid", 3);
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_is_null_or_empty() {
        assert!(is_null_or_empty(None));
        assert!(is_null_or_empty(Some("")));
        assert!(is_null_or_empty(Some("   ")));
        assert!(!is_null_or_empty(Some("Home")));
    }
}
