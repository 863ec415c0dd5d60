// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Query and POST parameters
//!
//! Parameters keep insertion order. A value is either a single scalar or a
//! list of scalars; lists are form-encoded with bracketed indices
//! (`key[0]=a&key[1]=b`).

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use url::form_urlencoded;

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Plain `key=value`
    Scalar(String),
    /// Encoded as `key[0]=..&key[1]=..`
    List(Vec<String>),
}

impl ParamValue {
    /// Get the scalar value, if this is one
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    /// Get the list items, if this is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::Scalar(_) => None,
            ParamValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Scalar(s.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Scalar(if b { "1" } else { "0" }.to_string())
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(n: $t) -> Self {
                    ParamValue::Scalar(n.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u16, u32, u64, usize, f64);

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::List(items.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(items: &[&str]) -> Self {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(items: [&str; N]) -> Self {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Ordered parameter map
///
/// Inserting an existing key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get a parameter by key
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Form-encode all parameters (`application/x-www-form-urlencoded`)
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            match value {
                ParamValue::Scalar(s) => {
                    serializer.append_pair(key, s);
                }
                ParamValue::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        serializer.append_pair(&format!("{}[{}]", key, index), item);
                    }
                }
            }
        }
        serializer.finish()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_encoding() {
        let mut params = Params::new();
        params.insert("foo", "bar");
        params.insert("q", "hello world&more");
        assert_eq!(params.encode(), "foo=bar&q=hello+world%26more");
    }

    #[test]
    fn test_list_encoding_uses_bracketed_indices() {
        let mut params = Params::new();
        params.insert("k", vec!["a", "b"]);
        assert_eq!(params.encode(), "k%5B0%5D=a&k%5B1%5D=b");
    }

    #[test]
    fn test_empty_list_encodes_nothing() {
        let mut params = Params::new();
        params.insert("a", "1");
        params.insert("empty", Vec::<String>::new());
        params.insert("b", "2");
        assert_eq!(params.encode(), "a=1&b=2");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut params = Params::new();
        params.insert("first", "1");
        params.insert("second", "2");
        params.insert("first", vec!["x", "y"]);

        assert_eq!(params.len(), 2);
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(
            params.get("first").and_then(|v| v.as_list()),
            Some(&["x".to_string(), "y".to_string()][..])
        );
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(ParamValue::from(true), ParamValue::Scalar("1".into()));
        assert_eq!(ParamValue::from(false), ParamValue::Scalar("0".into()));
        assert_eq!(ParamValue::from(42u32), ParamValue::Scalar("42".into()));
        assert_eq!(
            ParamValue::from(["a", "b"]),
            ParamValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(ParamValue::from("x").as_scalar(), Some("x"));
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let params: Params = vec![("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
