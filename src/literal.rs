//! Literal values and the key/value blocks built from them.
//!
//! [`Value`] is the closed set of things that can appear on the right-hand
//! side of a `meta`, `parameter_meta` or `runtime` entry, or as a default
//! expression. [`Attributes`] is the ordered bag behind those blocks.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::render::{Render, Result};

/// Quote a raw string as a single WDL/JSON string literal.
///
/// Backslashes, quotes and newlines are escaped so the token can be embedded
/// anywhere a string literal is accepted.
#[must_use]
pub fn quote(raw: &str) -> String {
    serde_json::Value::String(raw.to_string()).to_string()
}

#[derive(Debug, Clone)]
pub enum Value {
    /// Absent. Entries holding `None` are dropped from rendered blocks.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A string literal, quoted when rendered as a literal.
    String(String),
    /// Raw expression text, always emitted verbatim.
    Expr(String),
    Array(Vec<Value>),
    /// Nested object literal, rendered as `{key: value, ...}`.
    Map(IndexMap<String, Value>),
    /// Any other node; its rendered text is used verbatim.
    Node(Arc<dyn Render>),
}

impl Value {
    #[must_use]
    pub fn expr(text: impl Into<String>) -> Self {
        Value::Expr(text.into())
    }

    #[must_use]
    pub fn node<R: Render + 'static>(node: R) -> Self {
        Value::Node(Arc::new(node))
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Render as a WDL literal: strings quoted, booleans lower-case,
    /// numbers bare. Returns `None` for absent values.
    pub fn to_literal(&self) -> Result<Option<String>> {
        match self {
            Value::String(s) => Ok(Some(quote(s))),
            Value::None
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Expr(_)
            | Value::Array(_)
            | Value::Map(_)
            | Value::Node(_) => self.to_raw(),
        }
    }

    /// Render without quoting strings. Nested collections still use the
    /// literal form for their members.
    pub fn to_raw(&self) -> Result<Option<String>> {
        let text = match self {
            Value::None => return Ok(None),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) | Value::Expr(s) => s.clone(),
            Value::Array(items) => {
                let mut rendered = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(text) = item.to_literal()? {
                        rendered.push(text);
                    }
                }
                format!("[{}]", rendered.join(", "))
            }
            Value::Map(map) => {
                let pairs = sorted_pairs(map.iter(), Value::to_literal)?;
                let joined = pairs
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{joined}}}")
            }
            Value::Node(node) => node.render(0)?,
        };
        Ok(Some(text))
    }
}

fn format_float(f: f64) -> String {
    serde_json::Number::from_f64(f).map_or_else(|| f.to_string(), |n| n.to_string())
}

/// Sort entries by key and convert each value, dropping absent ones.
fn sorted_pairs<'a, I, F>(entries: I, convert: F) -> Result<Vec<(&'a str, String)>>
where
    I: Iterator<Item = (&'a String, &'a Value)>,
    F: Fn(&Value) -> Result<Option<String>>,
{
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut out = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if let Some(text) = convert(value)? {
            out.push((key.as_str(), text));
        }
    }
    Ok(out)
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::None, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// How the values of a key/value block are converted to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvStyle {
    /// Values are emitted as given (used by `runtime`).
    Raw,
    /// Values go through the literal converter (used by `meta` blocks).
    Wrapped,
}

/// Ordered mapping of attribute name to value.
///
/// Insertion order is kept for inspection, but rendering always sorts by key
/// so output does not depend on how the block was built.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: IndexMap<String, Value>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// True when no entry would produce output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Value::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Render each present entry as an unindented `key: value` line.
    pub fn render_lines(&self, style: KvStyle) -> Result<Vec<String>> {
        let convert: fn(&Value) -> Result<Option<String>> = match style {
            KvStyle::Raw => Value::to_raw,
            KvStyle::Wrapped => Value::to_literal,
        };
        let pairs = sorted_pairs(self.entries.iter(), convert)?;
        Ok(pairs
            .into_iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect())
    }

    /// Render as an inline object literal, `{key: value, ...}`.
    pub fn render_object(&self) -> Result<String> {
        let pairs = sorted_pairs(self.entries.iter(), Value::to_literal)?;
        let joined = pairs
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{{{joined}}}"))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_quote_escapes_quotes() {
        assert_eq!(quote("\"bar\""), r#""\"bar\"""#);
    }

    #[test]
    fn test_quote_escapes_newline() {
        assert_eq!(quote("bar\nbaz"), r#""bar\nbaz""#);
    }

    #[test]
    fn test_quote_escapes_backslash_then_quote() {
        assert_eq!(quote("bar\\\""), r#""bar\\\"""#);
    }

    #[test]
    fn test_literal_forms() {
        assert_eq!(Value::from(true).to_literal().unwrap().unwrap(), "true");
        assert_eq!(Value::from(42).to_literal().unwrap().unwrap(), "42");
        assert_eq!(Value::from(1.5).to_literal().unwrap().unwrap(), "1.5");
        assert_eq!(Value::from("x").to_literal().unwrap().unwrap(), "\"x\"");
        assert_eq!(Value::expr("a.b").to_literal().unwrap().unwrap(), "a.b");
        assert!(Value::None.to_literal().unwrap().is_none());
    }

    #[test]
    fn test_raw_keeps_strings_bare() {
        assert_eq!(Value::from("\"img\"").to_raw().unwrap().unwrap(), "\"img\"");
    }

    #[test]
    fn test_nested_map_sorted() {
        let mut map = IndexMap::new();
        map.insert("zebra".to_string(), Value::from(1));
        map.insert("alpha".to_string(), Value::from("a"));
        map.insert("gone".to_string(), Value::None);
        let text = Value::Map(map).to_literal().unwrap().unwrap();
        assert_eq!(text, r#"{alpha: "a", zebra: 1}"#);
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"help": "text", "choices": [1, 2], "skip": null});
        let text = Value::from(json).to_literal().unwrap().unwrap();
        assert_eq!(text, r#"{choices: [1, 2], help: "text"}"#);
    }

    #[test]
    fn test_attributes_sorted_and_absent_dropped() {
        let mut attrs = Attributes::new();
        attrs.insert("zebra", 1);
        attrs.insert("alpha", 2);
        attrs.insert("none", Value::None);
        let lines = attrs.render_lines(KvStyle::Wrapped).unwrap();
        assert_eq!(lines, vec!["alpha: 2", "zebra: 1"]);
    }

    #[test]
    fn test_attributes_only_absent_is_empty() {
        let mut attrs = Attributes::new();
        assert!(attrs.is_empty());
        attrs.insert("a", Value::None);
        assert!(attrs.is_empty());
        attrs.insert("b", false);
        assert!(!attrs.is_empty());
    }
}
