//! `meta`, `parameter_meta` and `runtime` sections.
//!
//! All three are thin wrappers over [`Attributes`]; the named helpers are
//! plain setters for commonly used keys.

use crate::literal::{Attributes, KvStyle, Value};
use crate::render::{Render, Result, indent_lines};

/// Free-form document metadata. String values are quoted.
#[derive(Debug, Clone, Default)]
pub struct Meta {
    pub attributes: Attributes,
}

impl Meta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key, value);
    }

    pub fn add_author(&mut self, author: impl Into<String>) {
        self.attributes.insert("author", author.into());
    }

    pub fn add_email(&mut self, email: impl Into<String>) {
        self.attributes.insert("email", email.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Render for Meta {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(indent_lines(
            &self.attributes.render_lines(KvStyle::Wrapped)?,
            indent,
        ))
    }
}

/// Structured description of a single parameter, rendered as an object
/// literal: `{help: "...", suggestions: [...]}`.
#[derive(Debug, Clone, Default)]
pub struct ParamMetaAttribute {
    pub attributes: Attributes,
}

impl ParamMetaAttribute {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.attributes.insert("help", help.into());
        self
    }

    #[must_use]
    pub fn suggestions<I, V>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = suggestions.into_iter().map(Into::into).collect();
        self.attributes.insert("suggestions", items);
        self
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl Render for ParamMetaAttribute {
    fn render(&self, _indent: usize) -> Result<String> {
        self.attributes.render_object()
    }
}

impl From<ParamMetaAttribute> for Value {
    fn from(attribute: ParamMetaAttribute) -> Self {
        Value::node(attribute)
    }
}

/// Per-parameter metadata. Values may be scalars, raw mappings or
/// [`ParamMetaAttribute`] objects.
#[derive(Debug, Clone, Default)]
pub struct ParameterMeta {
    pub attributes: Attributes,
}

impl ParameterMeta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key, value);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Render for ParameterMeta {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(indent_lines(
            &self.attributes.render_lines(KvStyle::Wrapped)?,
            indent,
        ))
    }
}

/// Task runtime requirements. Values are emitted verbatim, so string
/// values must carry their own quotes; the helpers take care of that.
#[derive(Debug, Clone, Default)]
pub struct Runtime {
    pub attributes: Attributes,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key, value);
    }

    pub fn add_docker(&mut self, docker: &str) {
        self.attributes.insert("docker", Value::expr(format!("\"{docker}\"")));
    }

    pub fn add_cpus(&mut self, cpus: u32) {
        self.attributes.insert("cpu", cpus);
    }

    pub fn add_memory(&mut self, memory_gb: f64) {
        self.attributes
            .insert("memory", Value::expr(format!("\"{memory_gb}G\"")));
    }

    pub fn add_gcp_disk(&mut self, disk_size_gb: u32) {
        self.attributes.insert(
            "disks",
            Value::expr(format!("\"local-disk {disk_size_gb} SSD\"")),
        );
    }

    pub fn add_gcp_boot_disk(&mut self, disk_size_gb: u32) {
        self.attributes.insert("bootDiskSizeGb", disk_size_gb);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Render for Runtime {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(indent_lines(
            &self.attributes.render_lines(KvStyle::Raw)?,
            indent,
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_meta_quotes_strings() {
        let mut meta = Meta::new();
        meta.add_author("illusional");
        meta.add_email("dev@example.org");
        assert_eq!(
            meta.render(0).unwrap(),
            "author: \"illusional\"\nemail: \"dev@example.org\""
        );
    }

    #[test]
    fn test_meta_booleans_sorted() {
        let meta = Meta::new().with("pos", true).with("neg", false);
        assert_eq!(meta.render(1).unwrap(), "  neg: false\n  pos: true");
    }

    #[test]
    fn test_parameter_meta_sanitises() {
        let pm = ParameterMeta::new().with("foo", "\"bar\"");
        assert_eq!(pm.render(0).unwrap(), r#"foo: "\"bar\"""#);
        let pm = ParameterMeta::new().with("foo", "bar\nbaz");
        assert_eq!(pm.render(0).unwrap(), r#"foo: "bar\nbaz""#);
        let pm = ParameterMeta::new().with("foo", "bar\\\"");
        assert_eq!(pm.render(0).unwrap(), r#"foo: "bar\\\"""#);
    }

    #[test]
    fn test_parameter_meta_sorted_keys() {
        let pm = ParameterMeta::new().with("zebra", 1).with("alpha", 2);
        assert_eq!(pm.render(0).unwrap(), "alpha: 2\nzebra: 1");
    }

    #[test]
    fn test_param_meta_attribute_object() {
        let attr = ParamMetaAttribute::new()
            .help("This is help text")
            .with("scalar", 96);
        let pm = ParameterMeta::new().with("obj_value", attr);
        assert_eq!(
            pm.render(0).unwrap(),
            r#"obj_value: {help: "This is help text", scalar: 96}"#
        );
    }

    #[test]
    fn test_param_meta_suggestions() {
        let attr = ParamMetaAttribute::new().suggestions(["fast", "slow"]);
        assert_eq!(attr.render(0).unwrap(), r#"{suggestions: ["fast", "slow"]}"#);
    }

    #[test]
    fn test_runtime_helpers() {
        let mut runtime = Runtime::new();
        runtime.add_docker("ubuntu:22.04");
        runtime.add_cpus(4);
        runtime.add_memory(8.0);
        runtime.add_gcp_disk(100);
        runtime.add_gcp_boot_disk(20);
        assert_eq!(
            runtime.render(0).unwrap(),
            [
                "bootDiskSizeGb: 20",
                "cpu: 4",
                "disks: \"local-disk 100 SSD\"",
                "docker: \"ubuntu:22.04\"",
                "memory: \"8G\"",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_runtime_raw_values() {
        let runtime = Runtime::new().with("preemptible", "2");
        assert_eq!(runtime.render(0).unwrap(), "preemptible: 2");
    }
}
