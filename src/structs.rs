//! Struct definitions.

use crate::render::{Render, Result, indentation, section};
use crate::types::WdlType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub data_type: WdlType,
    pub name: String,
}

impl StructField {
    #[must_use]
    pub fn new(data_type: WdlType, name: impl Into<String>) -> Self {
        Self {
            data_type,
            name: name.into(),
        }
    }
}

impl Render for StructField {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(format!(
            "{}{} {}",
            indentation(indent),
            self.data_type,
            self.name
        ))
    }
}

/// A named record type. Fields keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub name: String,
    pub fields: Vec<StructField>,
}

impl Struct {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, data_type: WdlType, name: impl Into<String>) {
        self.fields.push(StructField::new(data_type, name));
    }

    #[must_use]
    pub fn with_field(mut self, data_type: WdlType, name: impl Into<String>) -> Self {
        self.add_field(data_type, name);
        self
    }
}

impl Render for Struct {
    fn render(&self, indent: usize) -> Result<String> {
        let fields = self
            .fields
            .iter()
            .map(|f| f.render(indent + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(section(
            &format!("struct {}", self.name),
            &fields.join("\n"),
            indent,
        ))
    }
}
