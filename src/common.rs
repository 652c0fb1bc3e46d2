//! Declarations shared by tasks and workflows.

use snafu::{OptionExt, ensure};

use crate::literal::{Value, quote};
use crate::render::{MissingFieldSnafu, Render, Result, indent_lines, indentation};
use crate::types::WdlType;

/// Inline conditional expression, `if C then A else B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfThenElse {
    pub condition: String,
    pub value_if_true: String,
    pub value_if_false: String,
}

impl IfThenElse {
    #[must_use]
    pub fn new(
        condition: impl Into<String>,
        value_if_true: impl Into<String>,
        value_if_false: impl Into<String>,
    ) -> Self {
        Self {
            condition: condition.into(),
            value_if_true: value_if_true.into(),
            value_if_false: value_if_false.into(),
        }
    }
}

impl Render for IfThenElse {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(format!(
            "{}if {} then {} else {}",
            indentation(indent),
            self.condition,
            self.value_if_true,
            self.value_if_false
        ))
    }
}

/// A typed input declaration, `Type name = default`.
#[derive(Debug, Clone)]
pub struct Input {
    pub data_type: Option<WdlType>,
    pub name: String,
    pub default: Value,
    /// Quote string defaults as literals. Expressions are never quoted.
    pub requires_quotes: bool,
}

impl Input {
    #[must_use]
    pub fn new(data_type: WdlType, name: impl Into<String>) -> Self {
        Self {
            data_type: Some(data_type),
            name: name.into(),
            default: Value::None,
            requires_quotes: true,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    #[must_use]
    pub fn with_requires_quotes(mut self, requires_quotes: bool) -> Self {
        self.requires_quotes = requires_quotes;
        self
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.data_type.as_ref().is_some_and(|t| t.optional)
    }

    /// The declaration without indentation.
    pub fn declaration(&self) -> Result<String> {
        let data_type = self.data_type.as_ref().context(MissingFieldSnafu {
            entity: "Input",
            name: self.name.clone(),
            field: "type",
        })?;

        let default = match &self.default {
            Value::String(s) if self.requires_quotes => Some(quote(s)),
            other => other.to_raw()?,
        };

        Ok(match default {
            Some(expr) => format!("{data_type} {} = {expr}", self.name),
            None => format!("{data_type} {}", self.name),
        })
    }
}

impl Render for Input {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(format!("{}{}", indentation(indent), self.declaration()?))
    }
}

/// An output declaration.
///
/// An output normally carries a single type. When given several, it expands
/// to one declaration per type: `name`, `name_1`, `name_2`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub types: Vec<WdlType>,
    pub name: String,
    pub expression: Option<String>,
}

impl Output {
    #[must_use]
    pub fn new(data_type: WdlType, name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::with_types(vec![data_type], name, Some(expression.into()))
    }

    /// Output with no expression, as used in struct-like declarations.
    #[must_use]
    pub fn declared(data_type: WdlType, name: impl Into<String>) -> Self {
        Self::with_types(vec![data_type], name, None)
    }

    #[must_use]
    pub fn with_types(
        types: Vec<WdlType>,
        name: impl Into<String>,
        expression: Option<String>,
    ) -> Self {
        Self {
            types,
            name: name.into(),
            expression,
        }
    }

    /// One unindented declaration per type.
    pub fn render_lines(&self) -> Result<Vec<String>> {
        ensure!(
            !self.types.is_empty(),
            MissingFieldSnafu {
                entity: "Output",
                name: self.name.clone(),
                field: "type",
            }
        );

        let assignment = self
            .expression
            .as_ref()
            .filter(|e| !e.is_empty())
            .map(|e| format!(" = {e}"))
            .unwrap_or_default();

        Ok(self
            .types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let name = if i == 0 {
                    self.name.clone()
                } else {
                    format!("{}_{i}", self.name)
                };
                format!("{t} {name}{assignment}")
            })
            .collect())
    }
}

impl Render for Output {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(indent_lines(&self.render_lines()?, indent))
    }
}
