//! Call statements and the control-flow blocks that wrap them.
//!
//! A call's input bindings are laid out as an aligned table. Each row is
//! `tag=value,` padded to a common width, optionally followed by a comment
//! column describing the bound input:
//!
//! ```text
//! call align {
//!   input:
//!     reads=reads,      # Array[File]  --in    REQUIRED
//!     threads=threads   # Int          -t    4
//! }
//! ```

use std::fmt::Write;

use indexmap::IndexMap;

use crate::render::{Render, Result, TAB, indentation, section};

/// Extra columns added after the widest entry of each aligned column.
const COLUMN_PADDING: usize = 2;
/// Sort key for bindings without an explicit position.
const UNPOSITIONED: u32 = 999;

/// The value bound to one call input, with the labels shown in its comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallBinding {
    pub value: String,
    pub position: Option<u32>,
    /// Priority label. Bindings carrying one are listed first.
    pub special: Option<String>,
    pub prefix: Option<String>,
    pub default: Option<String>,
    pub datatype: Option<String>,
}

impl CallBinding {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = Some(special.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    fn is_special(&self) -> bool {
        self.special.as_deref().is_some_and(|s| !s.is_empty())
    }
}

fn text(label: Option<&String>) -> &str {
    label.map_or("", String::as_str)
}

/// Widest label in a column plus padding, or zero when the column is empty.
fn column_width<'a>(labels: impl Iterator<Item = Option<&'a String>>) -> usize {
    labels
        .flatten()
        .map(|l| l.chars().count())
        .max()
        .map_or(0, |w| w + COLUMN_PADDING)
}

/// The aligned `input:` table of a call.
struct BindingTable<'a> {
    rows: Vec<(&'a str, &'a CallBinding)>,
}

impl<'a> BindingTable<'a> {
    fn new(bindings: &'a IndexMap<String, CallBinding>) -> Self {
        let mut rows: Vec<_> = bindings.iter().map(|(t, b)| (t.as_str(), b)).collect();
        rows.sort_by_key(|(_, b)| (!b.is_special(), b.position.unwrap_or(UNPOSITIONED)));
        Self { rows }
    }

    fn render(&self, indent: usize, render_comments: bool) -> String {
        let tb = indentation(indent);
        let last = self.rows.len().saturating_sub(1);

        let assignments: Vec<String> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, (tag, binding))| {
                let comma = if i < last { "," } else { "" };
                format!("{tag}={}{comma}", binding.value)
            })
            .collect();

        if !render_comments {
            return assignments
                .iter()
                .map(|a| format!("{tb}{a}"))
                .collect::<Vec<_>>()
                .join("\n");
        }

        let tag_width = self
            .rows
            .iter()
            .map(|(tag, b)| format!("{tag}={},", b.value).chars().count())
            .max()
            .map_or(0, |w| w + COLUMN_PADDING);
        let datatype_width = column_width(self.rows.iter().map(|(_, b)| b.datatype.as_ref()));
        let prefix_width = column_width(self.rows.iter().map(|(_, b)| b.prefix.as_ref()));

        self.rows
            .iter()
            .zip(&assignments)
            .map(|((_, binding), assignment)| {
                let datatype = text(binding.datatype.as_ref());
                let prefix = text(binding.prefix.as_ref());
                let default = text(binding.default.as_ref());
                let special = text(binding.special.as_ref());

                if datatype.is_empty() && prefix.is_empty() && default.is_empty() && special.is_empty()
                {
                    return format!("{tb}{assignment}");
                }

                let datatype = if datatype.is_empty() {
                    String::new()
                } else {
                    format!("{datatype:<datatype_width$}")
                };
                let prefix = if prefix.is_empty() {
                    String::new()
                } else {
                    format!("{prefix:<prefix_width$}")
                };
                let row = format!(
                    "{tb}{assignment:<tag_width$}# {datatype}{prefix}{default}  {special}"
                );
                row.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A `call` statement.
#[derive(Debug, Clone)]
pub struct WorkflowCall {
    /// Callee, possibly namespaced (`tools.align`).
    pub identifier: String,
    pub alias: Option<String>,
    pub bindings: IndexMap<String, CallBinding>,
    /// Free-text notes emitted as comment lines above the call.
    pub messages: Vec<String>,
    /// Emit the comment column and messages.
    pub render_comments: bool,
}

impl WorkflowCall {
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            alias: None,
            bindings: IndexMap::new(),
            messages: Vec::new(),
            render_comments: true,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_binding(mut self, tag: impl Into<String>, binding: CallBinding) -> Self {
        self.bindings.insert(tag.into(), binding);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    #[must_use]
    pub fn with_render_comments(mut self, render_comments: bool) -> Self {
        self.render_comments = render_comments;
        self
    }
}

impl Render for WorkflowCall {
    fn render(&self, indent: usize) -> Result<String> {
        let tb = indentation(indent);
        let alias = self
            .alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(|a| format!(" as {a}"))
            .unwrap_or_default();

        let mut out = String::new();
        if self.render_comments {
            for message in &self.messages {
                let _ = writeln!(out, "{tb}#{message}");
            }
        }

        let _ = write!(out, "{tb}call {}{alias}", self.identifier);
        if self.bindings.is_empty() {
            return Ok(out);
        }

        let table = BindingTable::new(&self.bindings).render(indent + 2, self.render_comments);
        let _ = write!(out, " {{\n{tb}{TAB}input:\n{table}\n{tb}}}");
        Ok(out)
    }
}

/// Anything that can appear in a workflow body.
#[derive(Debug, Clone)]
pub enum CallBlock {
    Call(WorkflowCall),
    Conditional(WorkflowConditional),
    Scatter(WorkflowScatter),
}

impl Render for CallBlock {
    fn render(&self, indent: usize) -> Result<String> {
        match self {
            CallBlock::Call(call) => call.render(indent),
            CallBlock::Conditional(conditional) => conditional.render(indent),
            CallBlock::Scatter(scatter) => scatter.render(indent),
        }
    }
}

impl From<WorkflowCall> for CallBlock {
    fn from(call: WorkflowCall) -> Self {
        CallBlock::Call(call)
    }
}

impl From<WorkflowConditional> for CallBlock {
    fn from(conditional: WorkflowConditional) -> Self {
        CallBlock::Conditional(conditional)
    }
}

impl From<WorkflowScatter> for CallBlock {
    fn from(scatter: WorkflowScatter) -> Self {
        CallBlock::Scatter(scatter)
    }
}

fn render_body(blocks: &[CallBlock], indent: usize) -> Result<String> {
    Ok(blocks
        .iter()
        .map(|b| b.render(indent))
        .collect::<Result<Vec<_>>>()?
        .join("\n"))
}

/// `if (condition) { ... }`
#[derive(Debug, Clone)]
pub struct WorkflowConditional {
    pub condition: String,
    pub calls: Vec<CallBlock>,
}

impl WorkflowConditional {
    #[must_use]
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_call(mut self, call: impl Into<CallBlock>) -> Self {
        self.calls.push(call.into());
        self
    }
}

impl Render for WorkflowConditional {
    fn render(&self, indent: usize) -> Result<String> {
        let body = render_body(&self.calls, indent + 1)?;
        Ok(section(&format!("if ({})", self.condition), &body, indent))
    }
}

/// `scatter (identifier in expression) { ... }`
#[derive(Debug, Clone)]
pub struct WorkflowScatter {
    pub identifier: String,
    pub expression: String,
    pub calls: Vec<CallBlock>,
}

impl WorkflowScatter {
    #[must_use]
    pub fn new(identifier: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            expression: expression.into(),
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_call(mut self, call: impl Into<CallBlock>) -> Self {
        self.calls.push(call.into());
        self
    }
}

impl Render for WorkflowScatter {
    fn render(&self, indent: usize) -> Result<String> {
        let body = render_body(&self.calls, indent + 1)?;
        let header = format!("scatter ({} in {})", self.identifier, self.expression);
        Ok(section(&header, &body, indent))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_empty_blocks_have_no_blank_line() {
        assert_eq!(WorkflowConditional::new("c").render(0).unwrap(), "if (c) {\n}");
        assert_eq!(
            WorkflowScatter::new("s", "xs").render(1).unwrap(),
            "  scatter (s in xs) {\n  }"
        );
    }

    #[test]
    fn test_bare_call() {
        let call = WorkflowCall::new("tools.align").with_alias("align");
        assert_eq!(call.render(1).unwrap(), "  call tools.align as align");
    }

    #[test]
    fn test_bindings_without_comments() {
        let call = WorkflowCall::new("align")
            .with_binding("reads", CallBinding::new("reads").with_datatype("File"))
            .with_binding("threads", CallBinding::new("4"))
            .with_render_comments(false);
        assert_eq!(
            call.render(0).unwrap(),
            "call align {\n  input:\n    reads=reads,\n    threads=4\n}"
        );
    }

    #[test]
    fn test_comment_columns_align() {
        let call = WorkflowCall::new("align")
            .with_binding(
                "reads",
                CallBinding::new("reads")
                    .with_datatype("Array[File]")
                    .with_prefix("--in")
                    .with_special("REQUIRED"),
            )
            .with_binding(
                "threads",
                CallBinding::new("threads")
                    .with_datatype("Int")
                    .with_prefix("-t")
                    .with_default("4"),
            );
        let expected = "\
call align {
  input:
    reads=reads,      # Array[File]  --in    REQUIRED
    threads=threads   # Int          -t    4
}";
        assert_eq!(call.render(0).unwrap(), expected);
    }

    #[test]
    fn test_special_bindings_first() {
        let call = WorkflowCall::new("t")
            .with_binding("a", CallBinding::new("1"))
            .with_binding("b", CallBinding::new("2").with_special("REQUIRED"))
            .with_binding("c", CallBinding::new("3").with_special(""))
            .with_render_comments(false);
        assert_eq!(
            call.render(0).unwrap(),
            "call t {\n  input:\n    b=2,\n    a=1,\n    c=3\n}"
        );
    }

    #[test]
    fn test_positions_order_within_group() {
        let call = WorkflowCall::new("t")
            .with_binding("late", CallBinding::new("1").with_position(5))
            .with_binding("unset", CallBinding::new("2"))
            .with_binding("early", CallBinding::new("3").with_position(1))
            .with_render_comments(false);
        assert_eq!(
            call.render(0).unwrap(),
            "call t {\n  input:\n    early=3,\n    late=1,\n    unset=2\n}"
        );
    }

    #[test]
    fn test_rows_without_labels_have_no_comment() {
        let call = WorkflowCall::new("t")
            .with_binding("x", CallBinding::new("1").with_datatype("Int"))
            .with_binding("y", CallBinding::new("2"));
        assert_eq!(
            call.render(0).unwrap(),
            "call t {\n  input:\n    x=1,  # Int\n    y=2\n}"
        );
    }

    #[test]
    fn test_messages() {
        let call = WorkflowCall::new("t").with_message("check inputs");
        assert_eq!(call.render(1).unwrap(), "  #check inputs\n  call t");
        let quiet = call.with_render_comments(false);
        assert_eq!(quiet.render(1).unwrap(), "  call t");
    }

    #[test]
    fn test_scatter_and_conditional_nest() {
        let scatter = WorkflowScatter::new("s", "samples").with_call(
            WorkflowConditional::new("defined(s)").with_call(WorkflowCall::new("process")),
        );
        assert_eq!(
            scatter.render(1).unwrap(),
            "  scatter (s in samples) {\n    if (defined(s)) {\n      call process\n    }\n  }"
        );
    }
}
