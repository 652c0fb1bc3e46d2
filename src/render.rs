//! The render contract shared by every node in the document tree.

use snafu::prelude::*;

/// One level of indentation in generated source.
pub const TAB: &str = "  ";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Could not render {entity} ('{name}'): {field} was not set"))]
    MissingField {
        entity: &'static str,
        name: String,
        field: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// A node that can be turned into WDL source text.
///
/// Rendering never mutates the node and never caches output, so the same
/// tree always renders to the same text.
pub trait Render: std::fmt::Debug + Send + Sync {
    /// Render the node with its first line indented `indent` levels.
    fn render(&self, indent: usize) -> Result<String>;
}

/// Indentation prefix for the given nesting level.
#[must_use]
pub fn indentation(level: usize) -> String {
    TAB.repeat(level)
}

/// Prefix every line with `level` levels of indentation.
#[must_use]
pub fn indent_lines<S: AsRef<str>>(lines: &[S], level: usize) -> String {
    let tb = indentation(level);
    lines
        .iter()
        .map(|line| format!("{tb}{}", line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap an already indented body in a named `name { ... }` section.
/// An empty body closes the brace on the next line.
#[must_use]
pub fn section(name: &str, body: &str, level: usize) -> String {
    let tb = indentation(level);
    if body.is_empty() {
        return format!("{tb}{name} {{\n{tb}}}");
    }
    format!("{tb}{name} {{\n{body}\n{tb}}}")
}
