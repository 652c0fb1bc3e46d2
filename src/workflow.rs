//! Workflow documents.
//!
//! A workflow document consists of a version header, the imports, any
//! statements that must follow them (usually struct definitions), and the
//! `workflow` block itself.

use crate::common::{Input, Output};
use crate::meta::{Meta, ParameterMeta};
use crate::render::{Render, Result, indent_lines, indentation, section};
use crate::structs::Struct;
use crate::task::DEFAULT_VERSION;
use crate::workflow_call::CallBlock;

/// Directory imports are resolved against when none is given.
pub const DEFAULT_TOOLS_DIR: &str = "tools/";

/// `import "tools/name.wdl" as alias`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowImport {
    pub name: String,
    pub alias: Option<String>,
    /// Always empty or ending in `/`.
    tools_dir: String,
}

impl WorkflowImport {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            tools_dir: DEFAULT_TOOLS_DIR.to_string(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Directory prefix for the imported file. A trailing `/` is added when
    /// missing; an empty string imports from the working directory.
    #[must_use]
    pub fn with_tools_dir(mut self, tools_dir: impl Into<String>) -> Self {
        let mut tools_dir = tools_dir.into();
        if !tools_dir.is_empty() && !tools_dir.ends_with('/') {
            tools_dir.push('/');
        }
        self.tools_dir = tools_dir;
        self
    }

    #[must_use]
    pub fn tools_dir(&self) -> &str {
        &self.tools_dir
    }
}

impl Render for WorkflowImport {
    fn render(&self, indent: usize) -> Result<String> {
        let alias = match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => format!(" as {alias}"),
            Some(_) | None => String::new(),
        };
        Ok(format!(
            "{}import \"{}{}.wdl\"{alias}",
            indentation(indent),
            self.tools_dir,
            self.name
        ))
    }
}

/// A top-level statement placed between the imports and the workflow block.
#[derive(Debug, Clone)]
pub enum PostImport {
    Struct(Struct),
    /// Emitted verbatim.
    Raw(String),
}

impl Render for PostImport {
    fn render(&self, indent: usize) -> Result<String> {
        match self {
            PostImport::Struct(s) => s.render(indent),
            PostImport::Raw(text) => Ok(format!("{}{text}", indentation(indent))),
        }
    }
}

impl From<Struct> for PostImport {
    fn from(s: Struct) -> Self {
        PostImport::Struct(s)
    }
}

/// A workflow output: either a declaration node or a pre-formatted line.
#[derive(Debug, Clone)]
pub enum WorkflowOutput {
    Declared(Output),
    Raw(String),
}

impl WorkflowOutput {
    fn render_lines(&self) -> Result<Vec<String>> {
        match self {
            WorkflowOutput::Declared(output) => output.render_lines(),
            WorkflowOutput::Raw(line) => Ok(vec![line.clone()]),
        }
    }
}

impl From<Output> for WorkflowOutput {
    fn from(output: Output) -> Self {
        WorkflowOutput::Declared(output)
    }
}

impl From<&str> for WorkflowOutput {
    fn from(line: &str) -> Self {
        WorkflowOutput::Raw(line.to_string())
    }
}

impl From<String> for WorkflowOutput {
    fn from(line: String) -> Self {
        WorkflowOutput::Raw(line)
    }
}

#[derive(Debug, Clone)]
pub struct Workflow {
    /// Never contains `-`; see [`Workflow::normalize_name`].
    name: String,
    pub inputs: Vec<Input>,
    pub outputs: Vec<WorkflowOutput>,
    pub calls: Vec<CallBlock>,
    pub imports: Vec<WorkflowImport>,
    pub post_import: Vec<PostImport>,
    pub meta: Meta,
    pub parameter_meta: ParameterMeta,
    pub version: String,
}

impl Workflow {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Self::normalize_name(name),
            inputs: Vec::new(),
            outputs: Vec::new(),
            calls: Vec::new(),
            imports: Vec::new(),
            post_import: Vec::new(),
            meta: Meta::default(),
            parameter_meta: ParameterMeta::default(),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    /// Hyphens are not valid in workflow identifiers.
    #[must_use]
    pub fn normalize_name(name: &str) -> String {
        name.replace('-', "_")
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Self::normalize_name(name);
    }

    #[must_use]
    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<WorkflowOutput>) -> Self {
        self.outputs.push(output.into());
        self
    }

    #[must_use]
    pub fn with_call(mut self, call: impl Into<CallBlock>) -> Self {
        self.calls.push(call.into());
        self
    }

    #[must_use]
    pub fn with_import(mut self, import: WorkflowImport) -> Self {
        self.imports.push(import);
        self
    }

    #[must_use]
    pub fn with_post_import(mut self, statement: impl Into<PostImport>) -> Self {
        self.post_import.push(statement.into());
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn with_parameter_meta(mut self, parameter_meta: ParameterMeta) -> Self {
        self.parameter_meta = parameter_meta;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The complete document: header, imports, post-import statements and
    /// the workflow block.
    pub fn to_document(&self) -> Result<String> {
        let mut out = format!("version {}\n\n", self.version);

        if !self.imports.is_empty() {
            let imports = self
                .imports
                .iter()
                .map(|i| i.render(0))
                .collect::<Result<Vec<_>>>()?;
            out.push_str(&imports.join("\n"));
            out.push_str("\n\n");
        }

        if !self.post_import.is_empty() {
            let statements = self
                .post_import
                .iter()
                .map(|s| s.render(0))
                .collect::<Result<Vec<_>>>()?;
            out.push_str(&statements.join("\n\n"));
            out.push_str("\n\n");
        }

        out.push_str(&self.render(0)?);
        Ok(out)
    }

    fn sections(&self, indent: usize) -> Result<Vec<String>> {
        let inner = indent + 1;
        let body = inner + 1;
        let mut sections = Vec::new();

        if !self.inputs.is_empty() {
            let lines = self
                .inputs
                .iter()
                .map(|i| i.render(body))
                .collect::<Result<Vec<_>>>()?;
            sections.push(section("input", &lines.join("\n"), inner));
        }

        if !self.calls.is_empty() {
            let calls = self
                .calls
                .iter()
                .map(|c| c.render(inner))
                .collect::<Result<Vec<_>>>()?;
            sections.push(calls.join("\n"));
        }

        if !self.meta.is_empty() {
            sections.push(section("meta", &self.meta.render(body)?, inner));
        }

        if !self.parameter_meta.is_empty() {
            sections.push(section(
                "parameter_meta",
                &self.parameter_meta.render(body)?,
                inner,
            ));
        }

        if !self.outputs.is_empty() {
            let mut lines = Vec::new();
            for output in &self.outputs {
                lines.extend(output.render_lines()?);
            }
            sections.push(section("output", &indent_lines(&lines, body), inner));
        }

        Ok(sections)
    }
}

impl Render for Workflow {
    fn render(&self, indent: usize) -> Result<String> {
        let tb = indentation(indent);
        let sections = self.sections(indent)?;
        if sections.is_empty() {
            return Ok(format!("{tb}workflow {} {{\n{tb}}}", self.name));
        }
        Ok(format!(
            "{tb}workflow {} {{\n{}\n{tb}}}",
            self.name,
            sections.join("\n")
        ))
    }
}
