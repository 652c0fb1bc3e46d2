//! Task definitions.

use crate::command::Command;
use crate::common::{Input, Output};
use crate::diagnostics::Diagnostic;
use crate::meta::{Meta, ParameterMeta, Runtime};
use crate::render::{Render, Result, TAB, indent_lines, section};

/// Version tag written when none is configured.
pub const DEFAULT_VERSION: &str = "1.1";

/// A task: a command template together with its declared inputs, outputs
/// and execution requirements.
///
/// Sections are emitted in a fixed order (`input`, `command`, `runtime`,
/// `meta`, `parameter_meta`, `output`) and a section with nothing in it is
/// left out entirely.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    /// Command fragments, emitted one after the other inside a single
    /// `command` section.
    pub commands: Vec<Command>,
    pub runtime: Runtime,
    pub meta: Meta,
    pub parameter_meta: ParameterMeta,
    pub version: String,
}

impl Task {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            commands: Vec::new(),
            runtime: Runtime::default(),
            meta: Meta::default(),
            parameter_meta: ParameterMeta::default(),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = Input>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    #[must_use]
    pub fn with_runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = runtime;
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

    /// Conflicting-option notices collected from every command fragment.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.commands.iter().flat_map(Command::diagnostics).collect()
    }

    /// The complete document: version header followed by the task block.
    pub fn to_document(&self) -> Result<String> {
        Ok(format!("version {}\n\n{}", self.version, self.render(0)?))
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

        if !self.commands.is_empty() {
            let fragments = self
                .commands
                .iter()
                .map(|c| c.render(body))
                .collect::<Result<Vec<_>>>()?;
            sections.push(section("command", &fragments.join("\n"), inner));
        }

        if !self.runtime.is_empty() {
            sections.push(section("runtime", &self.runtime.render(body)?, inner));
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

impl Render for Task {
    fn render(&self, indent: usize) -> Result<String> {
        let tb = TAB.repeat(indent);
        let sections = self.sections(indent)?;
        if sections.is_empty() {
            return Ok(format!("{tb}task {} {{\n{tb}}}", self.name));
        }
        Ok(format!(
            "{tb}task {} {{\n{}\n{tb}}}",
            self.name,
            sections.join("\n")
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::command::CommandInput;
    use crate::types::WdlType;

    fn body(task: &Task) -> String {
        task.to_document()
            .unwrap()
            .lines()
            .skip(2)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_document_header() {
        let task = Task::new("noop").with_version("1.0");
        assert_eq!(task.to_document().unwrap(), "version 1.0\n\ntask noop {\n}");
    }

    #[test]
    fn test_meta_scalar() {
        let task = Task::new("meta_scalar").with_meta(Meta::new().with("arbitrary_scalar", 42));
        assert_eq!(
            body(&task),
            "task meta_scalar {\n  meta {\n    arbitrary_scalar: 42\n  }\n}"
        );
    }

    #[test]
    fn test_parameter_meta_bool_sorted() {
        let task = Task::new("param_meta_bool")
            .with_parameter_meta(ParameterMeta::new().with("pos", true).with("neg", false));
        assert_eq!(
            body(&task),
            "task param_meta_bool {\n  parameter_meta {\n    neg: false\n    pos: true\n  }\n}"
        );
    }

    #[test]
    fn test_empty_blocks_omitted() {
        let task = Task::new("t")
            .with_meta(Meta::new().with("skipped", crate::literal::Value::None))
            .with_command(Command::new("echo hi"));
        assert_eq!(body(&task), "task t {\n  command {\n    echo hi\n  }\n}");
    }

    #[test]
    fn test_section_order() {
        let mut runtime = Runtime::new();
        runtime.add_docker("ubuntu");
        let task = Task::new("ordered")
            .with_output(Output::new(WdlType::file(), "out", "stdout()"))
            .with_runtime(runtime)
            .with_command(Command::new("cat").with_input(CommandInput::new("in")))
            .with_input(Input::new(WdlType::file(), "in"));
        let expected = "\
task ordered {
  input {
    File in
  }
  command {
    cat \\
      ~{in}
  }
  runtime {
    docker: \"ubuntu\"
  }
  output {
    File out = stdout()
  }
}";
        assert_eq!(body(&task), expected);
    }

    #[test]
    fn test_multiple_command_fragments() {
        let task = Task::new("two")
            .with_command(Command::new("mkdir -p out"))
            .with_command(Command::from_tokens(["cp", "a", "out/"]));
        assert_eq!(
            body(&task),
            "task two {\n  command {\n    mkdir -p out\n    cp a out/\n  }\n}"
        );
    }

    #[test]
    fn test_diagnostics_collected() {
        let task = Task::new("d").with_command(
            Command::new("cat").with_input(
                CommandInput::new("files")
                    .with_default("x")
                    .with_separate_arrays(),
            ),
        );
        assert_eq!(task.diagnostics().len(), 1);
    }

    #[test]
    fn test_render_is_repeatable() {
        let task = Task::new("again")
            .with_input(Input::new(WdlType::string(), "s"))
            .with_command(Command::new("echo").with_input(CommandInput::new("s")));
        assert_eq!(task.to_document().unwrap(), task.to_document().unwrap());
    }
}
