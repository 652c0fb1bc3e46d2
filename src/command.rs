//! Command-line assembly for task `command { }` sections.
//!
//! A [`Command`] is a base command followed by positioned tokens. Plain
//! tokens are [`CommandArgument`]s; tokens bound to a task input are
//! [`CommandInput`]s, which choose one of several interpolation forms
//! depending on optionality, prefix and [`InputStyle`].
//!
//! The forms are tried in a fixed order:
//!
//! 1. [`InputStyle::SeparateArrays`]: every element gets the prefix.
//! 2. [`InputStyle::Array`] on an optional input: a guarded prefix followed
//!    by the joined array.
//! 3. Everything else: the bare name, wrapped in turn by the default, the
//!    separator and the flag literals, then prefixed.

use tracing::warn;

use crate::common::Input;
use crate::diagnostics::Diagnostic;
use crate::literal::{Value, quote};
use crate::render::{Render, Result, indentation};

const SEPARATE_ARRAYS: &str = "separate_arrays";
const SEPARATOR: &str = "separator";
const FLAG: &str = "true/false";
const DEFAULT: &str = "default";

/// How a command input's value is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputStyle {
    /// Interpolate the value as is.
    #[default]
    Scalar,
    /// Join array elements with `separator`.
    Array { separator: String },
    /// Render a boolean as one of two literals.
    Flag {
        true_value: Option<String>,
        false_value: Option<String>,
    },
    /// Repeat the prefix before every array element.
    SeparateArrays,
}

impl InputStyle {
    fn option_name(&self) -> Option<&'static str> {
        match self {
            InputStyle::Scalar => None,
            InputStyle::Array { .. } => Some(SEPARATOR),
            InputStyle::Flag { .. } => Some(FLAG),
            InputStyle::SeparateArrays => Some(SEPARATE_ARRAYS),
        }
    }
}

/// A literal token on the command line, e.g. `--threads 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgument {
    pub prefix: Option<String>,
    pub value: Option<String>,
    pub position: Option<u32>,
    pub separate_value_from_prefix: bool,
}

impl CommandArgument {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            prefix: None,
            value: Some(value.into()),
            position: None,
            separate_value_from_prefix: true,
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_separate_value_from_prefix(mut self, separate: bool) -> Self {
        self.separate_value_from_prefix = separate;
        self
    }

    fn token(&self) -> String {
        let prefix = self.prefix.as_deref().unwrap_or_default();
        let value = self.value.as_deref().unwrap_or_default();
        let space = if self.separate_value_from_prefix && !prefix.is_empty() {
            " "
        } else {
            ""
        };
        format!("{prefix}{space}{value}").trim().to_string()
    }
}

impl Render for CommandArgument {
    fn render(&self, indent: usize) -> Result<String> {
        Ok(format!("{}{}", indentation(indent), self.token()))
    }
}

/// A command-line token bound to a task input.
#[derive(Debug, Clone)]
pub struct CommandInput {
    pub name: String,
    pub optional: bool,
    pub prefix: Option<String>,
    pub position: Option<u32>,
    pub separate_value_from_prefix: bool,
    pub default: Value,
    pub style: InputStyle,
    conflicts: Vec<Diagnostic>,
}

impl CommandInput {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            prefix: None,
            position: None,
            separate_value_from_prefix: true,
            default: Value::None,
            style: InputStyle::Scalar,
            conflicts: Vec::new(),
        }
    }

    /// Bind to a declared task input, taking its name and optionality.
    #[must_use]
    pub fn from_input(input: &Input) -> Self {
        Self::new(input.name.clone()).with_optional(input.is_optional())
    }

    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_separate_value_from_prefix(mut self, separate: bool) -> Self {
        self.separate_value_from_prefix = separate;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Join array elements with `separator`.
    #[must_use]
    pub fn with_separator(self, separator: impl Into<String>) -> Self {
        self.set_style(
            InputStyle::Array {
                separator: separator.into(),
            },
            SEPARATOR,
        )
    }

    /// Literal emitted when the input is true.
    #[must_use]
    pub fn with_true_value(self, literal: impl Into<String>) -> Self {
        let false_value = self.false_value();
        self.set_style(
            InputStyle::Flag {
                true_value: Some(literal.into()),
                false_value,
            },
            FLAG,
        )
    }

    /// Literal emitted when the input is false.
    #[must_use]
    pub fn with_false_value(self, literal: impl Into<String>) -> Self {
        let true_value = self.true_value();
        self.set_style(
            InputStyle::Flag {
                true_value,
                false_value: Some(literal.into()),
            },
            FLAG,
        )
    }

    /// Repeat the prefix before every element of an array input.
    ///
    /// Takes precedence over separators, flags and defaults.
    #[must_use]
    pub fn with_separate_arrays(mut self) -> Self {
        if let Some(previous) = self.style.option_name()
            && previous != SEPARATE_ARRAYS
        {
            self.record(previous, SEPARATE_ARRAYS);
        }
        self.style = InputStyle::SeparateArrays;
        self
    }

    fn true_value(&self) -> Option<String> {
        match &self.style {
            InputStyle::Flag { true_value, .. } => true_value.clone(),
            InputStyle::Scalar | InputStyle::Array { .. } | InputStyle::SeparateArrays => None,
        }
    }

    fn false_value(&self) -> Option<String> {
        match &self.style {
            InputStyle::Flag { false_value, .. } => false_value.clone(),
            InputStyle::Scalar | InputStyle::Array { .. } | InputStyle::SeparateArrays => None,
        }
    }

    /// Replace the style unless separate-array mode already holds it.
    fn set_style(mut self, style: InputStyle, option: &'static str) -> Self {
        match self.style.option_name() {
            Some(SEPARATE_ARRAYS) => {
                self.record(option, SEPARATE_ARRAYS);
                return self;
            }
            Some(previous) if previous != option => self.record(previous, option),
            Some(_) | None => {}
        }
        self.style = style;
        self
    }

    fn record(&mut self, ignored: &'static str, winner: &'static str) {
        self.conflicts
            .push(Diagnostic::ignored(self.name.clone(), ignored, winner));
    }

    /// Options that were dropped because a higher-precedence option won.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = self.conflicts.clone();
        if self.style == InputStyle::SeparateArrays && !self.default.is_none() {
            out.push(Diagnostic::ignored(self.name.clone(), DEFAULT, SEPARATE_ARRAYS));
        }
        out
    }

    /// Prefix text, with its trailing space when one is wanted.
    fn spaced_prefix(&self) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() && self.separate_value_from_prefix => {
                format!("{prefix} ")
            }
            Some(prefix) => prefix.to_string(),
            None => String::new(),
        }
    }

    /// The interpolation text spliced into the command template.
    pub fn token(&self) -> Result<String> {
        let name = &self.name;
        let prefix = self.spaced_prefix();

        match &self.style {
            InputStyle::SeparateArrays => {
                if self.optional {
                    let array = format!("select_first([{name}, []])");
                    return Ok(format!(
                        "~{{if length({array}) > 0 then {} else \"\"}}~{{sep({}, {array})}}",
                        quote(&prefix),
                        quote(&format!(" {prefix}"))
                    ));
                }
                return Ok(format!(
                    "~{{sep(\" \", prefix({}, {name}))}}",
                    quote(&prefix)
                ));
            }
            InputStyle::Array { separator } if self.optional => {
                return Ok(format!(
                    "~{{if defined({name}) then {} else \"\"}}~{{sep({}, {name})}}",
                    quote(&prefix),
                    quote(separator)
                ));
            }
            InputStyle::Scalar | InputStyle::Array { .. } | InputStyle::Flag { .. } => {}
        }

        let mut value = name.clone();
        let default = self.default.to_literal()?;
        if let Some(default) = &default {
            value = format!("if defined({name}) then {name} else {default}");
        }

        let mut is_flag = false;
        match &self.style {
            InputStyle::Array { separator } => {
                value = format!("sep({}, {value})", quote(separator));
            }
            InputStyle::Flag {
                true_value,
                false_value,
            } => {
                is_flag = true;
                value = format!(
                    "if ({value}) then {} else {}",
                    quote(true_value.as_deref().unwrap_or_default()),
                    quote(false_value.as_deref().unwrap_or_default())
                );
            }
            InputStyle::Scalar | InputStyle::SeparateArrays => {}
        }

        if self.optional && default.is_none() && !is_flag && !prefix.is_empty() {
            return Ok(format!(
                "~{{if defined({name}) then ({} + {value}) else \"\"}}",
                quote(&prefix)
            ));
        }
        Ok(format!("{prefix}~{{{value}}}"))
    }
}

impl Render for CommandInput {
    fn render(&self, indent: usize) -> Result<String> {
        for diagnostic in self.diagnostics() {
            warn!("{diagnostic}");
        }
        Ok(format!("{}{}", indentation(indent), self.token()?))
    }
}

/// A base command plus the positioned tokens that follow it.
#[derive(Debug, Clone, Default)]
pub struct Command {
    /// Base command tokens, joined by single spaces.
    pub command: Vec<String>,
    pub inputs: Vec<CommandInput>,
    pub arguments: Vec<CommandArgument>,
}

impl Command {
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: vec![command.into()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: tokens.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: CommandInput) -> Self {
        self.inputs.push(input);
        self
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = CommandInput>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    #[must_use]
    pub fn with_argument(mut self, argument: CommandArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = CommandArgument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.inputs
            .iter()
            .flat_map(CommandInput::diagnostics)
            .collect()
    }

    /// Inputs then arguments, stably sorted by position. A missing position
    /// sorts as zero.
    fn ordered(&self) -> Vec<&dyn Render> {
        let mut parts: Vec<(u32, &dyn Render)> = self
            .inputs
            .iter()
            .map(|i| (i.position.unwrap_or(0), i as &dyn Render))
            .chain(
                self.arguments
                    .iter()
                    .map(|a| (a.position.unwrap_or(0), a as &dyn Render)),
            )
            .collect();
        parts.sort_by_key(|(position, _)| *position);
        parts.into_iter().map(|(_, part)| part).collect()
    }
}

impl Render for Command {
    fn render(&self, indent: usize) -> Result<String> {
        let mut out = format!("{}{}", indentation(indent), self.command.join(" "));
        for part in self.ordered() {
            out.push_str(" \\\n");
            out.push_str(&part.render(indent + 1)?);
        }
        Ok(out)
    }
}
