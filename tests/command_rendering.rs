#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use cucumber::{World, given, then, when};
use wdlgen::{Command, CommandArgument, CommandInput, Render};

#[derive(Debug, Default, World)]
pub struct CommandWorld {
    pub base: Option<String>,
    pub inputs: Vec<CommandInput>,
    pub arguments: Vec<CommandArgument>,
    pub command: Option<Command>,
    pub rendered: Option<String>,
}

impl CommandWorld {
    /// Rebuild the named input through one of its consuming builders.
    fn update(&mut self, name: &str, f: impl FnOnce(CommandInput) -> CommandInput) {
        let idx = self
            .inputs
            .iter()
            .position(|i| i.name == name)
            .unwrap_or_else(|| panic!("No input named '{name}'"));
        let input = self.inputs.remove(idx);
        self.inputs.insert(idx, f(input));
    }

    fn input(&self, name: &str) -> &CommandInput {
        self.command
            .as_ref()
            .expect("Command was not rendered")
            .inputs
            .iter()
            .find(|i| i.name == name)
            .unwrap_or_else(|| panic!("No input named '{name}'"))
    }
}

/// Strip the indentation shared by every line of a docstring.
fn dedent(docstring: &str) -> String {
    let lines: Vec<&str> = docstring.trim_matches('\n').lines().collect();
    let margin = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| l.get(margin..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

#[given(expr = "a command {string}")]
async fn given_command(world: &mut CommandWorld, base: String) {
    world.base = Some(base);
}

#[given(expr = "a required input {string}")]
async fn given_required_input(world: &mut CommandWorld, name: String) {
    world.inputs.push(CommandInput::new(name));
}

#[given(expr = "an optional input {string}")]
async fn given_optional_input(world: &mut CommandWorld, name: String) {
    world.inputs.push(CommandInput::new(name).with_optional(true));
}

#[given(expr = "an argument {string}")]
async fn given_argument(world: &mut CommandWorld, value: String) {
    world.arguments.push(CommandArgument::new(value));
}

#[given(expr = "the input {string} has position {int}")]
async fn given_position(world: &mut CommandWorld, name: String, position: u32) {
    world.update(&name, |i| i.with_position(position));
}

#[given(expr = "the input {string} has prefix {string}")]
async fn given_prefix(world: &mut CommandWorld, name: String, prefix: String) {
    world.update(&name, |i| i.with_prefix(prefix));
}

#[given(expr = "the input {string} has separator {string}")]
async fn given_separator(world: &mut CommandWorld, name: String, separator: String) {
    world.update(&name, |i| i.with_separator(separator));
}

#[given(expr = "the input {string} has default {int}")]
async fn given_int_default(world: &mut CommandWorld, name: String, default: i64) {
    world.update(&name, |i| i.with_default(default));
}

#[given(expr = "the input {string} has default {string}")]
async fn given_string_default(world: &mut CommandWorld, name: String, default: String) {
    world.update(&name, |i| i.with_default(default));
}

#[given(expr = "the input {string} renders true as {string}")]
async fn given_true_value(world: &mut CommandWorld, name: String, literal: String) {
    world.update(&name, |i| i.with_true_value(literal));
}

#[given(expr = "the input {string} separates arrays")]
async fn given_separate_arrays(world: &mut CommandWorld, name: String) {
    world.update(&name, CommandInput::with_separate_arrays);
}

#[when(expr = "the command is rendered")]
async fn when_rendered(world: &mut CommandWorld) {
    let base = world.base.clone().expect("No base command given");
    let command = Command::new(base)
        .with_inputs(world.inputs.clone())
        .with_arguments(world.arguments.clone());
    world.rendered = Some(command.render(0).expect("Command failed to render"));
    world.command = Some(command);
}

#[then(expr = "the command lines should be:")]
async fn then_command_lines(world: &mut CommandWorld, step: &cucumber::gherkin::Step) {
    let expected = dedent(step.docstring.as_ref().expect("Step needs a docstring"))
        .lines()
        .collect::<Vec<_>>()
        .join(" \\\n");
    assert_eq!(world.rendered.as_deref(), Some(expected.as_str()));
}

#[then(expr = "the token for {string} should be:")]
async fn then_token(world: &mut CommandWorld, name: String, step: &cucumber::gherkin::Step) {
    let expected = dedent(step.docstring.as_ref().expect("Step needs a docstring"));
    assert_eq!(world.input(&name).token().unwrap(), expected);
}

#[then(expr = "there should be {int} diagnostic(s)")]
async fn then_diagnostics(world: &mut CommandWorld, count: usize) {
    let command = world.command.as_ref().expect("Command was not rendered");
    assert_eq!(
        command.diagnostics().len(),
        count,
        "Unexpected diagnostics: {:?}",
        command.diagnostics()
    );
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .init();

    CommandWorld::cucumber()
        .run_and_exit("tests/features/")
        .await;
}
