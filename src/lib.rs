//! # wdlgen - WDL source generation
//!
//! wdlgen builds an in-memory model of a [WDL](https://openwdl.org/) document
//! and renders it to source text. It is write-only: documents are never
//! parsed back, and the caller is trusted to supply sensible names and
//! expressions.
//!
//! ## Features
//!
//! - **Typed declarations**: [`WdlType`] renders and parses `Array[File]+?`,
//!   `Map[String, Int]`, struct references and the rest of the type grammar
//! - **Command templates**: [`CommandInput`] picks the interpolation form for
//!   optional, array, flag and defaulted inputs
//! - **Deterministic metadata**: `meta`, `parameter_meta` and `runtime`
//!   blocks are always emitted in key order
//! - **Aligned calls**: call bindings are laid out as a table with an
//!   optional comment column
//!
//! ## Core Modules
//!
//! - [`types`] - Type model and type-name parser
//! - [`command`] - Command-line assembly
//! - [`task`] - Task documents
//! - [`workflow`] / [`workflow_call`] - Workflow documents, calls, scatters and conditionals
//! - [`meta`] - Metadata and runtime sections
//! - [`config`](crate::config) - Layered generation defaults
//!
//! ## Example Usage
//!
//! ```rust
//! use wdlgen::{Command, CommandInput, Input, Output, Task, WdlType};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pattern = Input::new(WdlType::string(), "pattern");
//! let file = Input::new(WdlType::parse("File")?, "in");
//!
//! let command = Command::new("egrep")
//!     .with_input(CommandInput::from_input(&pattern))
//!     .with_input(CommandInput::from_input(&file));
//!
//! let task = Task::new("grep")
//!     .with_input(pattern)
//!     .with_input(file)
//!     .with_command(command)
//!     .with_output(Output::new(WdlType::file(), "out", "stdout()"));
//!
//! println!("{}", task.to_document()?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Diagnostics
//!
//! Conflicting command-input options never fail rendering. The losing option
//! is reported through `tracing::warn!` and through
//! [`Task::diagnostics`], so callers can capture or silence the notices.
//!
//! ## Configuration
//!
//! Defaults can be set via:
//! - Configuration file (`wdlgen.yaml`)
//! - Environment variables (prefix: `WDLGEN__`)
//!
//! See [`WdlgenConfig`] for available options.

pub mod command;
pub mod common;
pub mod config;
pub mod diagnostics;
pub mod literal;
pub mod meta;
pub mod render;
pub mod structs;
pub mod task;
pub mod types;
pub mod workflow;
pub mod workflow_call;

// Re-export commonly used types for convenience
pub use command::{Command, CommandArgument, CommandInput, InputStyle};
pub use common::{IfThenElse, Input, Output};
pub use crate::config::WdlgenConfig;
pub use diagnostics::Diagnostic;
pub use literal::{Attributes, Value};
pub use meta::{Meta, ParamMetaAttribute, ParameterMeta, Runtime};
pub use render::Render;
pub use structs::{Struct, StructField};
pub use task::Task;
pub use types::{TypeKind, WdlType};
pub use workflow::{PostImport, Workflow, WorkflowImport, WorkflowOutput};
pub use workflow_call::{CallBinding, CallBlock, WorkflowCall, WorkflowConditional, WorkflowScatter};
