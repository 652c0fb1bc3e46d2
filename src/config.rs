use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::task::{DEFAULT_VERSION, Task};
use crate::workflow::Workflow;
use crate::workflow_call::WorkflowCall;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to load configuration: {source}"))]
    Load { source: config::ConfigError },

    #[snafu(display("Failed to parse YAML configuration: {source}"))]
    Yaml { source: serde_yaml::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Generation defaults shared by every document built from this config.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WdlgenConfig {
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub calls: CallConfig,
}

/// Settings for task and workflow documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Language version written in the document header
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
        }
    }
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Settings for call statements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallConfig {
    /// Emit the aligned comment column and call messages
    #[serde(default = "default_render_comments")]
    pub render_comments: bool,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            render_comments: default_render_comments(),
        }
    }
}

fn default_render_comments() -> bool {
    true
}

impl WdlgenConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (`WDLGEN__DOCUMENT__VERSION`, ...)
    /// 2. Config file (`wdlgen.yaml` in the current directory)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        Self::load_from("wdlgen")
    }

    /// Same as [`WdlgenConfig::load`] with an explicit config file path.
    /// The extension may be omitted.
    pub fn load_from(file: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&WdlgenConfig::default()).context(LoadSnafu)?)
            .add_source(
                config::File::with_name(file)
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("WDLGEN")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context(LoadSnafu)?;
        config.try_deserialize().context(LoadSnafu)
    }

    /// Parse an inline YAML document. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context(YamlSnafu)
    }

    #[must_use]
    pub fn task(&self, name: impl Into<String>) -> Task {
        Task::new(name).with_version(self.document.version.clone())
    }

    #[must_use]
    pub fn workflow(&self, name: &str) -> Workflow {
        Workflow::new(name).with_version(self.document.version.clone())
    }

    #[must_use]
    pub fn call(&self, identifier: impl Into<String>) -> WorkflowCall {
        WorkflowCall::new(identifier).with_render_comments(self.calls.render_comments)
    }
}
