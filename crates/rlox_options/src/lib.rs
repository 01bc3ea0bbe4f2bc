//! rlox_options: `rlox.json` parsing and driver options.
//!
//! Every setting is optional in the file; command-line flags override
//! whatever the file provides, and the resolved getters fall back to the
//! built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// The default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rlox.json";

pub const DEFAULT_PROMPT: &str = "> ";

/// How tokens are printed. Names are matched case-insensitively, both on the
/// command line and in `rlox.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
    /// One `KIND lexeme literal` line per token.
    #[default]
    Text,
    /// A JSON array of token objects.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Driver options, matching the `options` object of `rlox.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverOptions {
    pub format: Option<OutputFormat>,
    /// Colored diagnostics when stderr is a terminal.
    pub pretty: Option<bool>,
    /// Prompt printed before each line in interactive mode.
    pub prompt: Option<String>,
    /// Print a trailing `EOF` line after the tokens.
    pub show_eof: Option<bool>,
}

impl DriverOptions {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    pub fn show_eof(&self) -> bool {
        self.show_eof.unwrap_or(false)
    }

    /// Fill every unset option from `base`.
    pub fn or(self, base: DriverOptions) -> DriverOptions {
        DriverOptions {
            format: self.format.or(base.format),
            pretty: self.pretty.or(base.pretty),
            prompt: self.prompt.or(base.prompt),
            show_eof: self.show_eof.or(base.show_eof),
        }
    }
}

/// The `rlox.json` file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoxConfig {
    pub options: Option<DriverOptions>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown output format '{0}' (expected 'text' or 'json')")]
    UnknownFormat(String),
}

/// Parse an `rlox.json` file from a string.
pub fn parse_config(content: &str) -> Result<LoxConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse an `rlox.json` file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<LoxConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}
