use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default fragment separator used when a Fact is created without one.
pub const DEFAULT_SEPARATOR: &str = "%%--%%";

/// Top-level configuration (loaded from ssm.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SsmConfig {
    pub logging: LoggingConfig,
    pub envelope: EnvelopeConfig,
}

impl SsmConfig {
    /// Read and parse `path`. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive (default: info). RUST_LOG takes precedence.
    pub level: String,
    /// Log format: "json" or "text"
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Text,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown log format: {other} (expected json or text)")),
        }
    }
}

/// Envelope defaults applied by the `Ssm` context and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Encryption tag used when none is given (default: AES)
    pub encryption: String,
    /// Separator used when a Fact is created without one
    pub separator: String,
    /// Envelope versions rejected by parse, on top of the built-in list
    pub incompatible_versions: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
        }
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            encryption: "AES".into(),
            separator: DEFAULT_SEPARATOR.into(),
            incompatible_versions: Vec::new(),
        }
    }
}
