//! Configuration for the `unveil` command.
//!
//! Read from `$UNVEIL_CONFIG` when set, otherwise `~/.unveil/config.toml`.
//! Every field is optional; a missing file means defaults.
//!
//! ```toml
//! [output]
//! format = "report"   # report | annotated | clean | json
//!
//! [report]
//! breakdown = true
//! preview_width = 60
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "UNVEIL_CONFIG";

const DEFAULT_PREVIEW_WIDTH: usize = 60;

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

const fn default_preview_width() -> usize {
    DEFAULT_PREVIEW_WIDTH
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnveilConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// What the command prints for each scanned input.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Summary statistics, findings and breakdown.
    #[default]
    Report,
    /// The input with stealth runs shown as inline markers.
    Annotated,
    /// Only the cleaned transcript.
    Clean,
    /// The full scan result as JSON.
    Json,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Annotated => "annotated",
            Self::Clean => "clean",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Include the per-category breakdown table. Default: true.
    #[serde(default = "default_true")]
    pub breakdown: bool,
    /// Maximum characters of a decoded payload shown per finding. Default: 60.
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            breakdown: true,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl UnveilConfig {
    /// Load from the default location.
    ///
    /// Returns `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path; `Ok(None)` if it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(Some(config))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `$UNVEIL_CONFIG`, else `~/.unveil/config.toml`.
    pub fn path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(explicit));
        }
        dirs::home_dir().map(|home| home.join(".unveil").join("config.toml"))
    }
}
