//! Project configuration module.
//!
//! Handles loading and validating `config.toml` from the project root (the
//! directory holding `inputs/` and `outputs/`). Stock defaults are overridden
//! by whatever the file specifies; a missing file means all defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [folders]
//! inputs = "inputs"          # Holds images_<kind>/ and logo_<kind>/
//! outputs = "outputs"        # Results are written here, same filenames
//!
//! [logo]
//! # max_dimension = 200      # Scale logos whose longer edge exceeds this
//!
//! [logging]
//! level = "info"             # trace | debug | info | warn | error
//! # file = "logs/overlay.log"
//! ```
//!
//! Unknown keys are rejected to catch typos early. `RUST_LOG`, when set,
//! takes precedence over `logging.level`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Input and output folder locations.
    pub folders: FoldersConfig,
    /// Logo preprocessing.
    pub logo: LogoConfig,
    /// Log level and destination.
    pub logging: LoggingConfig,
}

impl ProjectConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.folders.inputs.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "folders.inputs must not be empty".into(),
            ));
        }
        if self.folders.outputs.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "folders.outputs must not be empty".into(),
            ));
        }
        if self.logo.max_dimension == Some(0) {
            return Err(ConfigError::Validation(
                "logo.max_dimension must be greater than 0".into(),
            ));
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// Folder locations, relative to the project root unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FoldersConfig {
    pub inputs: PathBuf,
    pub outputs: PathBuf,
}

impl Default for FoldersConfig {
    fn default() -> Self {
        Self {
            inputs: PathBuf::from("inputs"),
            outputs: PathBuf::from("outputs"),
        }
    }
}

/// Logo preprocessing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    /// Longest allowed logo edge in pixels. Larger logos are scaled down
    /// proportionally before placement; smaller ones are left alone.
    pub max_dimension: Option<u32>,
}

/// Logging settings used by the binary when it installs the subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    /// Write log lines to this file instead of stdout.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Returns defaults when the file does not exist, rejects unknown keys, and
/// validates the result.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(ProjectConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Logo Overlay Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as config.toml in the project root (see --root).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Folders
# ---------------------------------------------------------------------------
[folders]
# Holds images_jpeg/, logo_jpeg/, images_png/ and logo_png/.
inputs = "inputs"
# Processed images are written here under their original filenames.
# The --output flag overrides this.
outputs = "outputs"

# ---------------------------------------------------------------------------
# Logo
# ---------------------------------------------------------------------------
[logo]
# Scale the logo down (keeping its aspect ratio) when its longer edge
# exceeds this many pixels. Leave unset to use the logo as-is.
# max_dimension = 200

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[logging]
# One of: trace, debug, info, warn, error. RUST_LOG overrides this.
level = "info"
# Write logs to a file instead of the terminal.
# file = "logs/overlay.log"
"##
}
