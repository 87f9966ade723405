use crate::domain::Version;
use crate::error::{ReleaseVersionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "release-version.toml";

/// Represents the complete configuration for release-version.
///
/// Contains branch naming rules, resolver settings and the CI output key.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub branches: BranchConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_trunk() -> String {
    "main".to_string()
}

fn default_hotfix_prefix() -> String {
    "hotfix/".to_string()
}

/// Branch naming rules.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchConfig {
    #[serde(default = "default_trunk")]
    pub trunk: String,

    #[serde(default = "default_hotfix_prefix")]
    pub hotfix_prefix: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        BranchConfig {
            trunk: default_trunk(),
            hotfix_prefix: default_hotfix_prefix(),
        }
    }
}

/// How a hotfix branch finds the version it patches.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BaseStrategy {
    /// Parse the base version out of `hotfix/vX.Y.Z`
    #[default]
    Name,
    /// Nearest tag reachable from the merge-base with trunk
    History,
}

impl BaseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseStrategy::Name => "name",
            BaseStrategy::History => "history",
        }
    }
}

/// Which git implementation answers tag queries.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// In-process libgit2
    #[default]
    Libgit2,
    /// The `git` executable on PATH
    Cli,
}

fn default_initial_version() -> Version {
    Version::new(1, 0, 0)
}

/// Configuration for version resolution.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResolverConfig {
    #[serde(default)]
    pub base_strategy: BaseStrategy,

    /// Current version reported on trunk when no tags exist yet
    #[serde(default = "default_initial_version")]
    pub initial_version: Version,

    #[serde(default)]
    pub backend: GitBackend,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            base_strategy: BaseStrategy::default(),
            initial_version: default_initial_version(),
            backend: GitBackend::default(),
        }
    }
}

fn default_output_key() -> String {
    "new_version".to_string()
}

/// Configuration for the CI output channel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_key")]
    pub key: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            key: default_output_key(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-version.toml` in current directory
/// 3. `release-version.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ReleaseVersionError::config(e.to_string()))?;

    if config.branches.trunk.trim().is_empty() {
        return Err(ReleaseVersionError::config("branches.trunk must not be empty"));
    }
    if config.branches.hotfix_prefix.is_empty() {
        return Err(ReleaseVersionError::config(
            "branches.hotfix_prefix must not be empty",
        ));
    }
    if config.output.key.trim().is_empty() {
        return Err(ReleaseVersionError::config("output.key must not be empty"));
    }

    Ok(config)
}
