use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, ShortcutError};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "gitshortcuts.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".gitshortcuts.toml";

/// Represents the complete configuration for git-shortcuts.
///
/// Holds the git invocation settings (program, remote, primary branch) and the
/// commit defaults. Every operation receives this explicitly.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub commit: CommitConfig,
}

fn default_program() -> String {
    "git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_message() -> String {
    "No message".to_string()
}

/// Where git lives and which remote/branch the network operations target.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            program: default_program(),
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

/// Commit defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitConfig {
    /// Message used when the operator supplies none.
    #[serde(default = "default_message")]
    pub default_message: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            default_message: default_message(),
        }
    }
}

impl Config {
    /// Replaces the remote and/or branch with command-line values.
    pub fn with_overrides(mut self, remote: Option<String>, branch: Option<String>) -> Self {
        if let Some(remote) = remote {
            self.git.remote = remote;
        }
        if let Some(branch) = branch {
            self.git.branch = branch;
        }
        self
    }

    /// Rejects settings that would produce malformed git invocations.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("git.program", &self.git.program),
            ("git.remote", &self.git.remote),
            ("git.branch", &self.git.branch),
            ("commit.default_message", &self.commit.default_message),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ShortcutError::config(format!("'{}' must not be empty", key)));
            }
        }

        Ok(())
    }
}

/// Parses configuration from TOML text and validates it.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitshortcuts.toml` in current directory
/// 3. `.gitshortcuts.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            ShortcutError::config(format!("Cannot read config file '{}': {}", path, e))
        })?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
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
