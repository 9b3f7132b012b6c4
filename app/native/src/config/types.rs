//! Configuration types for wintile.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ipc::DEFAULT_PORT;
use crate::platform::path::expand;

/// Default client timeout in milliseconds.
pub const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 1000;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WintileConfig {
    /// Port the server binds by default, and the port clients use with
    /// `--use-hardcoded-port`.
    pub port: u16,

    /// File the server writes its bound port to. Clients without an explicit
    /// port read it from here. A leading `~` is expanded.
    pub port_file: String,

    /// Timeout in milliseconds for each client connect, read and write.
    pub client_timeout_ms: u64,
}

impl Default for WintileConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            port_file: default_port_file(),
            client_timeout_ms: DEFAULT_CLIENT_TIMEOUT_MS,
        }
    }
}

impl WintileConfig {
    /// The port file with `~` expanded.
    #[must_use]
    pub fn port_file_path(&self) -> PathBuf { expand(&self.port_file) }

    #[must_use]
    pub const fn client_timeout(&self) -> Duration {
        Duration::from_millis(self.client_timeout_ms)
    }
}

fn default_port_file() -> String {
    std::env::temp_dir().join("wintile_port").to_string_lossy().into_owned()
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "no configuration file found, expected at $XDG_CONFIG_HOME/wintile/config.jsonc \
         or ~/.config/wintile/config.jsonc"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/wintile/config.jsonc` or `config.json`, when set
/// 2. `~/.config/wintile/config.jsonc` or `config.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let dir = PathBuf::from(xdg_config).join("wintile");
        for filename in CONFIG_FILE_NAMES {
            paths.push(dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let dir = home.join(".config").join("wintile");
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME may already be ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Loads the configuration from the first config file that exists.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, and the other variants if the first one found
/// cannot be read or parsed.
pub fn load_config() -> Result<(WintileConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::Io` if it cannot be read and `ConfigError::Parse` if it is
/// not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<(WintileConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: WintileConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}
