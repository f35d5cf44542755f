// Configuration module for clipwire
// This module handles loading and parsing configuration from ~/.config/clipwire/config.toml

mod types;

pub use types::{
    ClipboardBackend, ClipboardConfig, Config, DEFAULT_MAX_FRAME_BYTES, DEFAULT_READ_TIMEOUT_SECS,
    ListenerConfig, SenderConfig,
};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/clipwire/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path, with the same fallbacks as
/// [`load_config`]
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config {:?}: {}", config_path, e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => ConfigResult {
            config: Config::default(),
            warning: Some(format!("Invalid config {:?}: {}", config_path, e)),
        },
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/clipwire/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("clipwire")
        .join("config.toml")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
