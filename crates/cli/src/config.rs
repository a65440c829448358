// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in `.shoplist/config.toml` and includes:
//! - `user`: the account this client signs in as
//! - `app_id`: the application id presented to the backend
//! - `remote`: optional backend location; absent means local-only mode
//! - `notification_ttl_secs`: how long transient messages stay visible

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const DATA_DIR_NAME: &str = ".shoplist";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOCAL_DB_FILE_NAME: &str = "local.db";
const MOCK_SCHEME: &str = "mock:";

/// Client configuration stored in `.shoplist/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Account id the client signs in as.
    pub user: String,
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Backend configuration (optional - if absent, runs in local-only mode).
    pub remote: Option<RemoteConfig>,
    #[serde(default = "default_notification_ttl_secs")]
    pub notification_ttl_secs: u64,
}

/// Backend location.
///
/// Only the in-process mock is supported: `mock:<path>` names the JSON
/// snapshot shared by every client pointed at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
}

fn default_app_id() -> String {
    "shoplist".to_string()
}

fn default_notification_ttl_secs() -> u64 {
    5
}

impl RemoteConfig {
    /// Validates that the URL is in a recognized format.
    ///
    /// Returns an error message if the URL is invalid.
    pub fn validate_url(&self) -> Option<String> {
        match self.url.strip_prefix(MOCK_SCHEME) {
            Some(path) if path.trim().is_empty() => {
                Some("mock: URL requires a snapshot path".to_string())
            }
            Some(_) => None,
            None => Some(format!(
                "invalid remote URL '{}': must be mock:<path>",
                self.url
            )),
        }
    }

    /// Resolves the snapshot file of a `mock:` remote.
    ///
    /// Relative paths are taken from the project root (the parent of the
    /// data directory).
    pub fn mock_path(&self, data_dir: &Path) -> Option<PathBuf> {
        let path = Path::new(self.url.strip_prefix(MOCK_SCHEME)?);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(data_dir.parent().unwrap_or(data_dir).join(path))
        }
    }
}

impl Config {
    /// Creates a local-only config for `user`.
    pub fn new(user: &str) -> Result<Self> {
        if user.trim().is_empty() {
            return Err(Error::FieldEmpty { field: "user" });
        }
        Ok(Config {
            user: user.to_string(),
            app_id: default_app_id(),
            remote: None,
            notification_ttl_secs: default_notification_ttl_secs(),
        })
    }

    /// Loads configuration from the given `.shoplist/` directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Returns true if a backend is configured.
    pub fn is_remote_mode(&self) -> bool {
        self.remote.is_some()
    }

    /// Returns the remote URL if configured.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.url.as_str())
    }

    /// Saves configuration to the given `.shoplist/` directory.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the .shoplist directory by walking up from the current directory
pub fn find_data_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let data_dir = current.join(DATA_DIR_NAME);
        if data_dir.is_dir() {
            return Ok(data_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Path of the local list store inside the data directory.
pub fn local_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOCAL_DB_FILE_NAME)
}

/// Initialize a new .shoplist directory at the given path
pub fn init_data_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let data_dir = path.join(DATA_DIR_NAME);

    if data_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(data_dir.display().to_string()));
    }

    fs::create_dir_all(&data_dir)?;
    config.save(&data_dir)?;

    Ok(data_dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
