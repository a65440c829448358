// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use sl_core::{LocalStorage, MemoryService};

use crate::config::{init_data_dir, local_db_path, Config, RemoteConfig};
use crate::error::{Error, Result};

pub fn run(user: String, remote: Option<String>, local: bool, path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };
    let remote = if local { None } else { remote };

    let data_dir = init_at(&target_path, &user, remote)?;
    let config = Config::load(&data_dir)?;

    println!("Initialized shoplist at {}", data_dir.display());
    println!("User: {}", config.user);
    match config.remote_url() {
        Some(url) => println!("Remote: {}", url),
        None => println!("Mode: local-only"),
    }
    Ok(())
}

/// Creates `.shoplist/` under `target_path` with its config and local store.
pub(crate) fn init_at(target_path: &Path, user: &str, remote: Option<String>) -> Result<PathBuf> {
    let mut config = Config::new(user)?;
    if let Some(url) = remote {
        let remote = RemoteConfig { url };
        if let Some(message) = remote.validate_url() {
            return Err(Error::Config(message));
        }
        config.remote = Some(remote);
    }

    let data_dir = init_data_dir(target_path, &config)?;
    LocalStorage::open(&local_db_path(&data_dir))?;

    // Seed an empty snapshot so clients sharing the remote agree on the file.
    if let Some(snapshot) = config.remote.as_ref().and_then(|r| r.mock_path(&data_dir)) {
        if !snapshot.exists() {
            MemoryService::new().save(&snapshot)?;
        }
    }
    Ok(data_dir)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
