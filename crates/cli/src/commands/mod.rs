// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod init;
pub mod item;
pub mod list;
pub mod share;
pub mod status;
pub mod sync;
pub mod user;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Duration;
use sl_core::{ClockSource, LocalStorage, MemoryService, SystemClock};

use crate::config::{find_data_dir, local_db_path, Config};
use crate::connectivity::Connectivity;
use crate::error::{Error, Result};
use crate::session::{Session, SessionOptions};
use crate::stores::notifications::DEFAULT_TTL_SECS;
use crate::stores::{Level, StoreContext};

/// How the client reaches the backend for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    /// A remote is configured but was not contacted.
    Offline,
    /// No remote is configured.
    LocalOnly,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Online => "online",
            Mode::Offline => "offline",
            Mode::LocalOnly => "local-only",
        }
    }
}

/// The mock service behind a `mock:` remote and the file it lives in.
///
/// The snapshot stays locked from load until the run ends.
struct MockRemote {
    service: MemoryService,
    path: PathBuf,
    _lock: File,
}

/// An opened client: configuration plus a started session.
pub struct App {
    pub config: Config,
    pub session: Session,
    remote: Option<MockRemote>,
}

impl App {
    /// Finds the data directory, loads the backend and starts a session.
    pub async fn open(offline: bool) -> Result<Self> {
        let data_dir = find_data_dir()?;
        let config = Config::load(&data_dir)?;

        let remote = match &config.remote {
            Some(remote) => {
                if let Some(message) = remote.validate_url() {
                    return Err(Error::Config(message));
                }
                let path = remote.mock_path(&data_dir).ok_or_else(|| {
                    Error::Config(format!("unsupported remote '{}'", remote.url))
                })?;
                let lock = lock_snapshot(&path)?;
                Some(MockRemote {
                    service: MemoryService::load(&path)?,
                    path,
                    _lock: lock,
                })
            }
            None => None,
        };

        let online = remote.is_some() && !offline;
        let backend = match &remote {
            Some(remote) => remote.service.connect(&config.user),
            None => MemoryService::new().connect(&config.user),
        };
        backend.set_reachable(online);

        let clock: Arc<dyn ClockSource> = Arc::new(SystemClock);
        let ctx = StoreContext::new(Arc::new(backend), Connectivity::new(online), clock);
        let storage = LocalStorage::open(&local_db_path(&data_dir))?;
        let options = SessionOptions {
            user_id: config.user.clone(),
            notification_ttl: notification_ttl(&config),
        };
        let session = Session::start(ctx, storage, options).await?;

        Ok(App {
            config,
            session,
            remote,
        })
    }

    pub fn mode(&self) -> Mode {
        match (&self.remote, self.session.is_online()) {
            (None, _) => Mode::LocalOnly,
            (Some(_), true) => Mode::Online,
            (Some(_), false) => Mode::Offline,
        }
    }

    /// Applies pending events, saves the backend and prints notifications.
    pub async fn finish(mut self) -> Result<()> {
        self.session.poll().await?;
        if self.session.is_online() {
            if let Some(remote) = &self.remote {
                remote.service.save(&remote.path)?;
            }
        }
        let now = SystemClock.now();
        for notification in self.session.notifications.active(now) {
            match notification.level {
                Level::Info => eprintln!("note: {}", notification.message),
                Level::Error => eprintln!("warning: {}", notification.message),
            }
        }
        Ok(())
    }
}

/// Takes an exclusive lock on `<snapshot>.lock`, waiting for other runs.
/// The lock is released when the returned file is dropped.
fn lock_snapshot(snapshot: &Path) -> Result<File> {
    use fs2::FileExt;

    let mut lock_path = snapshot.as_os_str().to_owned();
    lock_path.push(".lock");
    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(PathBuf::from(lock_path))?;
    file.lock_exclusive()?;
    Ok(file)
}

fn notification_ttl(config: &Config) -> Duration {
    i64::try_from(config.notification_ttl_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or_else(|| Duration::seconds(DEFAULT_TTL_SECS))
}

/// Resolve a full or partial ID against candidates.
///
/// An exact match wins; otherwise the prefix must match exactly one ID.
/// Returns `Ok(None)` when nothing matches.
pub fn resolve_prefix<'a>(
    kind: &'static str,
    input: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<Option<String>> {
    let mut matches = Vec::new();
    for id in ids {
        if id == input {
            return Ok(Some(id.to_string()));
        }
        if id.starts_with(input) {
            matches.push(id.to_string());
        }
    }
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => Err(Error::AmbiguousId {
            kind,
            prefix: input.to_string(),
            matches,
        }),
    }
}

/// Resolve a list ID (or unique prefix) against the session's lists.
pub fn resolve_list_id(session: &Session, input: &str) -> Result<String> {
    let ids = session.lists.lists().iter().map(|l| l.id.as_str());
    resolve_prefix("list", input, ids)?.ok_or_else(|| Error::ListNotFound(input.to_string()))
}

/// Resolve an item ID (or unique prefix) within a list.
pub fn resolve_item_id(session: &Session, list_id: &str, input: &str) -> Result<String> {
    let list = session
        .lists
        .get_list(list_id)
        .ok_or_else(|| Error::ListNotFound(list_id.to_string()))?;
    let ids = list.items.iter().map(|i| i.id.as_str());
    resolve_prefix("item", input, ids)?.ok_or_else(|| Error::ItemNotFound {
        list_id: list_id.to_string(),
        item_id: input.to_string(),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
