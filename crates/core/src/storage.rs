// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local key/value storage for the offline copy of the lists.
//!
//! Values are JSON strings keyed by a fixed item name, like browser
//! localStorage. The whole lists array lives under [`LISTS_KEY`].

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::list::List;

/// Key holding the offline copy of every list.
pub const LISTS_KEY: &str = "lists";

/// SQL schema for local storage.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// SQLite-backed key/value store.
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    /// Open (or create) local storage at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(LocalStorage { conn })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(LocalStorage { conn })
    }

    /// Raw value stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Stores a raw value under `key`, overwriting any previous one.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Removes `key`. Returns true if it existed.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    /// Decodes the JSON value under `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                Error::CorruptedData(format!("invalid value under '{key}': {e}"))
            }),
            None => Ok(None),
        }
    }

    /// Encodes `value` as JSON under `key`.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    /// The offline copy of the lists. Empty if never saved.
    pub fn load_lists(&self) -> Result<Vec<List>> {
        Ok(self.get_json(LISTS_KEY)?.unwrap_or_default())
    }

    /// Overwrites the offline copy of the lists.
    pub fn save_lists(&self, lists: &[List]) -> Result<()> {
        self.set_json(LISTS_KEY, lists)
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
