// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Signed-in account and its settings.
//!
//! Settings live in the account's own `settings` table as `{id, value}`
//! rows. Writes go to the table only while online; offline they change
//! the in-memory value alone.

use serde::Deserialize;
use serde_json::{json, Value};
use sl_core::TableRef;
use tracing::{debug, warn};

use super::StoreContext;
use crate::error::Result;

pub const SETTINGS_TABLE: &str = "settings";
pub const SETTING_USERNAME: &str = "username";
pub const SETTING_PRIMARY_LIST_ID: &str = "primaryListId";
pub const SETTING_AUTO_HANDLE_INVITATIONS: &str = "autoHandleInvitations";

#[derive(Debug, Deserialize)]
struct SettingRow {
    id: String,
    #[serde(default)]
    value: Value,
}

pub struct UserStore {
    ctx: StoreContext,
    user_id: String,
    username: String,
    primary_list_id: Option<String>,
    auto_handle_invitations: bool,
}

impl UserStore {
    pub fn new(ctx: StoreContext) -> Self {
        UserStore {
            ctx,
            user_id: String::new(),
            username: String::new(),
            primary_list_id: None,
            auto_handle_invitations: true,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn primary_list_id(&self) -> Option<&str> {
        self.primary_list_id.as_deref()
    }

    pub fn auto_handle_invitations(&self) -> bool {
        self.auto_handle_invitations
    }

    /// Reads the account id from the backend session.
    ///
    /// Offline, or when the backend cannot answer, `configured` is used.
    pub async fn set_user_id(&mut self, configured: &str) -> Result<()> {
        if !self.ctx.is_online() {
            self.user_id = configured.to_string();
            return Ok(());
        }
        let info = self.ctx.backend.user_info().await?;
        if info.id != configured {
            debug!("Backend session user {} differs from configured {}", info.id, configured);
        }
        self.user_id = info.id;
        if self.username.is_empty() {
            self.username = info.name;
        }
        Ok(())
    }

    /// Loads the settings rows. Missing rows keep their defaults.
    pub async fn fetch_settings(&mut self) -> Result<()> {
        if !self.ctx.is_online() {
            return Ok(());
        }
        let rows = self
            .ctx
            .backend
            .get_all(&TableRef::own(SETTINGS_TABLE))
            .await?;

        for raw in rows {
            let row: SettingRow = match serde_json::from_value(raw) {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping malformed setting: {}", e);
                    continue;
                }
            };
            match row.id.as_str() {
                SETTING_USERNAME => {
                    if let Some(name) = row.value.as_str() {
                        self.username = name.to_string();
                    }
                }
                SETTING_PRIMARY_LIST_ID => {
                    self.primary_list_id = row
                        .value
                        .as_str()
                        .filter(|id| !id.is_empty())
                        .map(String::from);
                }
                SETTING_AUTO_HANDLE_INVITATIONS => {
                    if let Some(flag) = row.value.as_bool() {
                        self.auto_handle_invitations = flag;
                    }
                }
                other => debug!("Ignoring unknown setting {}", other),
            }
        }
        Ok(())
    }

    pub async fn update_username(&mut self, username: &str) {
        self.username = username.to_string();
        self.write_setting(SETTING_USERNAME, json!(username)).await;
    }

    /// Sets or clears the primary list. A cleared value is stored as "".
    pub async fn update_primary_list_id(&mut self, id: Option<&str>) {
        self.primary_list_id = id.map(String::from);
        self.write_setting(SETTING_PRIMARY_LIST_ID, json!(id.unwrap_or("")))
            .await;
    }

    pub async fn update_auto_handle_invitations(&mut self, value: bool) {
        self.auto_handle_invitations = value;
        self.write_setting(SETTING_AUTO_HANDLE_INVITATIONS, json!(value))
            .await;
    }

    async fn write_setting(&self, key: &str, value: Value) {
        if !self.ctx.is_online() {
            debug!("Offline: setting {} kept in memory only", key);
            return;
        }
        let row = json!({ "id": key, "value": value });
        if let Err(e) = self
            .ctx
            .backend
            .replace(&TableRef::own(SETTINGS_TABLE), row)
            .await
        {
            warn!("Failed to save setting {}: {}", key, e);
        }
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
