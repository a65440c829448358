// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A signed-in client: the stores wired to one backend session.
//!
//! User-facing actions return their result and also leave a transient
//! notification when they fail.

use chrono::Duration;
use sl_core::{GrantedPermission, ItemPatch, LocalStorage, Permission, LISTS_TABLE};
use tracing::{info, warn};

use crate::connectivity::Transition;
use crate::error::{Error, Result};
use crate::stores::{AuthStore, Level, ListsStore, NotificationsStore, StoreContext, UserStore};
use crate::sync::SyncReport;

/// How to start a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Account id to use when the backend cannot be asked.
    pub user_id: String,
    pub notification_ttl: Duration,
}

impl SessionOptions {
    pub fn new(user_id: &str) -> Self {
        SessionOptions {
            user_id: user_id.to_string(),
            notification_ttl: Duration::seconds(crate::stores::notifications::DEFAULT_TTL_SECS),
        }
    }
}

pub struct Session {
    ctx: StoreContext,
    pub auth: AuthStore,
    pub user: UserStore,
    pub lists: ListsStore,
    pub notifications: NotificationsStore,
    last_sync: Option<SyncReport>,
}

impl Session {
    /// Signs in and brings local state up to date.
    ///
    /// Online: reads settings, reconciles the local copy, then starts the
    /// mirrors and the share watcher. If any of that fails the session
    /// continues offline. Offline: loads the local copy.
    pub async fn start(
        ctx: StoreContext,
        storage: LocalStorage,
        options: SessionOptions,
    ) -> Result<Self> {
        let mut session = Session {
            auth: AuthStore::default(),
            user: UserStore::new(ctx.clone()),
            lists: ListsStore::new(ctx.clone(), storage),
            notifications: NotificationsStore::new(options.notification_ttl),
            last_sync: None,
            ctx,
        };

        if let Err(e) = session.user.set_user_id(&options.user_id).await {
            warn!("Could not read session user: {}", e);
            session.fall_offline(&e);
            session.user.set_user_id(&options.user_id).await?;
        }
        session.lists.set_user_id(session.user.user_id());
        if let Err(e) = session.lists.load_local() {
            warn!("Discarding unreadable local lists: {}", e);
        }

        if session.is_online() {
            session.auth.set_logged_in(true);
            if let Err(e) = session.user.fetch_settings().await {
                warn!("Could not read settings: {}", e);
            }
            if let Err(e) = session.go_online().await {
                warn!("Initial sync failed: {}", e);
                session.fall_offline(&e);
            }
        }
        Ok(session)
    }

    pub fn is_online(&self) -> bool {
        self.ctx.is_online()
    }

    pub fn user_id(&self) -> &str {
        self.user.user_id()
    }

    /// Report of the most recent reconciliation, if one ran.
    pub fn last_sync(&self) -> Option<SyncReport> {
        self.last_sync
    }

    /// Flips connectivity. Coming online reconciles and restarts mirrors.
    pub async fn set_online(&mut self, online: bool) -> Result<Transition> {
        let transition = self.ctx.connectivity.set_online(online);
        match transition {
            Transition::WentOnline => {
                info!("Back online");
                self.auth.set_logged_in(true);
                self.lists.stop_mirrors();
                let result = self.go_online().await;
                self.report(result)?;
            }
            Transition::WentOffline => {
                info!("Working offline");
                self.lists.stop_mirrors();
            }
            Transition::Unchanged => {}
        }
        Ok(transition)
    }

    /// Runs a reconciliation pass on demand.
    pub async fn sync(&mut self) -> Result<SyncReport> {
        let result = self.lists.sync_on_reconnect().await;
        let report = self.report(result)?;
        self.last_sync = Some(report);
        Ok(report)
    }

    /// Applies pending remote events and drops expired notifications.
    pub async fn poll(&mut self) -> Result<usize> {
        let now = self.ctx.clock.now();
        self.notifications.prune(now);
        let result = self.lists.poll().await;
        self.report(result)
    }

    /// Creates a list. The first list becomes the primary list.
    pub async fn create_list(&mut self, name: &str) -> Result<String> {
        let result = self.lists.create_list(name).await;
        let id = self.report(result)?;
        if self.user.primary_list_id().is_none() {
            self.user.update_primary_list_id(Some(&id)).await;
        }
        Ok(id)
    }

    pub async fn rename_list(&mut self, list_id: &str, name: &str) -> Result<()> {
        let result = self.lists.rename_list(list_id, name).await;
        self.report(result)
    }

    pub async fn set_archived(&mut self, list_id: &str, archived: bool) -> Result<()> {
        let result = self.lists.set_archived(list_id, archived).await;
        self.report(result)
    }

    /// Deletes a list. Deleting the primary list promotes the next owned one.
    pub async fn delete_list(&mut self, list_id: &str) -> Result<()> {
        let result = self.lists.delete_list(list_id).await;
        self.report(result)?;
        if self.user.primary_list_id() == Some(list_id) {
            let next = self.lists.my_lists().first().map(|l| l.id.clone());
            self.user.update_primary_list_id(next.as_deref()).await;
        }
        Ok(())
    }

    pub async fn add_item(&mut self, list_id: &str, name: &str) -> Result<String> {
        let result = self.lists.add_item(list_id, name).await;
        self.report(result)
    }

    pub async fn edit_item(
        &mut self,
        list_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<()> {
        let result = self.lists.edit_item(list_id, item_id, patch).await;
        self.report(result)
    }

    pub async fn set_checked(
        &mut self,
        list_id: &str,
        item_id: &str,
        checked: bool,
    ) -> Result<()> {
        let result = self.lists.set_checked(list_id, item_id, checked).await;
        self.report(result)
    }

    pub async fn toggle_item(&mut self, list_id: &str, item_id: &str) -> Result<bool> {
        let result = self.lists.toggle_item(list_id, item_id).await;
        self.report(result)
    }

    pub async fn delete_item(&mut self, list_id: &str, item_id: &str) -> Result<()> {
        let result = self.lists.delete_item(list_id, item_id).await;
        self.report(result)
    }

    /// Shares one of the account's lists with another account.
    pub async fn share_list(
        &mut self,
        list_id: &str,
        guest_id: &str,
    ) -> Result<GrantedPermission> {
        let result = self.share_list_inner(list_id, guest_id).await;
        self.report(result)
    }

    async fn share_list_inner(
        &mut self,
        list_id: &str,
        guest_id: &str,
    ) -> Result<GrantedPermission> {
        if !self.is_online() {
            return Err(Error::Offline { action: "share" });
        }
        let mut list = self
            .lists
            .get_list(list_id)
            .cloned()
            .ok_or_else(|| Error::ListNotFound(list_id.to_string()))?;
        if !list.is_owned_by(self.user_id()) {
            return Err(Error::InvalidInput(format!(
                "only the owner ({}) can share list {}",
                list.owner, list_id
            )));
        }

        let grant = self
            .ctx
            .backend
            .grant(guest_id, Permission::row(LISTS_TABLE, list_id))
            .await?;

        if !list.user_ids_with_access.iter().any(|id| id == guest_id) {
            list.user_ids_with_access.push(guest_id.to_string());
            self.lists.update_list(list).await?;
        }
        Ok(grant)
    }

    /// Permissions other accounts granted to this one.
    pub async fn shared_with_me(&mut self) -> Result<Vec<GrantedPermission>> {
        if !self.is_online() {
            return Err(Error::Offline {
                action: "listing shares",
            });
        }
        let result = self.ctx.backend.list_shared().await.map_err(Error::from);
        self.report(result)
    }

    async fn go_online(&mut self) -> Result<()> {
        let report = self.lists.sync_on_reconnect().await?;
        self.last_sync = Some(report);
        self.lists.fetch_lists().await?;
        self.lists.fetch_shared_lists().await?;
        self.lists.watch_shared().await?;
        if !report.is_empty() {
            let now = self.ctx.clock.now();
            self.notifications
                .add(Level::Info, format!("Synced: {}", report), now);
        }
        Ok(())
    }

    fn fall_offline(&mut self, cause: &Error) {
        self.ctx.connectivity.set_online(false);
        self.lists.stop_mirrors();
        self.auth.set_logged_in(false);
        let now = self.ctx.clock.now();
        self.notifications
            .add(Level::Error, format!("Working offline: {}", cause), now);
    }

    /// Leaves a notification for a failed action.
    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            let now = self.ctx.clock.now();
            self.notifications.add(Level::Error, e.to_string(), now);
        }
        result
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
