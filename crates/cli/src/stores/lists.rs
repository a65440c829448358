// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shopping lists, owned and shared.
//!
//! The store keeps one array of lists. Remote tables are mirrored into it
//! (the account's own `lists` table plus one mirror per share grant) and
//! every change is written through to local storage, which is the only
//! source while offline.
//!
//! Mutations follow one pattern: change the local copy, stamp
//! `last_updated`, try the backend, and set `needs_sync` if the write did
//! not land. Backend failures are logged, never surfaced.

use std::fmt;

use sl_core::id::{generate_unique_id, ITEM_PREFIX, LIST_PREFIX};
use sl_core::mirror::{self, Mirror};
use sl_core::{
    GrantedPermission, ItemPatch, List, ListItem, LocalStorage, Scope, ShareFeed, TableRef,
    LISTS_TABLE,
};
use tracing::{debug, info, warn};

use super::StoreContext;
use crate::error::{Error, Result};
use crate::sync::{self, SyncReport};

/// How a list reaches its owner's table.
#[derive(Debug, Clone, Copy)]
enum Write {
    Insert,
    Update,
    Replace,
}

impl fmt::Display for Write {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Write::Insert => write!(f, "insert"),
            Write::Update => write!(f, "update"),
            Write::Replace => write!(f, "replace"),
        }
    }
}

pub struct ListsStore {
    ctx: StoreContext,
    storage: LocalStorage,
    user_id: String,
    lists: Vec<List>,
    mirrors: Vec<Mirror<List>>,
    share_feed: Option<ShareFeed>,
}

impl ListsStore {
    pub fn new(ctx: StoreContext, storage: LocalStorage) -> Self {
        ListsStore {
            ctx,
            storage,
            user_id: String::new(),
            lists: Vec::new(),
            mirrors: Vec::new(),
            share_feed: None,
        }
    }

    pub fn set_user_id(&mut self, user_id: &str) {
        self.user_id = user_id.to_string();
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_watching_shares(&self) -> bool {
        self.share_feed.is_some()
    }

    /// Replaces the in-memory lists with the persisted copy.
    pub fn load_local(&mut self) -> Result<usize> {
        self.lists = self.storage.load_lists()?;
        debug!("Loaded {} lists from local storage", self.lists.len());
        Ok(self.lists.len())
    }

    pub fn persist(&self) -> Result<()> {
        self.storage.save_lists(&self.lists)?;
        Ok(())
    }

    /// Mirrors the account's own lists table. Offline, loads the local copy.
    pub async fn fetch_lists(&mut self) -> Result<()> {
        if !self.ctx.is_online() {
            self.load_local()?;
            return Ok(());
        }
        let table = TableRef::own(LISTS_TABLE);
        if self.has_mirror(&table, &Scope::All) {
            return Ok(());
        }
        let mirror =
            Mirror::start(self.ctx.backend.as_ref(), table, Scope::All, &mut self.lists).await?;
        self.mirrors.push(mirror);
        self.persist()
    }

    /// Mirrors every list shared with the account. Returns the number of
    /// mirrors started.
    pub async fn fetch_shared_lists(&mut self) -> Result<usize> {
        if !self.ctx.is_online() {
            return Ok(0);
        }
        let grants = self.ctx.backend.list_shared().await?;
        let mut started = 0;
        for grant in grants.iter().filter(|g| g.applies_to(LISTS_TABLE)) {
            if self.mirror_grant(grant).await {
                started += 1;
            }
        }
        if started > 0 {
            self.persist()?;
        }
        Ok(started)
    }

    /// Subscribes to new grants. Each one is mirrored on the next [`poll`](Self::poll).
    pub async fn watch_shared(&mut self) -> Result<()> {
        if !self.ctx.is_online() || self.share_feed.is_some() {
            return Ok(());
        }
        self.share_feed = Some(self.ctx.backend.on_shared().await?);
        Ok(())
    }

    /// Drops every subscription. Used when connectivity is lost, since
    /// feeds do not replay what they missed.
    pub fn stop_mirrors(&mut self) {
        if !self.mirrors.is_empty() {
            debug!("Stopping {} mirrors", self.mirrors.len());
        }
        self.mirrors.clear();
        self.share_feed = None;
    }

    /// Applies every pending change event and grant, persisting if
    /// anything changed. Returns the number of changes applied.
    pub async fn poll(&mut self) -> Result<usize> {
        let mut changed = 0;
        for mirror in &mut self.mirrors {
            changed += mirror.drain_into(&mut self.lists);
        }
        let before = self.mirrors.len();
        self.mirrors.retain(|m| !m.is_closed());
        if self.mirrors.len() != before {
            debug!("Pruned {} closed mirrors", before - self.mirrors.len());
        }

        let mut grants = Vec::new();
        let mut feed_closed = false;
        if let Some(feed) = self.share_feed.as_mut() {
            loop {
                match feed.try_next() {
                    Ok(Some(grant)) => grants.push(grant),
                    Ok(None) => break,
                    Err(e) => {
                        debug!("Share feed ended: {}", e);
                        feed_closed = true;
                        break;
                    }
                }
            }
        }
        if feed_closed {
            self.share_feed = None;
        }

        for grant in grants.iter().filter(|g| g.applies_to(LISTS_TABLE)) {
            info!("{} shared a list with you", grant.host_id);
            if self.mirror_grant(grant).await {
                changed += 1;
            }
        }

        if changed > 0 {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Creates a list owned by the account and returns its id.
    pub async fn create_list(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::FieldEmpty { field: "list name" });
        }
        let now = self.ctx.clock.now();
        let seed = format!("{}/{}", self.user_id, name);
        let id = generate_unique_id(LIST_PREFIX, &seed, &now, |candidate| {
            self.lists.iter().any(|l| l.id == candidate)
        });

        let mut list = List::new(id.clone(), name.to_string(), self.user_id.clone(), now);
        list.needs_sync = !self.push(&list, Write::Insert).await;
        if list.needs_sync {
            debug!("List {} created locally, pending sync", id);
        }
        mirror::upsert(&mut self.lists, list);
        self.persist()?;
        Ok(id)
    }

    /// Stores a new version of a list, stamping it.
    pub async fn update_list(&mut self, mut list: List) -> Result<()> {
        let index = self.index_of(&list.id)?;
        list.touch(self.ctx.clock.now());
        list.needs_sync = !self.push(&list, Write::Update).await;
        self.lists[index] = list;
        self.persist()
    }

    pub async fn rename_list(&mut self, list_id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::FieldEmpty { field: "list name" });
        }
        let mut list = self.require_list(list_id)?.clone();
        list.name = name.to_string();
        self.update_list(list).await
    }

    pub async fn set_archived(&mut self, list_id: &str, archived: bool) -> Result<()> {
        let mut list = self.require_list(list_id)?.clone();
        list.archived = archived;
        self.update_list(list).await
    }

    /// Deletes a list. The local copy goes even if the remote delete fails.
    pub async fn delete_list(&mut self, list_id: &str) -> Result<List> {
        let index = self.index_of(list_id)?;
        if self.ctx.is_online() {
            let table = TableRef::for_owner(LISTS_TABLE, &self.lists[index].owner, &self.user_id);
            if let Err(e) = self.ctx.backend.delete(&table, list_id).await {
                warn!("Failed to delete list {} remotely: {}", list_id, e);
            }
        }
        let removed = self.lists.remove(index);
        mirror::remove(&mut self.lists, list_id);
        self.persist()?;
        Ok(removed)
    }

    /// Clears `needs_sync` on every list, returning how many were set.
    pub fn remove_needs_sync(&mut self) -> usize {
        let mut cleared = 0;
        for list in self.lists.iter_mut().filter(|l| l.needs_sync) {
            list.needs_sync = false;
            cleared += 1;
        }
        cleared
    }

    /// Adds an item with default fields and returns its id.
    pub async fn add_item(&mut self, list_id: &str, name: &str) -> Result<String> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::FieldEmpty { field: "item name" });
        }
        let now = self.ctx.clock.now();
        let seed = format!("{}/{}", list_id, name);
        self.mutate_list(list_id, move |list| {
            let id = generate_unique_id(ITEM_PREFIX, &seed, &now, |candidate| {
                list.has_item(candidate)
            });
            list.items.push(ListItem::new(id.clone(), name));
            Ok(id)
        })
        .await
    }

    /// Replaces an item wholesale, keeping its position.
    pub async fn update_item(&mut self, list_id: &str, item: ListItem) -> Result<()> {
        self.mutate_list(list_id, |list| {
            let item_id = item.id.clone();
            if list.replace_item(item) {
                Ok(())
            } else {
                Err(item_not_found(&list.id, &item_id))
            }
        })
        .await
    }

    /// Applies field overrides to an item.
    pub async fn edit_item(
        &mut self,
        list_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<()> {
        if patch.is_empty() {
            return Err(Error::InvalidInput("nothing to change".to_string()));
        }
        self.mutate_list(list_id, |list| {
            let list_id = list.id.clone();
            let item = list
                .item_mut(item_id)
                .ok_or_else(|| item_not_found(&list_id, item_id))?;
            patch.apply(item);
            Ok(())
        })
        .await
    }

    pub async fn set_checked(&mut self, list_id: &str, item_id: &str, checked: bool) -> Result<()> {
        let patch = ItemPatch {
            checked: Some(checked),
            ..ItemPatch::default()
        };
        self.edit_item(list_id, item_id, &patch).await
    }

    /// Flips an item's checked state and returns the new state.
    pub async fn toggle_item(&mut self, list_id: &str, item_id: &str) -> Result<bool> {
        self.mutate_list(list_id, |list| {
            let list_id = list.id.clone();
            let item = list
                .item_mut(item_id)
                .ok_or_else(|| item_not_found(&list_id, item_id))?;
            item.checked = !item.checked;
            Ok(item.checked)
        })
        .await
    }

    pub async fn delete_item(&mut self, list_id: &str, item_id: &str) -> Result<()> {
        self.mutate_list(list_id, |list| {
            if list.remove_item(item_id) {
                Ok(())
            } else {
                Err(item_not_found(&list.id, item_id))
            }
        })
        .await
    }

    /// Reconciles local lists against the backend and persists the result.
    pub async fn sync_on_reconnect(&mut self) -> Result<SyncReport> {
        if !self.ctx.is_online() {
            return Err(Error::Offline { action: "sync" });
        }
        let report =
            sync::sync_on_reconnect(self.ctx.backend.as_ref(), &self.user_id, &mut self.lists)
                .await?;
        self.persist()?;
        Ok(report)
    }

    pub fn get_list(&self, list_id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn get_item(&self, list_id: &str, item_id: &str) -> Option<&ListItem> {
        self.get_list(list_id)?.item(item_id)
    }

    /// Checked items of a list, newest first. Empty for unknown lists.
    pub fn checked_items(&self, list_id: &str) -> Vec<&ListItem> {
        self.get_list(list_id)
            .map(List::checked_items)
            .unwrap_or_default()
    }

    /// Unchecked items of a list, newest first. Empty for unknown lists.
    pub fn unchecked_items(&self, list_id: &str) -> Vec<&ListItem> {
        self.get_list(list_id)
            .map(List::unchecked_items)
            .unwrap_or_default()
    }

    /// Lists hosted by the account.
    pub fn my_lists(&self) -> Vec<&List> {
        self.lists
            .iter()
            .filter(|l| l.is_owned_by(&self.user_id))
            .collect()
    }

    /// Lists other accounts shared with this one.
    pub fn shared_lists(&self) -> Vec<&List> {
        self.lists
            .iter()
            .filter(|l| !l.is_owned_by(&self.user_id))
            .collect()
    }

    /// Lists with local changes the backend has not seen.
    pub fn unsynced_lists(&self) -> Vec<&List> {
        self.lists.iter().filter(|l| l.needs_sync).collect()
    }

    fn index_of(&self, list_id: &str) -> Result<usize> {
        self.lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or_else(|| Error::ListNotFound(list_id.to_string()))
    }

    fn require_list(&self, list_id: &str) -> Result<&List> {
        self.get_list(list_id)
            .ok_or_else(|| Error::ListNotFound(list_id.to_string()))
    }

    fn has_mirror(&self, table: &TableRef, scope: &Scope) -> bool {
        self.mirrors
            .iter()
            .any(|m| m.table() == table && m.scope() == scope)
    }

    async fn mirror_grant(&mut self, grant: &GrantedPermission) -> bool {
        if grant.host_id.is_empty() {
            return false;
        }
        let table = TableRef::hosted_by(LISTS_TABLE, &grant.host_id);
        let scope = Scope::from_row(grant.row_id());
        if self.has_mirror(&table, &scope) {
            return false;
        }
        match Mirror::start(self.ctx.backend.as_ref(), table, scope, &mut self.lists).await {
            Ok(mirror) => {
                self.mirrors.push(mirror);
                true
            }
            Err(e) => {
                warn!("Failed to mirror lists shared by {}: {}", grant.host_id, e);
                false
            }
        }
    }

    /// Runs `f` on a list, stamps it and writes it through.
    async fn mutate_list<R, F>(&mut self, list_id: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut List) -> Result<R>,
    {
        let index = self.index_of(list_id)?;
        let now = self.ctx.clock.now();
        let result = f(&mut self.lists[index])?;
        self.lists[index].touch(now);

        let pushed = self.push(&self.lists[index], Write::Replace).await;
        self.lists[index].needs_sync = !pushed;
        self.persist()?;
        Ok(result)
    }

    /// Writes a list to its owner's table. Returns false if the write did
    /// not reach the backend.
    async fn push(&self, list: &List, write: Write) -> bool {
        if !self.ctx.is_online() {
            return false;
        }
        let table = TableRef::for_owner(LISTS_TABLE, &list.owner, &self.user_id);
        let doc = match list.to_document() {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Failed to encode list {}: {}", list.id, e);
                return false;
            }
        };
        let backend = self.ctx.backend.as_ref();
        let result = match write {
            Write::Insert => backend.insert(&table, doc).await.map(|_| ()),
            Write::Update => backend.update(&table, doc).await,
            Write::Replace => backend.replace(&table, doc).await,
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to {} list {}: {}", write, list.id, e);
                false
            }
        }
    }
}

fn item_not_found(list_id: &str, item_id: &str) -> Error {
    Error::ItemNotFound {
        list_id: list_id.to_string(),
        item_id: item_id.to_string(),
    }
}

#[cfg(test)]
#[path = "lists_tests.rs"]
mod tests;
