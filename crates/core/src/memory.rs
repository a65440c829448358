// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process mock of the hosted backend.
//!
//! [`MemoryService`] holds every account's tables and the grants between
//! them. Each account talks to it through its own [`MemoryBackend`]
//! handle, which implements [`Backend`]. A handle can be switched offline
//! to simulate a device losing connectivity: its calls fail with
//! [`BackendError::Unreachable`] and its subscriptions miss every change
//! made meanwhile.
//!
//! The service state can be saved to and loaded from a JSON file so that
//! separate CLI invocations share one mock backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::backend::{
    doc_id, Backend, BackendError, BackendFuture, BackendResult, Feed, Scope, ShareFeed,
    Subscription, TableRef, UserInfo,
};
use crate::change::Change;
use crate::error::Result;
use crate::permission::{GrantedPermission, Permission, PermissionType};

/// Persisted part of the service state.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Snapshot {
    /// host -> table -> documents in insertion order.
    #[serde(default)]
    tables: BTreeMap<String, BTreeMap<String, Vec<Value>>>,
    #[serde(default)]
    grants: Vec<GrantedPermission>,
    #[serde(default)]
    next_id: u64,
}

struct Subscriber {
    user: String,
    host: String,
    table: String,
    scope: Scope,
    online: Arc<AtomicBool>,
    tx: UnboundedSender<Change<Value>>,
}

struct ShareWatcher {
    guest: String,
    tx: UnboundedSender<GrantedPermission>,
}

#[derive(Default)]
struct State {
    data: Snapshot,
    subscribers: Vec<Subscriber>,
    share_watchers: Vec<ShareWatcher>,
}

impl State {
    fn table(&self, host: &str, table: &str) -> &[Value] {
        self.data
            .tables
            .get(host)
            .and_then(|tables| tables.get(table))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn table_mut(&mut self, host: &str, table: &str) -> &mut Vec<Value> {
        self.data
            .tables
            .entry(host.to_string())
            .or_default()
            .entry(table.to_string())
            .or_default()
    }

    fn grants_for<'a>(
        &'a self,
        guest: &'a str,
        host: &'a str,
        table: &'a str,
    ) -> impl Iterator<Item = &'a GrantedPermission> + 'a {
        self.data.grants.iter().filter(move |grant| {
            grant.guest_id == guest && grant.host_id == host && grant.applies_to(table)
        })
    }

    /// Whether `user` may perform `kind` on row `id` of `host`'s table.
    fn allowed(&self, user: &str, host: &str, table: &str, id: &str, kind: PermissionType) -> bool {
        user == host
            || self
                .grants_for(user, host, table)
                .any(|grant| grant.permission.allows(kind) && grant.permission.covers_row(id))
    }

    fn has_any_grant(&self, user: &str, host: &str, table: &str) -> bool {
        user == host || self.grants_for(user, host, table).next().is_some()
    }

    /// Fans a change out to every matching subscriber, pruning closed ones.
    fn notify(&mut self, host: &str, table: &str, change: Change<Value>) {
        let id = change
            .new_doc
            .as_ref()
            .or(change.old_doc.as_ref())
            .and_then(doc_id)
            .unwrap_or_default()
            .to_string();

        let subscribers = std::mem::take(&mut self.subscribers);
        let mut kept = Vec::with_capacity(subscribers.len());
        for subscriber in subscribers {
            if subscriber.tx.is_closed() {
                continue;
            }
            let interested = subscriber.host == host
                && subscriber.table == table
                && subscriber.scope.matches(&id)
                && subscriber.online.load(Ordering::SeqCst)
                && self.allowed(&subscriber.user, host, table, &id, PermissionType::Read);
            if interested && subscriber.tx.send(change.clone()).is_err() {
                continue;
            }
            kept.push(subscriber);
        }
        self.subscribers = kept;
    }
}

/// Shared mock backend holding every account's data.
#[derive(Clone, Default)]
pub struct MemoryService {
    state: Arc<Mutex<State>>,
}

impl MemoryService {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a service from a snapshot file. A missing file yields an empty service.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Snapshot::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(MemoryService {
            state: Arc::new(Mutex::new(State {
                data,
                ..State::default()
            })),
        })
    }

    /// Writes tables and grants to a snapshot file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = self.lock().data.clone();
        let content = serde_json::to_string_pretty(&data)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Opens a session for `user_id`.
    pub fn connect(&self, user_id: &str) -> MemoryBackend {
        MemoryBackend {
            service: self.clone(),
            user_id: user_id.to_string(),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Documents of a host's table, for inspection.
    pub fn documents(&self, host: &str, table: &str) -> Vec<Value> {
        self.lock().table(host, table).to_vec()
    }

    /// Every grant in the service.
    pub fn grants(&self) -> Vec<GrantedPermission> {
        self.lock().data.grants.clone()
    }

    /// Number of live subscriptions, pruning closed ones first.
    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.subscribers.retain(|s| !s.tx.is_closed());
        state.subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// One account's session on a [`MemoryService`].
#[derive(Clone)]
pub struct MemoryBackend {
    service: MemoryService,
    user_id: String,
    online: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn service(&self) -> &MemoryService {
        &self.service
    }

    /// Switches this session's connectivity.
    pub fn set_reachable(&self, reachable: bool) {
        self.online.store(reachable, Ordering::SeqCst);
    }

    pub fn is_reachable(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn check(&self) -> BackendResult<()> {
        if self.is_reachable() {
            Ok(())
        } else {
            Err(BackendError::Unreachable)
        }
    }

    fn denied(&self, table: &TableRef, action: &str) -> BackendError {
        BackendError::PermissionDenied(format!(
            "{} may not {} {}/{}",
            self.user_id,
            action,
            table.host_or(&self.user_id),
            table.name
        ))
    }

    fn insert_now(&self, table: &TableRef, mut doc: Value) -> BackendResult<String> {
        self.check()?;
        let host = table.host_or(&self.user_id).to_string();
        let mut state = self.service.lock();

        let id = match doc_id(&doc) {
            Some(id) => id.to_string(),
            None => {
                state.data.next_id += 1;
                let id = format!("doc-{}", state.data.next_id);
                match doc.as_object_mut() {
                    Some(fields) => {
                        fields.insert("id".to_string(), Value::String(id.clone()));
                    }
                    None => {
                        return Err(BackendError::InvalidDocument(
                            "document must be an object".to_string(),
                        ))
                    }
                }
                id
            }
        };

        if !state.allowed(&self.user_id, &host, &table.name, &id, PermissionType::Insert) {
            return Err(self.denied(table, "insert into"));
        }
        if state
            .table(&host, &table.name)
            .iter()
            .any(|existing| doc_id(existing) == Some(id.as_str()))
        {
            return Err(BackendError::InvalidDocument(format!("duplicate id: {id}")));
        }

        state.table_mut(&host, &table.name).push(doc.clone());
        state.notify(&host, &table.name, Change::added(doc));
        debug!("mock: {} inserted {} into {}/{}", self.user_id, id, host, table.name);
        Ok(id)
    }

    fn get_one_now(&self, table: &TableRef, id: &str) -> BackendResult<Option<Value>> {
        self.check()?;
        let host = table.host_or(&self.user_id);
        let state = self.service.lock();
        if !state.allowed(&self.user_id, host, &table.name, id, PermissionType::Read) {
            return Err(self.denied(table, "read"));
        }
        Ok(state
            .table(host, &table.name)
            .iter()
            .find(|doc| doc_id(doc) == Some(id))
            .cloned())
    }

    fn get_all_now(&self, table: &TableRef) -> BackendResult<Vec<Value>> {
        self.check()?;
        let host = table.host_or(&self.user_id);
        let state = self.service.lock();
        if !state.has_any_grant(&self.user_id, host, &table.name) {
            return Err(self.denied(table, "read"));
        }
        Ok(state
            .table(host, &table.name)
            .iter()
            .filter(|doc| {
                let id = doc_id(doc).unwrap_or_default();
                state.allowed(&self.user_id, host, &table.name, id, PermissionType::Read)
            })
            .cloned()
            .collect())
    }

    /// Shared path for update (merge) and replace (overwrite).
    fn write_now(&self, table: &TableRef, doc: Value, merge: bool) -> BackendResult<()> {
        self.check()?;
        let id = doc_id(&doc)
            .ok_or_else(|| BackendError::InvalidDocument("document has no id".to_string()))?
            .to_string();
        let host = table.host_or(&self.user_id).to_string();
        let mut state = self.service.lock();

        if !state.allowed(&self.user_id, &host, &table.name, &id, PermissionType::Update) {
            return Err(self.denied(table, "update"));
        }

        let docs = state.table_mut(&host, &table.name);
        let position = docs.iter().position(|d| doc_id(d) == Some(id.as_str()));
        let change = match position {
            Some(index) => {
                let old = docs[index].clone();
                let new = if merge {
                    let mut merged = old.clone();
                    if let (Some(target), Some(fields)) =
                        (merged.as_object_mut(), doc.as_object())
                    {
                        for (key, value) in fields {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                    merged
                } else {
                    doc
                };
                docs[index] = new.clone();
                Change::updated(old, new)
            }
            None if merge => return Err(BackendError::NotFound(id)),
            None => {
                docs.push(doc.clone());
                Change::added(doc)
            }
        };

        state.notify(&host, &table.name, change);
        debug!("mock: {} wrote {} in {}/{}", self.user_id, id, host, table.name);
        Ok(())
    }

    fn delete_now(&self, table: &TableRef, id: &str) -> BackendResult<()> {
        self.check()?;
        let host = table.host_or(&self.user_id).to_string();
        let mut state = self.service.lock();

        if !state.allowed(&self.user_id, &host, &table.name, id, PermissionType::Delete) {
            return Err(self.denied(table, "delete from"));
        }

        let docs = state.table_mut(&host, &table.name);
        let position = docs
            .iter()
            .position(|d| doc_id(d) == Some(id))
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        let old = docs.remove(position);

        state.notify(&host, &table.name, Change::deleted(old));
        debug!("mock: {} deleted {} from {}/{}", self.user_id, id, host, table.name);
        Ok(())
    }

    fn subscribe_now(&self, table: &TableRef, scope: &Scope) -> BackendResult<Subscription> {
        self.check()?;
        let host = table.host_or(&self.user_id).to_string();
        let mut state = self.service.lock();
        if !state.has_any_grant(&self.user_id, &host, &table.name) {
            return Err(self.denied(table, "subscribe to"));
        }

        let (tx, feed) = Feed::channel();
        state.subscribers.push(Subscriber {
            user: self.user_id.clone(),
            host,
            table: table.name.clone(),
            scope: scope.clone(),
            online: Arc::clone(&self.online),
            tx,
        });
        Ok(feed)
    }

    fn grant_now(
        &self,
        guest_id: &str,
        permission: Permission,
    ) -> BackendResult<GrantedPermission> {
        self.check()?;
        if guest_id == self.user_id {
            return Err(BackendError::PermissionDenied(
                "cannot share with yourself".to_string(),
            ));
        }
        let mut state = self.service.lock();

        if let Some(existing) = state.data.grants.iter().find(|grant| {
            grant.host_id == self.user_id
                && grant.guest_id == guest_id
                && grant.permission == permission
        }) {
            return Ok(existing.clone());
        }

        state.data.next_id += 1;
        let grant = GrantedPermission {
            id: format!("grant-{}", state.data.next_id),
            host_id: self.user_id.clone(),
            guest_id: guest_id.to_string(),
            permission,
        };
        state.data.grants.push(grant.clone());
        state
            .share_watchers
            .retain(|watcher| watcher.guest != guest_id || watcher.tx.send(grant.clone()).is_ok());
        debug!("mock: {} shared {} with {}", self.user_id, grant.table_name(), guest_id);
        Ok(grant)
    }

    fn list_shared_now(&self) -> BackendResult<Vec<GrantedPermission>> {
        self.check()?;
        let state = self.service.lock();
        Ok(state
            .data
            .grants
            .iter()
            .filter(|grant| grant.guest_id == self.user_id)
            .cloned()
            .collect())
    }

    fn on_shared_now(&self) -> BackendResult<ShareFeed> {
        self.check()?;
        let (tx, feed) = Feed::channel();
        self.service.lock().share_watchers.push(ShareWatcher {
            guest: self.user_id.clone(),
            tx,
        });
        Ok(feed)
    }
}

impl Backend for MemoryBackend {
    fn user_info(&self) -> BackendFuture<'_, UserInfo> {
        let result = self.check().map(|()| UserInfo {
            id: self.user_id.clone(),
            name: self.user_id.clone(),
        });
        Box::pin(std::future::ready(result))
    }

    fn insert<'a>(&'a self, table: &'a TableRef, doc: Value) -> BackendFuture<'a, String> {
        Box::pin(std::future::ready(self.insert_now(table, doc)))
    }

    fn get_one<'a>(&'a self, table: &'a TableRef, id: &'a str) -> BackendFuture<'a, Option<Value>> {
        Box::pin(std::future::ready(self.get_one_now(table, id)))
    }

    fn get_all<'a>(&'a self, table: &'a TableRef) -> BackendFuture<'a, Vec<Value>> {
        Box::pin(std::future::ready(self.get_all_now(table)))
    }

    fn update<'a>(&'a self, table: &'a TableRef, doc: Value) -> BackendFuture<'a, ()> {
        Box::pin(std::future::ready(self.write_now(table, doc, true)))
    }

    fn replace<'a>(&'a self, table: &'a TableRef, doc: Value) -> BackendFuture<'a, ()> {
        Box::pin(std::future::ready(self.write_now(table, doc, false)))
    }

    fn delete<'a>(&'a self, table: &'a TableRef, id: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(std::future::ready(self.delete_now(table, id)))
    }

    fn subscribe<'a>(
        &'a self,
        table: &'a TableRef,
        scope: &'a Scope,
    ) -> BackendFuture<'a, Subscription> {
        Box::pin(std::future::ready(self.subscribe_now(table, scope)))
    }

    fn grant<'a>(
        &'a self,
        guest_id: &'a str,
        permission: Permission,
    ) -> BackendFuture<'a, GrantedPermission> {
        Box::pin(std::future::ready(self.grant_now(guest_id, permission)))
    }

    fn list_shared(&self) -> BackendFuture<'_, Vec<GrantedPermission>> {
        Box::pin(std::future::ready(self.list_shared_now()))
    }

    fn on_shared(&self) -> BackendFuture<'_, ShareFeed> {
        Box::pin(std::future::ready(self.on_shared_now()))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
