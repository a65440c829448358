// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend-as-a-service abstraction.
//!
//! The hosted service provides the session user, per-user document tables,
//! realtime change subscriptions and sharing. Everything above this module
//! talks to it through the [`Backend`] trait so that the mock service in
//! [`crate::memory`] can stand in for it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::change::Change;
use crate::permission::{GrantedPermission, Permission};

/// Error type for backend operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// The service could not be reached.
    #[error("backend unreachable")]
    Unreachable,

    /// No session user.
    #[error("not logged in")]
    NotLoggedIn,

    /// The session user may not perform the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The addressed document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The document is malformed (e.g. missing its id).
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The change feed ended.
    #[error("subscription closed")]
    SubscriptionClosed,
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Boxed future returned by [`Backend`] methods.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = BackendResult<T>> + Send + 'a>>;

/// Handle to a table, either the session user's own or one hosted by
/// another account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    /// Hosting account. `None` means the session user.
    pub host: Option<String>,
}

impl TableRef {
    /// The session user's own table.
    pub fn own(name: &str) -> Self {
        TableRef {
            name: name.to_string(),
            host: None,
        }
    }

    /// A table hosted by another account.
    pub fn hosted_by(name: &str, host: &str) -> Self {
        TableRef {
            name: name.to_string(),
            host: Some(host.to_string()),
        }
    }

    /// The table a document owned by `owner` lives in, as seen by `current_user`.
    pub fn for_owner(name: &str, owner: &str, current_user: &str) -> Self {
        if owner == current_user || owner.is_empty() {
            Self::own(name)
        } else {
            Self::hosted_by(name, owner)
        }
    }

    /// Resolves the hosting account for a session user.
    pub fn host_or<'a>(&'a self, current_user: &'a str) -> &'a str {
        self.host.as_deref().unwrap_or(current_user)
    }
}

/// What a read or subscription covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    One(String),
}

impl Scope {
    pub fn from_row(row_id: Option<&str>) -> Self {
        match row_id {
            Some(id) if !id.is_empty() => Scope::One(id.to_string()),
            _ => Scope::All,
        }
    }

    pub fn matches(&self, doc_id: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::One(id) => id == doc_id,
        }
    }
}

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
}

/// Receiving end of a realtime feed.
///
/// There is no unsubscribe call: dropping the feed ends it.
#[derive(Debug)]
pub struct Feed<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

/// Feed of document changes on a table.
pub type Subscription = Feed<Change<Value>>;

/// Feed of permissions newly granted to the session user.
pub type ShareFeed = Feed<GrantedPermission>;

impl<T> Feed<T> {
    /// Creates a connected sender/feed pair.
    pub fn channel() -> (mpsc::UnboundedSender<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Feed { rx })
    }

    /// Returns the next pending event without waiting.
    ///
    /// `Ok(None)` means nothing is pending. Once the sender is gone and
    /// the buffer is empty this returns [`BackendError::SubscriptionClosed`].
    pub fn try_next(&mut self) -> BackendResult<Option<T>> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(BackendError::SubscriptionClosed),
        }
    }

    /// Waits for the next event. `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

/// Extracts the `id` field of a document.
pub fn doc_id(doc: &Value) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

/// Client interface to the hosted backend.
pub trait Backend: Send + Sync {
    /// The authenticated account.
    fn user_info(&self) -> BackendFuture<'_, UserInfo>;

    /// Inserts a document, returning its id. A missing id is generated.
    fn insert<'a>(&'a self, table: &'a TableRef, doc: Value) -> BackendFuture<'a, String>;

    /// Reads one document by id.
    fn get_one<'a>(&'a self, table: &'a TableRef, id: &'a str) -> BackendFuture<'a, Option<Value>>;

    /// Reads every document in the table.
    fn get_all<'a>(&'a self, table: &'a TableRef) -> BackendFuture<'a, Vec<Value>>;

    /// Merges the top-level fields of `doc` into the stored document.
    fn update<'a>(&'a self, table: &'a TableRef, doc: Value) -> BackendFuture<'a, ()>;

    /// Replaces the stored document wholesale, inserting it if absent.
    fn replace<'a>(&'a self, table: &'a TableRef, doc: Value) -> BackendFuture<'a, ()>;

    /// Deletes a document by id.
    fn delete<'a>(&'a self, table: &'a TableRef, id: &'a str) -> BackendFuture<'a, ()>;

    /// Subscribes to changes on a table, optionally scoped to one document.
    fn subscribe<'a>(&'a self, table: &'a TableRef, scope: &'a Scope)
        -> BackendFuture<'a, Subscription>;

    /// Shares one of the session user's tables (or a row of it) with `guest_id`.
    fn grant<'a>(
        &'a self,
        guest_id: &'a str,
        permission: Permission,
    ) -> BackendFuture<'a, GrantedPermission>;

    /// Permissions other accounts granted to the session user.
    fn list_shared(&self) -> BackendFuture<'_, Vec<GrantedPermission>>;

    /// Feed of permissions granted to the session user from now on.
    fn on_shared(&self) -> BackendFuture<'_, ShareFeed>;
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
