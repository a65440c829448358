// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Keep a local array in step with a remote table.
//!
//! Reconcile rules, applied both to the initial read and to every change
//! event afterwards:
//! - added/updated: replace the entry with the same id in place, or append,
//!   unless the local entry claims precedence (see [`Document::keeps_over`])
//! - deleted: remove every entry with the matching id
//!
//! Applying the same event twice leaves the array unchanged. Events are
//! applied in arrival order; the last one processed wins.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::backend::{Backend, BackendResult, Scope, Subscription, TableRef};
use crate::change::{Change, ChangeKind};

/// A document addressable by id within its collection.
pub trait Document {
    fn id(&self) -> &str;

    /// True if this local entry must survive the incoming remote copy.
    fn keeps_over(&self, _incoming: &Self) -> bool {
        false
    }
}

/// Replaces the entry with the same id in place, or appends `doc`.
/// An entry that [keeps over](Document::keeps_over) `doc` is left alone.
///
/// Returns true if the document was appended.
pub fn upsert<T: Document>(docs: &mut Vec<T>, doc: T) -> bool {
    match docs.iter().position(|existing| existing.id() == doc.id()) {
        Some(index) => {
            if docs[index].keeps_over(&doc) {
                debug!("Kept local {} over remote copy", doc.id());
            } else {
                docs[index] = doc;
            }
            false
        }
        None => {
            docs.push(doc);
            true
        }
    }
}

/// Removes every entry with the given id, returning how many were removed.
pub fn remove<T: Document>(docs: &mut Vec<T>, id: &str) -> usize {
    let before = docs.len();
    docs.retain(|doc| doc.id() != id);
    before - docs.len()
}

/// Applies one change event. Returns the kind applied, or `None` for an
/// empty change.
pub fn apply_change<T: Document>(docs: &mut Vec<T>, change: Change<T>) -> Option<ChangeKind> {
    let kind = change.kind()?;
    match (change.new_doc, change.old_doc) {
        (Some(doc), _) => {
            upsert(docs, doc);
        }
        (None, Some(old)) => {
            remove(docs, old.id());
        }
        (None, None) => {}
    }
    Some(kind)
}

/// A live mirror of one remote table (or one document of it).
///
/// The mirror owns the subscription but not the array: callers pass the
/// array they keep in their store state to [`Mirror::drain_into`].
pub struct Mirror<T> {
    table: TableRef,
    scope: Scope,
    subscription: Subscription,
    closed: bool,
    _doc: PhantomData<fn() -> T>,
}

impl<T: Document + DeserializeOwned> Mirror<T> {
    /// Subscribes to the table, then merges its current documents into `docs`.
    ///
    /// The subscription is opened before the read so that no change made
    /// in between is lost; replaying it afterwards is harmless.
    pub async fn start<B: Backend + ?Sized>(
        backend: &B,
        table: TableRef,
        scope: Scope,
        docs: &mut Vec<T>,
    ) -> BackendResult<Self> {
        let subscription = backend.subscribe(&table, &scope).await?;

        let fetched = match &scope {
            Scope::One(id) => backend.get_one(&table, id).await?.into_iter().collect(),
            Scope::All => backend.get_all(&table).await?,
        };

        let mut merged = 0;
        for raw in fetched {
            match serde_json::from_value::<T>(raw) {
                Ok(doc) => {
                    upsert(docs, doc);
                    merged += 1;
                }
                Err(e) => warn!("Mirror skipped undecodable document in {}: {}", table.name, e),
            }
        }
        debug!(
            "Mirror started on {} (host {:?}, {:?}): {} documents",
            table.name, table.host, scope, merged
        );

        Ok(Mirror {
            table,
            scope,
            subscription,
            closed: false,
            _doc: PhantomData,
        })
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// True once the backend ended the feed. Closed mirrors are not resumed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Applies every pending change event. Returns the number applied.
    pub fn drain_into(&mut self, docs: &mut Vec<T>) -> usize {
        let mut applied = 0;
        while !self.closed {
            match self.subscription.try_next() {
                Ok(Some(change)) => {
                    if self.apply_raw(docs, change).is_some() {
                        applied += 1;
                    }
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("Mirror feed on {} closed", self.table.name);
                    self.closed = true;
                }
            }
        }
        applied
    }

    /// Waits for the next change event and applies it.
    ///
    /// Returns `None` once the feed is closed.
    pub async fn next_into(&mut self, docs: &mut Vec<T>) -> Option<Option<ChangeKind>> {
        if self.closed {
            return None;
        }
        match self.subscription.next().await {
            Some(change) => Some(self.apply_raw(docs, change)),
            None => {
                self.closed = true;
                None
            }
        }
    }

    fn apply_raw(&self, docs: &mut Vec<T>, change: Change<Value>) -> Option<ChangeKind> {
        match change.try_map(serde_json::from_value::<T>) {
            Ok(change) => {
                let kind = apply_change(docs, change);
                if let Some(kind) = kind {
                    debug!("Mirror {} on {}", kind, self.table.name);
                }
                kind
            }
            Err(e) => {
                warn!("Mirror skipped undecodable change in {}: {}", self.table.name, e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod tests;
