// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for store, sync and session tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sl_core::{
    Backend, List, ListItem, LocalStorage, ManualClock, MemoryBackend, MemoryService, TableRef,
    LISTS_TABLE,
};

use crate::connectivity::Connectivity;
use crate::session::{Session, SessionOptions};
use crate::stores::{ListsStore, StoreContext};

/// Base instant of every test clock.
pub const EPOCH_MS: i64 = 1_700_000_000_000;

/// One account's view of a shared mock service.
pub struct Fixture {
    pub service: MemoryService,
    pub backend: MemoryBackend,
    pub clock: ManualClock,
    pub connectivity: Connectivity,
    pub ctx: StoreContext,
}

impl Fixture {
    /// An online account on a fresh service.
    pub fn new(user: &str) -> Self {
        Self::on(&MemoryService::new(), user)
    }

    /// An online account on an existing service.
    pub fn on(service: &MemoryService, user: &str) -> Self {
        let backend = service.connect(user);
        let clock = ManualClock::at_millis(EPOCH_MS);
        let connectivity = Connectivity::new(true);
        let ctx = StoreContext::new(
            Arc::new(backend.clone()),
            connectivity.clone(),
            Arc::new(clock.clone()),
        );
        Fixture {
            service: service.clone(),
            backend,
            clock,
            connectivity,
            ctx,
        }
    }

    pub fn user(&self) -> &str {
        self.backend.user_id()
    }

    /// A lists store backed by in-memory local storage.
    pub fn lists_store(&self) -> ListsStore {
        let mut store = ListsStore::new(self.ctx.clone(), LocalStorage::open_in_memory().unwrap());
        store.set_user_id(self.user());
        store
    }

    /// A started session over in-memory local storage.
    pub async fn session(&self) -> Session {
        let storage = LocalStorage::open_in_memory().unwrap();
        Session::start(self.ctx.clone(), storage, SessionOptions::new(self.user()))
            .await
            .unwrap()
    }

    /// Loses the connection: the flag drops and the backend stops answering.
    pub fn go_offline(&self) {
        self.connectivity.set_online(false);
        self.backend.set_reachable(false);
    }

    /// Makes the backend reachable again without touching the flag.
    pub fn restore_backend(&self) {
        self.backend.set_reachable(true);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.clock.advance(Duration::seconds(secs));
    }

    /// The account's lists as the backend holds them.
    pub fn remote_lists(&self) -> Vec<List> {
        self.service
            .documents(self.user(), LISTS_TABLE)
            .into_iter()
            .map(|doc| List::from_document(doc).unwrap())
            .collect()
    }

    /// Writes a list straight into the account's backend table.
    pub async fn seed_remote(&self, list: &List) {
        self.backend
            .replace(&TableRef::own(LISTS_TABLE), list.to_document().unwrap())
            .await
            .unwrap();
    }
}

pub fn at_ms(offset_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(EPOCH_MS + offset_ms).unwrap()
}

/// A list with one item, stamped `offset_ms` after the test epoch.
pub fn make_list(id: &str, owner: &str, offset_ms: i64) -> List {
    let mut list = List::new(
        id.to_string(),
        format!("List {}", id),
        owner.to_string(),
        at_ms(offset_ms),
    );
    list.items
        .push(ListItem::new(format!("{}-item", id), "Milk".to_string()));
    list
}
