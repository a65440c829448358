// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client state containers.
//!
//! Each store owns a slice of application state and the actions that
//! change it. Actions talk to the backend when the client is online and
//! fall back to local state otherwise.

pub mod auth;
pub mod lists;
pub mod notifications;
pub mod user;

use std::sync::Arc;

use sl_core::{Backend, ClockSource};

use crate::connectivity::Connectivity;

pub use auth::AuthStore;
pub use lists::ListsStore;
pub use notifications::{Level, Notification, NotificationsStore};
pub use user::UserStore;

/// Dependencies shared by every store.
#[derive(Clone)]
pub struct StoreContext {
    pub backend: Arc<dyn Backend>,
    pub connectivity: Connectivity,
    pub clock: Arc<dyn ClockSource>,
}

impl StoreContext {
    pub fn new(
        backend: Arc<dyn Backend>,
        connectivity: Connectivity,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        StoreContext {
            backend,
            connectivity,
            clock,
        }
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }
}
