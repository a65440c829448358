// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sl-core: Shared library for the shoplist client
//!
//! This crate provides the list documents, the backend abstraction with its
//! in-process mock, the mirror that keeps local arrays in step with remote
//! tables, last-write-wins resolution, and the local offline store.

pub mod backend;
pub mod change;
pub mod clock;
pub mod error;
pub mod id;
pub mod list;
pub mod memory;
pub mod merge;
pub mod mirror;
pub mod permission;
pub mod storage;

pub use backend::{
    Backend, BackendError, BackendResult, Feed, Scope, ShareFeed, Subscription, TableRef, UserInfo,
};
pub use change::{Change, ChangeKind};
pub use clock::{ClockSource, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use list::{ItemPatch, List, ListItem, LISTS_TABLE};
pub use memory::{MemoryBackend, MemoryService};
pub use merge::{Resolution, Timestamped};
pub use mirror::{Document, Mirror};
pub use permission::{GrantedPermission, Permission, PermissionType};
pub use storage::{LocalStorage, LISTS_KEY};
