// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation of the local list copy with the backend.
//!
//! Runs when the client comes back online (and at start when online):
//!
//! ```text
//! ┌─────────────┐  fetch owned + shared  ┌─────────────┐
//! │ Local lists │◄───────────────────────│   Backend   │
//! │ (storage)   │───────────────────────►│   tables    │
//! └─────────────┘  push local winners    └─────────────┘
//! ```
//!
//! Local entries without a remote counterpart are either pushed (owned
//! and changed offline) or dropped (deleted remotely, or a share that was
//! revoked). Entries on both sides go through last-write-wins.

mod reconcile;

pub use reconcile::{fetch_remote_lists, reconcile, sync_on_reconnect, SyncReport};

#[cfg(test)]
pub mod test_helpers;
