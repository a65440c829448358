// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Last-write-wins resolution between a local and a remote copy.
//!
//! Merge rules:
//! - the copy with the strictly greater `last_updated` wins
//! - ties keep the remote copy
//!
//! Whole documents are compared; there is no field-level merge.

use chrono::{DateTime, Utc};

/// A document carrying a client-stamped modification time.
pub trait Timestamped {
    fn last_updated(&self) -> DateTime<Utc>;
}

/// Outcome of comparing a local copy against the remote one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The remote copy is canonical; adopt it locally.
    KeepRemote,
    /// The local copy is newer; push it as the canonical remote value.
    PushLocal,
}

/// Decides which copy is canonical.
pub fn resolve<T: Timestamped + ?Sized>(local: &T, remote: &T) -> Resolution {
    if local.last_updated() > remote.last_updated() {
        Resolution::PushLocal
    } else {
        Resolution::KeepRemote
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
