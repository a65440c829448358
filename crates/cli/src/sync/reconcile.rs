// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use serde_json::Value;
use sl_core::merge::{self, Resolution};
use sl_core::mirror;
use sl_core::{Backend, List, TableRef, LISTS_TABLE};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Outcome of one reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Local lists written to the backend.
    pub pushed: usize,
    /// Remote lists adopted or appended locally.
    pub pulled: usize,
    /// Local lists dropped because the backend no longer has them.
    pub removed: usize,
    /// Pushes that failed; those lists keep `needs_sync`.
    pub failed: usize,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        *self == SyncReport::default()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pushed, {} pulled, {} removed, {} failed",
            self.pushed, self.pulled, self.removed, self.failed
        )
    }
}

/// Fetches remote state and reconciles `lists` against it in place.
///
/// A failed fetch aborts the pass before anything local changes.
pub async fn sync_on_reconnect(
    backend: &dyn Backend,
    user_id: &str,
    lists: &mut Vec<List>,
) -> Result<SyncReport> {
    let remote = fetch_remote_lists(backend).await?;
    let report = reconcile(backend, user_id, lists, remote).await;
    info!("Sync finished: {}", report);
    Ok(report)
}

/// The account's own lists followed by every list shared with it.
pub async fn fetch_remote_lists(backend: &dyn Backend) -> Result<Vec<List>> {
    let mut remote = Vec::new();
    decode_into(
        &mut remote,
        backend.get_all(&TableRef::own(LISTS_TABLE)).await?,
    );

    let grants = backend.list_shared().await?;
    for grant in grants.iter().filter(|g| g.applies_to(LISTS_TABLE)) {
        let table = TableRef::hosted_by(LISTS_TABLE, &grant.host_id);
        let docs = match grant.row_id() {
            Some(row_id) => backend
                .get_one(&table, row_id)
                .await?
                .into_iter()
                .collect(),
            None => backend.get_all(&table).await?,
        };
        decode_into(&mut remote, docs);
    }
    Ok(remote)
}

fn decode_into(lists: &mut Vec<List>, docs: Vec<Value>) {
    for doc in docs {
        match List::from_document(doc) {
            Ok(list) => {
                mirror::upsert(lists, list);
            }
            Err(e) => warn!("Skipping undecodable remote list: {}", e),
        }
    }
}

/// Merges `remote` into `lists`, pushing local winners to the backend.
///
/// Local order is kept; remote-only lists are appended in remote order.
pub async fn reconcile(
    backend: &dyn Backend,
    user_id: &str,
    lists: &mut Vec<List>,
    mut remote: Vec<List>,
) -> SyncReport {
    let mut report = SyncReport::default();
    let local = std::mem::take(lists);
    let mut merged = Vec::with_capacity(local.len() + remote.len());

    for mut list in local {
        let counterpart = remote
            .iter()
            .position(|r| r.id == list.id)
            .map(|index| remote.remove(index));

        match counterpart {
            None if !list.is_owned_by(user_id) => {
                debug!("Dropping stale shared list {}", list.id);
                report.removed += 1;
            }
            None if list.needs_sync => {
                push_into(backend, user_id, &mut list, &mut report).await;
                merged.push(list);
            }
            None => {
                debug!("List {} was deleted remotely", list.id);
                report.removed += 1;
            }
            Some(remote_list) => match merge::resolve(&list, &remote_list) {
                Resolution::PushLocal => {
                    push_into(backend, user_id, &mut list, &mut report).await;
                    merged.push(list);
                }
                Resolution::KeepRemote => {
                    list.needs_sync = false;
                    if list != remote_list {
                        report.pulled += 1;
                    }
                    merged.push(remote_list);
                }
            },
        }
    }

    report.pulled += remote.len();
    merged.extend(remote);
    *lists = merged;
    report
}

/// Writes `list` to its owner's table, recording the outcome.
async fn push_into(
    backend: &dyn Backend,
    user_id: &str,
    list: &mut List,
    report: &mut SyncReport,
) {
    let table = TableRef::for_owner(LISTS_TABLE, &list.owner, user_id);
    let result = match list.to_document() {
        Ok(doc) => backend.replace(&table, doc).await.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    match result {
        Ok(()) => {
            list.needs_sync = false;
            report.pushed += 1;
        }
        Err(e) => {
            warn!("Failed to push list {}: {}", list.id, e);
            list.needs_sync = true;
            report.failed += 1;
        }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
