// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Realtime change events emitted by backend subscriptions.
//!
//! A change carries the document before and after the mutation:
//! - added: only `new_doc`
//! - updated: both
//! - deleted: only `old_doc`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a [`Change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Added => "added",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        };
        write!(f, "{}", s)
    }
}

/// A single document change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change<T> {
    pub new_doc: Option<T>,
    pub old_doc: Option<T>,
}

impl<T> Change<T> {
    pub fn added(doc: T) -> Self {
        Change {
            new_doc: Some(doc),
            old_doc: None,
        }
    }

    pub fn updated(old_doc: T, new_doc: T) -> Self {
        Change {
            new_doc: Some(new_doc),
            old_doc: Some(old_doc),
        }
    }

    pub fn deleted(doc: T) -> Self {
        Change {
            new_doc: None,
            old_doc: Some(doc),
        }
    }

    /// Returns `None` for a change carrying neither document.
    pub fn kind(&self) -> Option<ChangeKind> {
        match (&self.new_doc, &self.old_doc) {
            (Some(_), None) => Some(ChangeKind::Added),
            (Some(_), Some(_)) => Some(ChangeKind::Updated),
            (None, Some(_)) => Some(ChangeKind::Deleted),
            (None, None) => None,
        }
    }

    /// Converts both documents with a fallible function.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Change<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Change {
            new_doc: self.new_doc.map(&mut f).transpose()?,
            old_doc: self.old_doc.map(&mut f).transpose()?,
        })
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
