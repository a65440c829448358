// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transient user-facing messages.
//!
//! A message is visible from the moment it is added until its TTL runs
//! out. Expiry is evaluated against the time passed in, so the store
//! never reads a clock itself.

use chrono::{DateTime, Duration, Utc};

/// Default time a message stays visible.
pub const DEFAULT_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NotificationsStore {
    ttl: Duration,
    next_id: u64,
    notifications: Vec<Notification>,
}

impl Default for NotificationsStore {
    fn default() -> Self {
        NotificationsStore::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl NotificationsStore {
    pub fn new(ttl: Duration) -> Self {
        NotificationsStore {
            ttl,
            next_id: 0,
            notifications: Vec::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Queues a message and returns its id.
    pub fn add(&mut self, level: Level, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        self.next_id += 1;
        self.notifications.push(Notification {
            id: self.next_id,
            level,
            message: message.into(),
            created_at: now,
        });
        self.next_id
    }

    /// Drops expired messages, returning how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.notifications.len();
        let ttl = self.ttl;
        self.notifications.retain(|n| n.created_at + ttl > now);
        before - self.notifications.len()
    }

    /// Messages still visible at `now`, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.created_at + self.ttl > now)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
