// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document id generation.
//!
//! Ids are generated client-side so that lists and items created offline
//! keep their identity once they reach the backend.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Prefix for list ids.
pub const LIST_PREFIX: &str = "list";

/// Prefix for item ids.
pub const ITEM_PREFIX: &str = "item";

/// Generate an id from prefix, seed, and timestamp.
/// Format: {prefix}-{hash} where hash is first 8 hex chars of SHA256(seed + timestamp)
pub fn generate_id(prefix: &str, seed: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!(
        "{}{}",
        seed,
        created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    );
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!("{}-{}", prefix, short_hash)
}

/// Generate an id that `exists` does not report as taken, appending an
/// incrementing suffix on collision.
pub fn generate_unique_id<F>(
    prefix: &str,
    seed: &str,
    created_at: &DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_id(prefix, seed, created_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
