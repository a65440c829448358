// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn generate_id_format() {
    let id = generate_id(LIST_PREFIX, "alice/Groceries", &fixed_time());
    assert!(id.starts_with("list-"));
    assert_eq!(id.len(), "list-".len() + 8);
    assert!(id["list-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_id_is_deterministic() {
    let a = generate_id(ITEM_PREFIX, "milk", &fixed_time());
    let b = generate_id(ITEM_PREFIX, "milk", &fixed_time());
    assert_eq!(a, b);
}

#[test]
fn generate_id_differs_by_seed_and_time() {
    let base = generate_id(ITEM_PREFIX, "milk", &fixed_time());
    let other_seed = generate_id(ITEM_PREFIX, "eggs", &fixed_time());
    let later = generate_id(
        ITEM_PREFIX,
        "milk",
        &(fixed_time() + chrono::Duration::nanoseconds(1)),
    );
    assert_ne!(base, other_seed);
    assert_ne!(base, later);
}

#[test]
fn generate_unique_id_without_collision() {
    let id = generate_unique_id(LIST_PREFIX, "seed", &fixed_time(), |_| false);
    assert_eq!(id, generate_id(LIST_PREFIX, "seed", &fixed_time()));
}

#[test]
fn generate_unique_id_appends_suffix() {
    let base = generate_id(LIST_PREFIX, "seed", &fixed_time());
    let taken = [base.clone(), format!("{}-2", base)];
    let id = generate_unique_id(LIST_PREFIX, "seed", &fixed_time(), |candidate| {
        taken.iter().any(|t| t == candidate)
    });
    assert_eq!(id, format!("{}-3", base));
}
