// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::list::ListItem;
use chrono::DateTime;
use tempfile::tempdir;

fn sample_list(id: &str) -> List {
    let mut list = List::new(
        id.into(),
        "Groceries".into(),
        "alice".into(),
        DateTime::from_timestamp_millis(1_000).unwrap(),
    );
    list.items.push(ListItem::new("item-1".into(), "Milk".into()));
    list
}

#[test]
fn get_missing_item_is_none() {
    let storage = LocalStorage::open_in_memory().unwrap();
    assert_eq!(storage.get_item("absent").unwrap(), None);
}

#[test]
fn set_item_overwrites() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item("k", "one").unwrap();
    storage.set_item("k", "two").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn remove_item_reports_presence() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item("k", "v").unwrap();
    assert!(storage.remove_item("k").unwrap());
    assert!(!storage.remove_item("k").unwrap());
}

#[test]
fn lists_default_to_empty() {
    let storage = LocalStorage::open_in_memory().unwrap();
    assert!(storage.load_lists().unwrap().is_empty());
}

#[test]
fn lists_keep_needs_sync_flag() {
    let storage = LocalStorage::open_in_memory().unwrap();
    let mut list = sample_list("list-1");
    list.needs_sync = true;

    storage.save_lists(&[list.clone(), sample_list("list-2")]).unwrap();

    let loaded = storage.load_lists().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], list);
    assert!(!loaded[1].needs_sync);
}

#[test]
fn corrupted_value_is_reported() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item(LISTS_KEY, "not json").unwrap();
    let err = storage.load_lists().unwrap_err();
    assert!(matches!(err, Error::CorruptedData(_)));
}

#[test]
fn file_storage_persists_across_opens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("local.db");

    {
        let storage = LocalStorage::open(&path).unwrap();
        storage.save_lists(&[sample_list("list-1")]).unwrap();
    }

    let storage = LocalStorage::open(&path).unwrap();
    let loaded = storage.load_lists().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].items[0].name, "Milk");
}
