// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::test_helpers::{make_list, Fixture};
use sl_core::{Backend, Permission};

#[tokio::test]
async fn create_list_online_reaches_backend() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();

    let id = store.create_list("Groceries").await.unwrap();

    let list = store.get_list(&id).unwrap();
    assert!(id.starts_with("list-"));
    assert_eq!(list.owner, "alice");
    assert!(!list.needs_sync);
    assert_eq!(fx.remote_lists()[0].id, id);
}

#[tokio::test]
async fn create_list_offline_is_kept_locally() {
    let fx = Fixture::new("alice");
    fx.go_offline();
    let mut store = fx.lists_store();

    let id = store.create_list("Hardware").await.unwrap();

    assert!(store.get_list(&id).unwrap().needs_sync);
    assert!(fx.remote_lists().is_empty());
    assert_eq!(store.storage.load_lists().unwrap()[0].id, id);
}

#[tokio::test]
async fn create_list_insert_failure_marks_needs_sync() {
    let fx = Fixture::new("alice");
    fx.backend.set_reachable(false);
    let mut store = fx.lists_store();

    let id = store.create_list("Groceries").await.unwrap();

    assert!(store.get_list(&id).unwrap().needs_sync);
}

#[tokio::test]
async fn create_list_rejects_blank_name() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();

    let err = store.create_list("   ").await.unwrap_err();
    assert!(matches!(err, Error::FieldEmpty { .. }));
    assert!(store.lists().is_empty());
}

#[tokio::test]
async fn same_name_same_instant_gets_distinct_ids() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();

    let first = store.create_list("Groceries").await.unwrap();
    let second = store.create_list("Groceries").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(second, format!("{}-2", first));
}

#[tokio::test]
async fn fetch_lists_mirrors_remote_table() {
    let fx = Fixture::new("alice");
    fx.seed_remote(&make_list("list-1", "alice", 0)).await;
    let mut store = fx.lists_store();

    store.fetch_lists().await.unwrap();
    assert_eq!(store.lists().len(), 1);

    fx.seed_remote(&make_list("list-2", "alice", 0)).await;
    assert_eq!(store.poll().await.unwrap(), 1);
    assert_eq!(store.lists().len(), 2);
    assert_eq!(store.storage.load_lists().unwrap().len(), 2);
}

#[tokio::test]
async fn fetch_lists_twice_keeps_one_mirror() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();

    store.fetch_lists().await.unwrap();
    store.fetch_lists().await.unwrap();

    assert_eq!(store.mirror_count(), 1);
}

#[tokio::test]
async fn fetch_lists_offline_loads_local_copy() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    store
        .storage
        .save_lists(&[make_list("list-local", "alice", 0)])
        .unwrap();
    fx.go_offline();

    store.fetch_lists().await.unwrap();

    assert_eq!(store.lists()[0].id, "list-local");
    assert_eq!(store.mirror_count(), 0);
}

#[tokio::test]
async fn own_mirror_echo_does_not_duplicate() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    store.fetch_lists().await.unwrap();

    let id = store.create_list("Groceries").await.unwrap();
    store.poll().await.unwrap();

    assert_eq!(store.lists().len(), 1);
    assert_eq!(store.lists()[0].id, id);
}

#[tokio::test]
async fn fetch_shared_lists_mirrors_granted_row() {
    let bob = Fixture::new("bob");
    bob.seed_remote(&make_list("list-shared", "bob", 0)).await;
    bob.seed_remote(&make_list("list-private", "bob", 0)).await;
    bob.backend
        .grant("alice", Permission::row(LISTS_TABLE, "list-shared"))
        .await
        .unwrap();

    let alice = Fixture::on(&bob.service, "alice");
    let mut store = alice.lists_store();
    assert_eq!(store.fetch_shared_lists().await.unwrap(), 1);

    assert_eq!(store.shared_lists().len(), 1);
    assert_eq!(store.shared_lists()[0].id, "list-shared");
    assert!(store.my_lists().is_empty());
}

#[tokio::test]
async fn watch_shared_mirrors_new_grants_on_poll() {
    let bob = Fixture::new("bob");
    let alice = Fixture::on(&bob.service, "alice");
    let mut store = alice.lists_store();
    store.watch_shared().await.unwrap();
    assert!(store.is_watching_shares());

    bob.seed_remote(&make_list("list-shared", "bob", 0)).await;
    bob.backend
        .grant("alice", Permission::row(LISTS_TABLE, "list-shared"))
        .await
        .unwrap();

    store.poll().await.unwrap();
    assert_eq!(store.shared_lists().len(), 1);

    // Owner edits flow through the new mirror.
    let mut edited = make_list("list-shared", "bob", 50);
    edited.name = "Renamed by bob".to_string();
    bob.seed_remote(&edited).await;
    store.poll().await.unwrap();
    assert_eq!(store.get_list("list-shared").unwrap().name, "Renamed by bob");
}

#[tokio::test]
async fn guest_edit_reaches_host_table() {
    let bob = Fixture::new("bob");
    bob.seed_remote(&make_list("list-shared", "bob", 0)).await;
    bob.backend
        .grant("alice", Permission::row(LISTS_TABLE, "list-shared"))
        .await
        .unwrap();

    let alice = Fixture::on(&bob.service, "alice");
    let mut store = alice.lists_store();
    store.fetch_shared_lists().await.unwrap();

    let item_id = store.add_item("list-shared", "Eggs").await.unwrap();

    assert!(!store.get_list("list-shared").unwrap().needs_sync);
    assert!(bob.remote_lists()[0].has_item(&item_id));
}

#[tokio::test]
async fn rename_and_archive_stamp_and_push() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let id = store.create_list("Groceries").await.unwrap();
    let created_at = store.get_list(&id).unwrap().last_updated;

    fx.advance_secs(10);
    store.rename_list(&id, "Weekly shop").await.unwrap();
    store.set_archived(&id, true).await.unwrap();

    let list = store.get_list(&id).unwrap();
    assert_eq!(list.name, "Weekly shop");
    assert!(list.archived);
    assert!(list.last_updated > created_at);
    let remote = &fx.remote_lists()[0];
    assert_eq!(remote.name, "Weekly shop");
    assert!(remote.archived);
}

#[tokio::test]
async fn update_unknown_list_is_not_found() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();

    let err = store.rename_list("list-missing", "x").await.unwrap_err();
    assert!(matches!(err, Error::ListNotFound(_)));
}

#[tokio::test]
async fn delete_list_removes_local_and_remote() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let id = store.create_list("Groceries").await.unwrap();

    let removed = store.delete_list(&id).await.unwrap();

    assert_eq!(removed.id, id);
    assert!(store.lists().is_empty());
    assert!(fx.remote_lists().is_empty());
    assert!(store.storage.load_lists().unwrap().is_empty());
}

#[tokio::test]
async fn delete_list_remote_failure_still_removes_locally() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let id = store.create_list("Groceries").await.unwrap();
    fx.backend.set_reachable(false);

    store.delete_list(&id).await.unwrap();

    assert!(store.lists().is_empty());
    fx.restore_backend();
    assert_eq!(fx.remote_lists().len(), 1);
}

#[tokio::test]
async fn item_lifecycle_online() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let list_id = store.create_list("Groceries").await.unwrap();

    let milk = store.add_item(&list_id, "Milk").await.unwrap();
    let bread = store.add_item(&list_id, "Bread").await.unwrap();
    assert!(milk.starts_with("item-"));

    let item = store.get_item(&list_id, &milk).unwrap();
    assert_eq!(item.price, 0.0);
    assert_eq!(item.quantity, 0.0);
    assert!(!item.checked);

    assert!(store.toggle_item(&list_id, &milk).await.unwrap());
    let patch = ItemPatch {
        quantity: Some(2.0),
        vendor: Some("Bakery".to_string()),
        ..ItemPatch::default()
    };
    store.edit_item(&list_id, &bread, &patch).await.unwrap();
    store.delete_item(&list_id, &milk).await.unwrap();

    let remote = &fx.remote_lists()[0];
    assert_eq!(remote.items.len(), 1);
    assert_eq!(remote.items[0].vendor, "Bakery");
    assert_eq!(remote.items[0].quantity, 2.0);
}

#[tokio::test]
async fn item_edit_offline_marks_needs_sync() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let list_id = store.create_list("Groceries").await.unwrap();
    fx.go_offline();

    store.add_item(&list_id, "Milk").await.unwrap();

    assert!(store.get_list(&list_id).unwrap().needs_sync);
    assert!(fx.service.documents("alice", LISTS_TABLE)[0]["items"]
        .as_array()
        .unwrap()
        .is_empty());
    assert_eq!(store.storage.load_lists().unwrap()[0].items.len(), 1);
}

#[tokio::test]
async fn update_item_replaces_in_place() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let list_id = store.create_list("Groceries").await.unwrap();
    let first = store.add_item(&list_id, "Milk").await.unwrap();
    store.add_item(&list_id, "Bread").await.unwrap();

    let mut item = store.get_item(&list_id, &first).unwrap().clone();
    item.notes = "semi-skimmed".to_string();
    store.update_item(&list_id, item).await.unwrap();

    let list = store.get_list(&list_id).unwrap();
    assert_eq!(list.items[0].id, first);
    assert_eq!(list.items[0].notes, "semi-skimmed");
}

#[tokio::test]
async fn missing_item_is_reported() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let list_id = store.create_list("Groceries").await.unwrap();

    let err = store.delete_item(&list_id, "item-nope").await.unwrap_err();
    assert!(matches!(err, Error::ItemNotFound { .. }));
    let err = store.toggle_item(&list_id, "item-nope").await.unwrap_err();
    assert!(matches!(err, Error::ItemNotFound { .. }));
}

#[tokio::test]
async fn empty_patch_is_rejected() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let list_id = store.create_list("Groceries").await.unwrap();
    let item_id = store.add_item(&list_id, "Milk").await.unwrap();

    let err = store
        .edit_item(&list_id, &item_id, &ItemPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn checked_and_unchecked_are_newest_first() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let list_id = store.create_list("Groceries").await.unwrap();
    let a = store.add_item(&list_id, "A").await.unwrap();
    let b = store.add_item(&list_id, "B").await.unwrap();
    let c = store.add_item(&list_id, "C").await.unwrap();
    let d = store.add_item(&list_id, "D").await.unwrap();
    store.set_checked(&list_id, &a, true).await.unwrap();
    store.set_checked(&list_id, &c, true).await.unwrap();

    let checked: Vec<_> = store.checked_items(&list_id).iter().map(|i| i.id.clone()).collect();
    let unchecked: Vec<_> = store
        .unchecked_items(&list_id)
        .iter()
        .map(|i| i.id.clone())
        .collect();
    assert_eq!(checked, vec![c, a]);
    assert_eq!(unchecked, vec![d, b]);
    assert!(store.checked_items("list-unknown").is_empty());
}

#[tokio::test]
async fn remove_needs_sync_clears_flags() {
    let fx = Fixture::new("alice");
    fx.go_offline();
    let mut store = fx.lists_store();
    store.create_list("A").await.unwrap();
    store.create_list("B").await.unwrap();

    assert_eq!(store.unsynced_lists().len(), 2);
    assert_eq!(store.remove_needs_sync(), 2);
    assert!(store.unsynced_lists().is_empty());
}

#[tokio::test]
async fn offline_items_are_pushed_on_reconnect() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    let list_id = store.create_list("Groceries").await.unwrap();

    fx.go_offline();
    fx.advance_secs(5);
    let offline_list = store.create_list("Hardware").await.unwrap();
    let item_id = store.add_item(&list_id, "Milk").await.unwrap();

    fx.restore_backend();
    fx.connectivity.set_online(true);
    let report = store.sync_on_reconnect().await.unwrap();

    assert_eq!(report.pushed, 2);
    assert!(store.unsynced_lists().is_empty());
    let remote = fx.remote_lists();
    assert_eq!(remote.len(), 2);
    assert!(remote.iter().any(|l| l.id == offline_list));
    assert!(remote
        .iter()
        .find(|l| l.id == list_id)
        .unwrap()
        .has_item(&item_id));
}

#[tokio::test]
async fn sync_while_offline_is_an_error() {
    let fx = Fixture::new("alice");
    fx.go_offline();
    let mut store = fx.lists_store();

    let err = store.sync_on_reconnect().await.unwrap_err();
    assert!(matches!(err, Error::Offline { .. }));
}

#[tokio::test]
async fn stop_mirrors_drops_subscriptions() {
    let fx = Fixture::new("alice");
    let mut store = fx.lists_store();
    store.fetch_lists().await.unwrap();
    store.watch_shared().await.unwrap();

    store.stop_mirrors();

    assert_eq!(store.mirror_count(), 0);
    assert!(!store.is_watching_shares());
}
