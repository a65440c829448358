// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[test]
fn add_with_fields_shows_in_list() {
    let temp = init_temp();
    let list_id = create_list(temp.path(), "Groceries");

    shoplist()
        .args(["item", "add", &list_id, "Eggs", "-q", "12", "-v", "Farm", "-p", "3.5"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Added item-"));

    shoplist()
        .args(["list", "show", &list_id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Eggs  x12  @Farm  $3.5"));
}

#[test]
fn check_moves_item_to_done() {
    let temp = init_temp();
    let list_id = create_list(temp.path(), "Groceries");
    let item_id = add_item(temp.path(), &list_id, "Milk");

    shoplist()
        .args(["item", "check", &list_id, &item_id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Checked {}", item_id)));

    shoplist()
        .args(["list", "show", &list_id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Done:\n  [x] {}  Milk", item_id)));
}

#[test]
fn edit_and_rm() {
    let temp = init_temp();
    let list_id = create_list(temp.path(), "Groceries");
    let item_id = add_item(temp.path(), &list_id, "Milk");

    shoplist()
        .args(["item", "edit", &list_id, &item_id, "--name", "Oat milk", "-n", "barista"])
        .current_dir(temp.path())
        .assert()
        .success();
    shoplist()
        .args(["list", "show", &list_id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Oat milk"))
        .stdout(predicate::str::contains("      barista"));

    shoplist()
        .args(["item", "rm", &list_id, &item_id])
        .current_dir(temp.path())
        .assert()
        .success();
    shoplist()
        .args(["list", "show", &list_id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(no items)"));
}

#[test]
fn edit_without_changes_fails() {
    let temp = init_temp();
    let list_id = create_list(temp.path(), "Groceries");
    let item_id = add_item(temp.path(), &list_id, "Milk");

    shoplist()
        .args(["item", "edit", &list_id, &item_id])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn negative_quantity_is_rejected() {
    let temp = init_temp();
    let list_id = create_list(temp.path(), "Groceries");

    shoplist()
        .args(["item", "add", &list_id, "Milk", "-q", "-1"])
        .current_dir(temp.path())
        .assert()
        .failure();
}
