// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn shoplist() -> Command {
    cargo_bin_cmd!("shoplist")
}

/// Helper to create an initialized temp directory backed by a mock remote
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    shoplist()
        .args(["init", "--user", "alice", "--remote", "mock:backend.json"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to create an initialized temp directory in local-only mode
pub fn init_temp_local() -> TempDir {
    let temp = TempDir::new().unwrap();
    shoplist()
        .args(["init", "--user", "alice", "--local"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to initialize `dir` as `user` against a shared snapshot file
pub fn init_shared(dir: &Path, user: &str, snapshot: &Path) {
    let remote = format!("mock:{}", snapshot.display());
    shoplist()
        .args(["init", "--user", user, "--remote", &remote])
        .current_dir(dir)
        .assert()
        .success();
}

fn find_token(stdout: &[u8], prefix: &str) -> String {
    String::from_utf8_lossy(stdout)
        .split_whitespace()
        .find(|s| s.starts_with(prefix))
        .unwrap()
        .trim_end_matches(':')
        .to_string()
}

/// Helper to create a list and return its ID
pub fn create_list(dir: &Path, name: &str) -> String {
    let output = shoplist()
        .args(["list", "new", name])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    find_token(&output.stdout, "list-")
}

/// Helper to add an item and return its ID
pub fn add_item(dir: &Path, list_id: &str, name: &str) -> String {
    let output = shoplist()
        .args(["item", "add", list_id, name])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    find_token(&output.stdout, "item-")
}
