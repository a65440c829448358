// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_init_and_load_config() {
    let temp = TempDir::new().unwrap();
    let config = Config::new("alice").unwrap();
    let data_dir = init_data_dir(temp.path(), &config).unwrap();

    let loaded = Config::load(&data_dir).unwrap();
    assert_eq!(loaded.user, "alice");
    assert_eq!(loaded.app_id, "shoplist");
    assert_eq!(loaded.notification_ttl_secs, 5);
    assert!(!loaded.is_remote_mode());
}

#[test]
fn test_empty_user_rejected() {
    assert!(matches!(
        Config::new("  "),
        Err(Error::FieldEmpty { field: "user" })
    ));
}

#[test]
fn test_already_initialized() {
    let temp = TempDir::new().unwrap();
    let config = Config::new("alice").unwrap();
    init_data_dir(temp.path(), &config).unwrap();

    let result = init_data_dir(temp.path(), &config);
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("already initialized"));
    }
}

#[test]
fn test_init_succeeds_with_empty_data_dir() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".shoplist")).unwrap();

    let config = Config::new("alice").unwrap();
    assert!(init_data_dir(temp.path(), &config).is_ok());
}

#[test]
fn test_defaults_fill_missing_fields() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "user = \"bob\"\n\n[remote]\nurl = \"mock:shared.json\"\n",
    )
    .unwrap();

    let config = Config::load(temp.path()).unwrap();
    assert_eq!(config.user, "bob");
    assert_eq!(config.app_id, "shoplist");
    assert_eq!(config.notification_ttl_secs, 5);
    assert_eq!(config.remote_url(), Some("mock:shared.json"));
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILE_NAME), "user = [").unwrap();

    let err = Config::load(temp.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[parameterized(
    mock_relative = { "mock:backend.json", true },
    mock_absolute = { "mock:/tmp/backend.json", true },
    mock_empty = { "mock:", false },
    websocket = { "ws://localhost:7890", false },
    bare_path = { "backend.json", false },
)]
fn test_validate_url(url: &str, valid: bool) {
    let remote = RemoteConfig {
        url: url.to_string(),
    };
    assert_eq!(remote.validate_url().is_none(), valid);
}

#[test]
fn test_mock_path_relative_to_project_root() {
    let remote = RemoteConfig {
        url: "mock:backend.json".to_string(),
    };
    let path = remote.mock_path(Path::new("/project/.shoplist")).unwrap();
    assert_eq!(path, PathBuf::from("/project/backend.json"));
}

#[test]
fn test_mock_path_absolute() {
    let remote = RemoteConfig {
        url: "mock:/srv/backend.json".to_string(),
    };
    let path = remote.mock_path(Path::new("/project/.shoplist")).unwrap();
    assert_eq!(path, PathBuf::from("/srv/backend.json"));
}

#[test]
fn test_local_db_path() {
    assert_eq!(
        local_db_path(Path::new("/project/.shoplist")),
        PathBuf::from("/project/.shoplist/local.db")
    );
}
