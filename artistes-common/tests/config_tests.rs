//! Tests for TOML config file loading
//!
//! Missing files fall back to defaults; malformed files are reported.
//! Tests that touch `XDG_CONFIG_HOME` are marked with #[serial] so they
//! do not race with each other.

use artistes_common::config::{load_toml_config, ConfigOverrides, ServiceConfig};
use artistes_common::Error;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_explicit_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        data_file = "/var/lib/artistes/artistes.json"
        host = "0.0.0.0"
        port = 8081
        "#,
    )
    .unwrap();

    let toml = load_toml_config(Some(&path)).unwrap().expect("config should load");
    let config = ServiceConfig::resolve(ConfigOverrides::default(), Some(toml));

    assert_eq!(
        config.data_file,
        PathBuf::from("/var/lib/artistes/artistes.json")
    );
    assert_eq!(config.bind_addr(), "0.0.0.0:8081");
}

#[test]
fn test_missing_explicit_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = load_toml_config(Some(&path)).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = \"not a number\"").unwrap();

    let err = load_toml_config(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {:?}", err);
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_under_xdg_config_home() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("artistes");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "port = 6060").unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let loaded = load_toml_config(None);

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    let toml = loaded.unwrap().expect("config should load from XDG_CONFIG_HOME");
    assert_eq!(toml.port, Some(6060));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_absent_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let loaded = load_toml_config(None);

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert!(loaded.unwrap().is_none());
}
