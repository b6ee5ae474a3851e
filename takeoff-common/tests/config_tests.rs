//! Configuration resolution tests
//!
//! Tests that touch process environment variables run serially.

use serial_test::serial;
use std::path::{Path, PathBuf};

use takeoff_common::config::{self, TomlConfig};
use takeoff_common::Error;

fn toml_with(root: Option<&str>, key: Option<&str>) -> TomlConfig {
    TomlConfig {
        root_folder: root.map(str::to_string),
        gemini_api_key: key.map(str::to_string),
    }
}

#[test]
#[serial]
fn test_cli_arg_takes_priority() {
    std::env::set_var(config::ROOT_FOLDER_ENV, "/tmp/from-env");

    let resolved = config::resolve_root_folder(
        Some(Path::new("/tmp/from-cli")),
        &toml_with(Some("/tmp/from-toml"), None),
    );

    std::env::remove_var(config::ROOT_FOLDER_ENV);
    assert_eq!(resolved, PathBuf::from("/tmp/from-cli"));
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    std::env::set_var(config::ROOT_FOLDER_ENV, "/tmp/from-env");

    let resolved = config::resolve_root_folder(None, &toml_with(Some("/tmp/from-toml"), None));

    std::env::remove_var(config::ROOT_FOLDER_ENV);
    assert_eq!(resolved, PathBuf::from("/tmp/from-env"));
}

#[test]
#[serial]
fn test_toml_root_folder_used_when_no_cli_or_env() {
    std::env::remove_var(config::ROOT_FOLDER_ENV);

    let resolved = config::resolve_root_folder(None, &toml_with(Some("/tmp/from-toml"), None));

    assert_eq!(resolved, PathBuf::from("/tmp/from-toml"));
}

#[test]
#[serial]
fn test_default_root_folder_is_nonempty() {
    std::env::remove_var(config::ROOT_FOLDER_ENV);

    let resolved = config::resolve_root_folder(None, &TomlConfig::default());

    assert!(!resolved.as_os_str().is_empty());
}

#[test]
#[serial]
fn test_api_key_env_beats_toml() {
    std::env::set_var(config::API_KEY_ENV, "env-key");

    let key = config::resolve_api_key(&toml_with(None, Some("toml-key"))).unwrap();

    std::env::remove_var(config::API_KEY_ENV);
    assert_eq!(key, "env-key");
}

#[test]
#[serial]
fn test_api_key_toml_fallback() {
    std::env::remove_var(config::API_KEY_ENV);

    let key = config::resolve_api_key(&toml_with(None, Some("toml-key"))).unwrap();

    assert_eq!(key, "toml-key");
}

#[test]
#[serial]
fn test_api_key_missing_fails() {
    std::env::remove_var(config::API_KEY_ENV);

    let result = config::resolve_api_key(&TomlConfig::default());

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_api_key_whitespace_is_invalid() {
    std::env::set_var(config::API_KEY_ENV, "   ");

    let result = config::resolve_api_key(&TomlConfig::default());

    std::env::remove_var(config::API_KEY_ENV);
    assert!(result.is_err());
}

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "root_folder = \"/srv/takeoff\"\ngemini_api_key = \"abc123\"\n",
    )
    .unwrap();

    let config = TomlConfig::load_from(&path).unwrap();

    assert_eq!(config.root_folder.as_deref(), Some("/srv/takeoff"));
    assert_eq!(config.gemini_api_key.as_deref(), Some("abc123"));
}

#[test]
fn test_load_malformed_toml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = [not toml").unwrap();

    assert!(matches!(
        TomlConfig::load_from(&path),
        Err(Error::Config(_))
    ));
}
