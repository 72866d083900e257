// ==========================
// tests/unit/config_tests.rs
// ==========================
//! Unit tests for the config module
use backend_lib::config::{HasherSettings, Settings};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_settings_default() {
    let settings = Settings::default();
    assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(settings.platform, "prod");
    assert_eq!(settings.log_level, "info");
    assert_eq!(settings.log_format, "text");
    assert_eq!(settings.filepath_root, PathBuf::from("."));
    assert_eq!(settings.request_timeout_secs, 30);
    assert!(settings.db_url.is_none());
    assert_eq!(
        settings.hasher,
        HasherSettings {
            log_n: 17,
            r: 8,
            p: 1
        }
    );

    // secrets have no usable default
    assert!(settings.validate().is_err());
}

#[test]
fn test_load_from_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("chirpy.toml");
    std::fs::write(
        &config_path,
        r#"
        bind_addr = "127.0.0.1:3000"
        platform = "dev"
        jwt_secret = "file-secret"
        polka_key = "file-key"
        log_format = "json"
        filepath_root = "public"
        "#,
    )
    .unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.log_format, "json");
    assert_eq!(settings.filepath_root, PathBuf::from("public"));
}

#[test]
fn test_load_rejects_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("chirpy.toml");
    std::fs::write(
        &config_path,
        r#"
        platform = "dev"
        jwt_secret = "file-secret"
        polka_key = "file-key"
        log_format = "yaml"
        "#,
    )
    .unwrap();

    assert!(Settings::load_from(&config_path).is_err());
}
