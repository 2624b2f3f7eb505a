use jarvis_core::{default_log_level, AppConfig, ConfigError};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults_next_to_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.data_dir, dir.path().join("data"));
    assert_eq!(config.log_dir, dir.path().join("logs"));
    assert_eq!(config.log_level, default_log_level());
    assert!(!path.exists());
}

#[test]
fn relative_paths_resolve_against_config_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"data_dir":"books","log_level":"debug"}"#).unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.data_dir, dir.path().join("books"));
    assert_eq!(config.log_dir, dir.path().join("logs"));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn absolute_paths_are_kept() {
    let dir = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let config = AppConfig {
        data_dir: elsewhere.path().join("data"),
        log_dir: elsewhere.path().join("logs"),
        log_level: "warn".to_string(),
    };

    config.save(&path).unwrap();
    let loaded = AppConfig::load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    AppConfig::default().save(&path).unwrap();
    let loaded = AppConfig::load(&path).unwrap();

    assert_eq!(loaded.data_dir, dir.path().join("nested").join("data"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "data_dir = 'books'").unwrap();

    let err = AppConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { path: ref failed, .. } if *failed == path));
    assert!(err.to_string().starts_with("malformed config"));
}

#[test]
fn relative_config_path_resolves_against_working_directory() {
    let config = AppConfig::load(&PathBuf::from("definitely-missing-config.json")).unwrap();
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(config.data_dir, cwd.join("data"));
}
