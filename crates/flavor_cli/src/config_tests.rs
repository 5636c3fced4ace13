use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();

    assert_eq!(config.log_level, "info");
    assert_eq!(config.base_path, "spec.template.spec");
    assert_eq!(config.conflict_policy, ConflictPolicy::Reject);
}

#[test]
fn test_app_config_load_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("flavorctl.toml");
    fs::write(&config_path, "conflict_policy = \"warn\"\n").expect("Failed to write config");

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(config.conflict_policy, ConflictPolicy::Warn);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.base_path, "spec.template.spec");
}

#[test]
fn test_app_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid_config.toml");
    fs::write(&config_path, "invalid = toml = syntax").expect("Failed to write invalid TOML");

    let result = AppConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Failed to parse configuration file"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_unknown_policy() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("flavorctl.toml");
    fs::write(&config_path, "conflict_policy = \"ignore\"\n").expect("Failed to write config");

    assert!(matches!(
        AppConfig::load(&config_path),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_app_config_load_nonexistent_file() {
    let nonexistent_path = PathBuf::from("nonexistent_flavorctl.toml");
    let result = AppConfig::load(&nonexistent_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Configuration file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_resolve_explicit_missing_file_is_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.toml");

    assert!(AppConfig::resolve(Some(&missing)).is_err());
}

#[test]
fn test_resolve_explicit_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "log_level = \"debug\"\n").expect("Failed to write config");

    let config = AppConfig::resolve(Some(&config_path)).expect("Failed to resolve config");

    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_app_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("flavorctl.toml");
    let original = AppConfig {
        log_level: "trace".to_string(),
        base_path: "spec".to_string(),
        conflict_policy: ConflictPolicy::Warn,
    };

    original.save(&config_path).expect("Failed to save config");
    let loaded = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(loaded, original);
}

#[test]
fn test_get_config_path() {
    assert_eq!(get_config_path(None), PathBuf::from("flavorctl.toml"));
    assert_eq!(
        get_config_path(Some(Path::new("/etc/flavorctl.toml"))),
        PathBuf::from("/etc/flavorctl.toml")
    );
}
