use dayplan_config::{AppConfig, TimeFormat};

#[test]
fn test_load_creates_default_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.json");
    assert!(!path.exists());

    let config = AppConfig::load_or_create(&path);
    assert!(path.exists());
    assert_eq!(config.log_level, "info");

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(parsed.is_object());
}

#[test]
fn test_load_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.json");
    let json = r#"{
        "log_level": "debug",
        "target_languages": ["pt", "ja"],
        "time_format": "12h",
        "autosave_enabled": false
    }"#;
    std::fs::write(&path, json).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.target_languages, vec!["pt", "ja"]);
    assert_eq!(config.time_format, TimeFormat::H12);
    assert!(!config.autosave_enabled);
}

#[test]
fn test_broken_json_returns_defaults_and_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.json");
    std::fs::write(&path, "{ not json").unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.log_level, "info");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_loaded_config_is_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.json");
    std::fs::write(
        &path,
        r#"{"log_level": "verbose", "target_languages": ["EN", "en", "De"]}"#,
    )
    .unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.target_languages, vec!["en", "de"]);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.json");

    let mut config = AppConfig::default();
    config.time_format = TimeFormat::H12;
    config.autosave_path = dir.path().join("auto.json").display().to_string();
    config.save(&path).unwrap();

    let loaded = AppConfig::load_or_create(&path);
    assert_eq!(loaded.time_format, TimeFormat::H12);
    assert_eq!(loaded.autosave_file(), dir.path().join("auto.json"));
}

#[test]
fn test_load_reports_broken_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.json");
    std::fs::write(&path, "{broken").unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!dir.path().join("absent.json").exists());
}
