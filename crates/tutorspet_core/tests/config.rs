use std::path::PathBuf;
use tutorspet_core::{ConfigError, CoreConfig};

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig::load(dir.path().join("absent.json")).unwrap();
    assert_eq!(config, CoreConfig::default());
}

#[test]
fn save_then_load_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = CoreConfig {
        data_db_path: PathBuf::from("/var/lib/tutorspet/data.db"),
        log_level: "warn".to_string(),
        log_dir: Some(dir.path().join("logs")),
    };

    config.save(&path).unwrap();
    assert_eq!(CoreConfig::load(&path).unwrap(), config);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["log_level"], "warn");
}

#[test]
fn unknown_log_level_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"log_level":"verbose"}"#).unwrap();

    assert!(matches!(
        CoreConfig::load(&path),
        Err(ConfigError::InvalidLogLevel(_))
    ));
}

#[test]
fn malformed_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(CoreConfig::load(&path), Err(ConfigError::Parse(_))));
}
