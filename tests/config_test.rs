//! 設定ファイルのテスト

use summy::config::{Config, DEFAULT_API_BASE};
use tempfile::tempdir;

/// ファイルがなければ既定値
#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert!(config.require_keywords);
    assert_eq!(config.upload_timeout_seconds, 600);
}

/// 保存して読み戻す（親ディレクトリも作る）
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("summy").join("config.json");

    let mut config = Config::default();
    config.set_api_base("https://summy.example.com/api".into()).unwrap();
    config.require_keywords = false;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

/// 一部の項目だけのファイルは残りを既定値で補う
#[test]
fn test_partial_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"require_keywords": false}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.require_keywords);
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.upload_timeout().as_secs(), 600);
}

/// 壊れたJSONはエラー
#[test]
fn test_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

/// `--api-base` は設定ファイルより優先
#[test]
fn test_flag_overrides_file() {
    let config = Config {
        api_base: "http://from-file/api".into(),
        ..Config::default()
    };
    assert_eq!(config.resolve_api_base(Some("http://from-flag/api")), "http://from-flag/api");
}
