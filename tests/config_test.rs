//! 設定ファイルテスト
//!
//! 保存・読み込みとエンドポイントの優先順位を検証

use photo_predict::config::Config;
use photo_predict::error::PhotoPredictError;
use photo_predict_common::{ClientVariant, DEFAULT_ENDPOINT};
use tempfile::tempdir;

/// 設定ファイルがなければ既定値
#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config, Config::default());
    assert_eq!(config.resolve_endpoint_with(None, None), DEFAULT_ENDPOINT);
}

/// 保存して読み直す
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_endpoint("http://gpu-box:5000/predict".to_string()).unwrap();
    config.set_timeout(15).unwrap();
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded.endpoint.as_deref(), Some("http://gpu-box:5000/predict"));
    assert_eq!(loaded.timeout_seconds, 15);
}

/// timeout_seconds がない古い設定ファイル
#[test]
fn test_load_without_timeout_field() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"endpoint": null}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.timeout_seconds, photo_predict_common::DEFAULT_TIMEOUT_SECONDS);
}

/// 壊れたJSON
#[test]
fn test_load_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, PhotoPredictError::JsonParse(_)));
}

/// CLIフラグ > 環境変数 > 設定ファイル
#[test]
fn test_endpoint_precedence() {
    let config = Config {
        endpoint: Some("http://from-file/predict".into()),
        ..Config::default()
    };

    assert_eq!(config.resolve_endpoint_with(None, None), "http://from-file/predict");
    assert_eq!(
        config.resolve_endpoint_with(None, Some("http://from-env/predict")),
        "http://from-env/predict"
    );
    assert_eq!(
        config.resolve_endpoint_with(Some("http://from-cli/predict"), Some("http://from-env/predict")),
        "http://from-cli/predict"
    );
    assert_eq!(config.resolve_endpoint_with(None, Some("  ")), "http://from-file/predict");
}

/// 不正なURLは保存しない
#[test]
fn test_set_endpoint_rejects_non_http() {
    let mut config = Config::default();
    let err = config.set_endpoint("ftp://example.com".to_string()).unwrap_err();

    assert!(matches!(err, PhotoPredictError::Common(_)));
    assert_eq!(config.endpoint, None);
}

#[test]
fn test_set_timeout_rejects_zero() {
    let mut config = Config::default();
    assert!(matches!(config.set_timeout(0), Err(PhotoPredictError::Config(_))));
}

/// コントローラ用の設定
#[test]
fn test_client_config() {
    let config = Config {
        endpoint: Some("http://from-file/predict".into()),
        timeout_seconds: 5,
    };
    let client_config = config.client_config(ClientVariant::Single, Some("http://cli/predict"));

    assert_eq!(client_config.variant, ClientVariant::Single);
    assert_eq!(client_config.endpoint, "http://cli/predict");
    assert_eq!(client_config.timeout_seconds, 5);
}
