//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use std::path::PathBuf;
use summy::error::SummyError;
use summy::files;
use summy_common::{Error, ValidationError};

/// 存在しないパスを指定した場合
#[test]
fn test_collect_nonexistent_path() {
    let result = files::collect_files(&[PathBuf::from("/nonexistent/path/12345")]);
    let err = result.unwrap_err();
    assert!(matches!(err, SummyError::FileNotFound(_)));
    assert!(err.to_string().contains("/nonexistent/path/12345"));
}

/// SummyErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SummyError::Config("テスト設定エラー".to_string()),
        SummyError::FileNotFound("test.pdf".to_string()),
        SummyError::NoFilesFound("/path/to/folder".to_string()),
        SummyError::Cancelled,
        SummyError::Prompt("not a terminal".to_string()),
        SummyError::Api(Error::Timeout),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 共通エラーはメッセージをそのまま見せる
#[test]
fn test_api_error_is_transparent() {
    let err: SummyError = Error::Http {
        status: 400,
        message: "Nessun file selezionato".into(),
    }
    .into();
    assert_eq!(err.to_string(), "Nessun file selezionato");
}

/// 入力チェックのエラーも変換できる
#[test]
fn test_validation_error_conversion() {
    let err: SummyError = ValidationError::NoKeywords.into();
    assert!(matches!(err, SummyError::Api(Error::Validation(ValidationError::NoKeywords))));
    assert_eq!(err.to_string(), "Inserisci almeno una parola chiave");
}

/// JSONエラーの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
    let err: SummyError = json_err.into();
    assert!(matches!(err, SummyError::JsonParse(_)));
}

/// IOエラーの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: SummyError = io_err.into();
    assert!(matches!(err, SummyError::Io(_)));
}
