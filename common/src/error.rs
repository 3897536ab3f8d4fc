//! エラー型定義
//!
//! 入力チェック・通信・サーバ応答の各エラーをまとめる。
//! 表示用メッセージはUIの言語（イタリア語）で持つ。

use thiserror::Error;

/// 送信前の入力チェックで検出されるエラー
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Seleziona almeno un file da caricare")]
    NoFiles,

    #[error("Inserisci almeno una parola chiave")]
    NoKeywords,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Errore di rete: {0}")]
    Network(String),

    /// クライアント側タイムアウトによる中断
    #[error("Tempo scaduto: l'elaborazione ha richiesto troppo tempo. Prova con file più piccoli.")]
    Timeout,

    /// 2xx以外の応答（本文の `error` またはステータスからの汎用メッセージ）
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Risposta non valida: {0}")]
    Decode(String),

    /// 200応答だが本文に `error` が入っている（処理側の失敗）
    #[error("{0}")]
    Processing(String),
}

impl Error {
    /// 利用者に見せる文言
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// タイムアウトによる中断か
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }

    /// HTTPステータス（サーバエラーの場合のみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_differs_from_network() {
        let timeout = Error::Timeout.to_string();
        let network = Error::Network("failed to fetch".into()).to_string();
        assert_ne!(timeout, network);
        assert!(timeout.contains("file più piccoli"));
    }

    #[test]
    fn test_http_display_is_message() {
        let error = Error::Http {
            status: 400,
            message: "Nessun file fornito".to_string(),
        };
        assert_eq!(error.to_string(), "Nessun file fornito");
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn test_validation_from() {
        let error: Error = ValidationError::NoKeywords.into();
        assert!(matches!(error, Error::Validation(ValidationError::NoKeywords)));
        assert_eq!(error.to_string(), "Inserisci almeno una parola chiave");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_decode_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Decode(_)));
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_is_timeout() {
        assert!(Error::Timeout.is_timeout());
        assert!(!Error::Network("x".into()).is_timeout());
    }
}
