//! バックエンドAPIの契約
//!
//! エンドポイントのURL組み立て、エラー本文からのメッセージ抽出、
//! 応答本文の型をまとめる。通信そのものはブラウザ版（fetch）と
//! CLI版（reqwest）がそれぞれ実装する。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// ブラウザ版の既定APIベース（同一オリジンのプロキシ）
pub const DEFAULT_API_BASE: &str = "/api";

/// マルチパートのファイルフィールド名
pub const FILES_FIELD: &str = "files";

/// マルチパートのキーワードフィールド名
pub const KEYWORDS_FIELD: &str = "keywords";

/// APIのURL組み立て
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoutes {
    base: String,
}

impl ApiRoutes {
    /// ベースアドレスを指定して作成（末尾の `/` は除去）
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn upload(&self) -> String {
        format!("{}/upload", self.base)
    }

    pub fn history(&self) -> String {
        format!("{}/storico", self.base)
    }

    /// 文書単位のURL（IDはパスセグメントとしてエンコード）
    pub fn document(&self, id: &str) -> String {
        format!("{}/documents/{}", self.base, urlencoding::encode(id))
    }

    pub fn clear(&self) -> String {
        format!("{}/clear", self.base)
    }

    pub fn health(&self) -> String {
        format!("{}/health", self.base)
    }
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// 2xx以外の応答本文から表示メッセージを取り出す
///
/// `{"error": "..."}` 形式ならその文字列、それ以外はステータスからの汎用メッセージ。
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status))
}

/// 2xx以外の応答をエラーに変換
pub fn http_error(status: u16, body: &str) -> Error {
    Error::Http {
        status,
        message: error_message(status, body),
    }
}

/// 成功応答の本文をJSONとして読む
pub fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))
}

/// 履歴応答の封筒を外す
///
/// `{"documents": [...]}` ならその配列を返し、それ以外は手を加えない。
/// 配列でない応答の判定はサイドバー側で行う。
pub fn unwrap_history(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("documents").is_some_and(Value::is_array) => {
            map.remove("documents").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// 削除・全消去の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl Ack {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// ヘルスチェックの応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =============================================
    // URL組み立て
    // =============================================

    #[test]
    fn test_routes_relative_base() {
        let routes = ApiRoutes::default();
        assert_eq!(routes.upload(), "/api/upload");
        assert_eq!(routes.history(), "/api/storico");
        assert_eq!(routes.document("summary_0"), "/api/documents/summary_0");
        assert_eq!(routes.clear(), "/api/clear");
        assert_eq!(routes.health(), "/api/health");
    }

    #[test]
    fn test_routes_absolute_base_trailing_slash() {
        let routes = ApiRoutes::new("http://localhost:5000/api/");
        assert_eq!(routes.base(), "http://localhost:5000/api");
        assert_eq!(routes.upload(), "http://localhost:5000/api/upload");
    }

    #[test]
    fn test_document_id_is_encoded() {
        let routes = ApiRoutes::new("/api");
        assert_eq!(routes.document("a b/c"), "/api/documents/a%20b%2Fc");
    }

    // =============================================
    // エラーメッセージ抽出
    // =============================================

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"error": "Tipo di file non supportato: a.exe"}"#;
        assert_eq!(error_message(400, body), "Tipo di file non supportato: a.exe");
    }

    #[test]
    fn test_error_message_generic_when_body_not_json() {
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "HTTP error! status: 502");
    }

    #[test]
    fn test_error_message_generic_when_error_missing_or_blank() {
        assert_eq!(error_message(500, r#"{"detail": "x"}"#), "HTTP error! status: 500");
        assert_eq!(error_message(500, r#"{"error": "  "}"#), "HTTP error! status: 500");
    }

    #[test]
    fn test_http_error_keeps_status() {
        let err = http_error(404, r#"{"error": "Documento non trovato"}"#);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Documento non trovato");
    }

    #[test]
    fn test_parse_body_invalid() {
        assert!(matches!(parse_body("not json"), Err(Error::Decode(_))));
    }

    // =============================================
    // 履歴の封筒
    // =============================================

    #[test]
    fn test_unwrap_history_envelope() {
        let body = json!({"status": "success", "documents": [{"id": "summary_0"}], "total": 1});
        assert_eq!(unwrap_history(body), json!([{"id": "summary_0"}]));
    }

    #[test]
    fn test_unwrap_history_plain_array_untouched() {
        let body = json!([{"timestamp": "2024-05-01T10:00:00"}]);
        assert_eq!(unwrap_history(body.clone()), body);
    }

    #[test]
    fn test_unwrap_history_non_list_untouched() {
        let body = json!({"status": "success", "documents": "oops"});
        assert_eq!(unwrap_history(body.clone()), body);
    }

    #[test]
    fn test_ack_and_health_tolerate_missing_fields() {
        let ack = Ack::from_value(json!({"status": "success"})).unwrap();
        assert_eq!(ack.status, "success");
        assert!(ack.message.is_empty());

        let health = HealthStatus::from_value(json!({"status": "ok", "message": "Server is running"})).unwrap();
        assert!(health.is_ok());
        assert!(!HealthStatus::default().is_ok());
    }
}
