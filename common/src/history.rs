//! 履歴（storico）サイドバーの表示ロジック
//!
//! 履歴の項目には一意なキーが保証されないため、表示キーは位置から作る。
//! 選択時は生の項目をそのまま親へ渡す。

use std::fmt::Display;

use serde_json::Value;

/// 履歴が空のときの表示
pub const EMPTY_HISTORY_TEXT: &str = "Nessun riassunto ancora.";

/// 応答が配列でないときのメッセージ
pub const MALFORMED_HISTORY_TEXT: &str = "Formato dello storico non valido";

/// ラベルに使うタイムスタンプの文字数（"YYYY-MM-DDTHH:MM"）
const TIMESTAMP_LABEL_LEN: usize = 16;

/// サイドバーの表示状態
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Loading,
    Error(String),
    Loaded(Vec<Value>),
}

impl HistoryState {
    /// 取得結果から表示状態を決める
    ///
    /// 配列 → Loaded（空でも可）、配列以外 → Error、失敗 → Error
    pub fn from_response<E: Display>(response: Result<Value, E>) -> Self {
        match response {
            Ok(Value::Array(items)) => HistoryState::Loaded(items),
            Ok(other) => {
                tracing::warn!(kind = value_kind(&other), "history response is not a list");
                HistoryState::Error(MALFORMED_HISTORY_TEXT.to_string())
            }
            Err(e) => HistoryState::Error(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, HistoryState::Loading)
    }
}

/// 表示用の履歴項目
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    /// 位置から作った表示キー
    pub key: usize,
    pub label: String,
    /// 削除に使うID（あれば）
    pub id: Option<String>,
    /// 選択時に渡す生の項目
    pub entry: Value,
}

/// 表示用の項目列を作る
pub fn history_items(entries: &[Value]) -> Vec<HistoryItem> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryItem {
            key: index,
            label: entry_label(entry, index),
            id: entry_id(entry),
            entry: entry.clone(),
        })
        .collect()
}

/// 項目のラベル
///
/// 優先順位: `Titolo` → `timestamp` の先頭16文字 → `filename` → 位置
pub fn entry_label(entry: &Value, index: usize) -> String {
    if let Some(title) = non_blank_str(entry, "Titolo") {
        return title.to_string();
    }
    if let Some(timestamp) = non_blank_str(entry, "timestamp") {
        return timestamp.chars().take(TIMESTAMP_LABEL_LEN).collect();
    }
    if let Some(filename) = non_blank_str(entry, "filename") {
        return filename.to_string();
    }
    format!("Riassunto #{}", index + 1)
}

/// 項目のID（文字列または数値）
pub fn entry_id(entry: &Value) -> Option<String> {
    match entry.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank_str<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =============================================
    // 表示状態
    // =============================================

    #[test]
    fn test_state_empty_list_is_loaded() {
        let state = HistoryState::from_response::<String>(Ok(json!([])));
        assert_eq!(state, HistoryState::Loaded(vec![]));
    }

    #[test]
    fn test_state_non_list_is_error() {
        let state = HistoryState::from_response::<String>(Ok(json!({"status": "success"})));
        assert_eq!(state, HistoryState::Error(MALFORMED_HISTORY_TEXT.to_string()));
    }

    #[test]
    fn test_state_rejected_fetch_is_error() {
        let state = HistoryState::from_response::<String>(Err("HTTP error! status: 500".into()));
        assert_eq!(state, HistoryState::Error("HTTP error! status: 500".to_string()));
        assert!(!state.is_loading());
    }

    // =============================================
    // ラベル
    // =============================================

    #[test]
    fn test_label_prefers_title() {
        let entry = json!({"Titolo": "Verbale", "timestamp": "2024-05-01T10:00:00.123"});
        assert_eq!(entry_label(&entry, 0), "Verbale");
    }

    #[test]
    fn test_label_truncates_timestamp() {
        let entry = json!({"timestamp": "2024-05-01T10:00:00.123"});
        assert_eq!(entry_label(&entry, 0), "2024-05-01T10:00");
    }

    #[test]
    fn test_label_short_timestamp_kept() {
        let entry = json!({"timestamp": "2024-05-01"});
        assert_eq!(entry_label(&entry, 0), "2024-05-01");
    }

    #[test]
    fn test_label_filename_then_position() {
        assert_eq!(entry_label(&json!({"filename": "summary_2.json"}), 0), "summary_2.json");
        assert_eq!(entry_label(&json!({"Titolo": ""}), 2), "Riassunto #3");
        assert_eq!(entry_label(&json!("raw"), 0), "Riassunto #1");
    }

    #[test]
    fn test_entry_id() {
        assert_eq!(entry_id(&json!({"id": "summary_0"})), Some("summary_0".to_string()));
        assert_eq!(entry_id(&json!({"id": 7})), Some("7".to_string()));
        assert_eq!(entry_id(&json!({"id": ""})), None);
        assert_eq!(entry_id(&json!({})), None);
    }

    #[test]
    fn test_items_keep_raw_entry_and_positional_key() {
        let entries = vec![json!({"timestamp": "2024-05-01T10:00:00"}), json!({"id": "x"})];
        let items = history_items(&entries);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, 0);
        assert_eq!(items[1].key, 1);
        assert_eq!(items[0].entry, entries[0]);
        assert_eq!(items[1].id.as_deref(), Some("x"));
        assert_eq!(items[1].label, "Riassunto #2");
    }
}
