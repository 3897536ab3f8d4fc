//! 端末向けの表示

use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::Value;
use summy_common::history::EMPTY_HISTORY_TEXT;
use summy_common::summary::{NO_SECTIONS_TEXT, PLACEHOLDER_TEXT};
use summy_common::{HistoryItem, SectionsView, SummaryView};

/// 要約の表示
pub fn render_summary(view: &SummaryView) -> String {
    let SummaryView::Content { keywords, title, sections } = view else {
        return PLACEHOLDER_TEXT.to_string();
    };

    let mut out = String::new();
    if !keywords.is_empty() {
        out.push_str(&format!("Parole chiave: {}\n\n", keywords.join(", ")));
    }
    if let Some(title) = title {
        out.push_str(&format!("# {}\n\n", title));
    }
    match sections {
        SectionsView::List(list) => {
            for sezione in list {
                out.push_str(&format!("## {}\n{}\n\n", sezione.titolo, sezione.contenuto));
            }
        }
        SectionsView::NotFound => {
            out.push_str(NO_SECTIONS_TEXT);
            out.push('\n');
        }
    }
    out.trim_end().to_string()
}

/// 履歴一覧の表示（1行1件）
pub fn render_history(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return EMPTY_HISTORY_TEXT.to_string();
    }

    items
        .iter()
        .map(|item| {
            let mut line = format!("{:>3}. {}", item.key + 1, item.label);
            if let Some(id) = &item.id {
                line.push_str(&format!("  [id: {}]", id));
            }
            if let Some(created) = item.entry.get("created_at").and_then(format_created_at) {
                line.push_str(&format!("  ({})", created));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 作成日時をローカル時刻で表示
///
/// エポック秒（小数可）、RFC3339、またはタイムゾーンなしのISO形式を受け付ける。
fn format_created_at(value: &Value) -> Option<String> {
    if let Some(epoch) = value.as_f64() {
        let secs = epoch.floor();
        let nanos = ((epoch - secs) * 1e9) as u32;
        return DateTime::from_timestamp(secs as i64, nanos)
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string());
    }
    let raw = value.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}
