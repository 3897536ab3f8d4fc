//! 要約結果の形状判定と表示モデル
//!
//! バックエンドの応答は版によって形が異なる:
//! - 入れ子: `processing_result.accumulated_result.{Titolo, Sezioni}`
//!   と `processing_result.keywords_used`
//! - 平坦: オブジェクト直下の `Titolo` / `Sezioni`
//! - それ以外: 生のJSONとして保持
//!
//! 入れ子 → 平坦 → 生 の順に探る。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 要約が未選択・内容なしのときの表示
pub const PLACEHOLDER_TEXT: &str = "Nessun contenuto disponibile. Carica un file per iniziare.";

/// セクションが見つからないときの表示
pub const NO_SECTIONS_TEXT: &str = "Nessuna sezione trovata.";

/// 要約の1セクション
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sezione {
    #[serde(default)]
    pub titolo: String,
    #[serde(default)]
    pub contenuto: String,
}

impl Sezione {
    fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(map) => Sezione {
                titolo: get_text(map, "titolo").unwrap_or_default(),
                contenuto: get_text(map, "contenuto").unwrap_or_default(),
            },
            None => Sezione {
                titolo: String::new(),
                contenuto: text_of(value).unwrap_or_default(),
            },
        }
    }
}

/// 形状に依らない要約の中身
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryBody {
    pub title: Option<String>,
    /// `Sezioni` が無い・配列でない場合は `None`
    pub sections: Option<Vec<Sezione>>,
    pub keywords_used: Vec<String>,
}

impl SummaryBody {
    fn from_map(map: &Map<String, Value>, keywords: Option<&Value>) -> Self {
        let sections = map
            .get("Sezioni")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Sezione::from_value).collect());

        let keywords_used = keywords
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(text_of).collect())
            .unwrap_or_default();

        SummaryBody {
            title: get_text(map, "Titolo").filter(|t| !t.trim().is_empty()),
            sections,
            keywords_used,
        }
    }
}

/// 形状判定済みの要約結果
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryResult {
    Nested(SummaryBody),
    Flat(SummaryBody),
    Raw(Value),
}

impl SummaryResult {
    /// 生のJSONから形状を判定
    ///
    /// `{"document": {...}}`（文書取得APIの応答）は1段だけ外してから判定する。
    pub fn detect(value: &Value) -> Self {
        match probe(value) {
            SummaryResult::Raw(_) => match value.get("document") {
                Some(inner) if inner.is_object() => match probe(inner) {
                    SummaryResult::Raw(_) => SummaryResult::Raw(value.clone()),
                    found => found,
                },
                _ => SummaryResult::Raw(value.clone()),
            },
            found => found,
        }
    }

    pub fn body(&self) -> Option<&SummaryBody> {
        match self {
            SummaryResult::Nested(body) | SummaryResult::Flat(body) => Some(body),
            SummaryResult::Raw(_) => None,
        }
    }
}

fn probe(value: &Value) -> SummaryResult {
    let Some(map) = value.as_object() else {
        return SummaryResult::Raw(value.clone());
    };

    if let Some(processing) = map.get("processing_result").and_then(Value::as_object) {
        if let Some(accumulated) = processing.get("accumulated_result").and_then(Value::as_object) {
            return SummaryResult::Nested(SummaryBody::from_map(
                accumulated,
                processing.get("keywords_used"),
            ));
        }
    }

    if map.contains_key("Titolo") || map.contains_key("Sezioni") {
        return SummaryResult::Flat(SummaryBody::from_map(map, map.get("keywords_used")));
    }

    SummaryResult::Raw(value.clone())
}

/// セクション部分の表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionsView {
    List(Vec<Sezione>),
    NotFound,
}

/// ビューアの表示モデル
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    Placeholder,
    Content {
        keywords: Vec<String>,
        title: Option<String>,
        sections: SectionsView,
    },
}

/// 選択中の要約から表示モデルを作る（純粋関数）
pub fn summary_view(selected: Option<&Value>) -> SummaryView {
    let Some(value) = selected else {
        return SummaryView::Placeholder;
    };

    match SummaryResult::detect(value) {
        SummaryResult::Nested(body) | SummaryResult::Flat(body) => SummaryView::Content {
            keywords: body.keywords_used,
            title: body.title,
            sections: match body.sections {
                Some(list) => SectionsView::List(list),
                None => SectionsView::NotFound,
            },
        },
        SummaryResult::Raw(_) => SummaryView::Placeholder,
    }
}

/// 成功応答に埋め込まれた処理エラー
///
/// `processing_result.error` または `processing_result.accumulated_result.error` の文字列。
pub fn embedded_error(value: &Value) -> Option<String> {
    let processing = value.get("processing_result")?;
    [processing.get("error"), processing.get("accumulated_result").and_then(|a| a.get("error"))]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|m| !m.trim().is_empty())
        .map(str::to_string)
}

fn get_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(text_of)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
