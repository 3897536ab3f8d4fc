//! APIベースアドレスの決定
//!
//! 優先順位: `<meta name="summy-api-base">` → ビルド時の `SUMMY_API_BASE` → `/api`

use summy_common::{ApiRoutes, DEFAULT_API_BASE};

const META_SELECTOR: &str = "meta[name='summy-api-base']";

/// ページ設定からAPIのURL組み立てを作る
pub fn api_routes() -> ApiRoutes {
    let from_meta = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(META_SELECTOR).ok().flatten())
        .and_then(|el| el.get_attribute("content"));

    ApiRoutes::new(resolve_base(from_meta, option_env!("SUMMY_API_BASE")))
}

fn resolve_base(from_meta: Option<String>, from_build: Option<&str>) -> String {
    from_meta
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            from_build
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}
