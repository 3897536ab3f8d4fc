//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use serde_json::Value;
use summy_common::SubmitRules;

use crate::components::{
    file_uploader::FileUploader, header::Header, sidebar::Sidebar, summary_viewer::SummaryViewer,
};
use crate::config;

/// メインアプリケーションコンポーネント
///
/// 選択中の要約だけを持ち、履歴の選択とアップロード結果の両方で差し替える。
#[component]
pub fn App() -> impl IntoView {
    let routes = config::api_routes();
    let (summary, set_summary) = signal(None::<Value>);
    let show_summary = move |value: Value| set_summary.set(Some(value));

    view! {
        <div class="app">
            <Header routes=routes.clone() />
            <div class="layout">
                <Sidebar routes=routes.clone() on_select=show_summary />
                <main class="main-content">
                    <FileUploader
                        routes=routes
                        rules=SubmitRules::default()
                        on_uploaded=show_summary
                    />
                    <SummaryViewer summary=summary />
                </main>
            </div>
        </div>
    }
}
