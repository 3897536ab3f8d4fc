//! ヘッダーコンポーネント（バックエンドの稼働表示つき）

use leptos::prelude::*;
use summy_common::ApiRoutes;
use wasm_bindgen_futures::spawn_local;

use crate::api::client;

#[component]
pub fn Header(routes: ApiRoutes) -> impl IntoView {
    // None: 確認中
    let (online, set_online) = signal(None::<bool>);

    spawn_local(async move {
        let ok = client::health_check(&routes)
            .await
            .map(|status| status.is_ok())
            .unwrap_or(false);
        set_online.set(Some(ok));
    });

    view! {
        <header class="header">
            <h1>"Summy - Riassunti di documenti"</h1>
            <span class=move || format!("health-badge {}", health_class(online.get()))>
                {move || health_label(online.get())}
            </span>
        </header>
    }
}

fn health_class(online: Option<bool>) -> &'static str {
    match online {
        None => "checking",
        Some(true) => "online",
        Some(false) => "offline",
    }
}

fn health_label(online: Option<bool>) -> &'static str {
    match online {
        None => "Verifica del server...",
        Some(true) => "Server attivo",
        Some(false) => "Server non raggiungibile",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_states() {
        assert_eq!(health_class(None), "checking");
        assert_eq!(health_class(Some(true)), "online");
        assert_eq!(health_label(Some(false)), "Server non raggiungibile");
    }
}
