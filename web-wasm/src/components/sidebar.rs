//! 履歴（storico）サイドバー

use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;

use summy_common::history::EMPTY_HISTORY_TEXT;
use summy_common::{history_items, ApiRoutes, HistoryItem, HistoryState};

use crate::api::client;

#[component]
pub fn Sidebar<F>(routes: ApiRoutes, on_select: F) -> impl IntoView
where
    F: Fn(Value) + 'static + Clone + Send + Sync,
{
    let routes = StoredValue::new(routes);
    let (state, set_state) = signal(HistoryState::Loading);

    let reload = move || {
        set_state.set(HistoryState::Loading);
        spawn_local(async move {
            let response = client::get_history(&routes.get_value()).await;
            set_state.set(HistoryState::from_response(response));
        });
    };

    // 表示時に1回だけ取得
    reload();

    let delete_entry = move |id: String| {
        if !gloo::dialogs::confirm("Eliminare questo riassunto?") {
            return;
        }
        spawn_local(async move {
            match client::delete_document(&routes.get_value(), &id).await {
                Ok(_) => reload(),
                Err(e) => gloo::dialogs::alert(&e.user_message()),
            }
        });
    };

    let clear_history = move |_: MouseEvent| {
        if !gloo::dialogs::confirm("Eliminare tutti i riassunti?") {
            return;
        }
        spawn_local(async move {
            match client::clear_all(&routes.get_value()).await {
                Ok(_) => reload(),
                Err(e) => gloo::dialogs::alert(&e.user_message()),
            }
        });
    };

    let render_item = move |item: HistoryItem, on_select: F| {
        let HistoryItem { label, id, entry, .. } = item;
        let select = on_select.clone();
        let open = id.clone().map(|id| {
            let on_select = on_select.clone();
            view! {
                <button
                    class="btn btn-small btn-secondary"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        let id = id.clone();
                        let on_select = on_select.clone();
                        spawn_local(async move {
                            match client::get_document(&routes.get_value(), &id).await {
                                Ok(document) => on_select(document),
                                Err(e) => gloo::dialogs::alert(&e.user_message()),
                            }
                        });
                    }
                >
                    "Apri"
                </button>
            }
        });
        let remove = id.map(|id| {
            view! {
                <button
                    class="btn btn-small btn-tertiary"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        delete_entry(id.clone());
                    }
                >
                    "Elimina"
                </button>
            }
        });

        view! {
            <li class="history-item" on:click=move |_| select(entry.clone())>
                <span class="history-label">{label}</span>
                <span class="history-actions">{open}{remove}</span>
            </li>
        }
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>"Storico"</h2>
                <button
                    class="btn btn-small btn-tertiary"
                    disabled=move || state.with(HistoryState::is_loading)
                    on:click=clear_history
                >
                    "Svuota"
                </button>
            </div>
            {move || match state.get() {
                HistoryState::Loading => view! {
                    <p class="text-muted">"Caricamento..."</p>
                }
                .into_any(),
                HistoryState::Error(message) => view! {
                    <p class="error">{format!("Errore: {}", message)}</p>
                }
                .into_any(),
                HistoryState::Loaded(entries) if entries.is_empty() => view! {
                    <p class="text-muted">{EMPTY_HISTORY_TEXT}</p>
                }
                .into_any(),
                HistoryState::Loaded(entries) => {
                    let on_select = on_select.clone();
                    view! {
                        <ul class="history-list">
                            {history_items(&entries)
                                .into_iter()
                                .map(|item| render_item(item, on_select.clone()))
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </aside>
    }
}
