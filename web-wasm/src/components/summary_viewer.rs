//! 要約の表示

use leptos::prelude::*;
use serde_json::Value;
use summy_common::summary::{NO_SECTIONS_TEXT, PLACEHOLDER_TEXT};
use summy_common::{summary_view, SectionsView, SummaryView};

#[component]
pub fn SummaryViewer(summary: ReadSignal<Option<Value>>) -> impl IntoView {
    view! {
        <section class="summary-viewer">
            {move || match summary.with(|s| summary_view(s.as_ref())) {
                SummaryView::Placeholder => view! {
                    <p class="placeholder">{PLACEHOLDER_TEXT}</p>
                }
                .into_any(),
                SummaryView::Content { keywords, title, sections } => view! {
                    <div class="summary-content">
                        {(!keywords.is_empty()).then(|| view! {
                            <p class="keywords-used">
                                <strong>"Parole chiave: "</strong>
                                {keywords.join(", ")}
                            </p>
                        })}
                        {title.map(|t| view! { <h2>{t}</h2> })}
                        {sections_view(sections)}
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}

fn sections_view(sections: SectionsView) -> AnyView {
    match sections {
        SectionsView::List(list) => list
            .into_iter()
            .map(|sezione| {
                view! {
                    <div class="section">
                        <h3>{sezione.titolo}</h3>
                        <p>{sezione.contenuto}</p>
                    </div>
                }
            })
            .collect_view()
            .into_any(),
        SectionsView::NotFound => view! { <p class="text-muted">{NO_SECTIONS_TEXT}</p> }.into_any(),
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn render(value: Value) -> web_sys::HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let parent: web_sys::HtmlElement = document.create_element("div").unwrap().unchecked_into();
        document.body().unwrap().append_child(&parent).unwrap();

        let handle = leptos::mount::mount_to(parent.clone(), move || {
            let (summary, _) = signal(Some(value));
            view! { <SummaryViewer summary=summary /> }
        });
        handle.forget();
        parent
    }

    #[wasm_bindgen_test]
    fn wasm_no_heading_without_title() {
        let parent = render(json!({"Sezioni": [{"titolo": "Uno", "contenuto": "A"}]}));
        assert!(parent.query_selector("h2").unwrap().is_none());
        assert!(parent.inner_html().contains("Uno"));
    }

    #[wasm_bindgen_test]
    fn wasm_heading_with_title() {
        let parent = render(json!({"Titolo": "Relazione", "Sezioni": []}));
        let heading = parent.query_selector("h2").unwrap().unwrap();
        assert_eq!(heading.text_content().as_deref(), Some("Relazione"));
    }
}
