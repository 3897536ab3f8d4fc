//! ファイル・キーワード入力とアップロード

use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, File, FileList, HtmlInputElement, KeyboardEvent, MouseEvent};

use summy_common::{
    run_upload, settle, ApiRoutes, ProgressSimulation, ProgressState, SelectedFile, SubmitRules,
    UploadDraft, UploadEvent, UploadPhase, ValidationError, UPLOAD_TIMEOUT,
};

use crate::api::client;
use crate::components::progress_bar::ProgressBar;

#[component]
pub fn FileUploader<F>(
    routes: ApiRoutes,
    rules: SubmitRules,
    on_uploaded: F,
) -> impl IntoView
where
    F: Fn(Value) + 'static + Clone + Send + Sync,
{
    // web_sys::File はスレッド間で送れないためローカル保存
    let draft = RwSignal::new_local(UploadDraft::<File>::new());
    let (keyword, set_keyword) = signal(String::new());
    let (phase, set_phase) = signal(UploadPhase::Idle);
    let (progress, set_progress) = signal(ProgressState::idle());
    let (is_dragover, set_is_dragover) = signal(false);

    let loading = move || phase.get().is_busy();
    let advance = move |event: UploadEvent| set_phase.update(|p| *p = p.advance(event));

    let add_files = move |files: FileList| {
        let selected: Vec<SelectedFile<File>> = (0..files.length())
            .filter_map(|i| files.get(i))
            .map(|file| SelectedFile::new(file.name(), file))
            .collect();
        draft.update(|d| {
            d.add_files(selected);
        });
    };

    let on_file_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            add_files(files);
        }
        // 同じファイルを選び直せるように空にする
        input.set_value("");
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if loading() {
            return;
        }
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            add_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !loading() {
            set_is_dragover.set(true);
        }
    };

    let add_keyword = move || {
        let input = keyword.get_untracked();
        draft.update(|d| {
            d.add_keyword(&input);
        });
        set_keyword.set(String::new());
    };

    let on_keyword_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            add_keyword();
        }
    };

    let on_submit = move |_: MouseEvent| {
        if phase.get_untracked().is_busy() {
            return;
        }
        advance(UploadEvent::Submit);

        let mut prepared = None;
        draft.update(|d| prepared = Some(d.prepare(rules)));
        let request = match prepared {
            Some(Ok(request)) => request,
            Some(Err(error)) => {
                advance(UploadEvent::Invalid);
                // キーワード不足は欄のエラー表示のみ
                if error == ValidationError::NoFiles {
                    gloo::dialogs::alert(&error.to_string());
                }
                return;
            }
            None => {
                advance(UploadEvent::Invalid);
                return;
            }
        };
        advance(UploadEvent::Valid);

        let routes = routes.clone();
        let on_uploaded = on_uploaded.clone();
        spawn_local(async move {
            let simulation = ProgressSimulation::default();
            let outcome = run_upload(
                request,
                &simulation,
                UPLOAD_TIMEOUT,
                |req| client::upload_files(&routes, req),
                gloo::timers::future::sleep,
                |p| set_progress.set(p),
            )
            .await;

            match outcome {
                Ok(result) => {
                    draft.update(|d| d.finish_success());
                    on_uploaded(result);
                    advance(UploadEvent::Completed);
                }
                Err(error) => {
                    advance(UploadEvent::Failed);
                    gloo::dialogs::alert(&error.user_message());
                }
            }

            settle(gloo::timers::future::sleep, |p| set_progress.set(p)).await;
            advance(UploadEvent::Settled);
        });
    };

    view! {
        <div class="uploader">
            <label
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    if loading() {
                        classes.push("disabled");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
            >
                <input
                    type="file"
                    multiple=true
                    class="hidden-input"
                    disabled=loading
                    on:change=on_file_change
                />
                <div class="upload-icon">"📄"</div>
                <p>"Trascina qui i file oppure clicca per selezionarli"</p>
                <p class="text-muted">"PDF, documenti, fogli di calcolo, immagini, audio e video"</p>
            </label>

            <ul class="file-list">
                {move || {
                    draft
                        .with(|d| d.file_names())
                        .into_iter()
                        .enumerate()
                        .map(|(index, name)| {
                            view! {
                                <li class="file-item">
                                    <span>{name}</span>
                                    <button
                                        class="btn btn-small btn-tertiary"
                                        disabled=loading
                                        on:click=move |_| draft.update(|d| {
                                            d.remove_file(index);
                                        })
                                    >
                                        "Rimuovi"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>

            <div class="form-group">
                <label for="keyword">"Parole chiave"</label>
                <div class="keyword-input">
                    <input
                        type="text"
                        id="keyword"
                        placeholder="Aggiungi una parola chiave e premi Invio"
                        disabled=loading
                        prop:value=move || keyword.get()
                        on:input=move |ev| set_keyword.set(event_target_value(&ev))
                        on:keydown=on_keyword_keydown
                    />
                    <button
                        class="btn btn-secondary btn-small"
                        disabled=loading
                        on:click=move |_| add_keyword()
                    >
                        "Aggiungi"
                    </button>
                </div>
                {move || {
                    draft
                        .with(|d| d.keyword_error().map(str::to_string))
                        .map(|message| view! { <p class="field-error">{message}</p> })
                }}
                <div class="keyword-chips">
                    {move || {
                        draft
                            .with(|d| d.keywords().to_vec())
                            .into_iter()
                            .enumerate()
                            .map(|(index, word)| {
                                view! {
                                    <span class="chip">
                                        {word}
                                        <button
                                            class="chip-remove"
                                            disabled=loading
                                            on:click=move |_| draft.update(|d| {
                                                d.remove_keyword(index);
                                            })
                                        >
                                            "×"
                                        </button>
                                    </span>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>

            <button class="btn btn-primary" disabled=loading on:click=on_submit>
                {move || if loading() { "Elaborazione in corso..." } else { "Carica e riassumi" }}
            </button>

            <Show when=move || loading() || !progress.with(ProgressState::is_idle)>
                <ProgressBar progress=progress />
            </Show>
        </div>
    }
}
