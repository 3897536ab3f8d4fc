//! バックエンドAPI呼び出し（fetch）
//!
//! 1エンドポイント1関数。2xx以外・通信失敗はエラーにし、
//! 画面への表示は呼び出し側に任せる。

use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Request, RequestInit, RequestMode, Response};

use summy_common::api::{self, FILES_FIELD, KEYWORDS_FIELD};
use summy_common::{Ack, ApiRoutes, Error, HealthStatus, Result, UploadRequest};

/// 破棄されたらfetchを中断する
///
/// タイムアウトで送信Futureが捨てられた場合に通信も止める。
struct AbortOnDrop(Option<AbortController>);

impl AbortOnDrop {
    fn disarm(&mut self) {
        self.0 = None;
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(controller) = self.0.take() {
            controller.abort();
        }
    }
}

fn js_error(e: JsValue) -> Error {
    let message = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    Error::Network(message)
}

fn log_failure(context: &str, error: &Error) {
    gloo::console::error!(format!("{}: {}", context, error));
}

/// fetch呼び出し（共通処理）
async fn call_api(
    method: &str,
    url: &str,
    body: Option<&JsValue>,
    controller: Option<&AbortController>,
) -> Result<Value> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(body);
    }
    if let Some(controller) = controller {
        opts.set_signal(Some(&controller.signal()));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let window = web_sys::window().ok_or_else(|| Error::Network("window non disponibile".into()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        let text = read_text(&resp).await.unwrap_or_default();
        return Err(api::http_error(resp.status(), &text));
    }

    let json = JsFuture::from(resp.json().map_err(js_error)?)
        .await
        .map_err(|e| Error::Decode(format!("{:?}", e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Decode(e.to_string()))
}

async fn read_text(resp: &Response) -> Option<String> {
    let promise = resp.text().ok()?;
    JsFuture::from(promise).await.ok()?.as_string()
}

/// 送信用のフォーム（ファイル1件ごとに `files`、キーワード1件ごとに `keywords`）
fn build_form(request: &UploadRequest<File>) -> Result<FormData> {
    let form = FormData::new().map_err(js_error)?;
    for file in &request.files {
        form.append_with_blob_and_filename(FILES_FIELD, &file.content, &file.name)
            .map_err(js_error)?;
    }
    for keyword in &request.keywords {
        form.append_with_str(KEYWORDS_FIELD, keyword).map_err(js_error)?;
    }
    Ok(form)
}

/// ファイルとキーワードを送信し、要約結果を受け取る
///
pub async fn upload_files(routes: &ApiRoutes, request: UploadRequest<File>) -> Result<Value> {
    let body: JsValue = build_form(&request)?.into();

    let controller = AbortController::new().map_err(js_error)?;
    let mut guard = AbortOnDrop(Some(controller.clone()));
    let result = call_api("POST", &routes.upload(), Some(&body), Some(&controller)).await;
    guard.disarm();

    result.inspect_err(|e| log_failure("Errore durante l'upload", e))
}

/// 履歴一覧（`documents` の封筒は外す）
pub async fn get_history(routes: &ApiRoutes) -> Result<Value> {
    call_api("GET", &routes.history(), None, None)
        .await
        .map(api::unwrap_history)
        .inspect_err(|e| log_failure("Errore nel recuperare lo storico", e))
}

/// 文書1件（`{status, document}` の形で返る）
pub async fn get_document(routes: &ApiRoutes, id: &str) -> Result<Value> {
    call_api("GET", &routes.document(id), None, None)
        .await
        .inspect_err(|e| log_failure("Errore nel recuperare il documento", e))
}

pub async fn delete_document(routes: &ApiRoutes, id: &str) -> Result<Ack> {
    call_api("DELETE", &routes.document(id), None, None)
        .await
        .and_then(Ack::from_value)
        .inspect_err(|e| log_failure("Errore nell'eliminare il documento", e))
}

pub async fn clear_all(routes: &ApiRoutes) -> Result<Ack> {
    call_api("POST", &routes.clear(), None, None)
        .await
        .and_then(Ack::from_value)
        .inspect_err(|e| log_failure("Errore nella pulizia", e))
}

pub async fn health_check(routes: &ApiRoutes) -> Result<HealthStatus> {
    call_api("GET", &routes.health(), None, None)
        .await
        .and_then(HealthStatus::from_value)
        .inspect_err(|e| log_failure("Errore nel health check", e))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use summy_common::SelectedFile;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn file(name: &str) -> File {
        let parts = js_sys::Array::of1(&JsValue::from_str("contenuto"));
        File::new_with_str_sequence(&parts, name).unwrap()
    }

    #[wasm_bindgen_test]
    fn wasm_form_has_one_part_per_file_and_keyword() {
        let request = UploadRequest {
            files: vec![
                SelectedFile::new("a.pdf", file("a.pdf")),
                SelectedFile::new("b.docx", file("b.docx")),
            ],
            keywords: vec!["bilancio".to_string(), "rischi".to_string()],
        };

        let form = build_form(&request).unwrap();

        let files = form.get_all(FILES_FIELD);
        assert_eq!(files.length(), 2);
        let first: File = files.get(0).dyn_into().unwrap();
        assert_eq!(first.name(), "a.pdf");

        let keywords = form.get_all(KEYWORDS_FIELD);
        assert_eq!(keywords.length(), 2);
        assert_eq!(keywords.get(1).as_string().as_deref(), Some("rischi"));
    }

    #[wasm_bindgen_test]
    fn wasm_abort_guard_aborts_when_dropped() {
        let controller = AbortController::new().unwrap();
        drop(AbortOnDrop(Some(controller.clone())));
        assert!(controller.signal().aborted());
    }

    #[wasm_bindgen_test]
    fn wasm_disarmed_guard_leaves_request_alone() {
        let controller = AbortController::new().unwrap();
        let mut guard = AbortOnDrop(Some(controller.clone()));
        guard.disarm();
        drop(guard);
        assert!(!controller.signal().aborted());
    }
}
