//! バックエンドAPIクライアント（reqwest）
//!
//! ブラウザ版と同じURL・エラー本文の規約（`summy_common::api`）を使う。

use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde_json::Value;

use summy_common::api::{self, FILES_FIELD, KEYWORDS_FIELD};
use summy_common::{Ack, ApiRoutes, Error, HealthStatus, HistoryState, Result, UploadRequest};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    routes: ApiRoutes,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            routes: ApiRoutes::new(base),
        }
    }

    pub fn routes(&self) -> &ApiRoutes {
        &self.routes
    }

    /// 送信して本文をJSONで返す（2xx以外はエラー）
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let resp = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            let error = api::http_error(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %error, "request failed");
            return Err(error);
        }

        api::parse_body(&body)
    }

    /// ファイルとキーワードを送信し、要約結果を受け取る
    pub async fn upload_files(&self, request: UploadRequest<Vec<u8>>) -> Result<Value> {
        let mut form = Form::new();
        for file in request.files {
            form = form.part(FILES_FIELD, Part::bytes(file.content).file_name(file.name));
        }
        for keyword in request.keywords {
            form = form.text(KEYWORDS_FIELD, keyword);
        }

        tracing::debug!(url = %self.routes.upload(), "POST upload");
        self.send(self.http.post(self.routes.upload()).multipart(form))
            .await
    }

    /// 履歴一覧（`documents` の封筒は外す）
    pub async fn get_history(&self) -> Result<Value> {
        self.send(self.http.get(self.routes.history()))
            .await
            .map(api::unwrap_history)
    }

    /// 履歴の項目一覧
    ///
    /// 通信・HTTPエラーはそのまま返し、一覧でない応答だけを `Decode` にする。
    pub async fn history_entries(&self) -> Result<Vec<Value>> {
        match HistoryState::from_response(Ok::<_, Error>(self.get_history().await?)) {
            HistoryState::Loaded(entries) => Ok(entries),
            HistoryState::Error(message) => Err(Error::Decode(message)),
            HistoryState::Loading => Ok(Vec::new()),
        }
    }

    pub async fn get_document(&self, id: &str) -> Result<Value> {
        self.send(self.http.get(self.routes.document(id))).await
    }

    pub async fn delete_document(&self, id: &str) -> Result<Ack> {
        self.send(self.http.delete(self.routes.document(id)))
            .await
            .and_then(Ack::from_value)
    }

    pub async fn clear_all(&self) -> Result<Ack> {
        self.send(self.http.post(self.routes.clear()))
            .await
            .and_then(Ack::from_value)
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.send(self.http.get(self.routes.health()))
            .await
            .and_then(HealthStatus::from_value)
    }
}
