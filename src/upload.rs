//! アップロードコマンドの流れ
//!
//! ファイル収集 → 入力チェック → 読み込み → 送信（擬似進捗つき）

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use summy_common::{
    run_upload, KeywordOutcome, ProgressSimulation, ProgressState, SelectedFile, SubmitRules,
    UploadDraft, UploadRequest,
};

use crate::client::ApiClient;
use crate::error::{Result, SummyError};
use crate::files;

/// アップロードの設定
#[derive(Debug, Clone, Copy)]
pub struct UploadOptions {
    pub rules: SubmitRules,
    pub timeout: Duration,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            rules: SubmitRules::default(),
            timeout: summy_common::UPLOAD_TIMEOUT,
        }
    }
}

/// 引数から送信前の入力状態を作る
///
/// 同名ファイル・重複キーワードは捨てる。フォルダが空ならエラー。
pub fn build_draft(paths: &[PathBuf], keywords: &[String]) -> Result<UploadDraft<PathBuf>> {
    let collected = files::collect_files(paths)?;
    let total = collected.len();
    if total == 0 {
        let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        return Err(SummyError::NoFilesFound(names.join(", ")));
    }

    let mut draft = UploadDraft::new();
    let added = draft.add_files(collected);
    if added < total {
        tracing::warn!(skipped = total - added, "duplicate file names skipped");
    }

    for keyword in keywords {
        match draft.add_keyword(keyword) {
            KeywordOutcome::Added => {}
            KeywordOutcome::Empty => tracing::debug!("empty keyword ignored"),
            KeywordOutcome::Duplicate => tracing::warn!(keyword = %keyword.trim(), "duplicate keyword ignored"),
        }
    }

    Ok(draft)
}

/// 送信内容のファイルを読み込む
pub async fn read_contents(request: UploadRequest<PathBuf>) -> Result<UploadRequest<Vec<u8>>> {
    let mut files = Vec::with_capacity(request.files.len());
    for file in request.files {
        let bytes = tokio::fs::read(&file.content).await?;
        files.push(SelectedFile::new(file.name, bytes));
    }
    Ok(UploadRequest {
        files,
        keywords: request.keywords,
    })
}

/// チェックして送信する
///
/// 入力不足の場合は通信せずにエラーを返す。
pub async fn upload<P>(
    client: &ApiClient,
    draft: &mut UploadDraft<PathBuf>,
    options: UploadOptions,
    on_progress: P,
) -> Result<Value>
where
    P: FnMut(ProgressState),
{
    let request = draft.prepare(options.rules)?;
    let request = read_contents(request).await?;

    let simulation = ProgressSimulation::default();
    let result = run_upload(
        request,
        &simulation,
        options.timeout,
        |req| client.upload_files(req),
        tokio::time::sleep,
        on_progress,
    )
    .await?;

    draft.finish_success();
    Ok(result)
}
