//! アップロード送信の流れ
//!
//! 送信（1回のみ・再試行なし）とクライアント側タイムアウトを競わせ、
//! その間は擬似進捗を並走させる。擬似進捗はどの終了経路でも止める。
//! 通信とタイマーは呼び出し側が渡す（ブラウザ: fetch + gloo、CLI: reqwest + tokio）。

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::progress::{ProgressSimulation, ProgressState};
use crate::summary::embedded_error;
use crate::upload::{SubmitRules, UploadDraft, UploadRequest};

/// クライアント側タイムアウト（10分）
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// 送信を実行する
///
/// - 送信とタイムアウトのうち先に終わった方を採用（タイムアウト時は送信Futureを破棄）
/// - 送信中は `simulation` の節目を `on_progress` へ通知
/// - 成功応答に処理エラーが埋め込まれていれば失敗扱い
/// - 成功時は100%（完了）を通知
///
/// 表示を初期状態に戻すのは呼び出し側（[`crate::progress::settle`]）。
pub async fn run_upload<F, SendFn, SendFut, S, SleepFut, P>(
    request: UploadRequest<F>,
    simulation: &ProgressSimulation,
    timeout: Duration,
    send: SendFn,
    sleep: S,
    mut on_progress: P,
) -> Result<Value>
where
    SendFn: FnOnce(UploadRequest<F>) -> SendFut,
    SendFut: Future<Output = Result<Value>>,
    S: Fn(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
    P: FnMut(ProgressState),
{
    let _guard = simulation.guard();

    tracing::info!(
        files = request.files.len(),
        keywords = request.keywords.len(),
        "upload started"
    );

    let send_fut = send(request);
    let deadline = sleep(timeout);
    let request_fut = async move {
        match select(pin!(send_fut), pin!(deadline)).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(Error::Timeout),
        }
    };

    let outcome = {
        let request_fut = pin!(request_fut);
        let ticker = pin!(simulation.run(&sleep, &mut on_progress));
        match select(request_fut, ticker).await {
            Either::Left((result, _)) => result,
            // 節目を出し切った後は応答を待つだけ
            Either::Right(((), request_fut)) => request_fut.await,
        }
    };
    simulation.cancel();

    // 200応答でも処理エラーなら失敗扱い
    let outcome = outcome.and_then(|value| match embedded_error(&value) {
        Some(message) => Err(Error::Processing(message)),
        None => Ok(value),
    });

    match &outcome {
        Ok(_) => {
            tracing::info!("upload completed");
            on_progress(ProgressState::completed());
        }
        Err(e) if e.is_timeout() => tracing::warn!(timeout_secs = timeout.as_secs(), "upload timed out"),
        Err(e) => tracing::warn!(error = %e, "upload failed"),
    }

    outcome
}

/// チェック → 送信 → 後始末 をまとめて行う
///
/// チェックに失敗した場合は `send` を呼ばない。
pub async fn submit<F, SendFn, SendFut, S, SleepFut, P>(
    draft: &mut UploadDraft<F>,
    rules: SubmitRules,
    simulation: &ProgressSimulation,
    timeout: Duration,
    send: SendFn,
    sleep: S,
    on_progress: P,
) -> Result<Value>
where
    F: Clone,
    SendFn: FnOnce(UploadRequest<F>) -> SendFut,
    SendFut: Future<Output = Result<Value>>,
    S: Fn(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
    P: FnMut(ProgressState),
{
    let request = draft.prepare(rules)?;
    let outcome = run_upload(request, simulation, timeout, send, sleep, on_progress).await;
    if outcome.is_ok() {
        draft.finish_success();
    }
    outcome
}
