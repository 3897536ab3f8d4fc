//! Summy Common Library
//!
//! ブラウザ版(WASM)とCLIで共有される型と状態遷移:
//! 要約結果の形状判定、履歴の表示、アップロード入力と送信、擬似進捗、API契約

pub mod api;
pub mod error;
pub mod history;
pub mod progress;
pub mod submit;
pub mod summary;
pub mod upload;

pub use api::{Ack, ApiRoutes, HealthStatus, DEFAULT_API_BASE};
pub use error::{Error, Result, ValidationError};
pub use history::{history_items, HistoryItem, HistoryState};
pub use progress::{settle, CancelHandle, ProgressSimulation, ProgressState};
pub use submit::{run_upload, submit, UPLOAD_TIMEOUT};
pub use summary::{embedded_error, summary_view, SectionsView, Sezione, SummaryResult, SummaryView};
pub use upload::{
    KeywordOutcome, SelectedFile, SubmitRules, UploadDraft, UploadEvent, UploadPhase, UploadRequest,
};
