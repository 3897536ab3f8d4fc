use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("アップロードするファイルがありません: {0}")]
    NoFilesFound(String),

    #[error("操作を取り消しました")]
    Cancelled,

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Api(#[from] summy_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<summy_common::ValidationError> for SummyError {
    fn from(e: summy_common::ValidationError) -> Self {
        SummyError::Api(e.into())
    }
}

pub type Result<T> = std::result::Result<T, SummyError>;
