//! ファイル・キーワード入力の状態
//!
//! ファイル実体の型は呼び出し側に任せる（ブラウザでは `web_sys::File`、
//! CLIではパス）。名前を重複判定キーと表示ラベルに使う。

use crate::error::ValidationError;

/// 選択されたファイル
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub content: F,
}

impl<F> SelectedFile<F> {
    pub fn new(name: impl Into<String>, content: F) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// キーワード追加の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordOutcome {
    Added,
    /// 空白のみ（何もしない）
    Empty,
    /// 既に登録済み（大文字小文字を区別）
    Duplicate,
}

/// 送信前チェックの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitRules {
    /// キーワード0件を拒否する
    pub require_keywords: bool,
}

impl Default for SubmitRules {
    fn default() -> Self {
        Self {
            require_keywords: true,
        }
    }
}

/// 送信内容（送信ごとに現在の状態から作る）
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest<F> {
    pub files: Vec<SelectedFile<F>>,
    pub keywords: Vec<String>,
}

/// 送信前の入力状態
#[derive(Debug, Clone, PartialEq)]
pub struct UploadDraft<F> {
    files: Vec<SelectedFile<F>>,
    keywords: Vec<String>,
    keyword_error: Option<String>,
}

impl<F> Default for UploadDraft<F> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            keywords: Vec::new(),
            keyword_error: None,
        }
    }
}

impl<F> UploadDraft<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[SelectedFile<F>] {
        &self.files
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// キーワード欄のエラー表示
    pub fn keyword_error(&self) -> Option<&str> {
        self.keyword_error.as_deref()
    }

    /// ファイルを追加（同名は既存を残して捨てる）
    ///
    /// 追加された件数を返す。
    pub fn add_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = SelectedFile<F>>,
    {
        let mut added = 0;
        for file in files {
            if self.files.iter().any(|f| f.name == file.name) {
                tracing::debug!(name = %file.name, "skipping already staged file");
                continue;
            }
            self.files.push(file);
            added += 1;
        }
        added
    }

    /// 位置指定でファイルを外す
    pub fn remove_file(&mut self, index: usize) -> Option<SelectedFile<F>> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// キーワードを追加（前後の空白は除去してから判定）
    pub fn add_keyword(&mut self, input: &str) -> KeywordOutcome {
        let keyword = input.trim();
        if keyword.is_empty() {
            return KeywordOutcome::Empty;
        }
        if self.keywords.iter().any(|k| k == keyword) {
            return KeywordOutcome::Duplicate;
        }
        self.keywords.push(keyword.to_string());
        KeywordOutcome::Added
    }

    /// 位置指定でキーワードを外す
    pub fn remove_keyword(&mut self, index: usize) -> Option<String> {
        (index < self.keywords.len()).then(|| self.keywords.remove(index))
    }

    /// 送信前チェック
    ///
    /// ファイル0件を先に判定する。キーワード0件はキーワード欄のエラーとして残す。
    pub fn validate(&mut self, rules: SubmitRules) -> Result<(), ValidationError> {
        if self.files.is_empty() {
            return Err(ValidationError::NoFiles);
        }
        if rules.require_keywords && self.keywords.is_empty() {
            self.keyword_error = Some(ValidationError::NoKeywords.to_string());
            return Err(ValidationError::NoKeywords);
        }
        Ok(())
    }

    /// 送信成功後の後始末（キーワード欄のエラーを消す）
    pub fn finish_success(&mut self) {
        self.keyword_error = None;
    }
}

impl<F: Clone> UploadDraft<F> {
    /// チェックを通ったら送信内容を作る
    pub fn prepare(&mut self, rules: SubmitRules) -> Result<UploadRequest<F>, ValidationError> {
        self.validate(rules)?;
        Ok(UploadRequest {
            files: self.files.clone(),
            keywords: self.keywords.clone(),
        })
    }
}

/// アップロードの段階
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// 段階を進めるイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEvent {
    Submit,
    Valid,
    Invalid,
    Completed,
    Failed,
    Settled,
}

impl UploadPhase {
    /// 遷移（定義外の組み合わせは現状維持）
    pub fn advance(self, event: UploadEvent) -> UploadPhase {
        use UploadEvent as E;
        use UploadPhase as P;

        match (self, event) {
            (P::Idle, E::Submit) => P::Validating,
            (P::Validating, E::Valid) => P::Submitting,
            (P::Validating, E::Invalid) => P::Idle,
            (P::Submitting, E::Completed) => P::Succeeded,
            (P::Submitting, E::Failed) => P::Failed,
            (P::Succeeded | P::Failed, E::Settled) => P::Idle,
            (phase, _) => phase,
        }
    }

    /// 入力を無効化すべきか
    pub fn is_busy(self) -> bool {
        matches!(self, UploadPhase::Validating | UploadPhase::Submitting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadPhase::Idle => "idle",
            UploadPhase::Validating => "validating",
            UploadPhase::Submitting => "submitting",
            UploadPhase::Succeeded => "succeeded",
            UploadPhase::Failed => "failed",
        }
    }
}
