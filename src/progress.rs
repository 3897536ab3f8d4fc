//! アップロード中の進捗バー（indicatif）

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use summy_common::ProgressState;

pub struct UploadProgress {
    bar: ProgressBar,
}

impl UploadProgress {
    /// `hidden` のときは何も描画しない（JSON出力時など）
    pub fn new(hidden: bool) -> Self {
        let bar = ProgressBar::new(100);
        if hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        Self { bar }
    }

    pub fn update(&self, state: &ProgressState) {
        self.bar.set_position(u64::from(state.percent));
        self.bar.set_message(state.task.clone());
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
