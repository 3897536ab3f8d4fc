//! プログレスバーコンポーネント

use leptos::prelude::*;
use summy_common::ProgressState;

#[component]
pub fn ProgressBar(progress: ReadSignal<ProgressState>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.with(|p| p.percent))
                />
            </div>
            <p class="progress-text">
                {move || progress.with(progress_text)}
            </p>
        </div>
    }
}

/// 進捗の文言（ラベルがあれば前に付ける）
pub fn progress_text(progress: &ProgressState) -> String {
    if progress.task.is_empty() {
        format!("{}%", progress.percent)
    } else {
        format!("{} {}%", progress.task, progress.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_text_with_task() {
        let p = ProgressState { percent: 45, task: "Suddivisione in blocchi...".into() };
        assert_eq!(progress_text(&p), "Suddivisione in blocchi... 45%");
    }

    #[test]
    fn test_progress_text_idle() {
        assert_eq!(progress_text(&ProgressState::idle()), "0%");
    }
}
