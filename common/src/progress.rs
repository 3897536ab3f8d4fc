//! 擬似進捗表示
//!
//! サーバの実際の進捗とは無関係に、固定の節目（%, ラベル）を一定間隔で進める。
//! 応答到着・失敗・中断のどの経路でも止められるよう、
//! 取り消しフラグを共有する明示的なオブジェクトにしている。

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 進捗の節目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub percent: u8,
    pub label: &'static str,
}

/// 節目の一覧（送信中に順に表示）
pub const MILESTONES: &[Milestone] = &[
    Milestone { percent: 10, label: "Caricamento dei file..." },
    Milestone { percent: 25, label: "Estrazione del contenuto..." },
    Milestone { percent: 45, label: "Suddivisione in blocchi..." },
    Milestone { percent: 65, label: "Generazione dei riassunti..." },
    Milestone { percent: 85, label: "Accorpamento delle sezioni..." },
    Milestone { percent: 95, label: "Finalizzazione..." },
];

/// 節目を進める間隔
pub const STEP_INTERVAL: Duration = Duration::from_millis(2500);

/// 完了/失敗から表示を初期状態に戻すまでの待ち時間
pub const RESET_DELAY: Duration = Duration::from_millis(1500);

pub const COMPLETED_LABEL: &str = "Completato!";

/// 進捗表示の状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    /// 0〜100
    pub percent: u8,
    pub task: String,
}

impl ProgressState {
    /// 初期状態（0%, ラベルなし）
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn completed() -> Self {
        Self {
            percent: 100,
            task: COMPLETED_LABEL.to_string(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.percent == 0 && self.task.is_empty()
    }

    /// 0.0〜1.0
    pub fn fraction(&self) -> f32 {
        f32::from(self.percent.min(100)) / 100.0
    }
}

impl From<&Milestone> for ProgressState {
    fn from(m: &Milestone) -> Self {
        Self {
            percent: m.percent,
            task: m.label.to_string(),
        }
    }
}

/// 取り消しフラグ
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 破棄時に取り消すガード
#[derive(Debug)]
pub struct CancelOnDrop(CancelHandle);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// 擬似進捗のタスク
#[derive(Debug, Clone)]
pub struct ProgressSimulation {
    steps: &'static [Milestone],
    interval: Duration,
    cancel: CancelHandle,
}

impl Default for ProgressSimulation {
    fn default() -> Self {
        Self::new(MILESTONES, STEP_INTERVAL)
    }
}

impl ProgressSimulation {
    pub fn new(steps: &'static [Milestone], interval: Duration) -> Self {
        Self {
            steps,
            interval,
            cancel: CancelHandle::default(),
        }
    }

    pub fn handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// スコープを抜けると取り消すガード
    pub fn guard(&self) -> CancelOnDrop {
        CancelOnDrop(self.handle())
    }

    /// 節目を順に通知する
    ///
    /// 最初の節目はすぐに、以降は間隔ごとに通知する。
    /// 各通知の直前にフラグを確認し、取り消し後は何も通知しない。
    pub async fn run<S, Fut, P>(&self, sleep: S, mut on_step: P)
    where
        S: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
        P: FnMut(ProgressState),
    {
        for (i, milestone) in self.steps.iter().enumerate() {
            if i > 0 {
                sleep(self.interval).await;
            }
            if self.is_cancelled() {
                return;
            }
            on_step(ProgressState::from(milestone));
        }
    }
}

/// 少し待ってから表示を初期状態に戻す
pub async fn settle<S, Fut, P>(sleep: S, mut on_step: P)
where
    S: FnOnce(Duration) -> Fut,
    Fut: Future<Output = ()>,
    P: FnMut(ProgressState),
{
    sleep(RESET_DELAY).await;
    on_step(ProgressState::idle());
}
