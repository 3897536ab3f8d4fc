//! Summy CLI
//!
//! 文書要約サービスの端末クライアント。状態遷移と表示モデルは
//! ブラウザ版と共通（`summy_common`）。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod files;
pub mod progress;
pub mod render;
pub mod upload;
