use crate::error::{Result, SummyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// APIベースアドレスの環境変数
pub const API_BASE_ENV: &str = "SUMMY_API_BASE";

/// 既定のAPIベースアドレス（ローカルのバックエンド）
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    /// キーワード必須かどうか
    pub require_keywords: bool,
    pub upload_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            require_keywords: true,
            upload_timeout_seconds: summy_common::UPLOAD_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SummyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("summy").join("config.json"))
    }

    /// 実際に使うAPIベースアドレス
    ///
    /// 優先順位: `--api-base` → 環境変数 → 設定ファイル
    pub fn resolve_api_base(&self, flag: Option<&str>) -> String {
        let from_env = std::env::var(API_BASE_ENV).ok();
        pick_api_base(flag, from_env.as_deref(), &self.api_base)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_seconds)
    }

    pub fn set_api_base(&mut self, url: String) -> Result<()> {
        let url = url.trim().to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SummyError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.api_base = url;
        Ok(())
    }
}

fn pick_api_base(flag: Option<&str>, env: Option<&str>, file: &str) -> String {
    [flag, env, Some(file)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let base = pick_api_base(Some("http://a/api"), Some("http://b/api"), "http://c/api");
        assert_eq!(base, "http://a/api");
    }

    #[test]
    fn test_env_before_file() {
        assert_eq!(pick_api_base(None, Some("http://b/api"), "http://c/api"), "http://b/api");
    }

    #[test]
    fn test_blank_values_fall_through() {
        assert_eq!(pick_api_base(Some(" "), Some(""), ""), DEFAULT_API_BASE);
        assert_eq!(pick_api_base(None, None, "http://c/api"), "http://c/api");
    }

    #[test]
    fn test_set_api_base_rejects_non_http() {
        let mut config = Config::default();
        assert!(config.set_api_base("ftp://x".into()).is_err());
        assert!(config.set_api_base(" https://x/api ".into()).is_ok());
        assert_eq!(config.api_base, "https://x/api");
    }
}
