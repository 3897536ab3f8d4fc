use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "summy")]
#[command(about = "文書要約サービスのクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIベースアドレス（例: http://localhost:8000/api）
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ファイルをアップロードして要約する
    Upload {
        /// ファイルまたはフォルダ（フォルダは直下のファイル）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 要約の観点となるキーワード（複数指定可）
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// 応答JSONをそのまま出力
        #[arg(long)]
        json: bool,
    },

    /// 履歴（storico）を表示
    History {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 保存された要約を1件表示
    Show {
        /// 文書ID
        #[arg(required = true)]
        id: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 保存された要約を削除
    Delete {
        /// 文書ID
        #[arg(required = true)]
        id: String,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 履歴をすべて削除
    Clear {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// バックエンドの稼働確認
    Health,

    /// 設定を表示/編集
    Config {
        /// APIベースアドレスを設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// キーワードを必須にするか
        #[arg(long)]
        require_keywords: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_with_keywords() {
        let cli = Cli::parse_from([
            "summy", "upload", "a.pdf", "docs", "-k", "bilancio", "--keyword", "rischi",
        ]);
        match cli.command {
            Commands::Upload { paths, keywords, json } => {
                assert_eq!(paths, vec![PathBuf::from("a.pdf"), PathBuf::from("docs")]);
                assert_eq!(keywords, vec!["bilancio", "rischi"]);
                assert!(!json);
            }
            _ => panic!("upload expected"),
        }
    }

    #[test]
    fn test_global_api_base() {
        let cli = Cli::parse_from(["summy", "health", "--api-base", "http://x/api"]);
        assert_eq!(cli.api_base.as_deref(), Some("http://x/api"));
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn test_upload_requires_path() {
        assert!(Cli::try_parse_from(["summy", "upload"]).is_err());
    }
}
