use clap::Parser;
use dialoguer::Confirm;
use summy::{cli, client, config, error, progress, render, upload};
use cli::{Cli, Commands};
use client::ApiClient;
use config::Config;
use error::{Result, SummyError};
use summy_common::{history_items, summary_view, SubmitRules};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let api_base = config.resolve_api_base(cli.api_base.as_deref());
    let client = ApiClient::new(api_base);
    tracing::debug!(base = %client.routes().base(), "api base resolved");

    match cli.command {
        Commands::Upload { paths, keywords, json } => {
            if !json {
                println!("📄 summy - アップロード\n");
            }

            let mut draft = upload::build_draft(&paths, &keywords)?;
            if !json {
                println!("✔ {}件のファイル: {}", draft.files().len(), draft.file_names().join(", "));
                println!("✔ キーワード: {}\n", draft.keywords().join(", "));
            }

            let options = upload::UploadOptions {
                rules: SubmitRules {
                    require_keywords: config.require_keywords,
                },
                timeout: config.upload_timeout(),
            };
            let bar = progress::UploadProgress::new(json);
            let outcome = upload::upload(&client, &mut draft, options, |p| bar.update(&p)).await;
            bar.finish();
            let result = outcome?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", render::render_summary(&summary_view(Some(&result))));
                println!("\n✅ 要約完了");
            }
        }

        Commands::History { json } => {
            let entries = client.history_entries().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{}", render::render_history(&history_items(&entries)));
            }
        }

        Commands::Show { id, json } => {
            let document = client.get_document(&id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                println!("{}", render::render_summary(&summary_view(Some(&document))));
            }
        }

        Commands::Delete { id, yes } => {
            if !yes && !confirm(&format!("{} を削除しますか？", id))? {
                return Err(SummyError::Cancelled);
            }
            let ack = client.delete_document(&id).await?;
            println!("✔ {}", non_empty_or(&ack.message, "削除しました"));
        }

        Commands::Clear { yes } => {
            if !yes && !confirm("履歴をすべて削除しますか？")? {
                return Err(SummyError::Cancelled);
            }
            let ack = client.clear_all().await?;
            println!("✔ {}", non_empty_or(&ack.message, "履歴を削除しました"));
        }

        Commands::Health => {
            let status = client.health_check().await?;
            let mark = if status.is_ok() { "✔" } else { "✘" };
            println!("{} {} ({})", mark, status.status, client.routes().base());
            if !status.message.is_empty() {
                println!("  {}", status.message);
            }
        }

        Commands::Config { set_api_base, require_keywords, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_api_base {
                config.set_api_base(url)?;
                changed = true;
                println!("✔ APIベースアドレスを設定しました");
            }

            if let Some(required) = require_keywords {
                config.require_keywords = required;
                changed = true;
                println!("✔ キーワード必須: {}", if required { "はい" } else { "いいえ" });
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  APIベースアドレス: {}", config.api_base);
                println!("  キーワード必須: {}", if config.require_keywords { "はい" } else { "いいえ" });
                println!("  タイムアウト: {}秒", config.upload_timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

/// ログ出力の初期化（RUST_LOG優先、標準エラーへ）
fn init_logging(verbose: bool) {
    let default = if verbose { "summy=debug,summy_common=debug" } else { "summy=info,summy_common=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SummyError::Prompt(e.to_string()))
}

fn non_empty_or<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}
