use anyhow::Context;
use autoform::{cli, config, logging, ExtractionClient, SubmissionWorkflow, TerminalPresenter};
use autoform_common::SubmissionOrigin;
use clap::Parser;
use cli::{Cli, Commands, ServiceArgs};
use config::Config;
use dialoguer::Input;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Submit { path, origin, json, service } => {
            let config = submission_config(service)?;
            run_submit(&config, path, origin, json).await?;
        }

        Commands::Pick { json, service } => {
            let config = submission_config(service)?;
            let input: String = Input::new()
                .with_prompt("画像ファイルのパス (jpg/jpeg/png/bmp)")
                .interact_text()
                .map_err(|e| autoform::AutoFormError::Prompt(e.to_string()))?;
            let path = PathBuf::from(input.trim().trim_matches('"'));
            run_submit(&config, path, SubmissionOrigin::Pick, json).await?;
        }

        Commands::Config { set_base_url, set_timeout, clear_timeout, show } => {
            // 環境変数の上書きを保存しないよう、ファイルの値だけを編集する
            let mut config = Config::load_file().context("設定の読み込みに失敗")?;
            let mut changed = false;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                changed = true;
            }
            if let Some(seconds) = set_timeout {
                config.timeout_seconds = Some(seconds);
                changed = true;
            }
            if clear_timeout {
                config.timeout_seconds = None;
                changed = true;
            }
            if changed {
                config.save().context("設定の保存に失敗")?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  ベースURL: {}", config.base_url);
                match config.timeout_seconds {
                    Some(seconds) => println!("  タイムアウト: {}秒", seconds),
                    None => println!("  タイムアウト: なし"),
                }
            }
        }
    }

    Ok(())
}

/// 設定ファイル → 環境変数 → コマンドライン引数の順に重ねた送信用設定
fn submission_config(service: ServiceArgs) -> anyhow::Result<Config> {
    let mut config = Config::load().context("設定の読み込みに失敗")?;
    if let Some(url) = service.base_url {
        config.set_base_url(url)?;
    }
    if service.timeout.is_some() {
        config.timeout_seconds = service.timeout;
    }
    Ok(config)
}

async fn run_submit(
    config: &Config,
    path: PathBuf,
    origin: SubmissionOrigin,
    json: bool,
) -> anyhow::Result<()> {
    let client = ExtractionClient::from_config(config)?;
    let workflow = SubmissionWorkflow::new(client);
    let mut presenter = TerminalPresenter::new(json);

    let outcome = workflow.submit(&path, origin, &mut presenter).await;
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
