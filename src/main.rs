use anyhow::Context;
use clap::Parser;
use photo_predict::{cli, config, runner};
use photo_predict_common::{ClientVariant, UiState};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    let state = match cli.command {
        Commands::Predict { image } => {
            println!("🔍 photo-predict - 画像分類\n");
            let client_config = config.client_config(ClientVariant::Single, cli.endpoint.as_deref());
            runner::run_prediction(client_config, &[image], cli.json).await?
        }

        Commands::Compare { image1, image2 } => {
            println!("🔍 photo-predict - 画像比較\n");
            let client_config = config.client_config(ClientVariant::Compare, cli.endpoint.as_deref());
            runner::run_prediction(client_config, &[image1, image2], cli.json).await?
        }

        Commands::Config { set_endpoint, set_timeout, show } => {
            let mut config = config;
            let changed = set_endpoint.is_some() || set_timeout.is_some();

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
            }
            if let Some(timeout) = set_timeout {
                config.set_timeout(timeout)?;
            }
            if changed {
                config.save().context("設定ファイルの保存に失敗しました")?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  エンドポイント: {}", config.resolve_endpoint(cli.endpoint.as_deref()));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
            UiState::Idle
        }
    };

    if state.is_error() {
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "photo_predict=debug,photo_predict_common=debug"
    } else {
        "photo_predict=info,photo_predict_common=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
