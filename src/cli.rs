use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-predict")]
#[command(about = "画像予測クライアント（1枚分類・2枚比較）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 予測サービスのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// 成功時にレスポンスJSONをそのまま出力
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1枚の画像を分類
    Predict {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 2枚の画像を比較
    Compare {
        /// 1枚目の画像
        #[arg(required = true)]
        image1: PathBuf,

        /// 2枚目の画像
        #[arg(required = true)]
        image2: PathBuf,
    },

    /// 設定管理
    Config {
        /// 予測サービスのURLを保存
        #[arg(long)]
        set_endpoint: Option<String>,

        /// HTTPタイムアウト（秒）を保存
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
