use autoform_common::SubmissionOrigin;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autoform")]
#[command(about = "フォーム画像を抽出サービスに送り、学生情報を表示する", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログ (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// 送信時だけ効く接続先の上書き（設定ファイルには保存しない）
#[derive(Args, Debug, Default, Clone)]
pub struct ServiceArgs {
    /// 抽出サービスのベースURL（設定ファイル・環境変数より優先）
    #[arg(long)]
    pub base_url: Option<String>,

    /// リクエストのタイムアウト秒数 (1以上)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 画像ファイルを1件送信
    Submit {
        /// 画像ファイル (jpg/jpeg/png/bmp)
        #[arg(required = true)]
        path: PathBuf,

        /// 入手経路 (drop/pick)
        #[arg(long, default_value = "drop")]
        origin: SubmissionOrigin,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// パスを対話入力して送信
    Pick {
        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// 設定を表示/編集
    Config {
        /// ベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// タイムアウト秒数を設定 (1以上)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        set_timeout: Option<u64>,

        /// タイムアウトを解除
        #[arg(long, conflicts_with = "set_timeout")]
        clear_timeout: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
