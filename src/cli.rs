use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rx-ai")]
#[command(about = "処方箋画像AI読み取り・商品カタログ照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (groq/claude)
    #[arg(long, value_enum, default_value_t = AiProvider::Groq, global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 処方箋画像を読み取り、カタログと照合してJSONを出力
    Analyze {
        /// 処方箋画像ファイル、または画像フォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// 商品カタログJSONファイル
        #[arg(short, long)]
        catalog: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 取得済みのAI応答テキストをカタログと照合（AI呼び出しなし）
    Match {
        /// 商品カタログJSONファイル
        #[arg(short, long)]
        catalog: PathBuf,

        /// AI応答テキスト
        #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
        text: Option<String>,

        /// AI応答テキストのファイル
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
