use thiserror::Error;

#[derive(Error, Debug)]
pub enum RxAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`rx-ai config --set-api-key YOUR_KEY` で設定するか GROQ_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("対応していない画像形式です (JPEG, PNG, WebP, GIF, BMP): {0}")]
    UnsupportedImage(String),

    #[error("画像サイズが上限を超えています: {path} ({size} bytes > {limit} bytes)")]
    ImageTooLarge { path: String, size: u64, limit: u64 },

    #[error("処方箋画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("カタログが不正: {0}")]
    Catalog(#[from] prescription_ai_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, RxAiError>;
