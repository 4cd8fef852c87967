use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetSizerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("カタログファイルが設定されていません。`net-sizer config --set-catalog PATH` で設定するか --catalog を指定してください")]
    MissingCatalog,

    #[error("不明な製品ライン: {0}（door / window、または --line-file を指定）")]
    UnknownProductLine(String),

    #[error("開口部の指定が不正: {0}")]
    InvalidOpening(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] net_sizer_common::Error),
}

pub type Result<T> = std::result::Result<T, NetSizerError>;
