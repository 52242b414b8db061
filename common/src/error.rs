//! エラー型定義
//!
//! Display がそのまま画面に表示されるメッセージになる。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// 必要なスロットが未選択（ネットワークには出ない）
    #[error("{0}")]
    Validation(String),

    /// サーバーが `{error}` を返した
    #[error("Backend Error: {0}")]
    Backend(String),

    /// 2xx以外で `error` を含まないレスポンス
    #[error("Prediction failed. Please try again. Details: HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Prediction failed. Please try again. Details: {0}")]
    Transport(String),

    /// 2xxだがボディが読めない・項目が欠けている
    #[error("Prediction failed. Please try again. Details: {0}")]
    Parse(String),

    #[error("Could not read {0} as an image.")]
    UnreadableImage(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
