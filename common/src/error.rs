//! エラー型定義

use crate::invoice::PriceTier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 開口部ごとの入力不正
///
/// バッチ全体は中断せず、該当開口部の結果としてのみ返す。
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{reason}")]
pub struct InvalidInput {
    pub reason: String,
}

impl InvalidInput {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("Missing {tier} for opening {opening_index}")]
    MissingPrice { tier: PriceTier, opening_index: usize },

    #[error("No order lines to invoice")]
    EmptyOrder,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_invalid_input() {
        let error: Error = InvalidInput::new("height must be positive").into();
        assert_eq!(format!("{}", error), "Invalid input: height must be positive");
    }

    #[test]
    fn test_error_display_missing_price() {
        let error = Error::MissingPrice { tier: PriceTier::Deal, opening_index: 2 };
        assert_eq!(format!("{}", error), "Missing Deal Price for opening 2");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
