use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// 派生核心错误分类
///
/// 除余额获取失败（在 enricher 内部降级为零）外，所有错误都会中止整个批次。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Unsupported input type for {currency}: {input}")]
    UnsupportedSeedSource { currency: String, input: String },

    #[error("Malformed seed: {0}")]
    MalformedSeed(String),

    #[error("Invalid extended key checksum")]
    InvalidChecksum,

    #[error("Unsupported extended public key version: {0}")]
    UnsupportedKeyVersion(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Index range out of bounds: start {start} + count {count} exceeds 2^31")]
    IndexOutOfRange { start: u32, count: u32 },

    #[error("Key derivation error: {0}")]
    Derivation(String),
}

impl WalletError {
    /// 机器可读的错误码
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::UnsupportedCurrency(_) => "unsupported_currency",
            WalletError::UnsupportedSeedSource { .. } => "unsupported_seed_source",
            WalletError::MalformedSeed(_) => "malformed_seed",
            WalletError::InvalidChecksum => "invalid_checksum",
            WalletError::UnsupportedKeyVersion(_) => "unsupported_key_version",
            WalletError::InvalidRange(_) => "invalid_range",
            WalletError::IndexOutOfRange { .. } => "index_out_of_range",
            WalletError::Derivation(_) => "derivation_failed",
        }
    }
}

pub type WalletResult<T> = std::result::Result<T, WalletError>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// HTTP 层错误
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorCode {
    BadRequest,
    Wallet(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub code: AppErrorCode,
    pub message: String,
    pub status: StatusCode,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code_str = match self.code {
            AppErrorCode::BadRequest => "bad_request",
            AppErrorCode::Wallet(code) => code,
        };
        let body = ErrorBody {
            error: &self.message,
            code: code_str,
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            code: AppErrorCode::BadRequest,
            message: msg.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

// 派生错误统一映射为 400
impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        Self {
            code: AppErrorCode::Wallet(err.code()),
            message: err.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_currency_message_names_code() {
        let err = WalletError::UnsupportedCurrency("DOGE".to_string());
        assert!(err.to_string().contains("DOGE"));
        assert_eq!(err.code(), "unsupported_currency");
    }

    #[test]
    fn test_wallet_error_maps_to_bad_request() {
        let app: AppError = WalletError::InvalidChecksum.into();
        assert_eq!(app.status, StatusCode::BAD_REQUEST);
        assert_eq!(app.code, AppErrorCode::Wallet("invalid_checksum"));
        assert_eq!(app.message, "Invalid extended key checksum");
    }
}
