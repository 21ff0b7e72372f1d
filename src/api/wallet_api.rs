//! Wallet API - 地址派生
//! 提供基于助记词/扩展公钥的批量地址派生

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::types::InputType,
    error::AppError,
    service::wallet_service::{FetchWalletRequest, WalletData, DEFAULT_COUNT},
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request/Response Models
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchWalletBody {
    pub input_type: Option<String>,
    pub currency: Option<String>,
    pub value: Option<String>,
    pub count: Option<u32>,
    pub start_idx: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub currencies: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Routes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallet/fetch", post(fetch_wallet))
        .route("/health", get(health))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Handlers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// 空字符串与缺失同等处理
fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

/// POST /api/wallet/fetch
pub async fn fetch_wallet(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FetchWalletBody>, JsonRejection>,
) -> Result<Json<WalletData>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let (Some(input_type), Some(currency), Some(value)) = (
        required(body.input_type),
        required(body.currency),
        required(body.value),
    ) else {
        return Err(AppError::bad_request(
            "inputType, currency, and value are required",
        ));
    };

    let input_type: InputType = input_type.parse().map_err(|_| {
        AppError::bad_request(format!(
            "Unsupported inputType: {}. Use MNEMONIC or XPUB.",
            input_type
        ))
    })?;

    let request = FetchWalletRequest::new(input_type, currency.trim().to_uppercase(), value)
        .window(
            body.count.unwrap_or(DEFAULT_COUNT),
            body.start_idx.unwrap_or(0),
        );

    let data = state
        .wallet_service
        .fetch_wallet_data(request)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "wallet fetch failed");
            AppError::from(e)
        })?;

    Ok(Json(data))
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        currencies: state.wallet_service.supported_currencies(),
    })
}

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to the Wallet Tracker API"
}
