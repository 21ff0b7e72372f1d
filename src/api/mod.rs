use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;

pub mod wallet_api;

/// 组装全部路由（CORS 放开，请求追踪）
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(wallet_api::welcome))
        .nest("/api", wallet_api::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
