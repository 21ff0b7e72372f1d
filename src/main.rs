//! Wallet Tracker 主入口
//! 多币种地址派生服务

use std::sync::Arc;

use anyhow::{Context, Result};
use wallet_tracker::{api, app_state::AppState, config::Config, infrastructure::logging};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载环境变量
    dotenvy::dotenv().ok();

    // 2. 加载配置（CONFIG_PATH 指向的 TOML 文件优先）
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::from_env_and_file(config_path.as_deref())
        .context("Failed to load configuration")?;

    // 3. 初始化日志
    logging::init_logging(&config.logging)?;

    config.validate().context("Invalid configuration")?;

    tracing::info!("Starting Wallet Tracker API");

    // 4. 构建应用状态与路由
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(config.clone())?);
    let app = api::routes(state);

    // 5. 启动服务器
    let bind_addr = config.server.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
