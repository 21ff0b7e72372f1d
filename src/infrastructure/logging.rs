//! 日志系统配置模块
//! 支持结构化日志和日志级别配置

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// 初始化日志系统（RUST_LOG 优先于配置中的级别）
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    build_subscriber(config, filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn build_subscriber(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Box<dyn Subscriber + Send + Sync> {
    if config.format == "json" {
        Box::new(
            Registry::default()
                .with(filter)
                .with(fmt::layer().json().with_target(true)),
        )
    } else {
        Box::new(
            Registry::default()
                .with(filter)
                .with(fmt::layer().with_target(true).with_ansi(true)),
        )
    }
}
