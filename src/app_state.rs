use std::sync::Arc;

use crate::{
    config::Config,
    domain::{
        balance::{BalanceEnricher, BalanceProvider},
        registry::{register_default_strategies, StrategyRegistry},
    },
    service::{
        balance_enricher::EthBalanceEnricher,
        balance_provider::{JsonRpcBalanceProvider, ZeroBalanceProvider},
        wallet_service::WalletService,
    },
};

/// 应用状态
/// 启动时构建一次，之后只读
#[derive(Clone)]
pub struct AppState {
    pub wallet_service: Arc<WalletService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// 按配置组装余额来源与策略注册表
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let enricher = build_eth_enricher(&config)?;

        let mut registry = StrategyRegistry::new();
        register_default_strategies(&mut registry, enricher);

        Ok(Self::with_registry(registry, config))
    }

    /// 使用预先构建的注册表（测试中注入 mock enricher）
    pub fn with_registry(registry: StrategyRegistry, config: Arc<Config>) -> Self {
        tracing::info!(
            currencies = ?registry.supported_currencies(),
            "strategy registry initialized"
        );

        Self {
            wallet_service: Arc::new(WalletService::new(Arc::new(registry))),
            config,
        }
    }
}

fn build_eth_enricher(config: &Config) -> anyhow::Result<Option<Arc<dyn BalanceEnricher>>> {
    let balance = &config.balance;

    let Some(eth_url) = balance.eth_rpc_url.as_deref() else {
        tracing::warn!("ETH_RPC_URL not set, ETH results will not include balances");
        return Ok(None);
    };

    let primary: Arc<dyn BalanceProvider> = Arc::new(JsonRpcBalanceProvider::new(
        "eth",
        eth_url,
        balance.timeout(),
    )?);

    let secondary: Arc<dyn BalanceProvider> = match balance.codex_rpc_url.as_deref() {
        Some(codex_url) => Arc::new(JsonRpcBalanceProvider::new(
            "codex",
            codex_url,
            balance.timeout(),
        )?),
        None => {
            tracing::warn!("CODEX_RPC_URL not set, Codex balances will be reported as zero");
            Arc::new(ZeroBalanceProvider)
        }
    };

    tracing::info!(timeout_ms = balance.timeout_ms, "ETH balance enrichment enabled");

    Ok(Some(Arc::new(
        EthBalanceEnricher::new(primary, secondary).with_timeout(balance.timeout()),
    )))
}
