//! 测试辅助模块
//! 提供 mock 余额来源和测试应用状态

#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use ethers::types::U256;
use wallet_tracker::{
    app_state::AppState,
    config::{BalanceConfig, Config, LoggingConfig, ServerConfig},
    domain::{
        balance::{BalanceEnricher, BalanceProvider},
        registry::{register_default_strategies, StrategyRegistry},
    },
    service::{EthBalanceEnricher, WalletService},
};

pub const HARDHAT_MNEMONIC: &str = "test test test test test test test test test test test junk";

pub const ABANDON_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// 固定余额，记录调用次数
#[derive(Default)]
pub struct FixedBalanceProvider {
    pub balance: U256,
    pub calls: AtomicUsize,
}

impl FixedBalanceProvider {
    pub fn new(balance: u128) -> Self {
        Self {
            balance: U256::from(balance),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceProvider for FixedBalanceProvider {
    async fn get_balance(&self, _address: &str) -> anyhow::Result<U256> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balance)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// 永远返回错误
pub struct FailingBalanceProvider;

#[async_trait]
impl BalanceProvider for FailingBalanceProvider {
    async fn get_balance(&self, address: &str) -> anyhow::Result<U256> {
        anyhow::bail!("rpc unavailable for {}", address)
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// 永不返回
pub struct HangingBalanceProvider;

#[async_trait]
impl BalanceProvider for HangingBalanceProvider {
    async fn get_balance(&self, _address: &str) -> anyhow::Result<U256> {
        std::future::pending::<()>().await;
        Ok(U256::zero())
    }

    fn name(&self) -> &str {
        "hanging"
    }
}

pub fn eth_enricher(
    primary: Arc<dyn BalanceProvider>,
    secondary: Arc<dyn BalanceProvider>,
    timeout: Duration,
) -> Arc<dyn BalanceEnricher> {
    Arc::new(EthBalanceEnricher::new(primary, secondary).with_timeout(timeout))
}

pub fn create_test_registry(enricher: Option<Arc<dyn BalanceEnricher>>) -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    register_default_strategies(&mut registry, enricher);
    registry
}

pub fn create_test_service(enricher: Option<Arc<dyn BalanceEnricher>>) -> WalletService {
    WalletService::new(Arc::new(create_test_registry(enricher)))
}

pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "text".to_string(),
        },
        balance: BalanceConfig {
            eth_rpc_url: None,
            codex_rpc_url: None,
            timeout_ms: 200,
        },
    })
}

/// 创建测试应用状态
pub fn create_test_app_state(enricher: Option<Arc<dyn BalanceEnricher>>) -> Arc<AppState> {
    Arc::new(AppState::with_registry(
        create_test_registry(enricher),
        test_config(),
    ))
}
