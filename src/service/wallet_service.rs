//! 钱包数据编排服务
//!
//! 解析币种策略 → 派生根 → 派生地址区间 → 余额富化 → 组装结果

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        registry::StrategyRegistry,
        types::{InputType, SeedSource, WalletEntry},
    },
    error::WalletResult,
};

/// 默认派生数量
pub const DEFAULT_COUNT: u32 = 20;

/// 派生请求
#[derive(Clone)]
pub struct FetchWalletRequest {
    pub input_type: InputType,
    pub currency: String,
    pub value: String,
    pub count: u32,
    pub start_index: u32,
}

impl FetchWalletRequest {
    pub fn new(input_type: InputType, currency: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            input_type,
            currency: currency.into(),
            value: value.into(),
            count: DEFAULT_COUNT,
            start_index: 0,
        }
    }

    pub fn window(mut self, count: u32, start_index: u32) -> Self {
        self.count = count;
        self.start_index = start_index;
        self
    }
}

// value 可能是助记词，不输出
impl std::fmt::Debug for FetchWalletRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWalletRequest")
            .field("input_type", &self.input_type)
            .field("currency", &self.currency)
            .field("count", &self.count)
            .field("start_index", &self.start_index)
            .finish_non_exhaustive()
    }
}

/// 派生结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletData {
    pub currency: String,
    pub count: usize,
    pub data: Vec<WalletEntry>,
}

#[derive(Clone)]
pub struct WalletService {
    registry: Arc<StrategyRegistry>,
}

impl WalletService {
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    pub fn supported_currencies(&self) -> Vec<String> {
        self.registry.supported_currencies()
    }

    pub async fn fetch_wallet_data(&self, request: FetchWalletRequest) -> WalletResult<WalletData> {
        tracing::info!(
            currency = %request.currency,
            input_type = %request.input_type,
            count = request.count,
            start_index = request.start_index,
            "fetching wallet data"
        );

        let strategy = self.registry.resolve(&request.currency)?;
        let currency = strategy.descriptor().code.to_string();

        // 种子与派生根在富化（网络 I/O）之前释放
        let children = {
            let seed = SeedSource::new(request.input_type, request.value.trim());
            let root = strategy.derive_root(&seed)?;
            strategy.derive_children(&root, request.count, request.start_index)?
        };

        let data = strategy.enrich(children).await;

        tracing::debug!(currency = %currency, derived = data.len(), "wallet data ready");

        Ok(WalletData {
            currency,
            count: data.len(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::registry::register_default_strategies, error::WalletError};

    const MNEMONIC: &str = "test test test test test test test test test test test junk";

    fn service() -> WalletService {
        let mut registry = StrategyRegistry::new();
        register_default_strategies(&mut registry, None);
        WalletService::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_fetch_eth_first_address() {
        let data = service()
            .fetch_wallet_data(FetchWalletRequest::new(InputType::Mnemonic, "eth", MNEMONIC).window(1, 0))
            .await
            .unwrap();

        assert_eq!(data.currency, "ETH");
        assert_eq!(data.count, 1);
        assert_eq!(data.data[0].address(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(data.data[0].record().derivation_path, "m/44'/60'/0'/0/0");
    }

    #[tokio::test]
    async fn test_value_is_trimmed() {
        let padded = format!("\n  {}  \t", MNEMONIC);
        let data = service()
            .fetch_wallet_data(FetchWalletRequest::new(InputType::Mnemonic, "BTC", padded).window(1, 0))
            .await
            .unwrap();
        assert!(data.data[0].address().starts_with("bc1q"));
    }

    #[tokio::test]
    async fn test_default_window() {
        let data = service()
            .fetch_wallet_data(FetchWalletRequest::new(InputType::Mnemonic, "LTC", MNEMONIC))
            .await
            .unwrap();
        assert_eq!(data.count, DEFAULT_COUNT as usize);
        assert_eq!(data.data.last().unwrap().record().sequence_number, 20);
    }

    #[tokio::test]
    async fn test_unsupported_currency() {
        let err = service()
            .fetch_wallet_data(FetchWalletRequest::new(InputType::Mnemonic, "DOGE", MNEMONIC))
            .await
            .unwrap_err();
        assert_eq!(err, WalletError::UnsupportedCurrency("DOGE".to_string()));
    }

    #[test]
    fn test_request_debug_hides_value() {
        let request = FetchWalletRequest::new(InputType::Mnemonic, "ETH", MNEMONIC);
        assert!(!format!("{:?}", request).contains("junk"));
    }
}
