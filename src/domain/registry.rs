//! 币种策略注册表
//!
//! 启动时显式注册，之后只读，通过 `Arc` 在请求间共享。

use std::{collections::HashMap, sync::Arc};

use crate::{
    domain::{
        balance::BalanceEnricher,
        derivation::{
            BchStrategy, BtcStrategy, DerivationStrategy, EthStrategy, LtcStrategy, SolStrategy,
        },
    },
    error::{WalletError, WalletResult},
};

/// 无参工厂：每次解析都产出一个新的策略实例
pub type StrategyFactory = Box<dyn Fn() -> Box<dyn DerivationStrategy> + Send + Sync>;

#[derive(Default)]
pub struct StrategyRegistry {
    factories: HashMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册（币种代码统一大写，重复注册覆盖旧值）
    pub fn register<F>(&mut self, code: &str, factory: F)
    where
        F: Fn() -> Box<dyn DerivationStrategy> + Send + Sync + 'static,
    {
        self.factories
            .insert(code.trim().to_uppercase(), Box::new(factory));
    }

    /// 按币种代码解析策略
    pub fn resolve(&self, code: &str) -> WalletResult<Box<dyn DerivationStrategy>> {
        let key = code.trim().to_uppercase();
        self.factories
            .get(&key)
            .map(|factory| factory())
            .ok_or(WalletError::UnsupportedCurrency(key))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.factories.contains_key(&code.trim().to_uppercase())
    }

    /// 已注册币种（排序）
    pub fn supported_currencies(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.factories.keys().cloned().collect();
        codes.sort();
        codes
    }
}

/// 注册内置币种；ETH 工厂捕获可选的余额富化器
pub fn register_default_strategies(
    registry: &mut StrategyRegistry,
    eth_enricher: Option<Arc<dyn BalanceEnricher>>,
) {
    registry.register("ETH", move || -> Box<dyn DerivationStrategy> {
        match &eth_enricher {
            Some(enricher) => Box::new(EthStrategy::with_enricher(enricher.clone())),
            None => Box::new(EthStrategy::new()),
        }
    });
    registry.register("BTC", || Box::new(BtcStrategy));
    registry.register("LTC", || Box::new(LtcStrategy));
    registry.register("BCH", || Box::new(BchStrategy));
    registry.register("SOL", || Box::new(SolStrategy));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_registry() -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();
        register_default_strategies(&mut registry, None);
        registry
    }

    #[test]
    fn test_default_strategies() {
        let registry = default_registry();
        assert_eq!(
            registry.supported_currencies(),
            vec!["BCH", "BTC", "ETH", "LTC", "SOL"]
        );
        for code in ["ETH", "BTC", "LTC", "BCH", "SOL"] {
            let descriptor = registry.resolve(code).unwrap().descriptor();
            assert_eq!(descriptor.code, code);
            // 基础路径的第二级就是 coin type
            assert!(descriptor
                .mnemonic_base_path
                .contains(&format!("'/{}'", descriptor.coin_type)));
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = default_registry();
        assert_eq!(registry.resolve("btc").unwrap().descriptor().code, "BTC");
        assert!(registry.contains(" sol "));
    }

    #[test]
    fn test_unknown_currency() {
        let registry = default_registry();
        let err = registry.resolve("doge").err().unwrap();
        assert_eq!(err, WalletError::UnsupportedCurrency("DOGE".to_string()));
        assert!(err.to_string().contains("DOGE"));
    }

    #[test]
    fn test_eth_without_enricher() {
        let registry = default_registry();
        assert!(registry.resolve("ETH").unwrap().enricher().is_none());
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = StrategyRegistry::new();
        registry.register("btc", || Box::new(LtcStrategy));
        registry.register("BTC", || Box::new(BtcStrategy));
        assert_eq!(registry.supported_currencies(), vec!["BTC"]);
        assert_eq!(registry.resolve("BTC").unwrap().descriptor().code, "BTC");
    }
}
