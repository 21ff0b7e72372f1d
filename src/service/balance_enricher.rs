//! ETH 余额富化
//!
//! 每个地址并发查询主链与 Codex 两个来源，单个查询失败或超时记为 0，
//! 不影响其他地址。

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use ethers::types::U256;
use futures::future::join_all;

use crate::{
    domain::{
        balance::{BalanceEnricher, BalanceProvider},
        types::{AddressRecord, EnrichedAddressRecord, WalletEntry},
    },
    utils::units::{format_units, ETHER_DECIMALS},
};

/// 默认单次查询超时
pub const DEFAULT_BALANCE_TIMEOUT: Duration = Duration::from_secs(8);

pub struct EthBalanceEnricher {
    primary: Arc<dyn BalanceProvider>,
    secondary: Arc<dyn BalanceProvider>,
    timeout: Duration,
    decimals: u32,
}

impl EthBalanceEnricher {
    pub fn new(primary: Arc<dyn BalanceProvider>, secondary: Arc<dyn BalanceProvider>) -> Self {
        Self {
            primary,
            secondary,
            timeout: DEFAULT_BALANCE_TIMEOUT,
            decimals: ETHER_DECIMALS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 单次查询：超时或出错都返回 0
    async fn fetch(&self, provider: &dyn BalanceProvider, address: &str) -> U256 {
        match tokio::time::timeout(self.timeout, provider.get_balance(address)).await {
            Ok(Ok(balance)) => balance,
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = provider.name(),
                    address = %address,
                    error = %e,
                    "balance fetch failed, using zero"
                );
                U256::zero()
            }
            Err(_) => {
                tracing::warn!(
                    provider = provider.name(),
                    address = %address,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "balance fetch timed out, using zero"
                );
                U256::zero()
            }
        }
    }

    async fn enrich_one(&self, record: AddressRecord) -> WalletEntry {
        let (primary, secondary) = futures::join!(
            self.fetch(self.primary.as_ref(), &record.address),
            self.fetch(self.secondary.as_ref(), &record.address)
        );

        WalletEntry::Enriched(EnrichedAddressRecord {
            record,
            primary_balance: self.display(primary),
            secondary_balance: self.display(secondary),
        })
    }

    fn display(&self, value: U256) -> String {
        format_units(value, self.decimals).unwrap_or_else(|e| {
            tracing::warn!(value = %value, error = %e, "balance formatting failed, using zero");
            "0.0".to_string()
        })
    }
}

#[async_trait]
impl BalanceEnricher for EthBalanceEnricher {
    async fn enrich(&self, children: Vec<AddressRecord>) -> Vec<WalletEntry> {
        tracing::debug!(addresses = children.len(), "enriching ETH balances");
        // join_all 保持输入顺序
        join_all(children.into_iter().map(|record| self.enrich_one(record))).await
    }
}
