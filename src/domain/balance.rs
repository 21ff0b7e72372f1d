//! 余额富化接口
//!
//! 派生策略只依赖这两个 trait，具体的 RPC 实现在 service 层注入。

use async_trait::async_trait;
use ethers::types::U256;

use crate::domain::types::{AddressRecord, WalletEntry};

/// 单一余额来源（一条链的一个 RPC 端点）
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// 返回最小单位余额（如 wei）
    async fn get_balance(&self, address: &str) -> anyhow::Result<U256>;

    /// 日志中使用的名称
    fn name(&self) -> &str {
        "balance-provider"
    }
}

/// 对派生结果做后处理（如附加余额）
#[async_trait]
pub trait BalanceEnricher: Send + Sync {
    /// 输出顺序必须与输入一致
    async fn enrich(&self, children: Vec<AddressRecord>) -> Vec<WalletEntry>;
}
