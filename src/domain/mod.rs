//! Domain 模块
//!
//! 地址派生的核心逻辑：输入模型、扩展公钥标准化、地址编码、各币种派生策略与注册表

pub mod address_codec;
pub mod balance;
pub mod derivation;
pub mod key_format;
pub mod registry;
pub mod types;

// 重新导出常用类型
pub use balance::{BalanceEnricher, BalanceProvider};
pub use derivation::{DerivationRoot, DerivationStrategy};
pub use key_format::normalize_extended_pub_key;
pub use registry::{register_default_strategies, StrategyRegistry};
pub use types::{
    AddressEncoding, AddressRecord, CurrencyDescriptor, EnrichedAddressRecord, InputType,
    SeedSource, WalletEntry,
};
