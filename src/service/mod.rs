//! Service 模块
//!
//! 余额来源、余额富化与派生编排

pub mod balance_enricher;
pub mod balance_provider;
pub mod wallet_service;

pub use balance_enricher::EthBalanceEnricher;
pub use balance_provider::{JsonRpcBalanceProvider, ZeroBalanceProvider};
pub use wallet_service::{FetchWalletRequest, WalletData, WalletService};
