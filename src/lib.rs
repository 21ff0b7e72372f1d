//! Wallet Tracker - 多币种地址派生
//!
//! 从 BIP39 助记词或扩展公钥批量派生 ETH/BTC/LTC/BCH/SOL 地址，
//! ETH 结果可选附带余额。服务端不保存任何种子材料。

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use app_state::AppState;
pub use error::{AppError, AppErrorCode, WalletError, WalletResult};

pub mod prelude {
    pub use crate::{
        app_state::AppState,
        domain::{DerivationStrategy, InputType, SeedSource, StrategyRegistry, WalletEntry},
        error::{AppError, WalletError},
        service::{FetchWalletRequest, WalletData, WalletService},
    };
}
