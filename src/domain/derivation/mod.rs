//! 钱包派生策略
//!
//! 每个币种一个策略：`derive_root` 把种子来源转换为派生根，
//! `derive_children` 在根上按索引区间派生地址，`enrich` 是可选的后处理阶段。

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use bip39::{Language, Mnemonic};
use bitcoin::{
    bip32::{ChildNumber, DerivationPath, Xpriv, Xpub},
    secp256k1::{All, PublicKey, Secp256k1},
    Network,
};
use once_cell::sync::Lazy;
use zeroize::Zeroizing;

use crate::{
    domain::{
        balance::BalanceEnricher,
        key_format::normalize_extended_pub_key,
        types::{AddressRecord, CurrencyDescriptor, SeedSource, WalletEntry},
    },
    error::{WalletError, WalletResult},
};

pub mod bch;
pub mod btc;
pub mod eth;
pub mod ltc;
pub mod slip10;
pub mod sol;

pub use bch::BchStrategy;
pub use btc::BtcStrategy;
pub use eth::EthStrategy;
pub use ltc::LtcStrategy;
pub use sol::SolStrategy;

/// 非硬化索引上限 (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// secp256k1 上下文，进程内共享（只读）
pub(crate) static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// 派生根
///
/// 只在一次策略调用内部创建和消费，不跨请求共享。
pub enum DerivationRoot {
    /// secp256k1 公钥节点，位于地址层的父节点；`base_path` 是展示给调用方的路径前缀
    Bip32 { node: Xpub, base_path: String },
    /// SLIP-0010 (Ed25519) 需要从种子逐级硬化派生，只保留种子
    Slip10 { seed: Zeroizing<Vec<u8>> },
}

impl std::fmt::Debug for DerivationRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DerivationRoot::Bip32 { base_path, .. } => f
                .debug_struct("Bip32")
                .field("base_path", base_path)
                .finish_non_exhaustive(),
            DerivationRoot::Slip10 { .. } => f.write_str("Slip10(<seed>)"),
        }
    }
}

/// 钱包派生策略 trait
#[async_trait]
pub trait DerivationStrategy: Send + Sync {
    /// 币种描述
    fn descriptor(&self) -> &'static CurrencyDescriptor;

    /// 从种子来源派生根节点
    fn derive_root(&self, seed: &SeedSource) -> WalletResult<DerivationRoot>;

    /// 派生 `[start_index, start_index + count)` 区间内的地址，按索引升序
    fn derive_children(
        &self,
        root: &DerivationRoot,
        count: u32,
        start_index: u32,
    ) -> WalletResult<Vec<AddressRecord>>;

    /// 可选的余额富化器
    fn enricher(&self) -> Option<Arc<dyn BalanceEnricher>> {
        None
    }

    /// 统一富化入口：未配置 enricher 时原样返回
    async fn enrich(&self, children: Vec<AddressRecord>) -> Vec<WalletEntry> {
        match self.enricher() {
            Some(enricher) => enricher.enrich(children).await,
            None => children.into_iter().map(WalletEntry::from).collect(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 共享辅助函数
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// 校验助记词（英文词表 + 校验和）并生成 64 字节 BIP39 种子
pub fn mnemonic_to_seed(phrase: &str) -> WalletResult<Zeroizing<[u8; 64]>> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
        .map_err(|e| WalletError::MalformedSeed(format!("Invalid mnemonic: {}", e)))?;
    Ok(Zeroizing::new(mnemonic.to_seed("")))
}

/// 校验派生区间
///
/// `count` 必须为正；非硬化索引需满足 `start + count <= 2^31`。
pub fn check_range(count: u32, start_index: u32) -> WalletResult<()> {
    if count == 0 {
        return Err(WalletError::InvalidRange(
            "count must be a positive integer".to_string(),
        ));
    }
    if u64::from(start_index) + u64::from(count) > u64::from(HARDENED_OFFSET) {
        return Err(WalletError::IndexOutOfRange {
            start: start_index,
            count,
        });
    }
    Ok(())
}

/// 助记词 → 主私钥 → `base_path` 处的公钥节点
pub fn bip32_root_from_mnemonic(phrase: &str, base_path: &str) -> WalletResult<DerivationRoot> {
    let seed = mnemonic_to_seed(phrase)?;

    let master = Xpriv::new_master(Network::Bitcoin, &seed[..])
        .map_err(|e| WalletError::Derivation(format!("Failed to derive master key: {}", e)))?;

    let path = DerivationPath::from_str(base_path)
        .map_err(|e| WalletError::Derivation(format!("Invalid derivation path: {}", e)))?;

    let account = master
        .derive_priv(&SECP, &path)
        .map_err(|e| WalletError::Derivation(format!("Failed to derive key: {}", e)))?;

    Ok(DerivationRoot::Bip32 {
        node: Xpub::from_priv(&SECP, &account),
        base_path: base_path.to_string(),
    })
}

/// 解析（已标准化的）扩展公钥
pub fn parse_xpub(extended_key: &str) -> WalletResult<Xpub> {
    Xpub::from_str(extended_key.trim())
        .map_err(|e| WalletError::MalformedSeed(format!("Invalid extended public key: {}", e)))
}

/// Bitcoin 系列 xpub 输入：标准化版本前缀后定位到外部链 (m/0)
pub fn bip32_root_from_account_xpub(extended_key: &str) -> WalletResult<DerivationRoot> {
    let normalized = normalize_extended_pub_key(extended_key)?;
    let account = parse_xpub(&normalized)?;
    let external = account
        .ckd_pub(&SECP, normal_child(0)?)
        .map_err(|e| WalletError::Derivation(format!("Failed to derive external chain: {}", e)))?;

    Ok(DerivationRoot::Bip32 {
        node: external,
        base_path: "m/0".to_string(),
    })
}

pub(crate) fn normal_child(index: u32) -> WalletResult<ChildNumber> {
    ChildNumber::from_normal_idx(index)
        .map_err(|e| WalletError::Derivation(format!("Invalid child index {}: {}", index, e)))
}

/// 在 BIP32 公钥节点上按区间派生，`encode` 负责把子公钥编码成地址
pub fn derive_bip32_children<F>(
    root: &DerivationRoot,
    count: u32,
    start_index: u32,
    encode: F,
) -> WalletResult<Vec<AddressRecord>>
where
    F: Fn(&PublicKey) -> WalletResult<String>,
{
    let DerivationRoot::Bip32 { node, base_path } = root else {
        return Err(WalletError::Derivation(
            "expected a BIP32 derivation root".to_string(),
        ));
    };

    check_range(count, start_index)?;

    (start_index..start_index + count)
        .map(|index| -> WalletResult<AddressRecord> {
            let child = node.ckd_pub(&SECP, normal_child(index)?).map_err(|e| {
                WalletError::Derivation(format!("Failed to derive child {}: {}", index, e))
            })?;

            Ok(AddressRecord {
                sequence_number: u64::from(index) + 1,
                derivation_path: format!("{}/{}", base_path, index),
                address: encode(&child.public_key)?,
            })
        })
        .collect()
}
