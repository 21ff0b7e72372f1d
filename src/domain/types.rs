//! 派生输入/输出模型

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// 种子来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputType {
    /// BIP39 助记词
    Mnemonic,
    /// 扩展公钥 (xpub/ypub/zpub/tpub/vpub)
    Xpub,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Mnemonic => "MNEMONIC",
            InputType::Xpub => "XPUB",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = String;

    /// 大小写不敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MNEMONIC" => Ok(InputType::Mnemonic),
            "XPUB" => Ok(InputType::Xpub),
            other => Err(other.to_string()),
        }
    }
}

/// 单次派生调用的种子来源，不持久化
#[derive(Clone, PartialEq, Eq)]
pub enum SeedSource {
    Mnemonic(String),
    ExtendedPublicKey(String),
}

impl SeedSource {
    pub fn new(input_type: InputType, value: impl Into<String>) -> Self {
        match input_type {
            InputType::Mnemonic => SeedSource::Mnemonic(value.into()),
            InputType::Xpub => SeedSource::ExtendedPublicKey(value.into()),
        }
    }

    pub fn input_type(&self) -> InputType {
        match self {
            SeedSource::Mnemonic(_) => InputType::Mnemonic,
            SeedSource::ExtendedPublicKey(_) => InputType::Xpub,
        }
    }
}

// 不打印种子内容
impl fmt::Debug for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedSource::{}(<redacted>)", self.input_type())
    }
}

/// 派生出的单个地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// 序号（从 1 开始，跨分页全局连续）
    #[serde(rename = "srNo")]
    pub sequence_number: u64,
    /// 派生路径
    #[serde(rename = "path")]
    pub derivation_path: String,
    pub address: String,
}

/// 附带余额的地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedAddressRecord {
    #[serde(flatten)]
    pub record: AddressRecord,
    /// 主链余额（显示单位）
    #[serde(rename = "ethBalance")]
    pub primary_balance: String,
    /// 次级网络余额（显示单位）
    #[serde(rename = "codexBalance")]
    pub secondary_balance: String,
}

/// 结果集元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WalletEntry {
    Enriched(EnrichedAddressRecord),
    Plain(AddressRecord),
}

impl WalletEntry {
    pub fn record(&self) -> &AddressRecord {
        match self {
            WalletEntry::Plain(record) => record,
            WalletEntry::Enriched(enriched) => &enriched.record,
        }
    }

    pub fn address(&self) -> &str {
        &self.record().address
    }
}

impl From<AddressRecord> for WalletEntry {
    fn from(record: AddressRecord) -> Self {
        WalletEntry::Plain(record)
    }
}

/// 地址编码方案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressEncoding {
    /// 0x + EIP-55 十六进制
    Hex,
    /// P2WPKH Bech32，带 HRP
    Bech32 { hrp: &'static str },
    /// P2PKH CashAddr，带前缀
    CashAddr { prefix: &'static str },
    /// Ed25519 公钥 Base58
    Base58,
}

/// 币种描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyDescriptor {
    pub code: &'static str,
    /// BIP44 coin type
    pub coin_type: u32,
    /// 助记词输入的基础路径（不含地址索引）
    pub mnemonic_base_path: &'static str,
    pub supported_inputs: &'static [InputType],
    pub encoding: AddressEncoding,
}

impl CurrencyDescriptor {
    pub fn supports(&self, input_type: InputType) -> bool {
        self.supported_inputs.contains(&input_type)
    }

    /// 不支持的输入类型统一报错
    pub fn ensure_supports(&self, seed: &SeedSource) -> Result<(), WalletError> {
        if self.supports(seed.input_type()) {
            Ok(())
        } else {
            Err(WalletError::UnsupportedSeedSource {
                currency: self.code.to_string(),
                input: seed.input_type().to_string(),
            })
        }
    }
}
