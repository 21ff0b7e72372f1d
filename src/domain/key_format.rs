//! 扩展公钥格式标准化
//!
//! SegWit 钱包导出的 ypub/zpub/vpub 与 xpub/tpub 的密钥材料完全一致，只有
//! 4 字节版本前缀不同。这里把版本前缀替换为 BIP32 标准前缀，
//! 使同一个 BIP32 解析器能处理所有钱包导出的扩展公钥。

use crate::error::{WalletError, WalletResult};

pub const XPUB_VERSION: [u8; 4] = [0x04, 0x88, 0xb2, 0x1e];
pub const YPUB_VERSION: [u8; 4] = [0x04, 0x9d, 0x7c, 0xb2];
pub const ZPUB_VERSION: [u8; 4] = [0x04, 0xb2, 0x47, 0x46];
pub const TPUB_VERSION: [u8; 4] = [0x04, 0x35, 0x87, 0xcf];
pub const VPUB_VERSION: [u8; 4] = [0x04, 0x5f, 0x1c, 0xf6];

/// 序列化扩展公钥长度（不含校验和）
const EXTENDED_KEY_LEN: usize = 78;

/// 版本前缀 → 标准前缀
const VERSION_MAP: [([u8; 4], [u8; 4]); 5] = [
    (XPUB_VERSION, XPUB_VERSION),
    (YPUB_VERSION, XPUB_VERSION),
    (ZPUB_VERSION, XPUB_VERSION),
    (TPUB_VERSION, TPUB_VERSION),
    (VPUB_VERSION, TPUB_VERSION),
];

/// 查找标准版本前缀
pub fn canonical_version(version: &[u8; 4]) -> Option<[u8; 4]> {
    VERSION_MAP
        .iter()
        .find(|(from, _)| from == version)
        .map(|(_, to)| *to)
}

/// 标准化扩展公钥：ypub/zpub → xpub，vpub → tpub，xpub/tpub 保持不变
pub fn normalize_extended_pub_key(extended_key: &str) -> WalletResult<String> {
    let mut data = bs58::decode(extended_key.trim())
        .with_check(None)
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidChecksum { .. } => WalletError::InvalidChecksum,
            other => WalletError::MalformedSeed(format!("invalid extended key encoding: {}", other)),
        })?;

    if data.len() < 4 {
        return Err(WalletError::MalformedSeed(
            "extended key is too short".to_string(),
        ));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&data[..4]);

    let target = canonical_version(&version)
        .ok_or_else(|| WalletError::UnsupportedKeyVersion(hex::encode(version)))?;

    if data.len() != EXTENDED_KEY_LEN {
        return Err(WalletError::MalformedSeed(format!(
            "extended key must be {} bytes, got {}",
            EXTENDED_KEY_LEN,
            data.len()
        )));
    }

    data[..4].copy_from_slice(&target);

    Ok(bs58::encode(data).with_check().into_string())
}

/// 把扩展公钥改写为指定版本前缀
#[cfg(test)]
pub(crate) fn with_version(extended_key: &str, version: [u8; 4]) -> WalletResult<String> {
    let mut data = bs58::decode(extended_key.trim())
        .with_check(None)
        .into_vec()
        .map_err(|e| WalletError::MalformedSeed(e.to_string()))?;

    if data.len() != EXTENDED_KEY_LEN {
        return Err(WalletError::MalformedSeed(
            "extended key has unexpected length".to_string(),
        ));
    }

    data[..4].copy_from_slice(&version);
    Ok(bs58::encode(data).with_check().into_string())
}
