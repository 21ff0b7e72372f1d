//! SLIP-0010 Ed25519 派生
//!
//! Ed25519 只支持硬化派生，每一级都是
//! `HMAC-SHA512(chain_code, 0x00 || key || ser32(index | 2^31))`。

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{WalletError, WalletResult};

type HmacSha512 = Hmac<Sha512>;

const MASTER_SECRET: &[u8] = b"ed25519 seed";

/// 按硬化索引列表派生 32 字节私钥（索引不带硬化位）
pub fn derive_private_key(seed: &[u8], hardened_path: &[u32]) -> WalletResult<Zeroizing<[u8; 32]>> {
    let (mut key, mut chain_code) = hmac_split(MASTER_SECRET, &[seed])?;

    for index in hardened_path {
        let hardened = (index | 0x8000_0000).to_be_bytes();
        let (child_key, child_chain) =
            hmac_split(&chain_code, &[&[0x00u8][..], &key[..], &hardened[..]])?;
        key.zeroize();
        chain_code.zeroize();
        key = child_key;
        chain_code = child_chain;
    }

    chain_code.zeroize();
    Ok(Zeroizing::new(key))
}

/// I = HMAC-SHA512(key, data...)，返回 (IL, IR)
fn hmac_split(key: &[u8], data: &[&[u8]]) -> WalletResult<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::Derivation(format!("HMAC init failed: {}", e)))?;
    for chunk in data {
        mac.update(chunk);
    }

    let mut buf = [0u8; 64];
    buf.copy_from_slice(&mac.finalize().into_bytes());

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&buf[..32]);
    right.copy_from_slice(&buf[32..]);
    buf.zeroize();

    Ok((left, right))
}
