//! 地址编码
//!
//! - Ethereum: keccak256(未压缩公钥)[12..]，EIP-55 大小写校验
//! - Bitcoin/Litecoin: P2WPKH SegWit v0，Bech32，HRP 可配置
//! - Bitcoin Cash: P2PKH CashAddr
//! - Solana: Ed25519 公钥 Base58（无校验和）

use bech32::Hrp;
use bitcoin::{
    hashes::{hash160, Hash},
    secp256k1::PublicKey,
};
use ethers::{types::Address, utils::to_checksum};
use sha3::{Digest, Keccak256};

use crate::{
    domain::types::AddressEncoding,
    error::{WalletError, WalletResult},
};

/// 按币种的编码方案把 secp256k1 子公钥编码成地址
pub fn encode_secp256k1(
    encoding: AddressEncoding,
    public_key: &PublicKey,
) -> WalletResult<String> {
    match encoding {
        AddressEncoding::Hex => Ok(eth_address(public_key)),
        AddressEncoding::Bech32 { hrp } => p2wpkh_address(hrp, public_key),
        AddressEncoding::CashAddr { prefix } => Ok(cashaddr_p2pkh_address(prefix, public_key)),
        AddressEncoding::Base58 => Err(WalletError::Derivation(
            "Base58 addresses are derived from Ed25519 keys".to_string(),
        )),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Ethereum
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// secp256k1 公钥 → 0x 地址（EIP-55）
pub fn eth_address(public_key: &PublicKey) -> String {
    let uncompressed = public_key.serialize_uncompressed();
    // 去掉 0x04 前缀
    let hash = Keccak256::digest(&uncompressed[1..]);
    to_checksum(&Address::from_slice(&hash[12..]), None)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Bitcoin 系列
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// HASH160(压缩公钥)
pub fn pubkey_hash(public_key: &PublicKey) -> [u8; 20] {
    hash160::Hash::hash(&public_key.serialize()).to_byte_array()
}

/// P2WPKH 地址（witness v0），`hrp` 决定网络：bc / ltc / tb ...
pub fn p2wpkh_address(hrp: &str, public_key: &PublicKey) -> WalletResult<String> {
    let hrp = Hrp::parse(hrp)
        .map_err(|e| WalletError::Derivation(format!("invalid bech32 hrp {}: {}", hrp, e)))?;
    bech32::segwit::encode_v0(hrp, &pubkey_hash(public_key))
        .map_err(|e| WalletError::Derivation(format!("bech32 encoding failed: {}", e)))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CashAddr
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const CASHADDR_CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// 版本字节：类型 0 (P2PKH)，长度 0 (160 bit)
const CASHADDR_P2PKH_VERSION: u8 = 0x00;

/// P2PKH CashAddr 地址，如 `bitcoincash:qp...`
pub fn cashaddr_p2pkh_address(prefix: &str, public_key: &PublicKey) -> String {
    cashaddr_encode(prefix, CASHADDR_P2PKH_VERSION, &pubkey_hash(public_key))
}

/// CashAddr 编码：prefix + ':' + base32(version || hash || checksum)
pub fn cashaddr_encode(prefix: &str, version: u8, hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version);
    payload.extend_from_slice(hash);
    let data = convert_bits_8_to_5(&payload);

    let mut checksum_input: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    checksum_input.push(0);
    checksum_input.extend_from_slice(&data);
    checksum_input.extend_from_slice(&[0u8; 8]);
    let checksum = cashaddr_polymod(&checksum_input);

    let mut out = String::with_capacity(prefix.len() + 1 + data.len() + 8);
    out.push_str(prefix);
    out.push(':');
    for d in &data {
        out.push(CASHADDR_CHARSET[*d as usize] as char);
    }
    for i in 0..8 {
        let d = ((checksum >> (5 * (7 - i))) & 0x1f) as usize;
        out.push(CASHADDR_CHARSET[d] as char);
    }
    out
}

/// CashAddr BCH 校验多项式（40 bit）
fn cashaddr_polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];

    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(*d);
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> bit) & 1 == 1 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// 8 bit 分组 → 5 bit 分组，末尾补零
fn convert_bits_8_to_5(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity((data.len() * 8 + 4) / 5);
    for byte in data {
        acc = (acc << 8) | u32::from(*byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Solana
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Solana 地址就是 32 字节公钥的 Base58 编码
pub fn solana_address(public_key: &[u8; 32]) -> String {
    bs58::encode(public_key).into_string()
}
