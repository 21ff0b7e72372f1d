//! Solana 派生策略
//!
//! 路径 m/44'/501'/i'/0'，每个索引都是一条独立的全硬化路径，
//! 不支持扩展公钥输入。

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use crate::{
    domain::{
        address_codec::solana_address,
        derivation::{check_range, mnemonic_to_seed, slip10, DerivationRoot, DerivationStrategy},
        types::{AddressEncoding, AddressRecord, CurrencyDescriptor, InputType, SeedSource},
    },
    error::{WalletError, WalletResult},
};

pub static SOL_DESCRIPTOR: CurrencyDescriptor = CurrencyDescriptor {
    code: "SOL",
    coin_type: 501,
    mnemonic_base_path: "m/44'/501'",
    supported_inputs: &[InputType::Mnemonic],
    encoding: AddressEncoding::Base58,
};

pub struct SolStrategy;

impl SolStrategy {
    fn address_at(seed: &[u8], index: u32) -> WalletResult<AddressRecord> {
        let private_key =
            slip10::derive_private_key(seed, &[44, SOL_DESCRIPTOR.coin_type, index, 0])?;
        let signing_key = SigningKey::from_bytes(&private_key);
        let public_key = signing_key.verifying_key().to_bytes();

        Ok(AddressRecord {
            sequence_number: u64::from(index) + 1,
            derivation_path: format!("{}/{}'/0'", SOL_DESCRIPTOR.mnemonic_base_path, index),
            address: solana_address(&public_key),
        })
    }
}

impl DerivationStrategy for SolStrategy {
    fn descriptor(&self) -> &'static CurrencyDescriptor {
        &SOL_DESCRIPTOR
    }

    fn derive_root(&self, seed: &SeedSource) -> WalletResult<DerivationRoot> {
        self.descriptor().ensure_supports(seed)?;

        match seed {
            SeedSource::Mnemonic(phrase) => {
                let seed = mnemonic_to_seed(phrase)?;
                Ok(DerivationRoot::Slip10 {
                    seed: Zeroizing::new(seed.to_vec()),
                })
            }
            SeedSource::ExtendedPublicKey(_) => Err(WalletError::UnsupportedSeedSource {
                currency: SOL_DESCRIPTOR.code.to_string(),
                input: InputType::Xpub.to_string(),
            }),
        }
    }

    fn derive_children(
        &self,
        root: &DerivationRoot,
        count: u32,
        start_index: u32,
    ) -> WalletResult<Vec<AddressRecord>> {
        let DerivationRoot::Slip10 { seed } = root else {
            return Err(WalletError::Derivation(
                "expected a SLIP-0010 derivation root".to_string(),
            ));
        };

        // 账户索引在加硬化位之前也必须小于 2^31
        check_range(count, start_index)?;

        (start_index..start_index + count)
            .map(|index| Self::address_at(seed, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn derive(count: u32, start: u32) -> WalletResult<Vec<AddressRecord>> {
        let root = SolStrategy.derive_root(&SeedSource::Mnemonic(MNEMONIC.to_string()))?;
        SolStrategy.derive_children(&root, count, start)
    }

    #[test]
    fn test_paths_and_encoding() {
        let records = derive(3, 0).unwrap();

        assert_eq!(records[0].derivation_path, "m/44'/501'/0'/0'");
        assert_eq!(
            records[0].address,
            "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"
        );
        assert_eq!(records[2].derivation_path, "m/44'/501'/2'/0'");
        for record in &records {
            let raw = bs58::decode(&record.address).into_vec().unwrap();
            assert_eq!(raw.len(), 32);
        }
        assert_ne!(records[0].address, records[1].address);
    }

    #[test]
    fn test_deterministic_and_window_consistent() {
        let full = derive(4, 0).unwrap();
        let window = derive(2, 2).unwrap();
        assert_eq!(&full[2..], &window[..]);
        assert_eq!(window[0].sequence_number, 3);
    }

    #[test]
    fn test_xpub_is_unsupported() {
        let err = SolStrategy
            .derive_root(&SeedSource::ExtendedPublicKey("xpub661My".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            WalletError::UnsupportedSeedSource {
                currency: "SOL".to_string(),
                input: "XPUB".to_string(),
            }
        );
    }

    #[test]
    fn test_hardened_account_bound() {
        assert!(matches!(
            derive(1, 0x8000_0000),
            Err(WalletError::IndexOutOfRange { .. })
        ));
    }
}
