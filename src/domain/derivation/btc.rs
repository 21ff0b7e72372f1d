//! Bitcoin (BIP84 Native SegWit) 派生策略

use crate::{
    domain::{
        address_codec::encode_secp256k1,
        derivation::{
            bip32_root_from_account_xpub, bip32_root_from_mnemonic, derive_bip32_children,
            DerivationRoot, DerivationStrategy,
        },
        types::{AddressEncoding, AddressRecord, CurrencyDescriptor, InputType, SeedSource},
    },
    error::WalletResult,
};

pub static BTC_DESCRIPTOR: CurrencyDescriptor = CurrencyDescriptor {
    code: "BTC",
    coin_type: 0,
    mnemonic_base_path: "m/84'/0'/0'/0",
    supported_inputs: &[InputType::Mnemonic, InputType::Xpub],
    encoding: AddressEncoding::Bech32 { hrp: "bc" },
};

pub struct BtcStrategy;

impl DerivationStrategy for BtcStrategy {
    fn descriptor(&self) -> &'static CurrencyDescriptor {
        &BTC_DESCRIPTOR
    }

    fn derive_root(&self, seed: &SeedSource) -> WalletResult<DerivationRoot> {
        self.descriptor().ensure_supports(seed)?;

        match seed {
            SeedSource::Mnemonic(phrase) => {
                bip32_root_from_mnemonic(phrase, BTC_DESCRIPTOR.mnemonic_base_path)
            }
            SeedSource::ExtendedPublicKey(key) => bip32_root_from_account_xpub(key),
        }
    }

    fn derive_children(
        &self,
        root: &DerivationRoot,
        count: u32,
        start_index: u32,
    ) -> WalletResult<Vec<AddressRecord>> {
        derive_bip32_children(root, count, start_index, |pk| {
            encode_secp256k1(BTC_DESCRIPTOR.encoding, pk)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bitcoin::bip32::{DerivationPath, Xpriv, Xpub};

    use super::*;
    use crate::{
        domain::{
            derivation::{mnemonic_to_seed, HARDENED_OFFSET, SECP},
            key_format::{with_version, YPUB_VERSION, ZPUB_VERSION},
        },
        error::WalletError,
    };

    const BIP84_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn derive(seed: SeedSource, count: u32, start: u32) -> WalletResult<Vec<AddressRecord>> {
        let root = BtcStrategy.derive_root(&seed)?;
        BtcStrategy.derive_children(&root, count, start)
    }

    fn account_xpub() -> String {
        let seed = mnemonic_to_seed(BIP84_MNEMONIC).unwrap();
        let master = Xpriv::new_master(bitcoin::Network::Bitcoin, &seed[..]).unwrap();
        let account = master
            .derive_priv(&SECP, &DerivationPath::from_str("m/84'/0'/0'").unwrap())
            .unwrap();
        Xpub::from_priv(&SECP, &account).to_string()
    }

    #[test]
    fn test_bip84_vector() {
        let records = derive(SeedSource::Mnemonic(BIP84_MNEMONIC.to_string()), 1, 0).unwrap();
        assert_eq!(records[0].address, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
        assert_eq!(records[0].derivation_path, "m/84'/0'/0'/0/0");
        assert_eq!(records[0].sequence_number, 1);
    }

    #[test]
    fn test_zpub_and_xpub_agree_with_mnemonic() {
        let xpub = account_xpub();
        let zpub = with_version(&xpub, ZPUB_VERSION).unwrap();
        let ypub = with_version(&xpub, YPUB_VERSION).unwrap();

        let expected = derive(SeedSource::Mnemonic(BIP84_MNEMONIC.to_string()), 3, 5).unwrap();
        for key in [xpub, zpub, ypub] {
            let records = derive(SeedSource::ExtendedPublicKey(key), 3, 5).unwrap();
            assert_eq!(records.len(), 3);
            for (got, want) in records.iter().zip(&expected) {
                assert_eq!(got.address, want.address);
                assert_eq!(got.sequence_number, want.sequence_number);
            }
            assert_eq!(records[0].derivation_path, "m/0/5");
        }
    }

    #[test]
    fn test_pagination_is_continuous() {
        let seed = || SeedSource::Mnemonic(BIP84_MNEMONIC.to_string());
        let all = derive(seed(), 6, 0).unwrap();
        let mut paged = derive(seed(), 3, 0).unwrap();
        paged.extend(derive(seed(), 3, 3).unwrap());

        assert_eq!(all, paged);
        let numbers: Vec<u64> = all.iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_last_non_hardened_index() {
        let records = derive(
            SeedSource::Mnemonic(BIP84_MNEMONIC.to_string()),
            1,
            HARDENED_OFFSET - 1,
        )
        .unwrap();
        assert_eq!(records[0].sequence_number, u64::from(HARDENED_OFFSET));
        assert!(records[0].address.starts_with("bc1q"));
    }

    #[test]
    fn test_range_errors() {
        let seed = SeedSource::Mnemonic(BIP84_MNEMONIC.to_string());
        assert!(matches!(
            derive(seed.clone(), 0, 0),
            Err(WalletError::InvalidRange(_))
        ));
        assert!(matches!(
            derive(seed, 2, HARDENED_OFFSET - 1),
            Err(WalletError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_invalid_mnemonic() {
        let err = derive(SeedSource::Mnemonic("not a mnemonic".to_string()), 1, 0).unwrap_err();
        assert!(matches!(err, WalletError::MalformedSeed(_)));
    }
}
