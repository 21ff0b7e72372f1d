//! Litecoin (Native SegWit) 派生策略

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

pub static LTC_DESCRIPTOR: CurrencyDescriptor = CurrencyDescriptor {
    code: "LTC",
    coin_type: 2,
    mnemonic_base_path: "m/84'/2'/0'/0",
    supported_inputs: &[InputType::Mnemonic, InputType::Xpub],
    encoding: AddressEncoding::Bech32 { hrp: "ltc" },
};

pub struct LtcStrategy;

impl DerivationStrategy for LtcStrategy {
    fn descriptor(&self) -> &'static CurrencyDescriptor {
        &LTC_DESCRIPTOR
    }

    fn derive_root(&self, seed: &SeedSource) -> WalletResult<DerivationRoot> {
        self.descriptor().ensure_supports(seed)?;

        match seed {
            SeedSource::Mnemonic(phrase) => {
                bip32_root_from_mnemonic(phrase, LTC_DESCRIPTOR.mnemonic_base_path)
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
            encode_secp256k1(LTC_DESCRIPTOR.encoding, pk)
        })
    }
}
