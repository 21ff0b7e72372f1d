//! Bitcoin Cash (P2PKH CashAddr) 派生策略

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

pub static BCH_DESCRIPTOR: CurrencyDescriptor = CurrencyDescriptor {
    code: "BCH",
    coin_type: 145,
    mnemonic_base_path: "m/44'/145'/0'/0",
    supported_inputs: &[InputType::Mnemonic, InputType::Xpub],
    encoding: AddressEncoding::CashAddr {
        prefix: "bitcoincash",
    },
};

pub struct BchStrategy;

impl DerivationStrategy for BchStrategy {
    fn descriptor(&self) -> &'static CurrencyDescriptor {
        &BCH_DESCRIPTOR
    }

    fn derive_root(&self, seed: &SeedSource) -> WalletResult<DerivationRoot> {
        self.descriptor().ensure_supports(seed)?;

        match seed {
            SeedSource::Mnemonic(phrase) => {
                bip32_root_from_mnemonic(phrase, BCH_DESCRIPTOR.mnemonic_base_path)
            }
            // 与 BTC/LTC 一致：账户级扩展公钥，地址在外部链 m/0/i
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
            encode_secp256k1(BCH_DESCRIPTOR.encoding, pk)
        })
    }
}
