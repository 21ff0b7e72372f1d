//! Ethereum 派生策略
//!
//! 助记词路径 m/44'/60'/0'/0/i；xpub 输入直接视为地址层的父节点，
//! 不做版本前缀标准化。

use std::sync::Arc;

use crate::{
    domain::{
        address_codec::encode_secp256k1,
        balance::BalanceEnricher,
        derivation::{
            bip32_root_from_mnemonic, derive_bip32_children, parse_xpub, DerivationRoot,
            DerivationStrategy,
        },
        types::{AddressEncoding, AddressRecord, CurrencyDescriptor, InputType, SeedSource},
    },
    error::{WalletError, WalletResult},
};

pub static ETH_DESCRIPTOR: CurrencyDescriptor = CurrencyDescriptor {
    code: "ETH",
    coin_type: 60,
    mnemonic_base_path: "m/44'/60'/0'/0",
    supported_inputs: &[InputType::Mnemonic, InputType::Xpub],
    encoding: AddressEncoding::Hex,
};

/// Ethereum 策略，可选挂载余额富化器
#[derive(Default)]
pub struct EthStrategy {
    enricher: Option<Arc<dyn BalanceEnricher>>,
}

impl EthStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enricher(enricher: Arc<dyn BalanceEnricher>) -> Self {
        Self {
            enricher: Some(enricher),
        }
    }
}

impl DerivationStrategy for EthStrategy {
    fn descriptor(&self) -> &'static CurrencyDescriptor {
        &ETH_DESCRIPTOR
    }

    fn derive_root(&self, seed: &SeedSource) -> WalletResult<DerivationRoot> {
        self.descriptor().ensure_supports(seed)?;

        match seed {
            SeedSource::Mnemonic(phrase) => {
                bip32_root_from_mnemonic(phrase, ETH_DESCRIPTOR.mnemonic_base_path)
            }
            SeedSource::ExtendedPublicKey(key) => {
                let node = parse_xpub(key).map_err(|e| match e {
                    WalletError::MalformedSeed(msg) => {
                        WalletError::MalformedSeed(format!("Invalid Ethereum XPUB: {}", msg))
                    }
                    other => other,
                })?;
                Ok(DerivationRoot::Bip32 {
                    node,
                    base_path: "m".to_string(),
                })
            }
        }
    }

    fn derive_children(
        &self,
        root: &DerivationRoot,
        count: u32,
        start_index: u32,
    ) -> WalletResult<Vec<AddressRecord>> {
        derive_bip32_children(root, count, start_index, |pk| {
            encode_secp256k1(ETH_DESCRIPTOR.encoding, pk)
        })
    }

    fn enricher(&self) -> Option<Arc<dyn BalanceEnricher>> {
        self.enricher.clone()
    }
}
