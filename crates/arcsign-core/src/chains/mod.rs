// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains: address derivation for every catalog entry
//
// Types:
//   DerivedAddress    — one row of the address book
//   GenerationReport  — per-chain outcome of a bulk generation
// Functions:
//   derivation_path()     — the frozen path convention per encoding family
//   encode_address()      — seed + descriptor → canonical address text
//   derive_address_book() — all catalog entries, in rank order

pub mod bitcoin_like;
pub mod cardano;
pub mod cosmos;
pub mod evm;
pub mod polkadot;
pub mod ripple;
pub mod solana;
pub mod stellar;
pub mod tron;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bip32_utils::{self, ExtendedKey};
use crate::catalog::{self, Category, ChainDescriptor, Curve, Encoding};
use crate::error::{CoreError, Result};

/// One derived receiving address. Field order is the canonical serialisation
/// order used for the address-book checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAddress {
    pub rank: u32,
    pub symbol: String,
    pub name: String,
    pub coin_type: u32,
    pub derivation_path: String,
    pub address: String,
    pub category: Category,
    pub curve: Curve,
}

/// Outcome of a bulk generation: per-chain failures never abort the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub succeeded: usize,
    pub failed: Vec<FailedChain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedChain {
    pub symbol: String,
    pub reason: String,
}

/// The derivation path convention frozen per encoding family:
/// BIP-84 for native SegWit, fully-hardened SLIP-0010 shapes for the
/// Ed25519/SR25519 families, CIP-1852 for Cardano, BIP-44 otherwise.
pub fn derivation_path(chain: &ChainDescriptor) -> String {
    let ct = chain.coin_type;
    match chain.encoding {
        Encoding::Bech32P2wpkh { .. } => format!("m/84'/{ct}'/0'/0/0"),
        Encoding::Ed25519Base58 => format!("m/44'/{ct}'/0'/0'"),
        Encoding::StrKey => format!("m/44'/{ct}'/0'"),
        Encoding::Ss58 { .. } => format!("m/44'/{ct}'/0'/0'"),
        Encoding::CardanoBech32 { .. } => format!("m/1852'/{ct}'/0'/0'/0'"),
        _ => format!("m/44'/{ct}'/0'/0/0"),
    }
}

/// Encode the canonical address of one chain. Pure with respect to the seed.
pub fn encode_address(seed: &[u8], chain: &ChainDescriptor) -> Result<String> {
    let path = derivation_path(chain);
    match chain.encoding {
        Encoding::Bech32P2wpkh { hrp } => bitcoin_like::p2wpkh(seed, &path, hrp),
        Encoding::Base58P2pkh { version } => bitcoin_like::p2pkh(seed, &path, version),
        Encoding::CashAddr { hrp } => bitcoin_like::cashaddr(seed, &path, hrp),
        Encoding::Keccak256Eip55 => evm::address(seed, &path),
        Encoding::Base58RippleLike => ripple::address(seed, &path),
        Encoding::TronBase58 => tron::address(seed, &path),
        Encoding::Ed25519Base58 => solana::address(seed, &path),
        Encoding::StrKey => stellar::address(seed, &path),
        Encoding::CosmosBech32 { hrp } => cosmos::address(seed, &path, hrp),
        Encoding::CardanoBech32 { hrp } => cardano::address(seed, chain.coin_type, hrp),
        Encoding::Ss58 { prefix } => polkadot::address(seed, &path, prefix),
        Encoding::Unsupported => Err(CoreError::Unsupported(chain.symbol.to_string())),
    }
}

/// Derive the full address book in catalog rank order. A failing chain is
/// skipped and recorded; the remaining chains still succeed.
pub fn derive_address_book(seed: &[u8]) -> (Vec<DerivedAddress>, GenerationReport) {
    let mut addresses = Vec::with_capacity(catalog::all().len());
    let mut failed = Vec::new();

    for chain in catalog::all() {
        match encode_address(seed, chain) {
            Ok(address) => addresses.push(DerivedAddress {
                rank: chain.rank,
                symbol: chain.symbol.to_string(),
                name: chain.name.to_string(),
                coin_type: chain.coin_type,
                derivation_path: derivation_path(chain),
                address,
                category: chain.category,
                curve: chain.curve,
            }),
            Err(e) => {
                warn!(symbol = chain.symbol, error = %e, "chain skipped during address generation");
                failed.push(FailedChain {
                    symbol: chain.symbol.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let report = GenerationReport {
        succeeded: addresses.len(),
        failed,
    };
    (addresses, report)
}

pub(crate) fn secp_leaf(seed: &[u8], path: &str) -> Result<ExtendedKey> {
    let master = bip32_utils::master_key(seed)?;
    bip32_utils::derive_path(&master, path)
}

pub(crate) fn secp_leaf_pubkey(seed: &[u8], path: &str) -> Result<[u8; 33]> {
    let leaf = secp_leaf(seed, path)?;
    bip32_utils::secp_pubkey(&leaf.key)
}

pub(crate) fn secp_leaf_pubkey_uncompressed(seed: &[u8], path: &str) -> Result<[u8; 64]> {
    let leaf = secp_leaf(seed, path)?;
    bip32_utils::secp_pubkey_uncompressed(&leaf.key)
}

pub(crate) fn ed25519_leaf_key(seed: &[u8], path: &str) -> Result<zeroize::Zeroizing<[u8; 32]>> {
    let indices = bip32_utils::parse_path(path)?;
    bip32_utils::slip10_ed25519_key(seed, &indices)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::bip39_utils;
    use zeroize::Zeroizing;

    pub const VECTOR_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    pub fn vector_seed() -> Zeroizing<[u8; 64]> {
        bip39_utils::validate_mnemonic(VECTOR_PHRASE)
            .unwrap()
            .to_seed("")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::vector_seed;
    use super::*;

    #[test]
    fn test_address_book_covers_all_supported_chains() {
        let seed = vector_seed();
        let (addresses, report) = derive_address_book(seed.as_ref());

        // Monero is the one catalog entry without an encoder.
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].symbol, "XMR");
        assert_eq!(addresses.len(), catalog::all().len() - 1);
        assert_eq!(report.succeeded, addresses.len());
    }

    #[test]
    fn test_address_book_is_rank_ordered() {
        let seed = vector_seed();
        let (addresses, _) = derive_address_book(seed.as_ref());
        for pair in addresses.windows(2) {
            assert!(pair[0].rank < pair[1].rank);
        }
    }

    #[test]
    fn test_address_book_deterministic() {
        let seed = vector_seed();
        let (a, _) = derive_address_book(seed.as_ref());
        let (b, _) = derive_address_book(seed.as_ref());
        assert_eq!(a, b);
    }

    #[test]
    fn test_derivation_path_conventions() {
        let btc = catalog::by_symbol("BTC").unwrap();
        assert_eq!(derivation_path(btc), "m/84'/0'/0'/0/0");
        let eth = catalog::by_symbol("ETH").unwrap();
        assert_eq!(derivation_path(eth), "m/44'/60'/0'/0/0");
        let sol = catalog::by_symbol("SOL").unwrap();
        assert_eq!(derivation_path(sol), "m/44'/501'/0'/0'");
        let xlm = catalog::by_symbol("XLM").unwrap();
        assert_eq!(derivation_path(xlm), "m/44'/148'/0'");
        let ada = catalog::by_symbol("ADA").unwrap();
        assert_eq!(derivation_path(ada), "m/1852'/1815'/0'/0'/0'");
    }

    #[test]
    fn test_shared_coin_type_shares_account() {
        // EVM networks on coin type 60 resolve to the same address as ETH.
        let seed = vector_seed();
        let eth = encode_address(seed.as_ref(), catalog::by_symbol("ETH").unwrap()).unwrap();
        let arb = encode_address(seed.as_ref(), catalog::by_symbol("ARB").unwrap()).unwrap();
        let pol = encode_address(seed.as_ref(), catalog::by_symbol("POL").unwrap()).unwrap();
        assert_eq!(eth, arb);
        assert_ne!(eth, pol);
    }
}
