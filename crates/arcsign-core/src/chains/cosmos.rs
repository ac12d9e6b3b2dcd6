// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/cosmos: Cosmos-SDK account addresses
//
// RIPEMD160(SHA256(compressed_pubkey)) under a per-chain bech32 prefix.

use crate::crypto::codecs;
use crate::crypto::hash160;
use crate::error::Result;

use super::secp_leaf_pubkey;

pub fn address(seed: &[u8], path: &str, hrp: &str) -> Result<String> {
    let pubkey = secp_leaf_pubkey(seed, path)?;
    codecs::bech32_encode(hrp, &hash160(&pubkey))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::test_support::vector_seed;

    #[test]
    fn test_cosmos_hub_vector() {
        let seed = vector_seed();
        let address = address(seed.as_ref(), "m/44'/118'/0'/0/0", "cosmos").unwrap();
        assert_eq!(address, "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4");
    }

    #[test]
    fn test_prefix_changes_address_not_account() {
        let seed = vector_seed();
        let cosmos = address(seed.as_ref(), "m/44'/118'/0'/0/0", "cosmos").unwrap();
        let osmo = address(seed.as_ref(), "m/44'/118'/0'/0/0", "osmo").unwrap();
        assert_ne!(cosmos, osmo);
        // Same key hash, different HRP and checksum.
        assert_eq!(osmo, "osmo19rl4cm2hmr8afy4kldpxz3fka4jguq0a5m7df8");
    }

    #[test]
    fn test_coin_type_changes_account() {
        let seed = vector_seed();
        let hub = address(seed.as_ref(), "m/44'/118'/0'/0/0", "cosmos").unwrap();
        let kava = address(seed.as_ref(), "m/44'/459'/0'/0/0", "kava").unwrap();
        assert!(kava.starts_with("kava1"));
        assert_ne!(&hub[7..], &kava[5..]);
    }

    #[test]
    fn test_deterministic() {
        let seed = vector_seed();
        let a = address(seed.as_ref(), "m/44'/118'/0'/0/0", "cosmos").unwrap();
        let b = address(seed.as_ref(), "m/44'/118'/0'/0/0", "cosmos").unwrap();
        assert_eq!(a, b);
    }
}
