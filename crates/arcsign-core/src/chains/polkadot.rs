// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/polkadot: Substrate SS58 addresses (Polkadot, Kusama)
//
// A hardened m/44'/coin_type'/0'/0' chain yields the 32-byte mini secret;
// schnorrkel expands it to the SR25519 public key, which SS58 wraps with the
// network prefix and a Blake2b checksum.

use crate::bip32_utils::sr25519_public;
use crate::crypto::codecs;
use crate::error::Result;

use super::ed25519_leaf_key;

pub fn address(seed: &[u8], path: &str, prefix: u16) -> Result<String> {
    let mini_secret = ed25519_leaf_key(seed, path)?;
    let public = sr25519_public(&mini_secret)?;
    Ok(codecs::ss58_encode(prefix, &public))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::test_support::vector_seed;

    #[test]
    fn test_polkadot_vector() {
        // Regression vector for this catalog's frozen derivation (hardened
        // chain to a mini secret, Ed25519-style expansion).
        let seed = vector_seed();
        let address = address(seed.as_ref(), "m/44'/354'/0'/0'", 0).unwrap();
        assert_eq!(address, "129DTedGKgwUYY5fZkeBq3nhe3b7yXHEfAotbvSJa2zBVMc2");
    }

    #[test]
    fn test_kusama_vector() {
        let seed = vector_seed();
        let address = address(seed.as_ref(), "m/44'/434'/0'/0'", 2).unwrap();
        assert_eq!(address, "CxLFnbx9LrdMRCKqSrgbhTELZQkWnbCAQTKPGEX4CM6cGUE");
    }

    #[test]
    fn test_prefix_changes_text_only() {
        let seed = vector_seed();
        let dot = address(seed.as_ref(), "m/44'/354'/0'/0'", 0).unwrap();
        let dot_as_ksm = address(seed.as_ref(), "m/44'/354'/0'/0'", 2).unwrap();
        assert_ne!(dot, dot_as_ksm);
    }

    #[test]
    fn test_deterministic() {
        let seed = vector_seed();
        let a = address(seed.as_ref(), "m/44'/434'/0'/0'", 2).unwrap();
        let b = address(seed.as_ref(), "m/44'/434'/0'/0'", 2).unwrap();
        assert_eq!(a, b);
    }
}
