// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/stellar: Stellar account addresses
//
// SLIP-0010 Ed25519 at m/44'/148'/0' (SEP-0005), StrKey-encoded public key.

use crate::bip32_utils::ed25519_public;
use crate::crypto::codecs::{self, STRKEY_ACCOUNT_VERSION};
use crate::error::Result;

use super::ed25519_leaf_key;

pub fn address(seed: &[u8], path: &str) -> Result<String> {
    let key = ed25519_leaf_key(seed, path)?;
    let public = ed25519_public(&key);
    Ok(codecs::strkey_encode(STRKEY_ACCOUNT_VERSION, &public))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::test_support::vector_seed;

    #[test]
    fn test_vector() {
        let seed = vector_seed();
        let address = address(seed.as_ref(), "m/44'/148'/0'").unwrap();
        assert_eq!(
            address,
            "GB3JDWCQJCWMJ3IILWIGDTQJJC5567PGVEVXSCVPEQOTDN64VJBDQBYX"
        );
    }

    #[test]
    fn test_strkey_roundtrip() {
        let seed = vector_seed();
        let addr = address(seed.as_ref(), "m/44'/148'/0'").unwrap();
        let (version, payload) = codecs::strkey_decode(&addr).unwrap();
        assert_eq!(version, STRKEY_ACCOUNT_VERSION);
        assert_eq!(payload.len(), 32);
    }

    #[test]
    fn test_deterministic() {
        let seed = vector_seed();
        let a = address(seed.as_ref(), "m/44'/148'/0'").unwrap();
        let b = address(seed.as_ref(), "m/44'/148'/0'").unwrap();
        assert_eq!(a, b);
    }
}
