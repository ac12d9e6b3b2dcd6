// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/ripple: XRP Ledger classic addresses
//
// Hash160 of the compressed pubkey, version byte 0x00, Base58Check with the
// Ripple alphabet.

use crate::crypto::codecs;
use crate::crypto::hash160;
use crate::error::Result;

use super::secp_leaf_pubkey;

pub fn address(seed: &[u8], path: &str) -> Result<String> {
    let pubkey = secp_leaf_pubkey(seed, path)?;
    let account_id = hash160(&pubkey);

    let mut payload = Vec::with_capacity(21);
    payload.push(0x00);
    payload.extend_from_slice(&account_id);
    Ok(codecs::base58check_encode_ripple(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::test_support::vector_seed;

    #[test]
    fn test_vector() {
        let seed = vector_seed();
        let address = address(seed.as_ref(), "m/44'/144'/0'/0/0").unwrap();
        assert_eq!(address, "rHsMGQEkVNJmpGWs8XUBoTBiAAbwxZN5v3");
    }

    #[test]
    fn test_roundtrip_through_decoder() {
        let seed = vector_seed();
        let addr = address(seed.as_ref(), "m/44'/144'/0'/0/0").unwrap();
        let payload = codecs::base58check_decode_ripple(&addr).unwrap();
        assert_eq!(payload.len(), 21);
        assert_eq!(payload[0], 0x00);
    }

    #[test]
    fn test_deterministic() {
        let seed = vector_seed();
        let a = address(seed.as_ref(), "m/44'/144'/0'/0/0").unwrap();
        let b = address(seed.as_ref(), "m/44'/144'/0'/0/0").unwrap();
        assert_eq!(a, b);
    }
}
