// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/evm: Ethereum and every EVM network
//
// Uncompressed pubkey (minus the 0x04 prefix) → Keccak-256 → last 20 bytes,
// rendered with the EIP-55 mixed-case checksum.

use crate::crypto::keccak256;
use crate::error::Result;

use super::secp_leaf_pubkey_uncompressed;

pub fn address(seed: &[u8], path: &str) -> Result<String> {
    let pubkey = secp_leaf_pubkey_uncompressed(seed, path)?;
    let hash = keccak256(&pubkey);
    Ok(eip55_checksum(&hash[12..32]))
}

/// EIP-55: uppercase a nibble when the corresponding nibble of
/// Keccak-256(lowercase_hex_address) is ≥ 8.
pub fn eip55_checksum(address: &[u8]) -> String {
    let hex_addr = hex::encode(address);
    let hash = keccak256(hex_addr.as_bytes());

    let mut out = String::with_capacity(2 + hex_addr.len());
    out.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::test_support::vector_seed;

    #[test]
    fn test_eth_vector() {
        // BIP-44 reference address for the all-abandon phrase.
        let seed = vector_seed();
        let address = address(seed.as_ref(), "m/44'/60'/0'/0/0").unwrap();
        assert_eq!(address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
    }

    #[test]
    fn test_eip55_known_address() {
        let bytes = hex::decode("d8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap();
        assert_eq!(
            eip55_checksum(&bytes),
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        );
    }

    #[test]
    fn test_eip55_all_caps_vector() {
        // EIP-55 reference vector.
        let bytes = hex::decode("52908400098527886e0f7030069857d2e4169ee7").unwrap();
        assert_eq!(
            eip55_checksum(&bytes),
            "0x52908400098527886E0F7030069857D2E4169EE7"
        );
    }

    #[test]
    fn test_format_and_determinism() {
        let seed = vector_seed();
        let a = address(seed.as_ref(), "m/44'/60'/0'/0/0").unwrap();
        let b = address(seed.as_ref(), "m/44'/60'/0'/0/0").unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("0x"));
        assert_eq!(a.len(), 42);
    }

    #[test]
    fn test_coin_type_separates_accounts() {
        let seed = vector_seed();
        let eth = address(seed.as_ref(), "m/44'/60'/0'/0/0").unwrap();
        let etc = address(seed.as_ref(), "m/44'/61'/0'/0/0").unwrap();
        assert_ne!(eth, etc);
        assert_eq!(etc, "0xFA22515E43658ce56A7682B801e9B5456f511420");
    }
}
