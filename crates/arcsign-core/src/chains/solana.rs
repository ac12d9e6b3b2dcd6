// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/solana: Solana addresses
//
// SLIP-0010 Ed25519 at the fully-hardened m/44'/501'/0'/0'; the address is
// the Base58 of the public key itself.

use crate::bip32_utils::ed25519_public;
use crate::error::Result;

use super::ed25519_leaf_key;

pub fn address(seed: &[u8], path: &str) -> Result<String> {
    let key = ed25519_leaf_key(seed, path)?;
    let public = ed25519_public(&key);
    Ok(bs58::encode(public).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::test_support::vector_seed;

    #[test]
    fn test_vector() {
        // Fully-hardened m/44'/501'/0'/0', the account other wallets derive
        // for this phrase.
        let seed = vector_seed();
        let address = address(seed.as_ref(), "m/44'/501'/0'/0'").unwrap();
        assert_eq!(address, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
        let decoded = bs58::decode(&address).into_vec().unwrap();
        assert_eq!(decoded.len(), 32);
    }

    #[test]
    fn test_deterministic() {
        let seed = vector_seed();
        let a = address(seed.as_ref(), "m/44'/501'/0'/0'").unwrap();
        let b = address(seed.as_ref(), "m/44'/501'/0'/0'").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hardened_path_differs_from_account_one() {
        let seed = vector_seed();
        let account0 = address(seed.as_ref(), "m/44'/501'/0'/0'").unwrap();
        let account1 = address(seed.as_ref(), "m/44'/501'/1'/0'").unwrap();
        assert_ne!(account0, account1);
    }
}
