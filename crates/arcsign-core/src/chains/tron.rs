// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/tron: TRON mainnet addresses
//
// Keccak-256 of the uncompressed pubkey, last 20 bytes, 0x41 prefix,
// Base58Check. Same hash as EVM, different dressing.

use crate::crypto::codecs;
use crate::crypto::keccak256;
use crate::error::Result;

use super::secp_leaf_pubkey_uncompressed;

const MAINNET_PREFIX: u8 = 0x41;

pub fn address(seed: &[u8], path: &str) -> Result<String> {
    let pubkey = secp_leaf_pubkey_uncompressed(seed, path)?;
    let hash = keccak256(&pubkey);

    let mut payload = Vec::with_capacity(21);
    payload.push(MAINNET_PREFIX);
    payload.extend_from_slice(&hash[12..32]);
    Ok(codecs::base58check_encode(&payload))
}
