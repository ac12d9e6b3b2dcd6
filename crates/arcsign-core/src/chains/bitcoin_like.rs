// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/bitcoin_like: the UTXO family — P2WPKH, legacy P2PKH, CashAddr
//
// All three share Hash160 of the compressed pubkey; only the textual
// encoding and the derivation purpose differ.

use crate::crypto::codecs;
use crate::crypto::hash160;
use crate::error::Result;

use super::secp_leaf_pubkey;

/// Native SegWit: bech32(hrp, v0, RIPEMD160(SHA256(compressed_pubkey))).
pub fn p2wpkh(seed: &[u8], path: &str, hrp: &str) -> Result<String> {
    let pubkey = secp_leaf_pubkey(seed, path)?;
    codecs::segwit_v0_encode(hrp, &hash160(&pubkey))
}

/// Legacy: base58check(version ∥ RIPEMD160(SHA256(compressed_pubkey))).
/// Zcash transparent addresses use a two-byte version, hence the slice.
pub fn p2pkh(seed: &[u8], path: &str, version: &[u8]) -> Result<String> {
    let pubkey = secp_leaf_pubkey(seed, path)?;
    let hash = hash160(&pubkey);

    let mut payload = Vec::with_capacity(version.len() + 20);
    payload.extend_from_slice(version);
    payload.extend_from_slice(&hash);
    Ok(codecs::base58check_encode(&payload))
}

/// Bitcoin Cash CashAddr over the same key hash.
pub fn cashaddr(seed: &[u8], path: &str, hrp: &str) -> Result<String> {
    let pubkey = secp_leaf_pubkey(seed, path)?;
    codecs::cashaddr_encode(hrp, &hash160(&pubkey))
}
