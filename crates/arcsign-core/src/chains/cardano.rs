// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// chains/cardano: Cardano Shelley base addresses
//
// CIP-1852 path shape over the hardened Ed25519 chain: payment key at
// m/1852'/1815'/0'/0'/0', stake key at m/1852'/1815'/0'/2'/0'. The address
// is header 0x01 (base address, mainnet) followed by the Blake2b-224 hashes
// of both public keys, bech32-encoded under `addr`.

use crate::bip32_utils::{ed25519_public, slip10_ed25519_key, HARDENED};
use crate::crypto::blake2b_224;
use crate::crypto::codecs;
use crate::error::Result;

const PURPOSE: u32 = 1852;
const BASE_ADDRESS_MAINNET: u8 = 0x01;
const ROLE_PAYMENT: u32 = 0;
const ROLE_STAKE: u32 = 2;

pub fn address(seed: &[u8], coin_type: u32, hrp: &str) -> Result<String> {
    let payment_hash = key_hash(seed, coin_type, ROLE_PAYMENT)?;
    let stake_hash = key_hash(seed, coin_type, ROLE_STAKE)?;

    let mut payload = Vec::with_capacity(1 + 28 + 28);
    payload.push(BASE_ADDRESS_MAINNET);
    payload.extend_from_slice(&payment_hash);
    payload.extend_from_slice(&stake_hash);
    codecs::bech32_encode(hrp, &payload)
}

fn key_hash(seed: &[u8], coin_type: u32, role: u32) -> Result<[u8; 28]> {
    let indices = [
        PURPOSE | HARDENED,
        coin_type | HARDENED,
        HARDENED,
        role | HARDENED,
        HARDENED,
    ];
    let key = slip10_ed25519_key(seed, &indices)?;
    Ok(blake2b_224(&ed25519_public(&key)))
}
