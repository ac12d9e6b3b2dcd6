// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// crypto: deterministic primitives — Argon2id KDF, AES-256-GCM, hashes, RNG
//
// Functions:
//   random_bytes()     — the only source of non-determinism in the core
//   kdf()              — Argon2id with caller-visible params (persisted per blob)
//   aead_seal()/open() — AES-256-GCM with associated data
//   sha256/sha256d/sha512/hash160/keccak256/blake2b_512/blake2b_224/hmac_sha512

pub mod codecs;

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Version};
use blake2::Blake2b512;
use hmac::{Hmac, Mac};
use rand::RngCore;
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroizing;

use crate::error::{CoreError, Result};

type HmacSha512 = Hmac<Sha512>;
type Blake2b224 = blake2::Blake2b<blake2::digest::consts::U28>;

pub const KEY_LEN: usize = 32;
pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;

/// Argon2id cost parameters. Persisted alongside every blob so they can be
/// tuned without breaking older artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfCost {
    /// Memory cost in KiB.
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for KdfCost {
    fn default() -> Self {
        // 64 MiB, 3 passes, 4 lanes.
        Self {
            m_cost: 64 * 1024,
            t_cost: 3,
            p_cost: 4,
        }
    }
}

/// Fill a fixed-size buffer from the OS CSPRNG.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// Derive a 32-byte AEAD key from a password with Argon2id.
pub fn kdf(password: &[u8], salt: &[u8], cost: KdfCost) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = argon2::Params::new(cost.m_cost, cost.t_cost, cost.p_cost, Some(KEY_LEN))
        .map_err(|e| CoreError::Internal(format!("argon2 params: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password, salt, key.as_mut())
        .map_err(|e| CoreError::Internal(format!("argon2: {e}")))?;
    Ok(key)
}

/// AES-256-GCM encrypt. Output is ciphertext with the 16-byte tag appended.
pub fn aead_seal(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CoreError::Internal(format!("cipher init: {e}")))?;
    cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| CoreError::Internal(format!("aead seal: {e}")))
}

/// AES-256-GCM decrypt. A tag mismatch is the only way a wrong password ever
/// manifests, so that failure maps straight to `WrongPassword`.
pub fn aead_open(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CoreError::Internal(format!("cipher init: {e}")))?;
    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| CoreError::WrongPassword)
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice, the Base58Check checksum hash.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

/// RIPEMD160(SHA256(data)), the Bitcoin-family pubkey hash.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Blake2b512::digest(data));
    out
}

pub fn blake2b_224(data: &[u8]) -> [u8; 28] {
    let mut out = [0u8; 28];
    out.copy_from_slice(&Blake2b224::digest(data));
    out
}

pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    // HMAC accepts any key length; new_from_slice cannot fail.
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}
