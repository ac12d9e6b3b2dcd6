// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// bip32_utils: hierarchical deterministic key derivation
//
// Types:
//   ExtendedKey — BIP32 record (key, chain code, depth, fingerprint, index)
// Functions:
//   master_key()          — HMAC-SHA512("Bitcoin seed", seed)
//   derive_child()        — hardened and non-hardened secp256k1 derivation
//   derive_path()         — absolute path, e.g. m/44'/0'/0'/0/0
//   slip10_ed25519_key()  — hardened-only chain for Ed25519 and SR25519 leaves
//   secp_pubkey() / ed25519_public() / sr25519_public()

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::{Field, PrimeField};
use k256::{FieldBytes, Scalar};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{hash160, hmac_sha512};
use crate::error::{CoreError, Result};

pub const HARDENED: u32 = 0x8000_0000;

/// A BIP32 extended private key. The secret halves are zeroised on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    pub key: [u8; 32],
    pub chain_code: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_index: u32,
}

impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("key", &"<redacted>")
            .field("chain_code", &"<redacted>")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .finish()
    }
}

fn parse_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes)))
}

/// BIP32 master key: HMAC-SHA512 keyed with "Bitcoin seed".
pub fn master_key(seed: &[u8]) -> Result<ExtendedKey> {
    let mut i = hmac_sha512(b"Bitcoin seed", seed);

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&i[..32]);
    chain_code.copy_from_slice(&i[32..]);
    i.zeroize();

    match parse_scalar(&key) {
        Some(s) if !bool::from(s.is_zero()) => Ok(ExtendedKey {
            key,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
        }),
        _ => {
            key.zeroize();
            chain_code.zeroize();
            Err(CoreError::InvalidKey)
        }
    }
}

/// Derive one child. Index ≥ 2³¹ is hardened and feeds the private key into
/// the HMAC; a non-hardened index feeds the serialised public key.
///
/// Returns `CoreError::Index` when I_L falls outside the curve order or the
/// child scalar is zero; per BIP32 the caller moves on to the next index.
pub fn derive_child(parent: &ExtendedKey, index: u32) -> Result<ExtendedKey> {
    let parent_pub = secp_pubkey(&parent.key)?;

    let mut data = Zeroizing::new(Vec::with_capacity(37));
    if index & HARDENED != 0 {
        data.push(0x00);
        data.extend_from_slice(&parent.key);
    } else {
        data.extend_from_slice(&parent_pub);
    }
    data.extend_from_slice(&index.to_be_bytes());

    let mut i = hmac_sha512(&parent.chain_code, &data);
    let mut il = [0u8; 32];
    il.copy_from_slice(&i[..32]);

    let tweak = match parse_scalar(&il) {
        Some(t) => t,
        None => {
            il.zeroize();
            i.zeroize();
            return Err(CoreError::Index);
        }
    };
    il.zeroize();
    let parent_scalar = parse_scalar(&parent.key).ok_or(CoreError::InvalidKey)?;
    let child_scalar = tweak + parent_scalar;
    if bool::from(child_scalar.is_zero()) {
        i.zeroize();
        return Err(CoreError::Index);
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&child_scalar.to_bytes());
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&i[32..]);
    i.zeroize();

    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&hash160(&parent_pub)[..4]);

    Ok(ExtendedKey {
        key,
        chain_code,
        depth: parent.depth.saturating_add(1),
        parent_fingerprint,
        child_index: index,
    })
}

fn derive_child_retrying(parent: &ExtendedKey, index: u32) -> Result<ExtendedKey> {
    // An unusable I_L is a ~2⁻¹²⁷ event; BIP32 says try the next index.
    let mut idx = index;
    for _ in 0..4 {
        match derive_child(parent, idx) {
            Err(CoreError::Index) => idx = idx.wrapping_add(1),
            other => return other,
        }
    }
    Err(CoreError::Index)
}

/// Parse an absolute derivation path such as `m/44'/60'/0'/0/0`.
pub fn parse_path(path: &str) -> Result<Vec<u32>> {
    let mut parts = path.split('/');
    if parts.next() != Some("m") {
        return Err(CoreError::Internal(format!(
            "derivation path must be absolute: {path}"
        )));
    }
    parts
        .map(|segment| {
            let (digits, hardened) = match segment.strip_suffix('\'') {
                Some(d) => (d, true),
                None => (segment, false),
            };
            let index: u32 = digits
                .parse()
                .map_err(|_| CoreError::Internal(format!("bad path segment: {segment}")))?;
            if index >= HARDENED {
                return Err(CoreError::Internal(format!(
                    "path index out of range: {segment}"
                )));
            }
            Ok(if hardened { index | HARDENED } else { index })
        })
        .collect()
}

/// Iteratively derive along an absolute path from the master key.
pub fn derive_path(master: &ExtendedKey, path: &str) -> Result<ExtendedKey> {
    let mut key = master.clone();
    for index in parse_path(path)? {
        key = derive_child_retrying(&key, index)?;
    }
    Ok(key)
}

/// SLIP-0010 hardened-only chain keyed with "ed25519 seed".
///
/// Every index must carry the hardened bit; the construction never touches
/// curve arithmetic, which also makes it usable for SR25519 mini secrets.
pub fn slip10_ed25519_key(seed: &[u8], indices: &[u32]) -> Result<Zeroizing<[u8; 32]>> {
    let mut i = hmac_sha512(b"ed25519 seed", seed);
    let mut key = Zeroizing::new([0u8; 32]);
    let mut chain_code = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&i[..32]);
    chain_code.copy_from_slice(&i[32..]);
    i.zeroize();

    for &index in indices {
        if index & HARDENED == 0 {
            return Err(CoreError::Index);
        }
        let mut data = Zeroizing::new(Vec::with_capacity(37));
        data.push(0x00);
        data.extend_from_slice(key.as_ref());
        data.extend_from_slice(&index.to_be_bytes());

        let mut child = hmac_sha512(chain_code.as_ref(), &data);
        key.copy_from_slice(&child[..32]);
        chain_code.copy_from_slice(&child[32..]);
        child.zeroize();
    }

    Ok(key)
}

/// Compressed secp256k1 public key (33 bytes).
pub fn secp_pubkey(private_key: &[u8; 32]) -> Result<[u8; 33]> {
    let signing_key =
        SigningKey::from_bytes(private_key.into()).map_err(|_| CoreError::InvalidKey)?;
    let encoded = signing_key.verifying_key().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(encoded.as_bytes());
    Ok(out)
}

/// Uncompressed secp256k1 public key, the 64 bytes after the 0x04 prefix.
pub fn secp_pubkey_uncompressed(private_key: &[u8; 32]) -> Result<[u8; 64]> {
    let signing_key =
        SigningKey::from_bytes(private_key.into()).map_err(|_| CoreError::InvalidKey)?;
    let encoded = signing_key.verifying_key().to_encoded_point(false);
    let mut out = [0u8; 64];
    out.copy_from_slice(&encoded.as_bytes()[1..]);
    Ok(out)
}

/// Ed25519 public key from a 32-byte secret.
pub fn ed25519_public(private_key: &[u8; 32]) -> [u8; 32] {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(private_key);
    signing_key.verifying_key().to_bytes()
}

/// SR25519 public key: expand a 32-byte mini secret the Ed25519-compatible
/// way and take the Ristretto public point.
pub fn sr25519_public(mini_secret: &[u8; 32]) -> Result<[u8; 32]> {
    let mini = schnorrkel::MiniSecretKey::from_bytes(mini_secret)
        .map_err(|_| CoreError::InvalidKey)?;
    let keypair = mini.expand_to_keypair(schnorrkel::ExpansionMode::Ed25519);
    Ok(keypair.public.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP32 test vector 1 seed.
    const SEED_HEX: &str = "000102030405060708090a0b0c0d0e0f";

    fn seed() -> Vec<u8> {
        hex::decode(SEED_HEX).unwrap()
    }

    #[test]
    fn test_master_key_vector() {
        let master = master_key(&seed()).unwrap();
        assert_eq!(
            hex::encode(master.key),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(master.chain_code),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(master.depth, 0);
    }

    #[test]
    fn test_hardened_child_vector() {
        // m/0'
        let master = master_key(&seed()).unwrap();
        let child = derive_child(&master, HARDENED).unwrap();
        assert_eq!(
            hex::encode(child.key),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(child.depth, 1);
        assert_eq!(child.child_index, HARDENED);
    }

    #[test]
    fn test_non_hardened_child_vector() {
        // m/0'/1
        let master = master_key(&seed()).unwrap();
        let child = derive_path(&master, "m/0'/1").unwrap();
        assert_eq!(
            hex::encode(child.key),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
    }

    #[test]
    fn test_slip10_ed25519_vector() {
        // SLIP-0010 ed25519 test vector 1: master and m/0'.
        let master = slip10_ed25519_key(&seed(), &[]).unwrap();
        assert_eq!(
            hex::encode(master.as_ref()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        let child = slip10_ed25519_key(&seed(), &[HARDENED]).unwrap();
        assert_eq!(
            hex::encode(child.as_ref()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }

    #[test]
    fn test_slip10_rejects_non_hardened() {
        assert!(matches!(
            slip10_ed25519_key(&seed(), &[1]),
            Err(CoreError::Index)
        ));
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            parse_path("m/44'/60'/0'/0/0").unwrap(),
            vec![44 | HARDENED, 60 | HARDENED, HARDENED, 0, 0]
        );
        assert!(parse_path("44'/60'").is_err());
        assert!(parse_path("m/x").is_err());
    }

    #[test]
    fn test_derivation_deterministic() {
        let master = master_key(&seed()).unwrap();
        let a = derive_path(&master, "m/44'/60'/0'/0/0").unwrap();
        let b = derive_path(&master, "m/44'/60'/0'/0/0").unwrap();
        assert_eq!(a.key, b.key);
        let c = derive_path(&master, "m/44'/0'/0'/0/0").unwrap();
        assert_ne!(a.key, c.key);
    }

    #[test]
    fn test_sr25519_public_is_stable() {
        let secret = [7u8; 32];
        let a = sr25519_public(&secret).unwrap();
        let b = sr25519_public(&secret).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, [0u8; 32]);
    }
}
