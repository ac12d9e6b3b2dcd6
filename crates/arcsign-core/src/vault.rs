// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// vault: password-sealed blobs and the application config payload
//
// Types:
//   EncryptedBlob — self-describing container: Argon2id params + salt,
//                   AES-256-GCM nonce + ciphertext, scheme version
//   AppConfig     — per-installation, non-secret preferences
// Functions:
//   seal()  — password → fresh salt/nonce → blob
//   open()  — blob + password → plaintext, or WrongPassword on tag failure

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

use crate::crypto::{self, KdfCost, NONCE_LEN, SALT_LEN};
use crate::error::{CoreError, Result};
use crate::secret::SecretString;

pub const SCHEME_VERSION: u32 = 1;
pub const MIN_PASSWORD_LEN: usize = 8;

const KDF_ALGORITHM: &str = "argon2id";
const AEAD_ALGORITHM: &str = "aes-256-gcm";

mod b64 {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        BASE64.decode(s).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct KdfBlock {
    pub algorithm: String,
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
    #[serde(with = "b64")]
    pub salt: Vec<u8>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AeadBlock {
    pub algorithm: String,
    #[serde(with = "b64")]
    pub nonce: Vec<u8>,
    #[serde(with = "b64")]
    pub ciphertext: Vec<u8>,
}

/// A sealed secret. Everything needed to open it again — except the
/// password — travels inside the blob, so KDF parameters can be retuned
/// without breaking existing artifacts.
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptedBlob {
    pub scheme_version: u32,
    pub kdf: KdfBlock,
    pub aead: AeadBlock,
}

impl std::fmt::Debug for EncryptedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedBlob")
            .field("scheme_version", &self.scheme_version)
            .field("salt", &format!("[{} bytes]", self.kdf.salt.len()))
            .field("nonce", &format!("[{} bytes]", self.aead.nonce.len()))
            .field(
                "ciphertext",
                &format!("[{} bytes REDACTED]", self.aead.ciphertext.len()),
            )
            .finish()
    }
}

/// Associated data binds ciphertext to its scheme version and salt.
fn aad(scheme_version: u32, salt: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + salt.len());
    out.extend_from_slice(&scheme_version.to_be_bytes());
    out.extend_from_slice(salt);
    out
}

/// Hard minimum enforced by the core; stronger policy lives in the UI.
pub fn check_password(password: &SecretString) -> Result<()> {
    if password.expose().chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::WeakPassword);
    }
    Ok(())
}

/// Seal plaintext under a password with fresh salt and nonce.
pub fn seal(password: &SecretString, plaintext: &[u8], cost: KdfCost) -> Result<EncryptedBlob> {
    let salt: [u8; SALT_LEN] = crypto::random_bytes();
    let nonce: [u8; NONCE_LEN] = crypto::random_bytes();

    let key = crypto::kdf(password.expose().as_bytes(), &salt, cost)?;
    let ciphertext = crypto::aead_seal(&key, &nonce, &aad(SCHEME_VERSION, &salt), plaintext)?;

    Ok(EncryptedBlob {
        scheme_version: SCHEME_VERSION,
        kdf: KdfBlock {
            algorithm: KDF_ALGORITHM.to_string(),
            m_cost: cost.m_cost,
            t_cost: cost.t_cost,
            p_cost: cost.p_cost,
            salt: salt.to_vec(),
        },
        aead: AeadBlock {
            algorithm: AEAD_ALGORITHM.to_string(),
            nonce: nonce.to_vec(),
            ciphertext,
        },
    })
}

/// Open a blob. Structural problems are `Corrupt`; a tag mismatch — the only
/// observable effect of a wrong password — is `WrongPassword`.
pub fn open(blob: &EncryptedBlob, password: &SecretString) -> Result<Zeroizing<Vec<u8>>> {
    if blob.scheme_version != SCHEME_VERSION {
        return Err(CoreError::Corrupt(format!(
            "unknown blob scheme version {}",
            blob.scheme_version
        )));
    }
    if blob.kdf.algorithm != KDF_ALGORITHM || blob.aead.algorithm != AEAD_ALGORITHM {
        return Err(CoreError::Corrupt("unknown blob algorithms".into()));
    }
    if blob.kdf.salt.len() != SALT_LEN {
        return Err(CoreError::Corrupt("bad salt length".into()));
    }
    let nonce: [u8; NONCE_LEN] = blob
        .aead
        .nonce
        .as_slice()
        .try_into()
        .map_err(|_| CoreError::Corrupt("bad nonce length".into()))?;

    let cost = KdfCost {
        m_cost: blob.kdf.m_cost,
        t_cost: blob.kdf.t_cost,
        p_cost: blob.kdf.p_cost,
    };
    let key = crypto::kdf(password.expose().as_bytes(), &blob.kdf.salt, cost)?;
    crypto::aead_open(
        &key,
        &nonce,
        &aad(blob.scheme_version, &blob.kdf.salt),
        &blob.aead.ciphertext,
    )
}

/// Per-installation preferences. Non-secret, but sealed under the master
/// password all the same so the volume carries no readable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub schema_version: String,
    pub created_at: String,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub currency: String,
    pub language: String,
    pub hide_balances: bool,
}

impl AppConfig {
    pub fn new(created_at: String) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            created_at,
            preferences: Preferences {
                currency: "USD".to_string(),
                language: "en".to_string(),
                hide_balances: false,
            },
        }
    }
}

#[cfg(test)]
pub(crate) fn test_cost() -> KdfCost {
    KdfCost {
        m_cost: 1024,
        t_cost: 1,
        p_cost: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> SecretString {
        SecretString::from(s)
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let blob = seal(&pw("correct horse"), b"my secret phrase", test_cost()).unwrap();
        let opened = open(&blob, &pw("correct horse")).unwrap();
        assert_eq!(&*opened, b"my secret phrase");
    }

    #[test]
    fn test_wrong_password_is_tag_failure() {
        let blob = seal(&pw("correct horse"), b"secret", test_cost()).unwrap();
        assert!(matches!(
            open(&blob, &pw("wrong horse")),
            Err(CoreError::WrongPassword)
        ));
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_seal() {
        let a = seal(&pw("password1"), b"same", test_cost()).unwrap();
        let b = seal(&pw("password1"), b"same", test_cost()).unwrap();
        assert_ne!(a.kdf.salt, b.kdf.salt);
        assert_ne!(a.aead.nonce, b.aead.nonce);
        assert_ne!(a.aead.ciphertext, b.aead.ciphertext);
    }

    #[test]
    fn test_tampered_ciphertext_rejected() {
        let mut blob = seal(&pw("password1"), b"secret", test_cost()).unwrap();
        blob.aead.ciphertext[0] ^= 0x01;
        assert!(open(&blob, &pw("password1")).is_err());
    }

    #[test]
    fn test_tampered_salt_breaks_aad_binding() {
        let mut blob = seal(&pw("password1"), b"secret", test_cost()).unwrap();
        blob.kdf.salt[0] ^= 0x01;
        assert!(open(&blob, &pw("password1")).is_err());
    }

    #[test]
    fn test_unknown_scheme_version_is_corrupt() {
        let mut blob = seal(&pw("password1"), b"secret", test_cost()).unwrap();
        blob.scheme_version = 99;
        assert!(matches!(
            open(&blob, &pw("password1")),
            Err(CoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_json_shape() {
        let blob = seal(&pw("password1"), b"secret", test_cost()).unwrap();
        let json = serde_json::to_value(&blob).unwrap();
        assert_eq!(json["scheme_version"], 1);
        assert_eq!(json["kdf"]["algorithm"], "argon2id");
        assert_eq!(json["aead"]["algorithm"], "aes-256-gcm");
        assert!(json["kdf"]["salt"].is_string());

        let back: EncryptedBlob = serde_json::from_value(json).unwrap();
        let opened = open(&back, &pw("password1")).unwrap();
        assert_eq!(&*opened, b"secret");
    }

    #[test]
    fn test_password_policy() {
        assert!(check_password(&pw("1234567")).is_err());
        assert!(check_password(&pw("12345678")).is_ok());
    }

    #[test]
    fn test_debug_redacts_ciphertext() {
        let blob = seal(&pw("password1"), b"secret", test_cost()).unwrap();
        let rendered = format!("{blob:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("secret"));
    }
}
