// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// bip39_utils: BIP39 mnemonic generation, validation, and seed derivation
//
// Types:
//   WordCount       — 12 or 24 words (128 / 256 bits of entropy)
//   MnemonicPhrase  — validated phrase in a zeroising buffer
// Functions:
//   generate_mnemonic()  — fresh entropy → phrase with checksum
//   validate_mnemonic()  — normalise and check words, count, checksum

use bip39::{Language, Mnemonic};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::random_bytes;
use crate::error::{MnemonicError, Result};

/// Word count options offered by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    W12,
    W24,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            WordCount::W12 => 12,
            WordCount::W24 => 24,
        }
    }

    pub fn entropy_bytes(self) -> usize {
        match self {
            WordCount::W12 => 16,
            WordCount::W24 => 32,
        }
    }
}

/// A validated BIP39 phrase. The text lives in a zeroising buffer and is
/// destroyed when the owning operation returns.
pub struct MnemonicPhrase {
    phrase: Zeroizing<String>,
}

impl MnemonicPhrase {
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }

    /// PBKDF2-HMAC-SHA512 over (mnemonic, "mnemonic" ∥ passphrase), 2048
    /// iterations, per BIP39.
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        // The phrase was validated at construction time.
        let mnemonic = Mnemonic::parse_in(Language::English, self.phrase())
            .expect("phrase validated at construction");
        Zeroizing::new(mnemonic.to_seed(passphrase))
    }
}

impl std::fmt::Debug for MnemonicPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MnemonicPhrase(<redacted>)")
    }
}

/// Generate a new mnemonic from fresh CSPRNG entropy.
pub fn generate_mnemonic(word_count: WordCount) -> Result<MnemonicPhrase> {
    let mnemonic = match word_count {
        WordCount::W12 => {
            let mut entropy: [u8; 16] = random_bytes();
            let m = Mnemonic::from_entropy_in(Language::English, &entropy);
            entropy.zeroize();
            m
        }
        WordCount::W24 => {
            let mut entropy: [u8; 32] = random_bytes();
            let m = Mnemonic::from_entropy_in(Language::English, &entropy);
            entropy.zeroize();
            m
        }
    }
    .map_err(|e| MnemonicError::Other(e.to_string()))?;

    Ok(MnemonicPhrase {
        phrase: Zeroizing::new(mnemonic.to_string()),
    })
}

/// Validate a phrase: lowercase, collapse whitespace, check every word
/// against the English wordlist, then the count and the checksum.
pub fn validate_mnemonic(text: &str) -> Result<MnemonicPhrase> {
    // The English wordlist is ASCII, so lowercasing plus whitespace
    // collapse yields the NFKD-normalised form.
    let normalized = Zeroizing::new(
        text.trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    );

    let word_count = normalized.split_whitespace().count();
    if word_count != 12 && word_count != 24 {
        return Err(MnemonicError::WordCount(word_count).into());
    }

    match Mnemonic::parse_in(Language::English, &*normalized) {
        Ok(_) => Ok(MnemonicPhrase {
            phrase: normalized,
        }),
        Err(bip39::Error::BadWordCount(n)) => Err(MnemonicError::WordCount(n).into()),
        Err(bip39::Error::UnknownWord(index)) => Err(MnemonicError::UnknownWord(index).into()),
        Err(bip39::Error::InvalidChecksum) => Err(MnemonicError::Checksum.into()),
        Err(e) => Err(MnemonicError::Other(e.to_string()).into()),
    }
}
