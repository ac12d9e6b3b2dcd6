// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// error: the closed error set of the core
//
// Every failure is a value of `CoreError`; the GUI layer maps `kind()` to its
// retry/re-prompt/abort behaviour.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Mnemonic validation failures, kept distinct so the caller can highlight
/// the offending word vs. a wrong word count vs. a checksum mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("unsupported word count: {0}")]
    WordCount(usize),
    #[error("word at position {0} is not in the wordlist")]
    UnknownWord(usize),
    #[error("checksum mismatch")]
    Checksum,
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    // Validation: caller fixes input and retries.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] MnemonicError),
    #[error("invalid wallet name: {0}")]
    InvalidName(String),
    #[error("password must be at least 8 characters")]
    WeakPassword,
    #[error("invalid provider config: {0}")]
    InvalidProvider(String),

    // Authentication: caller re-prompts the user.
    #[error("wrong password")]
    WrongPassword,

    // Integrity: non-recoverable without a backup.
    #[error("address book checksum mismatch")]
    ChecksumMismatch,
    #[error("corrupt artifact: {0}")]
    Corrupt(String),

    // Preconditions: caller adjusts the environment.
    #[error("volume is already initialized")]
    AlreadyInitialized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("wallet limit reached")]
    WalletLimit,
    #[error("insufficient free space on volume")]
    InsufficientSpace,

    // Derivation and codec failures. These surface per chain in a
    // GenerationReport rather than aborting a whole wallet creation.
    #[error("invalid key material")]
    InvalidKey,
    #[error("unusable child index")]
    Index,
    #[error("codec error: {0}")]
    Codec(String),
    #[error("unsupported chain: {0}")]
    Unsupported(String),

    // Transient / bug.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

// Malformed JSON in a persisted artifact is an integrity failure.
impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Corrupt(e.to_string())
    }
}

/// Recovery locus of an error, mirroring the taxonomy the GUI acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Integrity,
    Precondition,
    Io,
    Internal,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        use CoreError::*;
        match self {
            InvalidMnemonic(_) | InvalidName(_) | WeakPassword | InvalidProvider(_) => {
                ErrorKind::Validation
            }
            WrongPassword => ErrorKind::Authentication,
            ChecksumMismatch | Corrupt(_) => ErrorKind::Integrity,
            AlreadyInitialized | NotFound(_) | WalletLimit | InsufficientSpace => {
                ErrorKind::Precondition
            }
            Io(_) => ErrorKind::Io,
            InvalidKey | Index | Codec(_) | Unsupported(_) | Internal(_) => ErrorKind::Internal,
        }
    }
}
