// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// arcsign-core: vault, derivation, and repository logic with zero UI dependencies
//
// Modules:
//   bip39_utils  — Mnemonic generation, validation, seed derivation
//   bip32_utils  — HD key derivation (BIP32 secp256k1 + SLIP-10 + SR25519)
//   catalog      — Static registry of 54 supported chains
//   chains       — Address encoding per chain family
//   crypto       — KDF, AEAD, hashes, codecs
//   vault        — Password-sealed EncryptedBlob + AppConfig
//   provider     — Encrypted RPC credential store
//   storage      — Persistence seam (atomic writes, free-space checks)
//   repository   — On-disk wallet repository on the removable volume
//   serializer   — Single-writer queue for vault-touching operations
//   api          — Stable request/response facade for the GUI layer

pub mod api;
pub mod bip32_utils;
pub mod bip39_utils;
pub mod catalog;
pub mod chains;
pub mod crypto;
pub mod error;
pub mod provider;
pub mod repository;
pub mod secret;
pub mod serializer;
pub mod storage;
pub mod vault;

pub use api::CoreHandle;
pub use error::{CoreError, ErrorKind, Result};
pub use secret::{SecretBytes, SecretString};
