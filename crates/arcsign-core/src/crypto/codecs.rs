// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// codecs: textual address encodings shared by the chain encoders
//
// Functions:
//   base58check_encode()/decode()         — Bitcoin alphabet, SHA256d checksum
//   base58check_encode_ripple()/decode()  — same scheme, Ripple alphabet
//   segwit_v0_encode()                    — BIP-173 Bech32, witness version 0
//   bech32_encode()                       — plain Bech32 (Cosmos, Cardano)
//   cashaddr_encode()                     — Bitcoin Cash CashAddr
//   ss58_encode()                         — Substrate SS58 (Blake2b checksum)
//   strkey_encode()/decode()              — Stellar StrKey (Base32 + CRC16)

use bech32::{Bech32, Hrp};

use crate::crypto::{blake2b_512, sha256d};
use crate::error::{CoreError, Result};

/// Base58Check with the Bitcoin alphabet: payload ∥ SHA256d(payload)[..4].
pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>> {
    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| CoreError::Codec(format!("base58: {e}")))?;
    split_checked(data)
}

/// Base58Check with the Ripple alphabet (XRP `r...` addresses).
pub fn base58check_encode_ripple(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

pub fn base58check_decode_ripple(encoded: &str) -> Result<Vec<u8>> {
    let data = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .map_err(|e| CoreError::Codec(format!("base58: {e}")))?;
    split_checked(data)
}

fn split_checked(data: Vec<u8>) -> Result<Vec<u8>> {
    if data.len() < 5 {
        return Err(CoreError::Codec("base58check payload too short".into()));
    }
    let (payload, checksum) = data.split_at(data.len() - 4);
    if checksum != &sha256d(payload)[..4] {
        return Err(CoreError::Codec("base58check checksum mismatch".into()));
    }
    Ok(payload.to_vec())
}

/// SegWit witness-v0 address (P2WPKH when `program` is a 20-byte key hash).
pub fn segwit_v0_encode(hrp: &str, program: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(hrp).map_err(|e| CoreError::Codec(format!("hrp: {e}")))?;
    bech32::segwit::encode_v0(hrp, program).map_err(|e| CoreError::Codec(format!("segwit: {e}")))
}

/// Plain Bech32 over raw bytes, used for Cosmos account addresses and
/// Cardano Shelley addresses.
pub fn bech32_encode(hrp: &str, data: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(hrp).map_err(|e| CoreError::Codec(format!("hrp: {e}")))?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| CoreError::Codec(format!("bech32: {e}")))
}

const CASHADDR_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// CashAddr encoding of a P2PKH hash: `<prefix>:q...`.
///
/// The payload version byte is 0x00 (key hash type, 160-bit size).
pub fn cashaddr_encode(prefix: &str, hash: &[u8; 20]) -> Result<String> {
    let mut payload = Vec::with_capacity(21);
    payload.push(0x00);
    payload.extend_from_slice(hash);
    let payload5 = convert_bits_8_to_5(&payload);

    // Checksum input: lower 5 bits of each prefix char, a zero separator,
    // the payload, then an eight-zero checksum template.
    let mut values: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    values.push(0);
    values.extend_from_slice(&payload5);
    values.extend_from_slice(&[0u8; 8]);

    let polymod = cashaddr_polymod(&values);
    let mut out = String::with_capacity(prefix.len() + 1 + payload5.len() + 8);
    out.push_str(prefix);
    out.push(':');
    for v in &payload5 {
        out.push(CASHADDR_CHARSET[*v as usize] as char);
    }
    for i in 0..8 {
        let v = ((polymod >> (5 * (7 - i))) & 0x1f) as usize;
        out.push(CASHADDR_CHARSET[v] as char);
    }
    Ok(out)
}

fn cashaddr_polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x0007_ffff_ffff) << 5) ^ (d as u64);
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

fn convert_bits_8_to_5(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &b in data {
        acc = (acc << 8) | b as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

const SS58_PREFIX: &[u8] = b"SS58PRE";

/// SS58 account encoding: network prefix ∥ pubkey ∥ Blake2b-512 checksum[..2].
pub fn ss58_encode(prefix: u16, pubkey: &[u8; 32]) -> String {
    let ident = prefix & 0b0011_1111_1111_1111;
    let mut data = match ident {
        0..=63 => vec![ident as u8],
        _ => {
            // Two-byte form: upper six bits of the lower byte first, then the
            // remaining bits, per the Substrate registry layout.
            let first = ((ident & 0b0000_0000_1111_1100) >> 2) as u8;
            let second = ((ident >> 8) as u8) | (((ident & 0b11) as u8) << 6);
            vec![first | 0b0100_0000, second]
        }
    };
    data.extend_from_slice(pubkey);

    let mut hash_input = Vec::with_capacity(SS58_PREFIX.len() + data.len());
    hash_input.extend_from_slice(SS58_PREFIX);
    hash_input.extend_from_slice(&data);
    let checksum = blake2b_512(&hash_input);
    data.extend_from_slice(&checksum[..2]);

    bs58::encode(data).into_string()
}

/// Stellar StrKey version byte for an account public key: 6 << 3.
pub const STRKEY_ACCOUNT_VERSION: u8 = 6 << 3;

/// StrKey: Base32(version ∥ payload ∥ CRC16-XMODEM little-endian).
pub fn strkey_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 3);
    data.push(version);
    data.extend_from_slice(payload);
    let crc = crc16_xmodem(&data);
    data.push((crc & 0xff) as u8);
    data.push((crc >> 8) as u8);
    base32_encode(&data)
}

pub fn strkey_decode(encoded: &str) -> Result<(u8, Vec<u8>)> {
    let data = base32_decode(encoded)?;
    if data.len() < 3 {
        return Err(CoreError::Codec("strkey too short".into()));
    }
    let payload_end = data.len() - 2;
    let expected = crc16_xmodem(&data[..payload_end]);
    let actual = (data[payload_end] as u16) | ((data[payload_end + 1] as u16) << 8);
    if expected != actual {
        return Err(CoreError::Codec("strkey checksum mismatch".into()));
    }
    Ok((data[0], data[1..payload_end].to_vec()))
}

/// CRC16-XMODEM, polynomial 0x1021, zero initial value.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

// RFC 4648 without padding.
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &b in data {
        acc = (acc << 8) | b as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((acc << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn base32_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for ch in encoded.chars() {
        let val = BASE32_ALPHABET
            .iter()
            .position(|&c| c == ch as u8)
            .ok_or_else(|| CoreError::Codec(format!("invalid base32 character: {ch}")))?;
        acc = (acc << 5) | val as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    Ok(out)
}
