// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// catalog: the static registry of supported chains
//
// Rank defines the display order and the address-book hashing order; it is
// frozen per catalog version. Several EVM networks intentionally reuse coin
// type 60 (same account as Ethereum, the dominant wallet convention).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Secp256k1,
    Ed25519,
    Sr25519,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Base,
    Layer2,
    Regional,
    Cosmos,
    AltEvm,
    Specialized,
}

impl Curve {
    pub fn as_str(self) -> &'static str {
        match self {
            Curve::Secp256k1 => "secp256k1",
            Curve::Ed25519 => "ed25519",
            Curve::Sr25519 => "sr25519",
        }
    }
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Base => "base",
            Category::Layer2 => "layer2",
            Category::Regional => "regional",
            Category::Cosmos => "cosmos",
            Category::AltEvm => "alt_evm",
            Category::Specialized => "specialized",
        }
    }
}

/// Address encoding family. Encoder dispatch matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Native SegWit v0 key-hash address (BIP-84 derivation).
    Bech32P2wpkh { hrp: &'static str },
    /// Legacy Base58Check key-hash address with a network version prefix.
    Base58P2pkh { version: &'static [u8] },
    /// Keccak-256 of the uncompressed pubkey, EIP-55 mixed-case hex.
    Keccak256Eip55,
    /// Bitcoin Cash CashAddr.
    CashAddr { hrp: &'static str },
    /// XRP Ledger Base58 with the Ripple alphabet.
    Base58RippleLike,
    /// TRON: Keccak hash with 0x41 prefix, Base58Check.
    TronBase58,
    /// Raw Ed25519 public key in Base58 (Solana).
    Ed25519Base58,
    /// Stellar StrKey account encoding.
    StrKey,
    /// Cosmos-SDK bech32 account address.
    CosmosBech32 { hrp: &'static str },
    /// Cardano Shelley base address.
    CardanoBech32 { hrp: &'static str },
    /// Substrate SS58 with a network prefix.
    Ss58 { prefix: u16 },
    /// Listed but not derivable by this core; skipped during generation.
    Unsupported,
}

/// One row of the chain registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub rank: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub coin_type: u32,
    pub curve: Curve,
    pub encoding: Encoding,
    pub category: Category,
}

macro_rules! chain {
    ($rank:expr, $symbol:expr, $name:expr, $coin:expr, $curve:ident, $encoding:expr, $category:ident) => {
        ChainDescriptor {
            rank: $rank,
            symbol: $symbol,
            name: $name,
            coin_type: $coin,
            curve: Curve::$curve,
            encoding: $encoding,
            category: Category::$category,
        }
    };
}

use Encoding::*;

static CATALOG: &[ChainDescriptor] = &[
    chain!(1, "BTC", "Bitcoin", 0, Secp256k1, Bech32P2wpkh { hrp: "bc" }, Base),
    chain!(2, "ETH", "Ethereum", 60, Secp256k1, Keccak256Eip55, Base),
    chain!(3, "LTC", "Litecoin", 2, Secp256k1, Bech32P2wpkh { hrp: "ltc" }, Base),
    chain!(4, "DOGE", "Dogecoin", 3, Secp256k1, Base58P2pkh { version: &[0x1e] }, Base),
    chain!(5, "DASH", "Dash", 5, Secp256k1, Base58P2pkh { version: &[0x4c] }, Base),
    chain!(6, "BCH", "Bitcoin Cash", 145, Secp256k1, CashAddr { hrp: "bitcoincash" }, Base),
    chain!(7, "XRP", "XRP Ledger", 144, Secp256k1, Base58RippleLike, Base),
    chain!(8, "XLM", "Stellar", 148, Ed25519, StrKey, Base),
    chain!(9, "TRX", "TRON", 195, Secp256k1, TronBase58, Base),
    chain!(10, "SOL", "Solana", 501, Ed25519, Ed25519Base58, Base),
    chain!(11, "ADA", "Cardano", 1815, Ed25519, CardanoBech32 { hrp: "addr" }, Base),
    chain!(12, "DOT", "Polkadot", 354, Sr25519, Ss58 { prefix: 0 }, Base),
    chain!(13, "ATOM", "Cosmos Hub", 118, Secp256k1, CosmosBech32 { hrp: "cosmos" }, Cosmos),
    chain!(14, "POL", "Polygon", 966, Secp256k1, Keccak256Eip55, Layer2),
    chain!(15, "ARB", "Arbitrum One", 60, Secp256k1, Keccak256Eip55, Layer2),
    chain!(16, "OP", "Optimism", 60, Secp256k1, Keccak256Eip55, Layer2),
    chain!(17, "BASE", "Base", 60, Secp256k1, Keccak256Eip55, Layer2),
    chain!(18, "ZK", "zkSync Era", 60, Secp256k1, Keccak256Eip55, Layer2),
    chain!(19, "LINEA", "Linea", 60, Secp256k1, Keccak256Eip55, Layer2),
    chain!(20, "SCR", "Scroll", 60, Secp256k1, Keccak256Eip55, Layer2),
    chain!(21, "BNB", "BNB Smart Chain", 9006, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(22, "AVAX", "Avalanche C-Chain", 9000, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(23, "FTM", "Fantom", 1007, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(24, "ETC", "Ethereum Classic", 61, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(25, "CELO", "Celo", 52752, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(26, "GNO", "Gnosis Chain", 700, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(27, "CRO", "Cronos", 394, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(28, "ONE", "Harmony", 1023, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(29, "GLMR", "Moonbeam", 1284, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(30, "MOVR", "Moonriver", 1285, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(31, "AURORA", "Aurora", 2570, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(32, "METIS", "Metis Andromeda", 60, Secp256k1, Keccak256Eip55, AltEvm),
    chain!(33, "KLAY", "Klaytn", 8217, Secp256k1, Keccak256Eip55, Regional),
    chain!(34, "HT", "Huobi ECO Chain", 1010, Secp256k1, Keccak256Eip55, Regional),
    chain!(35, "OKT", "OKX Chain", 996, Secp256k1, Keccak256Eip55, Regional),
    chain!(36, "WEMIX", "Wemix", 60, Secp256k1, Keccak256Eip55, Regional),
    chain!(37, "OSMO", "Osmosis", 118, Secp256k1, CosmosBech32 { hrp: "osmo" }, Cosmos),
    chain!(38, "JUNO", "Juno", 118, Secp256k1, CosmosBech32 { hrp: "juno" }, Cosmos),
    chain!(39, "AKT", "Akash", 118, Secp256k1, CosmosBech32 { hrp: "akash" }, Cosmos),
    chain!(40, "STARS", "Stargaze", 118, Secp256k1, CosmosBech32 { hrp: "stars" }, Cosmos),
    chain!(41, "KAVA", "Kava", 459, Secp256k1, CosmosBech32 { hrp: "kava" }, Cosmos),
    chain!(42, "BAND", "Band Protocol", 494, Secp256k1, CosmosBech32 { hrp: "band" }, Cosmos),
    chain!(43, "SCRT", "Secret Network", 529, Secp256k1, CosmosBech32 { hrp: "secret" }, Cosmos),
    chain!(44, "LUNA", "Terra", 330, Secp256k1, CosmosBech32 { hrp: "terra" }, Cosmos),
    chain!(45, "SEI", "Sei", 118, Secp256k1, CosmosBech32 { hrp: "sei" }, Cosmos),
    chain!(46, "AXL", "Axelar", 118, Secp256k1, CosmosBech32 { hrp: "axelar" }, Cosmos),
    chain!(47, "KSM", "Kusama", 434, Sr25519, Ss58 { prefix: 2 }, Specialized),
    chain!(48, "ZEC", "Zcash", 133, Secp256k1, Base58P2pkh { version: &[0x1c, 0xb8] }, Specialized),
    chain!(49, "RVN", "Ravencoin", 175, Secp256k1, Base58P2pkh { version: &[0x3c] }, Specialized),
    chain!(50, "DGB", "DigiByte", 20, Secp256k1, Bech32P2wpkh { hrp: "dgb" }, Specialized),
    chain!(51, "QTUM", "Qtum", 2301, Secp256k1, Base58P2pkh { version: &[0x3a] }, Specialized),
    chain!(52, "KMD", "Komodo", 141, Secp256k1, Base58P2pkh { version: &[0x3c] }, Specialized),
    chain!(53, "VTC", "Vertcoin", 28, Secp256k1, Bech32P2wpkh { hrp: "vtc" }, Specialized),
    chain!(54, "XMR", "Monero", 128, Ed25519, Unsupported, Specialized),
];

/// All entries, ordered by rank.
pub fn all() -> &'static [ChainDescriptor] {
    CATALOG
}

pub fn by_symbol(symbol: &str) -> Option<&'static ChainDescriptor> {
    CATALOG.iter().find(|c| c.symbol == symbol)
}

/// First (lowest-rank) entry registered for a coin type. Coin types 60 and
/// 118 are shared across several networks.
pub fn by_coin_type(coin_type: u32) -> Option<&'static ChainDescriptor> {
    CATALOG.iter().find(|c| c.coin_type == coin_type)
}
