// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// repository: the wallet repository on the removable volume
//
// Layout:
//   <usb>/app_config.enc
//   <usb>/provider_config.enc
//   <usb>/wallets/<wallet-id>/wallet.json
//   <usb>/wallets/<wallet-id>/addresses.json
//   <usb>/wallets/<wallet-id>/exports/
//
// The wallet id is a function of the seed, which is what makes duplicate
// detection work without decrypting anything.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bip39_utils::{self, WordCount};
use crate::chains::{self, DerivedAddress, GenerationReport};
use crate::crypto::{self, KdfCost};
use crate::error::{CoreError, Result};
use crate::provider::{ProviderConfig, ProviderConfigView, ProviderStore, ProviderUpsert};
use crate::secret::SecretString;
use crate::storage::Storage;
use crate::vault::{self, AppConfig, EncryptedBlob};

const APP_CONFIG_FILE: &str = "app_config.enc";
const PROVIDER_CONFIG_FILE: &str = "provider_config.enc";
const WALLETS_DIR: &str = "wallets";
const WALLET_FILE: &str = "wallet.json";
const ADDRESSES_FILE: &str = "addresses.json";
const EXPORTS_DIR: &str = "exports";

pub const MAX_WALLETS: usize = 10;
pub const MIN_FREE_BYTES: u64 = 10 * 1024 * 1024;
pub const MAX_NAME_LEN: usize = 50;

const ADDRESS_BOOK_SCHEMA: &str = "1.0";

/// Wallet metadata as surfaced to callers. Never carries key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub has_passphrase: bool,
    pub address_count: usize,
}

/// On-disk `wallet.json`. Field order is the serialisation order.
#[derive(Clone, Serialize, Deserialize)]
struct WalletFile {
    id: String,
    name: String,
    created_at: String,
    updated_at: String,
    has_passphrase: bool,
    encrypted_mnemonic: EncryptedBlob,
}

/// On-disk `addresses.json`. The checksum covers the compact serialisation
/// of `addresses` alone, in stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    pub schema_version: String,
    pub wallet_id: String,
    pub generated_at: String,
    pub total_count: usize,
    pub checksum: String,
    pub addresses: Vec<DerivedAddress>,
}

#[derive(Debug, Clone)]
pub struct CreateWalletOptions {
    pub name: Option<String>,
    pub passphrase: Option<SecretString>,
    pub mnemonic_length: WordCount,
}

#[derive(Debug, Clone)]
pub struct ImportWalletOptions {
    pub name: Option<String>,
    pub passphrase: Option<SecretString>,
}

#[derive(Debug)]
pub struct CreatedWallet {
    pub wallet: WalletRecord,
    /// The one and only plaintext surfacing of the mnemonic.
    pub mnemonic: SecretString,
    pub report: GenerationReport,
}

#[derive(Debug)]
pub struct ImportedWallet {
    pub wallet: WalletRecord,
    pub is_duplicate: bool,
    pub report: GenerationReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResult {
    pub file_path: String,
    pub address_count: usize,
}

pub struct WalletRepository {
    storage: Arc<dyn Storage>,
    kdf_cost: KdfCost,
}

impl WalletRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_kdf_cost(storage, KdfCost::default())
    }

    /// KDF cost is injectable because blobs are self-describing; production
    /// uses the default, tests use cheap parameters.
    pub fn with_kdf_cost(storage: Arc<dyn Storage>, kdf_cost: KdfCost) -> Self {
        Self { storage, kdf_cost }
    }

    // ---- app config ----------------------------------------------------

    pub fn is_first_time_setup(&self, usb_path: &Path) -> bool {
        !self.storage.exists(&usb_path.join(APP_CONFIG_FILE))
    }

    pub fn initialize_app(&self, password: &SecretString, usb_path: &Path) -> Result<()> {
        vault::check_password(password)?;
        let path = usb_path.join(APP_CONFIG_FILE);
        if self.storage.exists(&path) {
            return Err(CoreError::AlreadyInitialized);
        }
        self.storage.create_dir_all(usb_path)?;
        self.ensure_free_space(usb_path)?;

        let config = AppConfig::new(now());
        let blob = vault::seal(password, &serde_json::to_vec(&config)?, self.kdf_cost)?;
        self.storage
            .write_atomic(&path, &serde_json::to_vec_pretty(&blob)?, true)?;
        info!(path = %usb_path.display(), "app config initialized");
        Ok(())
    }

    pub fn unlock_app(&self, password: &SecretString, usb_path: &Path) -> Result<AppConfig> {
        let path = usb_path.join(APP_CONFIG_FILE);
        if !self.storage.exists(&path) {
            return Err(CoreError::NotFound("app config".into()));
        }
        let blob: EncryptedBlob = serde_json::from_slice(&self.storage.read(&path)?)?;
        let plaintext = vault::open(&blob, password)?;
        Ok(serde_json::from_slice(&plaintext)?)
    }

    // ---- wallets -------------------------------------------------------

    pub fn create_wallet(
        &self,
        password: &SecretString,
        usb_path: &Path,
        opts: CreateWalletOptions,
    ) -> Result<CreatedWallet> {
        vault::check_password(password)?;
        let existing = self.wallet_ids(usb_path)?;
        if existing.len() >= MAX_WALLETS {
            return Err(CoreError::WalletLimit);
        }
        self.storage.create_dir_all(usb_path)?;
        self.ensure_free_space(usb_path)?;
        let name = resolve_name(opts.name, existing.len())?;

        let phrase = bip39_utils::generate_mnemonic(opts.mnemonic_length)?;
        let passphrase = opts.passphrase.as_ref().filter(|p| !p.is_empty());
        let seed = phrase.to_seed(passphrase.map_or("", |p| p.expose()));
        let id = wallet_id_from_seed(seed.as_ref());

        let (addresses, report) = chains::derive_address_book(seed.as_ref());
        let timestamp = now();
        let wallet_file = WalletFile {
            id: id.clone(),
            name,
            created_at: timestamp.clone(),
            updated_at: timestamp.clone(),
            has_passphrase: passphrase.is_some(),
            encrypted_mnemonic: vault::seal(
                password,
                phrase.phrase().as_bytes(),
                self.kdf_cost,
            )?,
        };
        let book = build_address_book(&id, timestamp, addresses)?;
        self.write_wallet_pair(usb_path, &wallet_file, &book)?;
        info!(wallet = %id, chains = book.total_count, "wallet created");

        Ok(CreatedWallet {
            wallet: record_of(&wallet_file, book.total_count),
            mnemonic: SecretString::new(phrase.phrase().to_string()),
            report,
        })
    }

    pub fn import_wallet(
        &self,
        mnemonic: &SecretString,
        password: &SecretString,
        usb_path: &Path,
        opts: ImportWalletOptions,
    ) -> Result<ImportedWallet> {
        let phrase = bip39_utils::validate_mnemonic(mnemonic.expose())?;
        vault::check_password(password)?;

        let passphrase = opts.passphrase.as_ref().filter(|p| !p.is_empty());
        let seed = phrase.to_seed(passphrase.map_or("", |p| p.expose()));
        let id = wallet_id_from_seed(seed.as_ref());

        if self
            .storage
            .exists(&self.wallet_dir(usb_path, &id).join(WALLET_FILE))
        {
            let wallet_file = self.read_wallet_file(usb_path, &id)?;
            let count = self.address_count(usb_path, &id);
            debug!(wallet = %id, "import matched an existing wallet");
            return Ok(ImportedWallet {
                wallet: record_of(&wallet_file, count),
                is_duplicate: true,
                report: GenerationReport {
                    succeeded: count,
                    failed: Vec::new(),
                },
            });
        }

        let existing = self.wallet_ids(usb_path)?;
        if existing.len() >= MAX_WALLETS {
            return Err(CoreError::WalletLimit);
        }
        self.storage.create_dir_all(usb_path)?;
        self.ensure_free_space(usb_path)?;
        let name = resolve_name(opts.name, existing.len())?;

        let (addresses, report) = chains::derive_address_book(seed.as_ref());
        let timestamp = now();
        let wallet_file = WalletFile {
            id: id.clone(),
            name,
            created_at: timestamp.clone(),
            updated_at: timestamp.clone(),
            has_passphrase: passphrase.is_some(),
            encrypted_mnemonic: vault::seal(
                password,
                phrase.phrase().as_bytes(),
                self.kdf_cost,
            )?,
        };
        let book = build_address_book(&id, timestamp, addresses)?;
        self.write_wallet_pair(usb_path, &wallet_file, &book)?;
        info!(wallet = %id, "wallet imported");

        Ok(ImportedWallet {
            wallet: record_of(&wallet_file, book.total_count),
            is_duplicate: false,
            report,
        })
    }

    /// Enumerate wallet metadata. Decrypts nothing.
    pub fn list_wallets(&self, usb_path: &Path) -> Result<Vec<WalletRecord>> {
        let mut records = Vec::new();
        for id in self.wallet_ids(usb_path)? {
            let wallet_file = self.read_wallet_file(usb_path, &id)?;
            let count = self.address_count(usb_path, &id);
            records.push(record_of(&wallet_file, count));
        }
        records.sort_by(|a, b| (&a.created_at, &a.id).cmp(&(&b.created_at, &b.id)));
        Ok(records)
    }

    pub fn rename_wallet(
        &self,
        wallet_id: &str,
        new_name: &str,
        usb_path: &Path,
    ) -> Result<WalletRecord> {
        let name = validate_name(new_name)?;
        let mut wallet_file = self.read_wallet_file(usb_path, wallet_id)?;
        wallet_file.name = name;
        wallet_file.updated_at = now();

        let path = self.wallet_dir(usb_path, wallet_id).join(WALLET_FILE);
        self.storage
            .write_atomic(&path, &serde_json::to_vec_pretty(&wallet_file)?, true)?;
        let count = self.address_count(usb_path, wallet_id);
        Ok(record_of(&wallet_file, count))
    }

    /// Return the stored address book when its checksum validates; rebuild
    /// it from the decrypted mnemonic when the file is absent. A checksum
    /// mismatch is an integrity error, never a silent regeneration.
    pub fn load_addresses(
        &self,
        wallet_id: &str,
        password: &SecretString,
        usb_path: &Path,
    ) -> Result<AddressBook> {
        let book_path = self.wallet_dir(usb_path, wallet_id).join(ADDRESSES_FILE);
        if self.storage.exists(&book_path) {
            let book: AddressBook = serde_json::from_slice(&self.storage.read(&book_path)?)?;
            if book.checksum != addresses_checksum(&book.addresses)? {
                return Err(CoreError::ChecksumMismatch);
            }
            if book.wallet_id != wallet_id {
                return Err(CoreError::Corrupt("address book belongs to another wallet".into()));
            }
            debug!(wallet = %wallet_id, "address book served from disk");
            return Ok(book);
        }

        let wallet_file = self.read_wallet_file(usb_path, wallet_id)?;
        if wallet_file.has_passphrase {
            // The passphrase is deliberately not persisted, so the seed
            // cannot be recomputed here. Recovery path is a re-import.
            return Err(CoreError::NotFound(format!(
                "address book for wallet {wallet_id}; wallet uses a passphrase, re-import to regenerate"
            )));
        }
        let plaintext = vault::open(&wallet_file.encrypted_mnemonic, password)?;
        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| CoreError::Corrupt("stored mnemonic is not UTF-8".into()))?;
        let phrase = bip39_utils::validate_mnemonic(text)
            .map_err(|_| CoreError::Corrupt("stored mnemonic failed validation".into()))?;
        let seed = phrase.to_seed("");

        let (addresses, _report) = chains::derive_address_book(seed.as_ref());
        let book = build_address_book(wallet_id, now(), addresses)?;
        self.storage
            .write_atomic(&book_path, &serde_json::to_vec_pretty(&book)?, false)?;
        info!(wallet = %wallet_id, "address book regenerated");
        Ok(book)
    }

    pub fn export_addresses(
        &self,
        wallet_id: &str,
        password: &SecretString,
        usb_path: &Path,
        format: ExportFormat,
    ) -> Result<ExportResult> {
        let book = self.load_addresses(wallet_id, password, usb_path)?;
        self.ensure_free_space(usb_path)?;

        let exports_dir = self.wallet_dir(usb_path, wallet_id).join(EXPORTS_DIR);
        self.storage.create_dir_all(&exports_dir)?;

        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let (file_name, bytes) = match format {
            ExportFormat::Json => (
                format!("addresses_{stamp}.json"),
                serde_json::to_vec_pretty(&book)?,
            ),
            ExportFormat::Csv => (format!("addresses_{stamp}.csv"), to_csv(&book)),
        };
        let path = exports_dir.join(file_name);
        self.storage.write_atomic(&path, &bytes, true)?;
        info!(wallet = %wallet_id, path = %path.display(), "address book exported");

        Ok(ExportResult {
            file_path: path.to_string_lossy().into_owned(),
            address_count: book.total_count,
        })
    }

    // ---- providers -----------------------------------------------------

    pub fn set_provider_config(
        &self,
        password: &SecretString,
        usb_path: &Path,
        upsert: ProviderUpsert,
    ) -> Result<()> {
        vault::check_password(password)?;
        let mut store = self.read_provider_store(password, usb_path)?;
        let timestamp = now();
        store.upsert(ProviderConfig {
            provider_type: upsert.provider_type,
            chain_id: upsert.chain_id,
            network_id: upsert.network_id,
            api_key: upsert.api_key.expose().to_string(),
            priority: upsert.priority,
            enabled: upsert.enabled,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        })?;
        self.write_provider_store(password, usb_path, &store)
    }

    pub fn get_provider_config(
        &self,
        password: &SecretString,
        usb_path: &Path,
        chain_id: &str,
        provider_type: Option<&str>,
    ) -> Result<ProviderConfigView> {
        let store = self.read_provider_store(password, usb_path)?;
        store
            .find(chain_id, provider_type)
            .map(ProviderConfigView::from)
            .ok_or_else(|| CoreError::NotFound(format!("provider config for chain {chain_id}")))
    }

    pub fn list_provider_configs(
        &self,
        password: &SecretString,
        usb_path: &Path,
        chain_id: Option<&str>,
    ) -> Result<Vec<ProviderConfigView>> {
        Ok(self.read_provider_store(password, usb_path)?.list(chain_id))
    }

    pub fn delete_provider_config(
        &self,
        password: &SecretString,
        usb_path: &Path,
        chain_id: &str,
        provider_type: &str,
    ) -> Result<()> {
        let mut store = self.read_provider_store(password, usb_path)?;
        store.remove(chain_id, provider_type)?;
        self.write_provider_store(password, usb_path, &store)
    }

    // ---- internals -----------------------------------------------------

    fn wallet_dir(&self, usb_path: &Path, wallet_id: &str) -> PathBuf {
        usb_path.join(WALLETS_DIR).join(wallet_id)
    }

    fn wallet_ids(&self, usb_path: &Path) -> Result<Vec<String>> {
        self.storage.list_subdirs(&usb_path.join(WALLETS_DIR))
    }

    fn read_wallet_file(&self, usb_path: &Path, wallet_id: &str) -> Result<WalletFile> {
        let path = self.wallet_dir(usb_path, wallet_id).join(WALLET_FILE);
        if !self.storage.exists(&path) {
            return Err(CoreError::NotFound(format!("wallet {wallet_id}")));
        }
        Ok(serde_json::from_slice(&self.storage.read(&path)?)?)
    }

    fn address_count(&self, usb_path: &Path, wallet_id: &str) -> usize {
        let path = self.wallet_dir(usb_path, wallet_id).join(ADDRESSES_FILE);
        self.storage
            .read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<AddressBook>(&bytes).ok())
            .map_or(0, |book| book.total_count)
    }

    fn write_wallet_pair(
        &self,
        usb_path: &Path,
        wallet_file: &WalletFile,
        book: &AddressBook,
    ) -> Result<()> {
        let dir = self.wallet_dir(usb_path, &wallet_file.id);
        self.storage.create_dir_all(&dir)?;
        let result = (|| {
            self.storage.write_atomic(
                &dir.join(WALLET_FILE),
                &serde_json::to_vec_pretty(wallet_file)?,
                true,
            )?;
            self.storage.write_atomic(
                &dir.join(ADDRESSES_FILE),
                &serde_json::to_vec_pretty(book)?,
                false,
            )
        })();
        if result.is_err() {
            // Never leave a half-created wallet behind.
            let _ = self.storage.remove_dir_all(&dir);
        }
        result
    }

    fn ensure_free_space(&self, usb_path: &Path) -> Result<()> {
        let available = self.storage.available_space(usb_path)?;
        if available < MIN_FREE_BYTES {
            return Err(CoreError::InsufficientSpace);
        }
        Ok(())
    }

    fn read_provider_store(
        &self,
        password: &SecretString,
        usb_path: &Path,
    ) -> Result<ProviderStore> {
        let path = usb_path.join(PROVIDER_CONFIG_FILE);
        if !self.storage.exists(&path) {
            return Ok(ProviderStore::new());
        }
        let blob: EncryptedBlob = serde_json::from_slice(&self.storage.read(&path)?)?;
        let plaintext = vault::open(&blob, password)?;
        Ok(serde_json::from_slice(&plaintext)?)
    }

    fn write_provider_store(
        &self,
        password: &SecretString,
        usb_path: &Path,
        store: &ProviderStore,
    ) -> Result<()> {
        self.storage.create_dir_all(usb_path)?;
        self.ensure_free_space(usb_path)?;
        let blob = vault::seal(password, &serde_json::to_vec(store)?, self.kdf_cost)?;
        let path = usb_path.join(PROVIDER_CONFIG_FILE);
        self.storage
            .write_atomic(&path, &serde_json::to_vec_pretty(&blob)?, true)
    }
}

/// First 16 bytes of SHA-256(seed) rendered as an RFC 4122 v4 uuid, so the
/// same mnemonic+passphrase always maps to the same id.
fn wallet_id_from_seed(seed: &[u8]) -> String {
    let digest = crypto::sha256(seed);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

/// SHA-256 over the compact serialisation of the addresses array.
pub fn addresses_checksum(addresses: &[DerivedAddress]) -> Result<String> {
    Ok(hex::encode(crypto::sha256(&serde_json::to_vec(addresses)?)))
}

fn build_address_book(
    wallet_id: &str,
    generated_at: String,
    addresses: Vec<DerivedAddress>,
) -> Result<AddressBook> {
    let checksum = addresses_checksum(&addresses)?;
    Ok(AddressBook {
        schema_version: ADDRESS_BOOK_SCHEMA.to_string(),
        wallet_id: wallet_id.to_string(),
        generated_at,
        total_count: addresses.len(),
        checksum,
        addresses,
    })
}

fn record_of(wallet_file: &WalletFile, address_count: usize) -> WalletRecord {
    WalletRecord {
        id: wallet_file.id.clone(),
        name: wallet_file.name.clone(),
        created_at: wallet_file.created_at.clone(),
        updated_at: wallet_file.updated_at.clone(),
        has_passphrase: wallet_file.has_passphrase,
        address_count,
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidName("name is empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::InvalidName(format!(
            "name exceeds {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn resolve_name(name: Option<String>, existing: usize) -> Result<String> {
    match name {
        Some(n) => validate_name(&n),
        None => Ok(format!("Wallet {}", existing + 1)),
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn to_csv(book: &AddressBook) -> Vec<u8> {
    let mut out = String::from("rank,symbol,name,coin_type,derivation_path,address,category,curve\n");
    for a in &book.addresses {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            a.rank,
            a.symbol,
            a.name,
            a.coin_type,
            a.derivation_path,
            a.address,
            a.category.as_str(),
            a.curve.as_str(),
        ));
    }
    out.into_bytes()
}
