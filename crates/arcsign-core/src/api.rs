// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// api: the stable facade the GUI layer calls
//
// Every response type carries schema_version so an older or newer frontend
// can detect a mismatch. Read-only operations that never hold a decrypted
// key (get_version, is_first_time_setup, list_wallets) bypass the
// serialiser; everything else is queued.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::chains::GenerationReport;
use crate::error::{CoreError, Result};
use crate::provider::{ProviderConfigView, ProviderUpsert};
use crate::repository::{
    AddressBook, CreateWalletOptions, ExportFormat, ImportWalletOptions, WalletRecord,
    WalletRepository,
};
use crate::secret::SecretString;
use crate::serializer::{self, Request};
use crate::storage::OsStorage;
use crate::vault::AppConfig;

pub const API_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
pub struct CreateWalletResponse {
    pub schema_version: String,
    pub wallet: WalletRecord,
    /// Surfaced exactly once; no later call returns it again.
    pub mnemonic: SecretString,
    pub report: GenerationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportWalletResponse {
    pub schema_version: String,
    pub wallet: WalletRecord,
    pub is_duplicate: bool,
    pub report: GenerationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletResponse {
    pub schema_version: String,
    pub wallet: WalletRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletListResponse {
    pub schema_version: String,
    pub wallets: Vec<WalletRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnlockResponse {
    pub schema_version: String,
    pub config: AppConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub schema_version: String,
    pub file_path: String,
    pub address_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfigResponse {
    pub schema_version: String,
    pub provider: ProviderConfigView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderListResponse {
    pub schema_version: String,
    pub providers: Vec<ProviderConfigView>,
}

/// Handle to a running core. Cloning shares the same serialiser queue, so
/// operations from every clone observe one total order per volume.
#[derive(Clone)]
pub struct CoreHandle {
    tx: mpsc::UnboundedSender<Request>,
    repo: Arc<WalletRepository>,
}

impl CoreHandle {
    /// A core over the real filesystem with production KDF parameters.
    pub fn new() -> Self {
        Self::with_repository(WalletRepository::new(Arc::new(OsStorage)))
    }

    /// A core over a caller-assembled repository (tests inject storage and
    /// KDF cost here).
    pub fn with_repository(repo: WalletRepository) -> Self {
        let repo = Arc::new(repo);
        let tx = serializer::spawn(repo.clone());
        Self { tx, repo }
    }

    /// The only method that never touches the serialiser.
    pub fn get_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn is_first_time_setup(&self, usb_path: &Path) -> bool {
        self.repo.is_first_time_setup(usb_path)
    }

    /// Read-only; decrypts nothing, so it may bypass the queue.
    pub fn list_wallets(&self, usb_path: &Path) -> Result<WalletListResponse> {
        Ok(WalletListResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            wallets: self.repo.list_wallets(usb_path)?,
        })
    }

    pub async fn initialize_app(&self, password: SecretString, usb_path: &Path) -> Result<()> {
        let usb_path = usb_path.to_path_buf();
        self.send(|reply| Request::InitializeApp {
            password,
            usb_path,
            reply,
        })
        .await
    }

    pub async fn unlock_app(
        &self,
        password: SecretString,
        usb_path: &Path,
    ) -> Result<UnlockResponse> {
        let usb_path = usb_path.to_path_buf();
        let config = self
            .send(|reply| Request::UnlockApp {
                password,
                usb_path,
                reply,
            })
            .await?;
        Ok(UnlockResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            config,
        })
    }

    pub async fn create_wallet(
        &self,
        password: SecretString,
        usb_path: &Path,
        opts: CreateWalletOptions,
    ) -> Result<CreateWalletResponse> {
        let usb_path = usb_path.to_path_buf();
        let created = self
            .send(|reply| Request::CreateWallet {
                password,
                usb_path,
                opts,
                reply,
            })
            .await?;
        Ok(CreateWalletResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            wallet: created.wallet,
            mnemonic: created.mnemonic,
            report: created.report,
        })
    }

    pub async fn import_wallet(
        &self,
        mnemonic: SecretString,
        password: SecretString,
        usb_path: &Path,
        opts: ImportWalletOptions,
    ) -> Result<ImportWalletResponse> {
        let usb_path = usb_path.to_path_buf();
        let imported = self
            .send(|reply| Request::ImportWallet {
                mnemonic,
                password,
                usb_path,
                opts,
                reply,
            })
            .await?;
        Ok(ImportWalletResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            wallet: imported.wallet,
            is_duplicate: imported.is_duplicate,
            report: imported.report,
        })
    }

    pub async fn rename_wallet(
        &self,
        wallet_id: &str,
        new_name: &str,
        usb_path: &Path,
    ) -> Result<WalletResponse> {
        let wallet_id = wallet_id.to_string();
        let new_name = new_name.to_string();
        let usb_path = usb_path.to_path_buf();
        let wallet = self
            .send(|reply| Request::RenameWallet {
                wallet_id,
                new_name,
                usb_path,
                reply,
            })
            .await?;
        Ok(WalletResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            wallet,
        })
    }

    pub async fn load_addresses(
        &self,
        wallet_id: &str,
        password: SecretString,
        usb_path: &Path,
    ) -> Result<AddressBook> {
        let wallet_id = wallet_id.to_string();
        let usb_path = usb_path.to_path_buf();
        self.send(|reply| Request::LoadAddresses {
            wallet_id,
            password,
            usb_path,
            reply,
        })
        .await
    }

    pub async fn export_addresses(
        &self,
        wallet_id: &str,
        password: SecretString,
        usb_path: &Path,
        format: ExportFormat,
    ) -> Result<ExportResponse> {
        let wallet_id = wallet_id.to_string();
        let usb_path = usb_path.to_path_buf();
        let result = self
            .send(|reply| Request::ExportAddresses {
                wallet_id,
                password,
                usb_path,
                format,
                reply,
            })
            .await?;
        Ok(ExportResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            file_path: result.file_path,
            address_count: result.address_count,
        })
    }

    pub async fn set_provider_config(
        &self,
        password: SecretString,
        usb_path: &Path,
        upsert: ProviderUpsert,
    ) -> Result<()> {
        let usb_path = usb_path.to_path_buf();
        self.send(|reply| Request::SetProviderConfig {
            password,
            usb_path,
            upsert,
            reply,
        })
        .await
    }

    pub async fn get_provider_config(
        &self,
        password: SecretString,
        usb_path: &Path,
        chain_id: &str,
        provider_type: Option<&str>,
    ) -> Result<ProviderConfigResponse> {
        let usb_path = usb_path.to_path_buf();
        let chain_id = chain_id.to_string();
        let provider_type = provider_type.map(str::to_string);
        let provider = self
            .send(|reply| Request::GetProviderConfig {
                password,
                usb_path,
                chain_id,
                provider_type,
                reply,
            })
            .await?;
        Ok(ProviderConfigResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            provider,
        })
    }

    pub async fn list_provider_configs(
        &self,
        password: SecretString,
        usb_path: &Path,
        chain_id: Option<&str>,
    ) -> Result<ProviderListResponse> {
        let usb_path = usb_path.to_path_buf();
        let chain_id = chain_id.map(str::to_string);
        let providers = self
            .send(|reply| Request::ListProviderConfigs {
                password,
                usb_path,
                chain_id,
                reply,
            })
            .await?;
        Ok(ProviderListResponse {
            schema_version: API_SCHEMA_VERSION.to_string(),
            providers,
        })
    }

    pub async fn delete_provider_config(
        &self,
        password: SecretString,
        usb_path: &Path,
        chain_id: &str,
        provider_type: &str,
    ) -> Result<()> {
        let usb_path = usb_path.to_path_buf();
        let chain_id = chain_id.to_string();
        let provider_type = provider_type.to_string();
        self.send(|reply| Request::DeleteProviderConfig {
            password,
            usb_path,
            chain_id,
            provider_type,
            reply,
        })
        .await
    }

    /// Queued behind every pending secret-holding operation, so by the time
    /// it resolves, all earlier operations have finished their zeroisation.
    pub async fn clear_sensitive_memory(&self) -> Result<()> {
        self.send(|reply| Request::ClearSensitiveMemory { reply })
            .await
    }

    async fn send<T>(&self, build: impl FnOnce(oneshot::Sender<Result<T>>) -> Request) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .map_err(|_| CoreError::Internal("vault worker unavailable".into()))?;
        reply_rx
            .await
            .map_err(|_| CoreError::Internal("vault worker dropped the request".into()))?
    }
}

impl Default for CoreHandle {
    fn default() -> Self {
        Self::new()
    }
}
