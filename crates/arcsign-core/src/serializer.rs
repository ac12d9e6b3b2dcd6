// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// serializer: the single-writer queue in front of the vault
//
// Every mutating operation and every operation that holds a decrypted key
// flows through one worker thread, FIFO. That thread is the whole
// concurrency story: no two operations ever touch vault bytes at once, and
// no two decrypted mnemonics are alive at the same time.
//
// Cancellation: a request whose reply channel is already closed when it
// reaches the front of the queue is dropped without side effects. Once an
// operation starts it runs to completion — it holds secret material and must
// reach its zeroise step — and the reply is simply discarded if the caller
// is gone.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use crate::error::{CoreError, Result};
use crate::provider::{ProviderConfigView, ProviderUpsert};
use crate::repository::{
    AddressBook, CreateWalletOptions, CreatedWallet, ExportFormat, ExportResult,
    ImportWalletOptions, ImportedWallet, WalletRecord, WalletRepository,
};
use crate::secret::SecretString;
use crate::vault::AppConfig;

type Reply<T> = oneshot::Sender<Result<T>>;

pub(crate) enum Request {
    InitializeApp {
        password: SecretString,
        usb_path: PathBuf,
        reply: Reply<()>,
    },
    UnlockApp {
        password: SecretString,
        usb_path: PathBuf,
        reply: Reply<AppConfig>,
    },
    CreateWallet {
        password: SecretString,
        usb_path: PathBuf,
        opts: CreateWalletOptions,
        reply: Reply<CreatedWallet>,
    },
    ImportWallet {
        mnemonic: SecretString,
        password: SecretString,
        usb_path: PathBuf,
        opts: ImportWalletOptions,
        reply: Reply<ImportedWallet>,
    },
    RenameWallet {
        wallet_id: String,
        new_name: String,
        usb_path: PathBuf,
        reply: Reply<WalletRecord>,
    },
    LoadAddresses {
        wallet_id: String,
        password: SecretString,
        usb_path: PathBuf,
        reply: Reply<AddressBook>,
    },
    ExportAddresses {
        wallet_id: String,
        password: SecretString,
        usb_path: PathBuf,
        format: ExportFormat,
        reply: Reply<ExportResult>,
    },
    SetProviderConfig {
        password: SecretString,
        usb_path: PathBuf,
        upsert: ProviderUpsert,
        reply: Reply<()>,
    },
    GetProviderConfig {
        password: SecretString,
        usb_path: PathBuf,
        chain_id: String,
        provider_type: Option<String>,
        reply: Reply<ProviderConfigView>,
    },
    ListProviderConfigs {
        password: SecretString,
        usb_path: PathBuf,
        chain_id: Option<String>,
        reply: Reply<Vec<ProviderConfigView>>,
    },
    DeleteProviderConfig {
        password: SecretString,
        usb_path: PathBuf,
        chain_id: String,
        provider_type: String,
        reply: Reply<()>,
    },
    ClearSensitiveMemory {
        reply: Reply<()>,
    },
}

/// Spawn the worker and hand back its queue. The worker lives until the last
/// sender is dropped.
pub(crate) fn spawn(repo: Arc<WalletRepository>) -> mpsc::UnboundedSender<Request> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("arcsign-vault".into())
        .spawn(move || worker_loop(rx, repo))
        .expect("worker thread spawn");
    tx
}

fn worker_loop(mut rx: mpsc::UnboundedReceiver<Request>, repo: Arc<WalletRepository>) {
    while let Some(request) = rx.blocking_recv() {
        dispatch(request, &repo);
    }
    debug!("vault worker shutting down");
}

/// Run one operation, translating a panic into `ERROR_INTERNAL` so the
/// worker — and every queued request behind the failed one — survives.
fn run<T>(reply: Reply<T>, op: impl FnOnce() -> Result<T>) {
    if reply.is_closed() {
        debug!("request cancelled before dequeue");
        return;
    }
    let result = catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|panic| {
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        error!(%message, "operation panicked");
        Err(CoreError::Internal(message))
    });
    // The caller may have given up while we worked; zeroisation already
    // happened inside the operation, so dropping the reply is harmless.
    let _ = reply.send(result);
}

fn dispatch(request: Request, repo: &WalletRepository) {
    match request {
        Request::InitializeApp {
            password,
            usb_path,
            reply,
        } => run(reply, || repo.initialize_app(&password, &usb_path)),
        Request::UnlockApp {
            password,
            usb_path,
            reply,
        } => run(reply, || repo.unlock_app(&password, &usb_path)),
        Request::CreateWallet {
            password,
            usb_path,
            opts,
            reply,
        } => run(reply, || repo.create_wallet(&password, &usb_path, opts)),
        Request::ImportWallet {
            mnemonic,
            password,
            usb_path,
            opts,
            reply,
        } => run(reply, || {
            repo.import_wallet(&mnemonic, &password, &usb_path, opts)
        }),
        Request::RenameWallet {
            wallet_id,
            new_name,
            usb_path,
            reply,
        } => run(reply, || repo.rename_wallet(&wallet_id, &new_name, &usb_path)),
        Request::LoadAddresses {
            wallet_id,
            password,
            usb_path,
            reply,
        } => run(reply, || repo.load_addresses(&wallet_id, &password, &usb_path)),
        Request::ExportAddresses {
            wallet_id,
            password,
            usb_path,
            format,
            reply,
        } => run(reply, || {
            repo.export_addresses(&wallet_id, &password, &usb_path, format)
        }),
        Request::SetProviderConfig {
            password,
            usb_path,
            upsert,
            reply,
        } => run(reply, || repo.set_provider_config(&password, &usb_path, upsert)),
        Request::GetProviderConfig {
            password,
            usb_path,
            chain_id,
            provider_type,
            reply,
        } => run(reply, || {
            repo.get_provider_config(&password, &usb_path, &chain_id, provider_type.as_deref())
        }),
        Request::ListProviderConfigs {
            password,
            usb_path,
            chain_id,
            reply,
        } => run(reply, || {
            repo.list_provider_configs(&password, &usb_path, chain_id.as_deref())
        }),
        Request::DeleteProviderConfig {
            password,
            usb_path,
            chain_id,
            provider_type,
            reply,
        } => run(reply, || {
            repo.delete_provider_config(&password, &usb_path, &chain_id, &provider_type)
        }),
        Request::ClearSensitiveMemory { reply } => run(reply, || {
            // Secrets live in zeroise-on-drop wrappers scoped to their
            // operation and the core caches nothing between requests, so
            // there is no residue to scrub here. The entry point exists so
            // callers can pair it with their own teardown.
            Ok(())
        }),
    }
}
