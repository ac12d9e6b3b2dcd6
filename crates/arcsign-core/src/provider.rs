// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// provider: third-party RPC credentials, sealed under the master password
//
// The api_key is write-only at the API boundary: callers only ever see
// has_api_key. Lower priority number means higher precedence.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::secret::SecretString;

pub const MAX_PRIORITY: u16 = 999;

/// What the API accepts on write; the repository stamps timestamps.
#[derive(Debug, Clone)]
pub struct ProviderUpsert {
    pub provider_type: String,
    pub chain_id: String,
    pub network_id: Option<String>,
    pub api_key: SecretString,
    pub priority: u16,
    pub enabled: bool,
}

/// The full record as persisted inside `provider_config.enc`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_type: String,
    pub chain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    pub api_key: String,
    pub priority: u16,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider_type", &self.provider_type)
            .field("chain_id", &self.chain_id)
            .field("api_key", &"<redacted>")
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// What read operations return: everything except the key itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfigView {
    pub provider_type: String,
    pub chain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    pub has_api_key: bool,
    pub priority: u16,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&ProviderConfig> for ProviderConfigView {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            provider_type: config.provider_type.clone(),
            chain_id: config.chain_id.clone(),
            network_id: config.network_id.clone(),
            has_api_key: !config.api_key.is_empty(),
            priority: config.priority,
            enabled: config.enabled,
            created_at: config.created_at.clone(),
            updated_at: config.updated_at.clone(),
        }
    }
}

/// Plaintext payload of `provider_config.enc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderStore {
    pub schema_version: String,
    pub providers: Vec<ProviderConfig>,
}

impl ProviderStore {
    pub fn new() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            providers: Vec::new(),
        }
    }

    /// Insert or replace on the (chain_id, provider_type) key. `created_at`
    /// survives an update; `updated_at` is the caller's current timestamp.
    pub fn upsert(&mut self, mut config: ProviderConfig) -> Result<()> {
        if config.provider_type.trim().is_empty() {
            return Err(CoreError::InvalidProvider("provider_type is empty".into()));
        }
        if config.chain_id.trim().is_empty() {
            return Err(CoreError::InvalidProvider("chain_id is empty".into()));
        }
        if config.priority > MAX_PRIORITY {
            return Err(CoreError::InvalidProvider(format!(
                "priority {} out of range",
                config.priority
            )));
        }

        match self
            .providers
            .iter_mut()
            .find(|p| p.chain_id == config.chain_id && p.provider_type == config.provider_type)
        {
            Some(existing) => {
                config.created_at = existing.created_at.clone();
                *existing = config;
            }
            None => self.providers.push(config),
        }
        Ok(())
    }

    /// The best match for a chain: exact provider type if given, otherwise
    /// the enabled entry with the lowest priority number.
    pub fn find(&self, chain_id: &str, provider_type: Option<&str>) -> Option<&ProviderConfig> {
        match provider_type {
            Some(pt) => self
                .providers
                .iter()
                .find(|p| p.chain_id == chain_id && p.provider_type == pt),
            None => self
                .providers
                .iter()
                .filter(|p| p.chain_id == chain_id && p.enabled)
                .min_by_key(|p| p.priority),
        }
    }

    pub fn list(&self, chain_id: Option<&str>) -> Vec<ProviderConfigView> {
        let mut views: Vec<ProviderConfigView> = self
            .providers
            .iter()
            .filter(|p| chain_id.map_or(true, |c| p.chain_id == c))
            .map(ProviderConfigView::from)
            .collect();
        views.sort_by(|a, b| (&a.chain_id, a.priority).cmp(&(&b.chain_id, b.priority)));
        views
    }

    pub fn remove(&mut self, chain_id: &str, provider_type: &str) -> Result<()> {
        let before = self.providers.len();
        self.providers
            .retain(|p| !(p.chain_id == chain_id && p.provider_type == provider_type));
        if self.providers.len() == before {
            return Err(CoreError::NotFound(format!(
                "provider {provider_type} for chain {chain_id}"
            )));
        }
        Ok(())
    }
}
