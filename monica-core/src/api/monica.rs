// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Monica Orchestrator
//!
//! Main entry point for embedding applications.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::contact::{CachedContact, ContactInput};
use crate::storage::{
    CredentialStore, MemoryKeyStorage, SecureStorage, SharedStorage, Storage,
};
use crate::sync::{CancellationToken, SyncReport, SyncStatus};

use super::auth::{AuthController, AuthState};
use super::error::{ClientError, ClientResult};
use super::events::{EventDispatcher, EventHandler};
use super::sync_controller::SyncController;

/// Wires the credential store, auth controller, cache and sync controller
/// together.
///
/// # Example
///
/// ```ignore
/// use monica_core::api::MonicaClient;
///
/// let client = MonicaClient::builder().storage_path("/data/monica.db").build()?;
///
/// if !client.check_authentication_status().await?.is_authenticated() {
///     client.authenticate("https://monica.example.com", "token").await?;
/// }
/// let report = client.sync_all().await?;
/// println!("{} contacts cached", report.committed_count());
/// ```
pub struct MonicaClient {
    config: ClientConfig,
    storage: SharedStorage,
    events: Arc<EventDispatcher>,
    auth: Arc<AuthController>,
    sync: SyncController,
}

impl MonicaClient {
    /// Starts building a client.
    pub fn builder() -> MonicaClientBuilder {
        MonicaClientBuilder::new()
    }

    /// Client with an in-memory cache and in-memory secrets (for testing).
    pub fn in_memory(config: ClientConfig) -> ClientResult<Self> {
        MonicaClientBuilder::new()
            .config(config)
            .storage(Storage::in_memory()?)
            .secure_storage(Arc::new(MemoryKeyStorage::new()))
            .build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn auth(&self) -> &Arc<AuthController> {
        &self.auth
    }

    pub fn sync(&self) -> &SyncController {
        &self.sync
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub fn events(&self) -> &Arc<EventDispatcher> {
        &self.events
    }

    // === Session ===

    /// Re-validates stored credentials.
    pub async fn check_authentication_status(&self) -> ClientResult<AuthState> {
        self.auth.check_authentication_status().await
    }

    /// Logs in with a new endpoint and token.
    pub async fn authenticate(&self, endpoint: &str, token: &str) -> ClientResult<()> {
        self.auth.authenticate(endpoint, token).await
    }

    /// Logs out. The cache is kept; call [`clear_cache`](Self::clear_cache)
    /// to drop it too.
    pub fn logout(&self) {
        self.auth.logout();
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    // === Sync ===

    pub async fn sync_all(&self) -> ClientResult<SyncReport> {
        self.sync.sync_all().await
    }

    pub async fn sync_all_with(&self, cancel: &CancellationToken) -> ClientResult<SyncReport> {
        self.sync.sync_all_with(cancel).await
    }

    pub async fn sync_one(&self, id: i64) -> ClientResult<CachedContact> {
        self.sync.sync_one(id).await
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync.status()
    }

    // === Remote writes ===

    pub async fn create_contact(&self, input: &ContactInput) -> ClientResult<CachedContact> {
        self.sync.create_remote(input).await
    }

    pub async fn update_contact(
        &self,
        id: i64,
        input: &ContactInput,
    ) -> ClientResult<CachedContact> {
        self.sync.update_remote(id, input).await
    }

    pub async fn delete_contact(&self, id: i64) -> ClientResult<bool> {
        self.sync.delete_remote(id).await
    }

    // === Cache reads ===

    /// Lists cached contacts, sorted by name.
    pub fn list_contacts(&self) -> ClientResult<Vec<CachedContact>> {
        Ok(self.storage.lock().list_contacts()?)
    }

    /// Cached contacts whose name contains `query`.
    pub fn search_contacts(&self, query: &str) -> ClientResult<Vec<CachedContact>> {
        Ok(self.storage.lock().search_contacts(query)?)
    }

    pub fn get_contact(&self, id: i64) -> ClientResult<Option<CachedContact>> {
        Ok(self.storage.lock().load_contact(id)?)
    }

    pub fn contact_count(&self) -> ClientResult<usize> {
        Ok(self.storage.lock().contact_count()?)
    }

    /// Empties the cache.
    pub async fn clear_cache(&self) -> ClientResult<usize> {
        self.sync.clear_local().await
    }
}

/// Builder for [`MonicaClient`].
pub struct MonicaClientBuilder {
    config: ClientConfig,
    storage: Option<Storage>,
    secure_storage: Option<Arc<dyn SecureStorage>>,
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl MonicaClientBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        MonicaClientBuilder {
            config: ClientConfig::default(),
            storage: None,
            secure_storage: None,
            handlers: Vec::new(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the cache database path.
    pub fn storage_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.storage_path = path.into();
        self
    }

    /// Uses an already opened cache instead of `storage_path`.
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the secret store backing the credentials.
    pub fn secure_storage(mut self, backend: Arc<dyn SecureStorage>) -> Self {
        self.secure_storage = Some(backend);
        self
    }

    /// Registers an event handler.
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Builds the client.
    ///
    /// Without an explicit secret store, the platform keychain is used when
    /// the `secure-storage` feature is on, memory otherwise.
    pub fn build(self) -> ClientResult<MonicaClient> {
        let storage = match self.storage {
            Some(storage) => storage,
            None => open_storage(&self.config)?,
        };
        let secure_storage = self
            .secure_storage
            .unwrap_or_else(|| default_secure_storage(&self.config));

        let mut events = EventDispatcher::new();
        for handler in self.handlers {
            events.add_handler(handler);
        }
        let events = Arc::new(events);
        let storage = storage.into_shared();

        let auth = Arc::new(AuthController::new(
            CredentialStore::new(secure_storage),
            self.config.api.clone(),
            events.clone(),
        ));
        let sync = SyncController::new(auth.clone(), storage.clone(), events.clone());

        Ok(MonicaClient {
            config: self.config,
            storage,
            events,
            auth,
            sync,
        })
    }
}

impl Default for MonicaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn open_storage(config: &ClientConfig) -> ClientResult<Storage> {
    if let Some(parent) = config.storage_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Configuration(e.to_string()))?;
        }
    }
    Ok(Storage::open(&config.storage_path)?)
}

#[cfg(feature = "secure-storage")]
fn default_secure_storage(config: &ClientConfig) -> Arc<dyn SecureStorage> {
    Arc::new(crate::storage::PlatformKeyring::new(
        config.keyring_service.clone(),
    ))
}

#[cfg(not(feature = "secure-storage"))]
fn default_secure_storage(_config: &ClientConfig) -> Arc<dyn SecureStorage> {
    Arc::new(MemoryKeyStorage::new())
}
