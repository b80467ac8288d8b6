// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Monica Mobile Bindings
//!
//! UniFFI bindings for Android and iOS platforms.
//! Exposes a blocking, mobile-friendly API on top of monica-core.
//!
//! Every method blocks the calling thread on an internal Tokio runtime, so
//! call them off the UI thread.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use monica_core::{
    CancellationToken, ClientConfig, MemoryKeyStorage, MonicaClient, SecureStorage,
};

// === Modules ===

mod error;
mod types;

// Re-export public types
pub use error::MobileError;
pub use types::{
    MobileAuthState, MobileContact, MobileDetailRow, MobileSyncResult, MobileSyncStatus,
};

uniffi::setup_scaffolding!();

// === Logging ===

static LOGGING: OnceCell<()> = OnceCell::new();

/// Installs a `tracing` subscriber writing to stderr.
///
/// `filter` uses `RUST_LOG` syntax, e.g. `"monica_core=debug"`. An invalid
/// filter falls back to `info`. Only the first call has any effect.
#[uniffi::export]
pub fn init_logging(filter: String) {
    LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info"));
        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_err()
        {
            warn!("a tracing subscriber was already installed");
        }
    });
}

// === Main Interface ===

/// Main Monica interface for mobile platforms.
#[derive(uniffi::Object)]
pub struct MonicaMobile {
    runtime: Runtime,
    client: MonicaClient,
    /// Cancellation handle of the refresh in flight, if any.
    refresh: Mutex<Option<CancellationToken>>,
}

impl MonicaMobile {
    fn secure_storage(
        config: &ClientConfig,
        use_platform_keyring: bool,
    ) -> Arc<dyn SecureStorage> {
        if use_platform_keyring {
            #[cfg(feature = "secure-storage")]
            return Arc::new(monica_core::storage::PlatformKeyring::new(
                config.keyring_service.clone(),
            ));

            #[cfg(not(feature = "secure-storage"))]
            warn!(
                service = %config.keyring_service,
                "built without secure-storage, credentials kept in memory"
            );
        }
        Arc::new(MemoryKeyStorage::new())
    }

    /// Clears the refresh slot, unless a newer refresh has taken it over.
    fn finish_refresh(&self, cancel: &CancellationToken) {
        let mut slot = self.refresh.lock();
        if slot.as_ref().is_some_and(|current| current.same_as(cancel)) {
            *slot = None;
        }
    }

    fn contact(&self, id: i64) -> Result<MobileContact, MobileError> {
        self.client
            .get_contact(id)?
            .as_ref()
            .map(MobileContact::from)
            .ok_or(MobileError::ContactNotFound(id))
    }
}

#[uniffi::export]
impl MonicaMobile {
    /// Opens (or creates) the contact cache under `data_dir`.
    ///
    /// With `use_platform_keyring` the credentials live in the OS keychain;
    /// otherwise they are kept for the lifetime of this object only.
    #[uniffi::constructor]
    pub fn new(data_dir: String, use_platform_keyring: bool) -> Result<Arc<Self>, MobileError> {
        let data_path = PathBuf::from(&data_dir);
        std::fs::create_dir_all(&data_path)
            .map_err(|e| MobileError::StorageError(e.to_string()))?;

        let config = ClientConfig::in_data_dir(data_path);
        let backend = Self::secure_storage(&config, use_platform_keyring);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("monica-mobile")
            .enable_all()
            .build()
            .map_err(|e| MobileError::Internal(e.to_string()))?;

        let client = MonicaClient::builder()
            .config(config)
            .secure_storage(backend)
            .build()?;

        info!(data_dir = %data_dir, "monica mobile ready");
        Ok(Arc::new(MonicaMobile {
            runtime,
            client,
            refresh: Mutex::new(None),
        }))
    }

    // === Session ===

    /// Re-validates stored credentials. Call once at startup.
    pub fn check_authentication_status(&self) -> Result<MobileAuthState, MobileError> {
        let state = self
            .runtime
            .block_on(self.client.check_authentication_status())?;
        Ok(state.into())
    }

    /// Logs in. Credentials are stored only if the server accepts them.
    pub fn login(&self, endpoint: String, token: String) -> Result<(), MobileError> {
        self.runtime
            .block_on(self.client.authenticate(&endpoint, &token))?;
        Ok(())
    }

    /// Logs out and forgets the credentials. Cached contacts are kept.
    pub fn logout(&self) {
        self.cancel_refresh();
        self.client.logout();
    }

    pub fn auth_state(&self) -> MobileAuthState {
        self.client.auth_state().into()
    }

    // === Sync ===

    /// Pull-to-refresh: mirrors every server contact into the cache.
    pub fn refresh(&self) -> Result<MobileSyncResult, MobileError> {
        if !self.client.auth_state().is_authenticated() {
            return Err(MobileError::NotAuthenticated);
        }

        let cancel = CancellationToken::new();
        *self.refresh.lock() = Some(cancel.clone());
        let result = self.runtime.block_on(self.client.sync_all_with(&cancel));
        self.finish_refresh(&cancel);

        Ok(MobileSyncResult::from(&result?))
    }

    /// Stops a running refresh after the page in flight.
    pub fn cancel_refresh(&self) {
        if let Some(cancel) = self.refresh.lock().as_ref() {
            cancel.cancel();
        }
    }

    /// Re-fetches one contact from the server.
    pub fn refresh_contact(&self, id: i64) -> Result<MobileContact, MobileError> {
        if !self.client.auth_state().is_authenticated() {
            return Err(MobileError::NotAuthenticated);
        }
        let cached = self.runtime.block_on(self.client.sync_one(id))?;
        Ok(MobileContact::from(&cached))
    }

    pub fn sync_status(&self) -> MobileSyncStatus {
        self.client.sync_status().into()
    }

    // === Cache ===

    /// Cached contacts, sorted by name.
    pub fn list_contacts(&self) -> Result<Vec<MobileContact>, MobileError> {
        Ok(self
            .client
            .list_contacts()?
            .iter()
            .map(MobileContact::from)
            .collect())
    }

    /// Cached contacts whose name contains `query`, ignoring case.
    pub fn search_contacts(&self, query: String) -> Result<Vec<MobileContact>, MobileError> {
        Ok(self
            .client
            .search_contacts(&query)?
            .iter()
            .map(MobileContact::from)
            .collect())
    }

    pub fn get_contact(&self, id: i64) -> Result<MobileContact, MobileError> {
        self.contact(id)
    }

    pub fn contact_count(&self) -> Result<u32, MobileError> {
        Ok(self.client.contact_count()? as u32)
    }

    /// Drops every cached contact. Returns how many were removed.
    pub fn clear_cache(&self) -> Result<u32, MobileError> {
        let removed = self.runtime.block_on(self.client.clear_cache())?;
        Ok(removed as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finished_refresh_leaves_newer_one_cancellable() {
        let dir = TempDir::new().unwrap();
        let mobile = MonicaMobile::new(dir.path().to_string_lossy().into_owned(), false).unwrap();

        let first = CancellationToken::new();
        let second = CancellationToken::new();
        *mobile.refresh.lock() = Some(first.clone());
        *mobile.refresh.lock() = Some(second.clone());

        // The first refresh returns while the second is still running
        mobile.finish_refresh(&first);
        mobile.cancel_refresh();

        assert!(second.is_cancelled());
        assert!(!first.is_cancelled());

        mobile.finish_refresh(&second);
        assert!(mobile.refresh.lock().is_none());
    }
}
