// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Secure Storage Module
//!
//! Capability interface over the platform secret store (iOS Keychain,
//! Android KeyStore, macOS Keychain, Linux Secret Service, Windows Credential
//! Manager), plus an in-memory implementation for tests and for platforms
//! that hand secrets over at startup.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::storage::StorageError;

/// Trait for secure storage of small secrets.
///
/// Callers treat implementations as single-writer; no thread-safety beyond
/// `Send + Sync` is promised for concurrent access to the same entry.
pub trait SecureStorage: Send + Sync {
    /// Saves a secret, replacing any existing value.
    fn save_key(&self, name: &str, key: &[u8]) -> Result<(), StorageError>;

    /// Loads a secret.
    /// Returns None if the entry doesn't exist.
    fn load_key(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Deletes a secret. Deleting a missing entry succeeds.
    fn delete_key(&self, name: &str) -> Result<(), StorageError>;

    /// Checks if an entry exists.
    fn has_key(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.load_key(name)?.is_some())
    }
}

/// Platform keyring implementation using the `keyring` crate.
/// Available when the `secure-storage` feature is enabled.
#[cfg(feature = "secure-storage")]
pub struct PlatformKeyring {
    service: String,
}

#[cfg(feature = "secure-storage")]
impl PlatformKeyring {
    /// Creates a new platform keyring accessor.
    ///
    /// # Arguments
    /// * `service` - The service name to use for keychain entries (e.g., "monica-client")
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, name: &str) -> Result<keyring::Entry, StorageError> {
        keyring::Entry::new(&self.service, name)
            .map_err(|e| StorageError::SecureStorage(format!("Keyring error: {}", e)))
    }
}

#[cfg(feature = "secure-storage")]
impl SecureStorage for PlatformKeyring {
    fn save_key(&self, name: &str, key: &[u8]) -> Result<(), StorageError> {
        self.entry(name)?
            .set_secret(key)
            .map_err(|e| StorageError::SecureStorage(format!("Failed to save to keychain: {}", e)))
    }

    fn load_key(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match self.entry(name)?.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::SecureStorage(format!(
                "Failed to load from keychain: {}",
                e
            ))),
        }
    }

    fn delete_key(&self, name: &str) -> Result<(), StorageError> {
        match self.entry(name)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(StorageError::SecureStorage(format!(
                "Failed to delete from keychain: {}",
                e
            ))),
        }
    }
}

/// In-memory secret store.
///
/// Nothing survives the process. Used by tests and as the fallback when
/// the `secure-storage` feature is off.
#[derive(Default)]
pub struct MemoryKeyStorage {
    keys: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKeyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

impl SecureStorage for MemoryKeyStorage {
    fn save_key(&self, name: &str, key: &[u8]) -> Result<(), StorageError> {
        self.keys.lock().insert(name.to_string(), key.to_vec());
        Ok(())
    }

    fn load_key(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.keys.lock().get(name).cloned())
    }

    fn delete_key(&self, name: &str) -> Result<(), StorageError> {
        self.keys.lock().remove(name);
        Ok(())
    }
}
