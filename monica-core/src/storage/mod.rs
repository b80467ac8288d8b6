// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! Local contact cache (SQLite) and the secure credential store.

mod contacts;
mod error;

pub mod credentials;
pub mod migration;
pub mod secure;

pub use contacts::BatchUpsert;
pub use crate::contact::SkippedRecord;
pub use credentials::{CredentialStore, Credentials};
pub use error::StorageError;
pub use secure::{MemoryKeyStorage, SecureStorage};

#[cfg(feature = "secure-storage")]
pub use secure::PlatformKeyring;

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::Connection;

/// Cache handle shared between the sync controller (the only writer) and
/// whatever renders the contacts.
pub type SharedStorage = Arc<Mutex<Storage>>;

/// SQLite-backed contact cache keyed by contact id.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens or creates a cache database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Creates an in-memory cache (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Wraps this cache for sharing.
    pub fn into_shared(self) -> SharedStorage {
        Arc::new(Mutex::new(self))
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&self) -> Result<(), StorageError> {
        let migrations = migration::all_migrations();
        migration::MigrationRunner::run(&self.conn, &migrations)
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        migration::MigrationRunner::current_version(&self.conn)
    }
}
