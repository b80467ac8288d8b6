// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Monica Core Library
//!
//! Client core for the Monica personal CRM: validates an endpoint and API
//! token, keeps them in the platform keychain, and mirrors the server's
//! contacts into a local SQLite cache.

pub mod api;
pub mod config;
pub mod contact;
pub mod network;
pub mod storage;
pub mod sync;

pub use api::{
    AuthController, AuthState, CallbackHandler, ClientError, ClientEvent, ClientResult,
    EventDispatcher, EventHandler, MonicaClient, MonicaClientBuilder, SyncController,
};
pub use config::{ApiConfig, ClientConfig};
pub use contact::{
    CachedContact, Contact, ContactError, ContactInput, DetailRow, Field, SkippedRecord,
};
pub use network::{ApiClient, ApiError, FetchOutcome};
pub use storage::{
    CredentialStore, Credentials, MemoryKeyStorage, SecureStorage, SharedStorage, Storage,
    StorageError,
};
pub use sync::{CancellationToken, SyncReport, SyncStatus};
