// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Credential store.
//!
//! Keeps the server endpoint and API token as two secure-storage entries.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::secure::SecureStorage;
use super::StorageError;
use crate::config::normalize_endpoint;

/// Entry name for the server endpoint.
pub const ENDPOINT_KEY: &str = "api_url";
/// Entry name for the access token.
pub const TOKEN_KEY: &str = "api_token";

/// Endpoint and token for one Monica account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    endpoint: String,
    token: String,
}

impl Credentials {
    /// Builds credentials, normalizing the endpoint.
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, StorageError> {
        let endpoint = normalize_endpoint(endpoint);
        if endpoint.is_empty() {
            return Err(StorageError::InvalidCredentials(
                "endpoint must not be empty".into(),
            ));
        }
        Ok(Credentials {
            endpoint,
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Reads and writes [`Credentials`] through a [`SecureStorage`] backend.
///
/// Every call goes straight to the backend; nothing is cached here.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn SecureStorage>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn SecureStorage>) -> Self {
        CredentialStore { backend }
    }

    /// Replaces any stored credentials.
    ///
    /// Both entries are deleted before either is written, so a save never
    /// leaves a mix of old and new values.
    pub fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        self.backend.delete_key(ENDPOINT_KEY)?;
        self.backend.delete_key(TOKEN_KEY)?;

        let written = self
            .backend
            .save_key(ENDPOINT_KEY, credentials.endpoint.as_bytes())
            .and_then(|()| {
                self.backend
                    .save_key(TOKEN_KEY, credentials.token.as_bytes())
            });

        if written.is_err() {
            self.clear();
        }
        written
    }

    /// Loads credentials if both entries exist and are valid UTF-8.
    pub fn load(&self) -> Result<Option<Credentials>, StorageError> {
        let endpoint = self.load_text(ENDPOINT_KEY)?;
        let token = self.load_text(TOKEN_KEY)?;

        match (endpoint, token) {
            (Some(endpoint), Some(token)) => Ok(Credentials::new(&endpoint, token).ok()),
            _ => Ok(None),
        }
    }

    /// Removes both entries. Failures are logged, not returned.
    pub fn clear(&self) {
        for name in [ENDPOINT_KEY, TOKEN_KEY] {
            if let Err(e) = self.backend.delete_key(name) {
                warn!(entry = name, error = %e, "failed to delete credential entry");
            }
        }
    }

    fn load_text(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .backend
            .load_key(name)?
            .and_then(|bytes| String::from_utf8(bytes).ok()))
    }
}
