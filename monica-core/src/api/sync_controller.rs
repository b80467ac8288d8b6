// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Controller
//!
//! Mirrors server contacts into the local cache. This is the only component
//! that writes to the cache.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use crate::contact::{CachedContact, Contact, ContactInput};
use crate::network::{ApiClient, ApiError};
use crate::storage::SharedStorage;
use crate::sync::{CancellationToken, SyncReport, SyncStatus};

use super::auth::AuthController;
use super::error::{ClientError, ClientResult};
use super::events::{ClientEvent, EventDispatcher};

/// Pulls contacts from the server and applies remote writes to the cache.
///
/// Operations that touch the cache hold an async gate, so two syncs never
/// interleave their upserts.
pub struct SyncController {
    auth: Arc<AuthController>,
    storage: SharedStorage,
    events: Arc<EventDispatcher>,
    gate: AsyncMutex<()>,
    status: Mutex<SyncStatus>,
}

impl SyncController {
    /// Creates a new SyncController.
    pub fn new(
        auth: Arc<AuthController>,
        storage: SharedStorage,
        events: Arc<EventDispatcher>,
    ) -> Self {
        SyncController {
            auth,
            storage,
            events,
            gate: AsyncMutex::new(()),
            status: Mutex::new(SyncStatus::Idle),
        }
    }

    /// Returns the current sync status.
    pub fn status(&self) -> SyncStatus {
        self.status.lock().clone()
    }

    // === Pull ===

    /// Fetches every remote contact and upserts them in one batch.
    ///
    /// Local records missing from the server are left untouched.
    pub async fn sync_all(&self) -> ClientResult<SyncReport> {
        self.sync_all_with(&CancellationToken::new()).await
    }

    /// Like [`sync_all`](Self::sync_all), stopping between pages once
    /// `cancel` fires. Whatever was fetched before that is still committed.
    pub async fn sync_all_with(&self, cancel: &CancellationToken) -> ClientResult<SyncReport> {
        let _gate = self.gate.lock().await;
        self.begin();

        let result = self.pull_all(cancel).await;
        match &result {
            Ok(report) => {
                self.set_status(SyncStatus::Idle);
                self.events.dispatch(ClientEvent::SyncCompleted {
                    committed: report.committed_count(),
                    skipped: report.skipped_count(),
                    cancelled: report.cancelled,
                });
            }
            Err(e) => self.fail(e),
        }
        result
    }

    /// Refreshes a single contact from `GET /api/contacts/{id}`.
    ///
    /// A contact the server no longer has surfaces as `ServerError(404)`;
    /// the cached copy, if any, is kept. Emits the same `SyncStarted` and
    /// `SyncCompleted`/`SyncFailed` pair as a full sync.
    pub async fn sync_one(&self, id: i64) -> ClientResult<CachedContact> {
        let _gate = self.gate.lock().await;
        self.begin();

        let result = self.pull_one(id).await;
        match &result {
            Ok(cached) => {
                self.set_status(SyncStatus::Idle);
                self.events.dispatch(ClientEvent::ContactUpserted {
                    contact_id: cached.id(),
                });
                self.events.dispatch(ClientEvent::SyncCompleted {
                    committed: 1,
                    skipped: 0,
                    cancelled: false,
                });
            }
            Err(e) => self.fail(e),
        }
        result
    }

    async fn pull_all(&self, cancel: &CancellationToken) -> ClientResult<SyncReport> {
        let client = self.require_client()?;
        let fetched = client.fetch_all_contacts_with(cancel).await?;
        let fetched_count = fetched.contacts.len() + fetched.skipped.len();

        let batch = self.storage.lock().upsert_batch(fetched.contacts, Utc::now())?;
        let report = SyncReport::from_batch(fetched.skipped, batch, fetched.cancelled);

        info!(
            fetched = fetched_count,
            committed = report.committed_count(),
            skipped = report.skipped_count(),
            cancelled = report.cancelled,
            "contact sync finished"
        );
        Ok(report)
    }

    async fn pull_one(&self, id: i64) -> ClientResult<CachedContact> {
        let client = self.require_client()?;
        let contact = client.fetch_contact(id).await?;
        self.store_remote(id, &contact)
    }

    // === Remote writes ===

    /// Creates a contact on the server and caches the result.
    pub async fn create_remote(&self, input: &ContactInput) -> ClientResult<CachedContact> {
        let _gate = self.gate.lock().await;
        let client = self.require_client()?;
        let contact = client.create_contact(input).await?;
        let cached = self.storage.lock().upsert_contact(&contact, Utc::now())?;

        info!(contact_id = cached.id(), "contact created");
        self.events.dispatch(ClientEvent::ContactUpserted {
            contact_id: cached.id(),
        });
        Ok(cached)
    }

    /// Updates a contact on the server and caches the result.
    pub async fn update_remote(
        &self,
        id: i64,
        input: &ContactInput,
    ) -> ClientResult<CachedContact> {
        let _gate = self.gate.lock().await;
        let client = self.require_client()?;
        let contact = client.update_contact(id, input).await?;
        let cached = self.store_remote(id, &contact)?;

        self.events.dispatch(ClientEvent::ContactUpserted { contact_id: id });
        Ok(cached)
    }

    /// Deletes a contact on the server, then locally.
    ///
    /// Returns whether a cached copy existed.
    pub async fn delete_remote(&self, id: i64) -> ClientResult<bool> {
        let _gate = self.gate.lock().await;
        let client = self.require_client()?;
        client.delete_contact(id).await?;
        let removed = self.storage.lock().delete_contact(id)?;

        info!(contact_id = id, removed, "contact deleted");
        self.events.dispatch(ClientEvent::ContactRemoved { contact_id: id });
        Ok(removed)
    }

    // === Local ===

    /// Empties the cache. Returns how many records were removed.
    pub async fn clear_local(&self) -> ClientResult<usize> {
        let _gate = self.gate.lock().await;
        let removed = self.storage.lock().clear_all()?;

        info!(removed, "contact cache cleared");
        self.events.dispatch(ClientEvent::CacheCleared { removed });
        Ok(removed)
    }

    // === Helpers ===

    fn require_client(&self) -> ClientResult<ApiClient> {
        self.auth
            .current_client()
            .ok_or(ClientError::Api(ApiError::Unauthorized))
    }

    /// Caches a record the server returned for `id`.
    fn store_remote(&self, id: i64, contact: &Contact) -> ClientResult<CachedContact> {
        if contact.id != id {
            warn!(requested = id, returned = contact.id, "server returned a different contact");
            return Err(ApiError::InvalidResponse.into());
        }
        Ok(self.storage.lock().upsert_contact(contact, Utc::now())?)
    }

    fn begin(&self) {
        self.set_status(SyncStatus::Syncing);
        self.events.dispatch(ClientEvent::SyncStarted);
    }

    fn fail(&self, error: &ClientError) {
        warn!(error = %error, "sync failed");
        self.set_status(SyncStatus::Failed {
            error: error.to_string(),
        });
        self.events.dispatch(ClientEvent::SyncFailed {
            error: error.to_string(),
        });
    }

    fn set_status(&self, status: SyncStatus) {
        *self.status.lock() = status;
    }
}
