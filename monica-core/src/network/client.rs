// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Monica REST client
//!
//! Authenticated JSON calls against one Monica server:
//! - Credential probe (`/api/me`, falling back to `/api/account`)
//! - Paginated contact listing
//! - Single-contact fetch, create, update and delete

use std::fmt;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::config::{normalize_endpoint, ApiConfig};
use crate::contact::wire::ContactEnvelope;
use crate::contact::{Contact, ContactInput, ContactsPage, SkippedRecord};
use crate::storage::Credentials;
use crate::sync::CancellationToken;

/// Contacts gathered by a paginated fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Records in page order
    pub contacts: Vec<Contact>,
    /// Records that did not decode
    pub skipped: Vec<SkippedRecord>,
    /// True if the fetch stopped early because it was cancelled
    pub cancelled: bool,
}

/// HTTP client bound to one server endpoint and token.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
    page_size: u32,
}

impl ApiClient {
    /// Creates a client with default timeouts and page size.
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(endpoint, token, &ApiConfig::default())
    }

    /// Creates a client from explicit configuration.
    ///
    /// The endpoint is normalized first and must then parse as an
    /// `http`/`https` URL with a host.
    pub fn with_config(
        endpoint: &str,
        token: impl Into<String>,
        config: &ApiConfig,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_endpoint(endpoint);
        let parsed = Url::parse(&base_url).map_err(|_| ApiError::InvalidUrl)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ApiError::InvalidUrl);
        }

        let http = Client::builder()
            .connect_timeout(config.request_timeout)
            .read_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
            page_size: config.page_size.max(1),
        })
    }

    /// Creates a client for stored credentials.
    pub fn from_credentials(
        credentials: &Credentials,
        config: &ApiConfig,
    ) -> Result<Self, ApiError> {
        Self::with_config(credentials.endpoint(), credentials.token(), config)
    }

    /// Normalized server endpoint, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // === Requests ===

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&ContactInput>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "monica api request");

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %url, "monica api response");

        ApiError::check_status(status)?;
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Method::GET, path, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_contact(
        &self,
        method: Method,
        path: &str,
        body: Option<&ContactInput>,
    ) -> Result<Contact, ApiError> {
        let body = self.send(method, path, body).await?;
        let envelope: ContactEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.into_contact())
    }

    // === Operations ===

    /// Validates the endpoint and token.
    ///
    /// Probes `/api/me`; servers without that route answer 404, in which
    /// case `/api/account` is tried instead.
    pub async fn test_connection(&self) -> Result<(), ApiError> {
        match self.send(Method::GET, "/api/me", None).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                warn!(url = %self.base_url, "/api/me not found, probing /api/account");
                self.send(Method::GET, "/api/account", None).await.map(|_| ())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetches one page of contacts.
    pub async fn fetch_contacts_page(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<ContactsPage, ApiError> {
        self.get_json(&format!("/api/contacts?page={}&limit={}", page, limit))
            .await
    }

    /// Fetches every page of contacts, in page order.
    pub async fn fetch_all_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let outcome = self
            .fetch_all_contacts_with(&CancellationToken::new())
            .await?;
        Ok(outcome.contacts)
    }

    /// Fetches every page of contacts, checking `cancel` before each request.
    ///
    /// Cancellation is not an error: the records fetched so far are returned
    /// with `cancelled` set.
    pub async fn fetch_all_contacts_with(
        &self,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome, ApiError> {
        let mut outcome = FetchOutcome::default();
        let mut page = 1;

        loop {
            if cancel.is_cancelled() {
                debug!(page, fetched = outcome.contacts.len(), "contact fetch cancelled");
                outcome.cancelled = true;
                break;
            }

            let batch = self.fetch_contacts_page(page, self.page_size).await?;
            let more = batch.has_more_after(page);
            for skipped in &batch.skipped {
                warn!(
                    page,
                    contact_id = ?skipped.contact_id(),
                    reason = %skipped.reason,
                    "skipping undecodable contact"
                );
            }
            outcome.contacts.extend(batch.data);
            outcome.skipped.extend(batch.skipped);

            if !more {
                break;
            }
            page += 1;
        }

        Ok(outcome)
    }

    /// Fetches one contact by id.
    pub async fn fetch_contact(&self, id: i64) -> Result<Contact, ApiError> {
        self.send_contact(Method::GET, &format!("/api/contacts/{}", id), None)
            .await
    }

    /// Creates a contact and returns the server's record.
    pub async fn create_contact(&self, input: &ContactInput) -> Result<Contact, ApiError> {
        self.send_contact(Method::POST, "/api/contacts", Some(input))
            .await
    }

    /// Replaces the writable fields of a contact and returns the server's record.
    pub async fn update_contact(
        &self,
        id: i64,
        input: &ContactInput,
    ) -> Result<Contact, ApiError> {
        self.send_contact(Method::PUT, &format!("/api/contacts/{}", id), Some(input))
            .await
    }

    /// Deletes a contact on the server.
    pub async fn delete_contact(&self, id: i64) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/api/contacts/{}", id), None)
            .await
            .map(|_| ())
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish()
    }
}
