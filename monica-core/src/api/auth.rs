// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Auth Controller
//!
//! Owns the session: whether the stored credentials are good, and the API
//! client built from them.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::network::{ApiClient, ApiError};
use crate::storage::{CredentialStore, Credentials};

use super::error::ClientResult;
use super::events::{ClientEvent, EventDispatcher};

/// Session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No usable credentials.
    #[default]
    Unauthenticated,

    /// Credentials were accepted by the server.
    Authenticated {
        /// Normalized server endpoint.
        endpoint: String,
    },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }
}

#[derive(Default)]
struct Session {
    state: AuthState,
    client: Option<ApiClient>,
}

/// Validates, persists and forgets credentials.
pub struct AuthController {
    credentials: CredentialStore,
    api_config: ApiConfig,
    session: RwLock<Session>,
    events: Arc<EventDispatcher>,
}

impl AuthController {
    /// Creates a controller in the `Unauthenticated` state.
    pub fn new(
        credentials: CredentialStore,
        api_config: ApiConfig,
        events: Arc<EventDispatcher>,
    ) -> Self {
        AuthController {
            credentials,
            api_config,
            session: RwLock::new(Session::default()),
            events,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.session.read().state.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().state.is_authenticated()
    }

    /// The client retained from the last successful check or login.
    pub fn current_client(&self) -> Option<ApiClient> {
        self.session.read().client.clone()
    }

    /// Re-validates stored credentials, typically at startup.
    ///
    /// Credentials the server no longer accepts are cleared, as are ones
    /// that cannot even produce a client.
    pub async fn check_authentication_status(&self) -> ClientResult<AuthState> {
        let Some(credentials) = self.credentials.load()? else {
            self.transition(AuthState::Unauthenticated, None);
            return Ok(AuthState::Unauthenticated);
        };

        match self.probe(&credentials).await {
            Ok(client) => {
                info!(endpoint = %client.base_url(), "stored credentials accepted");
                let state = AuthState::Authenticated {
                    endpoint: client.base_url().to_string(),
                };
                self.transition(state, Some(client));
            }
            Err(e) => {
                warn!(error = %e, "stored credentials rejected, clearing");
                self.credentials.clear();
                self.transition(AuthState::Unauthenticated, None);
            }
        }

        Ok(self.state())
    }

    /// Logs in with a new endpoint and token.
    ///
    /// Nothing is persisted and the state is left alone unless the server
    /// accepts the credentials.
    pub async fn authenticate(&self, endpoint: &str, token: &str) -> ClientResult<()> {
        let client = ApiClient::with_config(endpoint, token, &self.api_config)?;
        client.test_connection().await?;

        let credentials = Credentials::new(client.base_url(), token)?;
        self.credentials.save(&credentials)?;

        info!(endpoint = %client.base_url(), "logged in");
        let state = AuthState::Authenticated {
            endpoint: client.base_url().to_string(),
        };
        self.transition(state, Some(client));
        Ok(())
    }

    /// Forgets the credentials and drops the client.
    pub fn logout(&self) {
        self.credentials.clear();
        self.transition(AuthState::Unauthenticated, None);
        info!("logged out");
    }

    async fn probe(&self, credentials: &Credentials) -> Result<ApiClient, ApiError> {
        let client = ApiClient::from_credentials(credentials, &self.api_config)?;
        client.test_connection().await?;
        Ok(client)
    }

    fn transition(&self, state: AuthState, client: Option<ApiClient>) {
        let changed = {
            let mut session = self.session.write();
            session.client = client;
            let changed = session.state != state;
            session.state = state.clone();
            changed
        };

        if changed {
            self.events
                .dispatch(ClientEvent::AuthStateChanged { state });
        }
    }
}
