// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-friendly error types.

use monica_core::{ApiError, ClientError, StorageError};

/// Mobile-friendly error type.
///
/// Messages are ready to show in an alert.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MobileError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("{0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    ServerError(String),

    #[error("{0}")]
    InvalidResponse(String),

    #[error("{0}")]
    NetworkError(String),

    #[error("Contact not found: {0}")]
    ContactNotFound(i64),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ApiError> for MobileError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err {
            ApiError::InvalidUrl => MobileError::InvalidUrl(message),
            ApiError::Unauthorized => MobileError::Unauthorized(message),
            ApiError::ServerError(_) => MobileError::ServerError(message),
            ApiError::InvalidResponse | ApiError::Decoding(_) => {
                MobileError::InvalidResponse(message)
            }
            ApiError::Network(_) => MobileError::NetworkError(message),
        }
    }
}

impl From<StorageError> for MobileError {
    fn from(err: StorageError) -> Self {
        MobileError::StorageError(err.to_string())
    }
}

impl From<ClientError> for MobileError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api(e) => e.into(),
            ClientError::Storage(e) => e.into(),
            ClientError::Configuration(msg) => MobileError::Internal(msg),
        }
    }
}
