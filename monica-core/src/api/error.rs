// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for the client layer.

use thiserror::Error;

use crate::network::ApiError;
use crate::storage::StorageError;

/// Unified error type for client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Cache or credential store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// True if the server rejected the token, or no session exists.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api(e) if e.is_unauthorized())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api(e) if e.is_not_found())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
