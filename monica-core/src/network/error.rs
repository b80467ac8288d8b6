// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from talking to a Monica server.
///
/// The display strings are shown to users as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL")]
    InvalidUrl,

    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("Invalid API token or unauthorized access")]
    Unauthorized,

    #[error("Server error (code: {0})")]
    ServerError(u16),

    #[error("Failed to decode server response: {0}")]
    Decoding(String),

    /// Transport failure, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Maps a response status onto the error taxonomy.
    pub fn check_status(status: StatusCode) -> Result<(), ApiError> {
        match status.as_u16() {
            200..=299 => Ok(()),
            401 => Err(ApiError::Unauthorized),
            code @ 400..=599 => Err(ApiError::ServerError(code)),
            _ => Err(ApiError::InvalidResponse),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::ServerError(404))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decoding(err.to_string())
    }
}
