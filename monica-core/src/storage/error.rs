// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Storage error types.

use thiserror::Error;

use crate::contact::ContactError;

/// Storage error types.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Secure storage error: {0}")]
    SecureStorage(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] ContactError),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}
