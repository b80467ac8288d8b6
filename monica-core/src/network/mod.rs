// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network Module
//!
//! HTTP access to the Monica REST API.

pub mod client;
mod error;

pub use client::{ApiClient, FetchOutcome};
pub use error::ApiError;
