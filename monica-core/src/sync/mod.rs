// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Module
//!
//! Types shared by the sync controller and its callers.

mod cancel;
mod state;

pub use cancel::CancellationToken;
pub use state::{SyncReport, SyncStatus};
