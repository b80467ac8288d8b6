// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-friendly data types for UniFFI.

use monica_core::contact::wire::iso8601;
use monica_core::{AuthState, CachedContact, DetailRow, SyncReport, SyncStatus};

/// Cached contact, flattened for list and detail screens.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileContact {
    pub id: i64,
    pub display_name: String,
    pub initials: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// ISO-8601
    pub birthdate: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
    /// Labelled non-empty rows for the detail screen
    pub details: Vec<MobileDetailRow>,
    /// ISO-8601
    pub updated_at: String,
    /// ISO-8601
    pub last_synced_at: String,
}

impl From<&CachedContact> for MobileContact {
    fn from(cached: &CachedContact) -> Self {
        let c = &cached.contact;
        MobileContact {
            id: c.id,
            display_name: cached.display_name(),
            initials: cached.initials(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            nickname: c.nickname.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            birthdate: c.birthdate.as_ref().map(iso8601::format),
            address: c.address.clone(),
            company: c.company.clone(),
            job_title: c.job_title.clone(),
            notes: c.notes.clone(),
            details: cached.details().iter().map(MobileDetailRow::from).collect(),
            updated_at: iso8601::format(&c.updated_at),
            last_synced_at: iso8601::format(&cached.last_synced_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MobileDetailRow {
    pub label: String,
    pub value: String,
}

impl From<&DetailRow> for MobileDetailRow {
    fn from(row: &DetailRow) -> Self {
        MobileDetailRow {
            label: row.label.to_string(),
            value: row.value.clone(),
        }
    }
}

/// Session state.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum MobileAuthState {
    Unauthenticated,
    Authenticated { endpoint: String },
}

impl From<AuthState> for MobileAuthState {
    fn from(state: AuthState) -> Self {
        match state {
            AuthState::Unauthenticated => MobileAuthState::Unauthenticated,
            AuthState::Authenticated { endpoint } => MobileAuthState::Authenticated { endpoint },
        }
    }
}

/// Sync status.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum MobileSyncStatus {
    Idle,
    Syncing,
    Error { message: String },
}

impl From<SyncStatus> for MobileSyncStatus {
    fn from(status: SyncStatus) -> Self {
        match status {
            SyncStatus::Idle => MobileSyncStatus::Idle,
            SyncStatus::Syncing => MobileSyncStatus::Syncing,
            SyncStatus::Failed { error } => MobileSyncStatus::Error { message: error },
        }
    }
}

/// Sync result with statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileSyncResult {
    /// Contacts written to the cache.
    pub contacts_synced: u32,
    /// Contacts the cache could not take.
    pub contacts_skipped: u32,
    /// Whether the refresh was cancelled part-way.
    pub cancelled: bool,
}

impl From<&SyncReport> for MobileSyncResult {
    fn from(report: &SyncReport) -> Self {
        MobileSyncResult {
            contacts_synced: report.committed_count() as u32,
            contacts_skipped: report.skipped_count() as u32,
            cancelled: report.cancelled,
        }
    }
}
