// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync status and results.

use crate::contact::CachedContact;
use crate::storage::{BatchUpsert, SkippedRecord};

/// Where the cache refresh currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// No sync running.
    #[default]
    Idle,

    /// A sync is in progress.
    Syncing,

    /// The last sync failed.
    Failed {
        /// Error description.
        error: String,
    },
}

/// Result of a full sync.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Records written to the cache.
    pub committed: Vec<CachedContact>,
    /// Records that could not be cached, with the reason.
    pub skipped: Vec<SkippedRecord>,
    /// True if the fetch was cancelled before the last page.
    pub cancelled: bool,
}

impl SyncReport {
    /// Combines records that failed to decode with the outcome of the
    /// cache write.
    pub(crate) fn from_batch(
        mut undecodable: Vec<SkippedRecord>,
        batch: BatchUpsert,
        cancelled: bool,
    ) -> Self {
        undecodable.extend(batch.skipped);
        SyncReport {
            committed: batch.committed,
            skipped: undecodable,
            cancelled,
        }
    }

    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True if every fetched record was cached and the fetch ran to the end.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && !self.cancelled
    }
}
