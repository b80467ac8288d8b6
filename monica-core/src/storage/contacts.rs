// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact cache operations.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

use super::{Storage, StorageError};
use crate::contact::{CachedContact, Contact, SkippedRecord};

/// Column list shared by every query, in `FIELD_MAP` order.
pub(super) const SELECT_COLUMNS: &str = "id, first_name, last_name, nickname, email, phone, \
     birthdate, address, company, job_title, notes, created_at, updated_at, last_synced_at";

const UPSERT_SQL: &str = "INSERT INTO contacts
     (id, first_name, last_name, nickname, email, phone, birthdate, address,
      company, job_title, notes, created_at, updated_at, last_synced_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
     ON CONFLICT(id) DO UPDATE SET
        first_name = excluded.first_name,
        last_name = excluded.last_name,
        nickname = excluded.nickname,
        email = excluded.email,
        phone = excluded.phone,
        birthdate = excluded.birthdate,
        address = excluded.address,
        company = excluded.company,
        job_title = excluded.job_title,
        notes = excluded.notes,
        created_at = excluded.created_at,
        updated_at = excluded.updated_at,
        last_synced_at = excluded.last_synced_at";

/// Outcome of a best-effort batch upsert.
#[derive(Debug, Clone, Default)]
pub struct BatchUpsert {
    pub committed: Vec<CachedContact>,
    pub skipped: Vec<SkippedRecord>,
}

fn write_row(conn: &Connection, cached: &CachedContact) -> rusqlite::Result<()> {
    let c = &cached.contact;
    conn.execute(
        UPSERT_SQL,
        params![
            c.id,
            c.first_name,
            c.last_name,
            c.nickname,
            c.email,
            c.phone,
            c.birthdate,
            c.address,
            c.company,
            c.job_title,
            c.notes,
            c.created_at,
            c.updated_at,
            cached.last_synced_at,
        ],
    )?;
    Ok(())
}

fn row_to_cached(row: &Row<'_>) -> rusqlite::Result<CachedContact> {
    Ok(CachedContact {
        contact: Contact {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            nickname: row.get("nickname")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            birthdate: row.get("birthdate")?,
            address: row.get("address")?,
            company: row.get("company")?,
            job_title: row.get("job_title")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        },
        last_synced_at: row.get("last_synced_at")?,
    })
}

impl Storage {
    // === Upserts ===

    /// Inserts or overwrites one contact, stamping it as synced at `now`.
    pub fn upsert_contact(
        &self,
        contact: &Contact,
        now: DateTime<Utc>,
    ) -> Result<CachedContact, StorageError> {
        let cached = CachedContact::from_remote(contact.clone(), now)?;
        write_row(&self.conn, &cached)?;
        Ok(cached)
    }

    /// Upserts a batch inside one transaction.
    ///
    /// A record that fails validation or its write is logged and reported in
    /// `skipped`; the rest of the batch still commits.
    pub fn upsert_batch(
        &mut self,
        contacts: Vec<Contact>,
        now: DateTime<Utc>,
    ) -> Result<BatchUpsert, StorageError> {
        let tx = self.conn.transaction()?;
        let mut outcome = BatchUpsert::default();

        for contact in contacts {
            let written = CachedContact::from_remote(contact.clone(), now)
                .map_err(StorageError::from)
                .and_then(|cached| {
                    write_row(&tx, &cached)
                        .map(|()| cached)
                        .map_err(StorageError::from)
                });

            match written {
                Ok(cached) => outcome.committed.push(cached),
                Err(e) => {
                    warn!(contact_id = contact.id, error = %e, "skipping contact during upsert");
                    outcome.skipped.push(SkippedRecord {
                        record: serde_json::to_value(&contact).unwrap_or_default(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tx.commit()?;
        Ok(outcome)
    }

    // === Queries ===

    /// Loads a contact by id.
    pub fn load_contact(&self, id: i64) -> Result<Option<CachedContact>, StorageError> {
        let sql = format!("SELECT {} FROM contacts WHERE id = ?1", SELECT_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![id], row_to_cached)
            .optional()?)
    }

    /// Lists all contacts, ordered by first name then last name.
    ///
    /// Contacts without a first name sort after those with one.
    pub fn list_contacts(&self) -> Result<Vec<CachedContact>, StorageError> {
        let sql = format!(
            "SELECT {} FROM contacts
             ORDER BY first_name IS NULL, first_name COLLATE NOCASE,
                      last_name IS NULL, last_name COLLATE NOCASE, id",
            SELECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_cached)?;

        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(row?);
        }
        Ok(contacts)
    }

    /// Contacts whose full name contains `query`, ignoring case.
    pub fn search_contacts(&self, query: &str) -> Result<Vec<CachedContact>, StorageError> {
        Ok(self
            .list_contacts()?
            .into_iter()
            .filter(|cached| cached.contact.matches_query(query))
            .collect())
    }

    /// Number of cached contacts.
    pub fn contact_count(&self) -> Result<usize, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // === Removal ===

    /// Deletes a contact by id.
    pub fn delete_contact(&self, id: i64) -> Result<bool, StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    /// Removes every cached contact. Returns how many were removed.
    pub fn clear_all(&self) -> Result<usize, StorageError> {
        Ok(self.conn.execute("DELETE FROM contacts", [])?)
    }
}
