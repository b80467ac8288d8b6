// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Field mapping table.
//!
//! One row per contact field: the JSON key used by the Monica API, the
//! column in the local cache, and the label shown on a detail screen.
//! The serde attributes on [`Contact`](super::Contact) and the SQL in
//! `storage::contacts` are tested against this table.

/// A contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    FirstName,
    LastName,
    Nickname,
    Email,
    Phone,
    Birthdate,
    Address,
    Company,
    JobTitle,
    Notes,
    CreatedAt,
    UpdatedAt,
}

/// Where a field lives on the wire and in the cache.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub field: Field,
    /// JSON key in API payloads
    pub wire: &'static str,
    /// Column in the `contacts` table
    pub column: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Shown as its own row on a detail screen
    pub detail_row: bool,
}

const fn mapping(
    field: Field,
    wire: &'static str,
    column: &'static str,
    label: &'static str,
    detail_row: bool,
) -> FieldMapping {
    FieldMapping {
        field,
        wire,
        column,
        label,
        detail_row,
    }
}

/// All contact fields in wire order.
pub const FIELD_MAP: &[FieldMapping] = &[
    mapping(Field::Id, "id", "id", "ID", false),
    mapping(Field::FirstName, "first_name", "first_name", "First Name", false),
    mapping(Field::LastName, "last_name", "last_name", "Last Name", false),
    mapping(Field::Nickname, "nickname", "nickname", "Nickname", true),
    mapping(Field::Email, "email", "email", "Email", true),
    mapping(Field::Phone, "phone", "phone", "Phone", true),
    mapping(Field::Birthdate, "birthdate", "birthdate", "Birthday", true),
    mapping(Field::Address, "address", "address", "Address", true),
    mapping(Field::Company, "company", "company", "Company", true),
    mapping(Field::JobTitle, "job_title", "job_title", "Job Title", true),
    mapping(Field::Notes, "notes", "notes", "Notes", true),
    mapping(Field::CreatedAt, "created_at", "created_at", "Created", false),
    mapping(Field::UpdatedAt, "updated_at", "updated_at", "Last Updated", true),
];

/// Cache-only column, not part of the wire format.
pub const LAST_SYNCED_COLUMN: &str = "last_synced_at";

/// Looks up the mapping for a field.
///
/// `FIELD_MAP` is ordered like the `Field` variants.
pub fn mapping_for(field: Field) -> &'static FieldMapping {
    &FIELD_MAP[field as usize]
}

/// Looks up a field by its JSON key.
pub fn field_for_wire(key: &str) -> Option<Field> {
    FIELD_MAP.iter().find(|m| m.wire == key).map(|m| m.field)
}

/// Cache column list, in table order, including the cache-only column.
pub fn cache_columns() -> Vec<&'static str> {
    FIELD_MAP
        .iter()
        .map(|m| m.column)
        .chain(std::iter::once(LAST_SYNCED_COLUMN))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_field_mapped_once() {
        let fields: HashSet<Field> = FIELD_MAP.iter().map(|m| m.field).collect();
        assert_eq!(fields.len(), FIELD_MAP.len());
        assert_eq!(FIELD_MAP.len(), 13);
    }

    #[test]
    fn test_table_ordered_like_enum() {
        for (index, m) in FIELD_MAP.iter().enumerate() {
            assert_eq!(m.field as usize, index, "{} out of order", m.wire);
        }
    }

    #[test]
    fn test_mapping_for_round_trips() {
        for m in FIELD_MAP {
            assert_eq!(mapping_for(m.field).wire, m.wire);
            assert_eq!(field_for_wire(m.wire), Some(m.field));
        }
    }

    #[test]
    fn test_cache_columns_end_with_sync_stamp() {
        let columns = cache_columns();
        assert_eq!(columns.first(), Some(&"id"));
        assert_eq!(columns.last(), Some(&LAST_SYNCED_COLUMN));
        assert_eq!(columns.len(), FIELD_MAP.len() + 1);
    }

    #[test]
    fn test_unknown_wire_key() {
        assert_eq!(field_for_wire("firstName"), None);
    }
}
