// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Module
//!
//! Remote contact records as served by the Monica API, and their cached
//! local form.

pub mod fields;
pub mod wire;

pub use fields::{Field, FieldMapping, FIELD_MAP};
pub use wire::{ContactsPage, PaginationLinks, PaginationMeta, SkippedRecord};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a remote record cannot be cached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("contact id must be positive, got {0}")]
    InvalidId(i64),
}

/// A contact as the server knows it.
///
/// `id` is assigned by the server and identifies the record both remotely
/// and in the local cache. Timestamps are server-authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, with = "wire::iso8601::option")]
    pub birthdate: Option<DateTime<Utc>>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "wire::iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "wire::iso8601")]
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Checks the record can be keyed in the cache.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.id <= 0 {
            return Err(ContactError::InvalidId(self.id));
        }
        Ok(())
    }

    /// First and last name joined with a space, trimmed.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Uppercased initials of the first and last name.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|name| name.as_deref().and_then(|n| n.trim().chars().next()))
            .collect::<String>()
            .to_uppercase()
    }

    /// Best available label for list rows.
    pub fn display_name(&self) -> String {
        let full_name = self.full_name();
        if !full_name.is_empty() {
            return full_name;
        }
        [&self.nickname, &self.email]
            .into_iter()
            .flatten()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Contact #{}", self.id))
    }

    /// Display value of a single field, if set.
    pub fn field_value(&self, field: Field) -> Option<String> {
        match field {
            Field::Id => Some(self.id.to_string()),
            Field::FirstName => self.first_name.clone(),
            Field::LastName => self.last_name.clone(),
            Field::Nickname => self.nickname.clone(),
            Field::Email => self.email.clone(),
            Field::Phone => self.phone.clone(),
            Field::Birthdate => self.birthdate.map(|d| d.format("%Y-%m-%d").to_string()),
            Field::Address => self.address.clone(),
            Field::Company => self.company.clone(),
            Field::JobTitle => self.job_title.clone(),
            Field::Notes => self.notes.clone(),
            Field::CreatedAt => Some(self.created_at.format("%Y-%m-%d").to_string()),
            Field::UpdatedAt => Some(self.updated_at.format("%Y-%m-%d").to_string()),
        }
    }

    /// Labelled rows for a detail screen: the name first, then every
    /// non-empty detail field in table order.
    pub fn details(&self) -> Vec<DetailRow> {
        let full_name = self.full_name();
        let name_row = (!full_name.is_empty()).then_some(DetailRow {
            label: "Name",
            value: full_name,
        });

        name_row
            .into_iter()
            .chain(FIELD_MAP.iter().filter(|m| m.detail_row).filter_map(|m| {
                self.field_value(m.field)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| DetailRow {
                        label: m.label,
                        value,
                    })
            }))
            .collect()
    }

    /// Case-insensitive substring match against the full name.
    ///
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.full_name().to_lowercase().contains(&query)
    }

    /// The writable part of this record.
    pub fn to_input(&self) -> ContactInput {
        ContactInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            nickname: self.nickname.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            birthdate: self.birthdate,
            address: self.address.clone(),
            company: self.company.clone(),
            job_title: self.job_title.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Request body for creating or updating a contact.
///
/// Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire::iso8601::option"
    )]
    pub birthdate: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A labelled value for a detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// A contact mirrored into the local cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedContact {
    /// The remote values, as of the last sync
    pub contact: Contact,
    /// When this record was last written by a sync
    pub last_synced_at: DateTime<Utc>,
}

impl CachedContact {
    /// Stamps a remote record for the cache.
    ///
    /// `last_synced_at` is never earlier than the server's `updated_at`, even
    /// when the server clock runs ahead of ours.
    pub fn from_remote(contact: Contact, now: DateTime<Utc>) -> Result<Self, ContactError> {
        contact.validate()?;
        let last_synced_at = now.max(contact.updated_at);
        Ok(CachedContact {
            contact,
            last_synced_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.contact.id
    }

    pub fn full_name(&self) -> String {
        self.contact.full_name()
    }

    pub fn initials(&self) -> String {
        self.contact.initials()
    }

    pub fn display_name(&self) -> String {
        self.contact.display_name()
    }

    pub fn details(&self) -> Vec<DetailRow> {
        self.contact.details()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample() -> Contact {
        Contact {
            id: 7,
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            nickname: None,
            email: Some("ada@example.com".into()),
            phone: None,
            birthdate: Some(Utc.with_ymd_and_hms(1815, 12, 10, 0, 0, 0).unwrap()),
            address: None,
            company: Some("Analytical Engines".into()),
            job_title: None,
            notes: Some(String::new()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_decode_wire_shape() {
        let json = r#"{
            "id": 12,
            "first_name": "Grace",
            "last_name": null,
            "job_title": "Rear Admiral",
            "birthdate": "1906-12-09",
            "created_at": "2023-05-01T08:00:00Z",
            "updated_at": "2023-06-01T08:00:00.000000Z",
            "unknown_extra": true
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id, 12);
        assert_eq!(contact.first_name.as_deref(), Some("Grace"));
        assert_eq!(contact.last_name, None);
        assert_eq!(contact.job_title.as_deref(), Some("Rear Admiral"));
        assert_eq!(
            contact.birthdate,
            Some(Utc.with_ymd_and_hms(1906, 12, 9, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_decode_missing_timestamps_fails() {
        let result: Result<Contact, _> = serde_json::from_str(r#"{"id": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_keys_follow_field_map() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FIELD_MAP.len());
        for m in FIELD_MAP {
            assert!(object.contains_key(m.wire), "missing wire key {}", m.wire);
        }
    }

    #[test]
    fn test_input_skips_unset_fields() {
        let input = ContactInput {
            first_name: Some("Ada".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, serde_json::json!({"first_name": "Ada"}));
    }

    #[test]
    fn test_input_keys_are_wire_keys() {
        let value = serde_json::to_value(sample().to_input()).unwrap();
        for key in value.as_object().unwrap().keys() {
            assert!(fields::field_for_wire(key).is_some(), "unmapped key {key}");
        }
    }

    #[test]
    fn test_names() {
        let contact = sample();
        assert_eq!(contact.full_name(), "Ada Lovelace");
        assert_eq!(contact.initials(), "AL");
        assert_eq!(contact.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut contact = sample();
        contact.first_name = None;
        contact.last_name = None;
        contact.nickname = Some("  ".into());
        assert_eq!(contact.display_name(), "ada@example.com");
        contact.email = None;
        assert_eq!(contact.display_name(), "Contact #7");
        assert_eq!(contact.initials(), "");
    }

    #[test]
    fn test_details_rows() {
        let rows = sample().details();
        let labels: Vec<&str> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec!["Name", "Email", "Birthday", "Company", "Last Updated"]
        );
        assert_eq!(rows[2].value, "1815-12-10");
    }

    #[test]
    fn test_matches_query() {
        let contact = sample();
        assert!(contact.matches_query("love"));
        assert!(contact.matches_query("ADA L"));
        assert!(contact.matches_query(""));
        assert!(!contact.matches_query("grace"));
    }

    #[test]
    fn test_validate_rejects_non_positive_id() {
        let mut contact = sample();
        contact.id = 0;
        assert_eq!(contact.validate(), Err(ContactError::InvalidId(0)));
    }

    #[test]
    fn test_cached_stamp_not_before_updated_at() {
        let contact = sample();
        let skewed_now = contact.updated_at - Duration::hours(1);
        let cached = CachedContact::from_remote(contact.clone(), skewed_now).unwrap();
        assert_eq!(cached.last_synced_at, contact.updated_at);

        let later = contact.updated_at + Duration::days(3);
        let cached = CachedContact::from_remote(contact, later).unwrap();
        assert_eq!(cached.last_synced_at, later);
    }
}
