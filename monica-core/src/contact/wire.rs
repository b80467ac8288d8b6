// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire envelopes and the ISO-8601 date format used by the Monica API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Contact;

/// A remote record that did not make it into the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// The record as the server sent it
    pub record: Value,
    pub reason: String,
}

impl SkippedRecord {
    /// The record's `id`, if it has a numeric one.
    pub fn contact_id(&self) -> Option<i64> {
        self.record.get("id").and_then(Value::as_i64)
    }
}

/// One page of `GET /api/contacts`.
///
/// Records are decoded one by one. Those that don't decode as a [`Contact`]
/// land in `skipped` instead of failing the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawContactsPage")]
pub struct ContactsPage {
    pub data: Vec<Contact>,
    pub skipped: Vec<SkippedRecord>,
    pub links: Option<PaginationLinks>,
    pub meta: Option<PaginationMeta>,
}

#[derive(Deserialize)]
struct RawContactsPage {
    data: Vec<Value>,
    #[serde(default)]
    links: Option<PaginationLinks>,
    #[serde(default)]
    meta: Option<PaginationMeta>,
}

impl From<RawContactsPage> for ContactsPage {
    fn from(raw: RawContactsPage) -> Self {
        let mut data = Vec::with_capacity(raw.data.len());
        let mut skipped = Vec::new();
        for record in raw.data {
            match Contact::deserialize(&record) {
                Ok(contact) => data.push(contact),
                Err(e) => skipped.push(SkippedRecord {
                    record,
                    reason: e.to_string(),
                }),
            }
        }

        ContactsPage {
            data,
            skipped,
            links: raw.links,
            meta: raw.meta,
        }
    }
}

impl ContactsPage {
    /// True when the server reports another page after this one.
    ///
    /// A page without `meta` is treated as the only page.
    pub fn has_more_after(&self, page: u32) -> bool {
        self.meta
            .as_ref()
            .is_some_and(|meta| page < meta.last_page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    #[serde(default)]
    pub from: Option<u64>,
    pub last_page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub to: Option<u64>,
    pub total: u64,
}

/// Single-contact response body.
///
/// Newer servers wrap the record as `{"data": {...}}`, older ones return it bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContactEnvelope {
    Wrapped { data: Contact },
    Bare(Contact),
}

impl ContactEnvelope {
    pub(crate) fn into_contact(self) -> Contact {
        match self {
            ContactEnvelope::Wrapped { data } => data,
            ContactEnvelope::Bare(contact) => contact,
        }
    }
}

/// ISO-8601 timestamps.
///
/// Encodes as RFC 3339 in UTC with whole seconds. Decodes any RFC 3339
/// timestamp, and plain `YYYY-MM-DD` dates as midnight UTC.
pub mod iso8601 {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {raw}")))
    }

    /// Same format for nullable fields.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_str(&super::format(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                    de::Error::custom(format!("invalid ISO-8601 timestamp: {raw}"))
                }),
            }
        }
    }
}
