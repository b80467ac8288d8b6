// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Property-based tests

mod common;

use chrono::Duration;
use common::sample_contact;
use common::strategies::*;
use monica_core::config::normalize_endpoint;
use monica_core::contact::wire::iso8601;
use monica_core::contact::CachedContact;
use monica_core::network::ApiClient;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_normalized_endpoint_has_no_padding(raw in messy_endpoint_strategy()) {
        let normalized = normalize_endpoint(&raw);
        prop_assert!(!normalized.ends_with('/'));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
        prop_assert_eq!(normalize_endpoint(&normalized), normalized.clone());
    }

    #[test]
    fn prop_messy_endpoints_build_clients(raw in messy_endpoint_strategy()) {
        let client = ApiClient::new(&raw, "tok").unwrap();
        prop_assert_eq!(client.base_url(), normalize_endpoint(&raw));
    }

    #[test]
    fn prop_sync_stamp_never_before_updated_at(
        updated in timestamp_strategy(),
        offset_secs in -86_400i64 * 365..86_400i64 * 365,
    ) {
        let mut contact = sample_contact(1, Some("P"), None);
        contact.updated_at = updated;
        let now = updated + Duration::seconds(offset_secs);

        let cached = CachedContact::from_remote(contact, now).unwrap();
        prop_assert!(cached.last_synced_at >= updated);
        prop_assert!(cached.last_synced_at >= now);
    }

    #[test]
    fn prop_iso8601_reads_what_it_writes(ts in timestamp_strategy()) {
        prop_assert_eq!(iso8601::parse(&iso8601::format(&ts)), Some(ts));
    }

    #[test]
    fn prop_initials_at_most_two_chars(first in name_strategy(), last in name_strategy()) {
        let contact = sample_contact(1, first.as_deref(), last.as_deref());
        prop_assert!(contact.initials().chars().count() <= 2);
        let full_name = contact.full_name();
        prop_assert_eq!(full_name.trim(), full_name.as_str());
    }
}
