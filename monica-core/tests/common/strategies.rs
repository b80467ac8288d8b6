// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

/// Server endpoints with random padding and trailing slashes.
pub fn messy_endpoint_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("http"), Just("https")],
        "[a-z]{1,12}(\\.[a-z]{2,6}){1,2}",
        proptest::option::of(1024u16..65535),
        "[ \t]{0,3}",
        "/{0,4}",
        "[ \t]{0,3}",
    )
        .prop_map(|(scheme, host, port, lead, slashes, trail)| {
            let port = port.map(|p| format!(":{}", p)).unwrap_or_default();
            format!("{}{}://{}{}{}{}", lead, scheme, host, port, slashes, trail)
        })
}

/// Timestamps between 2000 and 2040, whole seconds.
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_208_988_800i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
}

/// Optional name parts, sometimes blank.
pub fn name_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z]{0,12}")
}
