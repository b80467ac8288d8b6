// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Fixtures shared by the integration tests: canned Monica JSON bodies,
//! mock server routes, and pre-wired clients.

#![allow(dead_code)]

pub mod strategies;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockito::{Matcher, Mock, ServerGuard};
use monica_core::api::{EventHandler, MonicaClient};
use monica_core::config::{ApiConfig, ClientConfig};
use monica_core::contact::Contact;
use monica_core::storage::{MemoryKeyStorage, Storage};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

/// A Monica contact as the server would send it.
pub fn contact_json(id: i64, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": last_name,
        "nickname": null,
        "email": format!("contact{}@example.com", id),
        "phone": null,
        "birthdate": null,
        "address": null,
        "company": "Example Corp",
        "job_title": null,
        "notes": null,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

/// Decodes a fixture the way the client does.
pub fn contact_from(value: &Value) -> Contact {
    serde_json::from_value(value.clone()).unwrap()
}

/// Contact records `first..first + count`, named after their id.
pub fn contacts_json(first: i64, count: i64) -> Vec<Value> {
    (first..first + count)
        .map(|id| contact_json(id, &format!("First{:03}", id), &format!("Last{:03}", id)))
        .collect()
}

/// A list response with full pagination metadata.
pub fn page_body(
    data: Vec<Value>,
    current_page: u32,
    last_page: u32,
    per_page: u32,
    total: u64,
) -> String {
    let next = (current_page < last_page)
        .then(|| format!("/api/contacts?page={}", current_page + 1));
    json!({
        "data": data,
        "links": {
            "first": "/api/contacts?page=1",
            "last": format!("/api/contacts?page={}", last_page),
            "prev": null,
            "next": next
        },
        "meta": {
            "current_page": current_page,
            "from": 1,
            "last_page": last_page,
            "per_page": per_page,
            "to": per_page,
            "total": total
        }
    })
    .to_string()
}

/// Matcher for `?page=N&limit=M`.
pub fn page_query(page: u32, limit: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("limit".into(), limit.to_string()),
    ])
}

/// Serves one page of `GET /api/contacts`.
pub async fn mock_page(server: &mut ServerGuard, page: u32, limit: u32, body: String) -> Mock {
    server
        .mock("GET", "/api/contacts")
        .match_query(page_query(page, limit))
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Serves 90 contacts as 40/40/10 over three pages of 40.
pub async fn mock_ninety_contacts(server: &mut ServerGuard) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for (page, first, count) in [(1, 1, 40), (2, 41, 40), (3, 81, 10)] {
        let body = page_body(contacts_json(first, count), page, 3, 40, 90);
        mocks.push(mock_page(server, page, 40, body).await);
    }
    mocks
}

/// Accepts the test token on `/api/me`.
pub async fn mock_me(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/api/me")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"id":1,"name":"Test User"}}"#)
        .create_async()
        .await
}

/// API settings with a custom page size.
pub fn api_config(page_size: u32) -> ApiConfig {
    ApiConfig::default().with_page_size(page_size)
}

/// In-memory client with no session yet.
pub fn memory_client(page_size: u32) -> MonicaClient {
    MonicaClient::in_memory(ClientConfig::default().with_api(api_config(page_size))).unwrap()
}

/// In-memory client reporting to `handler`.
pub fn memory_client_with_handler(page_size: u32, handler: Arc<dyn EventHandler>) -> MonicaClient {
    MonicaClient::builder()
        .config(ClientConfig::default().with_api(api_config(page_size)))
        .storage(Storage::in_memory().unwrap())
        .secure_storage(Arc::new(MemoryKeyStorage::new()))
        .event_handler(handler)
        .build()
        .unwrap()
}

/// Logs `client` into the mock server.
pub async fn log_in(client: &MonicaClient, server: &mut ServerGuard) {
    let _me = mock_me(server).await;
    client.authenticate(&server.url(), TOKEN).await.unwrap();
}

/// A fixed contact for storage tests.
pub fn sample_contact(id: i64, first_name: Option<&str>, last_name: Option<&str>) -> Contact {
    Contact {
        id,
        first_name: first_name.map(str::to_string),
        last_name: last_name.map(str::to_string),
        nickname: None,
        email: None,
        phone: None,
        birthdate: None,
        address: None,
        company: None,
        job_title: None,
        notes: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    }
}
