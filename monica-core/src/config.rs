// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Keychain service name all credentials are stored under.
pub const DEFAULT_KEYRING_SERVICE: &str = "monica-client";

/// Records requested per page during a full fetch.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// HTTP settings for the Monica API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Connect timeout, and the longest wait between two reads of a response
    pub request_timeout: Duration,

    /// Whole-transfer timeout, including the response body
    pub resource_timeout: Duration,

    /// Records per page for `fetch_all_contacts`
    pub page_size: u32,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            resource_timeout: Duration::from_secs(60),
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: format!(
                "MonicaClient/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ),
        }
    }
}

impl ApiConfig {
    /// Override both timeouts
    pub fn with_timeouts(mut self, request: Duration, resource: Duration) -> Self {
        self.request_timeout = request;
        self.resource_timeout = resource;
        self
    }

    /// Override the page size (never below 1)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Top-level configuration for an embedding application.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP settings
    pub api: ApiConfig,

    /// SQLite file backing the local contact cache
    pub storage_path: PathBuf,

    /// Keychain service for the credential store
    pub keyring_service: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage_path: PathBuf::from("monica.db"),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Place the cache database inside `data_dir`
    pub fn in_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: data_dir.into().join("monica.db"),
            ..Default::default()
        }
    }

    /// Use a custom API configuration
    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Use a custom keychain service name
    pub fn with_keyring_service(mut self, service: impl Into<String>) -> Self {
        self.keyring_service = service.into();
        self
    }
}

/// Trims whitespace and trailing slashes from a server endpoint.
///
/// `" https://monica.example.com/ "` becomes `"https://monica.example.com"`.
pub fn normalize_endpoint(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.resource_timeout, Duration::from_secs(60));
        assert_eq!(config.page_size, 100);
        assert!(config.user_agent.starts_with("MonicaClient/"));
    }

    #[test]
    fn test_page_size_clamped() {
        let config = ApiConfig::default().with_page_size(0);
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn test_client_config_data_dir() {
        let config = ClientConfig::in_data_dir("/tmp/monica");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/monica/monica.db"));
        assert_eq!(config.keyring_service, DEFAULT_KEYRING_SERVICE);
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(
            normalize_endpoint("  https://monica.example.com/ \n"),
            "https://monica.example.com"
        );
        assert_eq!(
            normalize_endpoint("https://monica.example.com//"),
            "https://monica.example.com"
        );
        assert_eq!(normalize_endpoint("   "), "");
    }
}
