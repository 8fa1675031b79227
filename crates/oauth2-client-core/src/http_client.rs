// ABOUTME: Shared reqwest client with connection pooling for OAuth endpoint calls
// ABOUTME: Timeouts come from HttpClientSettings, applied once before first use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::warn;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the request timeout
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";

/// Environment variable overriding the connect timeout
pub const ENV_HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";

/// Timeout settings for the shared client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientSettings {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientSettings {
    /// Read settings from the environment, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeout_secs: secs_from_env(ENV_HTTP_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS),
            connect_timeout_secs: secs_from_env(
                ENV_HTTP_CONNECT_TIMEOUT_SECS,
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        }
    }
}

fn secs_from_env(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {name}={raw:?}, using {default}s");
            default
        }),
        Err(_) => default,
    }
}

/// Settings applied to the shared client on first use
static CLIENT_SETTINGS: OnceLock<HttpClientSettings> = OnceLock::new();

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Configure the shared client's timeouts
///
/// Only the first call has an effect, and only if it happens before
/// [`shared_client`] is first used. Returns `false` when the settings were
/// already fixed.
pub fn initialize_shared_client(settings: HttpClientSettings) -> bool {
    CLIENT_SETTINGS.set(settings).is_ok()
}

/// Get the shared HTTP client for OAuth requests
///
/// Falls back to default timeouts if `initialize_shared_client()` was not called.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let settings = CLIENT_SETTINGS.get().copied().unwrap_or_default();

        ClientBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(concat!("oauth2-client-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
