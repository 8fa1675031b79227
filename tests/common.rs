// ABOUTME: Shared test utilities for the Strava provider integration tests
// ABOUTME: Quiet test logging and providers wired to a scripted HTTP transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used
)]
//! Shared test utilities for `oauth2_strava`

use oauth2_client_core::testing::ScriptedHttpClient;
use oauth2_client_core::HttpResponse;
use oauth2_strava::{StravaConfig, StravaProvider};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Token endpoint reply used by the flow tests
pub const FORM_TOKEN_BODY: &str =
    "access_token=mock_access_token&expires=3600&refresh_token=mock_refresh_token&otherKey={1234}";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration matching the mock credentials used throughout the tests
pub fn test_config() -> StravaConfig {
    StravaConfig::new("mock_client_id", "mock_secret", "none")
}

/// Provider whose transport replays `responses` in order
pub fn scripted_provider(
    responses: Vec<HttpResponse>,
) -> (StravaProvider, Arc<ScriptedHttpClient>) {
    scripted_provider_with_config(test_config(), responses)
}

/// Same as [`scripted_provider`] with a custom configuration
pub fn scripted_provider_with_config(
    config: StravaConfig,
    responses: Vec<HttpResponse>,
) -> (StravaProvider, Arc<ScriptedHttpClient>) {
    init_test_logging();
    let http = Arc::new(ScriptedHttpClient::new(responses));
    let provider = StravaProvider::with_http_client(config, http.clone())
        .expect("test configuration is valid");
    (provider, http)
}
