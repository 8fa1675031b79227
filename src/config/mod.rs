// ABOUTME: Configuration module for the Strava OAuth provider
// ABOUTME: Environment-only loading of client credentials, API version and scopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Strava client configuration
pub mod strava;

pub use oauth2_client_core::HttpClientSettings;
pub use strava::{parse_scopes, StravaConfig};
