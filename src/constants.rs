// ABOUTME: Strava endpoint, scope and environment variable constants
// ABOUTME: Fixed wire values shared by the provider, configuration and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Fixed Strava wire values and the names of the environment variables the
//! configuration layer reads.

/// Strava OAuth and API endpoint values
pub mod strava {
    /// Base domain for both the OAuth endpoints and the REST API
    pub const BASE_URL: &str = "https://www.strava.com";

    /// Authorization endpoint path
    pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

    /// Token endpoint path
    pub const TOKEN_PATH: &str = "/oauth/token";

    /// Authenticated athlete resource, relative to `/api/{version}`
    pub const ATHLETE_RESOURCE: &str = "athlete";

    /// API version used when none is configured
    pub const DEFAULT_API_VERSION: &str = "v3";

    /// Scopes requested when the caller does not pick any
    pub const DEFAULT_SCOPES: &[&str] = &["read"];

    /// Strava joins scopes with commas, not the OAuth 2.0 default of spaces
    pub const SCOPE_SEPARATOR: &str = ",";

    /// `approval_prompt` value injected when the caller does not set one
    pub const DEFAULT_APPROVAL_PROMPT: &str = "auto";

    /// Location of the athlete id inside a token response
    pub const TOKEN_RESOURCE_OWNER_ID: &str = "athlete.id";
}

/// Environment variable names
pub mod env_config {
    /// OAuth client ID
    pub const STRAVA_CLIENT_ID: &str = "STRAVA_CLIENT_ID";

    /// OAuth client secret
    pub const STRAVA_CLIENT_SECRET: &str = "STRAVA_CLIENT_SECRET";

    /// Registered redirect URI
    pub const STRAVA_REDIRECT_URI: &str = "STRAVA_REDIRECT_URI";

    /// API version override
    pub const STRAVA_API_VERSION: &str = "STRAVA_API_VERSION";

    /// Comma-separated default scope override
    pub const STRAVA_SCOPES: &str = "STRAVA_SCOPES";
}

/// Service identity for structured logging
pub mod service_names {
    /// Name reported by the CLI's startup log line
    pub const STRAVA_OAUTH: &str = "strava-oauth";
}
