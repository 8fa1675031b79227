// ABOUTME: Library entry point for the Strava OAuth 2.0 provider
// ABOUTME: Strava endpoints, scope rules, error detection and typed athlete profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Strava OAuth2
//!
//! Strava plugin for the generic OAuth 2.0 client in `oauth2-client-core`.
//! The provider supplies Strava's endpoints, its comma-joined scopes, the
//! `approval_prompt` default and its error detection; the client core runs
//! the Authorization Code flow on top.
//!
//! ## Modules
//!
//! - **providers**: `StravaProvider` and the `StravaResourceOwner` athlete profile
//! - **config**: `StravaConfig` loaded from the environment
//! - **errors**: configuration errors and the re-exported client errors
//! - **logging**: `tracing` subscriber setup
//! - **constants**: fixed Strava wire values
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use oauth2_strava::{AuthorizationOptions, OAuth2Provider, StravaConfig, StravaProvider};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StravaConfig::new("client-id", "client-secret", "https://example.com/callback");
//! let provider = StravaProvider::new(config)?;
//!
//! let request = provider.get_authorization_url(
//!     &AuthorizationOptions::default().with_scopes(["read", "activity:read"]),
//! )?;
//! println!("visit {} and keep state {}", request.url, request.state);
//!
//! let token = provider.exchange_code("code-from-callback").await?;
//! let athlete = provider.get_resource_owner(&token).await?;
//! println!("athlete {:?} premium={}", athlete.id(), athlete.premium());
//! # Ok(())
//! # }
//! ```

/// Strava client configuration
pub mod config;
/// Fixed Strava wire values and environment variable names
pub mod constants;
/// Error types
pub mod errors;
/// Structured logging setup
pub mod logging;
/// Identity provider implementations
pub mod providers;

pub use config::StravaConfig;
pub use errors::{ConfigError, ConfigResult};
pub use oauth2_client_core::{
    initialize_shared_client, AccessToken, AuthorizationOptions, AuthorizationRequest, Grant,
    HttpClient, HttpClientSettings, IdentityProviderError, OAuth2Error, OAuth2Provider,
    OAuth2Result, ParsedBody, PkceParams,
};
pub use providers::{StravaProvider, StravaResourceOwner};
