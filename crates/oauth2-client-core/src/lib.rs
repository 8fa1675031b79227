// ABOUTME: Generic OAuth 2.0 client framework that concrete identity providers plug into
// ABOUTME: Transport seam, access tokens, grants, response parsing and provider orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # OAuth2 Client Core
//!
//! Provider-agnostic half of an OAuth 2.0 Authorization Code client. A concrete
//! provider implements the [`OAuth2Provider`] hooks (endpoint URLs, default
//! scopes, response validation, resource owner mapping) and inherits the
//! orchestration: building authorization URLs, exchanging grants for an
//! [`AccessToken`] and fetching the resource owner profile.
//!
//! ## Modules
//!
//! - **errors**: `IdentityProviderError` raised by response checks, `OAuth2Error` for everything else
//! - **http**: `HttpClient` transport trait and its `reqwest` implementation
//! - **http_client**: shared, timeout-configured `reqwest::Client`
//! - **response**: content-type driven body parsing
//! - **grant**: supported grant types and their required parameters
//! - **token**: the `AccessToken` value object
//! - **pkce**: PKCE verifier/challenge generation
//! - **provider**: the `OAuth2Provider` trait and authorization request types

/// Error types for provider responses and client failures
pub mod errors;
/// Supported OAuth 2.0 grant types
pub mod grant;
/// HTTP transport abstraction
pub mod http;
/// Shared HTTP client with configurable timeouts
pub mod http_client;
/// PKCE (RFC 7636) parameters
pub mod pkce;
/// Provider trait and authorization request building
pub mod provider;
/// Token and resource endpoint response parsing
pub mod response;
/// Access token value object
pub mod token;
/// Scripted transport for tests
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use errors::{IdentityProviderError, OAuth2Error, OAuth2Result};
pub use grant::Grant;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use http_client::{initialize_shared_client, shared_client, HttpClientSettings};
pub use pkce::PkceParams;
pub use provider::{
    random_state, AuthorizationOptions, AuthorizationParameters, AuthorizationRequest,
    ClientCredentials, OAuth2Provider,
};
pub use response::{parse_response, ParsedBody};
pub use token::AccessToken;
