// ABOUTME: Error types for the OAuth 2.0 client framework
// ABOUTME: IdentityProviderError for rejected provider responses, OAuth2Error for client failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::response::ParsedBody;
use thiserror::Error;

/// Result alias used throughout the client framework
pub type OAuth2Result<T> = Result<T, OAuth2Error>;

/// Raised when an identity provider rejects a request
///
/// Produced by a provider's response check when the upstream status is outside
/// 2xx or the decoded body carries an explicit error. Callers receive it
/// unchanged; it is never retried.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("identity provider returned an error (HTTP {status}): {message}")]
pub struct IdentityProviderError {
    message: String,
    status: u16,
    body: ParsedBody,
}

impl IdentityProviderError {
    /// Create an error with an explicit message
    #[must_use]
    pub fn new(message: impl Into<String>, status: u16, body: ParsedBody) -> Self {
        Self {
            message: message.into(),
            status,
            body,
        }
    }

    /// Build an error from a rejected response
    ///
    /// The message is taken from the body's `message` field, then
    /// `error_description`, then `error`. An object without any of these is
    /// rendered as JSON; an undecodable body is used as raw text.
    #[must_use]
    pub fn from_response(status: u16, body: &ParsedBody) -> Self {
        let message = match body {
            ParsedBody::Object(map) => ["message", "error_description", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
                .map_or_else(
                    || serde_json::Value::Object(map.clone()).to_string(),
                    str::to_owned,
                ),
            ParsedBody::Raw(text) => text.trim().to_owned(),
        };

        Self::new(message, status, body.clone())
    }

    /// Human-readable error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code of the rejected response
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Parsed response body as received
    #[must_use]
    pub const fn body(&self) -> &ParsedBody {
        &self.body
    }
}

/// Failures surfaced by the OAuth 2.0 client framework
#[derive(Debug, Error)]
pub enum OAuth2Error {
    /// The identity provider rejected the request
    #[error(transparent)]
    IdentityProvider(#[from] IdentityProviderError),

    /// The HTTP transport failed before a response was received
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An endpoint URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A grant was requested without one of its required parameters
    #[error("required parameter \"{parameter}\" is missing for grant \"{grant}\"")]
    MissingGrantParameter {
        /// Grant type name
        grant: &'static str,
        /// Missing parameter name
        parameter: &'static str,
    },

    /// The grant type name is not one this client supports
    #[error("unsupported grant type: {0}")]
    UnsupportedGrant(String),

    /// A successful response did not carry a decodable object
    #[error("unexpected response body: {0}")]
    UnexpectedResponse(String),

    /// The token endpoint returned a payload that is not a valid access token
    #[error("invalid access token payload: {0}")]
    InvalidToken(String),
}

impl OAuth2Error {
    /// Return the identity provider error if this is one
    #[must_use]
    pub const fn as_identity_provider(&self) -> Option<&IdentityProviderError> {
        match self {
            Self::IdentityProvider(err) => Some(err),
            _ => None,
        }
    }
}
