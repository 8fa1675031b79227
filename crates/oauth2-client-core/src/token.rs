// ABOUTME: Access token value object built from token endpoint responses
// ABOUTME: Normalizes expires_in / expires / expires_at into a unix expiry timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{OAuth2Error, OAuth2Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Expiry values above this (2013-01-28T00:00:00Z) are absolute timestamps;
/// smaller values are lifetimes in seconds.
pub const EXPIRATION_TIMESTAMP_THRESHOLD: i64 = 1_359_331_200;

/// Response keys consumed by the token itself and excluded from [`AccessToken::values`]
const RESERVED_KEYS: &[&str] = &[
    "access_token",
    "resource_owner_id",
    "refresh_token",
    "expires_in",
    "expires",
    "expires_at",
    "token_type",
];

/// OAuth 2.0 access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_owner_id: Option<String>,
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl AccessToken {
    /// Wrap a bare bearer credential obtained elsewhere
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires: None,
            refresh_token: None,
            resource_owner_id: None,
            values: Map::new(),
        }
    }

    /// Build a token from a decoded token endpoint response
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` if `access_token` is missing or empty, or if an
    /// expiry field is not numeric or overflows when added to the clock
    pub fn from_response(response: Map<String, Value>) -> OAuth2Result<Self> {
        Self::from_response_at(response, Utc::now())
    }

    /// Same as [`AccessToken::from_response`] with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` if `access_token` is missing or empty, or if an
    /// expiry field is not numeric or overflows when added to the clock
    pub fn from_response_at(
        mut response: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> OAuth2Result<Self> {
        let access_token = non_empty_string(response.get("access_token")).ok_or_else(|| {
            OAuth2Error::InvalidToken("required option \"access_token\" is missing".to_owned())
        })?;

        let expires = resolve_expiry(&response, now.timestamp())?;
        let refresh_token = non_empty_string(response.get("refresh_token"));
        let token_type = non_empty_string(response.get("token_type"));
        let resource_owner_id = match response.get("resource_owner_id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };

        for key in RESERVED_KEYS {
            response.remove(*key);
        }

        Ok(Self {
            access_token,
            token_type,
            expires,
            refresh_token,
            resource_owner_id,
            values: response,
        })
    }

    /// The bearer credential
    #[must_use]
    pub fn token(&self) -> &str {
        &self.access_token
    }

    /// Token type as reported by the server (usually `bearer`)
    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Expiry as a unix timestamp, if the server reported one
    #[must_use]
    pub const fn expires(&self) -> Option<i64> {
        self.expires
    }

    /// Expiry as a UTC datetime
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    }

    /// Refresh token, if issued
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Resource owner identifier, if the provider maps one from the response
    #[must_use]
    pub fn resource_owner_id(&self) -> Option<&str> {
        self.resource_owner_id.as_deref()
    }

    /// Every response field not consumed by the token itself
    #[must_use]
    pub const fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Whether the token has expired; tokens without an expiry never do
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.expires
            .is_some_and(|expires| expires <= Utc::now().timestamp())
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn resolve_expiry(response: &Map<String, Value>, now: i64) -> OAuth2Result<Option<i64>> {
    if let Some(seconds) = integer_field(response, "expires_in")? {
        return lifetime_from(now, seconds, "expires_in").map(Some);
    }

    let (key, expires) = match integer_field(response, "expires")? {
        Some(expires) => ("expires", expires),
        None => match integer_field(response, "expires_at")? {
            Some(expires) => ("expires_at", expires),
            None => return Ok(None),
        },
    };

    if expires > EXPIRATION_TIMESTAMP_THRESHOLD {
        Ok(Some(expires))
    } else {
        lifetime_from(now, expires, key).map(Some)
    }
}

fn lifetime_from(now: i64, seconds: i64, key: &str) -> OAuth2Result<i64> {
    now.checked_add(seconds)
        .ok_or_else(|| OAuth2Error::InvalidToken(format!("\"{key}\" is out of range")))
}

fn integer_field(response: &Map<String, Value>, key: &str) -> OAuth2Result<Option<i64>> {
    let invalid = || OAuth2Error::InvalidToken(format!("\"{key}\" must be numeric"));

    match response.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}
