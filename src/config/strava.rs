// ABOUTME: Strava OAuth client configuration loaded from the environment or built in code
// ABOUTME: Validates credentials and logs a secret fingerprint instead of the secret
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{env_config, strava};
use crate::errors::{ConfigError, ConfigResult};
use oauth2_client_core::ClientCredentials;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use tracing::info;

fn default_api_version() -> String {
    strava::DEFAULT_API_VERSION.to_owned()
}

/// Strava OAuth client configuration
///
/// Immutable once handed to a provider. The secret is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StravaConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    #[serde(skip_serializing, default)]
    pub client_secret: String,
    /// Redirect URI registered with Strava
    pub redirect_uri: String,
    /// API version used in resource paths
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Default scopes; empty means the built-in default
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StravaConfig {
    /// Configuration with the default API version and scopes
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            api_version: default_api_version(),
            scopes: Vec::new(),
        }
    }

    /// Use another API version
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Replace the default scopes
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Load and validate configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `MissingEnvVar` when a credential variable is unset, and any
    /// error [`StravaConfig::validate`] reports
    pub fn from_env() -> ConfigResult<Self> {
        let api_version = env::var(env_config::STRAVA_API_VERSION)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_api_version);

        let scopes = env::var(env_config::STRAVA_SCOPES)
            .map(|raw| parse_scopes(&raw))
            .unwrap_or_default();

        let config = Self {
            client_id: required_env(env_config::STRAVA_CLIENT_ID)?,
            client_secret: required_env(env_config::STRAVA_CLIENT_SECRET)?,
            redirect_uri: required_env(env_config::STRAVA_REDIRECT_URI)?,
            api_version,
            scopes,
        };

        config.validate()?;
        config.log_diagnostics();
        Ok(config)
    }

    /// Check the construction preconditions
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` for a blank client ID, secret or redirect URI, and
    /// `InvalidValue` for an API version that is not a single path segment
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
            ("api_version", &self.api_version),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }

        if !self
            .api_version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
        {
            return Err(ConfigError::InvalidValue {
                field: "api_version",
                reason: format!("{:?} is not a single path segment", self.api_version),
            });
        }

        Ok(())
    }

    /// First 8 hex chars of the secret's SHA256, for comparing secrets in logs
    #[must_use]
    pub fn secret_fingerprint(&self) -> String {
        let digest = Sha256::digest(self.client_secret.as_bytes());
        format!("{digest:x}").chars().take(8).collect()
    }

    /// Client identity handed to the OAuth orchestration
    #[must_use]
    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
        }
    }

    fn log_diagnostics(&self) {
        info!(
            client_id = %self.client_id,
            api_version = %self.api_version,
            secret_length = self.client_secret.len(),
            secret_fingerprint = %self.secret_fingerprint(),
            "Strava OAuth configuration loaded"
        );
    }
}

fn required_env(name: &'static str) -> ConfigResult<String> {
    env::var(name).map_err(|_| ConfigError::MissingEnvVar(name))
}

/// Split a comma or whitespace separated scope list
#[must_use]
pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|scope| !scope.is_empty())
        .map(str::to_owned)
        .collect()
}
