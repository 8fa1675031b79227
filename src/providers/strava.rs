// ABOUTME: Strava OAuth 2.0 provider plugged into the generic client orchestration
// ABOUTME: Endpoint URLs, comma scope separator, approval prompt and Strava error detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::strava_resource_owner::StravaResourceOwner;
use crate::config::StravaConfig;
use crate::constants::strava;
use crate::errors::{ConfigResult, OAuth2Result};
use oauth2_client_core::{
    AccessToken, ClientCredentials, Grant, HttpClient, IdentityProviderError, OAuth2Provider,
    ParsedBody, PkceParams, ReqwestHttpClient,
};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Strava identity provider
///
/// Holds only configuration and a transport, so a single instance can be
/// shared across tasks and serve any number of concurrent flows.
#[derive(Clone)]
pub struct StravaProvider {
    credentials: ClientCredentials,
    api_version: String,
    default_scopes: Vec<String>,
    http_client: Arc<dyn HttpClient>,
}

impl fmt::Debug for StravaProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StravaProvider")
            .field("client_id", &self.credentials.client_id)
            .field("redirect_uri", &self.credentials.redirect_uri)
            .field("api_version", &self.api_version)
            .field("default_scopes", &self.default_scopes)
            .finish_non_exhaustive()
    }
}

impl StravaProvider {
    /// Provider using the shared `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration is incomplete
    pub fn new(config: StravaConfig) -> ConfigResult<Self> {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Provider using a caller-supplied transport
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration is incomplete
    pub fn with_http_client(
        config: StravaConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> ConfigResult<Self> {
        config.validate()?;

        let credentials = config.credentials();
        let default_scopes = if config.scopes.is_empty() {
            strava::DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect()
        } else {
            config.scopes
        };

        debug!(
            client_id = %credentials.client_id,
            api_version = %config.api_version,
            "Created Strava provider"
        );

        Ok(Self {
            credentials,
            api_version: config.api_version,
            default_scopes,
            http_client,
        })
    }

    /// Provider configured from `STRAVA_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required variable is missing or invalid
    pub fn from_env() -> ConfigResult<Self> {
        Self::new(StravaConfig::from_env()?)
    }

    /// API version used in resource paths
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Shared base domain of the OAuth endpoints and the REST API
    #[must_use]
    pub const fn base_strava_url() -> &'static str {
        strava::BASE_URL
    }

    /// Exchange an authorization code for a token
    ///
    /// # Errors
    ///
    /// Returns `IdentityProvider` when Strava rejects the code, `Transport` on
    /// network failure and `InvalidToken` for an unusable token payload
    pub async fn exchange_code(&self, code: &str) -> OAuth2Result<AccessToken> {
        let token = self
            .get_access_token(
                Grant::AuthorizationCode,
                &[("code".to_owned(), code.to_owned())],
            )
            .await?;
        log_token_issued("authorization_code", &token);
        Ok(token)
    }

    /// Exchange an authorization code obtained with a PKCE challenge
    ///
    /// # Errors
    ///
    /// Same as [`StravaProvider::exchange_code`]
    pub async fn exchange_code_with_pkce(
        &self,
        code: &str,
        pkce: &PkceParams,
    ) -> OAuth2Result<AccessToken> {
        let token = self
            .get_access_token(
                Grant::AuthorizationCode,
                &[
                    ("code".to_owned(), code.to_owned()),
                    ("code_verifier".to_owned(), pkce.code_verifier.clone()),
                ],
            )
            .await?;
        log_token_issued("authorization_code", &token);
        Ok(token)
    }

    /// Obtain a fresh token from a refresh token
    ///
    /// # Errors
    ///
    /// Same as [`StravaProvider::exchange_code`]
    pub async fn refresh_token(&self, refresh_token: &str) -> OAuth2Result<AccessToken> {
        let token = self
            .get_access_token(
                Grant::RefreshToken,
                &[("refresh_token".to_owned(), refresh_token.to_owned())],
            )
            .await?;
        log_token_issued("refresh_token", &token);
        Ok(token)
    }
}

fn log_token_issued(grant: &str, token: &AccessToken) {
    info!(
        grant,
        athlete_id = token.resource_owner_id().unwrap_or("unknown"),
        expires_at = ?token.expires_at(),
        "Strava token issued"
    );
}

impl OAuth2Provider for StravaProvider {
    type ResourceOwner = StravaResourceOwner;

    fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    fn http_client(&self) -> &dyn HttpClient {
        self.http_client.as_ref()
    }

    fn base_authorization_url(&self) -> String {
        format!("{}{}", strava::BASE_URL, strava::AUTHORIZE_PATH)
    }

    fn base_access_token_url(&self, _params: &[(String, String)]) -> String {
        format!("{}{}", strava::BASE_URL, strava::TOKEN_PATH)
    }

    fn resource_owner_details_url(&self, _token: &AccessToken) -> String {
        format!(
            "{}/api/{}/{}",
            strava::BASE_URL,
            self.api_version,
            strava::ATHLETE_RESOURCE
        )
    }

    fn default_scopes(&self) -> Vec<String> {
        self.default_scopes.clone()
    }

    fn scope_separator(&self) -> &str {
        strava::SCOPE_SEPARATOR
    }

    fn default_approval_prompt(&self) -> Option<&str> {
        Some(strava::DEFAULT_APPROVAL_PROMPT)
    }

    fn access_token_resource_owner_id(&self) -> Option<&str> {
        Some(strava::TOKEN_RESOURCE_OWNER_ID)
    }

    fn authorization_headers(&self, token: &str) -> Vec<(String, String)> {
        vec![("Authorization".to_owned(), format!("Bearer {token}"))]
    }

    fn check_response(&self, status: u16, body: &ParsedBody) -> Result<(), IdentityProviderError> {
        // Strava reports some failures with a 200 and a non-null `message` body
        if !(200..300).contains(&status) || body.has_field("message") || body.has_field("error") {
            return Err(IdentityProviderError::from_response(status, body));
        }
        Ok(())
    }

    fn create_resource_owner(
        &self,
        response: Map<String, Value>,
        _token: &AccessToken,
    ) -> StravaResourceOwner {
        StravaResourceOwner::new(response)
    }
}
