// ABOUTME: OAuth2Provider trait: provider hooks plus the shared Authorization Code orchestration
// ABOUTME: Builds authorization URLs, exchanges grants for tokens and fetches resource owners
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{IdentityProviderError, OAuth2Error, OAuth2Result};
use crate::grant::Grant;
use crate::http::{HttpClient, HttpRequest};
use crate::pkce::PkceParams;
use crate::response::{parse_response, ParsedBody};
use crate::token::AccessToken;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

/// Query keys owned by the orchestration; extra caller parameters cannot replace them
const RESERVED_AUTHORIZATION_KEYS: &[&str] = &[
    "client_id",
    "response_type",
    "state",
    "scope",
    "code_challenge",
    "code_challenge_method",
];

/// Registered client identity at the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    #[serde(skip_serializing, default)]
    pub client_secret: String,
    /// Redirect URI registered with the provider
    pub redirect_uri: String,
}

/// Caller choices for one authorization request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationOptions {
    /// Requested scopes; `None` or empty means the provider defaults
    pub scope: Option<Vec<String>>,
    /// CSRF state; generated when absent
    pub state: Option<String>,
    /// Approval prompt override
    pub approval_prompt: Option<String>,
    /// PKCE parameters to attach as a code challenge
    pub pkce: Option<PkceParams>,
    /// Additional provider-specific query parameters
    pub extra: Vec<(String, String)>,
}

impl AuthorizationOptions {
    /// Request these scopes instead of the defaults
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Use a caller-chosen state value
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Override the approval prompt
    #[must_use]
    pub fn with_approval_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.approval_prompt = Some(prompt.into());
        self
    }

    /// Attach a PKCE code challenge
    #[must_use]
    pub fn with_pkce(mut self, pkce: PkceParams) -> Self {
        self.pkce = Some(pkce);
        self
    }

    /// Add an extra query parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}

/// Ordered authorization query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationParameters {
    pairs: Vec<(String, String)>,
}

impl AuthorizationParameters {
    /// Value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` is set
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    /// Set `key` only if it is not already present
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains(&key) {
            self.pairs.push((key, value.into()));
        }
    }

    /// Pairs in insertion order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Authorization URL together with the values the caller must keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// URL to send the user to
    pub url: String,
    /// State to compare against the callback's `state`
    pub state: String,
    /// PKCE parameters whose verifier must accompany the code exchange
    pub pkce: Option<PkceParams>,
}

/// Random 32-character hex state value
#[must_use]
pub fn random_state() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// An OAuth 2.0 identity provider
///
/// Implementors supply endpoints, scope defaults, response validation and the
/// resource owner mapping. The provided methods run the Authorization Code
/// flow on top of them. Implementations hold no per-request state, so one
/// instance can serve any number of concurrent flows.
#[async_trait]
pub trait OAuth2Provider: Send + Sync {
    /// Typed profile of the authenticated user
    type ResourceOwner: Send;

    /// Registered client identity
    fn credentials(&self) -> &ClientCredentials;

    /// Transport used for token and profile requests
    fn http_client(&self) -> &dyn HttpClient;

    /// Authorization endpoint without query parameters
    fn base_authorization_url(&self) -> String;

    /// Token endpoint for the given request parameters
    fn base_access_token_url(&self, params: &[(String, String)]) -> String;

    /// Profile endpoint for the given token
    fn resource_owner_details_url(&self, token: &AccessToken) -> String;

    /// Scopes requested when the caller does not pick any
    fn default_scopes(&self) -> Vec<String>;

    /// Delimiter joining scopes into one `scope` parameter
    fn scope_separator(&self) -> &str {
        " "
    }

    /// Approval prompt injected when the caller does not set one
    fn default_approval_prompt(&self) -> Option<&str> {
        None
    }

    /// Dot-separated path of the resource owner id inside the token response
    fn access_token_resource_owner_id(&self) -> Option<&str> {
        None
    }

    /// Headers that authenticate a request with `token`
    fn authorization_headers(&self, _token: &str) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Validate a token or profile response
    ///
    /// # Errors
    ///
    /// Returns `IdentityProviderError` when the response signals a failure
    fn check_response(&self, status: u16, body: &ParsedBody) -> Result<(), IdentityProviderError>;

    /// Wrap a decoded profile
    fn create_resource_owner(
        &self,
        response: Map<String, Value>,
        token: &AccessToken,
    ) -> Self::ResourceOwner;

    /// Merge caller options with the provider defaults
    fn authorization_parameters(&self, options: &AuthorizationOptions) -> AuthorizationParameters {
        let credentials = self.credentials();
        let scopes = match &options.scope {
            Some(scopes) if !scopes.is_empty() => scopes.clone(),
            _ => self.default_scopes(),
        };
        let state = options
            .state
            .clone()
            .filter(|state| !state.is_empty())
            .unwrap_or_else(random_state);

        let mut params = AuthorizationParameters::default();
        params.insert("client_id", credentials.client_id.as_str());
        params.insert("redirect_uri", credentials.redirect_uri.as_str());
        params.insert("state", state);
        params.insert("scope", scopes.join(self.scope_separator()));
        params.insert("response_type", "code");
        if let Some(prompt) = &options.approval_prompt {
            params.insert("approval_prompt", prompt.as_str());
        }
        if let Some(pkce) = &options.pkce {
            params.insert("code_challenge", pkce.code_challenge.as_str());
            params.insert("code_challenge_method", pkce.code_challenge_method.as_str());
        }

        for (key, value) in &options.extra {
            if RESERVED_AUTHORIZATION_KEYS.contains(&key.as_str()) {
                debug!("Ignoring reserved authorization parameter {key}");
                continue;
            }
            params.insert(key.as_str(), value.as_str());
        }
        if let Some(prompt) = self.default_approval_prompt() {
            params.insert_if_absent("approval_prompt", prompt);
        }

        params
    }

    /// Build the URL the user is sent to
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the authorization endpoint is malformed
    fn get_authorization_url(
        &self,
        options: &AuthorizationOptions,
    ) -> OAuth2Result<AuthorizationRequest> {
        let params = self.authorization_parameters(options);
        let mut url = Url::parse(&self.base_authorization_url())?;
        url.query_pairs_mut().extend_pairs(params.pairs());

        Ok(AuthorizationRequest {
            url: url.into(),
            state: params.get("state").unwrap_or_default().to_owned(),
            pkce: options.pkce.clone(),
        })
    }

    /// Copy the resource owner id into the `resource_owner_id` key
    fn prepare_access_token_response(&self, response: &mut Map<String, Value>) {
        let Some(path) = self.access_token_resource_owner_id() else {
            return;
        };
        if let Some(id) = lookup_path(response, path).cloned() {
            response.insert("resource_owner_id".to_owned(), id);
        }
    }

    /// Exchange a grant for an access token
    ///
    /// # Errors
    ///
    /// Returns `MissingGrantParameter` for incomplete options, `IdentityProvider`
    /// when the provider rejects the request, `Transport` on network failure and
    /// `UnexpectedResponse`/`InvalidToken` for unusable success bodies
    async fn get_access_token(
        &self,
        grant: Grant,
        options: &[(String, String)],
    ) -> OAuth2Result<AccessToken> {
        let credentials = self.credentials();
        let defaults = vec![
            ("client_id".to_owned(), credentials.client_id.clone()),
            ("client_secret".to_owned(), credentials.client_secret.clone()),
            ("redirect_uri".to_owned(), credentials.redirect_uri.clone()),
        ];
        let params = grant.prepare_request_parameters(defaults, options)?;
        let request = HttpRequest::post_form(self.base_access_token_url(&params), &params);

        debug!(grant = grant.name(), "Requesting access token");
        let response = self.http_client().send(request).await?;
        let parsed = parse_response(&response);
        if let Err(err) = self.check_response(response.status, &parsed) {
            warn!(grant = grant.name(), status = err.status(), "Token request rejected: {}", err.message());
            return Err(err.into());
        }

        let mut body = parsed.into_object().ok_or_else(|| {
            OAuth2Error::UnexpectedResponse("token endpoint did not return an object".to_owned())
        })?;
        self.prepare_access_token_response(&mut body);

        AccessToken::from_response(body)
    }

    /// Fetch the raw profile for `token`
    ///
    /// # Errors
    ///
    /// Returns `IdentityProvider` when the provider rejects the request,
    /// `Transport` on network failure and `UnexpectedResponse` for a non-object body
    async fn fetch_resource_owner_details(
        &self,
        token: &AccessToken,
    ) -> OAuth2Result<Map<String, Value>> {
        let mut request = HttpRequest::get(self.resource_owner_details_url(token));
        for (name, value) in self.authorization_headers(token.token()) {
            request = request.with_header(name, value);
        }

        let response = self.http_client().send(request).await?;
        let parsed = parse_response(&response);
        if let Err(err) = self.check_response(response.status, &parsed) {
            warn!(status = err.status(), "Resource owner request rejected: {}", err.message());
            return Err(err.into());
        }

        parsed.into_object().ok_or_else(|| {
            OAuth2Error::UnexpectedResponse("resource owner endpoint did not return an object".to_owned())
        })
    }

    /// Fetch and wrap the profile for `token`
    ///
    /// # Errors
    ///
    /// Same as [`OAuth2Provider::fetch_resource_owner_details`]
    async fn get_resource_owner(&self, token: &AccessToken) -> OAuth2Result<Self::ResourceOwner> {
        let details = self.fetch_resource_owner_details(token).await?;
        Ok(self.create_resource_owner(details, token))
    }
}

fn lookup_path<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.get(segment)?;
    }
    Some(current).filter(|value| !value.is_null())
}
