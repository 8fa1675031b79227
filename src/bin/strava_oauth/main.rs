// ABOUTME: strava-oauth CLI for walking through the Strava Authorization Code flow by hand
// ABOUTME: Builds authorization URLs, exchanges and refreshes tokens, fetches the athlete profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Credentials come from `STRAVA_CLIENT_ID`, `STRAVA_CLIENT_SECRET` and
//! `STRAVA_REDIRECT_URI`. Results are printed to stdout as JSON; logs go to
//! stderr.
//!
//! Usage:
//! ```bash
//! # Print an authorization URL with a fresh state (and PKCE challenge)
//! strava-oauth authorize-url --scope read,activity:read --pkce
//!
//! # Exchange the code from the callback
//! strava-oauth exchange --code abc123 --code-verifier <verifier>
//!
//! # Refresh an expired token
//! strava-oauth refresh --refresh-token def456
//!
//! # Show the authenticated athlete
//! strava-oauth athlete --access-token ghi789
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oauth2_strava::constants::strava;
use oauth2_strava::logging::{log_oauth_event, LoggingConfig};
use oauth2_strava::{
    initialize_shared_client, AccessToken, AuthorizationOptions, HttpClientSettings, OAuth2Provider,
    PkceParams, StravaProvider,
};
use serde_json::json;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "strava-oauth",
    about = "Strava OAuth 2.0 helper",
    long_about = "Walk through the Strava Authorization Code flow: build the authorization URL, exchange the callback code, refresh tokens and fetch the athlete profile."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the URL to send the user to
    AuthorizeUrl {
        /// Scopes to request (comma separated or repeated)
        #[arg(long, value_delimiter = ',')]
        scope: Vec<String>,

        /// State value; random when omitted
        #[arg(long)]
        state: Option<String>,

        /// Approval prompt ("auto" or "force")
        #[arg(long)]
        approval_prompt: Option<String>,

        /// Attach a PKCE S256 challenge and print its verifier
        #[arg(long)]
        pkce: bool,
    },
    /// Exchange an authorization code for a token
    Exchange {
        /// Code from the callback query string
        #[arg(long)]
        code: String,

        /// PKCE verifier printed by authorize-url --pkce
        #[arg(long)]
        code_verifier: Option<String>,
    },
    /// Exchange a refresh token for a new token
    Refresh {
        /// Refresh token from a previous exchange
        #[arg(long)]
        refresh_token: String,
    },
    /// Fetch the authenticated athlete
    Athlete {
        /// Bearer token
        #[arg(long)]
        access_token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env()
        .init()
        .context("Failed to initialize logging")?;
    if !initialize_shared_client(HttpClientSettings::from_env()) {
        debug!("HTTP client settings were already fixed");
    }

    let provider = StravaProvider::from_env().context("Failed to load Strava configuration")?;
    debug!(api_version = provider.api_version(), base = strava::BASE_URL, "Provider ready");

    match cli.command {
        Command::AuthorizeUrl {
            scope,
            state,
            approval_prompt,
            pkce,
        } => authorize_url(&provider, scope, state, approval_prompt, pkce),
        Command::Exchange {
            code,
            code_verifier,
        } => exchange(&provider, &code, code_verifier).await,
        Command::Refresh { refresh_token } => refresh(&provider, &refresh_token).await,
        Command::Athlete { access_token } => athlete(&provider, &access_token).await,
    }
}

fn authorize_url(
    provider: &StravaProvider,
    scope: Vec<String>,
    state: Option<String>,
    approval_prompt: Option<String>,
    pkce: bool,
) -> Result<()> {
    let mut options = AuthorizationOptions::default();
    if !scope.is_empty() {
        options = options.with_scopes(scope);
    }
    if let Some(state) = state {
        options = options.with_state(state);
    }
    if let Some(prompt) = approval_prompt {
        options = options.with_approval_prompt(prompt);
    }
    if pkce {
        options = options.with_pkce(PkceParams::generate());
    }

    let request = provider
        .get_authorization_url(&options)
        .context("Failed to build authorization URL")?;

    print_json(&json!({
        "url": request.url,
        "state": request.state,
        "code_verifier": request.pkce.map(|p| p.code_verifier),
    }))
}

async fn exchange(
    provider: &StravaProvider,
    code: &str,
    code_verifier: Option<String>,
) -> Result<()> {
    let result = match code_verifier {
        Some(verifier) => {
            provider
                .exchange_code_with_pkce(code, &PkceParams::from_verifier(verifier))
                .await
        }
        None => provider.exchange_code(code).await,
    };
    log_oauth_event("strava", "exchange", result.is_ok());

    let token = result.context("Authorization code exchange failed")?;
    print_json(&token_json(&token))
}

async fn refresh(provider: &StravaProvider, refresh_token: &str) -> Result<()> {
    let result = provider.refresh_token(refresh_token).await;
    log_oauth_event("strava", "refresh", result.is_ok());

    let token = result.context("Token refresh failed")?;
    print_json(&token_json(&token))
}

async fn athlete(provider: &StravaProvider, access_token: &str) -> Result<()> {
    let token = AccessToken::new(access_token);
    let result = provider.get_resource_owner(&token).await;
    log_oauth_event("strava", "athlete", result.is_ok());

    let athlete = result.context("Failed to fetch athlete profile")?;
    print_json(&json!({
        "id": athlete.id(),
        "first_name": athlete.first_name(),
        "last_name": athlete.last_name(),
        "email": athlete.email(),
        "premium": athlete.premium(),
        "profile": athlete.to_array(),
    }))
}

fn token_json(token: &AccessToken) -> serde_json::Value {
    json!({
        "access_token": token.token(),
        "token_type": token.token_type(),
        "refresh_token": token.refresh_token(),
        "expires": token.expires(),
        "expires_at": token.expires_at().map(|at| at.to_rfc3339()),
        "resource_owner_id": token.resource_owner_id(),
        "values": token.values(),
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}
