// ABOUTME: Unit tests for Strava configuration loading from environment variables
// ABOUTME: Validates required variables, defaults, scope parsing and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use oauth2_strava::config::{parse_scopes, HttpClientSettings};
use oauth2_strava::{ConfigError, StravaConfig, StravaProvider};
use serial_test::serial;
use std::env;

const STRAVA_VARS: &[&str] = &[
    "STRAVA_CLIENT_ID",
    "STRAVA_CLIENT_SECRET",
    "STRAVA_REDIRECT_URI",
    "STRAVA_API_VERSION",
    "STRAVA_SCOPES",
];

fn clear_strava_env() {
    for name in STRAVA_VARS {
        env::remove_var(name);
    }
}

fn set_required_env() {
    env::set_var("STRAVA_CLIENT_ID", "12345");
    env::set_var("STRAVA_CLIENT_SECRET", "super-secret");
    env::set_var("STRAVA_REDIRECT_URI", "http://localhost:8080/callback");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_strava_env();
    set_required_env();

    let config = StravaConfig::from_env().unwrap();

    assert_eq!(config.client_id, "12345");
    assert_eq!(config.client_secret, "super-secret");
    assert_eq!(config.redirect_uri, "http://localhost:8080/callback");
    assert_eq!(config.api_version, "v3");
    assert!(config.scopes.is_empty());

    clear_strava_env();
}

#[test]
#[serial]
fn test_from_env_with_overrides() {
    clear_strava_env();
    set_required_env();
    env::set_var("STRAVA_API_VERSION", " v4 ");
    env::set_var("STRAVA_SCOPES", "read,activity:read_all profile:read_all");

    let provider = StravaProvider::from_env().unwrap();

    assert_eq!(provider.api_version(), "v4");
    assert_eq!(
        oauth2_strava::OAuth2Provider::default_scopes(&provider),
        vec!["read", "activity:read_all", "profile:read_all"]
    );

    clear_strava_env();
}

#[test]
#[serial]
fn test_missing_variable_is_named() {
    clear_strava_env();
    set_required_env();
    env::remove_var("STRAVA_CLIENT_SECRET");

    let err = StravaConfig::from_env().unwrap_err();

    assert_eq!(err, ConfigError::MissingEnvVar("STRAVA_CLIENT_SECRET"));
    assert!(err.to_string().contains("STRAVA_CLIENT_SECRET"));

    clear_strava_env();
}

#[test]
#[serial]
fn test_blank_variable_fails_validation() {
    clear_strava_env();
    set_required_env();
    env::set_var("STRAVA_CLIENT_ID", "   ");

    assert_eq!(
        StravaConfig::from_env().unwrap_err(),
        ConfigError::EmptyField("client_id")
    );

    clear_strava_env();
}

#[test]
#[serial]
fn test_http_client_settings_from_env() {
    env::set_var("HTTP_CLIENT_TIMEOUT_SECS", "5");
    env::set_var("HTTP_CLIENT_CONNECT_TIMEOUT_SECS", "not-a-number");

    let settings = HttpClientSettings::from_env();

    assert_eq!(settings.timeout_secs, 5);
    assert_eq!(
        settings.connect_timeout_secs,
        HttpClientSettings::default().connect_timeout_secs
    );

    env::remove_var("HTTP_CLIENT_TIMEOUT_SECS");
    env::remove_var("HTTP_CLIENT_CONNECT_TIMEOUT_SECS");
}

#[test]
fn test_parse_scopes() {
    assert_eq!(parse_scopes("read"), vec!["read"]);
    assert_eq!(
        parse_scopes(" read, activity:write ,,profile:read_all "),
        vec!["read", "activity:write", "profile:read_all"]
    );
    assert!(parse_scopes("").is_empty());
}

#[test]
fn test_secret_never_serialized() {
    let config = StravaConfig::new("id", "shh", "none");
    let rendered = serde_json::to_string(&config).unwrap();

    assert!(!rendered.contains("shh"));
    assert!(rendered.contains("\"api_version\":\"v3\""));
}

#[test]
fn test_secret_fingerprint_is_stable_and_short() {
    let config = StravaConfig::new("id", "abc", "none");

    // sha256("abc") starts with ba7816bf
    assert_eq!(config.secret_fingerprint(), "ba7816bf");
}

#[test]
fn test_credentials_mirror_config() {
    let credentials = StravaConfig::new("id", "secret", "https://app/cb").credentials();

    assert_eq!(credentials.client_id, "id");
    assert_eq!(credentials.client_secret, "secret");
    assert_eq!(credentials.redirect_uri, "https://app/cb");
}
