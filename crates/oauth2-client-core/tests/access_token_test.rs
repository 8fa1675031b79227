// ABOUTME: Integration tests for AccessToken construction from token endpoint responses
// ABOUTME: Covers expiry normalization, reserved keys, extra values and invalid payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use oauth2_client_core::{AccessToken, OAuth2Error};
use serde_json::{json, Map, Value};

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_json_token_without_expiry() {
    let token = AccessToken::from_response(map(json!({
        "access_token": "mock_access_token",
        "scope": "repo,gist",
        "token_type": "bearer"
    })))
    .unwrap();

    assert_eq!(token.token(), "mock_access_token");
    assert_eq!(token.token_type(), Some("bearer"));
    assert_eq!(token.expires(), None);
    assert_eq!(token.refresh_token(), None);
    assert_eq!(token.resource_owner_id(), None);
    assert!(!token.has_expired());
    assert_eq!(token.values().get("scope"), Some(&json!("repo,gist")));
    assert!(!token.values().contains_key("token_type"));
}

#[test]
fn test_expires_in_is_relative_to_now() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let token = AccessToken::from_response_at(
        map(json!({"access_token": "t", "expires_in": 21600})),
        now,
    )
    .unwrap();

    assert_eq!(token.expires(), Some(now.timestamp() + 21600));
    assert_eq!(token.expires_at().unwrap(), now + chrono::Duration::hours(6));
}

#[test]
fn test_small_expires_string_is_a_lifetime() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let token = AccessToken::from_response_at(
        map(json!({
            "access_token": "mock_access_token",
            "expires": "3600",
            "refresh_token": "mock_refresh_token",
            "otherKey": "{1234}"
        })),
        now,
    )
    .unwrap();

    assert_eq!(token.expires(), Some(now.timestamp() + 3600));
    assert_eq!(token.refresh_token(), Some("mock_refresh_token"));
    assert_eq!(token.values().get("otherKey"), Some(&json!("{1234}")));
    assert!(!token.values().contains_key("expires"));
}

#[test]
fn test_expires_at_timestamp_is_kept() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let token = AccessToken::from_response_at(
        map(json!({"access_token": "t", "expires_at": 1_714_586_400})),
        now,
    )
    .unwrap();

    assert_eq!(token.expires(), Some(1_714_586_400));
}

#[test]
fn test_past_timestamp_has_expired() {
    let token =
        AccessToken::from_response(map(json!({"access_token": "t", "expires": 1_400_000_000})))
            .unwrap();

    assert_eq!(token.expires(), Some(1_400_000_000));
    assert!(token.has_expired());
}

#[test]
fn test_numeric_resource_owner_id_becomes_string() {
    let token =
        AccessToken::from_response(map(json!({"access_token": "t", "resource_owner_id": 227615})))
            .unwrap();

    assert_eq!(token.resource_owner_id(), Some("227615"));
}

#[test]
fn test_missing_access_token_is_rejected() {
    let err = AccessToken::from_response(map(json!({"token_type": "bearer"}))).unwrap_err();
    assert!(matches!(err, OAuth2Error::InvalidToken(_)));

    let err = AccessToken::from_response(map(json!({"access_token": ""}))).unwrap_err();
    assert!(matches!(err, OAuth2Error::InvalidToken(_)));
}

#[test]
fn test_non_numeric_expiry_is_rejected() {
    let err = AccessToken::from_response(map(json!({"access_token": "t", "expires_in": "soon"})))
        .unwrap_err();
    assert!(err.to_string().contains("expires_in"));
}

#[test]
fn test_huge_lifetime_is_rejected_instead_of_overflowing() {
    for expires_in in [json!(i64::MAX), json!("9223372036854775000")] {
        let err =
            AccessToken::from_response(map(json!({"access_token": "a", "expires_in": expires_in})))
                .unwrap_err();
        assert!(matches!(err, OAuth2Error::InvalidToken(ref msg) if msg.contains("expires_in")));
    }
}

#[test]
fn test_huge_absolute_expiry_is_kept_as_timestamp() {
    let token =
        AccessToken::from_response(map(json!({"access_token": "a", "expires": i64::MAX}))).unwrap();

    assert_eq!(token.expires(), Some(i64::MAX));
    assert!(!token.has_expired());
}

#[test]
fn test_serializes_with_values_flattened() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let token = AccessToken::from_response_at(
        map(json!({"access_token": "t", "expires_in": 60, "athlete": {"id": 1}})),
        now,
    )
    .unwrap();

    let json = serde_json::to_value(&token).unwrap();
    assert_eq!(json["access_token"], "t");
    assert_eq!(json["expires"], now.timestamp() + 60);
    assert_eq!(json["athlete"]["id"], 1);

    let back: AccessToken = serde_json::from_value(json).unwrap();
    assert_eq!(back, token);
}
