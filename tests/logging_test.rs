// ABOUTME: Unit tests for logging functionality
// ABOUTME: Validates logging configuration from environment variables and filter setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use oauth2_strava::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const LOGGING_VARS: &[&str] = &[
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "SERVICE_VERSION",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
];

fn clear_logging_env() {
    for name in LOGGING_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_logging_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "test-service");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "test-service");
    assert!(config.include_location); // Should be true for production
    assert!(config.include_thread);

    clear_logging_env();
}

#[test]
#[serial]
fn test_logging_config_from_empty_env() {
    clear_logging_env();

    let config = LoggingConfig::from_env();

    assert_eq!(config, LoggingConfig::default());
}

#[test]
#[serial]
fn test_location_flag_outside_production() {
    clear_logging_env();
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();

    assert!(config.include_location);
    assert!(!config.include_thread);

    clear_logging_env();
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.service_name, "strava-oauth");
    assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
    assert_eq!(LogFormat::from_name("COMPACT"), LogFormat::Compact);
    assert_eq!(LogFormat::from_name("pretty"), LogFormat::Pretty);
    assert_eq!(LogFormat::from_name("xml"), LogFormat::Pretty);
}

#[test]
fn test_env_filter_keeps_level_and_quiets_http_stack() {
    let config = LoggingConfig {
        level: "oauth2_strava=trace".into(),
        ..LoggingConfig::default()
    };

    let rendered = config.env_filter().to_string();

    assert!(rendered.contains("oauth2_strava=trace"));
    assert!(rendered.contains("reqwest=warn"));
    assert!(rendered.contains("hyper=warn"));
}

#[test]
#[serial]
fn test_init_twice_reports_error() {
    clear_logging_env();
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };

    // Only one global subscriber per process
    let _ = config.init();
    assert!(config.init().is_err());
}
