// ABOUTME: Configuration errors plus re-exports of the OAuth client error types
// ABOUTME: ConfigError covers missing, empty and malformed Strava settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

pub use oauth2_client_core::{IdentityProviderError, OAuth2Error, OAuth2Result};

/// Invalid or incomplete provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("environment variable {0} is not set")]
    MissingEnvVar(&'static str),

    /// A required setting is empty
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A setting has an unusable value
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Setting name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
