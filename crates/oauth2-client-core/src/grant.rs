// ABOUTME: OAuth 2.0 grant types supported by the token endpoint exchange
// ABOUTME: Each grant names its grant_type value and the parameters it cannot do without
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{OAuth2Error, OAuth2Result};
use std::fmt;
use std::str::FromStr;

/// Grant used to obtain an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grant {
    /// Exchange an authorization code (RFC 6749 §4.1)
    AuthorizationCode,
    /// Exchange a refresh token (RFC 6749 §6)
    RefreshToken,
    /// Client credentials (RFC 6749 §4.4)
    ClientCredentials,
    /// Resource owner password credentials (RFC 6749 §4.3)
    Password,
}

impl Grant {
    /// Value sent as `grant_type`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
            Self::ClientCredentials => "client_credentials",
            Self::Password => "password",
        }
    }

    /// Parameters the caller must supply for this grant
    #[must_use]
    pub const fn required_parameters(self) -> &'static [&'static str] {
        match self {
            Self::AuthorizationCode => &["code"],
            Self::RefreshToken => &["refresh_token"],
            Self::ClientCredentials => &[],
            Self::Password => &["username", "password"],
        }
    }

    /// Merge client defaults, `grant_type` and caller options into the request body
    ///
    /// Caller options override defaults with the same key.
    ///
    /// # Errors
    ///
    /// Returns `MissingGrantParameter` if a required parameter is absent or empty
    pub fn prepare_request_parameters(
        self,
        defaults: Vec<(String, String)>,
        options: &[(String, String)],
    ) -> OAuth2Result<Vec<(String, String)>> {
        for &parameter in self.required_parameters() {
            let present = options
                .iter()
                .any(|(key, value)| key == parameter && !value.is_empty());
            if !present {
                return Err(OAuth2Error::MissingGrantParameter {
                    grant: self.name(),
                    parameter,
                });
            }
        }

        let mut params = defaults;
        params.push(("grant_type".to_owned(), self.name().to_owned()));
        for (key, value) in options {
            if let Some(existing) = params.iter_mut().find(|(k, _)| k == key) {
                existing.1.clone_from(value);
            } else {
                params.push((key.clone(), value.clone()));
            }
        }

        Ok(params)
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Grant {
    type Err = OAuth2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorization_code" => Ok(Self::AuthorizationCode),
            "refresh_token" => Ok(Self::RefreshToken),
            "client_credentials" => Ok(Self::ClientCredentials),
            "password" => Ok(Self::Password),
            other => Err(OAuth2Error::UnsupportedGrant(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn test_authorization_code_requires_code() {
        let err = Grant::AuthorizationCode
            .prepare_request_parameters(vec![], &[pair("state", "x")])
            .unwrap_err();
        assert!(matches!(
            err,
            OAuth2Error::MissingGrantParameter {
                grant: "authorization_code",
                parameter: "code"
            }
        ));
    }

    #[test]
    fn test_parameters_merge_in_order() {
        let params = Grant::AuthorizationCode
            .prepare_request_parameters(
                vec![pair("client_id", "id"), pair("redirect_uri", "none")],
                &[pair("code", "abc"), pair("redirect_uri", "https://app/cb")],
            )
            .unwrap();

        assert_eq!(
            params,
            vec![
                pair("client_id", "id"),
                pair("redirect_uri", "https://app/cb"),
                pair("grant_type", "authorization_code"),
                pair("code", "abc"),
            ]
        );
    }

    #[test]
    fn test_grant_names_round_trip_through_from_str() {
        for grant in [
            Grant::AuthorizationCode,
            Grant::RefreshToken,
            Grant::ClientCredentials,
            Grant::Password,
        ] {
            assert_eq!(grant.name().parse::<Grant>().unwrap(), grant);
        }
        assert!("implicit".parse::<Grant>().is_err());
    }
}
