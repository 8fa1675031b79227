// ABOUTME: Strava athlete profile wrapper with typed accessors over the raw JSON map
// ABOUTME: Explicit presence rules for id, names, email and the premium flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authenticated Strava athlete
///
/// Keeps the decoded profile exactly as received; every getter is a
/// projection of that map. Presence rules:
///
/// - `id`: absent or `null` is `None`. Integers (including `0`) and strings
///   holding an integer are `Some`.
/// - text fields: absent, `null`, non-string or empty string is `None`.
/// - `premium`: `true` only for JSON `true`, a non-zero integer, or the
///   strings `"true"`/`"1"`; anything else, including absent, is `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StravaResourceOwner {
    response: Map<String, Value>,
}

impl StravaResourceOwner {
    /// Wrap a decoded profile
    #[must_use]
    pub const fn new(response: Map<String, Value>) -> Self {
        Self { response }
    }

    /// Athlete id
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        match self.response.get("id")? {
            Value::Number(id) => id.as_i64(),
            Value::String(id) => id.trim().parse().ok(),
            _ => None,
        }
    }

    /// First name
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.text("firstname")
    }

    /// Last name
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.text("lastname")
    }

    /// Email address; only present for apps granted access to it
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    /// Public username
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.text("username")
    }

    /// Home city
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.text("city")
    }

    /// Home country
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.text("country")
    }

    /// Large profile picture URL
    #[must_use]
    pub fn profile_picture_url(&self) -> Option<&str> {
        self.text("profile")
    }

    /// Paid subscription flag
    ///
    /// Reads `premium`, falling back to `summit` when `premium` is absent.
    #[must_use]
    pub fn premium(&self) -> bool {
        self.response
            .get("premium")
            .or_else(|| self.response.get("summit"))
            .is_some_and(is_truthy_flag)
    }

    /// The profile exactly as received
    #[must_use]
    pub const fn to_array(&self) -> &Map<String, Value> {
        &self.response
    }

    /// Take the backing map
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.response
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.response
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl From<Map<String, Value>> for StravaResourceOwner {
    fn from(response: Map<String, Value>) -> Self {
        Self::new(response)
    }
}

fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}
