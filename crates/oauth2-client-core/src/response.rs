// ABOUTME: Token and resource endpoint response parsing keyed on Content-Type
// ABOUTME: Decodes JSON and form-encoded bodies, keeping undecodable bodies as raw text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::http::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Decoded response body
///
/// Parsing never fails: a body that is not a JSON object (or a form-encoded
/// payload) is kept as [`ParsedBody::Raw`] so error checks can still report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedBody {
    /// Key/value object decoded from JSON or form encoding
    Object(Map<String, Value>),
    /// Body text that could not be decoded into an object
    Raw(String),
}

impl ParsedBody {
    /// Borrow the decoded object
    #[must_use]
    pub const fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Raw(_) => None,
        }
    }

    /// Take the decoded object
    #[must_use]
    pub fn into_object(self) -> Option<Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Raw(_) => None,
        }
    }

    /// Whether the decoded object carries a non-null `key`
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.as_object()
            .and_then(|map| map.get(key))
            .is_some_and(|value| !value.is_null())
    }
}

/// Parse a response body according to its content type
///
/// `*urlencoded*` bodies are decoded as form pairs (every value becomes a JSON
/// string). Everything else is tried as JSON, which also covers servers that
/// send non-standard content types such as plain `json`.
#[must_use]
pub fn parse_response(response: &HttpResponse) -> ParsedBody {
    let content_type = response
        .content_type()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.contains("urlencoded") {
        return ParsedBody::Object(parse_form_body(&response.body));
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(map)) => ParsedBody::Object(map),
        _ => ParsedBody::Raw(response.body.clone()),
    }
}

/// Decode an `application/x-www-form-urlencoded` body into an object
#[must_use]
pub fn parse_form_body(body: &str) -> Map<String, Value> {
    form_urlencoded::parse(body.trim().as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}
