// ABOUTME: Scripted HttpClient that replays queued responses and records requests
// ABOUTME: Lets provider tests run full token and profile flows without a network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{OAuth2Error, OAuth2Result};
use crate::http::{HttpClient, HttpRequest, HttpResponse, FORM_CONTENT_TYPE};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Transport returning pre-arranged responses in order
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    /// Queue `responses` to be returned one per request
    #[must_use]
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = HttpResponse>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests sent so far
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of queued responses not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Response with a JSON content type
    #[must_use]
    pub fn json(status: u16, body: impl Into<String>) -> HttpResponse {
        HttpResponse::new(status, body).with_header("content-type", "application/json")
    }

    /// Response with a form-encoded content type
    #[must_use]
    pub fn form(status: u16, body: impl Into<String>) -> HttpResponse {
        HttpResponse::new(status, body).with_header("content-type", FORM_CONTENT_TYPE)
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(&self, request: HttpRequest) -> OAuth2Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| OAuth2Error::UnexpectedResponse("no scripted response left".to_owned()))
    }
}
