// ABOUTME: PKCE (Proof Key for Code Exchange) parameters for authorization requests
// ABOUTME: Generates an S256 code verifier/challenge pair per RFC 7636
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Verifier length; RFC 7636 allows 43-128 characters
pub const CODE_VERIFIER_LENGTH: usize = 64;

/// Unreserved characters allowed in a code verifier
const VERIFIER_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// PKCE parameters sent with the authorization request and the code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceParams {
    /// Secret kept by the client and sent with the code exchange
    pub code_verifier: String,
    /// SHA256 of the verifier, base64url encoded without padding
    pub code_challenge: String,
    /// Challenge method (always "S256")
    pub code_challenge_method: String,
}

impl PkceParams {
    /// Generate a random verifier and its S256 challenge
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code_verifier: String = (0..CODE_VERIFIER_LENGTH)
            .map(|_| VERIFIER_CHARS[rng.gen_range(0..VERIFIER_CHARS.len())] as char)
            .collect();

        Self::from_verifier(code_verifier)
    }

    /// Derive the S256 challenge for a known verifier
    #[must_use]
    pub fn from_verifier(code_verifier: impl Into<String>) -> Self {
        let code_verifier = code_verifier.into();
        let code_challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()));

        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: "S256".to_owned(),
        }
    }
}
