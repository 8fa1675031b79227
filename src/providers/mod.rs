// ABOUTME: Identity provider implementations built on the generic OAuth 2.0 client
// ABOUTME: Currently Strava: provider hooks plus the typed athlete resource owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Strava provider
pub mod strava;
/// Strava athlete profile
pub mod strava_resource_owner;

pub use strava::StravaProvider;
pub use strava_resource_owner::StravaResourceOwner;
