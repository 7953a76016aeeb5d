// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token endpoint payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/token/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Token pair plus profile flags returned at login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub username: String,
    #[serde(default)]
    pub is_staff: bool,
}

/// Body of `POST /api/token/refresh/`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Refresh endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    /// Present only when the server rotates refresh tokens
    #[serde(default)]
    pub refresh: Option<String>,
}
