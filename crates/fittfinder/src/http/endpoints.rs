//! Endpoint paths and their request/response bodies.

use serde::{Deserialize, Serialize};

/// Credential login, relative to the API base URL.
pub const LOGIN: &str = "login";

/// GraphQL endpoint, relative to the API base URL.
pub const GRAPHQL: &str = "graphql";

/// Request body for login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub login_id: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Issued alongside the token but never used: sessions are renewed by
    /// logging in again.
    #[serde(default)]
    #[allow(dead_code)]
    pub refresh_token: Option<String>,
}
