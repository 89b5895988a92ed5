//! Cached session token.

use std::fmt;

use chrono::Utc;

/// A bearer token obtained by logging in, together with its expiry.
///
/// A token is valid only while the current time is strictly before its
/// expiry (seconds since the Unix epoch).
///
/// # Security
///
/// The token value is never shown in Debug output.
#[derive(Clone)]
pub struct SessionToken {
    value: String,
    expires_at: i64,
}

impl SessionToken {
    /// Create a token from its raw value and expiry in epoch seconds.
    pub fn new(value: impl Into<String>, expires_at: i64) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Expiry in seconds since the Unix epoch.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Whether the token is still usable at `now` (epoch seconds).
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.expires_at > now
    }

    /// Whether the token is still usable right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp())
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

// Hide token value in Debug output
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
