//! Claims embedded in an issued session token.
//!
//! The payload segment of the token is decoded without verifying the
//! signature. The claims are only used to cache the expiry and to log who
//! we authenticated as; the API itself decides what the token grants.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer};

use crate::error::TokenError;

/// Token audience: a single value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::One(aud) => f.write_str(aud),
            Audience::Many(auds) => f.write_str(&auds.join(", ")),
        }
    }
}

/// Decoded session token claims.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Expiry, whole seconds since the Unix epoch.
    #[serde(deserialize_with = "epoch_seconds")]
    pub exp: i64,
    #[serde(default)]
    pub aud: Option<Audience>,
    #[serde(default, deserialize_with = "optional_epoch_seconds")]
    pub iat: Option<i64>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub authentication_type: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "email_verified")]
    pub email_verified: Option<bool>,
    #[serde(default, rename = "preferred_username")]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl TokenClaims {
    /// Decode the claims of a signed token without verifying it.
    ///
    /// # Errors
    ///
    /// Fails if the token has no payload segment, or the payload is not
    /// base64url-encoded JSON carrying an `exp` claim.
    pub fn decode_unverified(token: &str) -> Result<Self, TokenError> {
        let payload = token.split('.').nth(1).ok_or_else(|| TokenError::Malformed {
            reason: "missing payload segment".to_string(),
        })?;

        // Tolerate padded and standard-alphabet encoders.
        let payload: String = payload
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                c => c,
            })
            .collect();

        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Roles joined for display, empty if the token carries none.
    pub fn roles_display(&self) -> String {
        self.roles.as_deref().unwrap_or_default().join(", ")
    }
}

/// NumericDate claims may carry a fraction; it is floored away.
fn epoch_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let seconds = f64::deserialize(deserializer)?;
    Ok(seconds.floor() as i64)
}

fn optional_epoch_seconds<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    let seconds = Option::<f64>::deserialize(deserializer)?;
    Ok(seconds.map(|s| s.floor() as i64))
}
