//! API base URL type.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{ConfigError, Error};

/// A validated API base URL.
///
/// Endpoint paths are joined onto the base the way a prefix URL is: the
/// base keeps any path it already has, and exactly one `/` separates it
/// from the endpoint.
///
/// # Example
///
/// ```
/// use fittfinder::ApiUrl;
///
/// let api = ApiUrl::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(api.endpoint("graphql"), "https://api.example.com/v1/graphql");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute HTTP(S) with a host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| invalid(s, e.to_string()))?;

        if url.cannot_be_a_base() {
            return Err(invalid(s, "must be an absolute URL").into());
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(s, "must use http or https").into());
        }
        if url.host_str().is_none() {
            return Err(invalid(s, "must have a host").into());
        }

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path such as `"login"`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: reason.into(),
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
