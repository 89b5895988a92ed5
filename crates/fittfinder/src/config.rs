//! Client configuration resolved from the environment.

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "FITTFINDER_API_URL";

/// Environment variable holding the login id.
pub const API_USERNAME_VAR: &str = "FITTFINDER_API_USERNAME";

/// Environment variable holding the password.
pub const API_PASSWORD_VAR: &str = "FITTFINDER_API_PASSWORD";

/// Optional environment variable overriding the `User-Agent` header.
pub const API_USER_AGENT_VAR: &str = "FITTFINDER_API_USER_AGENT";

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "FITT Finder API Example";

/// Settings needed to construct a [`FittFinderApi`](crate::FittFinderApi).
#[derive(Clone)]
pub struct ApiConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

impl ApiConfig {
    /// Read the configuration from the process environment.
    ///
    /// | Variable                    | Required | Description              |
    /// |-----------------------------|----------|--------------------------|
    /// | `FITTFINDER_API_URL`        | yes      | API base URL             |
    /// | `FITTFINDER_API_USERNAME`   | yes      | Login id                 |
    /// | `FITTFINDER_API_PASSWORD`   | yes      | Password                 |
    /// | `FITTFINDER_API_USER_AGENT` | no       | `User-Agent` header      |
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::Missing`] naming the first required variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing { name })
        };

        let url = required(API_URL_VAR)?;
        let username = required(API_USERNAME_VAR)?;
        let password = required(API_PASSWORD_VAR)?;
        let user_agent = lookup(API_USER_AGENT_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            url,
            username,
            password,
            user_agent,
        })
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn resolves_all_values() {
        let config = ApiConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (API_USERNAME_VAR, "alice"),
            (API_PASSWORD_VAR, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://api.example.com");
        assert_eq!(config.username, "alice");
        assert_eq!(config.password, "secret");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn user_agent_override() {
        let config = ApiConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (API_USERNAME_VAR, "alice"),
            (API_PASSWORD_VAR, "secret"),
            (API_USER_AGENT_VAR, "my-agent/1.0"),
        ]))
        .unwrap();
        assert_eq!(config.user_agent, "my-agent/1.0");
    }

    #[test]
    fn missing_url_reported_first() {
        let err = ApiConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err.to_string(), "FITTFINDER_API_URL not configured");
    }

    #[test]
    fn missing_username() {
        let err = ApiConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (API_PASSWORD_VAR, "secret"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "FITTFINDER_API_USERNAME not configured");
    }

    #[test]
    fn empty_password_counts_as_missing() {
        let err = ApiConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (API_USERNAME_VAR, "alice"),
            (API_PASSWORD_VAR, ""),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "FITTFINDER_API_PASSWORD not configured");
    }

    #[test]
    fn debug_hides_password() {
        let config = ApiConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (API_USERNAME_VAR, "alice"),
            (API_PASSWORD_VAR, "secret"),
        ]))
        .unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
