//! The login id and password a client authenticates with.

use std::fmt;

/// Login id and password posted to the login endpoint.
///
/// Set once when the client is built. `Debug` prints the login id only; the
/// password is shown as `[REDACTED]`.
///
/// # Example
///
/// ```
/// use fittfinder::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// assert_eq!(creds.login_id(), "alice@example.com");
/// assert!(creds.is_complete());
/// ```
#[derive(Clone)]
pub struct Credentials {
    login_id: String,
    password: String,
}

impl Credentials {
    /// Pair a login id with its password.
    ///
    /// Either part may be empty, in which case the client never logs in and
    /// sends its requests without an authorization header.
    pub fn new(login_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login_id: login_id.into(),
            password: password.into(),
        }
    }

    /// Login id sent as `loginId`.
    pub fn login_id(&self) -> &str {
        &self.login_id
    }

    /// Password, read only when the login body is built.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Whether both the login id and the password are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.login_id.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login_id", &self.login_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
