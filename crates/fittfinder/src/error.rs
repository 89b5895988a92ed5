//! Error types for the fittfinder client.
//!
//! A single [`Error`] covers every fallible operation. The remote error
//! vocabulary is open-ended, so callers tell failures apart by variant and
//! by the structured fields each variant carries (HTTP status, GraphQL
//! messages, request id) rather than by a closed list of error codes.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The unified error type for fittfinder operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network transport errors (connection, timeout, body decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success HTTP status.
    #[error("{0}")]
    Http(#[from] HttpError),

    /// The server rejected a request with structured GraphQL errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The session token issued at login could not be decoded.
    #[error("invalid session token: {0}")]
    Token(#[from] TokenError),

    /// A well-formed GraphQL response carried errors or no data.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl Error {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(err) => Some(err.status),
            Error::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Check if this error is an authentication rejection (HTTP 401).
    pub fn is_auth_error(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Configuration errors, surfaced before any client is constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration value is unset or empty.
    #[error("{name} not configured")]
    Missing { name: &'static str },

    /// The API base URL could not be used.
    #[error("invalid API URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// A response body could not be decoded.
    #[error("failed to decode response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout { message }
        } else if err.is_connect() {
            TransportError::Connection { message }
        } else if err.is_decode() {
            TransportError::Decode { message }
        } else {
            TransportError::Http { message }
        }
    }
}

/// A non-success HTTP response.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Response body, when it parsed as JSON.
    pub body: Option<Value>,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Check if this is an authentication rejection.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }

    /// Messages of the structured GraphQL errors carried in the body.
    ///
    /// Only `errors` entries that are objects with a string `message` are
    /// considered. Returns `None` when there are no such entries.
    pub fn graphql_messages(&self) -> Option<Vec<String>> {
        let errors = self.body.as_ref()?.get("errors")?.as_array()?;
        let messages: Vec<String> = errors
            .iter()
            .filter_map(|error| error.get("message")?.as_str())
            .map(str::to_string)
            .collect();
        (!messages.is_empty()).then_some(messages)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        let message = self
            .body
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str);
        if let Some(message) = message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Aggregate of the GraphQL errors returned with a non-success status.
#[derive(Debug, Clone, Error)]
#[error("API request failed: {}", .messages.join(", "))]
pub struct ApiError {
    /// HTTP status code of the failed response.
    pub status: u16,
    /// Error messages in server order.
    pub messages: Vec<String>,
}

/// Failure to decode the claims of an issued session token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is not a three-segment signed token.
    #[error("malformed token: {reason}")]
    Malformed { reason: String },

    /// The claims segment is not valid base64url.
    #[error("claims segment is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The claims segment is not the expected JSON object.
    #[error("claims segment is not valid JSON: {0}")]
    Claims(#[from] serde_json::Error),
}

/// A GraphQL-level failure reported by the response inspector.
///
/// `Display` renders the decorated message, for example
/// `"boom for CreateEvent({\"name\":\"x\"}) in request r-1"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    /// The first GraphQL error message, or the missing-data message.
    pub message: String,
    /// Description of the operation that failed, if one was supplied.
    pub operation: Option<String>,
    /// Server-assigned request id from the response extensions.
    pub request_id: Option<String>,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(ref operation) = self.operation {
            write!(f, " for {}", operation)?;
        }
        if let Some(ref request_id) = self.request_id {
            write!(f, " in request {}", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResponseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_config_names_the_variable() {
        let err = Error::from(ConfigError::Missing {
            name: "FITTFINDER_API_URL",
        });
        assert_eq!(
            err.to_string(),
            "configuration error: FITTFINDER_API_URL not configured"
        );
    }

    #[test]
    fn graphql_messages_skip_entries_without_string_message() {
        let err = HttpError::new(
            400,
            Some(json!({
                "errors": [
                    {"message": "first"},
                    {"message": 42},
                    "not an object",
                    {"message": "second"}
                ]
            })),
        );
        assert_eq!(
            err.graphql_messages(),
            Some(vec!["first".to_string(), "second".to_string()])
        );
    }

    #[test]
    fn graphql_messages_absent_without_errors_array() {
        assert_eq!(HttpError::new(500, None).graphql_messages(), None);
        assert_eq!(
            HttpError::new(400, Some(json!({"errors": "nope"}))).graphql_messages(),
            None
        );
        assert_eq!(
            HttpError::new(400, Some(json!({"errors": [{"code": 1}]}))).graphql_messages(),
            None
        );
    }

    #[test]
    fn api_error_joins_messages() {
        let err = ApiError {
            status: 400,
            messages: vec!["bad input".to_string(), "also bad".to_string()],
        };
        assert_eq!(err.to_string(), "API request failed: bad input, also bad");
    }

    #[test]
    fn response_error_decorates_message() {
        let err = ResponseError {
            message: "boom".to_string(),
            operation: Some("Foo".to_string()),
            request_id: Some("r-1".to_string()),
        };
        assert_eq!(err.to_string(), "boom for Foo in request r-1");
        assert_eq!(Error::from(err).to_string(), "boom for Foo in request r-1");
    }

    #[test]
    fn auth_error_detection() {
        assert!(Error::from(HttpError::new(401, None)).is_auth_error());
        assert!(!Error::from(HttpError::new(403, None)).is_auth_error());
    }
}
