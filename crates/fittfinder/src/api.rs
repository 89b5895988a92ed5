//! Authenticated client for the FITT Finder GraphQL API.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::auth::{Credentials, SessionToken, TokenClaims};
use crate::config::ApiConfig;
use crate::error::{ApiError, Error, TransportError};
use crate::graphql::{GraphQlDataResponse, GraphQlRequest, GraphQlResponse, get_response_data};
use crate::http::{GRAPHQL, HttpClient, LOGIN, LoginRequest, LoginResponse};
use crate::types::ApiUrl;

/// Client for the FITT Finder GraphQL API.
///
/// The client logs in lazily with its credentials, caches the issued token
/// until it expires, and sends it as a bearer token with every GraphQL
/// request. When the API rejects a request with HTTP 401 the cached token is
/// discarded and the request is retried once with a fresh login.
///
/// Clones share the same token cache. Concurrent requests that find no valid
/// token may each log in; the last token stored wins.
///
/// # Example
///
/// ```no_run
/// use fittfinder::FittFinderApi;
/// use fittfinder::graphql::GraphQlRequest;
///
/// # async fn example() -> Result<(), fittfinder::Error> {
/// let api = FittFinderApi::new(
///     "https://api.example.com",
///     "alice@example.com",
///     "password",
///     "my-app/1.0",
/// )?;
/// let response = api
///     .api_request(&GraphQlRequest::new("query { self { id name } }"))
///     .await?;
/// println!("{}", response.data["self"]["name"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FittFinderApi {
    inner: Arc<ApiInner>,
}

struct ApiInner {
    http: HttpClient,
    credentials: Credentials,
    token: RwLock<Option<SessionToken>>,
}

impl FittFinderApi {
    /// Create a client for the API at `url`.
    ///
    /// No network request is made until the first API call. If either the
    /// username or the password is empty the client never logs in and sends
    /// its requests unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(
        url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self> {
        let url = ApiUrl::new(url)?;
        Self::with_credentials(url, Credentials::new(username, password), user_agent)
    }

    /// Create a client from an already validated URL and credentials.
    pub fn with_credentials(
        url: ApiUrl,
        credentials: Credentials,
        user_agent: &str,
    ) -> Result<Self> {
        let http = HttpClient::new(url, user_agent)?;
        Ok(Self {
            inner: Arc::new(ApiInner {
                http,
                credentials,
                token: RwLock::new(None),
            }),
        })
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            &config.url,
            config.username.as_str(),
            config.password.as_str(),
            &config.user_agent,
        )
    }

    /// Create a client from the `FITTFINDER_API_*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails before constructing anything if the URL, username or password
    /// is not configured.
    pub fn from_env() -> Result<Self> {
        let config = ApiConfig::from_env()?;
        Self::from_config(&config)
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &ApiUrl {
        self.inner.http.base()
    }

    /// Returns the credentials this client logs in with.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Whether an unexpired session token is currently cached.
    pub async fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .await
            .as_ref()
            .is_some_and(SessionToken::is_valid)
    }

    /// Discard the cached session token; the next request logs in again.
    pub async fn invalidate_token(&self) {
        *self.inner.token.write().await = None;
    }

    /// Send a GraphQL request and return the response once it has been
    /// checked for GraphQL errors.
    ///
    /// # Errors
    ///
    /// Everything [`api_request_checked`](Self::api_request_checked) can
    /// fail with, plus [`Error::Response`] if the response carries errors or
    /// no data.
    #[instrument(skip_all, fields(operation = request.operation_name().unwrap_or("anonymous")))]
    pub async fn api_request(&self, request: &GraphQlRequest) -> Result<GraphQlDataResponse> {
        let response = self.api_request_checked(request).await?;

        if let Err(err) = get_response_data(&response, Some(request.into())) {
            warn!(error = %err, ?request, ?response, "API request failed");
            return Err(err.into());
        }

        let GraphQlResponse {
            data,
            errors,
            extensions,
        } = response;
        Ok(GraphQlDataResponse {
            data: data.unwrap_or_default(),
            errors,
            extensions,
        })
    }

    /// Send a GraphQL request and deserialize its `data` into `T`.
    pub async fn request_data<T: DeserializeOwned>(&self, request: &GraphQlRequest) -> Result<T> {
        let response = self.api_request(request).await?;
        serde_json::from_value(response.data).map_err(|e| {
            TransportError::Decode {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Send a GraphQL request and return the raw response body.
    ///
    /// The response is not checked for GraphQL errors. A 401 from the
    /// GraphQL endpoint discards the cached token and retries once after
    /// logging in again. Login failures are returned as they are.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] if the API answered with a non-success status and a
    ///   body carrying GraphQL error messages.
    /// - [`Error::Http`] for any other non-success status, including a
    ///   second 401.
    /// - Login, token and transport errors unchanged.
    #[instrument(skip_all, fields(operation = request.operation_name().unwrap_or("anonymous")))]
    pub async fn api_request_checked(&self, request: &GraphQlRequest) -> Result<GraphQlResponse> {
        let mut auth_retry = false;
        loop {
            let authorization = self.auth_header().await?;
            let result = self
                .inner
                .http
                .post::<_, GraphQlResponse>(GRAPHQL, request, authorization.as_deref())
                .await;

            match result {
                Ok(response) => return Ok(response),
                Err(Error::Http(err)) if err.is_auth_error() && !auth_retry => {
                    info!("Authentication rejected, discarding cached token");
                    self.invalidate_token().await;
                    auth_retry = true;
                }
                Err(Error::Http(err)) => {
                    return Err(match err.graphql_messages() {
                        Some(messages) => ApiError {
                            status: err.status,
                            messages,
                        }
                        .into(),
                        None => err.into(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Authorization header value for the next request.
    ///
    /// Logs in first when no unexpired token is cached and the credentials
    /// are complete. Returns `None` when there is no token to send.
    async fn auth_header(&self) -> Result<Option<String>> {
        let has_valid_token = self
            .inner
            .token
            .read()
            .await
            .as_ref()
            .is_some_and(SessionToken::is_valid);

        if !has_valid_token && self.inner.credentials.is_complete() {
            let token = self
                .login()
                .await
                .inspect_err(|err| warn!(error = %err, "Login failed"))?;
            *self.inner.token.write().await = Some(token);
        }

        Ok(self.inner.token.read().await.as_ref().map(SessionToken::bearer))
    }

    #[instrument(skip(self), fields(login_id = %self.inner.credentials.login_id()))]
    async fn login(&self) -> Result<SessionToken> {
        let request = LoginRequest {
            login_id: self.inner.credentials.login_id(),
            password: self.inner.credentials.password(),
        };

        let response: LoginResponse = self.inner.http.post(LOGIN, &request, None).await?;
        let claims = TokenClaims::decode_unverified(&response.token)?;

        debug!(
            audience = %claims.aud.as_ref().map(ToString::to_string).unwrap_or_default(),
            subject = claims.sub.as_deref().unwrap_or_default(),
            roles = %claims.roles_display(),
            expires_at = claims.exp,
            "Authenticated"
        );

        Ok(SessionToken::new(response.token, claims.exp))
    }
}

/// Create a client from the `FITTFINDER_API_*` environment variables.
///
/// See [`ApiConfig::from_env`] for the variables read.
pub fn create_fittfinder_api() -> Result<FittFinderApi> {
    FittFinderApi::from_env()
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for FittFinderApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittFinderApi")
            .field("base_url", self.base_url())
            .field("credentials", &self.inner.credentials)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
