//! JSON-over-HTTP client bound to the API base URL.

use reqwest::header::AUTHORIZATION;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::error::{ConfigError, Error, HttpError};
use crate::types::ApiUrl;

/// HTTP client for API requests.
///
/// Every request is a JSON `POST` to a path under the base URL. Non-success
/// statuses surface as [`Error::Http`] carrying the status and the parsed
/// body.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl HttpClient {
    /// Create a new client for the given base URL.
    pub fn new(base: ApiUrl, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ConfigError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client, base })
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// POST a JSON body, optionally with an `Authorization` header value.
    #[instrument(skip(self, body, authorization), fields(base = %self.base, authenticated = authorization.is_some()))]
    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        authorization: Option<&str>,
    ) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(%url, "POST");

        let mut request = self.client.post(&url).json(body);
        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await?;
            Ok(body)
        } else {
            Err(Error::Http(self.parse_error_response(response).await))
        }
    }

    /// Parse a non-success response; the body is kept only if it is JSON.
    async fn parse_error_response(&self, response: reqwest::Response) -> HttpError {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok());
        HttpError::new(status, body)
    }
}
