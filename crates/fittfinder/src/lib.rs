//! fittfinder - FITT Finder GraphQL API client
//!
//! This library wraps the FITT Finder GraphQL API behind an authenticated
//! client. [`FittFinderApi`] logs in with credentials, caches the issued
//! session token until it expires, and retries once with a fresh login when
//! the API rejects a token. The [`graphql`] module builds request documents
//! and inspects responses.
//!
//! # Example
//!
//! ```no_run
//! use fittfinder::graphql::{Variables, build_query};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), fittfinder::Error> {
//! let api = fittfinder::create_fittfinder_api()?;
//!
//! let mut variables = Variables::new();
//! variables.insert("query".into(), json!("yoga"));
//! let request = build_query(
//!     "eventInstances",
//!     &[("query", "String")],
//!     variables,
//!     "nodes { id startDate event { name } }",
//!     None,
//! );
//!
//! let response = api.api_request(&request).await?;
//! for node in response.data["eventInstances"]["nodes"].as_array().into_iter().flatten() {
//!     println!("{}: {}", node["id"], node["event"]["name"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod types;

mod http;

// Re-export primary types at crate root for convenience
pub use api::{FittFinderApi, create_fittfinder_api};
pub use auth::{Credentials, SessionToken, TokenClaims};
pub use config::ApiConfig;
pub use error::Error;
pub use graphql::{GraphQlDataResponse, GraphQlRequest, GraphQlResponse};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
