//! GraphQL wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Variable values keyed by name, in insertion order.
pub type Variables = Map<String, Value>;

/// A GraphQL request document with its operation name and variables.
///
/// Requests are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variables: Option<Variables>,
}

impl GraphQlRequest {
    /// Create a request from raw query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    /// Set the operation name.
    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    /// Set the variables.
    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Document text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Operation to run when the document defines several.
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Variable values, in insertion order.
    pub fn variables(&self) -> Option<&Variables> {
        self.variables.as_ref()
    }
}

/// A GraphQL response body, not yet checked for errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQlError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

/// A GraphQL response that passed inspection: no errors, data present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlDataResponse {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQlError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

/// A single entry of a response's `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<GraphQlLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQlError {
    /// The `extensions.exception.code` of this error, if it is a string.
    pub fn exception_code(&self) -> Option<&str> {
        self.extensions
            .as_ref()?
            .get("exception")?
            .as_object()?
            .get("code")?
            .as_str()
    }
}

/// Source location of an error in the request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlLocation {
    pub line: u32,
    pub column: u32,
}

/// One step of an error path: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(u64),
}
