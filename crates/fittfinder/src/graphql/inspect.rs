//! Response classification: payload extraction and error-code matching.

use serde_json::Value;

use crate::error::ResponseError;

use super::types::{GraphQlRequest, GraphQlResponse};

/// Message used when a response has neither errors nor data.
const NO_DATA_MESSAGE: &str = "No data returned for API request";

/// Describes the operation a response belongs to, for error messages.
#[derive(Clone, Copy)]
pub enum Operation<'a> {
    /// A ready-made description.
    Name(&'a str),
    /// A description computed only when an error is reported.
    Lazy(&'a dyn Fn() -> Option<String>),
    /// The request that produced the response; see [`describe_request`].
    Request(&'a GraphQlRequest),
}

impl Operation<'_> {
    fn describe(&self) -> Option<String> {
        let description = match self {
            Operation::Name(name) => Some(name.to_string()),
            Operation::Lazy(describe) => describe(),
            Operation::Request(request) => Some(describe_request(request)),
        };
        description.filter(|d| !d.is_empty())
    }
}

impl<'a> From<&'a str> for Operation<'a> {
    fn from(name: &'a str) -> Self {
        Operation::Name(name)
    }
}

impl<'a> From<&'a String> for Operation<'a> {
    fn from(name: &'a String) -> Self {
        Operation::Name(name)
    }
}

impl<'a> From<&'a GraphQlRequest> for Operation<'a> {
    fn from(request: &'a GraphQlRequest) -> Self {
        Operation::Request(request)
    }
}

impl std::fmt::Debug for Operation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Operation::Lazy(_) => f.debug_tuple("Lazy").finish_non_exhaustive(),
            Operation::Request(request) => f.debug_tuple("Request").field(request).finish(),
        }
    }
}

/// One exception code, or a set of candidates.
#[derive(Debug, Clone, Copy)]
pub enum ExceptionCodes<'a> {
    One(&'a str),
    Any(&'a [&'a str]),
}

impl ExceptionCodes<'_> {
    fn matches(&self, code: &str) -> bool {
        match self {
            ExceptionCodes::One(expected) => *expected == code,
            ExceptionCodes::Any(expected) => expected.contains(&code),
        }
    }
}

impl<'a> From<&'a str> for ExceptionCodes<'a> {
    fn from(code: &'a str) -> Self {
        ExceptionCodes::One(code)
    }
}

impl<'a> From<&'a [&'a str]> for ExceptionCodes<'a> {
    fn from(codes: &'a [&'a str]) -> Self {
        ExceptionCodes::Any(codes)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for ExceptionCodes<'a> {
    fn from(codes: &'a [&'a str; N]) -> Self {
        ExceptionCodes::Any(codes)
    }
}

/// Return the payload of a response, or fail with its first error.
///
/// Fails when `errors` is non-empty (with the first error's message) or when
/// `data` is absent (with a fixed "no data" message). The message is
/// suffixed with ` for <operation>` when an operation description is
/// available and with ` in request <id>` when the response extensions carry
/// a `requestId`.
pub fn get_response_data<'r>(
    response: &'r GraphQlResponse,
    operation: Option<Operation<'_>>,
) -> Result<&'r Value, ResponseError> {
    let fail = |message: &str| ResponseError {
        message: message.to_string(),
        operation: operation.and_then(|op| op.describe()),
        request_id: request_id(response),
    };

    if let Some(first) = response.errors.as_deref().and_then(<[_]>::first) {
        return Err(fail(&first.message));
    }
    match &response.data {
        None | Some(Value::Null) => Err(fail(NO_DATA_MESSAGE)),
        Some(data) => Ok(data),
    }
}

/// Describe a request for error messages.
///
/// Named requests render as `Name({"var":"value"})` (variables as compact
/// JSON, omitted if the request has none); anonymous ones as their query text.
pub fn describe_request(request: &GraphQlRequest) -> String {
    match request.operation_name().filter(|name| !name.is_empty()) {
        Some(name) => match request.variables() {
            Some(variables) => format!(
                "{}({})",
                name,
                serde_json::to_string(variables).unwrap_or_default()
            ),
            None => name.to_string(),
        },
        None => request.query().to_string(),
    }
}

/// Whether any error in the response carries one of the given exception codes
/// in `extensions.exception.code`.
pub fn has_exception_code<'a>(
    response: &GraphQlResponse,
    code: impl Into<ExceptionCodes<'a>>,
) -> bool {
    let code = code.into();
    response
        .errors
        .iter()
        .flatten()
        .filter_map(|error| error.exception_code())
        .any(|actual| code.matches(actual))
}

/// Whether the response reports a unique-key violation.
pub fn is_duplicate_error(response: &GraphQlResponse) -> bool {
    has_exception_code(response, &["DUPLICATE_KEY", "ER_DUP_ENTRY"])
}

/// Whether the response reports a missing entity.
pub fn is_not_found_error(response: &GraphQlResponse) -> bool {
    has_exception_code(response, "NOT_FOUND")
}

/// The `extensions.requestId` of a response, if it is set to a truthy value.
fn request_id(response: &GraphQlResponse) -> Option<String> {
    match response.extensions.as_ref()?.get("requestId")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(id) if id.is_empty() => None,
        Value::String(id) => Some(id.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
