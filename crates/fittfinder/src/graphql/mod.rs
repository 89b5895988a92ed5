//! GraphQL request documents and response handling.
//!
//! - [`build_query`] / [`build_mutation`] assemble request documents.
//! - [`get_response_data`] and friends classify responses.

mod builder;
mod inspect;
mod types;

pub use builder::{build_mutation, build_query};
pub use inspect::{
    ExceptionCodes, Operation, describe_request, get_response_data, has_exception_code,
    is_duplicate_error, is_not_found_error,
};
pub use types::{
    GraphQlDataResponse, GraphQlError, GraphQlLocation, GraphQlRequest, GraphQlResponse,
    PathSegment, Variables,
};
