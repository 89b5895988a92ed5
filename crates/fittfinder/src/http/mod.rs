//! HTTP transport for the FITT Finder API.

mod client;
mod endpoints;

pub(crate) use client::HttpClient;
pub(crate) use endpoints::*;
