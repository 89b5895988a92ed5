//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use fittfinder::graphql::GraphQlRequest;

use crate::output;

const SELF_QUERY: &str = "query { self { id name effectivePermissions } }";

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

#[derive(Debug, Deserialize)]
struct SelfData {
    #[serde(rename = "self")]
    user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    id: String,
    name: String,
    #[serde(default)]
    effective_permissions: Vec<String>,
}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let api = super::connect()?;

    let data: SelfData = api
        .request_data(&GraphQlRequest::new(SELF_QUERY))
        .await
        .context("Failed to query the current user")?;

    output::field("ID", &data.user.id);
    output::field("Name", &data.user.name);
    output::field("Permissions", &data.user.effective_permissions.join(", "));

    Ok(())
}
