//! Raw query command implementation.

use anyhow::{Context, Result};
use clap::Args;

use fittfinder::graphql::{GraphQlRequest, Variables};

use crate::output;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// GraphQL document to send
    pub document: String,

    /// Operation name
    #[arg(long)]
    pub operation_name: Option<String>,

    /// Variables as a JSON object
    #[arg(long)]
    pub variables: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: QueryArgs) -> Result<()> {
    let api = super::connect()?;

    let mut request = GraphQlRequest::new(args.document);
    if let Some(operation_name) = args.operation_name {
        request = request.with_operation_name(operation_name);
    }
    if let Some(variables) = &args.variables {
        let variables: Variables =
            serde_json::from_str(variables).context("Variables must be a JSON object")?;
        request = request.with_variables(variables);
    }

    let response = api.api_request(&request).await.context("Query failed")?;

    if args.pretty {
        output::json_pretty(&response.data)
    } else {
        output::json(&response.data)
    }
}
