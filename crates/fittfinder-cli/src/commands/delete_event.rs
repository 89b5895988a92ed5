//! Event deletion command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::json;

use fittfinder::graphql::{Variables, build_mutation, get_response_data, is_not_found_error};

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteEventArgs {
    /// Event ID
    pub id: String,
}

pub async fn run(args: DeleteEventArgs) -> Result<()> {
    let api = super::connect()?;

    let mut variables = Variables::new();
    variables.insert("id".to_string(), json!(args.id));
    let request = build_mutation("deleteEvent", &[("id", "ID!")], variables, "deleted", None);

    let response = api
        .api_request_checked(&request)
        .await
        .context("Failed to delete event")?;
    if is_not_found_error(&response) {
        bail!("Event {} not found", args.id);
    }

    let data = get_response_data(&response, Some((&request).into()))?;
    if data["deleteEvent"]["deleted"].as_bool() != Some(true) {
        bail!("Event {} was not deleted", args.id);
    }

    output::success("Event deleted");
    output::field("ID", &args.id);

    Ok(())
}
