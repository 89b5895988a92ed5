//! Event creation command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use fittfinder::graphql::{Variables, build_mutation, get_response_data, is_duplicate_error};

use crate::output;

/// Declared types of the `createEvent` input fields.
const EVENT_INPUT_TYPES: &[(&str, &str)] = &[
    ("private", "Boolean!"),
    ("name", "String!"),
    ("description", "String"),
    ("attendance", "AttendanceType"),
    ("formatId", "ID!"),
    ("categoryIds", "[ID!]"),
    ("firstStart", "DateTime!"),
    ("lastEnd", "DateTime"),
    ("recurrenceRule", "String"),
    ("registrationUrl", "URI"),
    ("paymentType", "PaymentType"),
    ("currency", "String"),
    ("listPrice", "Int"),
];

#[derive(Args, Debug)]
pub struct CreateEventArgs {
    /// JSON file holding the event input object
    pub file: PathBuf,
}

pub async fn run(args: CreateEventArgs) -> Result<()> {
    let input = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let variables: Variables =
        serde_json::from_str(&input).context("Event input must be a JSON object")?;

    let unknown: Vec<&str> = variables
        .keys()
        .map(String::as_str)
        .filter(|key| !EVENT_INPUT_TYPES.iter().any(|(name, _)| name == key))
        .collect();
    if !unknown.is_empty() {
        bail!("Unknown event input field(s): {}", unknown.join(", "));
    }

    let api = super::connect()?;
    let request = build_mutation("createEvent", EVENT_INPUT_TYPES, variables, "event { id }", None);

    let response = api
        .api_request_checked(&request)
        .await
        .context("Failed to create event")?;
    if is_duplicate_error(&response) {
        bail!("An event with the same key already exists");
    }

    let data = get_response_data(&response, Some((&request).into()))?;
    let id = data["createEvent"]["event"]["id"]
        .as_str()
        .context("Response did not include the new event id")?;

    output::success("Event created");
    output::field("ID", id);

    Ok(())
}
