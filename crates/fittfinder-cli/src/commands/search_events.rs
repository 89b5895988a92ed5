//! Event search command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use serde_json::json;

use fittfinder::graphql::{Variables, build_query};

#[derive(Args, Debug)]
pub struct SearchEventsArgs {
    /// Free-text search, e.g. "yoga"
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    event_instances: Connection,
}

#[derive(Debug, Deserialize)]
struct Connection {
    nodes: Vec<EventInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventInstance {
    id: String,
    start_date: String,
    event: Event,
}

#[derive(Debug, Deserialize)]
struct Event {
    name: String,
}

pub async fn run(args: SearchEventsArgs) -> Result<()> {
    let api = super::connect()?;

    let mut variables = Variables::new();
    variables.insert("query".to_string(), json!(args.text));
    let request = build_query(
        "eventInstances",
        &[("query", "String")],
        variables,
        "nodes { id startDate event { name } }",
        None,
    );

    let data: SearchData = api
        .request_data(&request)
        .await
        .context("Failed to search events")?;

    if data.event_instances.nodes.is_empty() {
        eprintln!("{}", "No events found.".dimmed());
        return Ok(());
    }

    for node in &data.event_instances.nodes {
        println!("{}: {} @ {}", node.id, node.event.name, node.start_date);
    }

    Ok(())
}
