//! Subcommand implementations.

mod create_event;
mod delete_event;
mod query;
mod search_events;
mod whoami;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::debug;

use fittfinder::FittFinderApi;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a raw GraphQL document
    Query(query::QueryArgs),

    /// Display the authenticated user and their permissions
    Whoami(whoami::WhoamiArgs),

    /// Search upcoming event instances
    SearchEvents(search_events::SearchEventsArgs),

    /// Create an event from a JSON input file
    CreateEvent(create_event::CreateEventArgs),

    /// Delete an event
    DeleteEvent(delete_event::DeleteEventArgs),
}

pub async fn handle(cmd: Command) -> Result<()> {
    match cmd {
        Command::Query(args) => query::run(args).await,
        Command::Whoami(args) => whoami::run(args).await,
        Command::SearchEvents(args) => search_events::run(args).await,
        Command::CreateEvent(args) => create_event::run(args).await,
        Command::DeleteEvent(args) => delete_event::run(args).await,
    }
}

/// Build the API client from the environment.
fn connect() -> Result<FittFinderApi> {
    let api = fittfinder::create_fittfinder_api().context("Failed to configure API client")?;
    debug!(url = %api.base_url(), "Configured API client");
    Ok(api)
}
