use serde::Serialize;

use reitwatch_core::{FeedId, WatchlistEntry};

use crate::cli::WatchlistArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct WatchlistResponseData {
    count: usize,
    entries: Vec<WatchlistEntry>,
}

pub fn run(args: &WatchlistArgs) -> Result<CommandResult, CliError> {
    let watchlist = super::load_watchlist(&args.config)?;

    let data = serde_json::to_value(WatchlistResponseData {
        count: watchlist.len(),
        entries: watchlist.entries().to_vec(),
    })?;

    // No external feed is consulted; report the static source for the chain.
    Ok(CommandResult::ok(data, vec![FeedId::StaticFallback]))
}
