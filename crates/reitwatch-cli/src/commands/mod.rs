mod analyze;
mod digest;
mod watchlist;

use std::path::Path;

use reitwatch_core::{
    CoreError, Envelope, EnvelopeError, EnvelopeMeta, FeedId, FundamentalsFeed,
    FundamentalsOrigin, FundamentalsSnapshotSet, Watchlist,
};
use reitwatch_feed::{FifthPersonFeed, StaticFundamentals};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cli::{Cli, Command, FundamentalsMode};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub feed_chain: Vec<FeedId>,
}

impl CommandResult {
    pub fn ok(data: Value, feed_chain: Vec<FeedId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            feed_chain,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let command_result = match &cli.command {
        Command::Digest(args) => digest::run(args)?,
        Command::Analyze(args) => analyze::run(args)?,
        Command::Watchlist(args) => watchlist::run(args)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        feed_chain,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        "v1.0.0",
        now_rfc3339(),
        feed_chain,
    )?;

    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

pub(crate) fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

pub(crate) fn load_watchlist(path: &Path) -> Result<Watchlist, CliError> {
    let file = std::fs::File::open(path)?;
    Watchlist::from_reader(std::io::BufReader::new(file)).map_err(|error| match error {
        CoreError::Validation(inner) => CliError::Validation(inner),
        CoreError::Serialization(inner) => CliError::Serialization(inner),
    })
}

/// Fetches the run's fundamentals snapshot per the selected mode.
///
/// Returns the snapshot, the feed consulted, and a warning when the run
/// ended up on the fallback dataset.
pub(crate) fn fetch_fundamentals(
    mode: FundamentalsMode,
) -> Result<(FundamentalsSnapshotSet, FeedId, Option<String>), CliError> {
    let (snapshot, feed) = match mode {
        FundamentalsMode::Scrape => {
            let feed =
                FifthPersonFeed::new().map_err(|error| CliError::Command(error.to_string()))?;
            let snapshot = feed
                .snapshot()
                .map_err(|error| CliError::Command(error.to_string()))?;
            (snapshot, FeedId::FifthPerson)
        }
        FundamentalsMode::Static => {
            let snapshot = StaticFundamentals
                .snapshot()
                .map_err(|error| CliError::Command(error.to_string()))?;
            (snapshot, FeedId::StaticFallback)
        }
    };

    let warning = (mode == FundamentalsMode::Scrape
        && snapshot.origin == FundamentalsOrigin::Fallback)
        .then(|| String::from("fundamentals scrape failed, using the static fallback dataset"));

    Ok((snapshot, feed, warning))
}
