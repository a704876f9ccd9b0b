use serde::Serialize;

use reitwatch_core::{
    match_fundamentals, EnvelopeError, FeedId, MarketDataFeed, ReitRecord, Ticker, WatchlistEntry,
};
use reitwatch_feed::YahooChartFeed;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct AnalyzeResponseData {
    record: ReitRecord,
}

/// Single-instrument analysis. Unlike the digest pipeline, a missing or
/// failed price fetch still produces a record: the indicator engine's
/// degenerate output, flagged with a warning.
pub fn run(args: &AnalyzeArgs) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| ticker.as_str().to_owned());
    let entry = WatchlistEntry {
        ticker: ticker.clone(),
        name,
        segment: String::new(),
    };

    let (fundamentals, fundamentals_feed, fallback_warning) =
        super::fetch_fundamentals(args.fundamentals)?;

    let market = YahooChartFeed::new().map_err(|error| CliError::Command(error.to_string()))?;

    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    if let Some(warning) = fallback_warning {
        warnings.push(warning);
    }

    let series = match market.price_series(&ticker) {
        Ok(series) => {
            if series.is_none() {
                warnings.push(format!("{ticker}: no price history available"));
            }
            series
        }
        Err(error) => {
            tracing::warn!(ticker = %ticker, %error, "price fetch failed");
            warnings.push(format!("{ticker}: price fetch failed"));
            errors.push(
                EnvelopeError::new(error.code(), format!("{ticker}: {}", error.message()))?
                    .with_retryable(error.retryable())
                    .with_feed(FeedId::YahooChart),
            );
            None
        }
    };

    let matched = match_fundamentals(&entry.name, &fundamentals.table);
    let record = ReitRecord::build(&entry, series.as_ref(), matched);

    let data = serde_json::to_value(AnalyzeResponseData { record })?;

    Ok(
        CommandResult::ok(data, vec![FeedId::YahooChart, fundamentals_feed])
            .with_warnings(warnings)
            .with_errors(errors),
    )
}
