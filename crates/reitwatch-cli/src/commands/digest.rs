use std::fs;

use serde::Serialize;

use reitwatch_core::{
    aggregate, match_fundamentals, Digest, DigestNotifier, EnvelopeError, FeedId, MarketDataFeed,
    ReitRecord,
};
use reitwatch_feed::{TelegramNotifier, YahooChartFeed};
use reitwatch_report::{digest_message, render_dashboard};

use crate::cli::DigestArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct DigestResponseData {
    digest: Digest,
    skipped: Vec<String>,
    dashboard_path: String,
    notified: bool,
}

pub fn run(args: &DigestArgs) -> Result<CommandResult, CliError> {
    let watchlist = super::load_watchlist(&args.config)?;
    tracing::info!(entries = watchlist.len(), "watchlist loaded");

    let (fundamentals, fundamentals_feed, fallback_warning) =
        super::fetch_fundamentals(args.fundamentals)?;

    let market = YahooChartFeed::new().map_err(|error| CliError::Command(error.to_string()))?;

    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    if let Some(warning) = fallback_warning {
        warnings.push(warning);
    }

    // Instruments without usable history are dropped from the digest, not
    // carried as degenerate rows.
    let mut records = Vec::with_capacity(watchlist.len());
    let mut skipped = Vec::new();
    for entry in watchlist.entries() {
        let series = match market.price_series(&entry.ticker) {
            Ok(Some(series)) => series,
            Ok(None) => {
                tracing::warn!(ticker = %entry.ticker, "no price history, skipping");
                warnings.push(format!("{}: no price history available", entry.ticker));
                skipped.push(entry.ticker.as_str().to_owned());
                continue;
            }
            Err(error) => {
                tracing::warn!(ticker = %entry.ticker, %error, "price fetch failed, skipping");
                warnings.push(format!("{}: price fetch failed", entry.ticker));
                errors.push(
                    EnvelopeError::new(error.code(), format!("{}: {}", entry.ticker, error.message()))?
                        .with_retryable(error.retryable())
                        .with_feed(FeedId::YahooChart),
                );
                skipped.push(entry.ticker.as_str().to_owned());
                continue;
            }
        };

        let matched = match_fundamentals(&entry.name, &fundamentals.table);
        records.push(ReitRecord::build(entry, Some(&series), matched));
    }

    let (sectors, portfolio) = aggregate(&records);
    let digest = Digest {
        generated_at: super::now_rfc3339(),
        records,
        sectors,
        portfolio,
    };

    let page = render_dashboard(&digest);
    fs::write(&args.output, page)?;
    tracing::info!(
        path = %args.output.display(),
        records = digest.records.len(),
        "dashboard written"
    );

    let mut notified = false;
    if args.notify {
        match TelegramNotifier::from_env() {
            Ok(Some(notifier)) => {
                let message = digest_message(&digest, args.dashboard_url.as_deref());
                match notifier.send(&message) {
                    Ok(()) => notified = true,
                    Err(error) => {
                        warnings.push(String::from("telegram delivery failed"));
                        errors.push(
                            EnvelopeError::new(error.code(), error.message())?
                                .with_retryable(error.retryable())
                                .with_feed(FeedId::Telegram),
                        );
                    }
                }
            }
            Ok(None) => {
                warnings.push(String::from(
                    "--notify set but telegram credentials are not configured",
                ));
            }
            Err(error) => {
                warnings.push(format!("telegram notifier misconfigured: {error}"));
            }
        }
    }

    let mut feed_chain = vec![FeedId::YahooChart, fundamentals_feed];
    if notified {
        feed_chain.push(FeedId::Telegram);
    }

    let data = serde_json::to_value(DigestResponseData {
        digest,
        skipped,
        dashboard_path: args.output.display().to_string(),
        notified,
    })?;

    Ok(CommandResult::ok(data, feed_chain)
        .with_warnings(warnings)
        .with_errors(errors))
}
