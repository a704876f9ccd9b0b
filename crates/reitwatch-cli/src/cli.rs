use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Weekly S-REIT market digest: technical indicators, fundamentals,
/// dashboard and Telegram delivery.
#[derive(Debug, Parser)]
#[command(name = "reitwatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format for the envelope.
    #[arg(long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Exit non-zero when the run produced warnings or errors.
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full weekly digest pipeline.
    Digest(DigestArgs),
    /// Analyze a single ticker.
    Analyze(AnalyzeArgs),
    /// Validate a watchlist file and list its entries.
    Watchlist(WatchlistArgs),
}

#[derive(Debug, Args)]
pub struct DigestArgs {
    /// Watchlist JSON file.
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Dashboard HTML output path.
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Send the digest via Telegram (TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID).
    #[arg(long)]
    pub notify: bool,

    /// Where fundamentals come from.
    #[arg(long, value_enum, default_value = "scrape")]
    pub fundamentals: FundamentalsMode,

    /// Public URL linked at the end of the Telegram message.
    #[arg(long, value_name = "URL")]
    pub dashboard_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Ticker to analyze, e.g. C38U.SI.
    pub ticker: String,

    /// Where fundamentals come from.
    #[arg(long, value_enum, default_value = "scrape")]
    pub fundamentals: FundamentalsMode,

    /// Display name used for fundamentals matching; defaults to the ticker.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct WatchlistArgs {
    /// Watchlist JSON file.
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FundamentalsMode {
    /// Scrape the live fundamentals table, degrading to the static dataset.
    Scrape,
    /// Use the static dataset only.
    Static,
}
