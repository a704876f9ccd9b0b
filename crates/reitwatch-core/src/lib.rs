//! Core contracts for reitwatch.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The technical-indicator and insight-derivation engine
//! - Fundamentals name matching and sector/portfolio aggregation
//! - Feed trait contracts and structured feed errors
//! - Response envelope used by machine-readable outputs
//!
//! Everything here is pure: no I/O, no clocks, no global state. The feed
//! implementations live in `reitwatch-feed`.

pub mod aggregate;
pub mod data_source;
pub mod digest;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod feed;
pub mod indicators;
pub mod insights;
pub mod matching;
pub mod record;
pub mod watchlist;

pub use aggregate::{aggregate, sector_for_segment, PortfolioMetrics, SectorSummary};
pub use data_source::{
    DigestNotifier, FeedError, FeedErrorKind, FundamentalsFeed, FundamentalsOrigin,
    FundamentalsSnapshotSet, MarketDataFeed,
};
pub use digest::Digest;
pub use domain::{FundamentalSnapshot, PriceBar, PriceSeries, Ticker, TradingDay};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use feed::FeedId;
pub use indicators::{compute_indicators, IndicatorReport, Trend};
pub use insights::fundamental_insights;
pub use matching::{match_fundamentals, significant_words, FundamentalsTable};
pub use record::ReitRecord;
pub use watchlist::{Watchlist, WatchlistEntry};
