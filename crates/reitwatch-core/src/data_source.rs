use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{FeedId, FundamentalsTable, PriceSeries, Ticker};

/// Feed-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    Unavailable,
    RateLimited,
    Decode,
    InvalidRequest,
    NotConfigured,
    Internal,
}

/// Structured feed error used by the pipeline's skip/warn handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedError {
    kind: FeedErrorKind,
    message: String,
    retryable: bool,
}

impl FeedError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Decode,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::NotConfigured,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FeedErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FeedErrorKind::Unavailable => "feed.unavailable",
            FeedErrorKind::RateLimited => "feed.rate_limited",
            FeedErrorKind::Decode => "feed.decode",
            FeedErrorKind::InvalidRequest => "feed.invalid_request",
            FeedErrorKind::NotConfigured => "feed.not_configured",
            FeedErrorKind::Internal => "feed.internal",
        }
    }
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FeedError {}

/// Where a fundamentals snapshot came from. Fallback is data, not an error:
/// feeds degrade to their constant dataset instead of raising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundamentalsOrigin {
    Scraped,
    Fallback,
}

/// Whole-market fundamentals snapshot with explicit provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshotSet {
    pub table: FundamentalsTable,
    pub origin: FundamentalsOrigin,
}

impl FundamentalsSnapshotSet {
    pub fn scraped(table: FundamentalsTable) -> Self {
        Self {
            table,
            origin: FundamentalsOrigin::Scraped,
        }
    }

    pub fn fallback(table: FundamentalsTable) -> Self {
        Self {
            table,
            origin: FundamentalsOrigin::Fallback,
        }
    }
}

/// Daily price history provider.
///
/// `Ok(None)` means the provider answered but has no data for the ticker;
/// the pipeline warns and skips rather than failing the run.
pub trait MarketDataFeed {
    fn id(&self) -> FeedId;
    fn price_series(&self, ticker: &Ticker) -> Result<Option<PriceSeries>, FeedError>;
}

/// Whole-market fundamentals provider (one snapshot per run).
pub trait FundamentalsFeed {
    fn id(&self) -> FeedId;
    fn snapshot(&self) -> Result<FundamentalsSnapshotSet, FeedError>;
}

/// Outbound digest notification channel.
pub trait DigestNotifier {
    fn id(&self) -> FeedId;
    fn send(&self, text: &str) -> Result<(), FeedError>;
}
