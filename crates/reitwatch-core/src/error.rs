use thiserror::Error;

/// Validation and contract errors exposed by `reitwatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter or digit: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },
    #[error("ticker may contain at most one '.' exchange suffix: '{value}'")]
    TickerBadSuffix { value: String },

    #[error("invalid feed '{value}', expected one of yahoo_chart, fifth_person, static_fallback, telegram")]
    InvalidFeed { value: String },

    #[error("trading day must be ISO yyyy-mm-dd: '{value}'")]
    InvalidTradingDay { value: String },
    #[error("price series days must be strictly increasing at index {index}")]
    DaysNotIncreasing { index: usize },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,

    #[error("watchlist must contain at least one entry")]
    EmptyWatchlist,
    #[error("watchlist entry '{ticker}' has an empty display name")]
    EmptyDisplayName { ticker: String },
    #[error("watchlist contains duplicate ticker '{ticker}'")]
    DuplicateTicker { ticker: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("feed_chain must contain at least one feed")]
    EmptyFeedChain,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
