use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical feed identifiers used in metadata and envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedId {
    YahooChart,
    FifthPerson,
    StaticFallback,
    Telegram,
}

impl FeedId {
    pub const ALL: [Self; 4] = [
        Self::YahooChart,
        Self::FifthPerson,
        Self::StaticFallback,
        Self::Telegram,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YahooChart => "yahoo_chart",
            Self::FifthPerson => "fifth_person",
            Self::StaticFallback => "static_fallback",
            Self::Telegram => "telegram",
        }
    }
}

impl Display for FeedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yahoo_chart" => Ok(Self::YahooChart),
            "fifth_person" => Ok(Self::FifthPerson),
            "static_fallback" => Ok(Self::StaticFallback),
            "telegram" => Ok(Self::Telegram),
            other => Err(ValidationError::InvalidFeed {
                value: other.to_owned(),
            }),
        }
    }
}
