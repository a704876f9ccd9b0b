use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 12;

/// Validated exchange ticker, e.g. `C38U.SI`.
///
/// Uppercase alphanumeric with at most one `.` separating the exchange
/// suffix. Normalized to uppercase on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        if normalized.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if normalized.len() > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len: normalized.len(),
                max: MAX_TICKER_LEN,
            });
        }

        let first = normalized
            .chars()
            .next()
            .expect("non-empty string has a first char");
        if !first.is_ascii_alphanumeric() {
            return Err(ValidationError::TickerInvalidStart { ch: first });
        }

        for (index, ch) in normalized.char_indices() {
            if !ch.is_ascii_alphanumeric() && ch != '.' {
                return Err(ValidationError::TickerInvalidChar { ch, index });
            }
        }

        // A single suffix like ".SI"; no leading/trailing/double dots.
        let dot_count = normalized.matches('.').count();
        if dot_count > 1 || normalized.ends_with('.') || normalized.contains("..") {
            return Err(ValidationError::TickerBadSuffix { value: normalized });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for Ticker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Ticker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
