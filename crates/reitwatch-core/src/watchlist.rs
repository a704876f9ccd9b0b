use std::collections::BTreeSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{CoreError, Ticker, ValidationError};

/// One tracked instrument from the watchlist config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub ticker: Ticker,
    pub name: String,
    pub segment: String,
}

/// Validated static list of tracked instruments.
///
/// Entry order is preserved end to end: it fixes the processing order of the
/// pipeline and therefore the tie-break order of any downstream top-N
/// selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WatchlistEntry>", into = "Vec<WatchlistEntry>")]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    pub fn new(entries: Vec<WatchlistEntry>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::EmptyWatchlist);
        }

        let mut seen = BTreeSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(ValidationError::EmptyDisplayName {
                    ticker: entry.ticker.as_str().to_owned(),
                });
            }
            if !seen.insert(entry.ticker.clone()) {
                return Err(ValidationError::DuplicateTicker {
                    ticker: entry.ticker.as_str().to_owned(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Loads and validates the JSON watchlist (an array of entries).
    pub fn from_reader(reader: impl Read) -> Result<Self, CoreError> {
        let entries: Vec<WatchlistEntry> = serde_json::from_reader(reader)?;
        Self::new(entries).map_err(CoreError::from)
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, ticker: &Ticker) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|entry| &entry.ticker == ticker)
    }
}

impl TryFrom<Vec<WatchlistEntry>> for Watchlist {
    type Error = ValidationError;

    fn try_from(entries: Vec<WatchlistEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Watchlist> for Vec<WatchlistEntry> {
    fn from(watchlist: Watchlist) -> Self {
        watchlist.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"ticker": "C38U.SI", "name": "CapitaLand Integrated Commercial Trust", "segment": "Retail"},
        {"ticker": "A17U.SI", "name": "CapitaLand Ascendas REIT", "segment": "Industrial"}
    ]"#;

    #[test]
    fn loads_json_watchlist_in_order() {
        let watchlist = Watchlist::from_reader(SAMPLE.as_bytes()).expect("must load");
        assert_eq!(watchlist.len(), 2);
        assert_eq!(watchlist.entries()[0].ticker.as_str(), "C38U.SI");
        assert_eq!(watchlist.entries()[1].segment, "Industrial");
    }

    #[test]
    fn rejects_empty_watchlist() {
        let err = Watchlist::new(Vec::new()).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyWatchlist));
    }

    #[test]
    fn rejects_duplicate_tickers() {
        let entry = WatchlistEntry {
            ticker: Ticker::parse("C38U.SI").expect("valid ticker"),
            name: String::from("CICT"),
            segment: String::from("Retail"),
        };
        let err = Watchlist::new(vec![entry.clone(), entry]).expect_err("must fail");
        assert!(matches!(err, ValidationError::DuplicateTicker { .. }));
    }
}
