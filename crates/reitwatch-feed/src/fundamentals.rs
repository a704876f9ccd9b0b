//! Scraped S-REIT fundamentals with a static fallback dataset.
//!
//! The scrape source publishes a flat HTML comparison table (one row per
//! REIT: name, price, DPU, NAV, yield, P/NAV, gearing, property yield).
//! Any transport or parse failure degrades to the fallback table — the
//! snapshot's `origin` field tells the caller which one it got.

use regex::Regex;

use reitwatch_core::{
    FeedError, FeedId, FundamentalSnapshot, FundamentalsFeed, FundamentalsSnapshotSet,
    FundamentalsTable,
};

use crate::http::{build_client, transport_error};

const DEFAULT_URL: &str = "https://fifthperson.com/sg-reit-data/";

/// Minimum parsed rows for a scrape to count as usable.
const MIN_USABLE_ROWS: usize = 5;

/// Live fundamentals scraper that degrades to [`fallback_table`].
#[derive(Debug, Clone)]
pub struct FifthPersonFeed {
    client: reqwest::blocking::Client,
    url: String,
}

impl FifthPersonFeed {
    pub fn new() -> Result<Self, FeedError> {
        Ok(Self {
            client: build_client()?,
            url: String::from(DEFAULT_URL),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn fetch_table(&self) -> Result<FundamentalsTable, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(crate::http::status_error(response.status()));
        }

        let html = response.text().map_err(transport_error)?;
        let table = parse_fundamentals_table(&html);
        if table.len() < MIN_USABLE_ROWS {
            return Err(FeedError::decode(format!(
                "fundamentals table parsed only {} rows",
                table.len()
            )));
        }
        Ok(table)
    }
}

impl FundamentalsFeed for FifthPersonFeed {
    fn id(&self) -> FeedId {
        FeedId::FifthPerson
    }

    fn snapshot(&self) -> Result<FundamentalsSnapshotSet, FeedError> {
        match self.fetch_table() {
            Ok(table) => {
                tracing::info!(rows = table.len(), "fundamentals scrape succeeded");
                Ok(FundamentalsSnapshotSet::scraped(table))
            }
            Err(error) => {
                tracing::warn!(%error, "fundamentals scrape failed, using fallback dataset");
                Ok(FundamentalsSnapshotSet::fallback(fallback_table()))
            }
        }
    }
}

/// Serves the fallback dataset directly (offline runs and tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFundamentals;

impl FundamentalsFeed for StaticFundamentals {
    fn id(&self) -> FeedId {
        FeedId::StaticFallback
    }

    fn snapshot(&self) -> Result<FundamentalsSnapshotSet, FeedError> {
        Ok(FundamentalsSnapshotSet::fallback(fallback_table()))
    }
}

/// Extracts `{name -> snapshot}` rows from the comparison table.
///
/// Column layout: name, price, DPU, NAV, dividend yield, P/NAV, gearing,
/// property yield. Rows with fewer than 7 cells or an empty name are
/// skipped; unparseable metric cells become `None`, never zero.
pub fn parse_fundamentals_table(html: &str) -> FundamentalsTable {
    // (?s) so rows spanning multiple source lines still match.
    let row_re = Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("static regex");
    let cell_re = Regex::new(r"(?s)<t[dh][^>]*>(.*?)</t[dh]>").expect("static regex");
    let tag_re = Regex::new(r"<[^>]*>").expect("static regex");

    let mut table = FundamentalsTable::new();
    for row in row_re.captures_iter(html) {
        let cells: Vec<String> = cell_re
            .captures_iter(&row[1])
            .map(|cell| tag_re.replace_all(&cell[1], "").trim().to_owned())
            .collect();

        if cells.len() < 7 || cells[0].is_empty() {
            continue;
        }

        // Header rows parse no metrics and are dropped with the same check.
        let snapshot = FundamentalSnapshot::new(
            parse_metric(&cells[4]),
            parse_metric(&cells[5]),
            parse_metric(&cells[3]),
            parse_metric(&cells[2]),
            parse_metric(&cells[6]),
            cells.get(7).and_then(|cell| parse_metric(cell)),
        );

        match snapshot {
            Ok(snapshot) if !snapshot.is_empty() => {
                table.insert(normalize_key(&cells[0]), snapshot);
            }
            _ => {}
        }
    }

    table
}

/// Parses a scraped metric cell: strips `%`, `x`, `$` and thousands
/// separators; dashes and placeholders yield `None`.
fn parse_metric(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn normalize_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Static fallback dataset, refreshed manually alongside releases.
///
/// Values are indicative only; the digest marks the run as using fallback
/// data so readers know these are not fresh numbers.
pub fn fallback_table() -> FundamentalsTable {
    [
        ("capitaland integrated commercial", Some(5.1), Some(0.95), Some(2.11), Some(0.107), Some(39.9), Some(4.7)),
        ("capitaland ascendas", Some(5.8), Some(1.13), Some(2.26), Some(0.152), Some(38.9), Some(6.2)),
        ("mapletree logistics", Some(6.6), Some(0.93), Some(1.31), Some(0.080), Some(40.3), Some(5.4)),
        ("mapletree industrial", Some(6.1), Some(1.26), Some(1.74), Some(0.134), Some(39.1), Some(6.5)),
        ("mapletree pan asia commercial", Some(6.5), Some(0.72), Some(1.75), Some(0.081), Some(40.5), Some(4.4)),
        ("frasers logistics commercial", Some(7.2), Some(0.81), Some(1.13), Some(0.068), Some(36.1), Some(5.1)),
        ("frasers centrepoint", Some(5.5), Some(0.96), Some(2.25), Some(0.121), Some(39.3), Some(5.0)),
        ("keppel dc", Some(4.6), Some(1.45), Some(1.39), Some(0.094), Some(41.9), Some(6.8)),
        ("keppel", Some(6.8), Some(0.68), Some(1.24), Some(0.058), Some(41.2), Some(4.1)),
        ("suntec", Some(5.4), Some(0.56), Some(2.10), Some(0.062), Some(42.4), Some(4.3)),
        ("parkway life", Some(3.9), Some(1.56), Some(2.41), Some(0.148), Some(36.1), Some(5.6)),
        ("lendlease global commercial", Some(7.4), Some(0.67), Some(0.77), Some(0.039), Some(40.6), Some(4.6)),
        ("capitaland ascott", Some(6.2), Some(0.85), Some(1.15), Some(0.061), Some(38.3), Some(4.9)),
        ("cdl hospitality", Some(6.9), Some(0.63), Some(1.41), Some(0.057), Some(38.8), Some(5.3)),
    ]
    .into_iter()
    .map(
        |(name, dividend_yield, price_to_nav, nav, dpu, gearing_ratio, property_yield)| {
            let snapshot = FundamentalSnapshot {
                dividend_yield,
                price_to_nav,
                nav,
                dpu,
                gearing_ratio,
                property_yield,
            };
            (String::from(name), snapshot)
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_rows() {
        let html = r##"
            <table>
              <tr><th>REIT</th><th>Price</th><th>DPU</th><th>NAV</th>
                  <th>Yield</th><th>P/NAV</th><th>Gearing</th><th>Prop Yield</th></tr>
              <tr><td><a href="#">Keppel DC REIT</a></td><td>$2.10</td><td>0.094</td>
                  <td>1.39</td><td>4.6%</td><td>1.45x</td><td>41.9%</td><td>6.8%</td></tr>
              <tr><td>Suntec REIT</td><td>$1.15</td><td>0.062</td>
                  <td>2.10</td><td>5.4%</td><td>0.56x</td><td>42.4%</td><td>-</td></tr>
            </table>"##;

        let table = parse_fundamentals_table(html);
        assert_eq!(table.len(), 2);

        let keppel = table.get("keppel dc reit").expect("row present");
        assert_eq!(keppel.dividend_yield, Some(4.6));
        assert_eq!(keppel.price_to_nav, Some(1.45));
        assert_eq!(keppel.gearing_ratio, Some(41.9));

        let suntec = table.get("suntec reit").expect("row present");
        assert_eq!(suntec.property_yield, None);
    }

    #[test]
    fn header_and_short_rows_are_skipped() {
        let html = "<tr><td>Lonely cell</td></tr>";
        assert!(parse_fundamentals_table(html).is_empty());
    }

    #[test]
    fn metric_cells_strip_units() {
        assert_eq!(parse_metric("5.4%"), Some(5.4));
        assert_eq!(parse_metric("0.56x"), Some(0.56));
        assert_eq!(parse_metric("$1,150.00"), Some(1150.0));
        assert_eq!(parse_metric("-"), None);
        assert_eq!(parse_metric("N/A"), None);
    }

    #[test]
    fn static_feed_reports_fallback_origin() {
        let snapshot = StaticFundamentals.snapshot().expect("must produce");
        assert_eq!(
            snapshot.origin,
            reitwatch_core::FundamentalsOrigin::Fallback
        );
        assert!(snapshot.table.len() >= MIN_USABLE_ROWS);
    }
}
