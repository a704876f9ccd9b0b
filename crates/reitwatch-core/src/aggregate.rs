//! Sector and portfolio aggregation.
//!
//! Pure fold over assembled records. Averages skip null fields; a bucket
//! with zero qualifying instruments reports 0 for that average. The
//! flattening of "no data" into 0 is intentional and documented — callers
//! cannot distinguish it from a true zero average.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::indicators::{round1, round2};
use crate::ReitRecord;

/// Static segment → sector classification. Unknown segments land in "Other".
pub fn sector_for_segment(segment: &str) -> &'static str {
    let normalized = segment.trim().to_lowercase();
    match normalized.as_str() {
        "retail" => "Retail",
        "office" | "commercial" => "Commercial",
        "industrial" | "logistics" | "business park" | "data centre" | "data center" => {
            "Industrial"
        }
        "hospitality" | "hotel" => "Hospitality",
        "healthcare" => "Healthcare",
        "diversified" | "integrated" => "Diversified",
        _ => "Other",
    }
}

/// Per-sector fundamental averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub count: usize,
    pub avg_yield: f64,
    pub avg_pnav: f64,
    pub avg_gearing: f64,
}

/// Whole-portfolio fundamental averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub avg_yield: f64,
    pub avg_pnav: f64,
    pub avg_gearing: f64,
}

impl PortfolioMetrics {
    pub const fn zero() -> Self {
        Self {
            avg_yield: 0.0,
            avg_pnav: 0.0,
            avg_gearing: 0.0,
        }
    }
}

/// Folds records into sector summaries and portfolio metrics.
///
/// Rounding convention: yields and P/NAV to 2 dp, gearing to 1 dp.
pub fn aggregate(records: &[ReitRecord]) -> (BTreeMap<String, SectorSummary>, PortfolioMetrics) {
    let mut by_sector: BTreeMap<String, Vec<&ReitRecord>> = BTreeMap::new();
    for record in records {
        by_sector
            .entry(record.sector.clone())
            .or_default()
            .push(record);
    }

    let sectors = by_sector
        .into_iter()
        .map(|(sector, members)| {
            let summary = SectorSummary {
                count: members.len(),
                avg_yield: round2(mean_of(&members, |r| r.dividend_yield)),
                avg_pnav: round2(mean_of(&members, |r| r.price_to_nav)),
                avg_gearing: round1(mean_of(&members, |r| r.gearing_ratio)),
            };
            (sector, summary)
        })
        .collect();

    let all: Vec<&ReitRecord> = records.iter().collect();
    let portfolio = PortfolioMetrics {
        avg_yield: round2(mean_of(&all, |r| r.dividend_yield)),
        avg_pnav: round2(mean_of(&all, |r| r.price_to_nav)),
        avg_gearing: round1(mean_of(&all, |r| r.gearing_ratio)),
    };

    (sectors, portfolio)
}

/// Mean over records where `field` is present; 0.0 when none qualify.
fn mean_of(records: &[&ReitRecord], field: impl Fn(&ReitRecord) -> Option<f64>) -> f64 {
    let values: Vec<f64> = records.iter().filter_map(|record| field(record)).collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ticker, Trend};

    fn record(sector_segment: &str, dividend_yield: Option<f64>, gearing: Option<f64>) -> ReitRecord {
        ReitRecord {
            ticker: Ticker::parse("A17U.SI").expect("valid ticker"),
            name: String::from("Test REIT"),
            segment: sector_segment.to_owned(),
            sector: sector_for_segment(sector_segment).to_owned(),
            price: 1.0,
            volume: None,
            change_pct: 0.0,
            rsi: 50.0,
            sma_20: 1.0,
            sma_50: 1.0,
            trend: Trend::Neutral,
            dividend_yield,
            price_to_nav: None,
            nav: None,
            dpu: None,
            gearing_ratio: gearing,
            property_yield: None,
            insights: Vec::new(),
        }
    }

    #[test]
    fn empty_input_reports_zeros_without_division_errors() {
        let (sectors, portfolio) = aggregate(&[]);
        assert!(sectors.is_empty());
        assert_eq!(portfolio, PortfolioMetrics::zero());
    }

    #[test]
    fn nulls_are_excluded_not_zeroed() {
        let records = vec![
            record("Retail", Some(6.0), Some(40.0)),
            record("Retail", None, Some(38.0)),
        ];
        let (sectors, portfolio) = aggregate(&records);

        let retail = sectors.get("Retail").expect("sector present");
        assert_eq!(retail.count, 2);
        // One qualifying yield, two qualifying gearings.
        assert_eq!(retail.avg_yield, 6.0);
        assert_eq!(retail.avg_gearing, 39.0);
        assert_eq!(portfolio.avg_yield, 6.0);
    }

    #[test]
    fn no_qualifying_values_flatten_to_zero() {
        let records = vec![record("Office", None, None)];
        let (sectors, _) = aggregate(&records);
        let office = sectors.get("Commercial").expect("sector present");
        assert_eq!(office.avg_yield, 0.0);
        assert_eq!(office.avg_gearing, 0.0);
    }

    #[test]
    fn unknown_segment_maps_to_other() {
        assert_eq!(sector_for_segment("Self Storage"), "Other");
        assert_eq!(sector_for_segment(" data centre "), "Industrial");
    }

    #[test]
    fn gearing_rounds_to_one_decimal() {
        let records = vec![
            record("Retail", None, Some(40.0)),
            record("Retail", None, Some(40.25)),
        ];
        let (sectors, portfolio) = aggregate(&records);
        assert_eq!(sectors.get("Retail").expect("present").avg_gearing, 40.1);
        assert_eq!(portfolio.avg_gearing, 40.1);
    }
}
