use serde::{Deserialize, Serialize};

use crate::aggregate::sector_for_segment;
use crate::indicators::{compute_indicators, round2, Trend};
use crate::insights::fundamental_insights;
use crate::{FundamentalSnapshot, PriceSeries, Ticker, WatchlistEntry};

/// Fully assembled per-instrument row: identity, technicals, fundamentals
/// and the combined insight list. This is the unit handed to aggregation
/// and to the renderers; it holds no reference back to the price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReitRecord {
    pub ticker: Ticker,
    pub name: String,
    pub segment: String,
    pub sector: String,

    /// Latest non-gap close, 2 dp; 0.0 when the series carried no data.
    pub price: f64,
    pub volume: Option<u64>,

    pub change_pct: f64,
    pub rsi: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub trend: Trend,

    pub dividend_yield: Option<f64>,
    pub price_to_nav: Option<f64>,
    pub nav: Option<f64>,
    pub dpu: Option<f64>,
    pub gearing_ratio: Option<f64>,
    pub property_yield: Option<f64>,

    /// Technical insights first, fundamental insights appended after.
    pub insights: Vec<String>,
}

impl ReitRecord {
    /// Builds the record for one watchlist entry.
    ///
    /// Total like the engine underneath it: a missing series produces the
    /// degenerate technicals, and missing fundamentals leave every
    /// fundamental field null with no extra insights.
    pub fn build(
        entry: &WatchlistEntry,
        series: Option<&PriceSeries>,
        fundamentals: Option<&FundamentalSnapshot>,
    ) -> Self {
        let indicators = compute_indicators(series);

        let latest = series.and_then(PriceSeries::latest_bar);
        let price = latest.map(|bar| round2(bar.close)).unwrap_or(0.0);
        let volume = latest.and_then(|bar| bar.volume);

        let mut insights = indicators.insights;
        if let Some(snapshot) = fundamentals {
            insights.extend(fundamental_insights(snapshot));
        }

        let snapshot = fundamentals.copied().unwrap_or_default();

        Self {
            ticker: entry.ticker.clone(),
            name: entry.name.clone(),
            segment: entry.segment.clone(),
            sector: sector_for_segment(&entry.segment).to_owned(),
            price,
            volume,
            change_pct: indicators.change_pct,
            rsi: indicators.rsi,
            sma_20: indicators.sma_20,
            sma_50: indicators.sma_50,
            trend: indicators.trend,
            dividend_yield: snapshot.dividend_yield,
            price_to_nav: snapshot.price_to_nav,
            nav: snapshot.nav,
            dpu: snapshot.dpu,
            gearing_ratio: snapshot.gearing_ratio,
            property_yield: snapshot.property_yield,
            insights,
        }
    }
}
