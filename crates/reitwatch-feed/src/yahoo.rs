//! Daily price history from the Yahoo Finance v8 chart endpoint.

use serde::Deserialize;
use time::OffsetDateTime;

use reitwatch_core::{
    FeedError, FeedId, MarketDataFeed, PriceBar, PriceSeries, Ticker, TradingDay,
};

use crate::http::{build_client, status_error, transport_error};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
/// Six months of daily bars, matching the digest's indicator windows.
const DEFAULT_RANGE: &str = "6mo";

/// Blocking Yahoo chart feed.
#[derive(Debug, Clone)]
pub struct YahooChartFeed {
    client: reqwest::blocking::Client,
    base_url: String,
    range: String,
}

impl YahooChartFeed {
    pub fn new() -> Result<Self, FeedError> {
        Ok(Self {
            client: build_client()?,
            base_url: String::from(DEFAULT_BASE_URL),
            range: String::from(DEFAULT_RANGE),
        })
    }

    /// Points the feed at a different endpoint (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    fn request_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/{}?range={}&interval=1d",
            self.base_url,
            urlencoding::encode(ticker.as_str()),
            self.range
        )
    }
}

impl MarketDataFeed for YahooChartFeed {
    fn id(&self) -> FeedId {
        FeedId::YahooChart
    }

    fn price_series(&self, ticker: &Ticker) -> Result<Option<PriceSeries>, FeedError> {
        let url = self.request_url(ticker);
        tracing::debug!(ticker = %ticker, %url, "fetching price history");

        let response = self.client.get(&url).send().map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let payload: ChartEnvelope = response.json().map_err(transport_error)?;
        series_from_chart(ticker, payload)
    }
}

/// Converts a decoded chart payload into a domain series.
///
/// Rows with a missing or non-positive close become gap bars; rows whose
/// OHLC fails domain validation are demoted to gaps as well, so malformed
/// provider data reaches the core only as "missing".
pub fn series_from_chart(
    ticker: &Ticker,
    payload: ChartEnvelope,
) -> Result<Option<PriceSeries>, FeedError> {
    if let Some(error) = payload.chart.error {
        return Err(FeedError::unavailable(format!(
            "{}: {}",
            error.code, error.description
        )));
    }

    let Some(result) = payload
        .chart
        .result
        .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
    else {
        return Ok(None);
    };

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Ok(None);
    }

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut previous_day: Option<TradingDay> = None;
    for (index, &ts) in timestamps.iter().enumerate() {
        let Ok(moment) = OffsetDateTime::from_unix_timestamp(ts) else {
            continue;
        };
        let day = TradingDay::from_date(moment.date());

        // Intraday duplicates collapse onto the same day; keep the first.
        if previous_day.is_some_and(|prev| day <= prev) {
            continue;
        }
        previous_day = Some(day);

        bars.push(bar_for_row(day, index, &quote));
    }

    if bars.is_empty() {
        return Ok(None);
    }

    PriceSeries::new(ticker.clone(), bars)
        .map(Some)
        .map_err(|error| FeedError::decode(error.to_string()))
}

fn bar_for_row(day: TradingDay, index: usize, quote: &QuoteBlock) -> PriceBar {
    let close = value_at(&quote.close, index);
    let Some(close) = close.filter(|c| c.is_finite() && *c > 0.0) else {
        return PriceBar::gap(day);
    };

    let open = value_at(&quote.open, index).unwrap_or(close);
    let high = value_at(&quote.high, index).unwrap_or(close);
    let low = value_at(&quote.low, index).unwrap_or(close);
    let volume = quote
        .volume
        .as_ref()
        .and_then(|values| values.get(index).copied().flatten());

    PriceBar::new(day, open, high, low, close, volume).unwrap_or_else(|_| PriceBar::gap(day))
}

fn value_at(values: &Option<Vec<Option<f64>>>, index: usize) -> Option<f64> {
    values
        .as_ref()
        .and_then(|values| values.get(index).copied().flatten())
}

/// Wire shape of the v8 chart response (fields we consume).
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartNode,
}

#[derive(Debug, Deserialize)]
pub struct ChartNode {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    pub open: Option<Vec<Option<f64>>>,
    pub high: Option<Vec<Option<f64>>>,
    pub low: Option<Vec<Option<f64>>>,
    pub close: Option<Vec<Option<f64>>>,
    pub volume: Option<Vec<Option<u64>>>,
}
