//! Technical indicator engine.
//!
//! Pure, single-pass, and total: every input — including a missing or
//! all-gap series — yields a well-formed [`IndicatorReport`]. Insufficient
//! history never errors; it substitutes documented neutral defaults
//! (RSI → 50, SMA → latest close).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PriceSeries;

/// Trailing window for the RSI rolling means.
pub const RSI_PERIOD: usize = 14;
/// Short trend moving average window.
pub const SMA_SHORT: usize = 20;
/// Long trend moving average window.
pub const SMA_LONG: usize = 50;
/// Lookback for the headline change percentage.
pub const CHANGE_LOOKBACK: usize = 5;
/// Lookback for the monthly momentum insight.
pub const MOMENTUM_LOOKBACK: usize = 20;
/// Momentum magnitude (percent) that triggers an insight.
pub const MOMENTUM_THRESHOLD_PCT: f64 = 5.0;
/// Substituted when RSI is undefined (flat window or short history).
pub const RSI_NEUTRAL: f64 = 50.0;

/// Ternary price-versus-moving-average classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Bullish" => Ok(Self::Bullish),
            "Bearish" => Ok(Self::Bearish),
            "Neutral" => Ok(Self::Neutral),
            other => Err(format!("unknown trend '{other}'")),
        }
    }
}

/// Metrics and derived insights for one instrument's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport {
    /// Change over the trailing 5 sessions, percent, 2 dp.
    pub change_pct: f64,
    /// Most recent 14-period RSI; 50 when undefined.
    pub rsi: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub trend: Trend,
    /// Ordered rule output: RSI band, then trend, then momentum.
    pub insights: Vec<String>,
}

impl IndicatorReport {
    /// Fixed result for a missing or all-gap series.
    pub fn no_data() -> Self {
        Self {
            change_pct: 0.0,
            rsi: RSI_NEUTRAL,
            sma_20: 0.0,
            sma_50: 0.0,
            trend: Trend::Neutral,
            insights: vec![String::from("No data available")],
        }
    }
}

/// Computes the full indicator set for one instrument.
///
/// Total function: `None`, an empty series, and a series whose every bar is
/// a gap all produce [`IndicatorReport::no_data`].
pub fn compute_indicators(series: Option<&PriceSeries>) -> IndicatorReport {
    let closes = match series {
        Some(series) => series.valid_closes(),
        None => Vec::new(),
    };

    let Some(&last) = closes.last() else {
        return IndicatorReport::no_data();
    };

    let rsi = trailing_rsi(&closes, RSI_PERIOD);
    let sma_20 = trailing_sma(&closes, SMA_SHORT).unwrap_or(last);
    let sma_50 = trailing_sma(&closes, SMA_LONG).unwrap_or(last);
    let change_pct = change_over(&closes, CHANGE_LOOKBACK)
        .map(round2)
        .unwrap_or(0.0);

    let trend = classify_trend(last, sma_20, sma_50);
    let insights = technical_insights(rsi, trend, &closes);

    IndicatorReport {
        change_pct,
        rsi,
        sma_20,
        sma_50,
        trend,
        insights,
    }
}

/// Last value of the rolling-mean RSI.
///
/// Gains and losses are plain trailing means over the final `period` deltas.
/// A flat window (0/0) is undefined and substitutes [`RSI_NEUTRAL`]; a
/// gain-only window propagates through IEEE infinity to exactly 100.
fn trailing_rsi(closes: &[f64], period: usize) -> f64 {
    if closes.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    let window = &closes[closes.len() - (period + 1)..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }

    let mean_gain = gain_sum / period as f64;
    let mean_loss = loss_sum / period as f64;

    let rs = mean_gain / mean_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);

    if rsi.is_nan() {
        RSI_NEUTRAL
    } else {
        rsi
    }
}

/// Trailing arithmetic mean; `None` below `window` points.
fn trailing_sma(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window {
        return None;
    }
    let tail = &closes[closes.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Percent change against the close `lookback` sessions ago.
fn change_over(closes: &[f64], lookback: usize) -> Option<f64> {
    if closes.len() < lookback {
        return None;
    }
    let base = closes[closes.len() - lookback];
    let last = closes[closes.len() - 1];
    Some((last - base) / base * 100.0)
}

fn classify_trend(last: f64, sma_20: f64, sma_50: f64) -> Trend {
    if last > sma_20 && last > sma_50 {
        Trend::Bullish
    } else if last < sma_20 && last < sma_50 {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}

/// Rule order is part of the contract: RSI band, trend, momentum.
fn technical_insights(rsi: f64, trend: Trend, closes: &[f64]) -> Vec<String> {
    let mut insights = Vec::new();

    if rsi > 70.0 {
        insights.push(String::from("Overbought (RSI > 70) - Overvaluation Risk"));
    } else if rsi < 30.0 {
        insights.push(String::from(
            "Oversold (RSI < 30) - Potential Buy Opportunity",
        ));
    } else {
        insights.push(String::from("Trading within normal range"));
    }

    match trend {
        Trend::Bullish => insights.push(String::from("Strong Uptrend (Above 20 & 50 SMA)")),
        Trend::Bearish => insights.push(String::from("Downtrend (Below 20 & 50 SMA)")),
        Trend::Neutral => {}
    }

    if let Some(monthly) = change_over(closes, MOMENTUM_LOOKBACK) {
        if monthly > MOMENTUM_THRESHOLD_PCT {
            insights.push(format!(
                "Positive monthly momentum (+{:.2}%)",
                round2(monthly)
            ));
        } else if monthly < -MOMENTUM_THRESHOLD_PCT {
            insights.push(format!(
                "Negative monthly momentum ({:.2}%)",
                round2(monthly)
            ));
        }
    }

    insights
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PriceBar, Ticker, TradingDay};
    use time::Duration;

    fn series(closes: &[f64]) -> PriceSeries {
        let ticker = Ticker::parse("TEST.SI").expect("valid ticker");
        let start = TradingDay::parse("2025-01-01")
            .expect("valid date")
            .into_inner();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let day = TradingDay::from_date(start + Duration::days(i as i64));
                PriceBar::new(day, close, close, close, close, Some(1_000)).expect("valid bar")
            })
            .collect();
        PriceSeries::new(ticker, bars).expect("valid series")
    }

    #[test]
    fn missing_series_is_the_documented_degenerate_result() {
        let report = compute_indicators(None);
        assert_eq!(report.change_pct, 0.0);
        assert_eq!(report.rsi, RSI_NEUTRAL);
        assert_eq!(report.trend, Trend::Neutral);
        assert_eq!(report.insights, vec![String::from("No data available")]);
    }

    #[test]
    fn empty_series_matches_missing_series() {
        let ticker = Ticker::parse("TEST.SI").expect("valid ticker");
        let empty = PriceSeries::new(ticker, Vec::new()).expect("valid series");
        assert_eq!(compute_indicators(Some(&empty)), IndicatorReport::no_data());
    }

    #[test]
    fn four_points_yield_zero_change() {
        let report = compute_indicators(Some(&series(&[100.0, 90.0, 120.0, 80.0])));
        assert_eq!(report.change_pct, 0.0);
    }

    #[test]
    fn five_points_measure_against_first() {
        let report = compute_indicators(Some(&series(&[100.0, 100.0, 100.0, 100.0, 110.0])));
        assert_eq!(report.change_pct, 10.0);
    }

    // The neutral RSI default is deliberate policy: a flat window has no
    // defined relative strength (0/0), so the engine reports 50 instead of
    // propagating NaN.
    #[test]
    fn constant_series_reports_neutral_everything() {
        let report = compute_indicators(Some(&series(&[100.0; 30])));
        assert_eq!(report.rsi, RSI_NEUTRAL);
        assert_eq!(report.sma_20, 100.0);
        assert_eq!(report.change_pct, 0.0);
        assert_eq!(report.trend, Trend::Neutral);
        assert_eq!(
            report.insights,
            vec![String::from("Trading within normal range")]
        );
    }

    #[test]
    fn short_history_substitutes_close_for_smas() {
        let report = compute_indicators(Some(&series(&[1.0, 1.1, 1.2])));
        // SMA defaults to the latest close, so the trend comparison is
        // neutral-by-equality rather than falsely bullish.
        assert_eq!(report.sma_20, 1.2);
        assert_eq!(report.sma_50, 1.2);
        assert_eq!(report.trend, Trend::Neutral);
        assert_eq!(report.rsi, RSI_NEUTRAL);
    }

    #[test]
    fn uptrend_with_pullbacks_reads_bullish_and_strong() {
        // Rising ~1% per session with a small dip every 5th session keeps
        // mean_loss non-zero, so RSI stays defined and below 100.
        let mut closes = Vec::new();
        let mut price = 100.0;
        for i in 0..60 {
            price *= if i % 5 == 4 { 0.998 } else { 1.01 };
            closes.push(price);
        }

        let report = compute_indicators(Some(&series(&closes)));
        assert!(report.rsi > 70.0, "rsi={}", report.rsi);
        assert!(report.rsi < 100.0, "rsi={}", report.rsi);
        assert_eq!(report.trend, Trend::Bullish);
        assert_eq!(
            report.insights[0],
            "Overbought (RSI > 70) - Overvaluation Risk"
        );
        assert_eq!(report.insights[1], "Strong Uptrend (Above 20 & 50 SMA)");
        assert!(report.insights[2].starts_with("Positive monthly momentum"));
    }

    #[test]
    fn strict_downtrend_reads_bearish() {
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let report = compute_indicators(Some(&series(&closes)));
        assert_eq!(report.trend, Trend::Bearish);
        assert_eq!(
            report.insights[0],
            "Oversold (RSI < 30) - Potential Buy Opportunity"
        );
        assert_eq!(report.insights[1], "Downtrend (Below 20 & 50 SMA)");
        assert!(report.insights[2].starts_with("Negative monthly momentum"));
    }

    #[test]
    fn gain_only_window_saturates_at_100() {
        // No losses in the window: RS is +inf and the oscillator saturates.
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let report = compute_indicators(Some(&series(&closes)));
        assert_eq!(report.rsi, 100.0);
    }

    #[test]
    fn momentum_insight_needs_twenty_points() {
        let closes: Vec<f64> = (0..19).map(|i| 100.0 * 1.02_f64.powi(i)).collect();
        let report = compute_indicators(Some(&series(&closes)));
        assert!(report
            .insights
            .iter()
            .all(|insight| !insight.contains("momentum")));
    }
}
