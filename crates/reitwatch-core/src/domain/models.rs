use serde::{Deserialize, Serialize};

use crate::{Ticker, TradingDay, ValidationError};

/// Daily OHLCV bar.
///
/// A bar whose close is missing, non-finite, or non-positive is kept in the
/// series but treated as a gap by the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub day: TradingDay,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceBar {
    pub fn new(
        day: TradingDay,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_finite("open", open)?;
        validate_finite("high", high)?;
        validate_finite("low", low)?;
        validate_finite("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        Ok(Self {
            day,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Gap markers carry a sentinel close of 0.0 with empty OHLC.
    pub fn gap(day: TradingDay) -> Self {
        Self {
            day,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            volume: None,
        }
    }

    /// A usable close: finite and strictly positive.
    pub fn valid_close(&self) -> Option<f64> {
        (self.close.is_finite() && self.close > 0.0).then_some(self.close)
    }
}

/// Ordered daily price history for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series, enforcing strictly increasing trading days.
    pub fn new(ticker: Ticker, bars: Vec<PriceBar>) -> Result<Self, ValidationError> {
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].day <= pair[0].day {
                return Err(ValidationError::DaysNotIncreasing { index: index + 1 });
            }
        }
        Ok(Self { ticker, bars })
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices with gap entries removed, oldest first.
    pub fn valid_closes(&self) -> Vec<f64> {
        self.bars.iter().filter_map(PriceBar::valid_close).collect()
    }

    /// Most recent non-gap bar, if any.
    pub fn latest_bar(&self) -> Option<&PriceBar> {
        self.bars.iter().rev().find(|bar| bar.valid_close().is_some())
    }
}

/// Scraped per-REIT fundamentals; every field is best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    pub dividend_yield: Option<f64>,
    pub price_to_nav: Option<f64>,
    pub nav: Option<f64>,
    pub dpu: Option<f64>,
    pub gearing_ratio: Option<f64>,
    pub property_yield: Option<f64>,
}

impl FundamentalSnapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dividend_yield: Option<f64>,
        price_to_nav: Option<f64>,
        nav: Option<f64>,
        dpu: Option<f64>,
        gearing_ratio: Option<f64>,
        property_yield: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_optional_non_negative("dividend_yield", dividend_yield)?;
        validate_optional_non_negative("price_to_nav", price_to_nav)?;
        validate_optional_non_negative("nav", nav)?;
        validate_optional_non_negative("dpu", dpu)?;
        validate_optional_non_negative("gearing_ratio", gearing_ratio)?;
        validate_optional_non_negative("property_yield", property_yield)?;

        Ok(Self {
            dividend_yield,
            price_to_nav,
            nav,
            dpu,
            gearing_ratio,
            property_yield,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.dividend_yield.is_none()
            && self.price_to_nav.is_none()
            && self.nav.is_none()
            && self.dpu.is_none()
            && self.gearing_ratio.is_none()
            && self.property_yield.is_none()
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_finite(field, value)?;
        if value < 0.0 {
            return Err(ValidationError::NegativeValue { field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(input: &str) -> TradingDay {
        TradingDay::parse(input).expect("test date must parse")
    }

    fn bar(date: &str, close: f64) -> PriceBar {
        PriceBar::new(day(date), close, close, close, close, Some(1_000)).expect("valid bar")
    }

    #[test]
    fn rejects_out_of_order_days() {
        let ticker = Ticker::parse("C38U.SI").expect("valid ticker");
        let err = PriceSeries::new(
            ticker,
            vec![bar("2025-08-22", 2.0), bar("2025-08-21", 2.1)],
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::DaysNotIncreasing { index: 1 }));
    }

    #[test]
    fn gap_bars_are_skipped_in_closes() {
        let ticker = Ticker::parse("C38U.SI").expect("valid ticker");
        let series = PriceSeries::new(
            ticker,
            vec![
                bar("2025-08-20", 2.0),
                PriceBar::gap(day("2025-08-21")),
                bar("2025-08-22", 2.1),
            ],
        )
        .expect("valid series");

        assert_eq!(series.valid_closes(), vec![2.0, 2.1]);
        assert_eq!(series.latest_bar().map(|b| b.close), Some(2.1));
    }

    #[test]
    fn rejects_inverted_bar_range() {
        let err = PriceBar::new(day("2025-08-22"), 2.0, 1.9, 2.1, 2.0, None).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));
    }

    #[test]
    fn rejects_negative_fundamental_field() {
        let err = FundamentalSnapshot::new(Some(-1.0), None, None, None, None, None)
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NegativeValue {
                field: "dividend_yield"
            }
        ));
    }
}
