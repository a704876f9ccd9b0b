//! Fundamental insight rules.
//!
//! Appended after the technical insights, in a fixed order: yield, then
//! price-to-NAV, then gearing. The yield check is independent; the two
//! P/NAV branches are mutually exclusive, as are the two gearing branches.

use crate::FundamentalSnapshot;

/// Dividend yield (percent) above which a high-yield alert fires.
pub const HIGH_YIELD_PCT: f64 = 7.0;
/// P/NAV below which the instrument trades at a deep discount.
pub const DEEP_DISCOUNT_PNAV: f64 = 0.8;
/// P/NAV above which the instrument trades at a premium.
pub const PREMIUM_PNAV: f64 = 1.3;
/// Gearing (percent) above which leverage is flagged.
pub const HIGH_GEARING_PCT: f64 = 45.0;
/// Gearing (percent) below which the balance sheet reads conservative.
pub const CONSERVATIVE_GEARING_PCT: f64 = 35.0;

/// Derives the fundamental insight list for one snapshot.
pub fn fundamental_insights(snapshot: &FundamentalSnapshot) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(dividend_yield) = snapshot.dividend_yield {
        if dividend_yield > HIGH_YIELD_PCT {
            insights.push(format!("High yield ({dividend_yield}%)"));
        }
    }

    if let Some(price_to_nav) = snapshot.price_to_nav {
        if price_to_nav < DEEP_DISCOUNT_PNAV {
            insights.push(format!("Deep discount to NAV ({price_to_nav}x)"));
        } else if price_to_nav > PREMIUM_PNAV {
            insights.push(format!("Premium to NAV ({price_to_nav}x)"));
        }
    }

    if let Some(gearing_ratio) = snapshot.gearing_ratio {
        if gearing_ratio > HIGH_GEARING_PCT {
            insights.push(format!("High gearing ({gearing_ratio}%)"));
        } else if gearing_ratio < CONSERVATIVE_GEARING_PCT {
            insights.push(format!("Conservative gearing ({gearing_ratio}%)"));
        }
    }

    insights
}
