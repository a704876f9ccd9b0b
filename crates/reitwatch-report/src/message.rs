//! Telegram digest text.
//!
//! Markdown message with portfolio averages, top/bottom movers, valuation
//! and technical alert sections. Selection sorts are stable, so records
//! with equal values keep their watchlist order in every list.

use reitwatch_core::{Digest, ReitRecord};

/// Movers shown per section.
const TOP_N: usize = 3;
/// Display names are clipped to keep the message scannable on mobile.
const NAME_WIDTH: usize = 25;

/// Builds the full digest message for one run.
pub fn digest_message(digest: &Digest, dashboard_url: Option<&str>) -> String {
    let mut message = String::from("🇸🇬 *S-REITs Weekly Update*\n\n");

    message.push_str("*Portfolio Averages:*\n");
    message.push_str(&format!("📊 Yield: {}%\n", digest.portfolio.avg_yield));
    message.push_str(&format!("📈 P/NAV: {}x\n", digest.portfolio.avg_pnav));
    message.push_str(&format!("⚖️ Gearing: {}%\n\n", digest.portfolio.avg_gearing));

    let by_change = digest.by_change_desc();

    message.push_str("*🟢 Top Performers:*\n");
    for record in by_change.iter().take(TOP_N) {
        message.push_str(&mover_line(record, true));
    }

    message.push_str("\n*🔴 Decliners:*\n");
    let mut decliners: Vec<&ReitRecord> = by_change.iter().rev().take(TOP_N).copied().collect();
    decliners.reverse();
    for record in &decliners {
        message.push_str(&mover_line(record, false));
    }

    let mut high_yield: Vec<&ReitRecord> = digest
        .records
        .iter()
        .filter(|r| r.dividend_yield.is_some_and(|y| y >= 7.0))
        .collect();
    high_yield.sort_by(|a, b| {
        b.dividend_yield
            .partial_cmp(&a.dividend_yield)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if !high_yield.is_empty() {
        message.push_str("\n*💰 High Yield Alerts (≥7%):*\n");
        for record in high_yield.iter().take(TOP_N) {
            let yield_pct = record.dividend_yield.unwrap_or_default();
            message.push_str(&format!(
                "• {}: {yield_pct}%\n",
                clip_name(&record.name)
            ));
        }
    }

    let mut deep_discount: Vec<&ReitRecord> = digest
        .records
        .iter()
        .filter(|r| r.price_to_nav.is_some_and(|p| p < 0.8))
        .collect();
    deep_discount.sort_by(|a, b| {
        a.price_to_nav
            .partial_cmp(&b.price_to_nav)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if !deep_discount.is_empty() {
        message.push_str("\n*🏷️ Deep NAV Discounts (<0.8x):*\n");
        for record in deep_discount.iter().take(TOP_N) {
            let pnav = record.price_to_nav.unwrap_or_default();
            message.push_str(&format!("• {}: {pnav}x P/NAV\n", clip_name(&record.name)));
        }
    }

    let oversold: Vec<&ReitRecord> = digest.records.iter().filter(|r| r.rsi < 30.0).collect();
    if !oversold.is_empty() {
        message.push_str("\n*📉 Oversold (RSI<30):*\n");
        for record in &oversold {
            message.push_str(&format!(
                "• {}: RSI {:.1}\n",
                clip_name(&record.name),
                record.rsi
            ));
        }
    }

    let overbought: Vec<&ReitRecord> = digest.records.iter().filter(|r| r.rsi > 70.0).collect();
    if !overbought.is_empty() {
        message.push_str("\n*📈 Overbought (RSI>70):*\n");
        for record in &overbought {
            message.push_str(&format!(
                "• {}: RSI {:.1}\n",
                clip_name(&record.name),
                record.rsi
            ));
        }
    }

    if let Some(url) = dashboard_url {
        message.push_str(&format!("\n🔗 [View Dashboard]({url})"));
    }

    message
}

fn mover_line(record: &ReitRecord, gainer: bool) -> String {
    let change = if gainer && record.change_pct >= 0.0 {
        format!("+{}", record.change_pct)
    } else {
        format!("{}", record.change_pct)
    };
    let yield_part = record
        .dividend_yield
        .map(|y| format!(" | Yield: {y}%"))
        .unwrap_or_default();
    format!("• {}: {change}%{yield_part}\n", clip_name(&record.name))
}

/// Char-boundary-safe prefix clip.
fn clip_name(name: &str) -> String {
    let clipped: String = name.chars().take(NAME_WIDTH).collect();
    clipped.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reitwatch_core::{aggregate, ReitRecord, Ticker, Trend};

    fn record(name: &str, change_pct: f64, dividend_yield: Option<f64>, rsi: f64) -> ReitRecord {
        ReitRecord {
            ticker: Ticker::parse("T.SI").expect("valid ticker"),
            name: name.to_owned(),
            segment: String::from("Retail"),
            sector: String::from("Retail"),
            price: 1.0,
            volume: None,
            change_pct,
            rsi,
            sma_20: 1.0,
            sma_50: 1.0,
            trend: Trend::Neutral,
            dividend_yield,
            price_to_nav: None,
            nav: None,
            dpu: None,
            gearing_ratio: None,
            property_yield: None,
            insights: Vec::new(),
        }
    }

    fn digest(records: Vec<ReitRecord>) -> Digest {
        let (sectors, portfolio) = aggregate(&records);
        Digest {
            generated_at: String::from("2025-08-22T00:00:00Z"),
            records,
            sectors,
            portfolio,
        }
    }

    #[test]
    fn names_are_clipped_and_sections_present() {
        let digest = digest(vec![
            record("A Very Long REIT Display Name Indeed", 2.5, Some(7.5), 50.0),
            record("Short", -3.0, None, 25.0),
        ]);
        let message = digest_message(&digest, Some("https://example.com/dash"));

        assert!(message.contains("*Portfolio Averages:*"));
        assert!(message.contains("• A Very Long REIT Display:"));
        assert!(message.contains("*💰 High Yield Alerts (≥7%):*"));
        assert!(message.contains("*📉 Oversold (RSI<30):*"));
        assert!(!message.contains("*📈 Overbought"));
        assert!(message.ends_with("[View Dashboard](https://example.com/dash)"));
    }

    #[test]
    fn gainers_get_plus_prefix_and_decliners_do_not() {
        let digest = digest(vec![
            record("Gainer", 4.0, None, 50.0),
            record("Loser", -2.0, None, 50.0),
        ]);
        let message = digest_message(&digest, None);
        assert!(message.contains("• Gainer: +4%"));
        assert!(message.contains("• Loser: -2%"));
    }
}
