//! Static HTML dashboard.
//!
//! Single self-contained page: portfolio summary cards, sector averages,
//! and the full per-REIT table with insights. No templating engine; the
//! page is assembled section by section so every interpolation point runs
//! through `escape_html`.

use std::fmt::Write as _;

use reitwatch_core::{Digest, ReitRecord, SectorSummary, Trend};

/// Renders the complete dashboard page for one digest.
pub fn render_dashboard(digest: &Digest) -> String {
    let mut page = String::with_capacity(16 * 1024);

    page.push_str(HEADER);
    let _ = write!(
        page,
        "<p class=\"generated\">Generated {}</p>\n",
        escape_html(&digest.generated_at)
    );

    render_summary_cards(&mut page, digest);
    render_sector_table(&mut page, digest);
    render_reit_table(&mut page, &digest.records);

    page.push_str(FOOTER);
    page
}

fn render_summary_cards(page: &mut String, digest: &Digest) {
    page.push_str("<section class=\"cards\">\n");

    let _ = write!(
        page,
        "<div class=\"card\"><h3>Avg Yield</h3><p>{}%</p></div>\n",
        digest.portfolio.avg_yield
    );
    let _ = write!(
        page,
        "<div class=\"card\"><h3>Avg P/NAV</h3><p>{}x</p></div>\n",
        digest.portfolio.avg_pnav
    );
    let _ = write!(
        page,
        "<div class=\"card\"><h3>Avg Gearing</h3><p>{}%</p></div>\n",
        digest.portfolio.avg_gearing
    );

    if let Some(gainer) = digest.top_gainer() {
        let _ = write!(
            page,
            "<div class=\"card up\"><h3>Top Gainer</h3><p>{} ({:+}%)</p></div>\n",
            escape_html(&gainer.name),
            gainer.change_pct
        );
    }
    if let Some(loser) = digest.top_loser() {
        let _ = write!(
            page,
            "<div class=\"card down\"><h3>Top Loser</h3><p>{} ({:+}%)</p></div>\n",
            escape_html(&loser.name),
            loser.change_pct
        );
    }

    page.push_str("</section>\n");
}

fn render_sector_table(page: &mut String, digest: &Digest) {
    page.push_str("<section>\n<h2>Sector Averages</h2>\n<table>\n");
    page.push_str(
        "<tr><th>Sector</th><th>REITs</th><th>Yield</th><th>P/NAV</th><th>Gearing</th></tr>\n",
    );
    for (sector, summary) in &digest.sectors {
        render_sector_row(page, sector, summary);
    }
    page.push_str("</table>\n</section>\n");
}

fn render_sector_row(page: &mut String, sector: &str, summary: &SectorSummary) {
    let _ = write!(
        page,
        "<tr><td>{}</td><td>{}</td><td>{}%</td><td>{}x</td><td>{}%</td></tr>\n",
        escape_html(sector),
        summary.count,
        summary.avg_yield,
        summary.avg_pnav,
        summary.avg_gearing
    );
}

fn render_reit_table(page: &mut String, records: &[ReitRecord]) {
    page.push_str("<section>\n<h2>Watchlist</h2>\n<table>\n");
    page.push_str(
        "<tr><th>Ticker</th><th>Name</th><th>Sector</th><th>Price</th><th>5d Change</th>\
         <th>RSI</th><th>Trend</th><th>Yield</th><th>P/NAV</th><th>Gearing</th>\
         <th>Insights</th></tr>\n",
    );
    for record in records {
        render_reit_row(page, record);
    }
    page.push_str("</table>\n</section>\n");
}

fn render_reit_row(page: &mut String, record: &ReitRecord) {
    let trend_class = match record.trend {
        Trend::Bullish => "up",
        Trend::Bearish => "down",
        Trend::Neutral => "flat",
    };
    let insights = record
        .insights
        .iter()
        .map(|i| escape_html(i))
        .collect::<Vec<_>>()
        .join("; ");

    let _ = write!(
        page,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:+}%</td>\
         <td>{:.1}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td>\
         <td class=\"insights\">{}</td></tr>\n",
        escape_html(record.ticker.as_str()),
        escape_html(&record.name),
        escape_html(&record.sector),
        record.price,
        record.change_pct,
        record.rsi,
        trend_class,
        record.trend.as_str(),
        optional_metric(record.dividend_yield, "%"),
        optional_metric(record.price_to_nav, "x"),
        optional_metric(record.gearing_ratio, "%"),
        insights
    );
}

fn optional_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => String::from("–"),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>S-REITs Weekly Dashboard</title>
<style>
body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 2rem auto; max-width: 1100px; color: #1a202c; }
h1 { font-size: 1.6rem; }
.generated { color: #718096; font-size: 0.85rem; }
.cards { display: flex; flex-wrap: wrap; gap: 1rem; margin: 1rem 0; }
.card { border: 1px solid #e2e8f0; border-radius: 8px; padding: 0.75rem 1.25rem; min-width: 140px; }
.card h3 { margin: 0 0 0.25rem; font-size: 0.8rem; color: #718096; text-transform: uppercase; }
.card p { margin: 0; font-size: 1.1rem; font-weight: 600; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border-bottom: 1px solid #e2e8f0; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f7fafc; }
.up { color: #2f855a; }
.down { color: #c53030; }
.flat { color: #718096; }
.insights { font-size: 0.8rem; color: #4a5568; }
</style>
</head>
<body>
<h1>🇸🇬 S-REITs Weekly Dashboard</h1>
"#;

const FOOTER: &str = "</body>\n</html>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use reitwatch_core::{aggregate, ReitRecord, Ticker, Trend};

    fn record(ticker: &str, name: &str, change_pct: f64) -> ReitRecord {
        ReitRecord {
            ticker: Ticker::parse(ticker).expect("valid ticker"),
            name: name.to_owned(),
            segment: String::from("Retail"),
            sector: String::from("Retail"),
            price: 2.05,
            volume: Some(1_000_000),
            change_pct,
            rsi: 55.0,
            sma_20: 2.0,
            sma_50: 1.9,
            trend: Trend::Bullish,
            dividend_yield: Some(5.2),
            price_to_nav: None,
            nav: None,
            dpu: None,
            gearing_ratio: Some(38.5),
            property_yield: None,
            insights: vec![String::from("Strong Uptrend (Above 20 & 50 SMA)")],
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
    fn renders_cards_sectors_and_rows() {
        let digest = digest(vec![
            record("C38U.SI", "CapitaLand Integrated Commercial Trust", 1.5),
            record("M44U.SI", "Mapletree Logistics Trust", -2.0),
        ]);
        let page = render_dashboard(&digest);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h3>Top Gainer</h3><p>CapitaLand Integrated Commercial Trust (+1.5%)</p>"));
        assert!(page.contains("<h3>Top Loser</h3><p>Mapletree Logistics Trust (-2%)</p>"));
        assert!(page.contains("<td>C38U.SI</td>"));
        assert!(page.contains("<h2>Sector Averages</h2>"));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn html_in_names_is_escaped() {
        let digest = digest(vec![record("T.SI", "Evil <script> & Co", 0.0)]);
        let page = render_dashboard(&digest);
        assert!(page.contains("Evil &lt;script&gt; &amp; Co"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn missing_metrics_render_as_dash() {
        let mut only = record("T.SI", "Trust", 0.0);
        only.price_to_nav = None;
        let digest = digest(vec![only]);
        let page = render_dashboard(&digest);
        assert!(page.contains("<td>–</td>"));
    }
}
