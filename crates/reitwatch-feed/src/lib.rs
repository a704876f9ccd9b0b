//! External collaborators for reitwatch: price history, fundamentals, and
//! digest notification. All I/O lives here, behind the trait contracts that
//! `reitwatch-core` defines; failures surface as structured `FeedError`s or
//! as explicit fallback data, never as panics.

mod fundamentals;
mod http;
mod telegram;
mod yahoo;

pub use fundamentals::{
    fallback_table, parse_fundamentals_table, FifthPersonFeed, StaticFundamentals,
};
pub use telegram::{TelegramNotifier, CHAT_ID_ENV, TOKEN_ENV};
pub use yahoo::{series_from_chart, ChartEnvelope, YahooChartFeed};
