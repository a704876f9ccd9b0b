mod models;
mod ticker;
mod trading_day;

pub use models::{FundamentalSnapshot, PriceBar, PriceSeries};
pub use ticker::Ticker;
pub use trading_day::TradingDay;
