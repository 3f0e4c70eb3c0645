//! Market data API clients
//!
//! Thin adapters over the upstream price and news services. Each client
//! returns structured data or an explicit no-data error; responses are
//! never silently reused past their cache TTL.

pub mod alpha_vantage;
pub mod coingecko;
pub mod news;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageClient;
pub use coingecko::CoinGeckoClient;
pub use news::{NewsApiClient, NewsArticle};
pub use yahoo::{Quote, YahooFinanceClient};
