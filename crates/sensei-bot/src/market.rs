//! Market data gateway
//!
//! Aggregates the upstream API clients behind one surface the command
//! handlers call. Quote lookups go through the timed cache; the /market
//! summary degrades section by section when an upstream is down instead of
//! failing as a whole.

use crate::api::{AlphaVantageClient, CoinGeckoClient, NewsApiClient, NewsArticle, Quote,
                 YahooFinanceClient};
use crate::cache::{CacheKey, PriceCache};
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use futures::future::join_all;

/// Symbols shown in the worldwide section of /market
pub const TOP_STOCKS_WORLDWIDE: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// Symbols shown in the India section of /market
pub const TOP_STOCKS_INDIA: [&str; 5] = [
    "RELIANCE.BO",
    "TCS.BO",
    "INFY.BO",
    "HDFCBANK.BO",
    "HINDUNILVR.BO",
];

/// Currency pairs shown in the forex section of /market
pub const FOREX_PAIRS: [(&str, &str); 3] = [("USD", "INR"), ("EUR", "INR"), ("GBP", "INR")];

/// One line of the /market stock sections
#[derive(Debug, Clone)]
pub struct StockPrice {
    pub symbol: String,
    pub price: f64,
}

/// Aggregated /market data; empty sections mean the upstream had no data
#[derive(Debug, Clone, Default)]
pub struct MarketSummary {
    pub worldwide: Vec<StockPrice>,
    pub india: Vec<StockPrice>,
    pub forex: Vec<(String, f64)>,
}

/// Facade over the price and news clients
pub struct MarketGateway {
    coingecko: CoinGeckoClient,
    yahoo: YahooFinanceClient,
    alpha_vantage: Option<AlphaVantageClient>,
    news: Option<NewsApiClient>,
    cache: PriceCache,
}

impl MarketGateway {
    /// Build the gateway from config; forex and news are only available
    /// when their API keys are configured
    pub fn new(config: &BotConfig) -> Result<Self> {
        let alpha_vantage = config
            .alpha_vantage_api_key
            .as_deref()
            .map(|key| {
                AlphaVantageClient::new(key, config.alpha_vantage_rate_limit, config.request_timeout)
            })
            .transpose()?;

        let news = config
            .news_api_key
            .as_deref()
            .map(|key| NewsApiClient::new(key, config.news_rate_limit, config.request_timeout))
            .transpose()?;

        Ok(Self {
            coingecko: CoinGeckoClient::new(config.request_timeout)?,
            yahoo: YahooFinanceClient::new(),
            alpha_vantage,
            news,
            cache: PriceCache::new(config.cache_ttl_price),
        })
    }

    /// Current price of a coin in INR
    pub async fn coin_price(&self, coin: &str) -> Result<f64> {
        let key = CacheKey::new(coin, "coin_price");
        let value = self
            .cache
            .get_or_fetch(key, || async {
                let price = self.coingecko.simple_price(coin, "inr").await?;
                Ok::<_, BotError>(serde_json::json!(price))
            })
            .await?;
        value.as_f64().ok_or_else(|| BotError::DataUnavailable {
            symbol: coin.to_string(),
            reason: "bad cached value".to_string(),
        })
    }

    /// Latest quote for a stock symbol
    pub async fn stock_quote(&self, symbol: &str) -> Result<Quote> {
        let key = CacheKey::new(symbol, "stock_quote");
        let value = self
            .cache
            .get_or_fetch(key, || async {
                let quote = self.yahoo.get_quote(symbol).await?;
                Ok::<_, BotError>(serde_json::to_value(quote)?)
            })
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Realtime exchange rate for a currency pair
    pub async fn exchange_rate(&self, from: &str, to: &str) -> Result<f64> {
        let client = self.alpha_vantage.as_ref().ok_or_else(|| {
            BotError::ConfigError("ALPHA_VANTAGE_API_KEY not configured".to_string())
        })?;
        client.get_exchange_rate(from, to).await
    }

    /// Top business headlines
    pub async fn finance_news(&self) -> Result<Vec<NewsArticle>> {
        let client = self
            .news
            .as_ref()
            .ok_or_else(|| BotError::ConfigError("NEWS_API_KEY not configured".to_string()))?;
        client.top_headlines("business", "in").await
    }

    /// Live market summary: top worldwide stocks, top Indian stocks and
    /// forex pairs. Symbols that fail to resolve are skipped with a log
    /// line rather than failing the whole summary.
    pub async fn market_summary(&self) -> MarketSummary {
        let mut summary = MarketSummary {
            worldwide: self.quote_batch(&TOP_STOCKS_WORLDWIDE).await,
            india: self.quote_batch(&TOP_STOCKS_INDIA).await,
            ..Default::default()
        };

        if self.alpha_vantage.is_some() {
            for (from, to) in FOREX_PAIRS {
                match self.exchange_rate(from, to).await {
                    Ok(rate) => summary.forex.push((format!("{from}/{to}"), rate)),
                    Err(e) => tracing::error!(pair = %format!("{from}/{to}"), error = %e,
                        "forex rate unavailable"),
                }
            }
        }

        summary
    }

    async fn quote_batch(&self, symbols: &[&str]) -> Vec<StockPrice> {
        let fetches = symbols.iter().map(|symbol| async move {
            (*symbol, self.stock_quote(symbol).await)
        });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(symbol, result)| match result {
                Ok(quote) => Some(StockPrice {
                    symbol: symbol.to_string(),
                    price: quote.close,
                }),
                Err(e) => {
                    tracing::error!(symbol, error = %e, "no price data");
                    None
                }
            })
            .collect()
    }
}
