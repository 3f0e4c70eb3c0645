//! CoinGecko API client

use crate::error::{BotError, Result};
use reqwest::Client;
use std::time::Duration;

const BASE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// CoinGecko simple-price client (no API key required)
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
}

impl CoinGeckoClient {
    /// Create a client with a bounded request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::ConfigError(e.to_string()))?;
        Ok(Self { client })
    }

    /// Current price of `coin` (CoinGecko coin id, e.g. "bitcoin") in the
    /// `vs` currency (e.g. "inr")
    pub async fn simple_price(&self, coin: &str, vs: &str) -> Result<f64> {
        let response = self
            .client
            .get(BASE_URL)
            .query(&[("ids", coin), ("vs_currencies", vs)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::UpstreamUnavailable(format!(
                "CoinGecko returned {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;
        parse_simple_price(&data, coin, vs)
    }
}

/// Extract the price from a simple-price response body.
///
/// A well-formed response for a known coin looks like
/// `{"bitcoin": {"inr": 5000000.0}}`; an unknown coin yields an empty
/// object, which is reported as no-data rather than an upstream failure.
fn parse_simple_price(data: &serde_json::Value, coin: &str, vs: &str) -> Result<f64> {
    data.get(coin)
        .and_then(|entry| entry.get(vs))
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| BotError::DataUnavailable {
            symbol: coin.to_string(),
            reason: "coin not found".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_coin() {
        let data = serde_json::json!({"bitcoin": {"inr": 5_000_000.5}});
        let price = parse_simple_price(&data, "bitcoin", "inr").unwrap();
        assert!((price - 5_000_000.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_unknown_coin() {
        let data = serde_json::json!({});
        let err = parse_simple_price(&data, "dogecoin", "inr").unwrap_err();
        assert!(matches!(err, BotError::DataUnavailable { .. }));
    }

    #[test]
    fn test_parse_missing_currency() {
        let data = serde_json::json!({"bitcoin": {"usd": 60_000.0}});
        assert!(parse_simple_price(&data, "bitcoin", "inr").is_err());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_simple_price_live() {
        let client = CoinGeckoClient::new(Duration::from_secs(30)).unwrap();
        let price = client.simple_price("bitcoin", "inr").await.unwrap();
        assert!(price > 0.0);
    }
}
