//! Alpha Vantage API client (forex exchange rates)

use crate::error::{BotError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "https://www.alphavantage.co/query";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage client for realtime currency exchange rates
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key
    /// * `rate_limit` - Maximum requests per minute (default: 5 for free tier)
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(5).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    /// Get the realtime exchange rate for a currency pair
    pub async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<f64> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "CURRENCY_EXCHANGE_RATE"),
                ("from_currency", from),
                ("to_currency", to),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::UpstreamUnavailable(format!(
                "Alpha Vantage returned {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;

        // Check for API error messages
        if let Some(error) = data.get("Error Message") {
            return Err(BotError::UpstreamUnavailable(error.to_string()));
        }

        if data.get("Note").is_some() {
            return Err(BotError::RateLimitExceeded {
                provider: "Alpha Vantage".to_string(),
            });
        }

        parse_exchange_rate(&data, from, to)
    }
}

/// Extract the rate from a CURRENCY_EXCHANGE_RATE response body
fn parse_exchange_rate(data: &serde_json::Value, from: &str, to: &str) -> Result<f64> {
    data.get("Realtime Currency Exchange Rate")
        .and_then(|entry| entry.get("5. Exchange Rate"))
        .and_then(serde_json::Value::as_str)
        .and_then(|rate| rate.parse().ok())
        .ok_or_else(|| BotError::DataUnavailable {
            symbol: format!("{from}/{to}"),
            reason: "no exchange rate in response".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key", 5, Duration::from_secs(30)).unwrap();
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_parse_exchange_rate() {
        let data = serde_json::json!({
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "USD",
                "3. To_Currency Code": "INR",
                "5. Exchange Rate": "83.1200"
            }
        });
        let rate = parse_exchange_rate(&data, "USD", "INR").unwrap();
        assert!((rate - 83.12).abs() < 1e-9);
    }

    #[test]
    fn test_parse_missing_rate() {
        let data = serde_json::json!({});
        let err = parse_exchange_rate(&data, "USD", "XXX").unwrap_err();
        assert!(matches!(err, BotError::DataUnavailable { .. }));
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_get_exchange_rate_live() {
        let key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap();
        let client = AlphaVantageClient::new(key, 5, Duration::from_secs(30)).unwrap();
        let rate = client.get_exchange_rate("USD", "INR").await.unwrap();
        assert!(rate > 0.0);
    }
}
