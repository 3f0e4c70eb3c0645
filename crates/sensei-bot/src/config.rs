//! Configuration for the bot and its market data gateways

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the bot surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Alpha Vantage API key (forex lookups); None disables /forex
    pub alpha_vantage_api_key: Option<String>,

    /// NewsAPI key (finance headlines); None disables /finance_news
    pub news_api_key: Option<String>,

    /// Alpha Vantage requests per minute (free tier: 5)
    pub alpha_vantage_rate_limit: u32,

    /// NewsAPI requests per minute
    pub news_rate_limit: u32,

    /// Cache TTL for price quotes
    pub cache_ttl_price: Duration,

    /// Request timeout for outbound API calls
    pub request_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            news_api_key: None,
            alpha_vantage_rate_limit: 5,
            news_rate_limit: 60,
            cache_ttl_price: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Load all known API keys from the environment
    pub fn with_env_all_keys(mut self) -> Self {
        if let Ok(key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
            self.alpha_vantage_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("NEWS_API_KEY") {
            self.news_api_key = Some(key);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.alpha_vantage_rate_limit == 0 || self.news_rate_limit == 0 {
            return Err(BotError::ConfigError(
                "rate limits must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(BotError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    news_api_key: Option<String>,
    alpha_vantage_rate_limit: Option<u32>,
    news_rate_limit: Option<u32>,
    cache_ttl_price: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl BotConfigBuilder {
    /// Set the Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set the NewsAPI key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set the Alpha Vantage requests-per-minute quota
    pub fn alpha_vantage_rate_limit(mut self, limit: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(limit);
        self
    }

    /// Set the NewsAPI requests-per-minute quota
    pub fn news_rate_limit(mut self, limit: u32) -> Self {
        self.news_rate_limit = Some(limit);
        self
    }

    /// Set the price cache TTL
    pub fn cache_ttl_price(mut self, duration: Duration) -> Self {
        self.cache_ttl_price = Some(duration);
        self
    }

    /// Set the outbound request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Load API keys from the environment
    pub fn with_env_all_keys(mut self) -> Self {
        if let Ok(key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
            self.alpha_vantage_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("NEWS_API_KEY") {
            self.news_api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BotConfig> {
        let defaults = BotConfig::default();

        let config = BotConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            news_api_key: self.news_api_key,
            alpha_vantage_rate_limit: self
                .alpha_vantage_rate_limit
                .unwrap_or(defaults.alpha_vantage_rate_limit),
            news_rate_limit: self.news_rate_limit.unwrap_or(defaults.news_rate_limit),
            cache_ttl_price: self.cache_ttl_price.unwrap_or(defaults.cache_ttl_price),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.alpha_vantage_rate_limit, 5);
        assert!(config.alpha_vantage_api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = BotConfig::builder()
            .alpha_vantage_api_key("av_key")
            .news_api_key("news_key")
            .request_timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        assert_eq!(config.alpha_vantage_api_key.as_deref(), Some("av_key"));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_validation_zero_rate_limit() {
        let result = BotConfig::builder().alpha_vantage_rate_limit(0).build();
        assert!(result.is_err());
    }
}
