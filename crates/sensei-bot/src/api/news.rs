//! NewsAPI client for finance headlines

use crate::error::{BotError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "https://newsapi.org/v2/top-headlines";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// One headline from NewsAPI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Headline
    pub title: Option<String>,
    /// Short summary
    pub description: Option<String>,
    /// Link to the full article
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

/// NewsAPI top-headlines client
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl NewsApiClient {
    /// Create a new NewsAPI client with rate limiting
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(60).unwrap()));
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

    /// Get top headlines for a category and country
    ///
    /// # Arguments
    /// * `category` - News category (e.g. "business")
    /// * `country` - Two-letter country code (e.g. "in")
    pub async fn top_headlines(&self, category: &str, country: &str) -> Result<Vec<NewsArticle>> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("category", category),
                ("country", country),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| BotError::UpstreamUnavailable(format!("NewsAPI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::UpstreamUnavailable(format!(
                "NewsAPI error {status}: {body}"
            )));
        }

        let data: HeadlinesResponse = response
            .json()
            .await
            .map_err(|e| BotError::UpstreamUnavailable(format!("bad NewsAPI response: {e}")))?;

        if data.status != "ok" {
            return Err(BotError::UpstreamUnavailable(format!(
                "NewsAPI status {}",
                data.status
            )));
        }

        Ok(data.articles)
    }
}
