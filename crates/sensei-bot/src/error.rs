//! Error types for the bot surface and market data gateways

use sensei_account::AccountError;
use thiserror::Error;

/// Bot and market-data specific errors
#[derive(Debug, Error)]
pub enum BotError {
    /// Account or session operation failed
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Command had the wrong number of arguments
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Command name not recognised
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Upstream price/news API failed or returned an unusable response
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream responded but had no data for the requested symbol
    #[error("No data available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Rate limit exceeded for an upstream API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;
