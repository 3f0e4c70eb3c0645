//! DeFiSensei finance bot
//!
//! The chat-facing half of the bot: it parses text commands, gates market
//! data behind the account session, and talks to the upstream price and
//! news APIs. It includes:
//!
//! - Command parsing and a single uniform dispatcher
//! - Market data gateways (CoinGecko, Yahoo Finance, Alpha Vantage forex,
//!   NewsAPI) with per-provider rate limiting and a timed quote cache
//! - MarkdownV2-safe reply formatting and message chunking
//! - An interactive CLI binary standing in for the chat transport
//!
//! Account, session and OTP logic lives in the `sensei-account` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use sensei_bot::{BotConfig, BotHandler, MarketGateway};
//! use sensei_account::{AccountService, Argon2Hasher, InMemoryUserStore, LogNotifier};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = BotConfig::builder().with_env_all_keys().build()?;
//! let accounts = Arc::new(AccountService::new(
//!     Arc::new(InMemoryUserStore::new()),
//!     Arc::new(Argon2Hasher),
//!     Arc::new(LogNotifier),
//! ));
//! let handler = BotHandler::new(accounts, MarketGateway::new(&config)?);
//!
//! let reply = handler.handle("1001", "/help").await;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod bot;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod market;

// Re-export main types for convenience
pub use bot::{BotHandler, Command};
pub use config::BotConfig;
pub use error::{BotError, Result};
pub use market::{MarketGateway, MarketSummary};
