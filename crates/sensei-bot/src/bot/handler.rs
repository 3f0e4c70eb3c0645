//! Command dispatch
//!
//! One uniform contract: (identity, input text) -> reply text. Every
//! command, account or market, goes through [`BotHandler::handle`]; the
//! transport layer only delivers messages and prints replies. Upstream
//! failures become "try again later" replies and are never fatal.

use crate::bot::commands::Command;
use crate::bot::format::format_article;
use crate::content::budget_highlights_message;
use crate::error::BotError;
use crate::market::{MarketGateway, MarketSummary};
use sensei_account::{AccountError, AccountService, LoginOutcome};
use std::sync::Arc;

const WELCOME: &str = "\
Hii!! Welcome to DeFiSensei.
Thank you for choosing this bot.
Let's get you registered to experience all features of the bot.
Type /register to start registration process.
Type /help to view available commands.";

const LOGIN_REQUIRED: &str =
    "You need to be logged in to use this command. Please log in using /login.";

/// Routes parsed commands to the account service and market gateway
pub struct BotHandler {
    accounts: Arc<AccountService>,
    market: MarketGateway,
}

impl BotHandler {
    pub fn new(accounts: Arc<AccountService>, market: MarketGateway) -> Self {
        Self { accounts, market }
    }

    /// Handle one inbound message and produce the reply text
    pub async fn handle(&self, identity: &str, input: &str) -> String {
        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e @ BotError::Usage(_)) => return e.to_string(),
            Err(BotError::UnknownCommand(_)) => {
                return "Unknown command. Type /help to view available commands.".to_string();
            }
            Err(e) => return e.to_string(),
        };

        if command.requires_session() && !self.accounts.session_check(identity) {
            return LOGIN_REQUIRED.to_string();
        }

        match command {
            Command::Start => WELCOME.to_string(),
            Command::Help => Command::help_text().to_string(),
            Command::Register {
                username,
                password,
                email,
            } => self.register(identity, &username, &password, &email).await,
            Command::Login { username, password } => {
                self.login(identity, &username, &password).await
            }
            Command::Logout => match self.accounts.logout(identity) {
                Ok(()) => "Logout successful!".to_string(),
                Err(e) => e.to_string(),
            },
            Command::Delete {
                username,
                password,
                email,
            } => self.delete(identity, &username, &password, &email).await,
            Command::RequestOtp { email } => {
                match self.accounts.request_otp(identity, &email).await {
                    Ok(()) => "An OTP has been sent to your email. Please use /verify_otp to \
                               verify it."
                        .to_string(),
                    Err(e) => {
                        tracing::warn!(identity, error = %e, "request_otp failed");
                        "Failed to send OTP. Please try again later.".to_string()
                    }
                }
            }
            Command::VerifyOtp { email, code } => {
                match self.accounts.verify_otp(identity, &email, code).await {
                    Ok(()) => "OTP verified successfully. You can now use /recover_username or \
                               /reset_password."
                        .to_string(),
                    Err(_) => "Invalid or expired OTP. Please try again.".to_string(),
                }
            }
            Command::RecoverUsername { email } => match self.accounts.recover_username(&email) {
                Ok(username) => format!("Your username is {username}."),
                Err(AccountError::NotFound) => "No account found with this email.".to_string(),
                Err(AccountError::NotLoggedIn) => {
                    "Please verify your email by using /request_otp.".to_string()
                }
                Err(e) => e.to_string(),
            },
            Command::ResetPassword {
                email,
                new_password,
            } => match self.accounts.reset_password(&email, &new_password) {
                Ok(()) => "Your password has been reset successfully.".to_string(),
                Err(AccountError::NotFound) => "No account found with this email.".to_string(),
                Err(AccountError::NotLoggedIn) => {
                    "Please verify your email by using /request_otp.".to_string()
                }
                Err(e) => e.to_string(),
            },
            Command::Price { coin } => self.price(&coin).await,
            Command::Stock { symbol } => self.stock(&symbol).await,
            Command::Forex { from, to } => self.forex(&from, &to).await,
            Command::Market => render_market_summary(&self.market.market_summary().await),
            Command::FinanceNews => self.finance_news().await,
            Command::BudgetHighlights => budget_highlights_message(),
        }
    }

    async fn register(
        &self,
        identity: &str,
        username: &str,
        password: &str,
        email: &str,
    ) -> String {
        match self.accounts.register(identity, username, password, email).await {
            Ok(outcome) if outcome.notified => {
                "Registration successful!! Please check your email for confirmation.".to_string()
            }
            Ok(_) => "Registration successful, but the confirmation email could not be sent. \
                      Please check the email address."
                .to_string(),
            Err(e) => e.to_string(),
        }
    }

    async fn login(&self, identity: &str, username: &str, password: &str) -> String {
        match self.accounts.login(identity, username, password).await {
            Ok(LoginOutcome::LoggedIn) => "Login successful!".to_string(),
            Ok(LoginOutcome::PendingVerification { notified: true }) => {
                "Please verify your OTP to complete the login process. An OTP has been sent to \
                 your email; use /verify_otp to continue."
                    .to_string()
            }
            Ok(LoginOutcome::PendingVerification { notified: false }) => {
                "Failed to send OTP. Please try again later.".to_string()
            }
            Err(e) => e.to_string(),
        }
    }

    async fn delete(
        &self,
        identity: &str,
        username: &str,
        password: &str,
        email: &str,
    ) -> String {
        match self.accounts.delete(identity, username, password, email).await {
            Ok(outcome) if outcome.notified => {
                "Your account has been successfully deleted. A confirmation email has been sent."
                    .to_string()
            }
            Ok(_) => "Your account has been successfully deleted, but the confirmation email \
                      could not be sent."
                .to_string(),
            Err(_) => {
                "Invalid credentials. Please check your username, password, and email.".to_string()
            }
        }
    }

    async fn price(&self, coin: &str) -> String {
        match self.market.coin_price(coin).await {
            Ok(price) => format!("The current price of {coin} is ₹{price}"),
            Err(BotError::DataUnavailable { .. }) => format!("Coin '{coin}' not found."),
            Err(e) => {
                tracing::error!(coin, error = %e, "price lookup failed");
                "Failed to fetch price data.".to_string()
            }
        }
    }

    async fn stock(&self, symbol: &str) -> String {
        match self.market.stock_quote(symbol).await {
            Ok(quote) => format!("The current price of {symbol} is ₹{}", quote.close),
            Err(BotError::DataUnavailable { .. }) => {
                format!("No price data found for {symbol}")
            }
            Err(e) => {
                tracing::error!(symbol, error = %e, "stock lookup failed");
                "Failed to fetch stock data. Please try again later.".to_string()
            }
        }
    }

    async fn forex(&self, from: &str, to: &str) -> String {
        match self.market.exchange_rate(from, to).await {
            Ok(rate) => {
                format!("The current exchange rate from {from} to {to} is ₹{rate}")
            }
            Err(BotError::DataUnavailable { .. }) => {
                format!("No data available for the currency pair {from}/{to}.")
            }
            Err(e) => {
                tracing::error!(from, to, error = %e, "forex lookup failed");
                format!("Failed to fetch data for the currency pair {from}/{to}.")
            }
        }
    }

    async fn finance_news(&self) -> String {
        match self.market.finance_news().await {
            Ok(articles) if articles.is_empty() => "No news articles found.".to_string(),
            Ok(articles) => articles
                .iter()
                .map(format_article)
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                tracing::error!(error = %e, "news fetch failed");
                "Failed to fetch news. Please try again later.".to_string()
            }
        }
    }
}

fn render_market_summary(summary: &MarketSummary) -> String {
    let mut message = String::from("Live Market Updates:\n\n");

    if summary.worldwide.is_empty() {
        message.push_str("No data available for top worldwide stocks.\n\n");
    } else {
        message.push_str("Top Stocks Worldwide:\n");
        for stock in &summary.worldwide {
            message.push_str(&format!("{}: ₹{}\n", stock.symbol, stock.price));
        }
    }

    if summary.india.is_empty() {
        message.push_str("No data available for top Indian stocks.\n\n");
    } else {
        message.push_str("\nTop Stocks in India:\n");
        for stock in &summary.india {
            message.push_str(&format!("{}: ₹{}\n", stock.symbol, stock.price));
        }
    }

    if summary.forex.is_empty() {
        message.push_str("No data available for forex prices.\n");
    } else {
        message.push_str("\nForex Prices:\n");
        for (pair, rate) in &summary.forex {
            message.push_str(&format!("{pair}: ₹{rate}\n"));
        }
    }

    message
}
