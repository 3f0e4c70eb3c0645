//! Command parsing for the finance bot
//!
//! Every inbound chat message is either `/command arg...` or free text.
//! Wrong arity surfaces as a usage error carrying the exact usage string
//! the user should see.

use crate::error::{BotError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Welcome message
    Start,
    /// List available commands
    Help,
    /// Register a new account
    Register {
        username: String,
        password: String,
        email: String,
    },
    /// Log in to an existing account
    Login { username: String, password: String },
    /// Close the current session
    Logout,
    /// Delete the account (requires all credentials)
    Delete {
        username: String,
        password: String,
        email: String,
    },
    /// Request a one-time passcode by email
    RequestOtp { email: String },
    /// Verify a one-time passcode
    VerifyOtp { email: String, code: u32 },
    /// Recover the username behind an email
    RecoverUsername { email: String },
    /// Reset the account password
    ResetPassword { email: String, new_password: String },
    /// Current price of a cryptocurrency
    Price { coin: String },
    /// Latest price of a stock symbol
    Stock { symbol: String },
    /// Realtime forex exchange rate
    Forex { from: String, to: String },
    /// Live market summary
    Market,
    /// Top finance headlines
    FinanceNews,
    /// 2024 India Budget highlights
    BudgetHighlights,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if !input.starts_with('/') {
            return Err(BotError::UnknownCommand(input.to_string()));
        }

        let parts: Vec<&str> = input[1..].split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Err(BotError::UnknownCommand(input.to_string()));
        };

        match cmd.to_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "help" => Ok(Command::Help),
            "register" => match args {
                [username, password, email] => Ok(Command::Register {
                    username: (*username).to_string(),
                    password: (*password).to_string(),
                    email: (*email).to_string(),
                }),
                _ => Err(BotError::Usage("/register <username> <password> <email>")),
            },
            "login" => match args {
                [username, password] => Ok(Command::Login {
                    username: (*username).to_string(),
                    password: (*password).to_string(),
                }),
                _ => Err(BotError::Usage("/login <username> <password>")),
            },
            "logout" => Ok(Command::Logout),
            "delete" => match args {
                [username, password, email] => Ok(Command::Delete {
                    username: (*username).to_string(),
                    password: (*password).to_string(),
                    email: (*email).to_string(),
                }),
                _ => Err(BotError::Usage("/delete <username> <password> <email>")),
            },
            "request_otp" => match args {
                [email] => Ok(Command::RequestOtp {
                    email: (*email).to_string(),
                }),
                _ => Err(BotError::Usage("/request_otp <email>")),
            },
            "verify_otp" => match args {
                [email, code] => {
                    let code = code
                        .parse()
                        .map_err(|_| BotError::Usage("/verify_otp <email> <otp>"))?;
                    Ok(Command::VerifyOtp {
                        email: (*email).to_string(),
                        code,
                    })
                }
                _ => Err(BotError::Usage("/verify_otp <email> <otp>")),
            },
            "recover_username" => match args {
                [email] => Ok(Command::RecoverUsername {
                    email: (*email).to_string(),
                }),
                _ => Err(BotError::Usage("/recover_username <email>")),
            },
            "reset_password" => match args {
                [email, new_password] => Ok(Command::ResetPassword {
                    email: (*email).to_string(),
                    new_password: (*new_password).to_string(),
                }),
                _ => Err(BotError::Usage("/reset_password <email> <new_password>")),
            },
            "price" => match args {
                [coin] => Ok(Command::Price {
                    coin: coin.to_lowercase(),
                }),
                _ => Err(BotError::Usage("/price <coin>")),
            },
            "stock" => match args {
                [symbol] => Ok(Command::Stock {
                    symbol: symbol.to_uppercase(),
                }),
                _ => Err(BotError::Usage("/stock <symbol>")),
            },
            "forex" => match args {
                [from, to] => Ok(Command::Forex {
                    from: from.to_uppercase(),
                    to: to.to_uppercase(),
                }),
                _ => Err(BotError::Usage("/forex <from> <to>")),
            },
            "market" => Ok(Command::Market),
            "finance_news" => Ok(Command::FinanceNews),
            "budget_highlights" => Ok(Command::BudgetHighlights),
            other => Err(BotError::UnknownCommand(other.to_string())),
        }
    }

    /// Whether this command requires an open session
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Command::Price { .. }
                | Command::Stock { .. }
                | Command::Forex { .. }
                | Command::Market
                | Command::FinanceNews
                | Command::BudgetHighlights
        )
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        "\
Available commands:
/register - Register a new account
/login - Login to your account
/start - Welcome message
/help - List available commands
/price - Know the current price of a coin. Eg: /price bitcoin
/market - Get live market updates including top stocks worldwide, top stocks in India, and forex prices.
/delete - Delete your account.
/stock - Get live price for a specific stock.
/forex - Get live price for a specific forex.
/finance_news - Top finance headlines.
/budget_highlights - Highlights for 2024 India Budget.
/request_otp - Request a one-time passcode by email.
/verify_otp - Verify a one-time passcode.
/recover_username - Recover your username.
/reset_password - Reset your password."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register() {
        let cmd = Command::parse("/register alice pw123 a@x.com").unwrap();
        assert_eq!(
            cmd,
            Command::Register {
                username: "alice".to_string(),
                password: "pw123".to_string(),
                email: "a@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_register_wrong_arity() {
        let err = Command::parse("/register alice pw123").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Usage: /register <username> <password> <email>"
        );
    }

    #[test]
    fn test_parse_verify_otp() {
        let cmd = Command::parse("/verify_otp a@x.com 482913").unwrap();
        assert_eq!(
            cmd,
            Command::VerifyOtp {
                email: "a@x.com".to_string(),
                code: 482_913,
            }
        );
    }

    #[test]
    fn test_parse_verify_otp_non_numeric() {
        let err = Command::parse("/verify_otp a@x.com abcdef").unwrap_err();
        assert!(matches!(err, BotError::Usage(_)));
    }

    #[test]
    fn test_parse_price_lowercases_coin() {
        let cmd = Command::parse("/price Bitcoin").unwrap();
        assert_eq!(
            cmd,
            Command::Price {
                coin: "bitcoin".to_string()
            }
        );
    }

    #[test]
    fn test_parse_forex_uppercases_pair() {
        let cmd = Command::parse("/forex usd inr").unwrap();
        assert_eq!(
            cmd,
            Command::Forex {
                from: "USD".to_string(),
                to: "INR".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("/frobnicate").unwrap_err();
        assert!(matches!(err, BotError::UnknownCommand(_)));
    }

    #[test]
    fn test_parse_free_text_rejected() {
        assert!(Command::parse("what is bitcoin").is_err());
    }

    #[test]
    fn test_session_gating() {
        assert!(Command::parse("/market").unwrap().requires_session());
        assert!(
            Command::parse("/price bitcoin")
                .unwrap()
                .requires_session()
        );
        assert!(!Command::parse("/help").unwrap().requires_session());
        assert!(
            !Command::parse("/login alice pw")
                .unwrap()
                .requires_session()
        );
    }
}
