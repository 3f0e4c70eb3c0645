//! DeFiSensei CLI
//!
//! An interactive command-line stand-in for the chat transport: each line
//! you type is handled exactly like an inbound chat message.
//!
//! # Usage
//!
//! ```bash
//! # Optional API keys
//! export ALPHA_VANTAGE_API_KEY="..."   # enables /forex and the forex section of /market
//! export NEWS_API_KEY="..."            # enables /finance_news
//! export MAIL_API_KEY="..."            # enables real mail delivery
//! export MAIL_SENDER="bot@example.com"
//!
//! cargo run --bin sensei-bot -p sensei-bot
//! ```

use sensei_account::{
    AccountService, Argon2Hasher, HttpMailer, InMemoryUserStore, LogNotifier, MailerConfig,
    Notifier,
};
use sensei_bot::bot::chunk_message;
use sensei_bot::{BotConfig, BotHandler, MarketGateway};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════╗
║                       DeFiSensei                         ║
║                                                          ║
║  /register <user> <pw> <email>   /login <user> <pw>      ║
║  /price <coin>    /stock <symbol>    /forex <from> <to>  ║
║  /market          /finance_news      /budget_highlights  ║
║  /help for the full list, /exit to quit                  ║
╚══════════════════════════════════════════════════════════╝
"
    );
}

fn build_notifier() -> Arc<dyn Notifier> {
    match MailerConfig::from_env() {
        Ok(config) => match HttpMailer::new(config) {
            Ok(mailer) => return Arc::new(mailer),
            Err(e) => eprintln!("Warning: mailer setup failed ({e}), logging mail instead"),
        },
        Err(_) => eprintln!("Warning: MAIL_API_KEY/MAIL_SENDER not set, logging mail instead"),
    }
    Arc::new(LogNotifier)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,sensei_bot=info".to_string()),
        )
        .init();

    print_banner();

    let config = BotConfig::builder().with_env_all_keys().build()?;
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserStore::new()),
        Arc::new(Argon2Hasher),
        build_notifier(),
    ));
    let handler = BotHandler::new(accounts, MarketGateway::new(&config)?);

    // The CLI stands in for the chat transport, so the identity comes from
    // the environment rather than a platform user id.
    let identity = env::var("SENSEI_USER").unwrap_or_else(|_| "cli".to_string());
    println!("Ready! (identity: {identity})\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/exit" || input == "/quit" {
            println!("Goodbye!");
            break;
        }

        let reply = handler.handle(&identity, input).await;
        for chunk in chunk_message(&reply) {
            println!("{chunk}\n");
        }
    }

    Ok(())
}
