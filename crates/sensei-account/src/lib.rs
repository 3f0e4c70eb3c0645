//! Account, session and OTP core for the DeFiSensei finance bot
//!
//! This crate owns everything between an inbound chat command and the
//! market data layer: who the user is, whether their email is verified,
//! and whether they currently hold a session. It includes:
//!
//! - A credential store keyed by the chat transport's opaque identity
//! - Pluggable password hashing (Argon2id default, legacy SHA-256)
//! - One-time passcodes with a five-minute validity window
//! - A notifier seam for transactional mail (HTTP mail API default)
//! - The account service orchestrating register / login / verify /
//!   logout / delete / recover-username / reset-password
//!
//! # Example
//!
//! ```rust,ignore
//! use sensei_account::{AccountService, Argon2Hasher, InMemoryUserStore, LogNotifier};
//! use std::sync::Arc;
//!
//! # async fn run() -> sensei_account::Result<()> {
//! let service = AccountService::new(
//!     Arc::new(InMemoryUserStore::new()),
//!     Arc::new(Argon2Hasher),
//!     Arc::new(LogNotifier),
//! );
//!
//! service.register("1001", "alice", "pw123", "a@x.com").await?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod error;
pub mod hash;
pub mod notify;
pub mod otp;
pub mod service;
pub mod store;

// Re-export main types for convenience
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{AccountError, Result};
pub use hash::{Argon2Hasher, PasswordHasher, Sha256Hasher};
pub use notify::{HttpMailer, LogNotifier, MailerConfig, Notifier, RecordingNotifier};
pub use otp::{OTP_TTL_SECONDS, OtpManager};
pub use service::{AccountService, DeleteOutcome, LoginOutcome, RegisterOutcome};
pub use store::{InMemoryUserStore, UserRecord, UserStore};
