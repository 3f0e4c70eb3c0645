//! Transactional mail dispatch
//!
//! The account service only needs (recipient, subject, body) -> ok/err;
//! everything behind that is a collaborator. The default implementation
//! posts to an HTTP transactional-mail API rather than speaking SMTP
//! directly.

use crate::error::{AccountError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Outbound notification surface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message. Failure is reported to the caller exactly once
    /// and never retried here.
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

/// Configuration for [`HttpMailer`]
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// API key for the mail provider
    pub api_key: String,
    /// Sender address shown on outbound mail
    pub sender: String,
    /// Provider endpoint
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl MailerConfig {
    /// Create a config for the default provider endpoint
    pub fn new(api_key: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender: sender.into(),
            endpoint: "https://api.brevo.com/v3/smtp/email".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Load `MAIL_API_KEY` and `MAIL_SENDER` from the environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MAIL_API_KEY")
            .map_err(|_| AccountError::NotificationFailure("MAIL_API_KEY not set".to_string()))?;
        let sender = std::env::var("MAIL_SENDER")
            .map_err(|_| AccountError::NotificationFailure("MAIL_SENDER not set".to_string()))?;
        Ok(Self::new(api_key, sender))
    }
}

#[derive(Debug, Serialize)]
struct MailAddress {
    email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailPayload {
    sender: MailAddress,
    to: Vec<MailAddress>,
    subject: String,
    text_content: String,
}

/// Notifier that posts to an HTTP transactional-mail API
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailerConfig,
}

impl HttpMailer {
    /// Build a mailer with a bounded request timeout
    pub fn new(config: MailerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AccountError::NotificationFailure(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let payload = MailPayload {
            sender: MailAddress {
                email: self.config.sender.clone(),
            },
            to: vec![MailAddress {
                email: recipient.to_string(),
            }],
            subject: subject.to_string(),
            text_content: body.to_string(),
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AccountError::NotificationFailure(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AccountError::NotificationFailure(format!(
                "mail API returned {status}: {body}"
            )));
        }

        Ok(())
    }
}

/// Notifier that only logs the message, for local development without a
/// configured mail provider
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        tracing::info!(recipient, subject, body, "mail (not sent, no provider configured)");
        Ok(())
    }
}

/// A message captured by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Test notifier that records every message and can be switched to fail
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<SentMail>>>,
    fail: Arc<RwLock<bool>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut fail) = self.fail.write() {
            *fail = failing;
        }
    }

    /// Messages delivered so far
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        if self.fail.read().map(|f| *f).unwrap_or(false) {
            return Err(AccountError::NotificationFailure(
                "recording notifier set to fail".to_string(),
            ));
        }
        if let Ok(mut sent) = self.sent.write() {
            sent.push(SentMail {
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }
        Ok(())
    }
}
