//! Account service
//!
//! Orchestrates registration, login, OTP verification, logout, deletion,
//! username recovery and password reset on top of the credential store,
//! the password hasher, the OTP manager and the notifier.
//!
//! Per user the service walks a small state machine: unregistered ->
//! registered-unverified -> verified (logged out <-> logged in) -> deleted.
//! State mutations and outbound mail are two independent steps: a committed
//! mutation is never rolled back because a confirmation mail failed, the
//! outcome just reports both results.

use crate::error::{AccountError, Result};
use crate::hash::PasswordHasher;
use crate::notify::Notifier;
use crate::otp::OtpManager;
use crate::store::{UserRecord, UserStore};
use std::sync::Arc;

/// Result of a successful login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched a verified account; the session is now open
    LoggedIn,
    /// Credentials matched an unverified account; an OTP was issued and
    /// the caller must verify it next. `notified` reports whether the OTP
    /// mail went out.
    PendingVerification { notified: bool },
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    /// Whether the confirmation mail was delivered
    pub notified: bool,
}

/// Result of a successful account deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Whether the confirmation mail was delivered
    pub notified: bool,
}

/// Account and session orchestration
pub struct AccountService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    otp: OtpManager,
    notifier: Arc<dyn Notifier>,
}

impl AccountService {
    /// Create a service with a system-clock OTP manager
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_otp(store, hasher, OtpManager::new(), notifier)
    }

    /// Create a service with an injected OTP manager (tests use this to
    /// drive expiry with a fake clock)
    pub fn with_otp(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        otp: OtpManager,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            hasher,
            otp,
            notifier,
        }
    }

    /// Register a new account for `identity`.
    ///
    /// Fails with [`AccountError::AlreadyExists`] if the identity or
    /// username is taken. On success the record is committed before the
    /// confirmation mail is attempted.
    pub async fn register(
        &self,
        identity: &str,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<RegisterOutcome> {
        let digest = self.hasher.hash(password)?;
        self.store
            .insert(UserRecord::new(identity, username, email, digest))?;
        tracing::info!(identity, username, "account registered");

        let notified = match self
            .notifier
            .send(
                email,
                "Registration Confirmation",
                "You have successfully registered for DeFiSensei. Thank you!",
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(identity, error = %e, "registration mail failed");
                false
            }
        };

        Ok(RegisterOutcome { notified })
    }

    /// Log in with identity + username + password.
    ///
    /// A verified account gets its session opened immediately. An
    /// unverified account gets an OTP issued to its registered email and
    /// must call [`AccountService::verify_otp`] next. Any mismatch yields
    /// the same [`AccountError::InvalidCredentials`].
    pub async fn login(
        &self,
        identity: &str,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome> {
        let mut record = self
            .store
            .get(identity)
            .ok_or(AccountError::InvalidCredentials)?;

        if record.username != username || !self.hasher.verify(password, &record.password_digest) {
            return Err(AccountError::InvalidCredentials);
        }

        if record.is_verified {
            record.is_logged_in = true;
            self.store.update(record)?;
            tracing::info!(identity, "login successful");
            return Ok(LoginOutcome::LoggedIn);
        }

        let code = self.otp.issue(&record.email, identity)?;
        let notified = self.send_otp_mail(&record.email, code).await;
        tracing::info!(identity, notified, "login pending OTP verification");
        Ok(LoginOutcome::PendingVerification { notified })
    }

    /// Issue an OTP to `email` on request.
    ///
    /// The code is only stored once the mail went out, so a failed send
    /// leaves no live code behind.
    pub async fn request_otp(&self, identity: &str, email: &str) -> Result<()> {
        let code = OtpManager::generate();
        self.notifier
            .send(email, "Your OTP Code", &otp_body(code))
            .await
            .map_err(|e| AccountError::NotificationFailure(e.to_string()))?;
        self.otp.store(email, identity, code)?;
        Ok(())
    }

    /// Verify an OTP previously issued to `identity` for `email`.
    ///
    /// On success the code is consumed, the account is marked verified and
    /// its session opened. All failure modes collapse into
    /// [`AccountError::InvalidOrExpired`].
    pub async fn verify_otp(&self, identity: &str, email: &str, code: u32) -> Result<()> {
        if !self.otp.verify(email, identity, code) {
            return Err(AccountError::InvalidOrExpired);
        }

        if let Some(mut record) = self.store.get(identity) {
            record.is_verified = true;
            record.is_logged_in = true;
            self.store.update(record)?;
        }
        tracing::info!(identity, "OTP verified");
        Ok(())
    }

    /// Close the session for `identity`.
    ///
    /// Idempotent; an unknown identity is a no-op rather than an error.
    pub fn logout(&self, identity: &str) -> Result<()> {
        if let Some(mut record) = self.store.get(identity) {
            record.is_logged_in = false;
            self.store.update(record)?;
        }
        tracing::info!(identity, "logged out");
        Ok(())
    }

    /// Delete the account for `identity`.
    ///
    /// Requires an exact match on username, password and email; any
    /// mismatch yields [`AccountError::InvalidCredentials`] and leaves the
    /// record untouched. The deletion is committed before the confirmation
    /// mail is attempted.
    pub async fn delete(
        &self,
        identity: &str,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<DeleteOutcome> {
        let record = self
            .store
            .get(identity)
            .ok_or(AccountError::InvalidCredentials)?;

        if record.username != username
            || record.email != email
            || !self.hasher.verify(password, &record.password_digest)
        {
            return Err(AccountError::InvalidCredentials);
        }

        self.store.delete(identity);
        tracing::info!(identity, "account deleted");

        let body = format!(
            "Dear {username},\n\nYou have successfully deleted your account from DeFiSensei. \
             Thank you for using our service!"
        );
        let notified = match self
            .notifier
            .send(email, "Account Deletion Confirmation", &body)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(identity, error = %e, "deletion mail failed");
                false
            }
        };

        Ok(DeleteOutcome { notified })
    }

    /// Return the username registered under `email`.
    ///
    /// Requires an open session (a prior OTP verification in this flow acts
    /// as proof of email ownership).
    pub fn recover_username(&self, email: &str) -> Result<String> {
        let record = self
            .store
            .find_by_email(email)
            .ok_or(AccountError::NotFound)?;
        if !record.is_logged_in {
            return Err(AccountError::NotLoggedIn);
        }
        Ok(record.username)
    }

    /// Overwrite the password for the account registered under `email`.
    ///
    /// Same session precondition as [`AccountService::recover_username`].
    pub fn reset_password(&self, email: &str, new_password: &str) -> Result<()> {
        let mut record = self
            .store
            .find_by_email(email)
            .ok_or(AccountError::NotFound)?;
        if !record.is_logged_in {
            return Err(AccountError::NotLoggedIn);
        }
        record.password_digest = self.hasher.hash(new_password)?;
        self.store.update(record)?;
        tracing::info!(email, "password reset");
        Ok(())
    }

    /// Whether `identity` currently holds a session. Guards every market
    /// data command.
    pub fn session_check(&self, identity: &str) -> bool {
        self.store
            .get(identity)
            .is_some_and(|record| record.is_logged_in)
    }

    async fn send_otp_mail(&self, email: &str, code: u32) -> bool {
        match self
            .notifier
            .send(email, "Your OTP Code", &otp_body(code))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(email, error = %e, "OTP mail failed");
                false
            }
        }
    }
}

fn otp_body(code: u32) -> String {
    format!("Your OTP code is {code}. It is valid for 5 minutes.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use crate::hash::Sha256Hasher;
    use crate::notify::{MockNotifier, RecordingNotifier};
    use crate::store::InMemoryUserStore;
    use chrono::Utc;

    struct Fixture {
        service: AccountService,
        notifier: Arc<RecordingNotifier>,
        clock: FakeClock,
    }

    fn fixture() -> Fixture {
        let clock = FakeClock::new(Utc::now());
        let notifier = Arc::new(RecordingNotifier::new());
        let service = AccountService::with_otp(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(Sha256Hasher),
            OtpManager::with_clock(Arc::new(clock.clone())),
            notifier.clone(),
        );
        Fixture {
            service,
            notifier,
            clock,
        }
    }

    /// Pull the issued code out of the recorded OTP mail body.
    fn last_otp_code(notifier: &RecordingNotifier) -> u32 {
        let mail = notifier
            .sent()
            .into_iter()
            .rev()
            .find(|m| m.subject == "Your OTP Code")
            .expect("no OTP mail recorded");
        mail.body
            .split_whitespace()
            .find_map(|w| w.trim_end_matches('.').parse().ok())
            .expect("no code in OTP mail")
    }

    #[tokio::test]
    async fn test_register_then_verified_login() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();

        // Unverified login issues an OTP instead of a session.
        let outcome = f.service.login("1001", "alice", "pw123").await.unwrap();
        assert_eq!(outcome, LoginOutcome::PendingVerification { notified: true });
        assert!(!f.service.session_check("1001"));

        let code = last_otp_code(&f.notifier);
        f.service.verify_otp("1001", "a@x.com", code).await.unwrap();
        assert!(f.service.session_check("1001"));

        // Once verified, the next login succeeds directly.
        f.service.logout("1001").unwrap();
        let outcome = f.service.login("1001", "alice", "pw123").await.unwrap();
        assert_eq!(outcome, LoginOutcome::LoggedIn);
        assert!(f.service.session_check("1001"));
    }

    #[tokio::test]
    async fn test_duplicate_register_fails() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();
        let err = f
            .service
            .register("1001", "whoever", "other", "b@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_login_wrong_credentials_is_ambiguous() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();

        let wrong_password = f.service.login("1001", "alice", "nope").await.unwrap_err();
        let wrong_username = f.service.login("1001", "bob", "pw123").await.unwrap_err();
        let unknown_identity = f.service.login("9999", "alice", "pw123").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), wrong_username.to_string());
        assert_eq!(wrong_username.to_string(), unknown_identity.to_string());
    }

    #[tokio::test]
    async fn test_otp_expiry_window() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();
        f.service.login("1001", "alice", "pw123").await.unwrap();
        let code = last_otp_code(&f.notifier);

        f.clock.advance_secs(301);
        let err = f
            .service
            .verify_otp("1001", "a@x.com", code)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidOrExpired));
        assert!(!f.service.session_check("1001"));
    }

    #[tokio::test]
    async fn test_wrong_otp_indistinguishable_from_expired() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();
        f.service.login("1001", "alice", "pw123").await.unwrap();
        let code = last_otp_code(&f.notifier);
        let wrong = if code == 999_999 { 100_000 } else { code + 1 };

        f.clock.advance_secs(299);
        let wrong_code = f
            .service
            .verify_otp("1001", "a@x.com", wrong)
            .await
            .unwrap_err();

        f.clock.advance_secs(2);
        let expired = f
            .service
            .verify_otp("1001", "a@x.com", code)
            .await
            .unwrap_err();
        assert_eq!(wrong_code.to_string(), expired.to_string());
    }

    #[tokio::test]
    async fn test_otp_consumed_on_success() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();
        f.service.login("1001", "alice", "pw123").await.unwrap();
        let code = last_otp_code(&f.notifier);

        f.service.verify_otp("1001", "a@x.com", code).await.unwrap();
        let replay = f.service.verify_otp("1001", "a@x.com", code).await;
        assert!(matches!(replay, Err(AccountError::InvalidOrExpired)));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();

        f.service.logout("1001").unwrap();
        f.service.logout("1001").unwrap();
        assert!(!f.service.session_check("1001"));

        // Unknown identity is a no-op, not an error.
        f.service.logout("9999").unwrap();
    }

    #[tokio::test]
    async fn test_delete_requires_all_four_fields() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();

        let err = f
            .service
            .delete("1001", "alice", "pw123", "wrong@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
        // Record unchanged after the failed attempt.
        assert!(f.service.login("1001", "alice", "pw123").await.is_ok());

        let outcome = f
            .service
            .delete("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();
        assert!(outcome.notified);
        assert!(matches!(
            f.service.login("1001", "alice", "pw123").await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_recovery_flow_requires_session() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();

        assert!(matches!(
            f.service.recover_username("a@x.com"),
            Err(AccountError::NotLoggedIn)
        ));
        assert!(matches!(
            f.service.recover_username("missing@x.com"),
            Err(AccountError::NotFound)
        ));

        f.service.request_otp("1001", "a@x.com").await.unwrap();
        let code = last_otp_code(&f.notifier);
        f.service.verify_otp("1001", "a@x.com", code).await.unwrap();

        assert_eq!(f.service.recover_username("a@x.com").unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_reset_password_round_trip() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();
        f.service.request_otp("1001", "a@x.com").await.unwrap();
        let code = last_otp_code(&f.notifier);
        f.service.verify_otp("1001", "a@x.com", code).await.unwrap();

        f.service.reset_password("a@x.com", "newpw").unwrap();
        f.service.logout("1001").unwrap();

        assert!(matches!(
            f.service.login("1001", "alice", "pw123").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(f.service.login("1001", "alice", "newpw").await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_request_otp_stores_no_code() {
        let f = fixture();
        f.service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();

        f.notifier.set_failing(true);
        let err = f.service.request_otp("1001", "a@x.com").await.unwrap_err();
        assert!(matches!(err, AccountError::NotificationFailure(_)));

        // No live code exists, so any guess fails.
        f.notifier.set_failing(false);
        assert!(matches!(
            f.service.verify_otp("1001", "a@x.com", 123_456).await,
            Err(AccountError::InvalidOrExpired)
        ));
    }

    #[tokio::test]
    async fn test_register_commits_despite_mail_failure() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .returning(|_, _, _| Err(AccountError::NotificationFailure("down".to_string())));

        let service = AccountService::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(Sha256Hasher),
            Arc::new(notifier),
        );

        let outcome = service
            .register("1001", "alice", "pw123", "a@x.com")
            .await
            .unwrap();
        assert!(!outcome.notified);
        // The record is committed regardless of the mail result.
        assert!(service.login("1001", "alice", "pw123").await.is_ok());
    }
}
