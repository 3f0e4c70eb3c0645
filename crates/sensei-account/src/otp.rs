//! One-time passcode generation and verification
//!
//! Codes are six decimal digits, valid for five minutes, and held in
//! process memory only (lost on restart). At most one live code exists per
//! email; issuing a new one replaces any prior entry. A code is bound to
//! the identity it was issued to and is consumed on first successful
//! verification.

use crate::clock::{Clock, SystemClock};
use crate::error::{AccountError, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::rngs::OsRng;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Validity window for a code, in seconds
pub const OTP_TTL_SECONDS: i64 = 300;

#[derive(Debug, Clone)]
struct OtpEntry {
    code: u32,
    identity: String,
    expires_at: DateTime<Utc>,
}

/// In-memory store of live one-time passcodes, keyed by email
pub struct OtpManager {
    entries: Arc<RwLock<HashMap<String, OtpEntry>>>,
    clock: Arc<dyn Clock>,
}

impl OtpManager {
    /// Create a manager backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a manager with an injected time source
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Generate a uniformly random six-digit code from the OS CSPRNG
    pub fn generate() -> u32 {
        OsRng.gen_range(100_000..=999_999)
    }

    /// Associate `code` with `email`, expiring [`OTP_TTL_SECONDS`] from now.
    /// Replaces any prior entry for that email.
    pub fn store(&self, email: &str, identity: &str, code: u32) -> Result<()> {
        let expires_at = self.clock.now() + Duration::seconds(OTP_TTL_SECONDS);
        let mut entries = self
            .entries
            .write()
            .map_err(|e| AccountError::StorageError(format!("Lock error: {e}")))?;
        entries.insert(
            email.to_string(),
            OtpEntry {
                code,
                identity: identity.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    /// Generate and store a fresh code for `email`, returning it
    pub fn issue(&self, email: &str, identity: &str) -> Result<u32> {
        let code = Self::generate();
        self.store(email, identity, code)?;
        Ok(code)
    }

    /// Check a candidate code.
    ///
    /// Returns true iff a live entry exists for `email`, it was issued to
    /// `identity`, it has not expired, and `code` matches. The entry is
    /// removed on success. Unknown email, wrong identity, expired entry and
    /// mismatched code are indistinguishable to the caller, and none of
    /// them mutates the stored state.
    pub fn verify(&self, email: &str, identity: &str, code: u32) -> bool {
        let now = self.clock.now();
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        let valid = entries
            .get(email)
            .is_some_and(|e| e.identity == identity && now <= e.expires_at && e.code == code);
        if valid {
            entries.remove(email);
        }
        valid
    }
}

impl Default for OtpManager {
    fn default() -> Self {
        Self::new()
    }
}
