//! Injectable time source
//!
//! OTP expiry is relative to wall-clock time. Taking the clock as a trait
//! lets tests drive expiry deterministically instead of sleeping.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

/// Time source for expiry checks
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests
#[derive(Clone)]
pub struct FakeClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FakeClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    /// Advance the clock by `seconds`
    pub fn advance_secs(&self, seconds: i64) {
        if let Ok(mut now) = self.now.write() {
            *now = *now + Duration::seconds(seconds);
        }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.read().map(|t| *t).unwrap_or_else(|_| Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_clock_advances() {
        let clock = FakeClock::new(Utc::now());
        let t0 = clock.now();
        clock.advance_secs(300);
        assert_eq!(clock.now() - t0, Duration::seconds(300));
    }
}
