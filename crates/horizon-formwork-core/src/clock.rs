//! Injectable time provider.
//!
//! Megawidgets that need "current time" (the time-range kind derives its
//! default state from it) query an injected [`Clock`] rather than the system
//! directly, so hosts and tests can substitute deterministic or simulated
//! time. The clock is a pure synchronous query; it schedules nothing.

use std::sync::Arc;

use parking_lot::Mutex;

/// A synchronous source of the current epoch time in milliseconds.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A settable clock for deterministic tests and simulated hosts.
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: Mutex<i64>,
}

impl FixedClock {
    /// Create a clock frozen at the given epoch time.
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Mutex::new(millis),
        }
    }

    /// Move the clock to an absolute epoch time.
    pub fn set(&self, millis: i64) {
        *self.millis.lock() = millis;
    }

    /// Advance the clock by a relative amount.
    pub fn advance(&self, delta_millis: i64) {
        *self.millis.lock() += delta_millis;
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        *self.millis.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_set_and_advance() {
        let clock = FixedClock::new(1_000);
        assert_eq!(clock.now_millis(), 1_000);
        clock.advance(500);
        assert_eq!(clock.now_millis(), 1_500);
        clock.set(0);
        assert_eq!(clock.now_millis(), 0);
    }

    #[test]
    fn test_clock_through_arc_dyn() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(42));
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_system_clock_is_sane() {
        // 2020-01-01 in epoch millis; anything running this test is later.
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
