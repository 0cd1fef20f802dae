use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Source of "now" for cache windows and session timestamps.
///
/// `Fixed` keeps tests deterministic; it only moves when advanced explicitly.
/// Clones of a fixed clock share one instant, so advancing any clone moves
/// them all.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(Arc<Mutex<DateTime<Utc>>>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(Arc::new(Mutex::new(at)))
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Move a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t.lock().unwrap_or_else(PoisonError::into_inner) += delta;
        }
    }

    /// Time elapsed since `earlier`, clamped at zero if the clock went backwards.
    #[must_use]
    pub fn elapsed_since(&self, earlier: DateTime<Utc>) -> Duration {
        let delta = self.now() - earlier;
        if delta < Duration::zero() {
            Duration::zero()
        } else {
            delta
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
