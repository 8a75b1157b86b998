//! Injected dependencies for widget stores.
//!
//! All external inputs the stores consume — the current time, fresh item
//! identifiers — are abstracted behind traits and injected through each
//! widget's environment struct, so tests can pin them down.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use headless_widgets_core::environment::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let today = clock.today();
/// assert_eq!(today, clock.today());
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;

    /// Wall-clock date and time on the local calendar.
    ///
    /// Widgets display and key state by the user's wall clock, not UTC.
    /// The default derives from [`Clock::now`]; production clocks should
    /// override with the actual local time.
    fn local_now(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }

    /// Today's date on the local calendar.
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

/// Production clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Issues unique `i64` identifiers for newly created items.
pub trait IdGenerator: Send + Sync {
    /// The next identifier. Never repeats for one generator instance.
    fn next_id(&self) -> i64;
}

/// Millisecond-timestamp identifiers.
///
/// Ids are the current Unix time in milliseconds; when two calls land on
/// the same tick, the second id is bumped past the first so ids from one
/// generator are strictly increasing.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    /// Creates a generator with no ids issued yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(0);
        now.max(prev + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ids_are_strictly_increasing() {
        let ids = TimestampIdGenerator::new();
        let mut previous = ids.next_id();
        for _ in 0..1000 {
            let next = ids.next_id();
            assert!(next > previous, "{next} should exceed {previous}");
            previous = next;
        }
    }

    #[test]
    fn today_defaults_to_the_now_date() {
        struct Pinned;

        impl Clock for Pinned {
            fn now(&self) -> DateTime<Utc> {
                DateTime::from_timestamp(1_750_000_000, 0).unwrap_or_default()
            }
        }

        assert_eq!(Pinned.now().date_naive(), Pinned.today());
    }
}
