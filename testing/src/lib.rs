//! # Headless Widgets Testing
//!
//! Testing utilities and helpers for the widget state cores.
//!
//! This crate provides:
//! - Deterministic mock implementations of the environment traits
//! - A broken storage collaborator for fail-soft paths
//! - An event log for asserting on observer notifications
//!
//! ## Example
//!
//! ```ignore
//! use headless_widgets_testing::{mocks, record::EventLog};
//!
//! let env = TodoEnvironment::new(
//!     Arc::new(mocks::test_clock()),
//!     Arc::new(mocks::SequentialIdGenerator::new()),
//!     Arc::new(MemoryStore::new()),
//! );
//! let mut store = TodoStore::new(env);
//!
//! let log = EventLog::new();
//! store.subscribe(log.recorder());
//!
//! store.add_todo(&key, "Buy milk")?;
//! assert_eq!(log.len(), 1);
//! ```

pub mod record;

pub use record::EventLog;

/// Mock implementations of the environment traits.
pub mod mocks {
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::{DateTime, NaiveDate, Utc};
    use headless_widgets_core::environment::{Clock, IdGenerator};
    use headless_widgets_core::storage::{KeyValueStore, StorageError};

    /// Fixed clock for deterministic tests.
    ///
    /// Always returns the same instant, making tests reproducible.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Creates a fixed clock pinned to `time`.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Creates a fixed clock pinned to midnight UTC on `date`.
        #[must_use]
        pub fn on_date(date: NaiveDate) -> Self {
            Self {
                time: date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
            }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC).
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to
    /// parse, which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: 1, 2, 3, …
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicI64,
    }

    impl SequentialIdGenerator {
        /// Creates a generator whose first id is 1.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicI64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> i64 {
            self.next.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    /// Storage collaborator whose every operation fails.
    ///
    /// Stores are expected to shrug this off: empty state on load,
    /// fire-and-forget on save.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct FailingStore;

    impl FailingStore {
        fn offline() -> StorageError {
            StorageError::Io(std::io::Error::other("storage offline"))
        }
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(Self::offline())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(Self::offline())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(Self::offline())
        }
    }
}

/// Installs a compact tracing subscriber for a test run.
///
/// Repeated calls are fine; only the first installation wins.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::mocks::{FixedClock, SequentialIdGenerator, test_clock};
    use headless_widgets_core::environment::{Clock, IdGenerator};

    #[test]
    fn fixed_clock_never_moves() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.today(), clock.now().date_naive());
    }

    #[test]
    fn on_date_pins_the_local_day() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap_or_default();
        assert_eq!(FixedClock::on_date(date).today(), date);
    }

    #[test]
    fn sequential_ids_count_up_from_one() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }
}
