//! Clock widget core.
//!
//! A tick-driven clock with a decaying battery indicator and a bounded
//! alarm list. The host owns the repeating timer: it calls
//! [`ClockStore::tick`] once a second, and the store checks alarms,
//! drains the battery, and notifies subscribers with a snapshot. At 0%
//! the snapshot reports the screen as off, mirroring the original
//! widget hiding its time display.
//!
//! # Quick Start
//!
//! ```
//! use clock_widget::{ClockEnvironment, ClockError, ClockEvent, ClockStore};
//!
//! # fn main() -> Result<(), ClockError> {
//! let mut store = ClockStore::new(ClockEnvironment::production());
//!
//! store.subscribe(|event, snapshot| {
//!     if matches!(event, ClockEvent::Ticked) && !snapshot.screen_off() {
//!         println!("{} ({}%)", snapshot.time_label(), snapshot.battery);
//!     }
//! });
//!
//! let id = store.add_alarm(7, 30, 0)?;
//! store.tick();
//! store.toggle_alarm(id);
//! # Ok(())
//! # }
//! ```

pub mod store;
pub mod types;

// Re-export commonly used types
pub use store::{ClockEnvironment, ClockEvent, ClockSnapshot, ClockStore};
pub use types::{Alarm, ClockError, FULL_BATTERY, MAX_ALARMS};
