//! The clock widget store.
//!
//! Tick-driven: the host owns the repeating timer and calls
//! [`ClockStore::tick`] once a second; the store reacts by checking
//! alarms and draining the battery, then notifies subscribers. Nothing
//! here blocks or schedules.

use std::sync::Arc;

use chrono::{NaiveDateTime, Timelike};
use headless_widgets_core::environment::{Clock, IdGenerator, SystemClock, TimestampIdGenerator};
use headless_widgets_core::observe::Observers;

use crate::types::{Alarm, ClockError, FULL_BATTERY, MAX_ALARMS};

/// Injected dependencies for [`ClockStore`].
#[derive(Clone)]
pub struct ClockEnvironment {
    /// Source of the displayed wall-clock time.
    pub clock: Arc<dyn Clock>,
    /// Source of fresh alarm ids.
    pub ids: Arc<dyn IdGenerator>,
}

impl ClockEnvironment {
    /// Creates a new `ClockEnvironment`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Production environment: system clock and timestamp ids.
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(TimestampIdGenerator::new()))
    }
}

/// What changed in the clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClockEvent {
    /// A tick ran: the time advanced and the battery drained one step.
    Ticked,

    /// An enabled alarm matched the current second.
    AlarmFired {
        /// The alarm that went off.
        alarm: Alarm,
    },

    /// An alarm was appended to the list.
    AlarmAdded {
        /// The new alarm, enabled by default.
        alarm: Alarm,
    },

    /// An alarm was removed.
    AlarmDeleted {
        /// Identifier of the removed alarm.
        id: i64,
    },

    /// An alarm's enabled flag flipped.
    AlarmToggled {
        /// Identifier of the toggled alarm.
        id: i64,
        /// The flag's new value.
        enabled: bool,
    },
}

impl ClockEvent {
    /// Stable event name for logs and ordering assertions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ticked => "ticked",
            Self::AlarmFired { .. } => "alarmFired",
            Self::AlarmAdded { .. } => "alarmAdded",
            Self::AlarmDeleted { .. } => "alarmDeleted",
            Self::AlarmToggled { .. } => "alarmToggled",
        }
    }
}

/// Owned copy of clock state, delivered with every event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockSnapshot {
    /// Current local wall-clock time.
    pub now: NaiveDateTime,
    /// Battery level, 0–100.
    pub battery: u8,
    /// The alarm list, in insertion order.
    pub alarms: Vec<Alarm>,
}

impl ClockSnapshot {
    /// `YYYY-MM-DD HH:MM:SS` label for the time display.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.now.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// The time display powers off once the battery is flat.
    #[must_use]
    pub const fn screen_off(&self) -> bool {
        self.battery == 0
    }
}

/// The clock widget store: current time, battery level, alarm list.
pub struct ClockStore {
    battery: u8,
    alarms: Vec<Alarm>,
    observers: Observers<ClockEvent, ClockSnapshot>,
    environment: ClockEnvironment,
}

impl ClockStore {
    /// Creates a store with a full battery and no alarms.
    #[must_use]
    pub fn new(environment: ClockEnvironment) -> Self {
        Self {
            battery: FULL_BATTERY,
            alarms: Vec::new(),
            observers: Observers::new(),
            environment,
        }
    }

    /// Registers a callback invoked synchronously, in subscription
    /// order, on every event.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ClockEvent, &ClockSnapshot) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// Battery level, 0–100.
    #[must_use]
    pub const fn battery(&self) -> u8 {
        self.battery
    }

    /// Defensive copy of the alarm list.
    #[must_use]
    pub fn alarms(&self) -> Vec<Alarm> {
        self.alarms.clone()
    }

    /// Advances one timer step.
    ///
    /// Fires every enabled alarm matching the current local time to the
    /// second, then drains the battery one step (saturating at zero) and
    /// emits [`ClockEvent::Ticked`].
    pub fn tick(&mut self) {
        let now = self.environment.clock.local_now();
        let second = now.time().with_nanosecond(0).unwrap_or_else(|| now.time());

        let fired: Vec<Alarm> = self
            .alarms
            .iter()
            .filter(|alarm| alarm.enabled && alarm.time == second)
            .cloned()
            .collect();
        for alarm in fired {
            tracing::info!(alarm = %alarm.label(), "alarm fired");
            self.emit(ClockEvent::AlarmFired { alarm });
        }

        self.battery = self.battery.saturating_sub(1);
        self.emit(ClockEvent::Ticked);
    }

    /// Appends an alarm, enabled, at the given time of day.
    ///
    /// # Errors
    ///
    /// [`ClockError::TooManyAlarms`] when [`MAX_ALARMS`] alarms exist;
    /// [`ClockError::InvalidTime`] when a field is out of range.
    pub fn add_alarm(&mut self, hour: u32, minute: u32, second: u32) -> Result<i64, ClockError> {
        if self.alarms.len() >= MAX_ALARMS {
            return Err(ClockError::TooManyAlarms);
        }
        let time =
            chrono::NaiveTime::from_hms_opt(hour, minute, second).ok_or(ClockError::InvalidTime)?;

        let alarm = Alarm {
            id: self.environment.ids.next_id(),
            time,
            enabled: true,
        };
        let id = alarm.id;
        self.alarms.push(alarm.clone());
        self.emit(ClockEvent::AlarmAdded { alarm });
        Ok(id)
    }

    /// Flips an alarm's enabled flag. Unknown ids are silently ignored.
    pub fn toggle_alarm(&mut self, id: i64) {
        let Some(alarm) = self.alarms.iter_mut().find(|alarm| alarm.id == id) else {
            return;
        };
        alarm.enabled = !alarm.enabled;
        let enabled = alarm.enabled;
        self.emit(ClockEvent::AlarmToggled { id, enabled });
    }

    /// Removes an alarm. Unknown ids are silently ignored.
    pub fn delete_alarm(&mut self, id: i64) {
        let before = self.alarms.len();
        self.alarms.retain(|alarm| alarm.id != id);
        if self.alarms.len() == before {
            return;
        }
        self.emit(ClockEvent::AlarmDeleted { id });
    }

    fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            now: self.environment.clock.local_now(),
            battery: self.battery,
            alarms: self.alarms.clone(),
        }
    }

    fn emit(&mut self, event: ClockEvent) {
        let snapshot = self.snapshot();
        tracing::debug!(event = event.name(), "notifying observers");
        self.observers.notify(&event, &snapshot);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use headless_widgets_testing::mocks::{FixedClock, SequentialIdGenerator, test_clock};
    use headless_widgets_testing::record::EventLog;

    fn env_at(clock: FixedClock) -> ClockEnvironment {
        ClockEnvironment::new(Arc::new(clock), Arc::new(SequentialIdGenerator::new()))
    }

    fn store() -> ClockStore {
        ClockStore::new(env_at(test_clock()))
    }

    fn logged(store: &mut ClockStore) -> EventLog<ClockEvent, ClockSnapshot> {
        let log = EventLog::new();
        store.subscribe(log.recorder());
        log
    }

    fn names(log: &EventLog<ClockEvent, ClockSnapshot>) -> Vec<&'static str> {
        log.events().iter().map(ClockEvent::name).collect()
    }

    #[test]
    fn battery_drains_one_step_per_tick() {
        let mut store = store();
        assert_eq!(store.battery(), FULL_BATTERY);

        store.tick();
        assert_eq!(store.battery(), 99);
        store.tick();
        assert_eq!(store.battery(), 98);
    }

    #[test]
    fn battery_floors_at_zero_and_turns_the_screen_off() {
        let mut store = store();
        for _ in 0..150 {
            store.tick();
        }
        assert_eq!(store.battery(), 0);

        let log = logged(&mut store);
        store.tick();
        let (_, snapshot) = log.last().unwrap();
        assert_eq!(snapshot.battery, 0);
        assert!(snapshot.screen_off());
    }

    #[test]
    fn fourth_alarm_is_rejected() {
        let mut store = store();
        for hour in 6..9 {
            store.add_alarm(hour, 0, 0).unwrap();
        }
        assert_eq!(store.add_alarm(9, 0, 0), Err(ClockError::TooManyAlarms));
        assert_eq!(store.alarms().len(), MAX_ALARMS);
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let mut store = store();
        assert_eq!(store.add_alarm(24, 0, 0), Err(ClockError::InvalidTime));
        assert_eq!(store.add_alarm(0, 60, 0), Err(ClockError::InvalidTime));
        assert_eq!(store.add_alarm(0, 0, 60), Err(ClockError::InvalidTime));
        assert!(store.alarms().is_empty());
    }

    #[test]
    fn enabled_alarm_fires_on_the_matching_second() {
        // test_clock is pinned to exactly midnight.
        let mut store = store();
        store.add_alarm(0, 0, 0).unwrap();
        let log = logged(&mut store);

        store.tick();

        assert_eq!(names(&log), vec!["alarmFired", "ticked"]);
        match &log.events()[0] {
            ClockEvent::AlarmFired { alarm } => assert_eq!(alarm.label(), "00:00:00"),
            other => panic!("expected alarmFired, got {other:?}"),
        }
    }

    #[test]
    fn non_matching_second_stays_silent() {
        let mut store = store();
        store.add_alarm(0, 0, 1).unwrap();
        let log = logged(&mut store);

        store.tick();

        assert_eq!(names(&log), vec!["ticked"]);
    }

    #[test]
    fn disabled_alarm_stays_silent() {
        let mut store = store();
        let id = store.add_alarm(0, 0, 0).unwrap();
        store.toggle_alarm(id);
        let log = logged(&mut store);

        store.tick();

        assert_eq!(names(&log), vec!["ticked"]);
    }

    #[test]
    fn toggle_and_delete_round_trip() {
        let mut store = store();
        let id = store.add_alarm(7, 30, 0).unwrap();
        let log = logged(&mut store);

        store.toggle_alarm(id);
        assert!(!store.alarms()[0].enabled);
        store.toggle_alarm(id);
        assert!(store.alarms()[0].enabled);

        store.delete_alarm(id);
        assert!(store.alarms().is_empty());

        assert_eq!(
            names(&log),
            vec!["alarmToggled", "alarmToggled", "alarmDeleted"]
        );
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let mut store = store();
        let log = logged(&mut store);

        store.toggle_alarm(404);
        store.delete_alarm(404);

        assert!(log.is_empty());
    }

    #[test]
    fn snapshot_labels_are_zero_padded() {
        let clock = FixedClock::on_date(NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());
        let mut store = ClockStore::new(env_at(clock));
        let log = logged(&mut store);

        store.tick();

        let (_, snapshot) = log.last().unwrap();
        assert_eq!(snapshot.time_label(), "2025-06-05 00:00:00");
    }
}
