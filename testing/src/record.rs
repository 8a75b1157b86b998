//! Event recording for observer assertions.
//!
//! Widget stores notify subscribers with `(&Event, &Snapshot)` pairs.
//! [`EventLog`] hands out a recording callback and keeps every pair it
//! sees, so tests can assert on emission order and payloads.

use std::cell::RefCell;
use std::rc::Rc;

/// Captures `(event, snapshot)` pairs from a store subscription.
///
/// Cloneable handle: the log and every recorder it hands out share the
/// same buffer. Single-threaded by design, like the observer loop it
/// taps into.
#[derive(Debug)]
pub struct EventLog<E, S> {
    entries: Rc<RefCell<Vec<(E, S)>>>,
}

impl<E, S> EventLog<E, S>
where
    E: Clone + 'static,
    S: Clone + 'static,
{
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A callback suitable for `subscribe`, recording into this log.
    #[must_use]
    pub fn recorder(&self) -> impl FnMut(&E, &S) + 'static {
        let entries = Rc::clone(&self.entries);
        move |event, snapshot| {
            entries.borrow_mut().push((event.clone(), snapshot.clone()));
        }
    }

    /// Every recorded event, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<E> {
        self.entries
            .borrow()
            .iter()
            .map(|(event, _)| event.clone())
            .collect()
    }

    /// Every recorded snapshot, in emission order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<S> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, snapshot)| snapshot.clone())
            .collect()
    }

    /// The most recent `(event, snapshot)` pair, if any.
    #[must_use]
    pub fn last(&self) -> Option<(E, S)> {
        self.entries.borrow().last().cloned()
    }

    /// Number of recorded notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<E, S> Default for EventLog<E, S>
where
    E: Clone + 'static,
    S: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> Clone for EventLog<E, S> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}
