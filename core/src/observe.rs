//! Observer registry coupling stores to their rendering collaborators.
//!
//! A store owns one [`Observers`] list. After every mutation it calls
//! [`Observers::notify`] with the event that happened and a snapshot of
//! its state; callbacks run synchronously, in registration order, before
//! the mutating call returns.

use std::fmt;

/// Callback signature: the event plus a snapshot of store state.
type Callback<E, S> = Box<dyn FnMut(&E, &S)>;

/// Ordered list of subscribed callbacks.
///
/// Deliberately not `Send`/`Sync`: the widget model is single-threaded
/// and run-to-completion, so callbacks need neither locking nor thread
/// bounds. There is no unsubscribe — subscriptions live exactly as long
/// as the store that holds them.
pub struct Observers<E, S> {
    callbacks: Vec<Callback<E, S>>,
}

impl<E, S> Observers<E, S> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Registers `callback` at the end of the notification order.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&E, &S) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Invokes every callback in registration order.
    pub fn notify(&mut self, event: &E, snapshot: &S) {
        for callback in &mut self.callbacks {
            callback(event, snapshot);
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// True when nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E, S> Default for Observers<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> fmt::Debug for Observers<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<&str, ()> = Observers::new();

        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            observers.subscribe(move |event, ()| {
                seen.borrow_mut().push(format!("{tag}:{event}"));
            });
        }

        observers.notify(&"ping", &());

        assert_eq!(
            *seen.borrow(),
            vec!["first:ping", "second:ping", "third:ping"]
        );
    }

    #[test]
    fn empty_registry_notify_is_a_no_op() {
        let mut observers: Observers<&str, ()> = Observers::new();
        assert!(observers.is_empty());
        observers.notify(&"ping", &());
    }

    #[test]
    fn len_tracks_subscriptions() {
        let mut observers: Observers<(), ()> = Observers::default();
        observers.subscribe(|(), ()| {});
        observers.subscribe(|(), ()| {});
        assert_eq!(observers.len(), 2);
    }
}
