//! Domain types for the calendar to-do widget.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Maximum number of todos one day may hold.
pub const MAX_TODOS_PER_DAY: usize = 5;

/// Unique identifier for a todo item.
///
/// Persisted as a bare JSON number: millisecond timestamps in
/// production, small integers in tests.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique within the day it belongs to. Immutable.
    pub id: TodoId,
    /// Trimmed, non-empty description. Immutable after creation.
    pub text: String,
    /// Whether the item is done.
    pub completed: bool,
}

impl TodoItem {
    /// Creates a fresh, uncompleted item.
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// One day's items; insertion order is display order.
///
/// A day holds at most [`MAX_TODOS_PER_DAY`] items, so the list fits
/// inline.
pub type TodoList = SmallVec<[TodoItem; MAX_TODOS_PER_DAY]>;

/// Errors raised when adding a todo.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoError {
    /// The todo text was empty after trimming.
    #[error("todo text must not be empty")]
    EmptyText,

    /// The day already holds the maximum number of items.
    #[error("a day holds at most {MAX_TODOS_PER_DAY} todos")]
    CapacityExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_start_uncompleted() {
        let item = TodoItem::new(TodoId::new(7), "Buy milk");
        assert_eq!(item.id.as_i64(), 7);
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
    }

    #[test]
    fn todo_id_serializes_as_a_bare_number() {
        let json = serde_json::to_string(&TodoItem::new(TodoId::new(42), "x"))
            .unwrap_or_default();
        assert_eq!(json, r#"{"id":42,"text":"x","completed":false}"#);
    }
}
