//! Store events and the snapshot payload observers receive.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use headless_widgets_core::calendar::DateKey;

use crate::types::{TodoId, TodoItem, TodoList};

/// What changed in the store.
///
/// Every notification also carries a [`TodoSnapshot`]; the event adds
/// the fields specific to the change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoEvent {
    /// First notification, emitted once the host finished subscribing.
    Init,

    /// The displayed month anchor was replaced.
    CurrentDateChanged,

    /// The selected day was replaced within the displayed month.
    ///
    /// A selection that crosses a month boundary emits
    /// [`TodoEvent::CurrentDateChanged`] instead — never both.
    SelectedDateChanged,

    /// A todo was appended to a day's list.
    TodoAdded {
        /// Day the item was added to.
        date_key: DateKey,
        /// The freshly created item.
        todo: TodoItem,
    },

    /// A todo was removed.
    TodoDeleted {
        /// Day the item was removed from.
        date_key: DateKey,
        /// Identifier of the removed item.
        id: TodoId,
    },

    /// A todo's completed flag flipped.
    TodoToggled {
        /// Day the item belongs to.
        date_key: DateKey,
        /// Identifier of the toggled item.
        id: TodoId,
        /// The flag's new value.
        completed: bool,
    },
}

impl TodoEvent {
    /// Stable event name for logs and ordering assertions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CurrentDateChanged => "currentDateChanged",
            Self::SelectedDateChanged => "selectedDateChanged",
            Self::TodoAdded { .. } => "todoAdded",
            Self::TodoDeleted { .. } => "todoDeleted",
            Self::TodoToggled { .. } => "todoToggled",
        }
    }
}

/// Owned copy of store state, delivered with every event.
///
/// Mutating a snapshot never affects the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoSnapshot {
    /// Anchor of the displayed month.
    pub current_date: NaiveDate,
    /// The day whose list is shown.
    pub selected_date: NaiveDate,
    /// Every day with at least one item.
    pub todos: BTreeMap<DateKey, TodoList>,
}

impl TodoSnapshot {
    /// The list for `key`, empty when the day has none.
    #[must_use]
    pub fn todos_for(&self, key: &DateKey) -> TodoList {
        self.todos.get(key).cloned().unwrap_or_default()
    }
}
