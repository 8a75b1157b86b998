//! The date-indexed todo store.
//!
//! Owns the mapping from [`DateKey`] to a day's items plus the two
//! calendar cursors (`current_date`, `selected_date`). Every mutation
//! runs to completion: validate, mutate, persist, notify — in that
//! order, synchronously. Failed mutations leave the mapping untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use headless_widgets_core::calendar::{DateKey, GridMonth};
use headless_widgets_core::environment::{Clock, IdGenerator, SystemClock, TimestampIdGenerator};
use headless_widgets_core::observe::Observers;
use headless_widgets_core::storage::KeyValueStore;

use crate::events::{TodoEvent, TodoSnapshot};
use crate::types::{MAX_TODOS_PER_DAY, TodoError, TodoId, TodoItem, TodoList};

/// Storage key the todo mapping persists under.
pub const STORAGE_KEY: &str = "todos";

/// Injected dependencies for [`TodoStore`].
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of "today" for the default cursors.
    pub clock: Arc<dyn Clock>,
    /// Source of fresh item ids.
    pub ids: Arc<dyn IdGenerator>,
    /// Persistence collaborator.
    pub storage: Arc<dyn KeyValueStore>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            clock,
            ids,
            storage,
        }
    }

    /// Production environment: system clock and timestamp ids.
    #[must_use]
    pub fn production(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(TimestampIdGenerator::new()),
            storage,
        )
    }
}

/// The calendar to-do store.
///
/// Constructed once per host session; state is mutated only through its
/// methods. External collaborators (rendering, persistence) never hold a
/// reference into the internal mapping — reads hand out copies.
pub struct TodoStore {
    current_date: NaiveDate,
    selected_date: NaiveDate,
    todos_by_date: BTreeMap<DateKey, TodoList>,
    observers: Observers<TodoEvent, TodoSnapshot>,
    environment: TodoEnvironment,
    storage_key: String,
}

impl TodoStore {
    /// Creates a store, loading persisted state from [`STORAGE_KEY`].
    ///
    /// Construction never fails: an absent, unreadable, or malformed
    /// persisted value yields an empty mapping. Both cursors start at
    /// the clock's local today.
    #[must_use]
    pub fn new(environment: TodoEnvironment) -> Self {
        Self::with_storage_key(environment, STORAGE_KEY)
    }

    /// Creates a store persisting under a custom storage key.
    #[must_use]
    pub fn with_storage_key(environment: TodoEnvironment, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let todos_by_date = load_todos(environment.storage.as_ref(), &storage_key);
        let today = environment.clock.today();

        Self {
            current_date: today,
            selected_date: today,
            todos_by_date,
            observers: Observers::new(),
            environment,
            storage_key,
        }
    }

    /// Emits [`TodoEvent::Init`] so freshly attached subscribers can
    /// render the loaded state. Call after subscribing.
    pub fn init(&mut self) {
        self.emit(TodoEvent::Init);
    }

    /// Registers a callback invoked synchronously, in subscription
    /// order, on every event. The payload always carries a full
    /// [`TodoSnapshot`].
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&TodoEvent, &TodoSnapshot) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// Anchor of the displayed month.
    #[must_use]
    pub const fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// The day whose list is displayed.
    #[must_use]
    pub const fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Defensive copy of the full mapping.
    #[must_use]
    pub fn todos(&self) -> BTreeMap<DateKey, TodoList> {
        self.todos_by_date.clone()
    }

    /// The list for `key`, empty when the day has none.
    ///
    /// The returned list is a copy — mutating it does not touch the
    /// store.
    #[must_use]
    pub fn todos_for(&self, key: &DateKey) -> TodoList {
        self.todos_by_date.get(key).cloned().unwrap_or_default()
    }

    /// How many more items `key`'s day accepts.
    #[must_use]
    pub fn remaining_capacity(&self, key: &DateKey) -> usize {
        let used = self.todos_by_date.get(key).map_or(0, |list| list.len());
        MAX_TODOS_PER_DAY.saturating_sub(used)
    }

    /// Replaces the displayed month anchor and emits
    /// [`TodoEvent::CurrentDateChanged`].
    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.current_date = date;
        self.emit(TodoEvent::CurrentDateChanged);
    }

    /// Replaces the selected day.
    ///
    /// Selecting into a different month also moves the displayed month;
    /// that path emits only [`TodoEvent::CurrentDateChanged`]. Staying
    /// inside the month emits only [`TodoEvent::SelectedDateChanged`].
    /// Never both.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;

        if (self.current_date.year(), self.current_date.month()) != (date.year(), date.month()) {
            self.set_current_date(date);
        } else {
            self.emit(TodoEvent::SelectedDateChanged);
        }
    }

    /// Steps the displayed month backwards or forwards without touching
    /// the selection (the prev/next month buttons).
    #[allow(clippy::cast_possible_wrap)] // month0 is 0..=11
    pub fn step_month(&mut self, months: i32) {
        let anchor = GridMonth::of(self.current_date);
        let target = GridMonth::new(anchor.year(), anchor.month0() as i32 + months);
        self.set_current_date(target.first_day());
    }

    /// Appends a new item to `key`'s list.
    ///
    /// All-or-nothing: on failure the mapping is untouched and nothing
    /// is emitted or persisted.
    ///
    /// # Errors
    ///
    /// [`TodoError::EmptyText`] when `text` trims to nothing;
    /// [`TodoError::CapacityExceeded`] when the day already holds
    /// [`MAX_TODOS_PER_DAY`] items.
    #[tracing::instrument(skip(self, text), fields(key = %key))]
    pub fn add_todo(&mut self, key: &DateKey, text: &str) -> Result<TodoId, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }
        if self
            .todos_by_date
            .get(key)
            .is_some_and(|list| list.len() >= MAX_TODOS_PER_DAY)
        {
            return Err(TodoError::CapacityExceeded);
        }

        let todo = TodoItem::new(TodoId::new(self.environment.ids.next_id()), text);
        let id = todo.id;
        self.todos_by_date
            .entry(key.clone())
            .or_default()
            .push(todo.clone());

        self.persist();
        self.emit(TodoEvent::TodoAdded {
            date_key: key.clone(),
            todo,
        });
        Ok(id)
    }

    /// Removes the item `id` from `key`'s list.
    ///
    /// Unknown keys and ids are silently ignored — nothing is emitted
    /// (deliberate, matching the original behavior). Deleting the last
    /// item drops the day from the mapping entirely.
    #[tracing::instrument(skip(self), fields(key = %key, id = %id))]
    pub fn delete_todo(&mut self, key: &DateKey, id: TodoId) {
        let Some(list) = self.todos_by_date.get_mut(key) else {
            return;
        };
        let Some(index) = list.iter().position(|todo| todo.id == id) else {
            return;
        };

        list.remove(index);
        if list.is_empty() {
            self.todos_by_date.remove(key);
        }

        self.persist();
        self.emit(TodoEvent::TodoDeleted {
            date_key: key.clone(),
            id,
        });
    }

    /// Flips the completed flag of the item `id` under `key`.
    ///
    /// Unknown keys and ids are silently ignored — nothing is emitted.
    #[tracing::instrument(skip(self), fields(key = %key, id = %id))]
    pub fn toggle_todo(&mut self, key: &DateKey, id: TodoId) {
        let Some(todo) = self
            .todos_by_date
            .get_mut(key)
            .and_then(|list| list.iter_mut().find(|todo| todo.id == id))
        else {
            return;
        };

        todo.completed = !todo.completed;
        let completed = todo.completed;

        self.persist();
        self.emit(TodoEvent::TodoToggled {
            date_key: key.clone(),
            id,
            completed,
        });
    }

    /// Serializes the full mapping to the storage collaborator.
    ///
    /// Fire-and-forget: failures are logged and dropped, state stays
    /// in memory.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.todos_by_date) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize todos; skipping persist");
                return;
            }
        };

        if let Err(error) = self.environment.storage.set(&self.storage_key, &json) {
            tracing::warn!(key = %self.storage_key, %error, "failed to persist todos");
        }
    }

    fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            current_date: self.current_date,
            selected_date: self.selected_date,
            todos: self.todos_by_date.clone(),
        }
    }

    fn emit(&mut self, event: TodoEvent) {
        let snapshot = self.snapshot();
        tracing::debug!(event = event.name(), "notifying observers");
        self.observers.notify(&event, &snapshot);
    }
}

fn load_todos(storage: &dyn KeyValueStore, key: &str) -> BTreeMap<DateKey, TodoList> {
    let content = match storage.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return BTreeMap::new(),
        Err(error) => {
            tracing::warn!(key, %error, "failed to read persisted todos; starting empty");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(todos) => todos,
        Err(error) => {
            tracing::warn!(key, %error, "persisted todos are malformed; starting empty");
            BTreeMap::new()
        }
    }
}
