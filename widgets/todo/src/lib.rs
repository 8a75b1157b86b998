//! Calendar to-do widget core.
//!
//! A date-indexed todo store coupled to a calendar-grid presenter
//! through a synchronous observer loop. Rendering stays outside: hosts
//! implement [`Renderer`], subscribe through [`TodoPresenter`], and feed
//! user interactions into the store's methods.
//!
//! - Each day holds at most five items, in insertion order
//! - State persists as one JSON document in a key-value collaborator,
//!   loaded fail-soft at construction
//! - Every mutation notifies subscribers synchronously with the event
//!   and a snapshot of the whole store
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use headless_widgets_core::calendar::DateKey;
//! use headless_widgets_core::storage::MemoryStore;
//! use todo_widget::{TodoEnvironment, TodoStore};
//!
//! # fn main() -> Result<(), todo_widget::TodoError> {
//! let mut store = TodoStore::new(TodoEnvironment::production(Arc::new(MemoryStore::new())));
//!
//! store.subscribe(|event, snapshot| {
//!     println!("{}: {} days have todos", event.name(), snapshot.todos.len());
//! });
//! store.init();
//!
//! let key = DateKey::from_date(store.selected_date());
//! let id = store.add_todo(&key, "Buy milk")?;
//! store.toggle_todo(&key, id);
//! store.delete_todo(&key, id);
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod presenter;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use events::{TodoEvent, TodoSnapshot};
pub use presenter::{CalendarView, DayCell, Renderer, TodoPresenter};
pub use store::{STORAGE_KEY, TodoEnvironment, TodoStore};
pub use types::{MAX_TODOS_PER_DAY, TodoError, TodoId, TodoItem, TodoList};
