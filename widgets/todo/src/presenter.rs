//! Projection of store state into a renderable calendar view.
//!
//! The presenter is wiring only: it subscribes once, and on every event
//! derives a [`CalendarView`] from the snapshot and hands it to the
//! rendering collaborator. No business decisions happen here.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use headless_widgets_core::calendar::{DateKey, GridMonth, month_grid};
use headless_widgets_core::environment::Clock;

use crate::events::TodoSnapshot;
use crate::store::TodoStore;
use crate::types::TodoItem;

/// Rendering collaborator the presenter drives.
///
/// Implementations draw however they like — a terminal, a DOM bridge, a
/// test buffer. They receive a fully derived view and keep no store
/// references.
pub trait Renderer {
    /// Draws one frame. Called after every store event.
    fn render(&mut self, view: &CalendarView);
}

/// One day cell, ready to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    /// Date the cell shows.
    pub date: NaiveDate,
    /// Day-of-month number for the cell label.
    pub day: u32,
    /// Spillover day from an adjacent month.
    pub other_month: bool,
    /// The cell is the local calendar's today.
    pub today: bool,
    /// The cell is the selected day.
    pub selected: bool,
    /// The day has at least one todo.
    pub has_todos: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarView {
    /// Month heading, e.g. "June 2025".
    pub title: String,
    /// The 42 day cells of the displayed month.
    pub cells: Vec<DayCell>,
    /// Selected-day heading, e.g. "Sunday, June 15, 2025".
    pub selected_title: String,
    /// The selected day's items, in display order.
    pub items: Vec<TodoItem>,
}

impl CalendarView {
    /// Pure projection of a snapshot (plus "today") into a view.
    #[must_use]
    pub fn project(snapshot: &TodoSnapshot, today: NaiveDate) -> Self {
        let anchor = GridMonth::of(snapshot.current_date);
        let cells = month_grid(anchor)
            .into_iter()
            .map(|cell| {
                let key = DateKey::from_date(cell.date);
                DayCell {
                    date: cell.date,
                    day: cell.date.day(),
                    other_month: cell.other_month,
                    today: cell.date == today,
                    selected: cell.date == snapshot.selected_date,
                    has_todos: snapshot
                        .todos
                        .get(&key)
                        .is_some_and(|list| !list.is_empty()),
                }
            })
            .collect();

        Self {
            title: snapshot.current_date.format("%B %Y").to_string(),
            cells,
            selected_title: snapshot
                .selected_date
                .format("%A, %B %-d, %Y")
                .to_string(),
            items: snapshot
                .todos_for(&DateKey::from_date(snapshot.selected_date))
                .to_vec(),
        }
    }
}

/// Couples a [`Renderer`] to a [`TodoStore`].
pub struct TodoPresenter;

impl TodoPresenter {
    /// Subscribes `renderer` to `store`. Attach before `store.init()` so
    /// the `Init` event produces the first frame.
    pub fn attach<R>(store: &mut TodoStore, clock: Arc<dyn Clock>, mut renderer: R)
    where
        R: Renderer + 'static,
    {
        store.subscribe(move |_event, snapshot| {
            let view = CalendarView::project(snapshot, clock.today());
            renderer.render(&view);
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::TodoEnvironment;
    use headless_widgets_core::calendar::GRID_CELLS;
    use headless_widgets_core::storage::MemoryStore;
    use headless_widgets_testing::mocks::{FixedClock, SequentialIdGenerator};
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn snapshot_with_todo_on(day: NaiveDate) -> TodoSnapshot {
        let mut todos = BTreeMap::new();
        todos.insert(
            DateKey::from_date(day),
            [crate::types::TodoItem::new(crate::types::TodoId::new(1), "Buy milk")]
                .into_iter()
                .collect(),
        );
        TodoSnapshot {
            current_date: ymd(2025, 6, 10),
            selected_date: ymd(2025, 6, 15),
            todos,
        }
    }

    #[test]
    fn projects_titles_and_cell_flags() {
        let today = ymd(2025, 6, 10);
        let view = CalendarView::project(&snapshot_with_todo_on(ymd(2025, 6, 15)), today);

        assert_eq!(view.title, "June 2025");
        assert_eq!(view.selected_title, "Sunday, June 15, 2025");
        assert_eq!(view.cells.len(), GRID_CELLS);

        // June 2025 starts on a Sunday: cell 0 is June 1st.
        assert_eq!(view.cells[0].date, ymd(2025, 6, 1));
        assert!(!view.cells[0].other_month);

        let today_cell = view.cells.iter().find(|c| c.today).unwrap();
        assert_eq!(today_cell.date, today);

        let selected_cell = view.cells.iter().find(|c| c.selected).unwrap();
        assert_eq!(selected_cell.date, ymd(2025, 6, 15));
        assert!(selected_cell.has_todos);

        assert_eq!(view.cells.iter().filter(|c| c.has_todos).count(), 1);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].text, "Buy milk");
    }

    #[test]
    fn selection_outside_the_displayed_month_marks_no_cell() {
        let mut snapshot = snapshot_with_todo_on(ymd(2025, 6, 15));
        snapshot.current_date = ymd(2025, 9, 1);

        let view = CalendarView::project(&snapshot, ymd(2025, 9, 2));
        assert_eq!(view.title, "September 2025");
        assert!(view.cells.iter().all(|c| !c.selected));
        // The selected day's list still renders below the grid.
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn attached_renderer_draws_on_every_event() {
        let clock = FixedClock::on_date(ymd(2025, 6, 10));
        let env = TodoEnvironment::new(
            Arc::new(clock),
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(MemoryStore::new()),
        );
        let mut store = TodoStore::new(env);

        struct Frames(Rc<RefCell<Vec<CalendarView>>>);
        impl Renderer for Frames {
            fn render(&mut self, view: &CalendarView) {
                self.0.borrow_mut().push(view.clone());
            }
        }

        let frames = Rc::new(RefCell::new(Vec::new()));
        TodoPresenter::attach(&mut store, Arc::new(clock), Frames(Rc::clone(&frames)));

        store.init();
        store
            .add_todo(&DateKey::from_date(ymd(2025, 6, 10)), "Buy milk")
            .unwrap();

        let frames = frames.borrow();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].items.is_empty());
        assert_eq!(frames[1].items.len(), 1);
        assert!(frames[1].cells.iter().any(|c| c.has_todos && c.today));
    }
}
