//! Console demo for the calendar to-do widget.
//!
//! Wires a store to a terminal renderer through the presenter, then
//! walks through the day-to-day operations: add, toggle, delete, and
//! month navigation.

use std::sync::Arc;

use headless_widgets_core::calendar::DateKey;
use headless_widgets_core::storage::{KeyValueStore, MemoryStore};
use todo_widget::{CalendarView, Renderer, TodoEnvironment, TodoPresenter, TodoStore};

struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &CalendarView) {
        println!("\n      {}", view.title);
        println!(" Su  Mo  Tu  We  Th  Fr  Sa");

        for week in view.cells.chunks(7) {
            let row: Vec<String> = week
                .iter()
                .map(|cell| {
                    let mark = if cell.selected {
                        '*'
                    } else if cell.today {
                        '.'
                    } else if cell.has_todos {
                        '+'
                    } else {
                        ' '
                    };
                    format!("{:>2}{}", cell.day, mark)
                })
                .collect();
            println!(" {}", row.join(" "));
        }

        println!("\n{}", view.selected_title);
        if view.items.is_empty() {
            println!("  (no todos)");
        }
        for item in &view.items {
            let status = if item.completed { "x" } else { " " };
            println!("  [{}] {}", status, item.text);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().compact().init();

    println!("=== Calendar To-do Demo ===");

    let storage = Arc::new(MemoryStore::new());
    let env = TodoEnvironment::production(Arc::clone(&storage) as Arc<dyn KeyValueStore>);
    let clock = Arc::clone(&env.clock);

    let mut store = TodoStore::new(env);
    TodoPresenter::attach(&mut store, clock, TerminalRenderer);
    store.init();

    let key = DateKey::from_date(store.selected_date());

    let milk = store.add_todo(&key, "Buy milk")?;
    let docs = store.add_todo(&key, "Write documentation")?;
    store.add_todo(&key, "Water the plants")?;

    store.toggle_todo(&key, milk);
    store.delete_todo(&key, docs);

    // The presentation layer surfaces validation failures to the user.
    if let Err(error) = store.add_todo(&key, "   ") {
        println!("\nrejected: {error}");
    }

    // Flip to the next month and back.
    store.step_month(1);
    store.step_month(-1);

    if let Some(persisted) = storage.get(todo_widget::STORAGE_KEY)? {
        println!("\npersisted under \"todos\": {persisted}");
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
