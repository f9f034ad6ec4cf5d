//! Sortable List Page
//!
//! Three seeded cards, drag to reorder. No adding or editing.

use leptos::prelude::*;
use leptos_dragdrop::*;
use reactive_stores::Store;

use crate::board::TaskBoard;
use crate::components::{BoardColumn, DragOverlay};
use crate::config::AppConfig;
use crate::models::Task;
use crate::store::{AppState, StoreDragHandler};

fn seed_board() -> TaskBoard {
    let tasks = (1..=3)
        .map(|n| Task::new(format!("task-{}", n), format!("Task {}", n)))
        .collect();
    TaskBoard::single(tasks).unwrap_or_else(|e| {
        log::error!("[APP] Bad seed tasks: {}", e);
        TaskBoard::default()
    })
}

#[component]
pub fn ListPage(config: AppConfig) -> impl IntoView {
    let board = seed_board();
    let board_id = board.boards().first().map(|b| b.id.clone()).unwrap_or_default();

    let store = Store::new(AppState::new(board));
    provide_context(store);

    let dnd = create_dnd_signals(config.sensors_or(SensorConfig::list()));
    bind_dnd(dnd, StoreDragHandler::new(store));

    view! {
        <div class="task-list">
            <BoardColumn board_id=board_id dnd=dnd />
        </div>
        <DragOverlay dnd=dnd />
    }
}
