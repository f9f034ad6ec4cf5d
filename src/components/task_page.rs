//! Task Page
//!
//! Add and edit tasks, reorder them within and across two boards.

use leptos::prelude::*;
use leptos_dragdrop::*;
use reactive_stores::Store;

use crate::board::TaskBoard;
use crate::components::{BoardColumn, DragOverlay, EditModal, NewTaskForm};
use crate::config::AppConfig;
use crate::models::Board;
use crate::store::{AppState, AppStateStoreFields, StoreDragHandler};

fn empty_boards() -> TaskBoard {
    let boards = vec![
        Board::new("board-1", "Board 1", Vec::new()),
        Board::new("board-2", "Board 2", Vec::new()),
    ];
    TaskBoard::new(boards).unwrap_or_else(|e| {
        log::error!("[APP] Bad board layout: {}", e);
        TaskBoard::default()
    })
}

#[component]
pub fn TaskPage(config: AppConfig) -> impl IntoView {
    let board = empty_boards();
    let columns: Vec<(String, String)> = board
        .boards()
        .iter()
        .map(|b| (b.id.clone(), b.title.clone()))
        .collect();

    let store = Store::new(AppState::new(board));
    provide_context(store);

    // Cards are clickable, so presses need a hold before they drag
    let dnd = create_dnd_signals(config.sensors_or(SensorConfig::delayed()));
    bind_dnd(dnd, StoreDragHandler::new(store));

    view! {
        <div class=move || if store.board().read().is_dragging() { "task-page dragging" } else { "task-page" }>
            <NewTaskForm />
            <div class="board-grid">
                {columns
                    .into_iter()
                    .map(|(id, title)| {
                        view! {
                            <BoardColumn board_id=id title=title dnd=dnd editable=true droppable=true />
                        }
                    })
                    .collect_view()}
            </div>
            <p class="item-count">{move || format!("{} tasks", store.board().read().task_count())}</p>
            <DragOverlay dnd=dnd />
            <EditModal />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_board_receives_new_tasks() {
        let mut board = empty_boards();
        let id = board.add_item("first").unwrap();
        assert_eq!(board.board("board-1").unwrap().tasks[0].id, id);
        assert!(board.board("board-2").unwrap().tasks.is_empty());
    }
}
