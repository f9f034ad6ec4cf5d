//! Board Column Component
//!
//! One board: optional title plus its cards in order.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::TaskCard;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardColumn(
    board_id: String,
    #[prop(optional, into)] title: Option<String>,
    dnd: DndSignals,
    /// Cards open the edit dialog on click
    #[prop(optional)]
    editable: bool,
    /// The board body accepts drops when no card is near the pointer
    #[prop(optional)]
    droppable: bool,
) -> impl IntoView {
    let store = use_app_store();

    let tasks = {
        let board_id = board_id.clone();
        move || {
            store
                .board()
                .read()
                .board(&board_id)
                .map(|b| b.tasks.clone())
                .unwrap_or_default()
        }
    };

    let column_class = {
        let board_id = board_id.clone();
        move || {
            let is_target = matches!(dnd.over_read.get(), Some(DropTarget::Container(ref bid)) if *bid == board_id);
            if is_target { "board drop-target" } else { "board" }
        }
    };

    let card_board_id = board_id.clone();

    view! {
        <div class=column_class data-dnd-container=droppable.then(|| board_id.clone())>
            {title.map(|t| view! { <h2 class="board-title">{t}</h2> })}
            <div class="board-tasks">
                <For
                    each=tasks
                    // Content and flags are part of the key so edits re-render
                    key=|task| (task.id.clone(), task.content.clone(), task.is_new)
                    children=move |task| {
                        view! {
                            <TaskCard
                                task=task
                                board_id=card_board_id.clone()
                                dnd=dnd
                                editable=editable
                            />
                        }
                    }
                />
            </div>
        </div>
    }
}
