//! Task Card Component
//!
//! A draggable card. While it is being dragged the card keeps its slot but
//! turns invisible; the overlay shows it under the pointer.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::board::Placement;
use crate::models::Task;
use crate::store::{store_open_edit, use_app_store, AppStateStoreFields};

#[component]
pub fn TaskCard(
    task: Task,
    /// Board the card is rendered in
    board_id: String,
    dnd: DndSignals,
    /// Click opens the edit dialog
    editable: bool,
) -> impl IntoView {
    let store = use_app_store();
    let id = task.id.clone();
    let is_new = task.is_new;

    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_touchstart = make_on_touchstart(dnd, id.clone());

    let card_class = {
        let id = id.clone();
        move || {
            let mut c = String::from("task-card");
            if is_new { c.push_str(" animate-fade-in"); }
            let active = dnd.active_id_read.get();
            let over = dnd.over_read.get();
            if let (Some(active), Some(DropTarget::Item(over_id))) = (active, over) {
                if over_id == id {
                    match store.board().read().placement(&active, &id) {
                        Some(Placement::Before) => c.push_str(" drop-target drop-before"),
                        Some(Placement::After) => c.push_str(" drop-target drop-after"),
                        None => {}
                    }
                }
            }
            c
        }
    };

    // Source slot stays in place, hidden, while the overlay shows the card
    let card_style = {
        let id = id.clone();
        move || {
            let hidden = store.board().read().active_id() == Some(id.as_str());
            if hidden { "opacity: 0;" } else { "opacity: 1;" }
        }
    };

    let on_click = {
        let id = id.clone();
        move |_| {
            // Releasing a drag also fires click
            if editable && !dnd.drag_just_ended_read.get_untracked() {
                store_open_edit(&store, &id);
            }
        }
    };

    view! {
        <div
            class=card_class
            style=card_style
            data-dnd-item=id
            data-dnd-parent=board_id
            on:mousedown=on_mousedown
            on:touchstart=on_touchstart
            on:click=on_click
        >
            {task.content}
        </div>
    }
}
