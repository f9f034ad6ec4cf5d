//! Drag Overlay Component
//!
//! Floating copy of the dragged card that follows the pointer.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DragOverlay(dnd: DndSignals) -> impl IntoView {
    let store = use_app_store();

    let content = move || store.board().read().active_task().map(|t| t.content.clone());
    let position = move || {
        let p = dnd.pointer_read.get().unwrap_or_default();
        format!("left: {}px; top: {}px;", p.x, p.y)
    };

    view! {
        <Show when=move || content().is_some() && dnd.pointer_read.get().is_some()>
            <div class="drag-overlay" style=position>
                {content}
            </div>
        </Show>
    }
}
