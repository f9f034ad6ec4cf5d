//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use leptos_dragdrop::{DragHandler, DropTarget};
use reactive_stores::Store;

use crate::board::{DropOutcome, TaskBoard};

/// Page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Boards plus drag and edit sessions
    pub board: TaskBoard,
    /// Text of the "add task" input
    pub new_task_text: String,
}

impl AppState {
    pub fn new(board: TaskBoard) -> Self {
        Self {
            board,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Add a task from the input text; the input is cleared only when the task was accepted
pub fn store_add_task(store: &AppStore) -> Option<String> {
    let text = store.new_task_text().get_untracked();
    let added = store.board().write().add_item(&text);
    match &added {
        Some(id) => {
            log::info!("[BOARD] Added {}", id);
            store.new_task_text().write().clear();
        }
        None => log::debug!("[BOARD] Rejected blank task"),
    }
    added
}

/// Reset the "new" flags once the animation of add `generation` is over
pub fn store_clear_new_flags(store: &AppStore, generation: u64) {
    if store.board().read_untracked().has_new_items() {
        store.board().write().clear_new_flags(generation);
    }
}

pub fn store_open_edit(store: &AppStore, task_id: &str) {
    store.board().write().open_edit(task_id);
}

pub fn store_set_draft(store: &AppStore, draft: String) {
    store.board().write().set_draft(draft);
}

pub fn store_save_edit(store: &AppStore) {
    if store.board().write().save_edit() {
        log::info!("[BOARD] Saved edit");
    }
}

pub fn store_cancel_edit(store: &AppStore) {
    if store.board().read_untracked().edit_session().is_some() {
        store.board().write().cancel_edit();
    }
}

/// Routes gesture events from leptos-dragdrop into the board controller
#[derive(Clone, Copy)]
pub struct StoreDragHandler {
    store: AppStore,
}

impl StoreDragHandler {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }
}

impl DragHandler for StoreDragHandler {
    fn drag_start(&self, id: &str) {
        self.store.board().write().on_drag_start(id);
    }

    fn drag_over(&self, id: &str, target: Option<&DropTarget>) {
        let slot = self.store.board().read_untracked().candidate_slot(id, target);
        log::trace!("[DND] {} over {:?}, would land at {:?}", id, target, slot);
    }

    fn drag_end(&self, id: &str, over: Option<DropTarget>) {
        match self.store.board().write().on_drag_end(id, over.as_ref()) {
            DropOutcome::Moved { from, to } => {
                log::info!("[BOARD] Moved {} from {}#{} to {}#{}", id, from.board_id, from.index, to.board_id, to.index)
            }
            DropOutcome::Unchanged => {}
            // Already logged by the controller
            DropOutcome::Stale(_) => {}
        }
    }
}
