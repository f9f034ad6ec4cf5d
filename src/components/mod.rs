//! UI Components
//!
//! Leptos components for the board pages.

mod board_column;
mod drag_overlay;
mod edit_modal;
mod list_page;
mod new_task_form;
mod task_card;
mod task_page;

pub use board_column::BoardColumn;
pub use drag_overlay::DragOverlay;
pub use edit_modal::EditModal;
pub use list_page::ListPage;
pub use new_task_form::NewTaskForm;
pub use task_card::TaskCard;
pub use task_page::TaskPage;
