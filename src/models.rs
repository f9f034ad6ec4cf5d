//! Frontend Models
//!
//! Task and board data held by the board controller.

/// A task card
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub content: String,
    /// Freshly added, still playing its entry animation
    pub is_new: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            is_new: false,
        }
    }
}

/// A titled column of tasks
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: String,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks,
        }
    }

    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}
