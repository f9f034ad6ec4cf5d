//! Task Board Controller
//!
//! Owns the ordered boards, the drag session and the edit session.
//! Every operation is total: references to tasks or boards that no longer
//! exist leave the state untouched.

use leptos_dragdrop::DropTarget;
use thiserror::Error;

use crate::models::{Board, Task};
use crate::reorder::array_move;

/// Reasons an operation could not apply
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),
    #[error("duplicate board id: {0}")]
    DuplicateBoardId(String),
    #[error("unknown task: {0}")]
    UnknownTask(String),
    #[error("unknown board: {0}")]
    UnknownBoard(String),
}

/// A position on a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub board_id: String,
    pub index: usize,
}

/// Result of a completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved { from: Slot, to: Slot },
    /// No target, dropped on itself, or dropped on its own board's container
    Unchanged,
    /// The gesture referenced something that is gone; nothing changed
    Stale(BoardError),
}

/// Where a drop indicator sits relative to the hovered card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Open edit dialog state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target_id: String,
    pub draft: String,
}

/// (board index, task index)
type Location = (usize, usize);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    boards: Vec<Board>,
    active_id: Option<String>,
    edit: Option<EditSession>,
    next_id: usize,
    /// Bumped on every add; a flag reset only applies to the latest add
    new_generation: u64,
}

impl TaskBoard {
    /// Build a controller, rejecting duplicate board or task ids
    pub fn new(boards: Vec<Board>) -> Result<Self, BoardError> {
        let mut board_ids = std::collections::HashSet::new();
        let mut task_ids = std::collections::HashSet::new();
        for board in &boards {
            if !board_ids.insert(board.id.as_str()) {
                return Err(BoardError::DuplicateBoardId(board.id.clone()));
            }
            for task in &board.tasks {
                if !task_ids.insert(task.id.as_str()) {
                    return Err(BoardError::DuplicateTaskId(task.id.clone()));
                }
            }
        }
        let next_id = task_ids.len();
        Ok(Self {
            boards,
            active_id: None,
            edit: None,
            next_id,
            new_generation: 0,
        })
    }

    /// Single-list variant
    pub fn single(tasks: Vec<Task>) -> Result<Self, BoardError> {
        Self::new(vec![Board::new("board-1", "Board 1", tasks)])
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.locate(task_id).ok().map(|(b, t)| &self.boards[b].tasks[t])
    }

    pub fn task_count(&self) -> usize {
        self.boards.iter().map(|b| b.tasks.len()).sum()
    }

    /// Id of the card being dragged
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The dragged task, for overlay rendering
    pub fn active_task(&self) -> Option<&Task> {
        self.active_id.as_deref().and_then(|id| self.task(id))
    }

    pub fn is_dragging(&self) -> bool {
        self.active_id.is_some()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    fn locate(&self, task_id: &str) -> Result<Location, BoardError> {
        self.boards
            .iter()
            .enumerate()
            .find_map(|(b, board)| board.position(task_id).map(|t| (b, t)))
            .ok_or_else(|| BoardError::UnknownTask(task_id.to_string()))
    }

    fn board_index(&self, board_id: &str) -> Result<usize, BoardError> {
        self.boards
            .iter()
            .position(|b| b.id == board_id)
            .ok_or_else(|| BoardError::UnknownBoard(board_id.to_string()))
    }

    fn slot(&self, (b, t): Location) -> Slot {
        Slot {
            board_id: self.boards[b].id.clone(),
            index: t,
        }
    }

    // ========================
    // Drag session
    // ========================

    /// Begin a drag session. Unknown ids are ignored.
    ///
    /// Only one session exists at a time; the gesture layer never starts a
    /// second drag before ending the first.
    pub fn on_drag_start(&mut self, task_id: &str) -> bool {
        if self.locate(task_id).is_err() {
            log::debug!("[BOARD] Ignoring drag start for unknown task {}", task_id);
            return false;
        }
        self.active_id = Some(task_id.to_string());
        true
    }

    /// Work out the move a drop would make, without applying it
    fn plan_drop(&self, active_id: &str, over: Option<&DropTarget>) -> Result<Option<(Location, Location)>, BoardError> {
        let Some(over) = over else { return Ok(None) };
        let from = self.locate(active_id)?;
        let to = match over {
            DropTarget::Item(over_id) if over_id == active_id => return Ok(None),
            DropTarget::Item(over_id) => self.locate(over_id)?,
            DropTarget::Container(board_id) => {
                let b = self.board_index(board_id)?;
                if b == from.0 {
                    return Ok(None);
                }
                (b, self.boards[b].tasks.len())
            }
        };
        Ok(Some((from, to)))
    }

    /// Finish the drag session, moving `active_id` onto `over` when valid.
    ///
    /// The session is cleared whatever the outcome.
    pub fn on_drag_end(&mut self, active_id: &str, over: Option<&DropTarget>) -> DropOutcome {
        self.active_id = None;

        let (from, to) = match self.plan_drop(active_id, over) {
            Ok(Some(plan)) => plan,
            Ok(None) => return DropOutcome::Unchanged,
            Err(e) => {
                log::debug!("[BOARD] Ignoring stale drop: {}", e);
                return DropOutcome::Stale(e);
            }
        };

        let outcome = DropOutcome::Moved {
            from: self.slot(from),
            to: self.slot(to),
        };
        if from.0 == to.0 {
            array_move(&mut self.boards[from.0].tasks, from.1, to.1);
        } else {
            let task = self.boards[from.0].tasks.remove(from.1);
            let dest = &mut self.boards[to.0].tasks;
            let index = to.1.min(dest.len());
            dest.insert(index, task);
        }
        outcome
    }

    /// Slot the dragged card would land in if dropped on `over` now
    pub fn candidate_slot(&self, active_id: &str, over: Option<&DropTarget>) -> Option<Slot> {
        self.plan_drop(active_id, over)
            .ok()
            .flatten()
            .map(|(_, to)| self.slot(to))
    }

    /// Side of `over_id` the dragged card would be inserted on
    pub fn placement(&self, active_id: &str, over_id: &str) -> Option<Placement> {
        let target = DropTarget::Item(over_id.to_string());
        let (from, to) = self.plan_drop(active_id, Some(&target)).ok().flatten()?;
        if from.0 == to.0 && from.1 < to.1 {
            Some(Placement::After)
        } else {
            Some(Placement::Before)
        }
    }

    // ========================
    // Items
    // ========================

    fn fresh_id(&mut self) -> String {
        loop {
            let candidate = format!("task-{}", self.next_id);
            self.next_id += 1;
            if self.locate(&candidate).is_err() {
                return candidate;
            }
        }
    }

    /// Append a task to the first board. Blank content is rejected.
    pub fn add_item(&mut self, content: &str) -> Option<String> {
        let board_id = self.boards.first()?.id.clone();
        self.add_item_to(&board_id, content)
    }

    /// Append a task to `board_id`. Blank content or an unknown board is rejected.
    pub fn add_item_to(&mut self, board_id: &str, content: &str) -> Option<String> {
        if content.trim().is_empty() {
            return None;
        }
        let b = self.board_index(board_id).ok()?;
        let id = self.fresh_id();
        self.boards[b].tasks.push(Task {
            id: id.clone(),
            content: content.to_string(),
            is_new: true,
        });
        self.new_generation += 1;
        Some(id)
    }

    /// Replace a task's content in place
    pub fn edit_item(&mut self, task_id: &str, content: impl Into<String>) -> bool {
        match self.locate(task_id) {
            Ok((b, t)) => {
                self.boards[b].tasks[t].content = content.into();
                true
            }
            Err(_) => false,
        }
    }

    pub fn has_new_items(&self) -> bool {
        self.boards.iter().flat_map(|b| &b.tasks).any(|t| t.is_new)
    }

    /// Generation of the most recent add
    pub fn new_generation(&self) -> u64 {
        self.new_generation
    }

    /// Entry animation of the add at `generation` finished.
    ///
    /// A later add restarts the animation window, so stale resets are ignored.
    pub fn clear_new_flags(&mut self, generation: u64) -> bool {
        if generation != self.new_generation {
            return false;
        }
        for task in self.boards.iter_mut().flat_map(|b| b.tasks.iter_mut()) {
            task.is_new = false;
        }
        true
    }

    // ========================
    // Edit session
    // ========================

    /// Open the edit dialog with the task's current content as draft
    pub fn open_edit(&mut self, task_id: &str) -> bool {
        let Some(task) = self.task(task_id) else { return false };
        self.edit = Some(EditSession {
            target_id: task.id.clone(),
            draft: task.content.clone(),
        });
        true
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if let Some(edit) = self.edit.as_mut() {
            edit.draft = draft.into();
        }
    }

    /// Commit the draft and close the dialog
    pub fn save_edit(&mut self) -> bool {
        match self.edit.take() {
            Some(EditSession { target_id, draft }) => self.edit_item(&target_id, draft),
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }
}
