//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The board is
//! only ever replaced as a whole snapshot.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::{Board, Column};
use crate::models::{ColumnKey, Task, TaskId};
use crate::reconciler::DragSession;

/// Global board state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Columns and their tasks
    pub board: Board,
    /// Gesture in progress, for the drag overlay
    pub drag: Option<DragSession>,
    /// Task whose edit form is open
    pub editing: Option<TaskId>,
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

// ========================
// Store Helper Functions
// ========================

/// Ordered columns (tracked)
pub fn get_columns(store: &BoardStore) -> Vec<Column> {
    store.board().with(|board| board.columns().to_vec())
}

/// Current snapshot without subscribing
pub fn board_snapshot(store: &BoardStore) -> Board {
    store.board().get_untracked()
}

/// Swap in the next snapshot
pub fn replace_columns(store: &BoardStore, next: Board) {
    *store.board().write() = next;
}

/// Tasks of one column (tracked)
pub fn column_tasks(store: &BoardStore, key: ColumnKey) -> Vec<Task> {
    store.board().with(|board| board.column(key).map(|c| c.tasks.clone()).unwrap_or_default())
}

/// Look up a task without subscribing to board changes
pub fn lookup_task(store: &BoardStore, id: TaskId) -> Option<Task> {
    store.board().with_untracked(|board| board.find_task(id).cloned())
}

pub fn drag_session(store: &BoardStore) -> Option<DragSession> {
    store.drag().get()
}

pub fn set_drag_session(store: &BoardStore, session: Option<DragSession>) {
    *store.drag().write() = session;
}

/// Clear the gesture and hand back what it was
pub fn take_drag_session(store: &BoardStore) -> Option<DragSession> {
    let session = store.drag().get_untracked();
    set_drag_session(store, None);
    session
}

pub fn editing_task(store: &BoardStore) -> Option<TaskId> {
    store.editing().get()
}

pub fn set_editing_task(store: &BoardStore, id: Option<TaskId>) {
    *store.editing().write() = id;
}
