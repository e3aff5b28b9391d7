//! Board Actions
//!
//! Turns user actions into a `Planned` change: the board to show right
//! away, the remote operation that persists it, how to undo it, and what
//! to apply once the server confirms. `BoardContext` only executes plans.

use crate::board::Board;
use crate::models::{ColumnKey, Task, TaskDraft, TaskId, TaskPatch};
use crate::reconciler::{self, BoardTarget, DragEnd, DragSession};
use crate::sync::{Rollback, SyncOp};

/// Change applied to the board after a successful remote call
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Nothing,
    /// Add the server's copy of a created task
    AddCreated,
    Edit { id: TaskId, title: String, description: String },
}

impl Commit {
    /// Board after the acknowledgment, or None to keep the current one.
    /// `created` is the server's task for a create.
    pub fn apply(&self, board: &Board, created: Option<&Task>) -> Option<Board> {
        match self {
            Commit::Nothing => None,
            Commit::AddCreated => created.map(|task| board.with_task_added(task.clone())),
            Commit::Edit { id, title, description } => Some(board.with_task_edited(*id, title, description)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Planned {
    /// Optimistic board; None leaves the board untouched until the ack
    pub board: Option<Board>,
    pub op: SyncOp,
    pub rollback: Rollback,
    pub commit: Commit,
}

/// Finish a drag. The undo position comes from the session, i.e. where the
/// task was before any preview moved it.
pub fn plan_drag_end(
    board: &Board,
    session: Option<&DragSession>,
    active: TaskId,
    over: Option<BoardTarget>,
) -> Option<Planned> {
    let origin = |task: &Task| match session {
        Some(s) if s.active == task.id => (s.task.clone(), s.origin_column, s.origin_index),
        _ => {
            let (column, index) = board.locate(task.id).unwrap_or((task.column, 0));
            (task.clone(), column, index)
        }
    };

    match reconciler::drag_end(board, active, over) {
        DragEnd::Ignored => None,
        DragEnd::Delete { board, task } => {
            let (task, column, index) = origin(&task);
            Some(Planned {
                board: Some(board),
                op: SyncOp::Delete(task.id),
                rollback: Rollback::Reinsert { task, column, index },
                commit: Commit::Nothing,
            })
        }
        DragEnd::Settle { board, task } => {
            let (_, column, index) = origin(&task);
            Some(Planned {
                board: Some(board),
                op: SyncOp::Update { id: task.id, patch: TaskPatch::full(&task) },
                rollback: Rollback::Restore { id: task.id, column, index },
                commit: Commit::Nothing,
            })
        }
    }
}

/// Create from the add form; nothing is shown until the server accepts it.
/// None for a blank draft.
pub fn plan_create(column: ColumnKey, draft: &TaskDraft, now_ms: TaskId) -> Option<Planned> {
    let task = draft.into_task(column, now_ms)?;
    Some(Planned {
        board: None,
        op: SyncOp::Create(task),
        rollback: Rollback::Nothing,
        commit: Commit::AddCreated,
    })
}

/// Inline edit, merged into the board once confirmed. None for a blank
/// draft or an unknown task.
pub fn plan_edit(board: &Board, id: TaskId, draft: &TaskDraft) -> Option<Planned> {
    let (title, description) = draft.validated()?;
    if !board.contains(id) {
        return None;
    }
    Some(Planned {
        board: None,
        op: SyncOp::Update { id, patch: TaskPatch::text(&title, &description) },
        rollback: Rollback::Nothing,
        commit: Commit::Edit { id, title, description },
    })
}

/// Delete from the edit form: removed right away, reinserted on failure
pub fn plan_delete(board: &Board, id: TaskId) -> Option<Planned> {
    let task = board.find_task(id)?.clone();
    let (column, index) = board.locate(id)?;
    Some(Planned {
        board: Some(board.with_task_removed(id)),
        op: SyncOp::Delete(id),
        rollback: Rollback::Reinsert { task, column, index },
        commit: Commit::Nothing,
    })
}
