//! Pending Remote Operations
//!
//! Every optimistic board change that needs a remote call goes through
//! `SyncQueue`. The queue remembers how to undo the change, so a failed
//! call can put the board back the way it was.

use crate::api::{ApiError, ApiResult, TaskApi};
use crate::board::Board;
use crate::models::{ColumnKey, Task, TaskId, TaskPatch};

pub type OpId = u64;

/// A remote call to make
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOp {
    Create(Task),
    Update { id: TaskId, patch: TaskPatch },
    Delete(TaskId),
}

impl SyncOp {
    pub fn task_id(&self) -> TaskId {
        match self {
            SyncOp::Create(task) => task.id,
            SyncOp::Update { id, .. } => *id,
            SyncOp::Delete(id) => *id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyncOp::Create(_) => "create",
            SyncOp::Update { .. } => "update",
            SyncOp::Delete(_) => "delete",
        }
    }
}

/// How to undo the optimistic effect of an operation
#[derive(Debug, Clone, PartialEq)]
pub enum Rollback {
    /// Nothing was applied before the server answered
    Nothing,
    /// Move a task back to where it was, if it still exists. Only placement
    /// is restored (column, completed, index); title and description keep
    /// their current values.
    Restore { id: TaskId, column: ColumnKey, index: usize },
    /// Re-add a deleted task, if it is still absent
    Reinsert { task: Task, column: ColumnKey, index: usize },
}

impl Rollback {
    /// Board with the change undone, or None if there is nothing to undo
    pub fn apply(&self, board: &Board) -> Option<Board> {
        match self {
            Rollback::Nothing => None,
            Rollback::Restore { id, column, index } => {
                let current = board.find_task(*id)?;
                Some(board.with_task_inserted_at(&current.placed_in(*column), *column, *index))
            }
            Rollback::Reinsert { task, column, index } => {
                (!board.contains(task.id)).then(|| board.with_task_inserted_at(task, *column, *index))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingOp {
    pub id: OpId,
    pub op: SyncOp,
    pub rollback: Rollback,
}

/// In-flight remote operations
#[derive(Debug, Clone, Default)]
pub struct SyncQueue {
    next_id: OpId,
    pending: Vec<PendingOp>,
    rollback_on_failure: bool,
}

impl SyncQueue {
    pub fn new(rollback_on_failure: bool) -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
            rollback_on_failure,
        }
    }

    /// Track a new operation; the returned copy is what gets dispatched
    pub fn begin(&mut self, op: SyncOp, rollback: Rollback) -> PendingOp {
        self.next_id += 1;
        let pending = PendingOp {
            id: self.next_id,
            op,
            rollback,
        };
        self.pending.push(pending.clone());
        pending
    }

    pub fn pending(&self) -> &[PendingOp] {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// A create for `column` is still waiting for the server
    pub fn creating_in(&self, column: ColumnKey) -> bool {
        self.pending
            .iter()
            .any(|p| matches!(&p.op, SyncOp::Create(task) if task.column == column))
    }

    /// Finish an operation. Returns the board to switch to when a failure
    /// must be rolled back; None means keep the current board.
    ///
    /// A failed operation is not rolled back while a newer operation on the
    /// same task is still in flight: that one already reflects the latest
    /// intent.
    pub fn settle<T>(&mut self, id: OpId, outcome: &ApiResult<T>, board: &Board) -> Option<Board> {
        let position = self.pending.iter().position(|p| p.id == id)?;
        let finished = self.pending.remove(position);
        let task_id = finished.op.task_id();

        let error: &ApiError = match outcome {
            Ok(_) => {
                log::debug!("[SYNC] {} of task {} confirmed", finished.op.label(), task_id);
                return None;
            }
            Err(e) => e,
        };
        log::error!("[SYNC] {} of task {} failed: {}", finished.op.label(), task_id, error);

        if !self.rollback_on_failure {
            return None;
        }
        if self.pending.iter().any(|p| p.op.task_id() == task_id) {
            log::info!("[SYNC] Task {} has newer pending changes, keeping local state", task_id);
            return None;
        }
        let reverted = finished.rollback.apply(board);
        if reverted.is_some() {
            log::info!("[SYNC] Rolled back {} of task {}", finished.op.label(), task_id);
        }
        reverted
    }
}

/// Perform the remote call for an operation. Creates yield the
/// server's canonical task.
pub async fn dispatch<A: TaskApi + ?Sized>(api: &A, op: &SyncOp) -> ApiResult<Option<Task>> {
    match op {
        SyncOp::Create(task) => api.create_task(task).await.map(Some),
        SyncOp::Update { id, patch } => api.update_task(*id, patch).await.map(|_| None),
        SyncOp::Delete(id) => api.delete_task(*id).await.map(|_| None),
    }
}
