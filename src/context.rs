//! Board Context
//!
//! Shared handle provided via Leptos Context API. Connects gesture and form
//! events to the planned board actions, the store and the sync queue.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{DragEnd as DragEndEvent, DragOver, KeyNav};

use crate::actions::{self, Planned};
use crate::api::{ApiResult, HttpTaskApi, TaskApi};
use crate::board::Board;
use crate::config::BoardConfig;
use crate::models::{ColumnKey, Task, TaskDraft, TaskId};
use crate::reconciler::{self, BoardTarget};
use crate::store::{board_snapshot, replace_columns, set_drag_session, set_editing_task, take_drag_session, BoardStore};
use crate::sync::{dispatch, OpId, SyncQueue};

#[derive(Clone, Copy)]
pub struct BoardContext {
    pub store: BoardStore,
    api: StoredValue<HttpTaskApi, LocalStorage>,
    queue: StoredValue<SyncQueue>,
    config: StoredValue<BoardConfig>,
}

/// Get the board context
pub fn use_board_context() -> BoardContext {
    expect_context::<BoardContext>()
}

impl BoardContext {
    pub fn new(store: BoardStore, config: BoardConfig) -> Self {
        Self {
            store,
            api: StoredValue::new_local(HttpTaskApi::from_config(&config)),
            queue: StoredValue::new(SyncQueue::new(config.rollback_on_failure)),
            config: StoredValue::new(config),
        }
    }

    pub fn double_tap_window_ms(&self) -> f64 {
        self.config.with_value(|c| c.double_tap_window_ms)
    }

    /// Fetch every task and rebuild the board
    pub fn load(&self) {
        let store = self.store;
        let api = self.api.get_value();
        spawn_local(async move {
            match api.fetch_all().await {
                Ok(tasks) => {
                    log::info!("[APP] Loaded {} tasks", tasks.len());
                    replace_columns(&store, Board::from_tasks(tasks));
                }
                Err(e) => log::error!("[APP] Failed to fetch tasks: {}", e),
            }
        });
    }

    // ========================
    // Drag gesture
    // ========================

    pub fn on_drag_start(&self, active: TaskId) {
        let session = reconciler::drag_start(&board_snapshot(&self.store), active);
        log::debug!("[DND] Start: task={} found={}", active, session.is_some());
        set_drag_session(&self.store, session);
    }

    pub fn on_drag_over(&self, event: DragOver<ColumnKey, TaskId>) {
        let board = board_snapshot(&self.store);
        if let Some(next) = reconciler::drag_over(&board, event.active, Some(event.over), event.delta_y) {
            log::debug!("[DND] Over: task={} target={:?} dy={}", event.active, event.over, event.delta_y);
            replace_columns(&self.store, next);
        }
    }

    pub fn on_drag_end(&self, event: DragEndEvent<ColumnKey, TaskId>) {
        let session = take_drag_session(&self.store);
        let board = board_snapshot(&self.store);

        match actions::plan_drag_end(&board, session.as_ref(), event.active, event.over) {
            Some(planned) => {
                log::debug!("[DND] End: task={} -> {}", event.active, planned.op.label());
                self.submit(planned);
            }
            None => log::debug!("[DND] End: task={} target={:?} ignored", event.active, event.over),
        }
    }

    /// Arrow key during a keyboard drag
    pub fn keyboard_target(&self, nav: KeyNav<ColumnKey, TaskId>) -> Option<BoardTarget> {
        reconciler::keyboard_target(&board_snapshot(&self.store), nav.active, nav.current, nav.direction)
    }

    // ========================
    // Form actions
    // ========================

    /// A create for `column` is still in flight
    pub fn is_creating(&self, column: ColumnKey) -> bool {
        self.queue.with_value(|queue| queue.creating_in(column))
    }

    /// Create a task from the add form. Resolves to the stored task once the
    /// server accepted it; None if the draft was blank, another create for
    /// the column is in flight, or the call failed.
    pub async fn create_task(self, column: ColumnKey, draft: TaskDraft) -> Option<Task> {
        if self.is_creating(column) {
            log::debug!("[SYNC] Create in {} already pending", column.as_str());
            return None;
        }
        let planned = actions::plan_create(column, &draft, js_sys::Date::now() as TaskId)?;
        self.execute(planned).await.ok().flatten()
    }

    /// Save an inline edit. The store is updated once the server confirms.
    /// Returns false if the draft was rejected as blank.
    pub fn edit_task(&self, id: TaskId, draft: &TaskDraft) -> bool {
        let Some(planned) = actions::plan_edit(&board_snapshot(&self.store), id, draft) else {
            return false;
        };
        self.submit(planned);
        true
    }

    /// Remove a task right away and delete it remotely
    pub fn delete_task(&self, id: TaskId) {
        let Some(planned) = actions::plan_delete(&board_snapshot(&self.store), id) else { return };
        set_editing_task(&self.store, None);
        self.submit(planned);
    }

    // ========================
    // Sync plumbing
    // ========================

    fn submit(&self, planned: Planned) {
        let ctx = *self;
        spawn_local(async move {
            let _ = ctx.execute(planned).await;
        });
    }

    /// Apply the optimistic board, run the remote call, then commit or roll back
    async fn execute(self, planned: Planned) -> ApiResult<Option<Task>> {
        let Planned { board, op, rollback, commit } = planned;
        if let Some(board) = board {
            replace_columns(&self.store, board);
        }
        let Some(pending) = self.queue.try_update_value(|queue| queue.begin(op, rollback)) else {
            return Ok(None);
        };
        let api = self.api.get_value();

        let outcome = dispatch(&api, &pending.op).await;
        if let Ok(created) = &outcome {
            if let Some(next) = commit.apply(&board_snapshot(&self.store), created.as_ref()) {
                replace_columns(&self.store, next);
            }
        }
        self.finish(pending.id, &outcome);
        outcome
    }

    fn finish<T>(&self, id: OpId, outcome: &ApiResult<T>) {
        let board = board_snapshot(&self.store);
        let mut reverted = None;
        self.queue.update_value(|queue| reverted = queue.settle(id, outcome, &board));
        if let Some(board) = reverted {
            replace_columns(&self.store, board);
        }
    }
}
