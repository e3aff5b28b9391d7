//! Sync Client
//!
//! Remote task service bindings, organized as a trait seam plus the
//! browser `fetch` implementation.

mod error;
mod http;

use async_trait::async_trait;

use crate::models::{Task, TaskId, TaskPatch};

pub use error::{ApiError, ApiResult};
pub use http::{decode_task_list, endpoint, HttpTaskApi};

/// CRUD operations of the task service
///
/// Futures are not `Send`: everything runs on the browser's event loop.
#[async_trait(?Send)]
pub trait TaskApi {
    /// `GET /tasks`
    async fn fetch_all(&self) -> ApiResult<Vec<Task>>;

    /// `POST /tasks/create`, returns the canonical record
    async fn create_task(&self, task: &Task) -> ApiResult<Task>;

    /// `PUT /tasks/:id/update`
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<()>;

    /// `DELETE /tasks/:id/delete`
    async fn delete_task(&self, id: TaskId) -> ApiResult<()>;
}
