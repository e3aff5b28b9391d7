//! HTTP Task Client
//!
//! `TaskApi` over `reqwest`, which runs on the browser `fetch` API when
//! built for wasm32.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::{ApiError, ApiResult, TaskApi};
use crate::config::BoardConfig;
use crate::models::{Task, TaskId, TaskPatch};

/// Join a base URL and a path with exactly one slash
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Decode a `GET /tasks` body. Records that are not valid tasks (unknown
/// column, missing fields) are skipped instead of failing the whole list.
pub fn decode_task_list(body: &str) -> ApiResult<Vec<Task>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Task>(record) {
            Ok(task) => Some(task),
            Err(e) => {
                log::warn!("[SYNC] Skipping malformed task record: {}", e);
                None
            }
        })
        .collect())
}

fn classify(operation: &'static str, e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if let Some(status) = e.status() {
        ApiError::Status { operation, status: status.as_u16() }
    } else if e.is_builder() {
        ApiError::Encode(e.to_string())
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
    timeout_ms: u32,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.request_timeout_ms)
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// Send a request and return the response body on 2xx
    async fn send(&self, request: RequestBuilder, operation: &'static str) -> ApiResult<String> {
        let request = match self.timeout_ms {
            0 => request,
            ms => request.timeout(Duration::from_millis(u64::from(ms))),
        };
        let response = request.send().await.map_err(|e| classify(operation, e))?;
        let response = response.error_for_status().map_err(|e| classify(operation, e))?;
        response.text().await.map_err(|e| classify(operation, e))
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn fetch_all(&self) -> ApiResult<Vec<Task>> {
        log::debug!("[SYNC] GET tasks");
        let body = self.send(self.client.get(self.url("tasks")), "fetch").await?;
        decode_task_list(&body)
    }

    async fn create_task(&self, task: &Task) -> ApiResult<Task> {
        log::debug!("[SYNC] POST tasks/create id={}", task.id);
        let request = self.client.post(self.url("tasks/create")).json(task);
        let response = self.send(request, "create").await?;
        // The service may answer with a message object instead of the record
        Ok(serde_json::from_str::<Task>(&response).unwrap_or_else(|_| task.clone()))
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<()> {
        log::debug!("[SYNC] PUT tasks/{}/update", id);
        let request = self.client.put(self.url(&format!("tasks/{}/update", id))).json(patch);
        self.send(request, "update").await?;
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
        log::debug!("[SYNC] DELETE tasks/{}/delete", id);
        let request = self.client.delete(self.url(&format!("tasks/{}/delete", id)));
        self.send(request, "delete").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnKey;

    #[test]
    fn test_endpoint_joins_with_one_slash() {
        assert_eq!(endpoint("http://localhost:5000/", "tasks"), "http://localhost:5000/tasks");
        assert_eq!(endpoint("http://localhost:5000", "/tasks/7/update"), "http://localhost:5000/tasks/7/update");
        assert_eq!(endpoint("https://api.example.com/v1//", "tasks/create"), "https://api.example.com/v1/tasks/create");
    }

    #[test]
    fn test_decode_task_list_skips_bad_records() {
        let body = r#"[
            {"id": 1, "title": "a", "description": "b", "completed": false, "column": "toDo"},
            {"id": 2, "title": "c", "description": "d", "completed": false, "column": "backlog"},
            {"id": 3, "title": "e", "description": "f", "completed": true, "column": null},
            {"id": 4, "title": "g", "description": "h", "completed": true, "column": "done"}
        ]"#;
        let tasks = decode_task_list(body).unwrap();
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(tasks[1].column, ColumnKey::Done);
    }

    #[test]
    fn test_client_joins_configured_base() {
        let config = BoardConfig {
            api_base_url: "https://tasks.example.com/api/".to_string(),
            ..BoardConfig::default()
        };
        let api = HttpTaskApi::from_config(&config);
        assert_eq!(api.url("tasks/3/delete"), "https://tasks.example.com/api/tasks/3/delete");
        assert_eq!(api.timeout_ms, 15_000);
    }

    #[test]
    fn test_decode_task_list_rejects_non_array() {
        assert!(matches!(decode_task_list(r#"{"message":"oops"}"#), Err(ApiError::Decode(_))));
    }
}
