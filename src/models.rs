//! Frontend Models
//!
//! Data structures matching the task service's JSON.

use serde::{Deserialize, Serialize};

/// Task id: creation timestamp in milliseconds
pub type TaskId = i64;

/// The five fixed board columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    OnHold,
    ToDo,
    InProgress,
    Done,
    /// Drop zone only; never stores tasks in steady state
    Delete,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 5] = [
        ColumnKey::OnHold,
        ColumnKey::ToDo,
        ColumnKey::InProgress,
        ColumnKey::Done,
        ColumnKey::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKey::OnHold => "onHold",
            ColumnKey::ToDo => "toDo",
            ColumnKey::InProgress => "inProgress",
            ColumnKey::Done => "done",
            ColumnKey::Delete => "delete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColumnKey::OnHold => "On Hold",
            ColumnKey::ToDo => "To Do",
            ColumnKey::InProgress => "In Progress",
            ColumnKey::Done => "Done",
            ColumnKey::Delete => "Delete",
        }
    }

    /// Tasks in this column count as completed
    pub fn marks_completed(&self) -> bool {
        *self == ColumnKey::Done
    }
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub column: ColumnKey,
}

impl Task {
    /// Copy of this task placed in `column`, with `completed` following it
    pub fn placed_in(&self, column: ColumnKey) -> Self {
        Self {
            column,
            completed: column.marks_completed(),
            ..self.clone()
        }
    }
}

/// Partial update body for `PUT /tasks/:id/update`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnKey>,
}

impl TaskPatch {
    /// Patch carrying every field of `task`
    pub fn full(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            completed: Some(task.completed),
            column: Some(task.column),
        }
    }

    /// Patch for an inline edit
    pub fn text(title: &str, description: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }
}

/// In-progress text of the add/edit forms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Trimmed (title, description), or None if either is blank
    pub fn validated(&self) -> Option<(String, String)> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return None;
        }
        Some((title.to_string(), description.to_string()))
    }

    /// Build a new task for `column`, id taken from `now_ms`
    pub fn into_task(&self, column: ColumnKey, now_ms: TaskId) -> Option<Task> {
        let (title, description) = self.validated()?;
        Some(Task {
            id: now_ms,
            title,
            description,
            completed: column.marks_completed(),
            column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_key_wire_names() {
        for key in ColumnKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        let parsed: ColumnKey = serde_json::from_str("\"inProgress\"").unwrap();
        assert_eq!(parsed, ColumnKey::InProgress);
    }

    #[test]
    fn test_task_json_shape() {
        let json = r#"{"id":1697040000000,"title":"Write","description":"docs","completed":false,"column":"toDo"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 1_697_040_000_000);
        assert_eq!(task.column, ColumnKey::ToDo);
        assert_eq!(serde_json::to_string(&task).unwrap(), json);
    }

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = TaskPatch::text("New title", "New body");
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"title":"New title","description":"New body"}"#);
        assert_eq!(serde_json::to_string(&TaskPatch::default()).unwrap(), "{}");
    }

    #[test]
    fn test_draft_validation() {
        assert!(TaskDraft::new("Title", "").into_task(ColumnKey::ToDo, 1).is_none());
        assert!(TaskDraft::new("   ", "body").into_task(ColumnKey::ToDo, 1).is_none());

        let task = TaskDraft::new("  Ship it ", " today\n").into_task(ColumnKey::Done, 42).unwrap();
        assert_eq!(task.id, 42);
        assert_eq!(task.title, "Ship it");
        assert_eq!(task.description, "today");
        assert!(task.completed);
        assert_eq!(task.column, ColumnKey::Done);
    }

    #[test]
    fn test_placed_in_tracks_completed() {
        let task = TaskDraft::new("a", "b").into_task(ColumnKey::ToDo, 1).unwrap();
        assert!(task.placed_in(ColumnKey::Done).completed);
        assert!(!task.placed_in(ColumnKey::Done).placed_in(ColumnKey::OnHold).completed);
    }
}
