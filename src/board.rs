//! Board Snapshot
//!
//! Immutable column/task structure. Every operation returns a new `Board`;
//! nothing here mutates a `Column` or `Task` in place.

use crate::models::{ColumnKey, Task, TaskId};

/// A fixed lane holding an ordered sequence of tasks
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: ColumnKey,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Column {
    fn with_tasks(key: ColumnKey, tasks: Vec<Task>) -> Self {
        Self {
            key,
            title: key.title().to_string(),
            tasks,
        }
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

/// Ordered list of the five fixed columns
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Five empty columns
    pub fn new() -> Self {
        Self::from_tasks(Vec::new())
    }

    /// Distribute tasks into their columns, keeping the given order.
    /// Tasks sitting in the delete column are dropped.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let stray = tasks.iter().filter(|t| t.column == ColumnKey::Delete).count();
        if stray > 0 {
            log::warn!("[BOARD] Ignoring {} task(s) stored in the delete column", stray);
        }
        let columns = ColumnKey::ALL
            .iter()
            .map(|&key| {
                let owned = if key == ColumnKey::Delete {
                    Vec::new()
                } else {
                    tasks.iter().filter(|t| t.column == key).cloned().collect()
                };
                Column::with_tasks(key, owned)
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: ColumnKey) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.find_task(id).is_some()
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks().find(|task| task.id == id)
    }

    /// Owning column and index of a task
    pub fn locate(&self, id: TaskId) -> Option<(ColumnKey, usize)> {
        self.columns
            .iter()
            .find_map(|c| c.position(id).map(|index| (c.key, index)))
    }

    /// Build the next snapshot by computing each column's new task list
    fn rebuild(&self, mut next_tasks: impl FnMut(&Column) -> Vec<Task>) -> Board {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                key: c.key,
                title: c.title.clone(),
                tasks: next_tasks(c),
            })
            .collect();
        Board { columns }
    }

    fn tasks_without(column: &Column, id: TaskId) -> Vec<Task> {
        column.tasks.iter().filter(|t| t.id != id).cloned().collect()
    }

    /// Append a task at the end of its own column. `completed` is derived
    /// from the column; an existing task with the same id is replaced.
    pub fn with_task_added(&self, task: Task) -> Board {
        if task.column == ColumnKey::Delete {
            log::warn!("[BOARD] Refusing to store task {} in the delete column", task.id);
            return self.clone();
        }
        let task = task.placed_in(task.column);
        self.rebuild(|c| {
            let mut tasks = Self::tasks_without(c, task.id);
            if c.key == task.column {
                tasks.push(task.clone());
            }
            tasks
        })
    }

    pub fn with_task_removed(&self, id: TaskId) -> Board {
        self.rebuild(|c| Self::tasks_without(c, id))
    }

    /// Remove `task` from wherever it is and insert it into `column` at
    /// `index` (clamped to the column length). The task is stored as given.
    pub fn with_task_inserted_at(&self, task: &Task, column: ColumnKey, index: usize) -> Board {
        self.rebuild(|c| {
            let mut tasks = Self::tasks_without(c, task.id);
            if c.key == column {
                let at = index.min(tasks.len());
                tasks.insert(at, task.clone());
            }
            tasks
        })
    }

    /// Replace the stored copy of a task, keeping its position
    pub fn with_task_replaced(&self, task: &Task) -> Board {
        self.rebuild(|c| {
            c.tasks
                .iter()
                .map(|t| if t.id == task.id { task.clone() } else { t.clone() })
                .collect()
        })
    }

    /// Apply an inline edit of title and description
    pub fn with_task_edited(&self, id: TaskId, title: &str, description: &str) -> Board {
        match self.find_task(id) {
            Some(task) => self.with_task_replaced(&Task {
                title: title.to_string(),
                description: description.to_string(),
                ..task.clone()
            }),
            None => self.clone(),
        }
    }
}
