use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_blank;

/// Priority of a task, stored as lowercase text.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Workflow state of a task, stored as kebab-case text (`in-progress`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Newly created, not started.
    #[default]
    Todo,
    InProgress,
    Done,
    /// Waiting on something outside the owner's control.
    Blocked,
}

/// Payload for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Between 1 and 200 characters, not only whitespace.
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub title: String,

    /// At most 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Defaults to `medium`.
    pub priority: Option<TaskPriority>,

    /// Defaults to `todo`.
    pub status: Option<TaskStatus>,

    /// RFC 3339 timestamp; any offset is converted to UTC.
    pub due_date: Option<DateTime<Utc>>,
}

/// Payload for a partial update. Absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub priority: Option<TaskPriority>,

    pub status: Option<TaskStatus>,

    pub due_date: Option<DateTime<Utc>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// A task as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    /// Owner of the task.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Orderings for task lists. Without one, the newest task comes first.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    /// Earliest due date first; undated tasks go last.
    DueDate,
    /// `critical` first, `low` last.
    Priority,
}

/// Filters accepted when listing tasks. Listing is always scoped to the caller.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// Case-insensitive match against title or description.
    pub search: Option<String>,
    /// Only tasks past their due date that are not `done`.
    #[serde(default)]
    pub overdue_only: bool,
    pub sort: Option<TaskSort>,
}
