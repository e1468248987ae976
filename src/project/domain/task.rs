//! Task entity held inside a project's task collection.

use super::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// One unit of work within a project.
///
/// Assignees are denormalised display names with no link back to user
/// records. The due date is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    assignees: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
}

/// Task as read from storage; `title` wins over the `name` fallback.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    assignees: Vec<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    due_date: Option<String>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.or(record.name).unwrap_or_default(),
            status: record.status,
            assignees: record.assignees,
            due_date: record.due_date,
        }
    }
}

impl Task {
    /// Creates a task in [`TaskStatus::ToDo`] with no assignees or due date.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            status: TaskStatus::ToDo,
            assignees: Vec::new(),
            due_date: None,
        }
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the assignee display names.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the due date label.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        let value = due_date.into();
        self.due_date = (!value.trim().is_empty()).then_some(value);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the normalised status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee display names.
    #[must_use]
    pub fn assignees(&self) -> &[String] {
        &self.assignees
    }

    /// Returns the due date label, if any.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }
}

/// Reads an optional string, treating `""` as absent.
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
