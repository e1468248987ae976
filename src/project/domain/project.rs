//! Project aggregate root and its creation and editing payloads.

use super::{ProjectDomainError, ProjectId, Task, TaskId, TaskStatus};
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};

/// Team member listed on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    /// Referenced user.
    pub id: UserId,
    /// Display name captured when the developer was added.
    #[serde(default)]
    pub name: String,
}

impl Developer {
    /// Creates a developer entry.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Editable project metadata, everything except identity and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Start date label.
    #[serde(default)]
    pub start_date: String,
    /// Estimated end date label.
    #[serde(default)]
    pub estimated_end_date: String,
    /// Responsible project manager.
    #[serde(default)]
    pub owner: Option<UserId>,
    /// Team members.
    #[serde(default)]
    pub developers: Vec<Developer>,
}

impl ProjectDetails {
    /// Creates details with a name and empty schedule and team.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the schedule labels.
    #[must_use]
    pub fn with_schedule(
        mut self,
        start_date: impl Into<String>,
        estimated_end_date: impl Into<String>,
    ) -> Self {
        self.start_date = start_date.into();
        self.estimated_end_date = estimated_end_date.into();
        self
    }

    /// Sets the owner.
    #[must_use]
    pub const fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the team.
    #[must_use]
    pub fn with_developers(mut self, developers: impl IntoIterator<Item = Developer>) -> Self {
        self.developers = developers.into_iter().collect();
        self
    }
}

/// Task supplied when a project is created; ids are assigned on storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Assignee display names.
    pub assignees: Vec<String>,
    /// Optional due date label.
    pub due_date: Option<String>,
}

impl NewTask {
    /// Creates a task payload with a title only.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            assignees: Vec::new(),
            due_date: None,
        }
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the due date label.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Materialises the task under the given identifier in `to_do`.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::new(id, self.title)
            .with_assignees(self.assignees)
            .with_due_date(self.due_date.unwrap_or_default())
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Project metadata.
    pub details: ProjectDetails,
    /// Initial tasks.
    pub tasks: Vec<NewTask>,
}

impl NewProject {
    /// Creates a payload with no tasks.
    #[must_use]
    pub const fn new(details: ProjectDetails) -> Self {
        Self {
            details,
            tasks: Vec::new(),
        }
    }

    /// Sets the initial tasks.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = NewTask>) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }

    /// Materialises the project under `id`, numbering tasks from 1.
    #[must_use]
    pub fn into_project(self, id: ProjectId) -> Project {
        let mut next_task_id = TaskId::new(1);
        let tasks = self
            .tasks
            .into_iter()
            .map(|new_task| {
                let task = new_task.into_task(next_task_id);
                next_task_id = next_task_id.next();
                task
            })
            .collect();
        Project::new(id, self.details).with_tasks(tasks)
    }
}

/// Project aggregate root: metadata plus the owned task collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    #[serde(flatten)]
    details: ProjectDetails,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Project {
    /// Creates a project with no tasks.
    #[must_use]
    pub const fn new(id: ProjectId, details: ProjectDetails) -> Self {
        Self {
            id,
            details,
            tasks: Vec::new(),
        }
    }

    /// Replaces the task collection.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Swaps in a new task collection, returning the previous one.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> Vec<Task> {
        std::mem::replace(&mut self.tasks, tasks)
    }

    /// Replaces the metadata, keeping identity and tasks.
    #[must_use]
    pub fn with_details(mut self, details: ProjectDetails) -> Self {
        self.details = details;
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project metadata.
    #[must_use]
    pub const fn details(&self) -> &ProjectDetails {
        &self.details
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Returns the task collection.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the team as a comma-separated list of names.
    #[must_use]
    pub fn team_label(&self) -> String {
        self.details
            .developers
            .iter()
            .map(|developer| developer.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Computes the task collection with one task's status replaced.
    ///
    /// Every other task, and every other field of the target task, is left
    /// as is.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::TaskNotFound`] if no task has `task_id`.
    pub fn tasks_with_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<Vec<Task>, ProjectDomainError> {
        if self.task(task_id).is_none() {
            return Err(ProjectDomainError::TaskNotFound(task_id));
        }
        Ok(self
            .tasks
            .iter()
            .map(|task| {
                if task.id() == task_id {
                    task.clone().with_status(status)
                } else {
                    task.clone()
                }
            })
            .collect())
    }

    /// Puts a previously captured copy of a task back in place.
    ///
    /// Returns `false`, leaving the project untouched, when the task is no
    /// longer part of the collection.
    pub fn restore_task(&mut self, snapshot: Task) -> bool {
        match self.tasks.iter_mut().find(|task| task.id() == snapshot.id()) {
            Some(slot) => {
                *slot = snapshot;
                true
            }
            None => false,
        }
    }
}
