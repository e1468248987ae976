//! Error types for project domain operations and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned by project aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project does not contain the referenced task.
    #[error("task not found in project: {0}")]
    TaskNotFound(TaskId),
}

/// Error returned while strictly parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
