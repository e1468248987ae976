//! Identifier types for the project domain.

use crate::identifier::numeric_identifier;

numeric_identifier!(
    /// Unique identifier for a project record.
    ProjectId,
    "project"
);

numeric_identifier!(
    /// Identifier of a task, unique within its project.
    TaskId,
    "task"
);
