//! Domain model for projects, tasks, and task progress.
//!
//! Everything here is pure data and pure functions; persistence and access
//! control live in ports and services.

mod error;
mod ids;
mod progress;
mod project;
mod status;
mod task;

pub use error::{ParseTaskStatusError, ProjectDomainError};
pub use ids::{ProjectId, TaskId};
pub use progress::calc_progress;
pub use project::{Developer, NewProject, NewTask, Project, ProjectDetails};
pub use status::TaskStatus;
pub use task::Task;
