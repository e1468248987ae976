//! Client-held board view state.

use crate::project::domain::{Project, TaskId, TaskStatus};

/// Load state of the project shown on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectLoad {
    /// The initial lookup has not resolved yet.
    #[default]
    Loading,
    /// The lookup resolved to "no such project".
    NotFound,
    /// The project is loaded.
    Loaded(Project),
}

impl ProjectLoad {
    /// Returns the loaded project, if any.
    #[must_use]
    pub const fn project(&self) -> Option<&Project> {
        match self {
            Self::Loaded(project) => Some(project),
            Self::Loading | Self::NotFound => None,
        }
    }

    /// Returns the loaded project mutably, if any.
    pub const fn project_mut(&mut self) -> Option<&mut Project> {
        match self {
            Self::Loaded(project) => Some(project),
            Self::Loading | Self::NotFound => None,
        }
    }
}

/// Snapshot of what the board currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardViewState {
    /// The project, or its load state.
    pub project: ProjectLoad,
    /// `true` while at least one persistence call is outstanding.
    pub saving: bool,
}

impl BoardViewState {
    /// Returns the current status of a task on the board.
    #[must_use]
    pub fn status_of(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.project
            .project()
            .and_then(|project| project.task(task_id))
            .map(crate::project::domain::Task::status)
    }
}
