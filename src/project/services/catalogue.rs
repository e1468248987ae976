//! Service layer for listing and administering projects.

use crate::{
    identity::{
        ports::SessionSource,
        services::{AccessDenied, Action, AuthorizationGate},
    },
    project::{
        domain::{NewProject, Project, ProjectDetails, ProjectId, calc_progress},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Placeholder shown when a project has no team.
const EMPTY_TEAM: &str = "—";

/// Service-level errors for project catalogue operations.
#[derive(Debug, Error)]
pub enum ProjectCatalogueError {
    /// The caller may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

/// Result type for project catalogue operations.
pub type ProjectCatalogueResult<T> = Result<T, ProjectCatalogueError>;

/// One entry of the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Start date label.
    pub start_date: String,
    /// Estimated end date label.
    pub estimated_end_date: String,
    /// Completion percentage.
    pub progress: u8,
    /// Team names, comma separated.
    pub team: String,
    /// Whether the caller may open the edit form.
    pub editable: bool,
}

impl ProjectSummary {
    fn from_project(project: &Project, editable: bool) -> Self {
        let team = project.team_label();
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            start_date: project.details().start_date.clone(),
            estimated_end_date: project.details().estimated_end_date.clone(),
            progress: calc_progress(project.tasks()),
            team: if team.is_empty() {
                EMPTY_TEAM.to_owned()
            } else {
                team
            },
            editable,
        }
    }
}

/// Project catalogue service.
#[derive(Clone)]
pub struct ProjectCatalogueService<R, S>
where
    R: ProjectRepository,
    S: SessionSource,
{
    repository: Arc<R>,
    sessions: Arc<S>,
    gate: AuthorizationGate,
}

impl<R, S> ProjectCatalogueService<R, S>
where
    R: ProjectRepository,
    S: SessionSource,
{
    /// Creates a new project catalogue service.
    #[must_use]
    pub const fn new(repository: Arc<R>, sessions: Arc<S>) -> Self {
        Self {
            repository,
            sessions,
            gate: AuthorizationGate::new(),
        }
    }

    /// Lists every project with its progress.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogueError::Access`] without a session, and
    /// [`ProjectCatalogueError::Repository`] when the lookup fails.
    pub async fn list_summaries(&self) -> ProjectCatalogueResult<Vec<ProjectSummary>> {
        let session = self.sessions.current_user();
        let user = self.gate.authorize(session.as_ref(), Action::ViewProjects)?;
        let editable = user.role.shows_admin_actions();
        let projects = self.repository.list().await?;
        Ok(projects
            .iter()
            .map(|project| ProjectSummary::from_project(project, editable))
            .collect())
    }

    /// Creates a project. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogueError::Access`] when the caller is not an
    /// administrator, and [`ProjectCatalogueError::Repository`] when storage
    /// fails.
    pub async fn create_project(&self, project: NewProject) -> ProjectCatalogueResult<Project> {
        self.authorize(Action::CreateProject)?;
        let created = self.repository.store(project).await?;
        info!(project_id = %created.id(), tasks = created.tasks().len(), "project created");
        Ok(created)
    }

    /// Replaces a project's metadata. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogueError::Access`] when the caller is not an
    /// administrator, and [`ProjectCatalogueError::Repository`] when the
    /// project is missing or storage fails.
    pub async fn edit_project(
        &self,
        id: ProjectId,
        details: ProjectDetails,
    ) -> ProjectCatalogueResult<Project> {
        self.authorize(Action::EditProject)?;
        let updated = self.repository.update_details(id, details).await?;
        info!(project_id = %id, "project edited");
        Ok(updated)
    }

    /// Deletes a project. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogueError::Access`] when the caller is not an
    /// administrator, and [`ProjectCatalogueError::Repository`] when the
    /// project is missing or storage fails.
    pub async fn delete_project(&self, id: ProjectId) -> ProjectCatalogueResult<()> {
        self.authorize(Action::DeleteProject)?;
        self.repository.delete(id).await?;
        info!(project_id = %id, "project deleted");
        Ok(())
    }

    fn authorize(&self, action: Action) -> Result<(), AccessDenied> {
        let session = self.sessions.current_user();
        self.gate.authorize(session.as_ref(), action).map(|_| ())
    }
}
