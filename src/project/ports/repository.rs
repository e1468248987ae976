//! Repository port for project records and their task collections.

use crate::project::domain::{NewProject, Project, ProjectDetails, ProjectId, Task};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Returns every stored project.
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Stores a new project, assigning its identifier.
    async fn store(&self, project: NewProject) -> ProjectRepositoryResult<Project>;

    /// Replaces a project's metadata, leaving its tasks untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn update_details(
        &self,
        id: ProjectId,
        details: ProjectDetails,
    ) -> ProjectRepositoryResult<Project>;

    /// Removes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Replaces a project's whole task collection atomically.
    ///
    /// There is no merge and no version check: concurrent writers race and
    /// the last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn update_tasks(&self, id: ProjectId, tasks: Vec<Task>) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
