//! In-memory repository for project records.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::project::{
    domain::{NewProject, Project, ProjectDetails, ProjectId, Task},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: BTreeMap<ProjectId, Project>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with existing projects.
    #[must_use]
    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let state = InMemoryProjectState {
            projects: projects
                .into_iter()
                .map(|project| (project.id(), project))
                .collect(),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    fn read(&self) -> ProjectRepositoryResult<RwLockReadGuard<'_, InMemoryProjectState>> {
        self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ProjectRepositoryResult<RwLockWriteGuard<'_, InMemoryProjectState>> {
        self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryProjectState {
    fn next_id(&self) -> ProjectId {
        self.projects
            .keys()
            .next_back()
            .map_or(ProjectId::new(1), |last| last.next())
    }

    fn get_mut(&mut self, id: ProjectId) -> ProjectRepositoryResult<&mut Project> {
        self.projects
            .get_mut(&id)
            .ok_or(ProjectRepositoryError::NotFound(id))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        Ok(state.projects.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn store(&self, project: NewProject) -> ProjectRepositoryResult<Project> {
        let mut state = self.write()?;
        let stored = project.into_project(state.next_id());
        state.projects.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update_details(
        &self,
        id: ProjectId,
        details: ProjectDetails,
    ) -> ProjectRepositoryResult<Project> {
        let mut state = self.write()?;
        let slot = state.get_mut(id)?;
        *slot = slot.clone().with_details(details);
        Ok(slot.clone())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or(ProjectRepositoryError::NotFound(id))
    }

    async fn update_tasks(&self, id: ProjectId, tasks: Vec<Task>) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state.get_mut(id)?.replace_tasks(tasks);
        Ok(())
    }
}
