//! Shared world state for board drag BDD scenarios.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rstest::fixture;
use taskboard::{
    board::{
        BoardConfig,
        drag::DragController,
        services::{BoardAccessError, BoardEngine, TransitionOutcome},
    },
    identity::adapters::memory::InMemorySessionStore,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{NewProject, Project, ProjectDetails, ProjectId, Task, TaskId},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
};

/// Project repository that can be told to reject the next task save.
#[derive(Default)]
pub struct FlakyRepository {
    inner: InMemoryProjectRepository,
    fail_next_save: AtomicBool,
    saves: AtomicUsize,
}

impl FlakyRepository {
    /// Wraps a repository holding `project`.
    #[must_use]
    pub fn with_project(project: Project) -> Self {
        Self {
            inner: InMemoryProjectRepository::with_projects([project]),
            ..Self::default()
        }
    }

    /// Makes the next `update_tasks` call fail.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Returns how many task saves were attempted.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectRepository for FlakyRepository {
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.inner.list().await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.inner.find_by_id(id).await
    }

    async fn store(&self, project: NewProject) -> ProjectRepositoryResult<Project> {
        self.inner.store(project).await
    }

    async fn update_details(
        &self,
        id: ProjectId,
        details: ProjectDetails,
    ) -> ProjectRepositoryResult<Project> {
        self.inner.update_details(id, details).await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn update_tasks(&self, id: ProjectId, tasks: Vec<Task>) -> ProjectRepositoryResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(ProjectRepositoryError::persistence(io::Error::other(
                "save rejected",
            )));
        }
        self.inner.update_tasks(id, tasks).await
    }
}

/// Board engine type used by the BDD world.
pub type TestBoard = BoardEngine<FlakyRepository, InMemorySessionStore>;

/// Project every scenario works on.
pub const PROJECT: ProjectId = ProjectId::new(1);

/// Scenario world for board drag behaviour tests.
pub struct BoardWorld {
    pub repository: Arc<FlakyRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub board: Option<TestBoard>,
    pub controller: DragController,
    pub press_accepted: Option<bool>,
    pub last_outcome: Option<TransitionOutcome>,
    pub open_error: Option<BoardAccessError>,
}

impl BoardWorld {
    /// Creates a world with no project, no session, and no open board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: Arc::new(FlakyRepository::default()),
            sessions: Arc::new(InMemorySessionStore::new()),
            board: None,
            controller: DragController::new(BoardConfig::default()),
            press_accepted: None,
            last_outcome: None,
            open_error: None,
        }
    }

    /// Returns the open board.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been opened.
    pub fn board(&self) -> Result<&TestBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board has not been opened in scenario world"))
    }

    /// Returns the project currently shown on the board.
    ///
    /// # Errors
    ///
    /// Returns an error when the board has no loaded project.
    pub fn shown_project(&self) -> Result<Project, eyre::Report> {
        self.board()?
            .snapshot()
            .project
            .project()
            .cloned()
            .ok_or_else(|| eyre::eyre!("board has no loaded project"))
    }

    /// Finds a task on the board by its title.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has the title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.shown_project()?
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
