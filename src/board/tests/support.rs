//! Scripted repository and fixtures shared by the board tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

use crate::identity::{
    adapters::memory::InMemorySessionStore,
    domain::{Role, User, UserId},
};
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{NewProject, Project, ProjectDetails, ProjectId, Task, TaskId, TaskStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use mockable::DefaultClock;

pub(super) const PROJECT: ProjectId = ProjectId::new(1);

/// `[{id:1, to_do}, {id:2, done}]`.
pub(super) fn two_task_project() -> Project {
    Project::new(PROJECT, ProjectDetails::new("Apollo")).with_tasks(vec![
        Task::new(TaskId::new(1), "Design"),
        Task::new(TaskId::new(2), "Ship").with_status(TaskStatus::Done),
    ])
}

/// Three open tasks and one done task.
pub(super) fn busy_project() -> Project {
    Project::new(PROJECT, ProjectDetails::new("Hermes")).with_tasks(vec![
        Task::new(TaskId::new(1), "Plan"),
        Task::new(TaskId::new(2), "Build").with_status(TaskStatus::InProgress),
        Task::new(TaskId::new(3), "Test"),
        Task::new(TaskId::new(4), "Release").with_status(TaskStatus::Done),
    ])
}

pub(super) fn statuses(project: &Project) -> Vec<(u64, TaskStatus)> {
    project
        .tasks()
        .iter()
        .map(|task| (task.id().value(), task.status()))
        .collect()
}

pub(super) fn session_as(role: Role) -> Arc<InMemorySessionStore> {
    let user = User::new(UserId::new(7), "ana", "Ana", role);
    Arc::new(InMemorySessionStore::signed_in(&user, &DefaultClock))
}

/// Behaviour of one `update_tasks` call.
#[derive(Default)]
pub(super) struct WriteScript {
    entered: Option<Arc<Notify>>,
    release: Option<Arc<Notify>>,
    fail: bool,
    persist_as: Option<Vec<Task>>,
    remove_after: bool,
}

impl WriteScript {
    pub(super) fn succeed() -> Self {
        Self::default()
    }

    pub(super) fn fail() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Stores `tasks` instead of what the board sent.
    pub(super) fn persisting(mut self, tasks: Vec<Task>) -> Self {
        self.persist_as = Some(tasks);
        self
    }

    /// Deletes the project once the write has landed.
    pub(super) fn removing_project(mut self) -> Self {
        self.remove_after = true;
        self
    }

    /// Parks the call until the returned handle releases it.
    pub(super) fn held(mut self) -> (Self, HeldWrite) {
        let handle = HeldWrite {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        self.entered = Some(Arc::clone(&handle.entered));
        self.release = Some(Arc::clone(&handle.release));
        (self, handle)
    }
}

/// Handle on a parked `update_tasks` call.
pub(super) struct HeldWrite {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl HeldWrite {
    /// Waits until the repository has received the call.
    pub(super) async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets the call complete.
    pub(super) fn release(&self) {
        self.release.notify_one();
    }
}

/// In-memory repository whose task writes and reads follow a script.
#[derive(Default)]
pub(super) struct ScriptedRepository {
    inner: InMemoryProjectRepository,
    scripts: Mutex<VecDeque<WriteScript>>,
    fail_reads: AtomicBool,
    writes: AtomicUsize,
}

impl ScriptedRepository {
    pub(super) fn with_project(project: Project) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryProjectRepository::with_projects([project]),
            ..Self::default()
        })
    }

    pub(super) fn push(&self, script: WriteScript) {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(script);
    }

    pub(super) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(super) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(super) async fn stored(&self) -> Option<Project> {
        self.inner.find_by_id(PROJECT).await.ok().flatten()
    }
}

fn injected(message: &str) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(io::Error::other(message.to_owned()))
}

#[async_trait]
impl ProjectRepository for ScriptedRepository {
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.inner.list().await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("read failed"));
        }
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
        self.writes.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_default();
        if let Some(entered) = &script.entered {
            entered.notify_one();
        }
        if let Some(release) = &script.release {
            release.notified().await;
        }
        if script.fail {
            return Err(injected("write rejected"));
        }
        self.inner
            .update_tasks(id, script.persist_as.unwrap_or(tasks))
            .await?;
        if script.remove_after {
            self.inner.delete(id).await?;
        }
        Ok(())
    }
}
