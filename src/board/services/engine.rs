//! Optimistic apply, persist, and reconcile loop behind the board.

use crate::{
    board::{
        domain::{
            BoardScreen, BoardViewState, DiscardReason, DropResolution, ProjectLoad,
            TransitionCandidate,
        },
        drag::{DragController, DropTarget, TaskLookup},
    },
    identity::{
        ports::SessionSource,
        services::{AccessDenied, Action, AuthorizationGate},
    },
    project::{
        domain::{Project, ProjectId, Task, TaskId, TaskStatus},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
};
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised when opening or driving a board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardAccessError {
    /// The session may not view the board or move its tasks.
    #[error(transparent)]
    Access(#[from] AccessDenied),
}

/// How a transition request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The new task list was persisted.
    Confirmed {
        /// `false` when the follow-up fetch failed and the optimistic view
        /// was kept.
        refreshed: bool,
    },
    /// Persisting failed and the dragged task was put back.
    RolledBack,
    /// The request was invalid against the current view; nothing changed.
    Discarded(DiscardReason),
    /// The board was torn down before the request completed.
    Abandoned,
}

#[derive(Debug, Default)]
struct BoardSlot {
    project: ProjectLoad,
    in_flight: BTreeSet<TaskId>,
    disposed: bool,
}

impl BoardSlot {
    fn view(&self) -> BoardViewState {
        BoardViewState {
            project: self.project.clone(),
            saving: !self.in_flight.is_empty(),
        }
    }

    fn status_of(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.project
            .project()
            .and_then(|project| project.task(task_id))
            .map(Task::status)
    }
}

/// Board state for one project, reconciled against the repository.
///
/// Handles are cheap to clone and share one view. Transitions on different
/// tasks may overlap; a task with an outstanding persistence call refuses
/// further transitions until that call settles.
pub struct BoardEngine<R, S>
where
    R: ProjectRepository,
    S: SessionSource,
{
    repository: Arc<R>,
    sessions: Arc<S>,
    gate: AuthorizationGate,
    project_id: ProjectId,
    slot: Arc<RwLock<BoardSlot>>,
}

impl<R, S> Clone for BoardEngine<R, S>
where
    R: ProjectRepository,
    S: SessionSource,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            sessions: Arc::clone(&self.sessions),
            gate: self.gate,
            project_id: self.project_id,
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<R, S> BoardEngine<R, S>
where
    R: ProjectRepository,
    S: SessionSource,
{
    /// Opens the board for `project_id` in the loading state.
    ///
    /// # Errors
    ///
    /// Returns [`BoardAccessError::Access`] when there is no session.
    pub fn open(
        repository: Arc<R>,
        sessions: Arc<S>,
        project_id: ProjectId,
    ) -> Result<Self, BoardAccessError> {
        let gate = AuthorizationGate::new();
        let session = sessions.current_user();
        let user = gate.authorize(session.as_ref(), Action::ViewBoard)?;
        debug!(%project_id, user_id = %user.id, "board opened");
        Ok(Self {
            repository,
            sessions,
            gate,
            project_id,
            slot: Arc::new(RwLock::new(BoardSlot::default())),
        })
    }

    /// Returns the project this board shows.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Fetches the project and replaces the view with the result.
    ///
    /// A missing project and a failed fetch both show as not found.
    pub async fn load(&self) -> BoardViewState {
        let fetched = self.repository.find_by_id(self.project_id).await;
        let next = match fetched {
            Ok(Some(project)) => ProjectLoad::Loaded(project),
            Ok(None) => ProjectLoad::NotFound,
            Err(err) => {
                warn!(project_id = %self.project_id, error = %err, "project fetch failed");
                ProjectLoad::NotFound
            }
        };
        let mut slot = self.write();
        if !slot.disposed {
            slot.project = next;
        }
        slot.view()
    }

    /// Returns a copy of the current view.
    #[must_use]
    pub fn snapshot(&self) -> BoardViewState {
        self.read().view()
    }

    /// Returns what the board area should render.
    ///
    /// After [`Self::teardown`] the last view is still returned, with no
    /// card draggable.
    #[must_use]
    pub fn screen(&self) -> BoardScreen {
        let slot = self.read();
        BoardScreen::from_view(&slot.view(), |task_id| {
            slot.disposed || slot.in_flight.contains(&task_id)
        })
    }

    /// Returns `true` while a persistence call for `task_id` is outstanding.
    #[must_use]
    pub fn is_task_saving(&self, task_id: TaskId) -> bool {
        self.read().in_flight.contains(&task_id)
    }

    /// Returns `true` when pressing the task's card may start a drag.
    #[must_use]
    pub fn is_draggable(&self, task_id: TaskId) -> bool {
        let slot = self.read();
        !slot.disposed
            && !slot.in_flight.contains(&task_id)
            && slot
                .status_of(task_id)
                .is_some_and(|status| !status.is_terminal())
    }

    /// Returns `true` once [`Self::teardown`] has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.read().disposed
    }

    /// Disposes of the view; completions that arrive later change nothing.
    pub fn teardown(&self) {
        let mut slot = self.write();
        slot.disposed = true;
        slot.in_flight.clear();
        debug!(project_id = %self.project_id, "board torn down");
    }

    /// Releases `controller`'s gesture over `target` and applies the
    /// resulting candidate.
    ///
    /// # Errors
    ///
    /// Returns [`BoardAccessError::Access`] when the session has ended.
    pub async fn complete_drag(
        &self,
        controller: &mut DragController,
        target: Option<&DropTarget>,
    ) -> Result<TransitionOutcome, BoardAccessError> {
        match controller.pointer_up(target, self) {
            DropResolution::Candidate(candidate) => self.apply_transition(candidate).await,
            DropResolution::Discarded(reason) => Ok(TransitionOutcome::Discarded(reason)),
        }
    }

    /// Moves a task to another column.
    ///
    /// The view changes before the repository is called. On success the
    /// project is fetched again and replaces the view; on failure only the
    /// dragged task is put back, so overlapping moves of other tasks keep
    /// their optimistic state.
    ///
    /// # Errors
    ///
    /// Returns [`BoardAccessError::Access`] when the session has ended.
    /// Persistence failures are reported as
    /// [`TransitionOutcome::RolledBack`].
    pub async fn apply_transition(
        &self,
        candidate: TransitionCandidate,
    ) -> Result<TransitionOutcome, BoardAccessError> {
        self.authorize(Action::MoveTask)?;
        let task_id = candidate.task_id;
        let (snapshot, next_tasks) = match self.begin(candidate) {
            Ok(pending) => pending,
            Err(reason) => {
                debug!(%task_id, ?reason, "transition discarded");
                return Ok(TransitionOutcome::Discarded(reason));
            }
        };

        let persisted = self
            .repository
            .update_tasks(self.project_id, next_tasks)
            .await;
        let outcome = match persisted {
            Ok(()) => self.confirm(candidate).await,
            Err(err) => self.roll_back(snapshot, &err),
        };
        Ok(outcome)
    }

    fn authorize(&self, action: Action) -> Result<(), AccessDenied> {
        let session = self.sessions.current_user();
        self.gate.authorize(session.as_ref(), action).map(|_| ())
    }

    /// Validates the candidate, applies it to the view, and marks the task
    /// in flight. Returns the pre-move snapshot and the list to persist.
    fn begin(&self, candidate: TransitionCandidate) -> Result<(Task, Vec<Task>), DiscardReason> {
        let mut guard = self.write();
        let slot = &mut *guard;
        if slot.disposed {
            return Err(DiscardReason::ViewDisposed);
        }
        if slot.in_flight.contains(&candidate.task_id) {
            return Err(DiscardReason::TransitionInFlight);
        }
        let project = slot
            .project
            .project_mut()
            .ok_or(DiscardReason::ProjectNotLoaded)?;
        let task = project
            .task(candidate.task_id)
            .ok_or(DiscardReason::TaskNotFound)?;
        TransitionCandidate::checked(candidate.task_id, task.status(), candidate.to)?;
        let snapshot = task.clone();
        let next_tasks = project
            .tasks_with_status(candidate.task_id, candidate.to)
            .map_err(|_| DiscardReason::TaskNotFound)?;
        project.replace_tasks(next_tasks.clone());
        slot.in_flight.insert(candidate.task_id);
        Ok((snapshot, next_tasks))
    }

    async fn confirm(&self, candidate: TransitionCandidate) -> TransitionOutcome {
        if self.is_disposed() {
            return TransitionOutcome::Abandoned;
        }
        let refetched = self.repository.find_by_id(self.project_id).await;
        self.settle(candidate, refetched)
    }

    fn settle(
        &self,
        candidate: TransitionCandidate,
        refetched: ProjectRepositoryResult<Option<Project>>,
    ) -> TransitionOutcome {
        let task_id = candidate.task_id;
        let mut guard = self.write();
        let slot = &mut *guard;
        slot.in_flight.remove(&task_id);
        if slot.disposed {
            return TransitionOutcome::Abandoned;
        }
        match refetched {
            Ok(Some(project)) => {
                slot.project = ProjectLoad::Loaded(project);
                info!(
                    project_id = %self.project_id,
                    %task_id,
                    from = %candidate.from,
                    to = %candidate.to,
                    "task moved"
                );
                TransitionOutcome::Confirmed { refreshed: true }
            }
            Ok(None) => {
                slot.project = ProjectLoad::NotFound;
                warn!(project_id = %self.project_id, %task_id, "project vanished after task move");
                TransitionOutcome::Confirmed { refreshed: true }
            }
            Err(err) => {
                warn!(
                    project_id = %self.project_id,
                    %task_id,
                    error = %err,
                    "refetch after task move failed; keeping optimistic view"
                );
                TransitionOutcome::Confirmed { refreshed: false }
            }
        }
    }

    fn roll_back(&self, snapshot: Task, err: &ProjectRepositoryError) -> TransitionOutcome {
        let task_id = snapshot.id();
        let mut guard = self.write();
        let slot = &mut *guard;
        slot.in_flight.remove(&task_id);
        if slot.disposed {
            return TransitionOutcome::Abandoned;
        }
        let restored = slot
            .project
            .project_mut()
            .is_some_and(|project| project.restore_task(snapshot));
        warn!(
            project_id = %self.project_id,
            %task_id,
            restored,
            error = %err,
            "task move failed; rolled back"
        );
        TransitionOutcome::RolledBack
    }

    fn read(&self) -> RwLockReadGuard<'_, BoardSlot> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardSlot> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R, S> TaskLookup for BoardEngine<R, S>
where
    R: ProjectRepository,
    S: SessionSource,
{
    fn status_of(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.read().status_of(task_id)
    }

    fn is_busy(&self, task_id: TaskId) -> bool {
        self.is_task_saving(task_id)
    }
}
