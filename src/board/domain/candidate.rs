//! Transition candidates produced by drag gestures.

use crate::project::domain::{TaskId, TaskStatus};

/// A status change requested by a completed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionCandidate {
    /// Dragged task.
    pub task_id: TaskId,
    /// Status the task had when it was dropped.
    pub from: TaskStatus,
    /// Status of the column it was dropped on.
    pub to: TaskStatus,
}

impl TransitionCandidate {
    /// Creates a candidate.
    #[must_use]
    pub const fn new(task_id: TaskId, from: TaskStatus, to: TaskStatus) -> Self {
        Self { task_id, from, to }
    }

    /// Builds a candidate for moving a task currently in `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscardReason::TerminalStatus`] when `from` is done and
    /// [`DiscardReason::SameStatus`] when the move would change nothing.
    pub const fn checked(
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<Self, DiscardReason> {
        if from.can_transition_to(to) {
            Ok(Self::new(task_id, from, to))
        } else if from.is_terminal() {
            Err(DiscardReason::TerminalStatus)
        } else {
            Err(DiscardReason::SameStatus)
        }
    }
}

/// Why a gesture or candidate was dropped without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// Pointer released with no drag armed.
    NoActiveDrag,
    /// Pointer never travelled the activation distance; it was a click.
    NotActivated,
    /// Released outside every column.
    NoDropTarget,
    /// The drop target is not one of the three status columns.
    UnknownColumn(String),
    /// Dropped on the column the task is already in.
    SameStatus,
    /// The task is done and locked.
    TerminalStatus,
    /// The task is no longer on the board.
    TaskNotFound,
    /// The board has no loaded project.
    ProjectNotLoaded,
    /// A persistence call for this task is still outstanding.
    TransitionInFlight,
    /// The board has been torn down.
    ViewDisposed,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResolution {
    /// The gesture produced a transition to apply.
    Candidate(TransitionCandidate),
    /// The gesture is ignored.
    Discarded(DiscardReason),
}

impl DropResolution {
    /// Returns the candidate, if the gesture produced one.
    #[must_use]
    pub const fn candidate(&self) -> Option<TransitionCandidate> {
        match self {
            Self::Candidate(candidate) => Some(*candidate),
            Self::Discarded(_) => None,
        }
    }
}
