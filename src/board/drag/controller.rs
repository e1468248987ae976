//! Pointer-driven drag state machine.

use super::PointerPosition;
use crate::board::{
    BoardConfig,
    domain::{BoardViewState, DiscardReason, DropResolution, TransitionCandidate},
};
use crate::project::domain::{Project, TaskId, TaskStatus};
use tracing::debug;

/// Read access to the current status of tasks on the board.
pub trait TaskLookup {
    /// Returns the task's current status, or `None` if it is not on the
    /// board.
    fn status_of(&self, task_id: TaskId) -> Option<TaskStatus>;

    /// Returns `true` while a persistence call for the task is outstanding.
    fn is_busy(&self, _task_id: TaskId) -> bool {
        false
    }
}

impl TaskLookup for Project {
    fn status_of(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.task(task_id).map(crate::project::domain::Task::status)
    }
}

impl TaskLookup for BoardViewState {
    fn status_of(&self, task_id: TaskId) -> Option<TaskStatus> {
        Self::status_of(self, task_id)
    }
}

/// Element the pointer was released over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropTarget {
    id: String,
}

impl DropTarget {
    /// Creates a target from a droppable element's identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Creates the target for a status column.
    #[must_use]
    pub fn column(status: TaskStatus) -> Self {
        Self::new(status.as_str())
    }

    /// Returns the element identity.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragPhase {
    Idle,
    Pressed {
        task_id: TaskId,
        origin: PointerPosition,
    },
    Dragging {
        task_id: TaskId,
    },
}

/// Tracks one pointer gesture at a time.
///
/// A press on a card arms the gesture; it only becomes a drag once the
/// pointer has travelled the configured activation distance, so clicks and
/// small jitters never move a task.
#[derive(Debug, Clone)]
pub struct DragController {
    config: BoardConfig,
    phase: DragPhase,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new(config: BoardConfig) -> Self {
        Self {
            config,
            phase: DragPhase::Idle,
        }
    }

    /// Returns the task being pressed or dragged, if any.
    #[must_use]
    pub const fn active_task(&self) -> Option<TaskId> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Pressed { task_id, .. } | DragPhase::Dragging { task_id } => Some(task_id),
        }
    }

    /// Returns `true` once the activation distance has been reached.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Handles a press on a task card.
    ///
    /// Returns `true` when the gesture was armed. Done tasks, tasks missing
    /// from the board, and tasks with an outstanding save cannot be pressed
    /// into a drag.
    pub fn pointer_down(
        &mut self,
        task_id: TaskId,
        at: PointerPosition,
        lookup: &impl TaskLookup,
    ) -> bool {
        let draggable = lookup
            .status_of(task_id)
            .is_some_and(|status| !status.is_terminal())
            && !lookup.is_busy(task_id);
        self.phase = if draggable {
            DragPhase::Pressed {
                task_id,
                origin: at,
            }
        } else {
            debug!(%task_id, "press on locked or unknown task ignored");
            DragPhase::Idle
        };
        draggable
    }

    /// Handles pointer movement.
    ///
    /// Returns the task id on the move that activates the drag.
    pub fn pointer_move(&mut self, at: PointerPosition) -> Option<TaskId> {
        let DragPhase::Pressed { task_id, origin } = self.phase else {
            return None;
        };
        if origin.distance_squared(at) < self.config.activation_distance_squared() {
            return None;
        }
        self.phase = DragPhase::Dragging { task_id };
        debug!(%task_id, "drag started");
        Some(task_id)
    }

    /// Abandons the current gesture.
    pub const fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Handles the pointer release and resolves the gesture.
    ///
    /// The controller is idle afterwards whatever the outcome.
    pub fn pointer_up(
        &mut self,
        target: Option<&DropTarget>,
        lookup: &impl TaskLookup,
    ) -> DropResolution {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        let resolution = match phase {
            DragPhase::Idle => DropResolution::Discarded(DiscardReason::NoActiveDrag),
            DragPhase::Pressed { .. } => DropResolution::Discarded(DiscardReason::NotActivated),
            DragPhase::Dragging { task_id } => resolve_drop(task_id, target, lookup),
        };
        if let DropResolution::Discarded(reason) = &resolution {
            debug!(?reason, "drop discarded");
        }
        resolution
    }
}

fn resolve_drop(
    task_id: TaskId,
    target: Option<&DropTarget>,
    lookup: &impl TaskLookup,
) -> DropResolution {
    let Some(target) = target else {
        return DropResolution::Discarded(DiscardReason::NoDropTarget);
    };
    let Ok(to) = TaskStatus::try_from(target.id()) else {
        return DropResolution::Discarded(DiscardReason::UnknownColumn(target.id().to_owned()));
    };
    // Status is re-read here rather than captured at press time.
    let Some(from) = lookup.status_of(task_id) else {
        return DropResolution::Discarded(DiscardReason::TaskNotFound);
    };
    match TransitionCandidate::checked(task_id, from, to) {
        Ok(candidate) => DropResolution::Candidate(candidate),
        Err(reason) => DropResolution::Discarded(reason),
    }
}
