//! Drag interaction layer.
//!
//! Turns raw pointer input over task cards and status columns into at most
//! one [`TransitionCandidate`](crate::board::domain::TransitionCandidate) per
//! gesture. Statuses are read through [`TaskLookup`] at press time and again
//! at drop time, so a task that changed while it was being dragged is judged
//! by its current status.

mod controller;
mod pointer;

pub use controller::{DragController, DropTarget, TaskLookup};
pub use pointer::PointerPosition;
