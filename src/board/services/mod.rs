//! Reconciliation of board moves with the project repository.

mod engine;

pub use engine::{BoardAccessError, BoardEngine, TransitionOutcome};
