//! Interactive task board for a single project.
//!
//! The board shows a project's tasks in three status columns. Pointer input
//! is turned into transition candidates by [`drag`]; [`services`] applies a
//! candidate optimistically, persists the new task list, and reconciles the
//! view with the outcome. [`domain`] holds the view state and the
//! presentation model the columns are rendered from.

pub mod config;
pub mod domain;
pub mod drag;
pub mod services;

pub use config::BoardConfig;

#[cfg(test)]
mod tests;
