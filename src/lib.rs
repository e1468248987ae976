//! Taskboard: project and task tracking with an interactive status board.
//!
//! Administrators create projects and users; every signed-in user can open
//! a project's board and drag its tasks between the "To do", "In progress",
//! and "Done" columns. Moves are shown immediately, persisted, and then
//! reconciled with the stored project.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure records and rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and sessions
//! - **Adapters**: Concrete implementations of ports (in-memory, JSON file)
//!
//! # Modules
//!
//! - [`project`]: Projects, tasks, progress, and the project catalogue
//! - [`identity`]: Users, roles, sessions, and the authorization gate
//! - [`board`]: Drag interaction and optimistic board reconciliation

pub mod board;
pub mod identifier;
pub mod identity;
pub mod project;
