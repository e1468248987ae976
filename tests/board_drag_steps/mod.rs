//! Step definitions for board drag scenarios.

pub mod given;
pub mod world;
