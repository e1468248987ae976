//! Projects and the tasks they own.
//!
//! A project is the unit of persistence: its task collection is stored as a
//! sub-field and replaced as a whole. The module follows the same hexagonal
//! layout as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
