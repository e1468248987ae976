//! Adapter implementations of the project repository port.

pub mod document;
pub mod memory;
