//! Users, roles, sessions, and the authorization policy.
//!
//! Credential checks happen outside this crate. What arrives here is a
//! session record for an already authenticated user; this module decides
//! what that user may do.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Authorization and user administration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
