//! Authorization policy and user administration.

mod authorization;
mod users;

pub use authorization::{AccessDenied, Action, AuthorizationGate, Redirect};
pub use users::{UserAdministrationError, UserAdministrationResult, UserAdministrationService};
