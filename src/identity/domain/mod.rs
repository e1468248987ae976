//! Domain model for users and their roles.

mod ids;
mod role;
mod user;

pub use ids::UserId;
pub use role::Role;
pub use user::{NewUser, SessionUser, User};
