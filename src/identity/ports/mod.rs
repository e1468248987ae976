//! Port contracts for user storage and session access.

pub mod session;
pub mod user_repository;

pub use session::SessionSource;
pub use user_repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
