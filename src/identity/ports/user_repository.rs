//! Repository port for user records.

use crate::identity::domain::{NewUser, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every stored user.
    async fn list(&self) -> UserRepositoryResult<Vec<User>>;

    /// Finds a user by login name.
    ///
    /// Returns `None` when no user has the name.
    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>>;

    /// Stores a new user, assigning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUsername`] when the login name
    /// is taken.
    async fn store(&self, user: NewUser) -> UserRepositoryResult<User>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// The username is already taken.
    #[error("duplicate username: {0}")]
    DuplicateUsername(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
