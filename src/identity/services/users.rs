//! Service layer for administrator-only user management.

use super::{AccessDenied, Action, AuthorizationGate};
use crate::identity::{
    domain::{NewUser, Role, User},
    ports::{SessionSource, UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for user administration.
#[derive(Debug, Error)]
pub enum UserAdministrationError {
    /// The caller may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user administration operations.
pub type UserAdministrationResult<T> = Result<T, UserAdministrationError>;

/// User administration service.
#[derive(Clone)]
pub struct UserAdministrationService<U, S>
where
    U: UserRepository,
    S: SessionSource,
{
    repository: Arc<U>,
    sessions: Arc<S>,
    gate: AuthorizationGate,
}

impl<U, S> UserAdministrationService<U, S>
where
    U: UserRepository,
    S: SessionSource,
{
    /// Creates a new user administration service.
    #[must_use]
    pub const fn new(repository: Arc<U>, sessions: Arc<S>) -> Self {
        Self {
            repository,
            sessions,
            gate: AuthorizationGate::new(),
        }
    }

    /// Creates a user. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdministrationError::Access`] when the caller is not an
    /// administrator, and [`UserAdministrationError::Repository`] when the
    /// username is taken or storage fails.
    pub async fn create_user(&self, user: NewUser) -> UserAdministrationResult<User> {
        let session = self.sessions.current_user();
        let admin = self.gate.authorize(session.as_ref(), Action::CreateUser)?;
        let created = self.repository.store(user).await?;
        info!(
            user_id = %created.id(),
            role = %created.role(),
            created_by = %admin.id,
            "user created"
        );
        Ok(created)
    }

    /// Lists users holding `role`, for owner and team pickers.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdministrationError::Access`] without a session, and
    /// [`UserAdministrationError::Repository`] when the lookup fails.
    pub async fn users_with_role(&self, role: &Role) -> UserAdministrationResult<Vec<User>> {
        let session = self.sessions.current_user();
        self.gate.authorize(session.as_ref(), Action::ViewProjects)?;
        let users = self.repository.list().await?;
        Ok(users
            .into_iter()
            .filter(|user| user.role() == role)
            .collect())
    }
}
