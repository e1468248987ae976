//! In-memory repository for user records.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{NewUser, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with existing users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let by_id = users.into_iter().map(|user| (user.id(), user)).collect();
        Self {
            users: Arc::new(RwLock::new(by_id)),
        }
    }
}

fn lock_error(message: String) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(message))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        let users = self.users.read().map_err(|err| lock_error(err.to_string()))?;
        Ok(users.values().cloned().collect())
    }

    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>> {
        let users = self.users.read().map_err(|err| lock_error(err.to_string()))?;
        Ok(users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn store(&self, user: NewUser) -> UserRepositoryResult<User> {
        let mut users = self.users.write().map_err(|err| lock_error(err.to_string()))?;
        if users.values().any(|existing| existing.username() == user.username) {
            return Err(UserRepositoryError::DuplicateUsername(user.username));
        }
        let id = users
            .keys()
            .next_back()
            .map_or(UserId::new(1), |last| last.next());
        let stored = user.into_user(id);
        users.insert(id, stored.clone());
        Ok(stored)
    }
}
