//! User records and the authenticated session user.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Stored user record.
///
/// Credentials are not part of the domain; stores that keep them alongside
/// the record are expected to leave them out of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(default)]
    name: String,
    role: Role,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            name: name.into(),
            role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the full name, possibly empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the full name, falling back to the login name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(&self.name, &self.username)
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login name, unique across users.
    pub username: String,
    /// Full name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
}

impl NewUser {
    /// Creates a payload. The username and name are trimmed.
    #[must_use]
    pub fn new(username: &str, name: &str, role: Role) -> Self {
        Self {
            username: username.trim().to_owned(),
            name: name.trim().to_owned(),
            role,
        }
    }

    /// Materialises the user record under `id`.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.username, self.name, self.role)
    }
}

/// Identity of the user behind the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Full name, possibly empty.
    #[serde(default)]
    pub name: String,
    /// Role at sign-in time.
    pub role: Role,
}

impl SessionUser {
    /// Returns the full name, falling back to the login name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(&self.name, &self.username)
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_owned(),
            name: user.name().to_owned(),
            role: user.role().clone(),
        }
    }
}

fn display_name<'a>(name: &'a str, username: &'a str) -> &'a str {
    if name.trim().is_empty() { username } else { name }
}
