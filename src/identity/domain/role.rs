//! User roles.

use serde::{Deserialize, Serialize};

const ADMIN_LABEL: &str = "admin";

/// Role attached to a user record.
///
/// Only [`Role::Administrator`] is privileged. Every other string, including
/// the `admin` label, is kept verbatim so it round-trips through storage
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// May create, edit, and delete projects and create users.
    Administrator,
    /// Eligible as a project owner.
    ProjectManager,
    /// Eligible as a project team member.
    Developer,
    /// Any other stored role.
    Other(String),
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Administrator => "administrador",
            Self::ProjectManager => "project-manager",
            Self::Developer => "developer",
            Self::Other(value) => value,
        }
    }

    /// Returns `true` for the administrator role.
    #[must_use]
    pub const fn is_administrator(&self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Returns `true` when administrative links should be shown.
    ///
    /// Wider than [`Self::is_administrator`]: the legacy `admin` label sees
    /// the links but is still refused every privileged action.
    #[must_use]
    pub fn shows_admin_actions(&self) -> bool {
        match self {
            Self::Administrator => true,
            Self::Other(value) => value == ADMIN_LABEL,
            Self::ProjectManager | Self::Developer => false,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "administrador" => Self::Administrator,
            "project-manager" => Self::ProjectManager,
            "developer" => Self::Developer,
            _ => Self::Other(value.to_owned()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
