//! Role-based gate in front of project and board mutations.

use crate::identity::domain::SessionUser;
use thiserror::Error;

/// Operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// List projects with their progress.
    ViewProjects,
    /// Open a project's task board.
    ViewBoard,
    /// Drag a task to another status column.
    MoveTask,
    /// Create a project.
    CreateProject,
    /// Edit a project's metadata.
    EditProject,
    /// Delete a project.
    DeleteProject,
    /// Create a user.
    CreateUser,
}

impl Action {
    /// Returns `true` for project-level mutations reserved to administrators.
    #[must_use]
    pub const fn requires_administrator(self) -> bool {
        matches!(
            self,
            Self::CreateProject | Self::EditProject | Self::DeleteProject | Self::CreateUser
        )
    }
}

/// Where a refused caller is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The sign-in entry point.
    EntryPoint,
    /// The project list.
    ProjectList,
}

impl Redirect {
    /// Returns the route path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::EntryPoint => "/",
            Self::ProjectList => "/projects",
        }
    }
}

/// Reasons an action is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessDenied {
    /// There is no usable session.
    #[error("no authenticated session")]
    Unauthenticated,

    /// The session's role may not perform the action.
    #[error("role '{role}' may not perform {action:?}")]
    Forbidden {
        /// The refused action.
        action: Action,
        /// Role of the caller.
        role: String,
    },
}

impl AccessDenied {
    /// Returns where the caller should be sent instead.
    #[must_use]
    pub const fn redirect(&self) -> Redirect {
        match self {
            Self::Unauthenticated => Redirect::EntryPoint,
            Self::Forbidden { .. } => Redirect::ProjectList,
        }
    }
}

/// Authorization policy.
///
/// Project-level mutations need the administrator role. Viewing and
/// dragging tasks need only a session, whatever its role.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Creates the gate.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks whether `session` may perform `action`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::Unauthenticated`] without a session and
    /// [`AccessDenied::Forbidden`] when a privileged action is attempted by a
    /// non-administrator.
    pub fn authorize(
        self,
        session: Option<&SessionUser>,
        action: Action,
    ) -> Result<&SessionUser, AccessDenied> {
        let user = session.ok_or(AccessDenied::Unauthenticated)?;
        if action.requires_administrator() && !user.role.is_administrator() {
            return Err(AccessDenied::Forbidden {
                action,
                role: user.role.to_string(),
            });
        }
        Ok(user)
    }
}
