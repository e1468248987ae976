//! Session-read capability injected into services and the board.

use crate::identity::domain::SessionUser;

/// Supplies the user behind the current session, if any.
///
/// Implementations decide how the session is kept; callers only ever read
/// it, so core logic never reaches for ambient global state.
pub trait SessionSource: Send + Sync {
    /// Returns the signed-in user, or `None` when there is no usable session.
    fn current_user(&self) -> Option<SessionUser>;
}

impl<T: SessionSource + ?Sized> SessionSource for std::sync::Arc<T> {
    fn current_user(&self) -> Option<SessionUser> {
        (**self).current_user()
    }
}
