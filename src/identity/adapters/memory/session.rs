//! In-memory session store holding the serialised session record.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

use crate::identity::{
    domain::{SessionUser, User},
    ports::SessionSource,
};

/// Session record as it is kept in storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    #[serde(flatten)]
    user: SessionUser,
    #[serde(default)]
    signed_in_at: Option<DateTime<Utc>>,
}

/// Session store keeping the session as a raw JSON record.
///
/// The record is parsed on every read. A record that does not parse reads as
/// "no session", which sends the caller back to the entry point.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    record: Arc<RwLock<Option<String>>>,
}

impl InMemorySessionStore {
    /// Creates a store with no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already signed in as `user`.
    #[must_use]
    pub fn signed_in(user: &User, clock: &impl Clock) -> Self {
        let store = Self::new();
        store.sign_in(user, clock);
        store
    }

    /// Records `user` as the current session.
    pub fn sign_in(&self, user: &User, clock: &impl Clock) {
        let session = StoredSession {
            user: SessionUser::from(user),
            signed_in_at: Some(clock.utc()),
        };
        match serde_json::to_string(&session) {
            Ok(raw) => self.replace(Some(raw)),
            Err(err) => warn!(error = %err, "failed to serialise session record"),
        }
    }

    /// Clears the current session.
    pub fn sign_out(&self) {
        self.replace(None);
    }

    /// Replaces the stored record verbatim.
    pub fn set_raw(&self, raw: impl Into<String>) {
        self.replace(Some(raw.into()));
    }

    /// Returns when the current session was opened, if recorded.
    #[must_use]
    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.parse().and_then(|session| session.signed_in_at)
    }

    fn replace(&self, value: Option<String>) {
        let mut record = self.record.write().unwrap_or_else(PoisonError::into_inner);
        *record = value;
    }

    fn parse(&self) -> Option<StoredSession> {
        let record = self.record.read().unwrap_or_else(PoisonError::into_inner);
        let raw = record.as_deref()?;
        match serde_json::from_str::<StoredSession>(raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "discarding malformed session record");
                None
            }
        }
    }
}

impl SessionSource for InMemorySessionStore {
    fn current_user(&self) -> Option<SessionUser> {
        self.parse().map(|session| session.user)
    }
}
