//! Task status and its board transition rules.

use super::ParseTaskStatusError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::IgnoredAny};

/// Board status of a task.
///
/// The set is closed. Values read from storage that are not one of the three
/// canonical strings normalise to [`TaskStatus::ToDo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    ToDo,
    /// Work is under way.
    InProgress,
    /// Work is finished. Terminal on the board.
    Done,
}

impl TaskStatus {
    /// All statuses in column order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// Returns the canonical storage representation, also used as the
    /// column identity on the board.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "to_do",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns the human-readable column label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To do",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }

    /// Maps any stored value onto a canonical status.
    ///
    /// Unrecognised values become [`TaskStatus::ToDo`].
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self::try_from(raw).unwrap_or_default()
    }

    /// Returns `true` when no board transition may leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns `true` when the board permits moving from `self` to `target`.
    ///
    /// Any non-terminal status may move to either other status, including
    /// backwards from `in_progress` to `to_do`. Nothing leaves `done`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        !self.is_terminal() && !matches!(
            (self, target),
            (Self::ToDo, Self::ToDo) | (Self::InProgress, Self::InProgress)
        )
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "to_do" => Ok(Self::ToDo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Stored status value; anything that is not a string is tolerated and
/// normalised like an unknown string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredStatus {
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredStatus::deserialize(deserializer)?;
        Ok(match stored {
            StoredStatus::Text(text) => Self::normalize(&text),
            StoredStatus::Other(_) => Self::default(),
        })
    }
}
