//! Board configuration.

use serde::{Deserialize, Serialize};

/// Tunables for board interaction.
///
/// # Examples
///
/// ```
/// use taskboard::board::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.activation_distance, 5);
///
/// let touch = BoardConfig::touch();
/// assert!(touch.activation_distance > config.activation_distance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pointer travel, in pointer units, before a press becomes a drag.
    /// Anything shorter is a click.
    pub activation_distance: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            activation_distance: 5,
        }
    }
}

impl BoardConfig {
    /// Creates a configuration tolerant of finger jitter on touch screens.
    #[must_use]
    pub const fn touch() -> Self {
        Self {
            activation_distance: 12,
        }
    }

    /// Creates a configuration for precise pointers where any movement
    /// starts a drag.
    #[must_use]
    pub const fn precise() -> Self {
        Self {
            activation_distance: 0,
        }
    }

    /// Returns the activation distance squared, for comparison against
    /// squared pointer displacement.
    #[must_use]
    pub fn activation_distance_squared(&self) -> u64 {
        let distance = u64::from(self.activation_distance);
        distance.saturating_mul(distance)
    }
}
