//! ID types for the fantasy optimization engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for player IDs.
///
/// Ensures player IDs are handled consistently throughout the engine and
/// provides type safety to prevent mixing up player IDs with other numeric
/// values such as salaries or slot counts.
///
/// # Examples
///
/// ```rust
/// use fantasy_edge::PlayerId;
///
/// let id = PlayerId::new(4262921);
/// assert_eq!(id.as_u64(), 4262921);
/// assert_eq!(id.to_string(), "4262921");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new PlayerId from a u64 value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
