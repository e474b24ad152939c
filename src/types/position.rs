//! Fantasy football position types and slot eligibility.

use crate::error::FantasyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy football roster positions.
///
/// Covers both individual positions and flexible roster slots. A slot in a
/// lineup is named by a `Position`; flexible slots (FLEX, SUPERFLEX) accept
/// players from several individual positions.
///
/// # Position Types
///
/// - **Individual positions**: QB, RB, WR, TE, K, DST
/// - **Flexible slots**: FLEX (RB/WR/TE), SUPERFLEX (QB/RB/WR/TE)
///
/// # Examples
///
/// ```rust
/// use fantasy_edge::Position;
///
/// assert!(Position::FLEX.accepts(Position::RB));
/// assert!(!Position::FLEX.accepts(Position::QB));
/// assert_eq!(Position::DST.to_string(), "D/ST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
    FLEX,
    SUPERFLEX,
}

impl Position {
    /// All individual positions a slot of this type accepts.
    ///
    /// For individual positions, the slot accepts only itself. For flexible
    /// slots, returns every eligible individual position.
    pub fn accepted_positions(&self) -> &'static [Position] {
        match self {
            Position::QB => &[Position::QB],
            Position::RB => &[Position::RB],
            Position::WR => &[Position::WR],
            Position::TE => &[Position::TE],
            Position::K => &[Position::K],
            Position::DST => &[Position::DST],
            Position::FLEX => &[Position::RB, Position::WR, Position::TE],
            Position::SUPERFLEX => &[Position::QB, Position::RB, Position::WR, Position::TE],
        }
    }

    /// Whether a player whose primary position is `position` may fill a slot
    /// of this type. This is a capability check, not a type check: FLEX
    /// eligibility is monotonic, a player either qualifies or does not.
    pub fn accepts(&self, position: Position) -> bool {
        self.accepted_positions().contains(&position)
    }

    /// Whether this slot accepts more than one individual position.
    pub fn is_flexible(&self) -> bool {
        matches!(self, Position::FLEX | Position::SUPERFLEX)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "D/ST",
            Position::FLEX => "FLEX",
            Position::SUPERFLEX => "SUPERFLEX",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DST" | "D/ST" | "DEF" | "D" => Ok(Position::DST),
            "FLEX" => Ok(Position::FLEX),
            "SUPERFLEX" | "SFLEX" | "OP" => Ok(Position::SUPERFLEX),
            _ => Err(FantasyError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
