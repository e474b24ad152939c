//! Roster-slot requirements for lineup construction.

use crate::error::{FantasyError, Result};
use crate::types::Position;
use serde::{Deserialize, Serialize};

/// Roster-slot requirements for a league or contest.
///
/// An ordered sequence of `(slot, required_count)` pairs; the order is
/// preserved in optimizer output. Supplied by the caller and consumed
/// read-only — every optimization call takes its configuration explicitly,
/// there is no shared analyzer state between calls.
///
/// # Examples
///
/// ```rust
/// use fantasy_edge::ScoringConfiguration;
///
/// let config = ScoringConfiguration::standard();
/// assert_eq!(config.lineup_size(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfiguration {
    pub roster_slots: Vec<(Position, usize)>,
}

impl ScoringConfiguration {
    pub fn new(roster_slots: Vec<(Position, usize)>) -> Self {
        Self { roster_slots }
    }

    /// Standard season-long lineup: QB, 2 RB, 2 WR, TE, FLEX.
    pub fn standard() -> Self {
        Self::new(vec![
            (Position::QB, 1),
            (Position::RB, 2),
            (Position::WR, 2),
            (Position::TE, 1),
            (Position::FLEX, 1),
        ])
    }

    /// Classic DFS (DraftKings) lineup: QB, 2 RB, 3 WR, TE, FLEX, D/ST.
    pub fn dfs_default() -> Self {
        Self::new(vec![
            (Position::QB, 1),
            (Position::RB, 2),
            (Position::WR, 3),
            (Position::TE, 1),
            (Position::FLEX, 1),
            (Position::DST, 1),
        ])
    }

    /// Total number of starters the configuration requires.
    pub fn lineup_size(&self) -> usize {
        self.roster_slots.iter().map(|(_, count)| count).sum()
    }

    /// Expand to one entry per slot, preserving configuration order.
    pub fn expanded_slots(&self) -> Vec<Position> {
        self.roster_slots
            .iter()
            .flat_map(|&(slot, count)| std::iter::repeat(slot).take(count))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.lineup_size() == 0 {
            return Err(FantasyError::InvalidConstraints {
                reason: "scoring configuration requires at least one roster slot".to_string(),
            });
        }
        Ok(())
    }
}
