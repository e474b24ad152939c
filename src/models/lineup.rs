//! Lineup result types produced by the optimizers.
//!
//! These structures are designed for easy JSON serialization by a
//! presentation layer; the engine itself never reads them back.

use crate::types::{PlayerId, Position};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One filled roster slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupSlot {
    /// Slot type, e.g. RB or FLEX.
    pub slot: Position,
    /// Player assigned to the slot.
    pub player_id: PlayerId,
}

/// An optimized season-long starting lineup.
///
/// `slots` follows the order of the scoring configuration that produced it;
/// within a position group, players appear best-first. Every required slot is
/// filled and no player occupies two slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    pub slots: Vec<LineupSlot>,
    /// Roster players left out of the starting lineup.
    pub bench: BTreeSet<PlayerId>,
    pub total_projected_points: f64,
}

impl Lineup {
    /// Player occupying the given slot type at `index` (0-based within that
    /// slot type), if filled.
    pub fn player_at(&self, slot: Position, index: usize) -> Option<PlayerId> {
        self.slots
            .iter()
            .filter(|s| s.slot == slot)
            .nth(index)
            .map(|s| s.player_id)
    }

    /// All starters, in slot order.
    pub fn starters(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.slots.iter().map(|s| s.player_id)
    }
}

/// An optimized salary-capped DFS lineup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DfsLineup {
    pub slots: Vec<LineupSlot>,
    pub total_projected_points: f64,
    pub total_salary: u32,
    pub salary_remaining: u32,
    /// Starters per team, for stacking review.
    pub team_counts: BTreeMap<String, usize>,
}

impl DfsLineup {
    pub fn starters(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.slots.iter().map(|s| s.player_id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.slots.iter().any(|s| s.player_id == id)
    }
}
