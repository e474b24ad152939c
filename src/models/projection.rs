//! Player projection records supplied by the projection provider.

use crate::error::{FantasyError, Result};
use crate::types::{PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A scored player projection for one week or slate.
///
/// Produced externally from betting-market data and treated as an immutable
/// snapshot: the engine never mutates a projection after receiving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProjection {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: String,
    /// Expected fantasy points, non-negative.
    pub projected_points: f64,
    /// Market-derived confidence in the projection, in `[0, 1]`.
    pub confidence: f64,
    /// Flexible slot types this player may fill beyond the conventional
    /// eligibility of their primary position (e.g. a QB tagged FLEX in a
    /// league that allows it). Usually empty.
    #[serde(default)]
    pub flex_slots: BTreeSet<Position>,
}

impl PlayerProjection {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        projected_points: f64,
        confidence: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            team: team.into(),
            projected_points,
            confidence,
            flex_slots: BTreeSet::new(),
        }
    }

    /// Tag this player as eligible for an additional flexible slot type.
    pub fn with_flex_slot(mut self, slot: Position) -> Self {
        self.flex_slots.insert(slot);
        self
    }

    /// Whether this player may fill a slot of the given type. Eligibility is
    /// a capability check: the slot's conventional position set, plus any
    /// per-player flexible tags.
    pub fn eligible_for(&self, slot: Position) -> bool {
        slot.accepts(self.position) || self.flex_slots.contains(&slot)
    }

    /// Confidence-weighted projection, the valuation unit used by the trade
    /// evaluator and value scorer.
    pub fn weighted_points(&self) -> f64 {
        self.projected_points * self.confidence
    }

    /// Check the per-record invariants from the provider contract.
    pub fn validate(&self) -> Result<()> {
        if !self.projected_points.is_finite() || self.projected_points < 0.0 {
            return Err(FantasyError::InvalidProjection {
                name: self.name.clone(),
                reason: format!("projected_points must be >= 0, got {}", self.projected_points),
            });
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(FantasyError::InvalidProjection {
                name: self.name.clone(),
                reason: format!("confidence must be in [0, 1], got {}", self.confidence),
            });
        }
        if self.position.is_flexible() {
            return Err(FantasyError::InvalidProjection {
                name: self.name.clone(),
                reason: format!("{} is a slot type, not a player position", self.position),
            });
        }
        if let Some(slot) = self.flex_slots.iter().find(|s| !s.is_flexible()) {
            return Err(FantasyError::InvalidProjection {
                name: self.name.clone(),
                reason: format!("{slot} is not a flexible slot type"),
            });
        }
        Ok(())
    }
}

/// A projection extended with a contest salary, used only by the DFS
/// optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedPlayer {
    #[serde(flatten)]
    pub projection: PlayerProjection,
    /// DFS contest salary, strictly positive.
    pub salary: u32,
}

impl PricedPlayer {
    pub fn new(projection: PlayerProjection, salary: u32) -> Self {
        Self { projection, salary }
    }

    pub fn validate(&self) -> Result<()> {
        self.projection.validate()?;
        if self.salary == 0 {
            return Err(FantasyError::InvalidProjection {
                name: self.projection.name.clone(),
                reason: "salary must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Validate a season-long roster batch: per-record invariants plus
/// one-entry-per-player.
pub fn validate_roster(roster: &[PlayerProjection]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for projection in roster {
        projection.validate()?;
        if !seen.insert(projection.id) {
            return Err(FantasyError::DuplicatePlayer { id: projection.id });
        }
    }
    Ok(())
}

/// Validate a DFS player pool: per-record invariants plus one-entry-per-player.
pub fn validate_pool(pool: &[PricedPlayer]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for player in pool {
        player.validate()?;
        if !seen.insert(player.projection.id) {
            return Err(FantasyError::DuplicatePlayer {
                id: player.projection.id,
            });
        }
    }
    Ok(())
}
