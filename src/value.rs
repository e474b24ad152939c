//! Value, waiver, and breakout ranking functions.
//!
//! Three independent pure rankers over the same projection input. Ties in
//! any score break by player id ascending, matching the determinism rule
//! used by the optimizers.

use crate::error::Result;
use crate::models::{validate_roster, PlayerProjection};
use crate::types::{PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;


/// Boundary bands for breakout detection. Tunable rather than hard-coded so
/// the scorer's policy can be tested independently of fixed magic numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakoutBands {
    /// Confidence below this band signals market uncertainty.
    pub low_confidence: f64,
    /// Projected points above this band signal a promising projection.
    pub moderate_points: f64,
}

impl Default for BreakoutBands {
    fn default() -> Self {
        Self {
            low_confidence: 0.6,
            moderate_points: 12.0,
        }
    }
}

/// A player whose confidence-weighted projection clears the value threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuePlay {
    pub player_id: PlayerId,
    pub name: String,
    pub projected_points: f64,
    pub confidence: f64,
    /// `projected_points * confidence`.
    pub score: f64,
    pub reason: String,
}

/// An available player worth a waiver claim for a roster need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaiverTarget {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub projected_points: f64,
    pub confidence: f64,
    pub reason: String,
}

/// An uncertain-but-promising player flagged by the breakout scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakoutCandidate {
    pub player_id: PlayerId,
    pub name: String,
    pub projected_points: f64,
    pub confidence: f64,
    /// `projected_points * (1 - confidence)`.
    pub score: f64,
    pub reason: String,
}

fn rank_by_score(a_score: f64, a_id: PlayerId, b_score: f64, b_id: PlayerId) -> Ordering {
    b_score
        .partial_cmp(&a_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a_id.cmp(&b_id))
}

/// Rank players whose `projected_points * confidence` exceeds `threshold`,
/// best first.
pub fn value_plays(players: &[PlayerProjection], threshold: f64) -> Result<Vec<ValuePlay>> {
    validate_roster(players)?;

    let mut plays: Vec<ValuePlay> = players
        .iter()
        .filter(|p| p.weighted_points() > threshold)
        .map(|p| ValuePlay {
            player_id: p.id,
            name: p.name.clone(),
            projected_points: p.projected_points,
            confidence: p.confidence,
            score: p.weighted_points(),
            reason: format!(
                "{:.1} projected points at {:.0}% confidence",
                p.projected_points,
                p.confidence * 100.0
            ),
        })
        .collect();
    plays.sort_by(|a, b| rank_by_score(a.score, a.player_id, b.score, b.player_id));
    Ok(plays)
}

/// Rank available players who fill one of the needed positions, highest
/// projection first. The reason names the position need being filled.
pub fn waiver_targets(
    available: &[PlayerProjection],
    needs: &[Position],
) -> Result<Vec<WaiverTarget>> {
    validate_roster(available)?;

    let mut targets: Vec<WaiverTarget> = available
        .iter()
        .filter_map(|p| {
            let need = needs.iter().find(|&&slot| p.eligible_for(slot))?;
            Some(WaiverTarget {
                player_id: p.id,
                name: p.name.clone(),
                position: p.position,
                projected_points: p.projected_points,
                confidence: p.confidence,
                reason: format!("fills roster need at {need}"),
            })
        })
        .collect();
    targets.sort_by(|a, b| {
        rank_by_score(
            a.projected_points,
            a.player_id,
            b.projected_points,
            b.player_id,
        )
    });
    Ok(targets)
}

/// Flag uncertain-but-promising players: confidence below the low band with
/// projected points above the moderate band. High variance priced into the
/// market line is the breakout signal.
pub fn breakout_candidates(
    players: &[PlayerProjection],
    bands: &BreakoutBands,
) -> Result<Vec<BreakoutCandidate>> {
    validate_roster(players)?;

    let mut candidates: Vec<BreakoutCandidate> = players
        .iter()
        .filter(|p| p.confidence < bands.low_confidence && p.projected_points > bands.moderate_points)
        .map(|p| BreakoutCandidate {
            player_id: p.id,
            name: p.name.clone(),
            projected_points: p.projected_points,
            confidence: p.confidence,
            score: p.projected_points * (1.0 - p.confidence),
            reason: format!(
                "market uncertainty leaves upside: {:.1} projected points at only {:.0}% confidence",
                p.projected_points,
                p.confidence * 100.0
            ),
        })
        .collect();
    candidates.sort_by(|a, b| rank_by_score(a.score, a.player_id, b.score, b.player_id));
    Ok(candidates)
}
