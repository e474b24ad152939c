//! Trade evaluation over confidence-weighted projections.

use crate::error::{FantasyError, Result};
use crate::models::{validate_roster, PlayerProjection};
use crate::types::PlayerId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};


/// The outcome of evaluating a proposed trade.
///
/// `trade_value` is the receiving side's confidence-weighted projected
/// points minus the giving side's: positive favors accepting, negative
/// favors declining.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeResult {
    pub give: BTreeSet<PlayerId>,
    pub receive: BTreeSet<PlayerId>,
    pub trade_value: f64,
    /// Mean projection confidence across both sides.
    pub confidence: f64,
    pub explanation: String,
}

/// Evaluate a trade between two disjoint player sets.
///
/// Fails with [`FantasyError::UnknownPlayer`] if any referenced id has no
/// projection, and [`FantasyError::DuplicatePlayer`] if a player appears on
/// both sides.
pub fn evaluate_trade(
    give: &[PlayerId],
    receive: &[PlayerId],
    projections: &[PlayerProjection],
) -> Result<TradeResult> {
    validate_roster(projections)?;

    let give: BTreeSet<PlayerId> = give.iter().copied().collect();
    let receive: BTreeSet<PlayerId> = receive.iter().copied().collect();
    if let Some(&id) = give.intersection(&receive).next() {
        return Err(FantasyError::DuplicatePlayer { id });
    }

    let by_id: BTreeMap<PlayerId, &PlayerProjection> =
        projections.iter().map(|p| (p.id, p)).collect();
    let side_value = |side: &BTreeSet<PlayerId>| -> Result<f64> {
        side.iter()
            .map(|id| {
                by_id
                    .get(id)
                    .map(|p| p.weighted_points())
                    .ok_or(FantasyError::UnknownPlayer { id: *id })
            })
            .sum()
    };

    let give_value = side_value(&give)?;
    let receive_value = side_value(&receive)?;
    let trade_value = receive_value - give_value;

    let all_confidences: Vec<f64> = give
        .iter()
        .chain(receive.iter())
        .map(|id| by_id[id].confidence)
        .collect();
    let confidence = if all_confidences.is_empty() {
        0.0
    } else {
        all_confidences.iter().sum::<f64>() / all_confidences.len() as f64
    };

    let verdict = if trade_value > 5.0 {
        "Strongly favorable trade"
    } else if trade_value > 1.0 {
        "Favorable trade"
    } else if trade_value >= -1.0 {
        "Fair trade"
    } else if trade_value >= -5.0 {
        "Unfavorable trade"
    } else {
        "Strongly unfavorable trade"
    };
    let explanation = if trade_value >= 0.0 {
        format!(
            "{verdict}: the receiving side projects {:.1} more confidence-weighted points ({:.1} vs {:.1})",
            trade_value, receive_value, give_value
        )
    } else {
        format!(
            "{verdict}: the giving side projects {:.1} more confidence-weighted points ({:.1} vs {:.1})",
            -trade_value, give_value, receive_value
        )
    };

    Ok(TradeResult {
        give,
        receive,
        trade_value,
        confidence,
        explanation,
    })
}
