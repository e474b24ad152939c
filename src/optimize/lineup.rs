//! Season-long lineup optimizer.
//!
//! Selects the position-constrained starting lineup maximizing total
//! projected points from an unconstrained-budget roster. Strict slot
//! requirements are disjoint and FLEX eligibility is monotonic, so the
//! greedy order (strict positions first, then flexible slots narrowest
//! eligibility first from the best leftovers) is optimal for this
//! constraint model.

use crate::error::{FantasyError, Result};
use crate::models::{validate_roster, Lineup, LineupSlot, PlayerProjection, ScoringConfiguration};
use crate::types::{PlayerId, Position};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, VecDeque};


/// Ordering used wherever a "best player" choice is made: projected points
/// descending, then confidence descending, then player id ascending. The id
/// tail makes every optimizer decision deterministic.
pub(crate) fn rank_projections(a: &PlayerProjection, b: &PlayerProjection) -> Ordering {
    b.projected_points
        .partial_cmp(&a.projected_points)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// Select the optimal starting lineup for a roster.
///
/// Every required slot is filled with a distinct eligible player or the call
/// fails with [`FantasyError::RosterInfeasible`] naming the unmet slot; the
/// optimizer never silently under-fills.
pub fn optimize_lineup(
    roster: &[PlayerProjection],
    config: &ScoringConfiguration,
) -> Result<Lineup> {
    config.validate()?;
    validate_roster(roster)?;

    // Aggregate strict requirements; the same position may appear in several
    // configuration entries.
    let mut strict_required: BTreeMap<Position, usize> = BTreeMap::new();
    for &(slot, count) in &config.roster_slots {
        if !slot.is_flexible() && count > 0 {
            *strict_required.entry(slot).or_insert(0) += count;
        }
    }

    let mut by_position: BTreeMap<Position, Vec<&PlayerProjection>> = BTreeMap::new();
    for projection in roster {
        by_position.entry(projection.position).or_default().push(projection);
    }
    for players in by_position.values_mut() {
        players.sort_by(|a, b| rank_projections(a, b));
    }

    // Reserve the top `required` players per strict position. No flexible
    // slot competes for these picks, so taking the head of each sorted group
    // is exact.
    let mut used: BTreeSet<PlayerId> = BTreeSet::new();
    let mut strict_queues: BTreeMap<Position, VecDeque<&PlayerProjection>> = BTreeMap::new();
    for (&slot, &required) in &strict_required {
        let eligible = by_position.get(&slot).map(|v| v.as_slice()).unwrap_or(&[]);
        if eligible.len() < required {
            return Err(FantasyError::RosterInfeasible {
                slot,
                required,
                available: eligible.len(),
            });
        }
        let chosen: VecDeque<&PlayerProjection> = eligible[..required].iter().copied().collect();
        used.extend(chosen.iter().map(|p| p.id));
        strict_queues.insert(slot, chosen);
    }

    // Aggregate flexible requirements and fill the narrowest-eligibility
    // slot type first, so a broad slot like SUPERFLEX never consumes the
    // only player a narrower FLEX slot can take.
    let mut flex_required: Vec<(Position, usize)> = Vec::new();
    for &(slot, count) in &config.roster_slots {
        if slot.is_flexible() && count > 0 {
            match flex_required.iter_mut().find(|(s, _)| *s == slot) {
                Some((_, total)) => *total += count,
                None => flex_required.push((slot, count)),
            }
        }
    }
    flex_required.sort_by_key(|&(slot, _)| slot.accepted_positions().len());

    // Feed the best remaining eligible player into each flexible slot.
    let mut flex_queues: BTreeMap<Position, VecDeque<&PlayerProjection>> = BTreeMap::new();
    for &(slot, required) in &flex_required {
        for filled in 0..required {
            let best = roster
                .iter()
                .filter(|p| p.eligible_for(slot) && !used.contains(&p.id))
                .min_by(|a, b| rank_projections(a, b));
            match best {
                Some(p) => {
                    used.insert(p.id);
                    flex_queues.entry(slot).or_default().push_back(p);
                }
                // Every eligible player is already started elsewhere.
                None => {
                    return Err(FantasyError::RosterInfeasible {
                        slot,
                        required,
                        available: filled,
                    });
                }
            }
        }
    }

    // Emit slots in configuration order, best-first within each group.
    let mut slots = Vec::with_capacity(config.lineup_size());
    let mut total = 0.0;
    for &(slot, count) in &config.roster_slots {
        let queue = if slot.is_flexible() {
            flex_queues.get_mut(&slot)
        } else {
            strict_queues.get_mut(&slot)
        };
        if let Some(queue) = queue {
            for _ in 0..count {
                if let Some(p) = queue.pop_front() {
                    total += p.projected_points;
                    slots.push(LineupSlot {
                        slot,
                        player_id: p.id,
                    });
                }
            }
        }
    }

    let bench = roster
        .iter()
        .map(|p| p.id)
        .filter(|id| !used.contains(id))
        .collect();

    Ok(Lineup {
        slots,
        bench,
        total_projected_points: total,
    })
}
