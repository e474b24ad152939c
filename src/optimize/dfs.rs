//! Salary-capped DFS lineup optimizer.
//!
//! Position assignment plus a knapsack budget makes this NP-hard in general,
//! so the pool is dominance-pruned first and then solved one of two ways:
//! an exact branch-and-bound when the pruned pool is small enough (the
//! first-choice partitions are evaluated in parallel and merged), or a
//! greedy value-density start refined by best-improvement swaps under an
//! iteration budget. Ties break by player id ascending everywhere, so
//! identical inputs always produce identical lineups.

use crate::error::{FantasyError, Result};
use crate::models::{validate_pool, DfsLineup, LineupSlot, PricedPlayer, ScoringConfiguration};
use crate::optimize::lineup::rank_projections;
use crate::types::{PlayerId, Position};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

#[cfg(test)]
mod tests;

/// Pruned-pool size up to which the exact search runs.
const EXACT_SEARCH_LIMIT: usize = 250;

/// Caller-supplied constraints for a DFS contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfsConstraints {
    pub salary_cap: u32,
    /// Maximum starters from a single team; `None` means unbounded.
    pub max_players_per_team: Option<usize>,
    /// Players that must appear in the lineup.
    pub must_include: BTreeSet<PlayerId>,
    /// Players excluded from consideration.
    pub banned: BTreeSet<PlayerId>,
    /// Override for the exact-search pool threshold.
    pub max_pool_size: Option<usize>,
    /// Iteration budget for the swap-improvement fallback.
    pub swap_iterations: usize,
}

impl Default for DfsConstraints {
    fn default() -> Self {
        Self {
            salary_cap: 50_000,
            max_players_per_team: None,
            must_include: BTreeSet::new(),
            banned: BTreeSet::new(),
            max_pool_size: None,
            swap_iterations: 500,
        }
    }
}

impl DfsConstraints {
    pub fn validate(&self) -> Result<()> {
        if self.salary_cap == 0 {
            return Err(FantasyError::InvalidConstraints {
                reason: "salary_cap must be > 0".to_string(),
            });
        }
        if let Some(0) = self.max_players_per_team {
            return Err(FantasyError::InvalidConstraints {
                reason: "max_players_per_team must be >= 1".to_string(),
            });
        }
        if let Some(id) = self.must_include.intersection(&self.banned).next() {
            return Err(FantasyError::InvalidConstraints {
                reason: format!("player {id} is both pinned and banned"),
            });
        }
        Ok(())
    }
}

/// Select the optimal salary-capped lineup from a priced player pool.
///
/// Fails with [`FantasyError::DfsInfeasible`] naming the violated constraint
/// when the pinned players alone bust the cap or team limit, or when a slot
/// has no affordable eligible candidate.
pub fn optimize_dfs(
    pool: &[PricedPlayer],
    config: &ScoringConfiguration,
    constraints: &DfsConstraints,
) -> Result<DfsLineup> {
    config.validate()?;
    constraints.validate()?;
    validate_pool(pool)?;

    let by_id: BTreeMap<PlayerId, &PricedPlayer> =
        pool.iter().map(|p| (p.projection.id, p)).collect();

    // Pinned players must exist and individually fit under the cap.
    for &id in &constraints.must_include {
        let player = by_id.get(&id).ok_or(FantasyError::UnknownPlayer { id })?;
        if player.salary > constraints.salary_cap {
            return Err(FantasyError::InvalidConstraints {
                reason: format!(
                    "pinned player {} salary {} exceeds cap {}",
                    player.projection.name, player.salary, constraints.salary_cap
                ),
            });
        }
    }

    // The search visits strict slots before flexible ones, and narrower
    // flexible slots (FLEX) before broader ones (SUPERFLEX), so a pinned
    // player never takes a slot a later, narrower slot needs.
    let slots = config.expanded_slots();
    let mut search_order: Vec<usize> = (0..slots.len()).collect();
    search_order.sort_by_key(|&i| {
        (
            slots[i].is_flexible(),
            slots[i].accepted_positions().len(),
            i,
        )
    });

    let mut assignment: Vec<Option<&PricedPlayer>> = vec![None; slots.len()];
    let mut pinned_salary: u32 = 0;
    let mut pinned_points: f64 = 0.0;
    let mut base_team_counts: BTreeMap<String, usize> = BTreeMap::new();
    for &id in &constraints.must_include {
        let player = by_id[&id];
        let slot_idx = search_order
            .iter()
            .copied()
            .find(|&i| assignment[i].is_none() && player.projection.eligible_for(slots[i]));
        let Some(slot_idx) = slot_idx else {
            return Err(FantasyError::DfsInfeasible {
                constraint: format!("no open slot for pinned player {}", player.projection.name),
            });
        };
        assignment[slot_idx] = Some(player);
        pinned_salary += player.salary;
        pinned_points += player.projection.projected_points;
        *base_team_counts
            .entry(player.projection.team.clone())
            .or_insert(0) += 1;
    }
    if pinned_salary > constraints.salary_cap {
        return Err(FantasyError::DfsInfeasible {
            constraint: format!(
                "pinned players cost {} against a {} cap",
                pinned_salary, constraints.salary_cap
            ),
        });
    }
    if let Some(max) = constraints.max_players_per_team {
        if let Some((team, count)) = base_team_counts.iter().find(|(_, &n)| n > max) {
            return Err(FantasyError::DfsInfeasible {
                constraint: format!("{count} pinned players from {team} against a limit of {max}"),
            });
        }
    }

    let open_slots: Vec<usize> = search_order
        .iter()
        .copied()
        .filter(|&i| assignment[i].is_none())
        .collect();
    let candidates = prune_candidates(pool, &slots, constraints);
    let budget = constraints.salary_cap - pinned_salary;

    // Eligible candidates per open slot, best-first.
    let eligible: Vec<Vec<usize>> = open_slots
        .iter()
        .map(|&si| {
            let mut v: Vec<usize> = candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| c.projection.eligible_for(slots[si]))
                .map(|(j, _)| j)
                .collect();
            v.sort_by(|&a, &b| {
                rank_projections(&candidates[a].projection, &candidates[b].projection)
            });
            v
        })
        .collect();
    for (k, &si) in open_slots.iter().enumerate() {
        if eligible[k].is_empty() {
            return Err(FantasyError::DfsInfeasible {
                constraint: format!("no eligible candidate for the {} slot", slots[si]),
            });
        }
    }

    // Salary floor and points ceiling per remaining-slot suffix, for pruning
    // and budget reservation.
    let n_open = open_slots.len();
    let mut suffix_min_salary = vec![0u32; n_open + 1];
    let mut suffix_max_points = vec![0f64; n_open + 1];
    for k in (0..n_open).rev() {
        let min_salary = eligible[k]
            .iter()
            .map(|&j| candidates[j].salary)
            .min()
            .unwrap_or(0);
        let max_points = eligible[k]
            .first()
            .map(|&j| candidates[j].projection.projected_points)
            .unwrap_or(0.0);
        suffix_min_salary[k] = suffix_min_salary[k + 1] + min_salary;
        suffix_max_points[k] = suffix_max_points[k + 1] + max_points;
    }

    let ctx = SearchCtx {
        candidates: &candidates,
        eligible: &eligible,
        suffix_min_salary: &suffix_min_salary,
        suffix_max_points: &suffix_max_points,
        max_per_team: constraints.max_players_per_team,
    };

    let threshold = constraints.max_pool_size.unwrap_or(EXACT_SEARCH_LIMIT);
    let exact = candidates.len() <= threshold;
    debug!(
        pool = pool.len(),
        pruned = candidates.len(),
        open_slots = n_open,
        budget,
        exact,
        "optimizing DFS lineup"
    );

    let best = if n_open == 0 {
        Some(Candidate {
            points: 0.0,
            salary: 0,
            picks: Vec::new(),
        })
    } else if exact {
        exact_search(&ctx, budget, &base_team_counts)
    } else {
        swap_search(
            &ctx,
            budget,
            &base_team_counts,
            constraints.swap_iterations,
        )
    };
    let Some(best) = best else {
        return Err(FantasyError::DfsInfeasible {
            constraint: "no lineup fits under the salary cap and team limit".to_string(),
        });
    };
    debug!(
        points = pinned_points + best.points,
        salary = pinned_salary + best.salary,
        "DFS lineup selected"
    );

    for (k, &slot_idx) in open_slots.iter().enumerate() {
        assignment[slot_idx] = Some(candidates[best.picks[k]]);
    }

    let mut out_slots = Vec::with_capacity(slots.len());
    let mut team_counts: BTreeMap<String, usize> = BTreeMap::new();
    for (i, &slot) in slots.iter().enumerate() {
        if let Some(player) = assignment[i] {
            out_slots.push(LineupSlot {
                slot,
                player_id: player.projection.id,
            });
            *team_counts.entry(player.projection.team.clone()).or_insert(0) += 1;
        }
    }
    let total_salary = pinned_salary + best.salary;
    Ok(DfsLineup {
        slots: out_slots,
        total_projected_points: pinned_points + best.points,
        total_salary,
        salary_remaining: constraints.salary_cap - total_salary,
        team_counts,
    })
}

/// Drop candidates that can never improve a lineup: a player is pruned when
/// at least as many strictly better-or-equal (more points, no more salary)
/// players share their eligibility group as there are slots the group can
/// occupy. Under a team limit only teammates count as dominators, since a
/// cross-team replacement can be blocked by the cap.
fn prune_candidates<'a>(
    pool: &'a [PricedPlayer],
    slots: &[Position],
    constraints: &DfsConstraints,
) -> Vec<&'a PricedPlayer> {
    let mut groups: BTreeMap<(Position, Vec<Position>), Vec<&PricedPlayer>> = BTreeMap::new();
    for player in pool {
        let id = player.projection.id;
        if constraints.banned.contains(&id) || constraints.must_include.contains(&id) {
            continue;
        }
        let key = (
            player.projection.position,
            player.projection.flex_slots.iter().copied().collect(),
        );
        groups.entry(key).or_default().push(player);
    }

    let team_capped = constraints.max_players_per_team.is_some();
    let mut kept = Vec::new();
    for members in groups.values() {
        let max_usable = slots
            .iter()
            .filter(|&&s| members[0].projection.eligible_for(s))
            .count();
        for player in members {
            let dominators = members
                .iter()
                .filter(|b| !team_capped || b.projection.team == player.projection.team)
                .filter(|b| dominates(b, player))
                .count();
            if dominators < max_usable {
                kept.push(*player);
            }
        }
    }
    kept.sort_by_key(|p| p.projection.id);
    kept
}

fn dominates(b: &PricedPlayer, a: &PricedPlayer) -> bool {
    if b.projection.id == a.projection.id {
        return false;
    }
    if b.projection.projected_points < a.projection.projected_points || b.salary > a.salary {
        return false;
    }
    if b.projection.projected_points > a.projection.projected_points || b.salary < a.salary {
        return true;
    }
    // Exact point/salary ties: only the lower id counts as the dominator, so
    // two equals never eliminate each other.
    b.projection.id < a.projection.id
}

struct SearchCtx<'a> {
    candidates: &'a [&'a PricedPlayer],
    /// Candidate indices per open slot, best-first.
    eligible: &'a [Vec<usize>],
    suffix_min_salary: &'a [u32],
    suffix_max_points: &'a [f64],
    max_per_team: Option<usize>,
}

/// A complete assignment of candidates to the open slots.
struct Candidate {
    points: f64,
    salary: u32,
    picks: Vec<usize>,
}

impl Candidate {
    /// Total ordering for results: more points, then less salary, then the
    /// lexicographically smallest player-id sequence.
    fn beats(&self, other: &Candidate, ctx: &SearchCtx<'_>) -> bool {
        if self.points != other.points {
            return self.points > other.points;
        }
        if self.salary != other.salary {
            return self.salary < other.salary;
        }
        let ids = |c: &Candidate| -> Vec<PlayerId> {
            c.picks
                .iter()
                .map(|&j| ctx.candidates[j].projection.id)
                .collect()
        };
        ids(self) < ids(other)
    }
}

/// Exact branch-and-bound over the open slots. The first slot's candidates
/// partition the search space; partitions run in parallel and the results
/// merge with the deterministic [`Candidate::beats`] ordering.
fn exact_search(
    ctx: &SearchCtx<'_>,
    budget: u32,
    base_team_counts: &BTreeMap<String, usize>,
) -> Option<Candidate> {
    let results: Vec<Option<Candidate>> = ctx.eligible[0]
        .par_iter()
        .map(|&j| {
            let player = ctx.candidates[j];
            if player.salary > budget {
                return None;
            }
            let mut team_counts = base_team_counts.clone();
            let team_count = team_counts.entry(player.projection.team.clone()).or_insert(0);
            if let Some(max) = ctx.max_per_team {
                if *team_count >= max {
                    return None;
                }
            }
            *team_count += 1;

            let mut used = vec![false; ctx.candidates.len()];
            used[j] = true;
            let mut picks = vec![j];
            let mut best = None;
            branch(
                ctx,
                1,
                budget - player.salary,
                player.projection.projected_points,
                player.salary,
                &mut used,
                &mut team_counts,
                &mut picks,
                &mut best,
            );
            best
        })
        .collect();

    results.into_iter().flatten().fold(None, |acc, cand| match acc {
        None => Some(cand),
        Some(current) => {
            if cand.beats(&current, ctx) {
                Some(cand)
            } else {
                Some(current)
            }
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn branch(
    ctx: &SearchCtx<'_>,
    depth: usize,
    budget: u32,
    points: f64,
    spent: u32,
    used: &mut [bool],
    team_counts: &mut BTreeMap<String, usize>,
    picks: &mut Vec<usize>,
    best: &mut Option<Candidate>,
) {
    if depth == ctx.eligible.len() {
        let cand = Candidate {
            points,
            salary: spent,
            picks: picks.clone(),
        };
        if best.as_ref().map_or(true, |b| cand.beats(b, ctx)) {
            *best = Some(cand);
        }
        return;
    }
    if ctx.suffix_min_salary[depth] > budget {
        return;
    }
    if let Some(b) = best.as_ref() {
        if points + ctx.suffix_max_points[depth] < b.points {
            return;
        }
    }

    for &j in &ctx.eligible[depth] {
        if used[j] {
            continue;
        }
        let player = ctx.candidates[j];
        if player.salary > budget {
            continue;
        }
        let team = &player.projection.team;
        if let Some(max) = ctx.max_per_team {
            if team_counts.get(team).copied().unwrap_or(0) >= max {
                continue;
            }
        }

        used[j] = true;
        *team_counts.entry(team.clone()).or_insert(0) += 1;
        picks.push(j);
        branch(
            ctx,
            depth + 1,
            budget - player.salary,
            points + player.projection.projected_points,
            spent + player.salary,
            used,
            team_counts,
            picks,
            best,
        );
        picks.pop();
        if let Some(count) = team_counts.get_mut(team) {
            *count -= 1;
        }
        used[j] = false;
    }
}

/// Bounded heuristic for pools too large for the exact search: greedy
/// points-per-salary start, then repeated best-improvement swaps until no
/// swap improves the lineup or the iteration budget runs out.
fn swap_search(
    ctx: &SearchCtx<'_>,
    budget: u32,
    base_team_counts: &BTreeMap<String, usize>,
    swap_iterations: usize,
) -> Option<Candidate> {
    let n_open = ctx.eligible.len();
    let mut used = vec![false; ctx.candidates.len()];
    let mut team_counts = base_team_counts.clone();
    let mut picks: Vec<usize> = Vec::with_capacity(n_open);
    let mut spent: u32 = 0;

    let density = |j: usize| -> f64 {
        let p = ctx.candidates[j];
        p.projection.projected_points / p.salary as f64
    };

    // Greedy fill, reserving the salary floor of the remaining slots so one
    // expensive pick cannot strand a later slot.
    for depth in 0..n_open {
        let reserve = ctx.suffix_min_salary[depth + 1];
        let pick = ctx.eligible[depth]
            .iter()
            .copied()
            .filter(|&j| !used[j])
            .filter(|&j| spent + ctx.candidates[j].salary + reserve <= budget)
            .filter(|&j| {
                ctx.max_per_team.map_or(true, |max| {
                    team_counts
                        .get(&ctx.candidates[j].projection.team)
                        .copied()
                        .unwrap_or(0)
                        < max
                })
            })
            .min_by(|&a, &b| {
                density(b)
                    .partial_cmp(&density(a))
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| {
                        rank_projections(
                            &ctx.candidates[a].projection,
                            &ctx.candidates[b].projection,
                        )
                    })
            })?;
        used[pick] = true;
        spent += ctx.candidates[pick].salary;
        *team_counts
            .entry(ctx.candidates[pick].projection.team.clone())
            .or_insert(0) += 1;
        picks.push(pick);
    }

    // Best-improvement swap loop.
    for iteration in 0..swap_iterations {
        // (depth, candidate, points gain, salary saved)
        let mut best_swap: Option<(usize, usize, f64, i64)> = None;
        for depth in 0..n_open {
            let cur = picks[depth];
            let cur_player = ctx.candidates[cur];
            for &j in &ctx.eligible[depth] {
                if used[j] {
                    continue;
                }
                let player = ctx.candidates[j];
                let new_spent = spent - cur_player.salary + player.salary;
                if new_spent > budget {
                    continue;
                }
                if let Some(max) = ctx.max_per_team {
                    if player.projection.team != cur_player.projection.team {
                        let count = team_counts
                            .get(&player.projection.team)
                            .copied()
                            .unwrap_or(0);
                        if count >= max {
                            continue;
                        }
                    }
                }
                let gain = player.projection.projected_points
                    - cur_player.projection.projected_points;
                let saved = cur_player.salary as i64 - player.salary as i64;
                let improving = gain > 0.0 || (gain == 0.0 && saved > 0);
                if !improving {
                    continue;
                }
                // Highest gain wins; ties prefer the larger salary saving,
                // then the lower incoming player id, then the earlier slot.
                let beats_best = match best_swap {
                    None => true,
                    Some((bd, bj, bg, bs)) => {
                        gain > bg
                            || (gain == bg
                                && (saved > bs
                                    || (saved == bs
                                        && (ctx.candidates[j].projection.id, depth)
                                            < (ctx.candidates[bj].projection.id, bd))))
                    }
                };
                if beats_best {
                    best_swap = Some((depth, j, gain, saved));
                }
            }
        }
        let Some((depth, j, gain, saved)) = best_swap else {
            break;
        };
        let out = picks[depth];
        used[out] = false;
        used[j] = true;
        if let Some(count) = team_counts.get_mut(&ctx.candidates[out].projection.team) {
            *count -= 1;
        }
        *team_counts
            .entry(ctx.candidates[j].projection.team.clone())
            .or_insert(0) += 1;
        spent = spent - ctx.candidates[out].salary + ctx.candidates[j].salary;
        picks[depth] = j;
        trace!(iteration, depth, gain, saved, "applied improving swap");
    }

    let points = picks
        .iter()
        .map(|&j| ctx.candidates[j].projection.projected_points)
        .sum();
    Some(Candidate {
        points,
        salary: spent,
        picks,
    })
}
