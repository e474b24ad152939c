//! Unit tests for the DFS optimizer.

use crate::error::FantasyError;
use crate::models::{PlayerProjection, PricedPlayer, ScoringConfiguration};
use crate::optimize::{optimize_dfs, DfsConstraints};
use crate::types::{PlayerId, Position};
use std::collections::BTreeSet;

fn priced(
    id: u64,
    name: &str,
    position: Position,
    team: &str,
    points: f64,
    salary: u32,
) -> PricedPlayer {
    PricedPlayer::new(
        PlayerProjection::new(PlayerId::new(id), name, position, team, points, 0.8),
        salary,
    )
}

fn qb_rb_config() -> ScoringConfiguration {
    ScoringConfiguration::new(vec![(Position::QB, 1), (Position::RB, 1)])
}

fn small_pool() -> Vec<PricedPlayer> {
    vec![
        priced(1, "Allen", Position::QB, "BUF", 24.0, 8000),
        priced(2, "Prescott", Position::QB, "DAL", 20.0, 7000),
        priced(3, "Barkley", Position::RB, "PHI", 13.0, 6000),
        priced(4, "Henry", Position::RB, "BAL", 10.0, 5000),
    ]
}

#[test]
fn test_expensive_qb_wins_when_freed_salary_buys_nothing() {
    // Cap 14000: either QB can pair with the better RB, so the 8000 QB's
    // extra 4.0 points decide it.
    let constraints = DfsConstraints {
        salary_cap: 14_000,
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&small_pool(), &qb_rb_config(), &constraints).unwrap();

    assert!(lineup.contains(PlayerId::new(1)));
    assert!(lineup.contains(PlayerId::new(3)));
    assert_eq!(lineup.total_projected_points, 37.0);
    assert_eq!(lineup.total_salary, 14_000);
    assert_eq!(lineup.salary_remaining, 0);
}

#[test]
fn test_cheap_qb_wins_when_freed_salary_buys_more() {
    // Cap 13000: the 8000 QB forces the 10.0 RB (34.0 total), while the
    // 7000 QB frees enough for a 15.0 RB (35.0 total).
    let mut pool = small_pool();
    pool[2] = priced(3, "Barkley", Position::RB, "PHI", 15.0, 6000);
    let constraints = DfsConstraints {
        salary_cap: 13_000,
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&pool, &qb_rb_config(), &constraints).unwrap();

    assert!(lineup.contains(PlayerId::new(2)));
    assert!(lineup.contains(PlayerId::new(3)));
    assert_eq!(lineup.total_projected_points, 35.0);
}

#[test]
fn test_every_slot_filled_within_cap() {
    let pool = vec![
        priced(1, "Allen", Position::QB, "BUF", 24.0, 7000),
        priced(2, "Barkley", Position::RB, "PHI", 18.0, 6500),
        priced(3, "Henry", Position::RB, "BAL", 16.0, 6000),
        priced(4, "Gibbs", Position::RB, "DET", 14.0, 5500),
        priced(5, "Hill", Position::WR, "MIA", 17.0, 6800),
        priced(6, "Adams", Position::WR, "NYJ", 15.0, 6000),
        priced(7, "Kelce", Position::TE, "KC", 14.0, 5000),
        priced(8, "Jets", Position::DST, "NYJ", 8.0, 3000),
    ];
    let config = ScoringConfiguration::new(vec![
        (Position::QB, 1),
        (Position::RB, 2),
        (Position::WR, 2),
        (Position::TE, 1),
        (Position::FLEX, 1),
        (Position::DST, 1),
    ]);
    let lineup = optimize_dfs(&pool, &config, &DfsConstraints::default()).unwrap();

    assert_eq!(lineup.slots.len(), 8);
    assert!(lineup.total_salary <= 50_000);
    let distinct: BTreeSet<_> = lineup.starters().collect();
    assert_eq!(distinct.len(), 8);
    assert!(lineup.contains(PlayerId::new(4))); // third RB lands in FLEX
}

#[test]
fn test_identical_inputs_produce_identical_lineups() {
    let pool = small_pool();
    let constraints = DfsConstraints::default();
    let first = optimize_dfs(&pool, &qb_rb_config(), &constraints).unwrap();
    let second = optimize_dfs(&pool, &qb_rb_config(), &constraints).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_must_include_is_pinned_even_when_suboptimal() {
    let constraints = DfsConstraints {
        salary_cap: 14_000,
        must_include: BTreeSet::from([PlayerId::new(2)]),
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&small_pool(), &qb_rb_config(), &constraints).unwrap();

    assert!(lineup.contains(PlayerId::new(2)));
    assert!(lineup.contains(PlayerId::new(3)));
    assert_eq!(lineup.total_projected_points, 33.0);
}

#[test]
fn test_pinned_player_over_cap_fails_validation() {
    let constraints = DfsConstraints {
        salary_cap: 7500,
        must_include: BTreeSet::from([PlayerId::new(1)]),
        ..DfsConstraints::default()
    };
    assert!(matches!(
        optimize_dfs(&small_pool(), &qb_rb_config(), &constraints),
        Err(FantasyError::InvalidConstraints { .. })
    ));
}

#[test]
fn test_pinned_pair_busting_cap_is_infeasible() {
    let constraints = DfsConstraints {
        salary_cap: 13_000,
        must_include: BTreeSet::from([PlayerId::new(1), PlayerId::new(3)]),
        ..DfsConstraints::default()
    };
    assert!(matches!(
        optimize_dfs(&small_pool(), &qb_rb_config(), &constraints),
        Err(FantasyError::DfsInfeasible { .. })
    ));
}

#[test]
fn test_unknown_pinned_player() {
    let constraints = DfsConstraints {
        must_include: BTreeSet::from([PlayerId::new(99)]),
        ..DfsConstraints::default()
    };
    match optimize_dfs(&small_pool(), &qb_rb_config(), &constraints) {
        Err(FantasyError::UnknownPlayer { id }) => assert_eq!(id, PlayerId::new(99)),
        other => panic!("Expected UnknownPlayer, got {:?}", other),
    }
}

#[test]
fn test_team_limit_enforced() {
    let pool = vec![
        priced(1, "Hurts", Position::QB, "PHI", 23.0, 7500),
        priced(2, "Prescott", Position::QB, "DAL", 20.0, 7000),
        priced(3, "Barkley", Position::RB, "PHI", 18.0, 7000),
        priced(4, "Henry", Position::RB, "BAL", 16.0, 6800),
    ];
    let constraints = DfsConstraints {
        max_players_per_team: Some(1),
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&pool, &qb_rb_config(), &constraints).unwrap();

    // Best pair is both PHI; the team limit forces a mixed lineup.
    assert!(lineup.team_counts.values().all(|&n| n <= 1));
    assert_eq!(lineup.total_projected_points, 23.0 + 16.0);
}

#[test]
fn test_team_limit_keeps_cross_team_understudies() {
    // The DAL RB is outscored by the PHI RB at equal salary, but the QB
    // takes the lone allowed PHI slot, so the DAL RB must survive pruning.
    let pool = vec![
        priced(1, "Hurts", Position::QB, "PHI", 25.0, 5000),
        priced(2, "Barkley", Position::RB, "PHI", 20.0, 5000),
        priced(3, "Williams", Position::RB, "DAL", 18.0, 5000),
    ];
    let constraints = DfsConstraints {
        max_players_per_team: Some(1),
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&pool, &qb_rb_config(), &constraints).unwrap();

    assert!(lineup.contains(PlayerId::new(3)));
    assert_eq!(lineup.total_projected_points, 43.0);
}

#[test]
fn test_pinned_player_takes_the_narrower_flexible_slot() {
    // The pinned RB fits both flexible slots but the QB fits only
    // SUPERFLEX, so the RB must land in FLEX.
    let pool = vec![
        priced(1, "Allen", Position::QB, "BUF", 24.0, 7000),
        priced(2, "Barkley", Position::RB, "PHI", 18.0, 6000),
    ];
    let config = ScoringConfiguration::new(vec![(Position::SUPERFLEX, 1), (Position::FLEX, 1)]);
    let constraints = DfsConstraints {
        must_include: BTreeSet::from([PlayerId::new(2)]),
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&pool, &config, &constraints).unwrap();

    assert!(lineup.contains(PlayerId::new(1)));
    assert_eq!(lineup.total_projected_points, 42.0);
}

#[test]
fn test_banned_player_never_selected() {
    let constraints = DfsConstraints {
        salary_cap: 14_000,
        banned: BTreeSet::from([PlayerId::new(1)]),
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&small_pool(), &qb_rb_config(), &constraints).unwrap();
    assert!(!lineup.contains(PlayerId::new(1)));
    assert!(lineup.contains(PlayerId::new(2)));
}

#[test]
fn test_pinned_and_banned_overlap_rejected() {
    let constraints = DfsConstraints {
        must_include: BTreeSet::from([PlayerId::new(1)]),
        banned: BTreeSet::from([PlayerId::new(1)]),
        ..DfsConstraints::default()
    };
    assert!(matches!(
        optimize_dfs(&small_pool(), &qb_rb_config(), &constraints),
        Err(FantasyError::InvalidConstraints { .. })
    ));
}

#[test]
fn test_missing_position_is_infeasible() {
    let pool = vec![
        priced(1, "Allen", Position::QB, "BUF", 24.0, 8000),
        priced(2, "Prescott", Position::QB, "DAL", 20.0, 7000),
    ];
    match optimize_dfs(&pool, &qb_rb_config(), &DfsConstraints::default()) {
        Err(FantasyError::DfsInfeasible { constraint }) => {
            assert!(constraint.contains("RB"), "got: {constraint}");
        }
        other => panic!("Expected DfsInfeasible, got {:?}", other),
    }
}

#[test]
fn test_equal_salary_players_survive_pruning_for_multiple_slots() {
    // Two RB slots plus FLEX: the second- and third-best RBs are dominated
    // pointwise but still needed, so pruning must keep all three.
    let pool = vec![
        priced(1, "A", Position::RB, "PHI", 10.0, 5000),
        priced(2, "B", Position::RB, "BAL", 9.0, 5000),
        priced(3, "C", Position::RB, "DET", 8.0, 5000),
    ];
    let config = ScoringConfiguration::new(vec![(Position::RB, 2), (Position::FLEX, 1)]);
    let lineup = optimize_dfs(&pool, &config, &DfsConstraints::default()).unwrap();
    assert_eq!(lineup.total_projected_points, 27.0);
}

#[test]
fn test_swap_heuristic_path_is_feasible_and_deterministic() {
    // Force the heuristic by setting the exact-search threshold below the
    // pool size.
    let pool = vec![
        priced(1, "Allen", Position::QB, "BUF", 24.0, 8000),
        priced(2, "Prescott", Position::QB, "DAL", 20.0, 7000),
        priced(3, "Barkley", Position::RB, "PHI", 18.0, 7500),
        priced(4, "Henry", Position::RB, "BAL", 16.0, 6800),
        priced(5, "Gibbs", Position::RB, "DET", 14.0, 6000),
        priced(6, "Hill", Position::WR, "MIA", 17.0, 7800),
        priced(7, "Adams", Position::WR, "NYJ", 15.0, 6900),
        priced(8, "Smith", Position::WR, "PHI", 12.0, 5500),
    ];
    let config = ScoringConfiguration::new(vec![
        (Position::QB, 1),
        (Position::RB, 1),
        (Position::WR, 1),
        (Position::FLEX, 1),
    ]);
    let constraints = DfsConstraints {
        salary_cap: 30_000,
        max_pool_size: Some(1),
        ..DfsConstraints::default()
    };
    let first = optimize_dfs(&pool, &config, &constraints).unwrap();
    let second = optimize_dfs(&pool, &config, &constraints).unwrap();

    assert_eq!(first, second);
    assert!(first.total_salary <= 30_000);
    assert_eq!(first.slots.len(), 4);
    let distinct: BTreeSet<_> = first.starters().collect();
    assert_eq!(distinct.len(), 4);
    // The greedy start (Allen, Barkley, Smith, Henry) improves by swapping
    // Smith out for Adams.
    assert_eq!(first.total_projected_points, 73.0);
}

#[test]
fn test_heuristic_matches_exact_on_easy_instance() {
    let pool = small_pool();
    let config = qb_rb_config();
    let exact = optimize_dfs(
        &pool,
        &config,
        &DfsConstraints {
            salary_cap: 14_000,
            ..DfsConstraints::default()
        },
    )
    .unwrap();
    let heuristic = optimize_dfs(
        &pool,
        &config,
        &DfsConstraints {
            salary_cap: 14_000,
            max_pool_size: Some(1),
            ..DfsConstraints::default()
        },
    )
    .unwrap();
    assert_eq!(exact.total_projected_points, heuristic.total_projected_points);
}

#[test]
fn test_zero_salary_cap_rejected() {
    let constraints = DfsConstraints {
        salary_cap: 0,
        ..DfsConstraints::default()
    };
    assert!(matches!(
        optimize_dfs(&small_pool(), &qb_rb_config(), &constraints),
        Err(FantasyError::InvalidConstraints { .. })
    ));
}
