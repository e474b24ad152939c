//! Integration tests exercising the engine through its public API.

use fantasy_edge::{
    breakout_candidates, evaluate_trade, optimize_dfs, optimize_lineup, value_plays,
    waiver_targets, BreakoutBands, DfsConstraints, FantasyError, PlayerId, PlayerProjection,
    Position, PricedPlayer, ScoringConfiguration,
};
use std::collections::BTreeSet;

fn projection(
    id: u64,
    name: &str,
    position: Position,
    team: &str,
    points: f64,
    confidence: f64,
) -> PlayerProjection {
    PlayerProjection::new(PlayerId::new(id), name, position, team, points, confidence)
}

fn week_roster() -> Vec<PlayerProjection> {
    vec![
        projection(1, "Allen", Position::QB, "BUF", 24.0, 0.8),
        projection(2, "Prescott", Position::QB, "DAL", 20.0, 0.9),
        projection(3, "Barkley", Position::RB, "PHI", 18.0, 0.85),
        projection(4, "Henry", Position::RB, "BAL", 16.0, 0.8),
        projection(5, "Gibbs", Position::RB, "DET", 15.0, 0.55),
        projection(6, "Hill", Position::WR, "MIA", 17.0, 0.75),
        projection(7, "Adams", Position::WR, "NYJ", 15.0, 0.8),
        projection(8, "Kelce", Position::TE, "KC", 14.0, 0.9),
    ]
}

#[test]
fn test_season_long_flow() {
    let roster = week_roster();
    let lineup = optimize_lineup(&roster, &ScoringConfiguration::standard()).unwrap();

    assert_eq!(lineup.slots.len(), 7);
    assert_eq!(lineup.player_at(Position::QB, 0), Some(PlayerId::new(1)));
    // Best leftover FLEX-eligible player is the third RB.
    assert_eq!(lineup.player_at(Position::FLEX, 0), Some(PlayerId::new(5)));
    // The backup QB cannot flex in a standard league.
    assert_eq!(lineup.bench, BTreeSet::from([PlayerId::new(2)]));
    assert_eq!(lineup.total_projected_points, 119.0);

    // Results serialize for the presentation layer.
    let json = serde_json::to_value(&lineup).unwrap();
    assert_eq!(json["total_projected_points"], 119.0);
    assert_eq!(json["slots"][0]["slot"], "QB");
}

#[test]
fn test_dfs_flow_with_constraints() {
    let pool: Vec<PricedPlayer> = week_roster()
        .into_iter()
        .zip([7800u32, 7000, 7500, 6800, 6000, 7200, 6400, 5600])
        .map(|(projection, salary)| PricedPlayer::new(projection, salary))
        .collect();
    let config = ScoringConfiguration::new(vec![
        (Position::QB, 1),
        (Position::RB, 2),
        (Position::WR, 2),
        (Position::TE, 1),
        (Position::FLEX, 1),
    ]);
    let constraints = DfsConstraints {
        salary_cap: 48_000,
        max_players_per_team: Some(2),
        must_include: BTreeSet::from([PlayerId::new(8)]),
        ..DfsConstraints::default()
    };
    let lineup = optimize_dfs(&pool, &config, &constraints).unwrap();

    assert_eq!(lineup.slots.len(), 7);
    assert!(lineup.total_salary <= 48_000);
    assert!(lineup.contains(PlayerId::new(8)));
    assert!(lineup.team_counts.values().all(|&n| n <= 2));
    assert_eq!(
        lineup.salary_remaining,
        48_000 - lineup.total_salary
    );

    let again = optimize_dfs(&pool, &config, &constraints).unwrap();
    assert_eq!(lineup, again);
}

#[test]
fn test_trade_and_ranking_flow() {
    let roster = week_roster();

    let trade = evaluate_trade(
        &[PlayerId::new(4)],
        &[PlayerId::new(3)],
        &roster,
    )
    .unwrap();
    assert!(trade.trade_value > 0.0);
    assert!(!trade.explanation.is_empty());

    let plays = value_plays(&roster, 12.0).unwrap();
    assert!(!plays.is_empty());
    assert!(plays.windows(2).all(|w| w[0].score >= w[1].score));

    let waivers = waiver_targets(&roster, &[Position::TE]).unwrap();
    assert_eq!(waivers.len(), 1);
    assert_eq!(waivers[0].player_id, PlayerId::new(8));

    // Gibbs: 15.0 projected points at 0.55 confidence.
    let breakouts = breakout_candidates(&roster, &BreakoutBands::default()).unwrap();
    assert_eq!(breakouts.len(), 1);
    assert_eq!(breakouts[0].player_id, PlayerId::new(5));
}

#[test]
fn test_infeasible_roster_surfaces_typed_error() {
    let roster = vec![projection(1, "Allen", Position::QB, "BUF", 24.0, 0.8)];
    let err = optimize_lineup(&roster, &ScoringConfiguration::standard()).unwrap_err();
    match &err {
        FantasyError::RosterInfeasible { slot, .. } => assert_eq!(*slot, Position::RB),
        other => panic!("Expected RosterInfeasible, got {:?}", other),
    }
    assert!(err.to_string().contains("RB"));
}
