//! Fantasy Football Optimization & Valuation Engine
//!
//! A Rust library that turns scored player projections (derived externally
//! from betting-market data) into fantasy-football decisions: optimal
//! lineups, trade valuations, and ranked pickup recommendations.
//!
//! ## Features
//!
//! - **Lineup Optimization**: Position-constrained starting lineups for
//!   season-long rosters, including FLEX and SUPERFLEX slots
//! - **DFS Optimization**: Salary-capped lineups with team limits, pinned
//!   and banned players, exact search on small pools and a bounded swap
//!   heuristic on large ones
//! - **Trade Evaluation**: Confidence-weighted value deltas with plain-text
//!   explanations
//! - **Value & Breakout Scoring**: Ranked value plays, waiver targets, and
//!   uncertain-but-promising breakout candidates with tunable bands
//!
//! Every call is a pure function of its inputs: projections are immutable
//! snapshots, results are freshly allocated, and no state is shared between
//! calls. Data acquisition, projection scoring, and presentation live in
//! external collaborators.
//!
//! ## Quick Start
//!
//! ```rust
//! use fantasy_edge::{
//!     optimize_lineup, PlayerId, PlayerProjection, Position, ScoringConfiguration,
//! };
//!
//! # fn example() -> fantasy_edge::Result<()> {
//! let roster = vec![
//!     PlayerProjection::new(PlayerId::new(1), "Allen", Position::QB, "BUF", 24.0, 0.8),
//!     PlayerProjection::new(PlayerId::new(2), "Barkley", Position::RB, "PHI", 18.0, 0.85),
//! ];
//! let config = ScoringConfiguration::new(vec![(Position::QB, 1), (Position::RB, 1)]);
//!
//! let lineup = optimize_lineup(&roster, &config)?;
//! assert_eq!(lineup.total_projected_points, 42.0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod models;
pub mod optimize;
pub mod trade;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use error::{FantasyError, Result};
pub use models::{
    DfsLineup, Lineup, LineupSlot, PlayerProjection, PricedPlayer, ScoringConfiguration,
};
pub use optimize::{optimize_dfs, optimize_lineup, DfsConstraints};
pub use trade::{evaluate_trade, TradeResult};
pub use types::{PlayerId, Position};
pub use value::{
    breakout_candidates, value_plays, waiver_targets, BreakoutBands, BreakoutCandidate, ValuePlay,
    WaiverTarget,
};
