//! Value objects consumed and produced by the optimization engine.

pub mod lineup;
pub mod projection;
pub mod scoring;

pub use lineup::{DfsLineup, Lineup, LineupSlot};
pub use projection::{validate_pool, validate_roster, PlayerProjection, PricedPlayer};
pub use scoring::ScoringConfiguration;
