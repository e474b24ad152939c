//! Lineup optimizers: season-long (unconstrained budget) and salary-capped
//! DFS.

pub mod dfs;
pub mod lineup;

pub use dfs::{optimize_dfs, DfsConstraints};
pub use lineup::optimize_lineup;
