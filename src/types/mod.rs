//! Core identifier and position types.

pub mod ids;
pub mod position;

pub use ids::PlayerId;
pub use position::Position;
