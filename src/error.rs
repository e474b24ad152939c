//! Error types for the fantasy optimization engine.

use crate::types::{PlayerId, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FantasyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FantasyError {
    #[error("Invalid projection for {name}: {reason}")]
    InvalidProjection { name: String, reason: String },

    #[error("Duplicate player in input: {id}")]
    DuplicatePlayer { id: PlayerId },

    #[error("Invalid constraints: {reason}")]
    InvalidConstraints { reason: String },

    #[error("Cannot fill {required} {slot} slot(s): only {available} eligible player(s)")]
    RosterInfeasible {
        slot: Position,
        required: usize,
        available: usize,
    },

    #[error("DFS lineup infeasible: {constraint}")]
    DfsInfeasible { constraint: String },

    #[error("No projection available for player {id}")]
    UnknownPlayer { id: PlayerId },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },
}
