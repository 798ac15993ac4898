//! Error types for load-time data integrity and configuration.
//!
//! Rule violations during play are never errors; they come back as
//! [`Outcome::Invalid`](crate::rules::Outcome::Invalid). These types cover the
//! cases where an engine must refuse to start at all.

use thiserror::Error;

/// A board table (adjacency, jumps, teleports) failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("node {node} is out of range for a board of {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },

    #[error("node {0} is listed as adjacent to itself")]
    SelfAdjacent(usize),

    #[error("adjacency {from} -> {to} has no reverse edge")]
    AsymmetricAdjacency { from: usize, to: usize },

    #[error("jump {start} over {over} to {end} does not follow board lines")]
    JumpNotAlongLine { start: usize, over: usize, end: usize },

    #[error("jump {start} over {over} to {end} is listed more than once")]
    DuplicateJump { start: usize, over: usize, end: usize },

    #[error("board line {0} has fewer than two nodes or repeats a node")]
    MalformedLine(usize),

    #[error("node {0} cannot be reached from node 0")]
    Disconnected(usize),

    #[error("teleport {from} -> {to} is invalid: {reason}")]
    InvalidTeleport {
        from: u8,
        to: u8,
        reason: &'static str,
    },

    #[error("node {0} is listed twice as a starting point")]
    DuplicateStart(usize),

    #[error("expected {expected} nodes, found {found}")]
    WrongNodeCount { expected: usize, found: usize },
}

/// Engine configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid engine config: {0}")]
    Invalid(String),
}
