//! Error taxonomy of the engine.
//!
//! Rejected moves and finished games are not errors; the only failures are configurations the
//! board cannot satisfy.

use std::fmt;

/// What a placement pass was trying to put on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Static impassable cells.
    Walls,
    /// Collectible cells.
    Treasures,
}

impl fmt::Display for Placement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Walls => "walls",
            Self::Treasures => "treasures",
        })
    }
}

/// Errors raised by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Random placement ran out of free cells or out of attempts.
    #[error(
        "cannot place {requested} {kind} on a {size}x{size} board: gave up after placing {placed}"
    )]
    PlacementUnsatisfiable {
        /// What was being placed.
        kind: Placement,
        /// How many were asked for.
        requested: usize,
        /// How many made it onto the board.
        placed: usize,
        /// Edge length of the board.
        size: usize,
    },
    /// The board cannot hold the population of the hardest difficulty.
    #[error("a {size}x{size} board is too small, the minimum edge length is {minimum}")]
    BoardTooSmall {
        /// Requested edge length.
        size: usize,
        /// Smallest supported edge length.
        minimum: usize,
    },
}
