//! Error types for the rules engine.
//!
//! Every variant maps to the single external `input error` outcome; the
//! distinctions exist for diagnostics and tests, not for the wire protocol.

use thiserror::Error;

use crate::units::Position;

/// Result type alias using [`RulesError`].
pub type Result<T> = std::result::Result<T, RulesError>;

/// Top-level error type for all rule violations.
///
/// An error is fatal to the match: the engine guarantees that no state
/// mutation is observable once an operation has failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RulesError {
    /// INIT received while a match is already running.
    #[error("match is already initialized")]
    AlreadyInitialized,

    /// A mutating command arrived before INIT.
    #[error("match is not initialized")]
    NotInitialized,

    /// Player number outside {1, 2}.
    #[error("invalid player number: {0}")]
    InvalidPlayer(i32),

    /// Board too small for the starting formations.
    #[error("board size {0} is too small (must exceed 8)")]
    BoardTooSmall(i32),

    /// Non-positive ply limit.
    #[error("invalid ply limit: {0}")]
    InvalidPlyLimit(i32),

    /// Starting kings closer than the required separation.
    #[error("kings are too close: Chebyshev distance {0} < 8")]
    KingsTooClose(i32),

    /// A starting formation would not fit on the board.
    #[error("starting formation at {0} does not fit on the board")]
    FormationOutOfBounds(Position),

    /// No unit at the addressed cell.
    #[error("no unit at {0}")]
    NoUnitAt(Position),

    /// The addressed unit belongs to the other player.
    #[error("unit at {0} is not owned by the current player")]
    NotOwnUnit(Position),

    /// The unit already moved or produced this ply.
    #[error("unit at {0} has already acted this ply")]
    AlreadyActed(Position),

    /// Destination is not a king-move neighbor of the source.
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent {
        /// Source cell.
        from: Position,
        /// Destination cell.
        to: Position,
    },

    /// Destination lies outside the board.
    #[error("cell {0} is out of bounds")]
    OutOfBounds(Position),

    /// Destination holds a unit of the moving player.
    #[error("cell {0} is occupied by a friendly unit")]
    FriendlyOccupied(Position),

    /// Production target is occupied.
    #[error("cell {0} is occupied")]
    DestinationOccupied(Position),

    /// Production ordered from a non-Peasant unit.
    #[error("unit at {0} is not a peasant")]
    NotAPeasant(Position),

    /// Production ordered before the cooldown elapsed.
    #[error("peasant at {0} is still on production cooldown")]
    CooldownActive(Position),
}
