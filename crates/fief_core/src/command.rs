//! Typed command records and their wire format.
//!
//! The same five commands flow in both directions: the external driver
//! parses them off the input stream, and the decision engine emits them for
//! its own actions. [`std::fmt::Display`] produces the exact wire format,
//! one command per line (without the trailing newline).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::Position;

/// A single protocol command.
///
/// Fields carry raw protocol integers; range validation is the engine's
/// job, not the command's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start a match: board size, ply limit, controlled player, king cells.
    Init {
        /// Side length of the square board.
        board_size: i32,
        /// Maximum number of plies before a draw.
        max_plies: i32,
        /// Raw player number of the side this process controls.
        player: i32,
        /// Player 1's king cell.
        king_one: Position,
        /// Player 2's king cell.
        king_two: Position,
    },
    /// Move a unit one cell.
    Move {
        /// Source cell.
        from: Position,
        /// Destination cell.
        to: Position,
    },
    /// Have a peasant produce a knight.
    ProduceKnight {
        /// The producing peasant's cell.
        from: Position,
        /// The new knight's cell.
        to: Position,
    },
    /// Have a peasant produce a peasant.
    ProducePeasant {
        /// The producing peasant's cell.
        from: Position,
        /// The new peasant's cell.
        to: Position,
    },
    /// End the current player's turn.
    EndTurn,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Init {
                board_size,
                max_plies,
                player,
                king_one,
                king_two,
            } => write!(
                f,
                "INIT {board_size} {max_plies} {player} {} {} {} {}",
                king_one.x, king_one.y, king_two.x, king_two.y
            ),
            Command::Move { from, to } => {
                write!(f, "MOVE {} {} {} {}", from.x, from.y, to.x, to.y)
            }
            Command::ProduceKnight { from, to } => {
                write!(f, "PRODUCE_KNIGHT {} {} {} {}", from.x, from.y, to.x, to.y)
            }
            Command::ProducePeasant { from, to } => {
                write!(f, "PRODUCE_PEASANT {} {} {} {}", from.x, from.y, to.x, to.y)
            }
            Command::EndTurn => write!(f, "END_TURN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format() {
        let init = Command::Init {
            board_size: 12,
            max_plies: 20,
            player: 1,
            king_one: Position::new(1, 1),
            king_two: Position::new(9, 9),
        };
        assert_eq!(init.to_string(), "INIT 12 20 1 1 1 9 9");

        let mv = Command::Move {
            from: Position::new(4, 1),
            to: Position::new(5, 2),
        };
        assert_eq!(mv.to_string(), "MOVE 4 1 5 2");

        let pk = Command::ProduceKnight {
            from: Position::new(2, 1),
            to: Position::new(3, 2),
        };
        assert_eq!(pk.to_string(), "PRODUCE_KNIGHT 2 1 3 2");

        let pp = Command::ProducePeasant {
            from: Position::new(2, 1),
            to: Position::new(3, 2),
        };
        assert_eq!(pp.to_string(), "PRODUCE_PEASANT 2 1 3 2");

        assert_eq!(Command::EndTurn.to_string(), "END_TURN");
    }
}
