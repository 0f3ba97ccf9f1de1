//! Parsing of the line-oriented command protocol.
//!
//! One command per line, whitespace-separated decimal tokens:
//!
//! ```text
//! INIT n k p x1 y1 x2 y2
//! MOVE x1 y1 x2 y2
//! PRODUCE_KNIGHT x1 y1 x2 y2
//! PRODUCE_PEASANT x1 y1 x2 y2
//! END_TURN
//! ```
//!
//! Anything else - an unknown command name, a wrong argument count, a
//! malformed integer, or an over-long line - is a protocol error. The
//! driver does not distinguish protocol errors from semantically illegal
//! commands; both end the match as `input error`.

use thiserror::Error;

use fief_core::command::Command;
use fief_core::units::Position;

/// Longest accepted command line, in bytes, excluding the newline.
pub const MAX_LINE_LENGTH: usize = 100;

/// Why a line could not be parsed into a [`Command`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The line exceeds [`MAX_LINE_LENGTH`].
    #[error("line exceeds {MAX_LINE_LENGTH} bytes")]
    LineTooLong,

    /// The line holds no tokens at all.
    #[error("empty command line")]
    EmptyLine,

    /// The first token names no known command.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// Wrong number of integer arguments for the named command.
    #[error("{command} expects {expected} arguments, got {found}")]
    WrongArgumentCount {
        /// The command name as received.
        command: String,
        /// How many arguments the command takes.
        expected: usize,
        /// How many the line carried.
        found: usize,
    },

    /// An argument token is not a representable integer.
    #[error("malformed integer argument: {0:?}")]
    MalformedInteger(String),

    /// The input stream ended mid-match.
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// Parse one input line (without its newline) into a [`Command`].
pub fn parse_line(line: &str) -> Result<Command, ProtocolError> {
    if line.len() > MAX_LINE_LENGTH {
        return Err(ProtocolError::LineTooLong);
    }
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or(ProtocolError::EmptyLine)?;
    let arguments: Vec<&str> = tokens.collect();

    match name {
        "INIT" => {
            let values = parse_arguments(name, &arguments, 7)?;
            Ok(Command::Init {
                board_size: values[0],
                max_plies: values[1],
                player: values[2],
                king_one: Position::new(values[3], values[4]),
                king_two: Position::new(values[5], values[6]),
            })
        }
        "MOVE" | "PRODUCE_KNIGHT" | "PRODUCE_PEASANT" => {
            let values = parse_arguments(name, &arguments, 4)?;
            let from = Position::new(values[0], values[1]);
            let to = Position::new(values[2], values[3]);
            Ok(match name {
                "MOVE" => Command::Move { from, to },
                "PRODUCE_KNIGHT" => Command::ProduceKnight { from, to },
                _ => Command::ProducePeasant { from, to },
            })
        }
        "END_TURN" => {
            if arguments.is_empty() {
                Ok(Command::EndTurn)
            } else {
                Err(ProtocolError::WrongArgumentCount {
                    command: name.to_string(),
                    expected: 0,
                    found: arguments.len(),
                })
            }
        }
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

/// Parse exactly `expected` integer tokens.
fn parse_arguments(
    command: &str,
    arguments: &[&str],
    expected: usize,
) -> Result<Vec<i32>, ProtocolError> {
    if arguments.len() != expected {
        return Err(ProtocolError::WrongArgumentCount {
            command: command.to_string(),
            expected,
            found: arguments.len(),
        });
    }
    arguments
        .iter()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| ProtocolError::MalformedInteger((*token).to_string()))
        })
        .collect()
}
