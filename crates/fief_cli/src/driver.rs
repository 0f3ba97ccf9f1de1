//! The session loop: read, dispatch, respond.
//!
//! A [`Session`] owns the three streams of the protocol: the command input
//! (one command per line), the command output (the decision engine's own
//! actions, same wire format) and the diagnostic stream (result text and
//! the optional board rendering). The loop blocks on input while it is the
//! opponent's turn and hands control to the decision engine on the
//! controlled player's turn, until a terminal outcome or an input error
//! ends the match.

use std::io::{self, BufRead, Read, Write};

use thiserror::Error;

use fief_core::ai::{take_turn, CommandSink};
use fief_core::command::Command;
use fief_core::engine::{MatchState, Outcome};
use fief_core::error::RulesError;

use crate::protocol::{parse_line, ProtocolError, MAX_LINE_LENGTH};
use crate::render::render_corner;

/// Process exit codes. A fixed small-integer taxonomy, not errno-based.
pub mod exit_code {
    /// The controlled player won.
    pub const WON: i32 = 0;
    /// The match was drawn.
    pub const DRAW: i32 = 1;
    /// The controlled player lost.
    pub const LOST: i32 = 2;
    /// Malformed or illegal input ended the match.
    pub const INPUT_ERROR: i32 = 42;
}

/// Anything that ends a session as `input error`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The line could not be parsed into a command.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// The command was well-formed but illegal.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// A stream failed underneath the session.
    #[error("io failure: {0}")]
    Io(#[from] io::Error),
}

/// Session options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Write the board's top-left corner to the diagnostic stream after
    /// every applied command.
    pub show_board: bool,
}

/// One match from first command to terminal outcome.
#[derive(Debug)]
pub struct Session<R, W, D> {
    input: R,
    output: W,
    diag: D,
    config: SessionConfig,
}

/// Mirrors emitted commands onto the output stream in wire format.
struct WireSink<'a, W: Write> {
    output: &'a mut W,
    error: Option<io::Error>,
}

impl<W: Write> CommandSink for WireSink<'_, W> {
    fn emit(&mut self, command: &Command) {
        if self.error.is_none() {
            if let Err(e) = writeln!(self.output, "{command}") {
                self.error = Some(e);
            }
        }
    }
}

impl<R: BufRead, W: Write, D: Write> Session<R, W, D> {
    /// Create a session over the given streams.
    pub fn new(input: R, output: W, diag: D, config: SessionConfig) -> Self {
        Self {
            input,
            output,
            diag,
            config,
        }
    }

    /// Run the match to completion and return the process exit code.
    pub fn run(mut self) -> i32 {
        let mut state: Option<MatchState> = None;
        loop {
            match self.step(&mut state) {
                Ok(Outcome::Ongoing) => {}
                Ok(Outcome::Won) => return self.finish("won", exit_code::WON),
                Ok(Outcome::Lost) => return self.finish("lost", exit_code::LOST),
                Ok(Outcome::Draw) => return self.finish("draw", exit_code::DRAW),
                Err(error) => {
                    tracing::debug!(%error, "session ended on input error");
                    return self.finish("input error", exit_code::INPUT_ERROR);
                }
            }
        }
    }

    /// Handle one turn step: either the decision engine's whole turn or a
    /// single external command.
    fn step(&mut self, state: &mut Option<MatchState>) -> Result<Outcome, SessionError> {
        let outcome = if state.as_ref().is_some_and(MatchState::is_controlled_turn) {
            let match_state = state.as_mut().ok_or(RulesError::NotInitialized)?;
            let mut sink = WireSink {
                output: &mut self.output,
                error: None,
            };
            let outcome = take_turn(match_state, &mut sink)?;
            if let Some(error) = sink.error {
                return Err(error.into());
            }
            self.output.flush()?;
            outcome
        } else {
            let command = self.read_command()?;
            tracing::debug!(%command, "external command");
            self.dispatch(state, &command)?
        };

        if self.config.show_board {
            if let Some(match_state) = state.as_ref() {
                self.diag.write_all(render_corner(match_state).as_bytes())?;
            }
        }
        Ok(outcome)
    }

    /// Read and parse the next input line.
    ///
    /// The read is capped just past [`MAX_LINE_LENGTH`], so an over-long
    /// line is rejected without buffering it whole; what the cap lets
    /// through still carries enough bytes for the length check to fire.
    fn read_command(&mut self) -> Result<Command, SessionError> {
        let mut line = String::new();
        let cap = MAX_LINE_LENGTH as u64 + 2;
        let bytes = (&mut self.input).take(cap).read_line(&mut line)?;
        if bytes == 0 {
            return Err(ProtocolError::UnexpectedEof.into());
        }
        Ok(parse_line(line.trim_end_matches(['\r', '\n']))?)
    }

    /// Apply an external command, creating the match on INIT.
    fn dispatch(
        &mut self,
        state: &mut Option<MatchState>,
        command: &Command,
    ) -> Result<Outcome, SessionError> {
        if let Command::Init {
            board_size,
            max_plies,
            player,
            king_one,
            king_two,
        } = *command
        {
            if state.is_some() {
                return Err(RulesError::AlreadyInitialized.into());
            }
            *state = Some(MatchState::new(
                board_size, max_plies, player, king_one, king_two,
            )?);
            return Ok(Outcome::Ongoing);
        }
        let match_state = state.as_mut().ok_or(RulesError::NotInitialized)?;
        Ok(match_state.apply(command)?)
    }

    /// Write the result diagnostic and hand back the exit code.
    fn finish(&mut self, verdict: &str, code: i32) -> i32 {
        let _ = writeln!(self.diag, "{verdict}");
        let _ = self.diag.flush();
        let _ = self.output.flush();
        tracing::info!(verdict, code, "match finished");
        code
    }
}
