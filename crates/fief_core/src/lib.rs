//! # Fief Core
//!
//! Deterministic rules engine and built-in opponent for a turn-based,
//! two-player strategy game on a square grid.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness
//!
//! The line-oriented protocol front end lives in `fief_cli`; everything here
//! operates on an owned [`engine::MatchState`] passed by reference. The
//! decision engine reports its chosen actions through the [`ai::CommandSink`]
//! trait so the caller controls where the wire-format commands go.
//!
//! ## Crate Structure
//!
//! - [`units`] - unit kinds, strength ranking, grid positions
//! - [`registry`] - arena of live units with stable iteration order
//! - [`engine`] - turn/ply bookkeeping, legality checks, combat resolution
//! - [`tactics`] - 3x3 neighborhood summary feeding the decision engine
//! - [`ai`] - greedy per-unit move and production choices
//! - [`command`] - typed commands and their wire format

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod command;
pub mod engine;
pub mod error;
pub mod registry;
pub mod tactics;
pub mod units;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ai::{take_turn, CommandSink};
    pub use crate::command::Command;
    pub use crate::engine::{MatchState, Outcome};
    pub use crate::error::{Result, RulesError};
    pub use crate::registry::{SlotId, UnitRegistry};
    pub use crate::units::{Player, Position, Unit, UnitKind};
}
