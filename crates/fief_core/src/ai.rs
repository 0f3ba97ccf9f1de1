//! The decision engine: greedy per-unit move and production choices.
//!
//! Invoked once per controlled-player turn. Units are visited in registry
//! scan order (newest first); each unit gets at most one action. Knights
//! close in on the nearest hostile unit, peasants off cooldown produce
//! reinforcements, kings stay put. After a pass in which something was
//! produced, the scan runs again so the new unit can act within the same
//! turn; the re-scan stops at the first friendly unit that has already
//! acted, because everything older was handled by the previous pass.
//!
//! Every chosen action is reported through [`CommandSink`] before it is
//! applied, so the caller can mirror the engine's decisions on the wire in
//! the same format player-issued commands arrive in.

use crate::command::Command;
use crate::engine::{MatchState, Outcome};
use crate::error::Result;
use crate::tactics::{analyze, CellOccupancy, LocalSummary};
use crate::units::{Position, Unit, UnitKind};

/// Produce peasants until this many exist, then produce knights.
const PEASANT_TARGET: u32 = 2;

/// Receives the decision engine's chosen commands, in order, each one
/// before it is applied to the match.
pub trait CommandSink {
    /// Record one emitted command.
    fn emit(&mut self, command: &Command);
}

/// Collects emitted commands; the simplest sink, used by tests and benches.
impl CommandSink for Vec<Command> {
    fn emit(&mut self, command: &Command) {
        self.push(*command);
    }
}

/// Result of one scan over the controlled player's units.
enum PassResult {
    /// The match ended during the pass.
    Terminal(Outcome),
    /// At least one unit was produced; the scan must run again.
    Produced,
    /// Nothing was produced; the turn can end.
    Quiet,
}

/// Play out one full turn for the controlled player.
///
/// Ends by emitting `END_TURN` and applying it, unless a terminal outcome
/// is reached first, in which case that outcome propagates immediately.
pub fn take_turn(state: &mut MatchState, sink: &mut dyn CommandSink) -> Result<Outcome> {
    debug_assert!(state.is_controlled_turn());
    loop {
        match run_pass(state, sink)? {
            PassResult::Terminal(outcome) => return Ok(outcome),
            PassResult::Produced => {
                // Freshly produced units still have to act this turn.
            }
            PassResult::Quiet => {
                sink.emit(&Command::EndTurn);
                return Ok(state.end_turn());
            }
        }
    }
}

/// Visit every owned unit once, newest first, acting where possible.
fn run_pass(state: &mut MatchState, sink: &mut dyn CommandSink) -> Result<PassResult> {
    let viewer = state.controlled_player();
    let mut produced = false;

    for slot in state.units().scan_order() {
        // The slot may have been cleared by combat earlier in this pass.
        let Some(unit) = state.units().get(slot).copied() else {
            continue;
        };
        if unit.owner != viewer {
            continue;
        }
        if unit.last_action_ply == state.current_ply() {
            // An already-acted friendly unit means every older unit was
            // processed by a previous pass of this same turn.
            break;
        }

        let summary = analyze(state, unit.position, viewer);
        let command = match unit.kind {
            UnitKind::Knight => knight_move(&unit, &summary),
            UnitKind::Peasant if unit.last_action_ply + 3 <= state.current_ply() => {
                production(&unit, &summary)
            }
            // Kings never volunteer to move; peasants on cooldown wait.
            _ => None,
        };

        let Some(command) = command else {
            continue;
        };
        tracing::debug!(%command, "ai action");
        sink.emit(&command);
        let outcome = state.apply(&command)?;
        if outcome.is_terminal() {
            return Ok(PassResult::Terminal(outcome));
        }
        if matches!(
            command,
            Command::ProduceKnight { .. } | Command::ProducePeasant { .. }
        ) {
            produced = true;
        }
    }

    if produced {
        Ok(PassResult::Produced)
    } else {
        Ok(PassResult::Quiet)
    }
}

/// A knight steps toward the nearest hostile unit.
fn knight_move(unit: &Unit, summary: &LocalSummary) -> Option<Command> {
    let toward = direction_of_interest(unit, summary);
    let to = pick_target(unit.position, summary, toward, |cell| !cell.blocks_move())?;
    Some(Command::Move {
        from: unit.position,
        to,
    })
}

/// A peasant off cooldown produces into an empty neighboring cell,
/// preferring the side facing the nearest hostile unit.
fn production(unit: &Unit, summary: &LocalSummary) -> Option<Command> {
    let toward = direction_of_interest(unit, summary);
    let to = pick_target(unit.position, summary, toward, CellOccupancy::is_empty)?;
    let from = unit.position;
    if summary.friendly_peasants < PEASANT_TARGET {
        Some(Command::ProducePeasant { from, to })
    } else {
        Some(Command::ProduceKnight { from, to })
    }
}

/// Unit-vector signs toward the nearest hostile, or `(0, 0)` without one.
fn direction_of_interest(unit: &Unit, summary: &LocalSummary) -> (i32, i32) {
    summary
        .nearest_hostile
        .map_or((0, 0), |hostile| unit.position.direction_to(hostile.position))
}

/// Three-tier priority scan over the eight neighboring cells.
///
/// Prefers cells matching the direction signs on both axes, then on
/// exactly one, then any admissible cell; within a tier the scan runs dx
/// outer, dy inner, both ascending, and the first hit wins. The origin
/// itself is never admissible (it is `Origin`-blocked for moves and
/// non-empty for production).
fn pick_target(
    origin: Position,
    summary: &LocalSummary,
    toward: (i32, i32),
    admissible: impl Fn(CellOccupancy) -> bool,
) -> Option<Position> {
    for tier in (0..=2).rev() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let axis_matches = i32::from(dx == toward.0) + i32::from(dy == toward.1);
                if axis_matches == tier
                    && admissible(summary.nearby[(dx + 1) as usize][(dy + 1) as usize])
                {
                    return Some(origin.offset(dx, dy));
                }
            }
        }
    }
    None
}
