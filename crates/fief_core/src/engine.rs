//! The rules engine: turn/ply bookkeeping, legality checks and combat.
//!
//! A [`MatchState`] is created once per match by [`MatchState::new`] and
//! mutated in place by the operations below. Every operation validates all
//! of its preconditions before touching any state, so a failed call leaves
//! the match observably unchanged.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::{Result, RulesError};
use crate::registry::{SlotId, UnitRegistry};
use crate::units::{Player, Position, Unit, UnitKind};

/// Minimum Chebyshev separation between the two starting kings.
const MIN_KING_SEPARATION: i32 = 8;

/// The outcome of a successfully applied operation.
///
/// `Won` and `Lost` are always reported relative to the controlled player,
/// never the absolute player number. All variants except `Ongoing` are
/// terminal for the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The match continues.
    Ongoing,
    /// The controlled player has won.
    Won,
    /// The controlled player has lost.
    Lost,
    /// The match is drawn.
    Draw,
}

impl Outcome {
    /// Whether this outcome ends the match.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Complete state of one running match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    board_size: i32,
    max_plies: u32,
    current_ply: u32,
    current_player: Player,
    controlled_player: Player,
    units: UnitRegistry,
}

impl MatchState {
    /// Start a match from the INIT parameters.
    ///
    /// Each side receives a King, a Peasant and two Knights in a file
    /// starting at its king cell and extending three columns to the right,
    /// which is why king columns must leave room up to `board_size - 3`.
    pub fn new(
        board_size: i32,
        max_plies: i32,
        player: i32,
        king_one: Position,
        king_two: Position,
    ) -> Result<Self> {
        let controlled_player =
            Player::from_number(player).ok_or(RulesError::InvalidPlayer(player))?;
        if board_size <= 8 {
            return Err(RulesError::BoardTooSmall(board_size));
        }
        if max_plies < 1 {
            return Err(RulesError::InvalidPlyLimit(max_plies));
        }
        let separation = king_one.chebyshev(king_two);
        if separation < MIN_KING_SEPARATION {
            return Err(RulesError::KingsTooClose(separation));
        }
        for king in [king_one, king_two] {
            if king.x < 1 || king.x > board_size - 3 || king.y < 1 || king.y > board_size {
                return Err(RulesError::FormationOutOfBounds(king));
            }
        }

        let mut state = Self {
            board_size,
            max_plies: max_plies as u32,
            current_ply: 1,
            current_player: Player::One,
            controlled_player,
            units: UnitRegistry::new(),
        };
        state.spawn_formation(Player::One, king_one);
        state.spawn_formation(Player::Two, king_two);

        tracing::debug!(
            board_size,
            max_plies,
            controlled = %controlled_player,
            "match initialized"
        );
        Ok(state)
    }

    /// Place one side's starting file: King, Peasant, Knight, Knight.
    fn spawn_formation(&mut self, owner: Player, king: Position) {
        for (offset, kind) in [
            (0, UnitKind::King),
            (1, UnitKind::Peasant),
            (2, UnitKind::Knight),
            (3, UnitKind::Knight),
        ] {
            self.spawn(kind, king.offset(offset, 0), owner);
        }
    }

    /// Insert a fresh unit that has not acted in the current ply.
    fn spawn(&mut self, kind: UnitKind, position: Position, owner: Player) -> SlotId {
        self.units.insert(Unit {
            kind,
            position,
            owner,
            last_action_ply: self.current_ply - 1,
        })
    }

    /// Side length of the board.
    #[must_use]
    pub const fn board_size(&self) -> i32 {
        self.board_size
    }

    /// The current ply number, starting at 1.
    #[must_use]
    pub const fn current_ply(&self) -> u32 {
        self.current_ply
    }

    /// Whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// The side whose moves this process generates.
    #[must_use]
    pub const fn controlled_player(&self) -> Player {
        self.controlled_player
    }

    /// Whether the decision engine should act now.
    #[must_use]
    pub fn is_controlled_turn(&self) -> bool {
        self.current_player == self.controlled_player
    }

    /// The live units.
    #[must_use]
    pub const fn units(&self) -> &UnitRegistry {
        &self.units
    }

    /// Direct registry access for test setup.
    #[cfg(test)]
    pub(crate) fn units_mut(&mut self) -> &mut UnitRegistry {
        &mut self.units
    }

    fn in_bounds(&self, position: Position) -> bool {
        position.x >= 1
            && position.x <= self.board_size
            && position.y >= 1
            && position.y <= self.board_size
    }

    /// Won or lost, from the controlled player's perspective.
    fn verdict(&self, winner: Player) -> Outcome {
        if winner == self.controlled_player {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }

    /// Move the unit at `from` one cell to `to`, resolving combat.
    ///
    /// An empty destination relocates the mover and stamps it as having
    /// acted. A hostile destination resolves by strength rank: the weaker
    /// unit is removed (the defender holds its cell if it survives), equal
    /// ranks remove both. A removed unit is never ply-stamped. A king's
    /// removal ends the match.
    pub fn advance(&mut self, from: Position, to: Position) -> Result<Outcome> {
        let mover_slot = self.units.find(from).ok_or(RulesError::NoUnitAt(from))?;
        let mover = *self.units.get(mover_slot).ok_or(RulesError::NoUnitAt(from))?;
        if mover.owner != self.current_player {
            return Err(RulesError::NotOwnUnit(from));
        }
        if mover.last_action_ply == self.current_ply {
            return Err(RulesError::AlreadyActed(from));
        }
        if from.chebyshev(to) != 1 {
            return Err(RulesError::NotAdjacent { from, to });
        }
        if !self.in_bounds(to) {
            return Err(RulesError::OutOfBounds(to));
        }

        if let Some(slot) = self.units.find(to) {
            let defender = *self.units.get(slot).ok_or(RulesError::NoUnitAt(to))?;
            if defender.owner == mover.owner {
                return Err(RulesError::FriendlyOccupied(to));
            }
            return Ok(self.resolve_combat((mover_slot, mover), (slot, defender), to));
        }

        self.relocate(mover_slot, to);
        Ok(Outcome::Ongoing)
    }

    /// Combat between the mover and a hostile defender at `to`.
    fn resolve_combat(
        &mut self,
        (mover_slot, mover): (SlotId, Unit),
        (defender_slot, defender): (SlotId, Unit),
        to: Position,
    ) -> Outcome {
        tracing::debug!(
            attacker = ?mover.kind,
            defender = ?defender.kind,
            at = %to,
            "combat"
        );

        match mover.kind.rank().cmp(&defender.kind.rank()) {
            std::cmp::Ordering::Equal => {
                self.units.remove(mover_slot);
                self.units.remove(defender_slot);
                if mover.kind == UnitKind::King {
                    Outcome::Draw
                } else {
                    Outcome::Ongoing
                }
            }
            std::cmp::Ordering::Less => {
                // Defender holds its cell; only the mover falls.
                self.units.remove(mover_slot);
                if mover.kind == UnitKind::King {
                    self.verdict(defender.owner)
                } else {
                    Outcome::Ongoing
                }
            }
            std::cmp::Ordering::Greater => {
                self.units.remove(defender_slot);
                self.relocate(mover_slot, to);
                if defender.kind == UnitKind::King {
                    self.verdict(mover.owner)
                } else {
                    Outcome::Ongoing
                }
            }
        }
    }

    fn relocate(&mut self, slot: SlotId, to: Position) {
        let ply = self.current_ply;
        if let Some(unit) = self.units.get_mut(slot) {
            unit.position = to;
            unit.last_action_ply = ply;
        }
    }

    /// Have the peasant at `from` produce a new unit of `kind` at `to`.
    ///
    /// Production requires at least two full plies to have elapsed since
    /// the peasant's last action. The new unit has not yet acted in the
    /// current ply; the producer is stamped as having acted.
    pub fn produce(&mut self, kind: UnitKind, from: Position, to: Position) -> Result<Outcome> {
        let producer_slot = self.units.find(from).ok_or(RulesError::NoUnitAt(from))?;
        let producer = *self.units.get(producer_slot).ok_or(RulesError::NoUnitAt(from))?;
        if producer.owner != self.current_player {
            return Err(RulesError::NotOwnUnit(from));
        }
        if producer.kind != UnitKind::Peasant {
            return Err(RulesError::NotAPeasant(from));
        }
        if producer.last_action_ply + 3 > self.current_ply {
            return Err(RulesError::CooldownActive(from));
        }
        if from.chebyshev(to) != 1 {
            return Err(RulesError::NotAdjacent { from, to });
        }
        if !self.in_bounds(to) {
            return Err(RulesError::OutOfBounds(to));
        }
        if self.units.find(to).is_some() {
            return Err(RulesError::DestinationOccupied(to));
        }

        let owner = self.current_player;
        self.spawn(kind, to, owner);
        let ply = self.current_ply;
        if let Some(producer) = self.units.get_mut(producer_slot) {
            producer.last_action_ply = ply;
        }
        tracing::debug!(?kind, at = %to, by = %owner, "unit produced");
        Ok(Outcome::Ongoing)
    }

    /// End the current player's turn.
    ///
    /// The ply counter advances only when play returns to player 1. Draws
    /// the match instead of letting the ply counter exceed the limit.
    pub fn end_turn(&mut self) -> Outcome {
        self.current_player = self.current_player.opponent();
        if self.current_player == Player::One {
            self.current_ply += 1;
        }
        if self.current_ply > self.max_plies {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// Apply an external command to the match.
    ///
    /// `INIT` is rejected here: a live `MatchState` is by definition
    /// already initialized.
    pub fn apply(&mut self, command: &Command) -> Result<Outcome> {
        match *command {
            Command::Init { .. } => Err(RulesError::AlreadyInitialized),
            Command::Move { from, to } => self.advance(from, to),
            Command::ProduceKnight { from, to } => self.produce(UnitKind::Knight, from, to),
            Command::ProducePeasant { from, to } => self.produce(UnitKind::Peasant, from, to),
            Command::EndTurn => Ok(self.end_turn()),
        }
    }
}
