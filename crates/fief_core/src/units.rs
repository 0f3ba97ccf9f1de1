//! Unit kinds, combat strength ranking, players and grid positions.
//!
//! These are pure data types; all behavior that mutates a match lives in
//! [`crate::engine`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Produces new units; weakest in combat.
    Peasant,
    /// Losing it loses the match.
    King,
    /// Strongest combat unit.
    Knight,
}

impl UnitKind {
    /// Combat strength rank, a total order: `Peasant < King < Knight`.
    ///
    /// A King beats a Peasant but loses to a Knight. Kept as an explicit
    /// function so combat resolution does not depend on the variants'
    /// declaration order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            UnitKind::Peasant => 0,
            UnitKind::King => 1,
            UnitKind::Knight => 2,
        }
    }
}

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player 1, who always moves first.
    One,
    /// Player 2.
    Two,
}

impl Player {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Protocol-level player number (1 or 2).
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parse a protocol-level player number.
    #[must_use]
    pub const fn from_number(n: i32) -> Option<Self> {
        match n {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A 1-indexed cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column number.
    pub x: i32,
    /// Row number.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    ///
    /// Adjacency (a king move) is distance exactly 1; the starting kings
    /// must be at distance 8 or more.
    #[must_use]
    pub const fn chebyshev(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy {
            dx
        } else {
            dy
        }
    }

    /// Unit-vector sign of the displacement toward `other`, per axis.
    #[must_use]
    pub const fn direction_to(self, other: Self) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }

    /// The cell offset by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit on the board.
///
/// Units carry no persistent identity; they are addressed by position and
/// owner at any given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// What kind of unit this is.
    pub kind: UnitKind,
    /// Where the unit currently stands.
    pub position: Position,
    /// Which player owns the unit.
    pub owner: Player,
    /// The ply at which the unit last moved or produced.
    ///
    /// Enforces one action per ply and the production cooldown. Always at
    /// most the current ply.
    pub last_action_ply: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_a_total_order() {
        assert!(UnitKind::Peasant.rank() < UnitKind::King.rank());
        assert!(UnitKind::King.rank() < UnitKind::Knight.rank());
    }

    #[test]
    fn player_round_trip() {
        assert_eq!(Player::from_number(1), Some(Player::One));
        assert_eq!(Player::from_number(2), Some(Player::Two));
        assert_eq!(Player::from_number(0), None);
        assert_eq!(Player::from_number(3), None);
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn chebyshev_distance() {
        let a = Position::new(1, 1);
        assert_eq!(a.chebyshev(Position::new(1, 1)), 0);
        assert_eq!(a.chebyshev(Position::new(2, 2)), 1);
        assert_eq!(a.chebyshev(Position::new(9, 3)), 8);
        assert_eq!(a.chebyshev(Position::new(3, 9)), 8);
    }

    #[test]
    fn direction_to_signs() {
        let a = Position::new(5, 5);
        assert_eq!(a.direction_to(Position::new(9, 2)), (1, -1));
        assert_eq!(a.direction_to(Position::new(5, 9)), (0, 1));
        assert_eq!(a.direction_to(a), (0, 0));
    }
}
