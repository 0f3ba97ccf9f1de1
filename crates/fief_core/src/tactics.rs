//! Local tactical analysis: the sensory input to the decision engine.
//!
//! [`analyze`] summarizes one cell's 3x3 neighborhood and locates the
//! nearest hostile unit in a single scan of the registry. The scan order is
//! the registry's newest-first order, which makes the nearest-hostile
//! tie-break (first encountered wins) deterministic.

use crate::engine::MatchState;
use crate::units::{Player, Position, Unit, UnitKind};

/// What occupies a cell of the 3x3 neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellOccupancy {
    /// Nothing stands here.
    #[default]
    Empty,
    /// The analyzed unit's own cell (the center of the grid).
    Origin,
    /// A unit of the viewing player, or an off-board edge.
    ///
    /// Edges are reported as friendly-blocked so the decision engine never
    /// picks an out-of-bounds move without a separate bounds check.
    Friendly,
    /// An enemy unit.
    Hostile,
}

impl CellOccupancy {
    /// Whether this cell refuses movement into it.
    #[must_use]
    pub const fn blocks_move(self) -> bool {
        matches!(self, CellOccupancy::Origin | CellOccupancy::Friendly)
    }

    /// Whether a unit may be produced into this cell.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, CellOccupancy::Empty)
    }
}

/// Summary of the tactical situation around one cell.
#[derive(Debug, Clone, Copy)]
pub struct LocalSummary {
    /// How many peasants the viewing player has on the whole board,
    /// including the analyzed unit itself if it is one.
    pub friendly_peasants: u32,
    /// Occupancy of the 3x3 neighborhood; `nearby[dx + 1][dy + 1]` is the
    /// cell offset by `(dx, dy)` from the origin.
    pub nearby: [[CellOccupancy; 3]; 3],
    /// The enemy unit minimizing Chebyshev distance to the origin.
    ///
    /// Ties go to the unit encountered first in registry scan order.
    pub nearest_hostile: Option<Unit>,
}

/// Analyze the neighborhood of `origin` from `viewer`'s perspective.
#[must_use]
pub fn analyze(state: &MatchState, origin: Position, viewer: Player) -> LocalSummary {
    let mut nearby = [[CellOccupancy::Empty; 3]; 3];
    nearby[1][1] = CellOccupancy::Origin;

    // Off-board rows and columns are permanently blocked.
    let n = state.board_size();
    if origin.x == 1 || origin.x == n {
        let column = if origin.x == 1 { 0 } else { 2 };
        for cell in &mut nearby[column] {
            *cell = CellOccupancy::Friendly;
        }
    }
    if origin.y == 1 || origin.y == n {
        let row = if origin.y == 1 { 0 } else { 2 };
        for column in &mut nearby {
            column[row] = CellOccupancy::Friendly;
        }
    }

    let mut friendly_peasants = 0;
    let mut nearest_hostile: Option<Unit> = None;
    let mut nearest_distance = i32::MAX;

    for (_, unit) in state.units().iter() {
        let dx = unit.position.x - origin.x;
        let dy = unit.position.y - origin.y;
        // The analyzed unit itself must not overwrite the Origin marker.
        if dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0) {
            nearby[(dx + 1) as usize][(dy + 1) as usize] = if unit.owner == viewer {
                CellOccupancy::Friendly
            } else {
                CellOccupancy::Hostile
            };
        }
        if unit.owner == viewer {
            if unit.kind == UnitKind::Peasant {
                friendly_peasants += 1;
            }
        } else {
            let distance = unit.position.chebyshev(origin);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_hostile = Some(*unit);
            }
        }
    }

    LocalSummary {
        friendly_peasants,
        nearby,
        nearest_hostile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MatchState;

    fn standard_match() -> MatchState {
        MatchState::new(12, 20, 1, Position::new(1, 1), Position::new(9, 9)).unwrap()
    }

    #[test]
    fn center_is_origin_and_edges_are_blocked() {
        let state = standard_match();
        // The king sits in the board corner: both the x=0 column and the
        // y=0 row of the neighborhood are off-board.
        let summary = analyze(&state, Position::new(1, 1), Player::One);
        assert_eq!(summary.nearby[1][1], CellOccupancy::Origin);
        for i in 0..3 {
            assert_eq!(summary.nearby[0][i], CellOccupancy::Friendly);
            assert_eq!(summary.nearby[i][0], CellOccupancy::Friendly);
        }
        // The peasant next to the king.
        assert_eq!(summary.nearby[2][1], CellOccupancy::Friendly);
        // Empty diagonal.
        assert_eq!(summary.nearby[2][2], CellOccupancy::Empty);
    }

    #[test]
    fn hostile_neighbors_are_reported() {
        let state = standard_match();
        // View player 1's formation through player 2's eyes.
        let summary = analyze(&state, Position::new(2, 2), Player::Two);
        assert_eq!(summary.nearby[0][0], CellOccupancy::Hostile); // king at (1, 1)
        assert_eq!(summary.nearby[1][0], CellOccupancy::Hostile); // peasant at (2, 1)
        assert_eq!(summary.nearby[2][0], CellOccupancy::Hostile); // knight at (3, 1)
    }

    #[test]
    fn counts_all_friendly_peasants() {
        let state = standard_match();
        let summary = analyze(&state, Position::new(2, 1), Player::One);
        assert_eq!(summary.friendly_peasants, 1);
    }

    #[test]
    fn nearest_hostile_minimizes_chebyshev_distance() {
        let state = standard_match();
        let summary = analyze(&state, Position::new(4, 1), Player::One);
        // All of player 2's units are at distance 8 from (4, 1); the scan
        // runs newest-first, so the last-inserted knight at (12, 9) wins
        // the tie.
        let nearest = summary.nearest_hostile.unwrap();
        assert_eq!(nearest.position, Position::new(12, 9));

        let summary = analyze(&state, Position::new(3, 1), Player::One);
        // From (3, 1) the knight at (11, 9) is strictly nearest (8 < 9).
        let nearest = summary.nearest_hostile.unwrap();
        assert_eq!(nearest.position, Position::new(11, 9));
    }

    #[test]
    fn no_hostiles_yields_none() {
        let mut state = standard_match();
        let hostile_slots: Vec<_> = state
            .units()
            .iter()
            .filter(|(_, unit)| unit.owner == Player::Two)
            .map(|(slot, _)| slot)
            .collect();
        for slot in hostile_slots {
            state.units_mut().remove(slot);
        }
        let summary = analyze(&state, Position::new(1, 1), Player::One);
        assert!(summary.nearest_hostile.is_none());
    }
}
