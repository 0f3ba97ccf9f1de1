//! Text projection of the board's top-left corner.
//!
//! A pure, stateless rendering of unit positions: no incremental buffer is
//! kept, the grid is rebuilt from the registry on every call.

use fief_core::engine::MatchState;
use fief_core::units::{Player, UnitKind};

/// Side length of the largest rendered corner.
pub const MAX_CORNER_SIZE: i32 = 10;

/// Render the top-left `min(board_size, 10)` square of the board.
///
/// Empty cells print as `'.'`; units print as `K` (King), `R` (Knight) or
/// `C` (Peasant), uppercase for player 1 and lowercase for player 2. The
/// grid is followed by one blank line.
#[must_use]
pub fn render_corner(state: &MatchState) -> String {
    let size = state.board_size().min(MAX_CORNER_SIZE);
    let mut grid = vec![b'.'; (size * size) as usize];

    for (_, unit) in state.units().iter() {
        if unit.position.x <= size && unit.position.y <= size {
            let index = (unit.position.y - 1) * size + (unit.position.x - 1);
            grid[index as usize] = glyph(unit.kind, unit.owner);
        }
    }

    let mut out = String::with_capacity(((size + 1) * size + 1) as usize);
    for row in grid.chunks(size as usize) {
        for &cell in row {
            out.push(cell as char);
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// The per-kind letter, lowercased for player 2.
const fn glyph(kind: UnitKind, owner: Player) -> u8 {
    let letter = match kind {
        UnitKind::King => b'K',
        UnitKind::Knight => b'R',
        UnitKind::Peasant => b'C',
    };
    match owner {
        Player::One => letter,
        Player::Two => letter.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fief_core::units::Position;

    #[test]
    fn renders_the_starting_formations() {
        let state =
            MatchState::new(12, 20, 1, Position::new(1, 1), Position::new(1, 9)).unwrap();
        let rendered = render_corner(&state);
        let lines: Vec<&str> = rendered.lines().collect();

        // 10 grid rows plus the trailing blank line.
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "KCRR......");
        assert_eq!(lines[1], "..........");
        assert_eq!(lines[8], "kcrr......");
        assert_eq!(lines[10], "");
        assert!(rendered.ends_with("\n\n"));
    }

    #[test]
    fn corner_is_clamped_to_the_board() {
        let state =
            MatchState::new(9, 20, 1, Position::new(1, 1), Position::new(2, 9)).unwrap();
        let rendered = render_corner(&state);
        assert_eq!(rendered.lines().next().unwrap().len(), 9);
    }

    #[test]
    fn units_outside_the_corner_are_invisible() {
        let state =
            MatchState::new(30, 20, 1, Position::new(1, 1), Position::new(20, 20)).unwrap();
        let rendered = render_corner(&state);
        assert!(!rendered.contains('k'));
        assert!(rendered.contains('K'));
    }
}
