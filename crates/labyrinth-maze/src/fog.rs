//! Fog of war: what the player can see from where they stand.
//!
//! The player sees the 3×3 block centered on their cell (diagonals
//! included). Everything else is reported as [`CellKind::Unknown`].

use crate::{Board, CellKind, Grid, Position};

/// How far the player sees, in Chebyshev distance.
pub const VISIBILITY_RADIUS: usize = 1;

/// `true` if `cell` is within [`VISIBILITY_RADIUS`] of `center`.
pub fn is_visible(center: Position, cell: Position) -> bool {
    center.chebyshev(cell) <= VISIBILITY_RADIUS
}

/// Projects the grid into a fogged view centered on `center`.
///
/// Visible cells carry their true kind; the rest are `Unknown`.
pub fn render(grid: &Grid, center: Position) -> Board {
    let mut view = Board::filled(grid.side(), CellKind::Unknown);
    for pos in grid.board().positions() {
        if is_visible(center, pos) {
            if let Some(kind) = grid.cell(pos) {
                view.set(pos, kind);
            }
        }
    }
    view
}

/// Marks the player's cell on a rendered view.
///
/// Entry and exit cells keep their kind so the landmark stays visible.
pub fn mark_player(view: &mut Board, at: Position) {
    if view.get(at).is_some_and(|kind| !kind.is_landmark()) {
        view.set(at, CellKind::PlayerMarker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellKind::{Entry as E, Exit as X, Path as P, Wall as W};

    fn five_by_five() -> Grid {
        Grid::from_rows(vec![
            vec![E, P, W, P, P],
            vec![W, P, W, P, W],
            vec![P, P, P, P, P],
            vec![P, W, W, W, P],
            vec![P, P, P, W, X],
        ])
        .unwrap()
    }

    #[test]
    fn test_render_center_reveals_three_by_three_block() {
        let grid = five_by_five();
        let view = render(&grid, Position::new(2, 2));

        let revealed = view
            .cells()
            .iter()
            .filter(|kind| **kind != CellKind::Unknown)
            .count();
        assert_eq!(revealed, 9);
        assert_eq!(view.get(Position::new(1, 1)), Some(P));
        assert_eq!(view.get(Position::new(3, 3)), Some(W));
        assert_eq!(view.get(Position::new(0, 0)), Some(CellKind::Unknown));
        assert_eq!(view.get(Position::new(4, 4)), Some(CellKind::Unknown));
    }

    #[test]
    fn test_render_corner_clips_to_two_by_two() {
        let grid = five_by_five();
        let view = render(&grid, grid.exit());

        assert_eq!(view.get(Position::new(4, 4)), Some(X));
        assert_eq!(view.get(Position::new(3, 4)), Some(P));
        assert_eq!(view.get(Position::new(3, 3)), Some(W));
        assert_eq!(view.get(Position::new(4, 3)), Some(W));
        assert_eq!(view.get(Position::new(2, 4)), Some(CellKind::Unknown));
    }

    #[test]
    fn test_render_does_not_mutate_grid() {
        let grid = five_by_five();
        let before = grid.clone();
        let _ = render(&grid, Position::new(1, 3));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_mark_player_on_path_sets_marker() {
        let grid = five_by_five();
        let at = Position::new(2, 1);
        let mut view = render(&grid, at);
        mark_player(&mut view, at);
        assert_eq!(view.get(at), Some(CellKind::PlayerMarker));
    }

    #[test]
    fn test_mark_player_on_entry_keeps_entry() {
        let grid = five_by_five();
        let mut view = render(&grid, grid.entry());
        mark_player(&mut view, grid.entry());
        assert_eq!(view.get(grid.entry()), Some(E));
    }
}
