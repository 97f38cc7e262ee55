//! Hint solver: the shortest move sequence from a position to the exit.

use std::collections::VecDeque;

use crate::moves::destination;
use crate::{CellKind, Direction, Grid, Position};

/// Neighbor expansion order for the search.
///
/// Among equally short paths this picks the one that prefers Up, then Down,
/// then Left, then Right at every branch. Changing it changes which hint a
/// client sees.
pub const HINT_ORDER: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

/// Breadth-first search from `from` to the exit.
///
/// Walls are impassable; every other kind is walkable. Each cell is marked
/// on first discovery, so the search expands at most `side * side` cells.
///
/// Returns an empty sequence when `from` already is the exit, when the exit
/// is unreachable, or when `from` lies outside the grid.
pub fn hint(grid: &Grid, from: Position) -> Vec<Direction> {
    let board = grid.board();
    let Some(start) = board.index(from) else {
        return Vec::new();
    };
    if grid.cell(from) == Some(CellKind::Exit) {
        return Vec::new();
    }

    // `came_from[i]` is the cell and step that first reached cell `i`.
    let mut came_from: Vec<Option<(Position, Direction)>> = vec![None; board.cells().len()];
    let mut visited = vec![false; board.cells().len()];
    let mut queue = VecDeque::from([from]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        for direction in HINT_ORDER {
            let Some(next) = destination(grid, current, direction) else {
                continue;
            };
            let Some(i) = board.index(next) else {
                continue;
            };
            if visited[i] {
                continue;
            }
            visited[i] = true;
            came_from[i] = Some((current, direction));

            if grid.cell(next) == Some(CellKind::Exit) {
                return trace_back(grid, &came_from, next);
            }
            queue.push_back(next);
        }
    }

    tracing::debug!(%from, "no path to exit");
    Vec::new()
}

/// Walks `came_from` back from `goal` to the search origin.
fn trace_back(
    grid: &Grid,
    came_from: &[Option<(Position, Direction)>],
    goal: Position,
) -> Vec<Direction> {
    let mut path = Vec::new();
    let mut cursor = goal;
    while let Some((prev, direction)) = grid
        .board()
        .index(cursor)
        .and_then(|i| came_from[i])
    {
        path.push(direction);
        cursor = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellKind::{Entry as E, Exit as X, Path as P, Wall as W};
    use Direction::{Down, Left, Right, Up};

    fn codes(path: &[Direction]) -> Vec<i32> {
        path.iter().map(|d| d.code()).collect()
    }

    #[test]
    fn test_hint_corridor_returns_exact_codes() {
        // E . .
        // # # .
        // . . X
        let grid = Grid::from_rows(vec![
            vec![E, P, P],
            vec![W, W, P],
            vec![P, P, X],
        ])
        .unwrap();

        let path = hint(&grid, grid.entry());

        assert_eq!(codes(&path), vec![2, 2, 3, 3]);
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_hint_open_field_prefers_down_before_right() {
        // Every cell is open, so several 4-move paths exist. Down is tried
        // before Right, so the hint goes down first.
        let grid = Grid::from_rows(vec![
            vec![E, P, P],
            vec![P, P, P],
            vec![P, P, X],
        ])
        .unwrap();

        assert_eq!(hint(&grid, grid.entry()), vec![Down, Down, Right, Right]);
    }

    #[test]
    fn test_hint_prefers_up_over_down_on_ties() {
        // Exit straight left, reachable around a wall either way.
        // . . .
        // X # E
        // . . .
        let grid = Grid::from_rows(vec![
            vec![P, P, P],
            vec![X, W, E],
            vec![P, P, P],
        ])
        .unwrap();

        assert_eq!(hint(&grid, grid.entry()), vec![Up, Left, Left, Down]);
    }

    #[test]
    fn test_hint_unreachable_exit_returns_empty() {
        let grid = Grid::from_rows(vec![
            vec![E, W, P],
            vec![W, P, P],
            vec![P, P, X],
        ])
        .unwrap();

        assert!(hint(&grid, grid.entry()).is_empty());
    }

    #[test]
    fn test_hint_from_exit_returns_empty() {
        let grid = Grid::from_rows(vec![
            vec![E, P, P],
            vec![P, P, P],
            vec![P, P, X],
        ])
        .unwrap();

        assert!(hint(&grid, grid.exit()).is_empty());
    }

    #[test]
    fn test_hint_out_of_bounds_origin_returns_empty() {
        let grid = Grid::from_rows(vec![vec![E, X], vec![P, P]]).unwrap();
        assert!(hint(&grid, Position::new(5, 5)).is_empty());
    }

    #[test]
    fn test_hint_walks_through_entry_cell() {
        // The only route to the exit passes back over the entry.
        // . E X
        // . # #
        let grid = Grid::from_rows(vec![
            vec![P, E, X],
            vec![P, W, W],
            vec![P, W, W],
        ])
        .unwrap();

        assert_eq!(hint(&grid, Position::new(1, 0)), vec![Up, Right, Right]);
    }

    #[test]
    fn test_hint_leftward_exit_uses_left() {
        let grid = Grid::from_rows(vec![
            vec![X, P, E],
            vec![W, W, W],
            vec![W, W, W],
        ])
        .unwrap();

        assert_eq!(hint(&grid, grid.entry()), vec![Left, Left]);
    }
}
