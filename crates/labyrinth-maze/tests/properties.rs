//! Property tests over randomly generated mazes.
//!
//! Each test builds a few hundred mazes from a seeded RNG (so failures are
//! reproducible) and checks an invariant of move validation, fog rendering
//! or the hint solver against a brute-force reference.

use std::collections::VecDeque;

use labyrinth_maze::{hint, render, valid_moves, CellKind, Direction, Grid, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIDE: usize = 7;
const MAZES: usize = 300;

/// Generates a random valid maze: ~30% walls, one entry, one exit.
fn random_grid(rng: &mut StdRng) -> Grid {
    let mut rows: Vec<Vec<CellKind>> = (0..SIDE)
        .map(|_| {
            (0..SIDE)
                .map(|_| {
                    if rng.random_bool(0.3) {
                        CellKind::Wall
                    } else {
                        CellKind::Path
                    }
                })
                .collect()
        })
        .collect();

    let entry = random_position(rng);
    let mut exit = random_position(rng);
    while exit == entry {
        exit = random_position(rng);
    }
    rows[entry.row][entry.col] = CellKind::Entry;
    rows[exit.row][exit.col] = CellKind::Exit;

    Grid::from_rows(rows).expect("generated maze should be valid")
}

fn random_position(rng: &mut StdRng) -> Position {
    Position::new(rng.random_range(0..SIDE), rng.random_range(0..SIDE))
}

fn open_positions(grid: &Grid) -> Vec<Position> {
    grid.board()
        .positions()
        .filter(|&pos| grid.cell(pos).is_some_and(|k| k.is_passable()))
        .collect()
}

/// Plain BFS distance to the exit, written independently of the solver.
fn reference_distance(grid: &Grid, from: Position) -> Option<usize> {
    let side = grid.side() as isize;
    let mut dist = vec![vec![None; grid.side()]; grid.side()];
    dist[from.row][from.col] = Some(0usize);
    let mut queue = VecDeque::from([from]);

    while let Some(cur) = queue.pop_front() {
        let d = dist[cur.row][cur.col]?;
        if cur == grid.exit() {
            return Some(d);
        }
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let (r, c) = (cur.row as isize + dr, cur.col as isize + dc);
            if r < 0 || c < 0 || r >= side || c >= side {
                continue;
            }
            let next = Position::new(r as usize, c as usize);
            if grid.cell(next) == Some(CellKind::Wall)
                || dist[next.row][next.col].is_some()
            {
                continue;
            }
            dist[next.row][next.col] = Some(d + 1);
            queue.push_back(next);
        }
    }
    None
}

/// Applies `path` from `from`, asserting every step is legal.
fn walk(grid: &Grid, from: Position, path: &[Direction]) -> Position {
    path.iter().fold(from, |pos, &direction| {
        assert!(
            valid_moves(grid, pos).contains(&direction),
            "hint step {direction} from {pos} is not a valid move"
        );
        let (dr, dc) = direction.delta();
        Position::new(
            pos.row.checked_add_signed(dr).unwrap(),
            pos.col.checked_add_signed(dc).unwrap(),
        )
    })
}

#[test]
fn test_valid_moves_matches_brute_force_in_canonical_order() {
    let mut rng = StdRng::seed_from_u64(0x1ab1);
    for _ in 0..MAZES {
        let grid = random_grid(&mut rng);
        for pos in open_positions(&grid) {
            let expected: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|d| {
                    let (dr, dc) = d.delta();
                    let r = pos.row as isize + dr;
                    let c = pos.col as isize + dc;
                    r >= 0
                        && c >= 0
                        && (r as usize) < SIDE
                        && (c as usize) < SIDE
                        && grid.cell(Position::new(r as usize, c as usize))
                            != Some(CellKind::Wall)
                })
                .collect();
            assert_eq!(valid_moves(&grid, pos), expected, "at {pos}");
        }
    }
}

#[test]
fn test_render_reveals_exactly_chebyshev_neighborhood() {
    let mut rng = StdRng::seed_from_u64(0xf06);
    for _ in 0..MAZES {
        let grid = random_grid(&mut rng);
        let center = random_position(&mut rng);
        let view = render(&grid, center);

        assert_eq!(view.side(), grid.side());
        for pos in grid.board().positions() {
            let near = pos.row.abs_diff(center.row) <= 1
                && pos.col.abs_diff(center.col) <= 1;
            let expected = if near {
                grid.cell(pos)
            } else {
                Some(CellKind::Unknown)
            };
            assert_eq!(view.get(pos), expected, "center {center}, cell {pos}");
        }
    }
}

#[test]
fn test_hint_is_shortest_and_lands_on_exit() {
    let mut rng = StdRng::seed_from_u64(0x5017);
    let mut solvable = 0;
    for _ in 0..MAZES {
        let grid = random_grid(&mut rng);
        for from in open_positions(&grid) {
            let path = hint(&grid, from);
            match reference_distance(&grid, from) {
                Some(distance) => {
                    assert_eq!(path.len(), distance, "from {from}");
                    assert_eq!(walk(&grid, from, &path), grid.exit());
                    if distance > 0 {
                        solvable += 1;
                    }
                }
                None => assert!(path.is_empty(), "from {from}"),
            }
        }
    }
    assert!(solvable > 0, "generator should produce solvable mazes");
}

#[test]
fn test_hint_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let grid = random_grid(&mut rng);
        let first = hint(&grid, grid.entry());
        let second = hint(&grid.clone(), grid.entry());
        assert_eq!(first, second);
    }
}
