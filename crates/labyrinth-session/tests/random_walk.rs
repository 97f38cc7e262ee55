//! Random request sequences against random mazes.
//!
//! Seeded so failures are reproducible. After every request the session
//! must still be in a consistent state.

use labyrinth_maze::{valid_moves, CellKind, Direction, Grid, Position};
use labyrinth_protocol::{Request, Response};
use labyrinth_session::{GameSession, Outcome, Phase};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIDE: usize = 6;
const MAZES: usize = 100;
const STEPS: usize = 200;

fn random_grid(rng: &mut StdRng) -> Grid {
    let mut rows: Vec<Vec<CellKind>> = (0..SIDE)
        .map(|_| {
            (0..SIDE)
                .map(|_| {
                    if rng.random_bool(0.25) {
                        CellKind::Wall
                    } else {
                        CellKind::Path
                    }
                })
                .collect()
        })
        .collect();

    let entry = Position::new(rng.random_range(0..SIDE), rng.random_range(0..SIDE));
    let mut exit = entry;
    while exit == entry {
        exit = Position::new(rng.random_range(0..SIDE), rng.random_range(0..SIDE));
    }
    rows[entry.row][entry.col] = CellKind::Entry;
    rows[exit.row][exit.col] = CellKind::Exit;
    Grid::from_rows(rows).expect("generated maze should be valid")
}

fn random_request(rng: &mut StdRng) -> Request {
    match rng.random_range(0..10) {
        0 => Request::Start,
        1 => Request::Map,
        2 => Request::Hint,
        3 => Request::Reset,
        4 => Request::Unrecognized,
        _ => Request::Move(Direction::from_code(rng.random_range(0..=5))),
    }
}

#[test]
fn test_random_walk_keeps_session_consistent() {
    let mut rng = StdRng::seed_from_u64(0x1ab7);

    for _ in 0..MAZES {
        let grid = random_grid(&mut rng);
        let mut session = GameSession::new(grid.clone());

        for _ in 0..STEPS {
            let request = random_request(&mut rng);
            let before = session.position();
            let Outcome::Reply(response) = session.handle(request) else {
                panic!("only exit terminates");
            };

            let position = session.position();
            assert!(
                grid.cell(position).is_some_and(|k| k.is_passable()),
                "player stands on a wall at {position}"
            );
            assert_eq!(
                session.phase() == Phase::Won,
                position == grid.exit(),
                "phase and position disagree at {position}"
            );
            assert!(
                before.chebyshev(position) <= 1 || position == grid.entry(),
                "player jumped from {before} to {position}"
            );
            assert_eq!(session.grid(), &grid, "grid must never change");

            match response {
                Response::AvailableMoves(moves) => {
                    assert_eq!(moves, valid_moves(&grid, position));
                }
                Response::PartialMap(view) => {
                    let markers = view
                        .cells()
                        .iter()
                        .filter(|&&k| k == CellKind::PlayerMarker)
                        .count();
                    let on_landmark = grid.cell(position).is_some_and(|k| k.is_landmark());
                    assert_eq!(markers, usize::from(!on_landmark));
                }
                Response::FullMap(board) => {
                    assert_eq!(&board, grid.board());
                    assert_eq!(session.phase(), Phase::Won);
                }
                Response::Hint(_) | Response::Empty => {}
            }
        }
    }
}
