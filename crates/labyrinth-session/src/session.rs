//! The game session: one player's position and phase in one maze.
//!
//! A session owns its own copy of the grid. The grid is never written to;
//! the player's marker exists only in rendered views.
//!
//! ```text
//!   NotStarted ──(start)──→ Active ──(move onto exit)──→ Won
//!                             ↑                           │
//!                             └──────(start / reset)──────┘
//! ```

use labyrinth_maze::{
    destination, hint, mark_player, render, valid_moves, Board, Direction, Grid, Position,
};
use labyrinth_protocol::{Request, Response};

/// Where the player is in the game lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Connected, no `Start` yet.
    NotStarted,
    /// Exploring.
    Active,
    /// Reached the exit. Only `Map`, `Start`, `Reset` and `Exit` do
    /// anything from here.
    Won,
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on. Also returned when the step was blocked.
    Continued,
    /// The step landed on the exit.
    Won,
}

/// What the connection should do after a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Send this response and wait for the next request.
    Reply(Response),
    /// Close the connection without replying.
    Terminate,
}

/// One player's game.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    position: Position,
    phase: Phase,
}

impl GameSession {
    /// Creates a session on `grid`, standing on the entry, not yet started.
    pub fn new(grid: Grid) -> Self {
        Self {
            position: grid.entry(),
            grid,
            phase: Phase::NotStarted,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Dispatches one request.
    ///
    /// Requests that are unknown, carry a bad direction, or are not
    /// allowed in the current phase leave the session untouched and
    /// reply [`Response::Empty`].
    pub fn handle(&mut self, request: Request) -> Outcome {
        tracing::debug!(%request, phase = ?self.phase, position = %self.position, "dispatching");

        let response = match (request, self.phase) {
            (Request::Start, _) => {
                tracing::info!("starting new game");
                self.restart();
                self.available_moves()
            }
            (Request::Reset, _) => {
                tracing::info!("game reset");
                self.restart();
                self.available_moves()
            }
            (Request::Move(Some(direction)), Phase::Active) => match self.apply_move(direction) {
                MoveOutcome::Continued => self.available_moves(),
                MoveOutcome::Won => Response::FullMap(self.grid.board().clone()),
            },
            (Request::Map, Phase::Active | Phase::Won) => Response::PartialMap(self.view()),
            (Request::Hint, Phase::Active) => Response::Hint(hint(&self.grid, self.position)),
            (Request::Exit, _) => return Outcome::Terminate,
            (request, phase) => {
                tracing::debug!(%request, ?phase, "request ignored");
                Response::Empty
            }
        };
        Outcome::Reply(response)
    }

    /// Steps the player one cell.
    ///
    /// A step into a wall or off the board leaves the player where they
    /// are and still returns [`MoveOutcome::Continued`]. Landing on the
    /// exit switches the phase to [`Phase::Won`].
    ///
    /// This does not check the phase; [`handle`](Self::handle) does.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let Some(to) = destination(&self.grid, self.position, direction) else {
            tracing::debug!(%direction, position = %self.position, "move blocked");
            return MoveOutcome::Continued;
        };

        self.position = to;
        if to == self.grid.exit() {
            self.phase = Phase::Won;
            tracing::info!(position = %to, "player reached the exit");
            return MoveOutcome::Won;
        }
        MoveOutcome::Continued
    }

    /// The fogged view around the player, with the player's cell marked.
    pub fn view(&self) -> Board {
        let mut view = render(&self.grid, self.position);
        mark_player(&mut view, self.position);
        view
    }

    fn available_moves(&self) -> Response {
        Response::AvailableMoves(valid_moves(&self.grid, self.position))
    }

    fn restart(&mut self) {
        self.position = self.grid.entry();
        self.phase = Phase::Active;
    }
}
