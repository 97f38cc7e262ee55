//! Player game sessions for Labyrinth.
//!
//! A [`GameSession`] is the state machine behind one connection: it takes
//! decoded [`Request`](labyrinth_protocol::Request)s and produces
//! [`Response`](labyrinth_protocol::Response)s, using the maze crate for
//! move validation, fog rendering and hints.
//!
//! ```text
//! Protocol (Request) → Session (this crate) → Protocol (Response)
//!                          ↓
//!                      Maze (grid, moves, fog, hint)
//! ```

mod config;
mod session;

pub use config::SessionConfig;
pub use session::{GameSession, MoveOutcome, Outcome, Phase};
