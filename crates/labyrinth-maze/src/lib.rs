//! Maze model and game rules for Labyrinth.
//!
//! Everything in this crate is pure: no I/O beyond loading a maze file, no
//! async, no shared state. The session and server crates build on it.
//!
//! # Key types and functions
//!
//! - [`Grid`]: the validated canonical maze (one entry, one exit)
//! - [`Board`]: a square cell matrix, used for rendered views
//! - [`valid_moves`]: which directions are open from a position
//! - [`render`]: the fog-of-war view around a position
//! - [`hint`]: the shortest move sequence to the exit

mod error;
mod fog;
mod grid;
mod moves;
mod path;

pub use error::MazeError;
pub use fog::{is_visible, mark_player, render, VISIBILITY_RADIUS};
pub use grid::{Board, CellKind, Grid, Position, DEFAULT_SIDE};
pub use moves::{destination, shift, valid_moves, Direction};
pub use path::{hint, HINT_ORDER};
