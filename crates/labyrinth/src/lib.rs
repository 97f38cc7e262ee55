//! # Labyrinth
//!
//! A fog-of-war maze exploration server.
//!
//! Players connect over TCP, start a game at the maze entry and move one
//! cell at a time, seeing only the cells around them, until they reach the
//! exit. Every connection plays its own independent game on a private copy
//! of the maze.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use labyrinth::prelude::*;
//!
//! # async fn run() -> Result<(), LabyrinthError> {
//! let grid = Grid::load("mazes/classic.txt", DEFAULT_SIDE)?;
//! let server = LabyrinthServerBuilder::new()
//!     .bind("127.0.0.1:51511".parse().unwrap())
//!     .build(grid, FixedCodec::default())
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::LabyrinthError;
pub use server::{LabyrinthServer, LabyrinthServerBuilder};

/// Convenience re-exports for building and talking to a server.
pub mod prelude {
    pub use crate::{LabyrinthError, LabyrinthServer, LabyrinthServerBuilder};
    pub use labyrinth_maze::{Board, CellKind, Direction, Grid, MazeError, Position, DEFAULT_SIDE};
    pub use labyrinth_protocol::{
        Codec, FixedCodec, FrameLayout, JsonCodec, ProtocolError, Request, Response, ResponseKind,
    };
    pub use labyrinth_session::{GameSession, Outcome, Phase, SessionConfig};
    pub use labyrinth_transport::{Connection, Framing, TcpConnection, TcpTransport, TransportError};
}
