//! Unified error type for the Labyrinth server.

use labyrinth_maze::MazeError;
use labyrinth_protocol::ProtocolError;
use labyrinth_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum LabyrinthError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The maze could not be loaded.
    #[error(transparent)]
    Maze(#[from] MazeError),

    /// The codec's frames carry boards of a different side than the maze.
    #[error("codec carries {codec}x{codec} boards but the maze is {maze}x{maze}")]
    SideMismatch { codec: usize, maze: usize },
}
