//! Error types for the protocol layer.

use labyrinth_maze::MazeError;

/// Errors that can occur while encoding or decoding messages.
///
/// Any of these on an inbound frame means the frame itself is unusable.
/// A well-formed frame with an unknown action code is not an error; it
/// decodes to [`Request::Unrecognized`](crate::Request::Unrecognized).
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// JSON serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// JSON deserialization failed: malformed JSON, a missing field, or
    /// an unknown direction name.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A fixed-layout frame had the wrong number of bytes.
    #[error("frame is {found} bytes, expected {expected}")]
    FrameSize { expected: usize, found: usize },

    /// More moves than the fixed layout can carry.
    #[error("{len} moves do not fit in a frame of capacity {capacity}")]
    MoveOverflow { len: usize, capacity: usize },

    /// A board whose cell count does not match the layout.
    #[error("board has {found} cells, expected {expected}")]
    BoardSize { expected: usize, found: usize },

    /// A decoded board could not be rebuilt.
    #[error(transparent)]
    Board(#[from] MazeError),

    /// The message is well-formed but violates protocol rules.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
