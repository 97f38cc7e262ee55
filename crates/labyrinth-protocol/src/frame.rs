//! The fixed-layout binary frame.
//!
//! Every frame is a run of little-endian `i32` values:
//!
//! ```text
//! | type | moves[capacity] | board[side * side] |
//! ```
//!
//! `moves` is zero-terminated; `board` is row-major and zero-filled when the
//! message carries no board. With the default layout (10×10 board, 100 move
//! slots) a frame is 804 bytes.

use labyrinth_maze::DEFAULT_SIDE;

use crate::ProtocolError;

/// Move slots in a frame.
pub const DEFAULT_MOVE_CAPACITY: usize = 100;

const FIELD: usize = std::mem::size_of::<i32>();

/// Dimensions of a fixed-layout frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Board side length.
    pub side: usize,
    /// Number of move slots.
    pub move_capacity: usize,
}

impl FrameLayout {
    pub const fn new(side: usize, move_capacity: usize) -> Self {
        Self {
            side,
            move_capacity,
        }
    }

    /// Cells in the board section.
    pub const fn board_len(self) -> usize {
        self.side * self.side
    }

    /// Total frame size in bytes.
    pub const fn frame_len(self) -> usize {
        FIELD * (1 + self.move_capacity + self.board_len())
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self::new(DEFAULT_SIDE, DEFAULT_MOVE_CAPACITY)
    }
}

/// Raw contents of one fixed-layout frame.
///
/// `moves` holds the codes up to (not including) the first zero. `board` is
/// either empty, meaning zero-filled on the wire, or exactly
/// `side * side` codes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub action: i32,
    pub moves: Vec<i32>,
    pub board: Vec<i32>,
}

impl Frame {
    /// A frame carrying only an action code.
    pub fn action(action: i32) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    /// Serializes the frame.
    ///
    /// # Errors
    /// - [`ProtocolError::MoveOverflow`] if there are more moves than slots.
    /// - [`ProtocolError::BoardSize`] if the board is neither empty nor
    ///   `side * side`.
    /// - [`ProtocolError::InvalidMessage`] if a move code is zero, which
    ///   would end the list early.
    pub fn encode(&self, layout: FrameLayout) -> Result<Vec<u8>, ProtocolError> {
        if self.moves.len() > layout.move_capacity {
            return Err(ProtocolError::MoveOverflow {
                len: self.moves.len(),
                capacity: layout.move_capacity,
            });
        }
        if !self.board.is_empty() && self.board.len() != layout.board_len() {
            return Err(ProtocolError::BoardSize {
                expected: layout.board_len(),
                found: self.board.len(),
            });
        }
        if self.moves.contains(&0) {
            return Err(ProtocolError::InvalidMessage(
                "move code 0 is reserved as terminator".into(),
            ));
        }

        let mut buf = Vec::with_capacity(layout.frame_len());
        buf.extend_from_slice(&self.action.to_le_bytes());
        for slot in 0..layout.move_capacity {
            let code = self.moves.get(slot).copied().unwrap_or(0);
            buf.extend_from_slice(&code.to_le_bytes());
        }
        for cell in 0..layout.board_len() {
            let code = self.board.get(cell).copied().unwrap_or(0);
            buf.extend_from_slice(&code.to_le_bytes());
        }
        Ok(buf)
    }

    /// Parses a frame.
    ///
    /// An all-zero board section decodes to an empty `board`.
    ///
    /// # Errors
    /// [`ProtocolError::FrameSize`] if `data` is not exactly
    /// [`FrameLayout::frame_len`] bytes.
    pub fn decode(data: &[u8], layout: FrameLayout) -> Result<Self, ProtocolError> {
        if data.len() != layout.frame_len() {
            return Err(ProtocolError::FrameSize {
                expected: layout.frame_len(),
                found: data.len(),
            });
        }

        let fields: Vec<i32> = data
            .chunks_exact(FIELD)
            .map(|chunk| {
                let mut bytes = [0u8; FIELD];
                bytes.copy_from_slice(chunk);
                i32::from_le_bytes(bytes)
            })
            .collect();

        // Length was checked above, so both splits are in range.
        let (action, rest) = (fields[0], &fields[1..]);
        let (slots, cells) = rest.split_at(layout.move_capacity);

        let moves = slots.iter().copied().take_while(|&code| code != 0).collect();
        let board = if cells.iter().all(|&code| code == 0) {
            Vec::new()
        } else {
            cells.to_vec()
        };

        Ok(Self {
            action,
            moves,
            board,
        })
    }
}
