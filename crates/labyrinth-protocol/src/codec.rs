//! Codec trait and implementations for turning messages into frames.
//!
//! A codec decides both the byte layout of a message and how frames are
//! delimited on the stream ([`Codec::framing`]), so the server can pair any
//! codec with the TCP transport.

use labyrinth_maze::{Board, CellKind, Direction};
use labyrinth_transport::Framing;

use crate::frame::{Frame, FrameLayout};
use crate::{ActionType, ProtocolError, Request, Response};

/// Converts requests and responses to and from frames.
pub trait Codec: Send + Sync + 'static {
    /// How this codec's frames are delimited on the wire.
    fn framing(&self) -> Framing;

    /// Encodes a player → server message.
    fn encode_request(&self, request: &Request) -> Result<Vec<u8>, ProtocolError>;

    /// Decodes a player → server message.
    ///
    /// # Errors
    /// Returns an error only when the frame is malformed. Unknown actions
    /// decode to [`Request::Unrecognized`].
    fn decode_request(&self, data: &[u8]) -> Result<Request, ProtocolError>;

    /// Encodes a server → player message.
    fn encode_response(&self, response: &Response) -> Result<Vec<u8>, ProtocolError>;

    /// Decodes a server → player message.
    ///
    /// `request` is the message that provoked it. Codecs whose frames do
    /// not carry the response kind use it to tell the kinds apart.
    fn decode_response(&self, data: &[u8], request: &Request) -> Result<Response, ProtocolError>;

    /// Side of the boards this codec can carry, if it is bounded.
    ///
    /// A server refuses to pair a codec with a maze of a different side.
    fn board_side(&self) -> Option<usize> {
        None
    }
}

// ---------------------------------------------------------------------------
// FixedCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] speaking the fixed-layout binary [`Frame`].
///
/// The frame has no room for a response kind, so responses map onto the
/// legacy message types:
///
/// | Response         | type     | payload  |
/// |------------------|----------|----------|
/// | `AvailableMoves` | `Update` | `moves`  |
/// | `Hint`           | `Update` | `moves`  |
/// | `PartialMap`     | `Update` | `board`  |
/// | `FullMap`        | `Win`    | `board`  |
/// | `Empty`          | all zero |          |
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCodec {
    layout: FrameLayout,
}

impl FixedCodec {
    pub fn new(layout: FrameLayout) -> Self {
        Self { layout }
    }

    fn board_codes(&self, board: &Board) -> Result<Vec<i32>, ProtocolError> {
        if board.side() != self.layout.side {
            return Err(ProtocolError::BoardSize {
                expected: self.layout.board_len(),
                found: board.cells().len(),
            });
        }
        Ok(board.cells().iter().map(|kind| kind.code()).collect())
    }

    fn board_from_codes(&self, codes: &[i32]) -> Result<Board, ProtocolError> {
        if codes.is_empty() {
            return Ok(Board::filled(self.layout.side, CellKind::Wall));
        }
        let cells = codes
            .iter()
            .map(|&code| {
                CellKind::from_code(code).ok_or_else(|| {
                    ProtocolError::InvalidMessage(format!("unknown cell code {code}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Board::from_cells(self.layout.side, cells)?)
    }
}

fn direction_codes(moves: &[Direction]) -> Vec<i32> {
    moves.iter().map(|d| d.code()).collect()
}

fn directions_from_codes(codes: &[i32]) -> Result<Vec<Direction>, ProtocolError> {
    codes
        .iter()
        .map(|&code| {
            Direction::from_code(code).ok_or_else(|| {
                ProtocolError::InvalidMessage(format!("unknown direction code {code}"))
            })
        })
        .collect()
}

impl Codec for FixedCodec {
    fn framing(&self) -> Framing {
        Framing::Fixed(self.layout.frame_len())
    }

    fn board_side(&self) -> Option<usize> {
        Some(self.layout.side)
    }

    fn encode_request(&self, request: &Request) -> Result<Vec<u8>, ProtocolError> {
        let action = request.action_type().ok_or_else(|| {
            ProtocolError::InvalidMessage("request has no action code".into())
        })?;
        let mut frame = Frame::action(action.code());
        if let Request::Move(Some(direction)) = request {
            frame.moves.push(direction.code());
        }
        frame.encode(self.layout)
    }

    fn decode_request(&self, data: &[u8]) -> Result<Request, ProtocolError> {
        let frame = Frame::decode(data, self.layout)?;
        let request = match ActionType::from_code(frame.action) {
            Some(ActionType::Start) => Request::Start,
            Some(ActionType::Move) => Request::Move(
                frame.moves.first().copied().and_then(Direction::from_code),
            ),
            Some(ActionType::Map) => Request::Map,
            Some(ActionType::Hint) => Request::Hint,
            Some(ActionType::Reset) => Request::Reset,
            Some(ActionType::Exit) => Request::Exit,
            Some(ActionType::Update | ActionType::Win) | None => Request::Unrecognized,
        };
        Ok(request)
    }

    fn encode_response(&self, response: &Response) -> Result<Vec<u8>, ProtocolError> {
        let frame = match response {
            Response::AvailableMoves(moves) | Response::Hint(moves) => Frame {
                action: ActionType::Update.code(),
                moves: direction_codes(moves),
                board: Vec::new(),
            },
            Response::PartialMap(board) => Frame {
                action: ActionType::Update.code(),
                moves: Vec::new(),
                board: self.board_codes(board)?,
            },
            Response::FullMap(board) => Frame {
                action: ActionType::Win.code(),
                moves: Vec::new(),
                board: self.board_codes(board)?,
            },
            Response::Empty => Frame::default(),
        };
        frame.encode(self.layout)
    }

    fn decode_response(&self, data: &[u8], request: &Request) -> Result<Response, ProtocolError> {
        let frame = Frame::decode(data, self.layout)?;
        let response = match ActionType::from_code(frame.action) {
            Some(ActionType::Update) => match request {
                Request::Map => Response::PartialMap(self.board_from_codes(&frame.board)?),
                Request::Hint => Response::Hint(directions_from_codes(&frame.moves)?),
                _ => Response::AvailableMoves(directions_from_codes(&frame.moves)?),
            },
            Some(ActionType::Win) => Response::FullMap(self.board_from_codes(&frame.board)?),
            Some(ActionType::Start) => Response::Empty,
            _ => {
                return Err(ProtocolError::InvalidMessage(format!(
                    "unexpected response type {}",
                    frame.action
                )));
            }
        };
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// Largest JSON frame either side will accept.
#[cfg(feature = "json")]
pub const MAX_JSON_FRAME: usize = 64 * 1024;

/// A [`Codec`] that uses length-prefixed JSON (via `serde_json`).
///
/// Responses carry their kind on the wire, so `decode_response` ignores
/// the request.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn framing(&self) -> Framing {
        Framing::LengthPrefixed {
            max_len: MAX_JSON_FRAME,
        }
    }

    fn encode_request(&self, request: &Request) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(request).map_err(ProtocolError::Encode)
    }

    fn decode_request(&self, data: &[u8]) -> Result<Request, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    fn encode_response(&self, response: &Response) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(response).map_err(ProtocolError::Encode)
    }

    fn decode_response(&self, data: &[u8], _request: &Request) -> Result<Response, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
