//! Messages exchanged between a player and the server.
//!
//! [`Request`] is what the player asks for, [`Response`] what the server
//! answers. Responses always know their own [`ResponseKind`]; whether that
//! tag reaches the wire depends on the codec.

use std::fmt;

use labyrinth_maze::{Board, Direction};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

/// Numeric message type of the fixed-layout wire format.
///
/// `Update` and `Win` only ever travel server → client. Every other code
/// is a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Start,
    Move,
    Map,
    Hint,
    Update,
    Win,
    Reset,
    Exit,
}

impl ActionType {
    /// All types in code order.
    pub const ALL: [ActionType; 8] = [
        Self::Start,
        Self::Move,
        Self::Map,
        Self::Hint,
        Self::Update,
        Self::Win,
        Self::Reset,
        Self::Exit,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::Start => 0,
            Self::Move => 1,
            Self::Map => 2,
            Self::Hint => 3,
            Self::Update => 4,
            Self::Win => 5,
            Self::Reset => 6,
            Self::Exit => 7,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Start),
            1 => Some(Self::Move),
            2 => Some(Self::Map),
            3 => Some(Self::Hint),
            4 => Some(Self::Update),
            5 => Some(Self::Win),
            6 => Some(Self::Reset),
            7 => Some(Self::Exit),
            _ => None,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::Map => "map",
            Self::Hint => "hint",
            Self::Update => "update",
            Self::Win => "win",
            Self::Reset => "reset",
            Self::Exit => "exit",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A player → server message.
///
/// In JSON this is adjacently tagged:
/// `{"action": "move", "args": "up"}`, `{"action": "hint"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "args", rename_all = "snake_case")]
pub enum Request {
    /// Begin (or restart) the game at the entry.
    Start,
    /// Step one cell. `None` when the client sent a direction the server
    /// does not know.
    #[serde(deserialize_with = "lenient_direction")]
    Move(Option<Direction>),
    /// Ask for the fogged view around the player.
    Map,
    /// Ask for the shortest route to the exit.
    Hint,
    /// Return to the entry.
    Reset,
    /// End the session.
    Exit,
    /// A well-formed message with an action the server does not handle.
    #[serde(other)]
    Unrecognized,
}

/// Reads a move argument. A direction name or a wire code in `1..=4` is a
/// direction; any other value is `None` so the session can answer it.
fn lenient_direction<'de, D>(deserializer: D) -> Result<Option<Direction>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Arg {
        Name(Direction),
        Code(i32),
        #[allow(dead_code)]
        Other(IgnoredAny),
    }

    Ok(match Option::<Arg>::deserialize(deserializer)? {
        Some(Arg::Name(direction)) => Some(direction),
        Some(Arg::Code(code)) => Direction::from_code(code),
        Some(Arg::Other(_)) | None => None,
    })
}

impl Request {
    /// The fixed-layout type code this request travels under, if any.
    pub fn action_type(&self) -> Option<ActionType> {
        match self {
            Self::Start => Some(ActionType::Start),
            Self::Move(_) => Some(ActionType::Move),
            Self::Map => Some(ActionType::Map),
            Self::Hint => Some(ActionType::Hint),
            Self::Reset => Some(ActionType::Reset),
            Self::Exit => Some(ActionType::Exit),
            Self::Unrecognized => None,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(Some(direction)) => write!(f, "move {direction}"),
            Self::Move(None) => f.write_str("move ?"),
            Self::Unrecognized => f.write_str("unrecognized"),
            other => match other.action_type() {
                Some(action) => write!(f, "{action}"),
                None => f.write_str("unrecognized"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Which of the server's answers a [`Response`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseKind {
    AvailableMoves,
    Hint,
    PartialMap,
    FullMap,
    Empty,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A server → player message.
///
/// In JSON the kind travels as an explicit tag:
/// `{"kind": "AvailableMoves", "data": ["right", "down"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Response {
    /// Directions open from the player's cell, in `Direction::ALL` order.
    AvailableMoves(Vec<Direction>),
    /// Shortest move sequence to the exit. Empty if there is none.
    Hint(Vec<Direction>),
    /// Fogged view centered on the player.
    PartialMap(Board),
    /// The whole maze, sent once the exit is reached.
    FullMap(Board),
    /// Reply to a request that could not be served.
    Empty,
}

impl Response {
    pub fn kind(&self) -> ResponseKind {
        match self {
            Self::AvailableMoves(_) => ResponseKind::AvailableMoves,
            Self::Hint(_) => ResponseKind::Hint,
            Self::PartialMap(_) => ResponseKind::PartialMap,
            Self::FullMap(_) => ResponseKind::FullMap,
            Self::Empty => ResponseKind::Empty,
        }
    }
}
