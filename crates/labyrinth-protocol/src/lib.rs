//! Wire protocol for Labyrinth.
//!
//! - **Types** ([`Request`], [`Response`], [`ResponseKind`], [`ActionType`]):
//!   what the player and server say to each other.
//! - **Frame** ([`Frame`], [`FrameLayout`]): the fixed-layout binary frame
//!   of the classic client.
//! - **Codec** ([`Codec`], [`FixedCodec`], [`JsonCodec`]): how messages
//!   become bytes, and how those bytes are delimited on a stream.
//!
//! ```text
//! Transport (frames) → Protocol (Request) → Session (game state)
//! ```

mod codec;
mod error;
mod frame;
mod types;

pub use codec::{Codec, FixedCodec};
#[cfg(feature = "json")]
pub use codec::{JsonCodec, MAX_JSON_FRAME};
pub use error::ProtocolError;
pub use frame::{Frame, FrameLayout, DEFAULT_MOVE_CAPACITY};
pub use types::{ActionType, Request, Response, ResponseKind};
