//! SSE (Server-Sent Events) stream decoding for the debate backend.
//!
//! The backend pushes one JSON event per frame:
//! - `data: <json>` - payload line carrying a [`DebateEvent`]
//! - Empty line - terminates the frame
//! - Any other line - padding (comments, keepalives), ignored
//!
//! # Module structure
//! - `events` - Event type definitions (DebateEvent, EventType, Agent, ...)
//! - `frames` - Incremental byte-to-frame splitting (FrameDecoder)
//! - `parser` - Frame-to-event decoding (parse_frame)

mod events;
mod frames;
mod parser;

pub use events::{Agent, DebateEvent, EventType, ModeratorSummary, RoundRecord};
pub use frames::{frames, FrameDecoder, FRAME_DELIMITER};
pub use parser::{events, parse_frame, payload_line, try_parse_frame, ParseError, DATA_PREFIX};
