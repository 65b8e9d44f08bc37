//! Frame-to-event decoding.

use futures_util::stream::{Stream, StreamExt};
use thiserror::Error;
use tracing::debug;

use super::events::DebateEvent;

/// Prefix of the line carrying the JSON payload.
pub const DATA_PREFIX: &str = "data: ";

/// Why a frame's payload could not be decoded.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid event payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Locate the first payload line of a frame, without its prefix.
pub fn payload_line(frame: &str) -> Option<&str> {
    frame.lines().find_map(|line| line.strip_prefix(DATA_PREFIX))
}

/// Decode a frame, reporting why a payload was rejected.
///
/// Returns `Ok(None)` for frames with no payload line.
pub fn try_parse_frame(frame: &str) -> Result<Option<DebateEvent>, ParseError> {
    let Some(payload) = payload_line(frame) else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(payload)?))
}

/// Decode a frame into an event.
///
/// Padding frames and undecodable payloads both yield `None`; the backend
/// reports its own failures through `error` events, so a bad payload is
/// noise rather than a session failure.
pub fn parse_frame(frame: &str) -> Option<DebateEvent> {
    match try_parse_frame(frame) {
        Ok(event) => event,
        Err(err) => {
            debug!(error = %err, "skipping malformed frame");
            None
        }
    }
}

/// Turn a stream of frames into a stream of events, dropping frames that
/// carry none. Errors pass through untouched.
pub fn events<S, E>(frames: S) -> impl Stream<Item = Result<DebateEvent, E>>
where
    S: Stream<Item = Result<String, E>>,
{
    frames.filter_map(|frame| async move {
        match frame {
            Ok(frame) => parse_frame(&frame).map(Ok),
            Err(err) => Some(Err(err)),
        }
    })
}
