//! Request models sent to the debate backend.

mod request;

pub use request::{
    DebateRequest, CONFIDENCE_TARGET_RANGE, DEFAULT_CONFIDENCE_TARGET, MAX_PROMPT_CHARS,
    MAX_ROUNDS_RANGE, MIN_PROMPT_CHARS,
};
