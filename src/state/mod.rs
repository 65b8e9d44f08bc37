//! Session state for one debate submission.
//!
//! [`SessionState`] is owned by the task consuming the stream and passed to
//! it by `&mut`; renderers read it, or a [`SessionSnapshot`] of it, after
//! each event.

pub mod session;

pub use session::{SessionSnapshot, SessionState, UNKNOWN_STREAM_ERROR};
