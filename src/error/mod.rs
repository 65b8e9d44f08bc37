//! Error handling for debate submissions.
//!
//! Every failure that ends a submission is a [`DebateError`]. Its
//! [`user_message`](DebateError::user_message) is what the session records
//! as the last error.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `InvalidRequest` | Prompt or targets fail validation, before any I/O |
//! | `Connection` | The request never produced a status |
//! | `Transport` | The backend answered with a non-success status |
//! | `MissingBody` | The response cannot be streamed |
//! | `Stream` | Reading the body failed mid-stream |
//! | `IdleTimeout` / `DeadlineExceeded` | Configured time limits ran out |
//! | `Cancelled` | The caller cancelled the submission |
//!
//! Malformed frames are not errors; the parser drops them.

mod debate_error;

pub use debate_error::DebateError;

/// Result alias for debate operations.
pub type DebateResult<T> = Result<T, DebateError>;
