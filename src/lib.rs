//! debate-feed - client for a streaming multi-agent debate backend
//!
//! Submits a debate, decodes the server-sent event stream incrementally, and
//! folds the events into a deduplicated display feed where each agent's
//! "thinking" placeholder is superseded by its response.
//!
//! This library exposes modules for use by the binary and in integration
//! tests.

pub mod adapters;
pub mod cli;
pub mod cli_output;
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod runner;
pub mod sse;
pub mod state;
pub mod traits;

pub use client::{DebateClient, DebateEventStream};
pub use config::DebateConfig;
pub use error::{DebateError, DebateResult};
pub use feed::{Feed, FeedEntry, FeedKind, Reconciled, SupersessionPolicy};
pub use models::DebateRequest;
pub use runner::{run_debate, run_debate_with, CancelToken, RunOptions};
pub use state::{SessionSnapshot, SessionState};
