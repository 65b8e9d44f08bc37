//! Session-level state management
//!
//! SessionState tracks everything a renderer needs for one debate
//! submission: the reconciled feed, whether the stream is still open, the
//! final consensus, and the last error. It is mutated only through
//! `begin`, `apply`, `fail` and `end`.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::DebateError;
use crate::feed::{Feed, FeedEntry, Reconciled, SupersessionPolicy};
use crate::sse::{DebateEvent, EventType};

/// Recorded when an `error` event carries no message.
pub const UNKNOWN_STREAM_ERROR: &str = "Unknown streaming error";

/// State of the current debate submission.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Regenerated by every `begin`, for log correlation
    session_id: Option<Uuid>,

    feed: Feed,

    /// True between `begin` and `end`
    loading: bool,

    /// Empty until the `final` event
    final_consensus: String,

    /// None until a `final` event carrying a confidence
    final_confidence: Option<f64>,

    final_received: bool,

    last_error: Option<String>,

    /// Target echoed by the `started` event
    target_confidence: Option<f64>,

    /// Round count reported by the `final` event
    rounds_completed: Option<u32>,
}

impl SessionState {
    /// Create a new empty SessionState
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a SessionState whose feed uses the given supersession policy
    pub fn with_policy(policy: SupersessionPolicy) -> Self {
        Self {
            feed: Feed::with_policy(policy),
            ..Self::default()
        }
    }

    /// Start a new submission, discarding everything from the previous one.
    pub fn begin(&mut self) -> Uuid {
        let session_id = Uuid::new_v4();

        self.session_id = Some(session_id);
        self.feed.clear();
        self.loading = true;
        self.final_consensus.clear();
        self.final_confidence = None;
        self.final_received = false;
        self.last_error = None;
        self.target_confidence = None;
        self.rounds_completed = None;

        info!(session = %session_id, "debate session started");
        session_id
    }

    /// Fold one event into the session.
    pub fn apply(&mut self, event: &DebateEvent) -> Reconciled {
        match event.event_type {
            EventType::Final => {
                if self.final_received {
                    warn!(session = ?self.session_id, "ignoring repeated final event");
                } else {
                    self.final_received = true;
                    self.final_consensus = event.final_consensus.clone().unwrap_or_default();
                    self.final_confidence = event.final_confidence;
                    self.rounds_completed = event.rounds_completed;
                    info!(
                        session = ?self.session_id,
                        confidence = ?event.final_confidence,
                        rounds = ?event.rounds_completed,
                        "debate reached final consensus"
                    );
                }
                Reconciled::Ignored
            }
            EventType::Error => {
                let message = event
                    .message
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_STREAM_ERROR.to_string());
                warn!(session = ?self.session_id, error = %message, "debate server reported an error");
                self.last_error = Some(message);
                Reconciled::Ignored
            }
            EventType::Started => {
                self.target_confidence = event.target_confidence;
                debug!(session = ?self.session_id, target = ?event.target_confidence, "debate accepted");
                Reconciled::Ignored
            }
            EventType::Round => {
                debug!(session = ?self.session_id, round = ?event.round_number, "round completed");
                Reconciled::Ignored
            }
            _ => self.feed.reconcile(event),
        }
    }

    /// Record a failure that ended the submission.
    pub fn fail(&mut self, error: &DebateError) {
        warn!(session = ?self.session_id, code = error.error_code(), error = %error, "debate session failed");
        self.last_error = Some(error.user_message());
    }

    /// Mark the stream as closed.
    pub fn end(&mut self) {
        self.loading = false;
        info!(
            session = ?self.session_id,
            entries = self.feed.len(),
            final_received = self.final_received,
            "debate session ended"
        );
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Final consensus; empty until the `final` event.
    pub fn final_consensus(&self) -> &str {
        &self.final_consensus
    }

    pub fn final_confidence(&self) -> Option<f64> {
        self.final_confidence
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn target_confidence(&self) -> Option<f64> {
        self.target_confidence
    }

    pub fn rounds_completed(&self) -> Option<u32> {
        self.rounds_completed
    }

    /// Whether there is anything to render besides errors.
    pub fn has_data(&self) -> bool {
        !self.feed.is_empty() || !self.final_consensus.is_empty()
    }

    /// Owned copy of the renderable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            entries: self.feed.entries().to_vec(),
            loading: self.loading,
            final_consensus: self.final_consensus.clone(),
            final_confidence: self.final_confidence,
            last_error: self.last_error.clone(),
        }
    }
}

/// Owned copy of a session for handing to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub entries: Vec<FeedEntry>,
    pub loading: bool,
    pub final_consensus: String,
    pub final_confidence: Option<f64>,
    pub last_error: Option<String>,
}
