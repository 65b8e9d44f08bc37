//! Debate submission request.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{DebateError, DebateResult};

/// Minimum prompt length, counted after trimming whitespace.
pub const MIN_PROMPT_CHARS: usize = 5;
/// Longest prompt the backend accepts.
pub const MAX_PROMPT_CHARS: usize = 3000;
/// Accepted consensus confidence targets, in percent.
pub const CONFIDENCE_TARGET_RANGE: RangeInclusive<u8> = 50..=100;
pub const DEFAULT_CONFIDENCE_TARGET: u8 = 80;
/// Accepted round limits.
pub const MAX_ROUNDS_RANGE: RangeInclusive<u8> = 1..=20;

/// Body of `POST /start-debate`.
///
/// Construction validates every field, so a `DebateRequest` that exists is
/// one the backend will accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebateRequest {
    /// The question to debate
    prompt: String,
    /// Confidence at which the moderator may stop the debate
    confidence_target: u8,
    /// Round limit; the backend default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    max_rounds: Option<u8>,
}

impl DebateRequest {
    /// Create a validated request.
    pub fn new(prompt: impl Into<String>, confidence_target: u8) -> DebateResult<Self> {
        let prompt = prompt.into();

        let trimmed = prompt.trim().chars().count();
        if trimmed < MIN_PROMPT_CHARS {
            return Err(DebateError::InvalidRequest(format!(
                "prompt must be at least {} characters",
                MIN_PROMPT_CHARS
            )));
        }
        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(DebateError::InvalidRequest(format!(
                "prompt must be at most {} characters",
                MAX_PROMPT_CHARS
            )));
        }
        if !CONFIDENCE_TARGET_RANGE.contains(&confidence_target) {
            return Err(DebateError::InvalidRequest(format!(
                "confidence target must be between {} and {}",
                CONFIDENCE_TARGET_RANGE.start(),
                CONFIDENCE_TARGET_RANGE.end()
            )));
        }

        Ok(Self {
            prompt,
            confidence_target,
            max_rounds: None,
        })
    }

    /// Limit the number of rounds.
    pub fn with_max_rounds(mut self, rounds: u8) -> DebateResult<Self> {
        if !MAX_ROUNDS_RANGE.contains(&rounds) {
            return Err(DebateError::InvalidRequest(format!(
                "rounds must be between {} and {}",
                MAX_ROUNDS_RANGE.start(),
                MAX_ROUNDS_RANGE.end()
            )));
        }
        self.max_rounds = Some(rounds);
        Ok(self)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn confidence_target(&self) -> u8 {
        self.confidence_target
    }

    pub fn max_rounds(&self) -> Option<u8> {
        self.max_rounds
    }
}
