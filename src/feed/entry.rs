//! Feed entry types.

use chrono::{DateTime, Utc};

use crate::sse::{Agent, DebateEvent, EventType, ModeratorSummary};

/// Identity token of a feed entry, unique within a [`Feed`](super::Feed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

/// The event kinds retained for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    RoundStart,
    AgentThinking,
    AgentResponse,
    ModeratorThinking,
    ModeratorResponse,
}

impl FeedKind {
    /// Map an event kind to its feed kind, if it has one.
    pub fn from_event_type(event_type: EventType) -> Option<Self> {
        match event_type {
            EventType::RoundStart => Some(FeedKind::RoundStart),
            EventType::AgentThinking => Some(FeedKind::AgentThinking),
            EventType::AgentResponse => Some(FeedKind::AgentResponse),
            EventType::ModeratorThinking => Some(FeedKind::ModeratorThinking),
            EventType::ModeratorResponse => Some(FeedKind::ModeratorResponse),
            EventType::Started
            | EventType::Round
            | EventType::Final
            | EventType::Error => None,
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            FeedKind::RoundStart => EventType::RoundStart,
            FeedKind::AgentThinking => EventType::AgentThinking,
            FeedKind::AgentResponse => EventType::AgentResponse,
            FeedKind::ModeratorThinking => EventType::ModeratorThinking,
            FeedKind::ModeratorResponse => EventType::ModeratorResponse,
        }
    }

    /// Ephemeral kinds awaiting a terminal response.
    pub fn is_thinking(&self) -> bool {
        matches!(self, FeedKind::AgentThinking | FeedKind::ModeratorThinking)
    }
}

/// A display-bound event retained in the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: EntryId,
    pub kind: FeedKind,
    pub round_number: Option<u32>,
    pub agent: Option<Agent>,
    pub message: Option<String>,
    pub content: Option<String>,
    pub moderator: Option<ModeratorSummary>,
    /// When the defining event was reconciled
    pub received_at: DateTime<Utc>,
}

impl FeedEntry {
    pub(crate) fn from_event(id: EntryId, kind: FeedKind, event: &DebateEvent) -> Self {
        Self {
            id,
            kind,
            round_number: event.round_number,
            agent: event.agent,
            message: event.message.clone(),
            content: event.content.clone(),
            moderator: event.moderator.clone(),
            received_at: Utc::now(),
        }
    }

    /// Moderator confidence, for `moderator_response` entries.
    pub fn confidence(&self) -> Option<f64> {
        self.moderator.as_ref().map(|m| m.confidence)
    }

    /// One-line plain-text rendering.
    pub fn headline(&self) -> String {
        let round = self
            .round_number
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        match self.kind {
            FeedKind::RoundStart => format!("Debate Round {}", round),
            FeedKind::AgentThinking | FeedKind::ModeratorThinking => {
                let agent = self.agent.unwrap_or(Agent::Moderator);
                format!(
                    "{}: {}",
                    agent.display_name(),
                    self.message.as_deref().unwrap_or("Thinking...")
                )
            }
            FeedKind::AgentResponse => {
                let agent = self.agent.unwrap_or(Agent::Centre);
                format!("{} (Round {})", agent.display_name(), round)
            }
            FeedKind::ModeratorResponse => format!(
                "Moderator (Round {}) - Confidence {:.1}%",
                round,
                self.confidence().unwrap_or(0.0)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_kind_mapping() {
        assert_eq!(
            FeedKind::from_event_type(EventType::AgentResponse),
            Some(FeedKind::AgentResponse)
        );
        assert_eq!(FeedKind::from_event_type(EventType::Final), None);
        assert_eq!(FeedKind::from_event_type(EventType::Started), None);
        assert_eq!(
            FeedKind::ModeratorThinking.event_type(),
            EventType::ModeratorThinking
        );
    }

    #[test]
    fn test_headlines() {
        let thinking = FeedEntry::from_event(
            EntryId(0),
            FeedKind::AgentThinking,
            &DebateEvent::agent_thinking(1, Agent::CentreLeft),
        );
        assert_eq!(thinking.headline(), "Centre-Left Agent: Thinking...");

        let round = FeedEntry::from_event(
            EntryId(1),
            FeedKind::RoundStart,
            &DebateEvent::round_start(4),
        );
        assert_eq!(round.headline(), "Debate Round 4");

        let summary = ModeratorSummary {
            confidence: 87.5,
            ..Default::default()
        };
        let moderator = FeedEntry::from_event(
            EntryId(2),
            FeedKind::ModeratorResponse,
            &DebateEvent::moderator_response(2, summary),
        );
        assert_eq!(moderator.headline(), "Moderator (Round 2) - Confidence 87.5%");
    }
}
