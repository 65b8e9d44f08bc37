//! Event types pushed by the debate backend.
//!
//! Every frame carries a single flat JSON object discriminated by
//! `event_type`. All other fields are optional and only populated for the
//! kinds that use them; the backend sends `null` for the rest.

use serde::{Deserialize, Serialize};

/// Discriminator for [`DebateEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Debate accepted by the backend
    Started,
    /// A new round begins
    RoundStart,
    /// An agent started composing its argument
    AgentThinking,
    /// An agent finished its argument
    AgentResponse,
    /// The moderator started evaluating the round
    ModeratorThinking,
    /// The moderator's evaluation of the round
    ModeratorResponse,
    /// Full record of a completed round
    Round,
    /// Debate finished with a consensus
    Final,
    /// Backend-side failure
    Error,
}

impl EventType {
    /// Returns the wire name of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Started => "started",
            EventType::RoundStart => "round_start",
            EventType::AgentThinking => "agent_thinking",
            EventType::AgentResponse => "agent_response",
            EventType::ModeratorThinking => "moderator_thinking",
            EventType::ModeratorResponse => "moderator_response",
            EventType::Round => "round",
            EventType::Final => "final",
            EventType::Error => "error",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Debate participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agent {
    CentreLeft,
    Centre,
    CentreRight,
    Moderator,
}

impl Agent {
    /// Returns the wire name of the agent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Agent::CentreLeft => "centre_left",
            Agent::Centre => "centre",
            Agent::CentreRight => "centre_right",
            Agent::Moderator => "moderator",
        }
    }

    /// Human-readable title for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Agent::CentreLeft => "Centre-Left Agent",
            Agent::Centre => "Centre Agent",
            Agent::CentreRight => "Centre-Right Agent",
            Agent::Moderator => "Moderator",
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderator's structured evaluation of a round.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeratorSummary {
    #[serde(default)]
    pub agreements: Vec<String>,
    #[serde(default)]
    pub disagreements: Vec<String>,
    #[serde(default)]
    pub strongest_arguments: Vec<String>,
    #[serde(default)]
    pub consensus_statement: String,
    /// Consensus confidence, 0-100
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub summary: String,
}

/// Complete record of one round, sent with `round` events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_number: u32,
    #[serde(default)]
    pub centre_left_response: String,
    #[serde(default)]
    pub centre_response: String,
    #[serde(default)]
    pub centre_right_response: String,
    #[serde(default)]
    pub moderator_summary: String,
    #[serde(default)]
    pub consensus_statement: String,
    #[serde(default)]
    pub confidence: f64,
}

/// A decoded debate event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateEvent {
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator: Option<ModeratorSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_consensus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_confidence: Option<f64>,
    /// Requested confidence target, echoed on `started`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_data: Option<RoundRecord>,
    /// Number of rounds run, sent with `final`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds_completed: Option<u32>,
}

impl DebateEvent {
    /// Create an event of the given kind with every optional field unset.
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            round_number: None,
            agent: None,
            message: None,
            content: None,
            moderator: None,
            final_consensus: None,
            final_confidence: None,
            target_confidence: None,
            round_data: None,
            rounds_completed: None,
        }
    }

    pub fn round_start(round: u32) -> Self {
        Self::new(EventType::RoundStart).with_round(round)
    }

    pub fn agent_thinking(round: u32, agent: Agent) -> Self {
        Self::new(EventType::AgentThinking)
            .with_round(round)
            .with_agent(agent)
    }

    pub fn agent_response(round: u32, agent: Agent, content: impl Into<String>) -> Self {
        Self::new(EventType::AgentResponse)
            .with_round(round)
            .with_agent(agent)
            .with_content(content)
    }

    pub fn moderator_thinking(round: u32) -> Self {
        Self::new(EventType::ModeratorThinking)
            .with_round(round)
            .with_agent(Agent::Moderator)
    }

    pub fn moderator_response(round: u32, summary: ModeratorSummary) -> Self {
        Self::new(EventType::ModeratorResponse)
            .with_round(round)
            .with_agent(Agent::Moderator)
            .with_moderator(summary)
    }

    pub fn final_result(consensus: impl Into<String>, confidence: Option<f64>) -> Self {
        let mut event = Self::new(EventType::Final);
        event.final_consensus = Some(consensus.into());
        event.final_confidence = confidence;
        event
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(EventType::Error).with_message(message)
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round_number = Some(round);
        self
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_moderator(mut self, summary: ModeratorSummary) -> Self {
        self.moderator = Some(summary);
        self
    }

    /// Encode the event as a complete wire frame (`data: {json}\n\n`).
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        Ok(format!("data: {}\n\n", serde_json::to_string(self)?))
    }
}
