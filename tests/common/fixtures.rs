//! Debate transcripts and wire encoding helpers.

use debate_feed::sse::{Agent, DebateEvent, EventType, ModeratorSummary};
use debate_feed::DebateRequest;

pub const AGENTS: [Agent; 3] = [Agent::CentreLeft, Agent::Centre, Agent::CentreRight];

/// A valid request for tests that do not care about its contents.
pub fn test_request() -> DebateRequest {
    DebateRequest::new("Should public transport be free?", 80).expect("valid request")
}

/// Moderator summary with the given confidence.
pub fn summary(confidence: f64) -> ModeratorSummary {
    ModeratorSummary {
        agreements: vec!["Congestion is a problem".to_string()],
        disagreements: vec!["Who pays".to_string()],
        consensus_statement: "Subsidise off-peak travel".to_string(),
        confidence,
        ..Default::default()
    }
}

/// One full round: start, three agents thinking then responding, and the
/// moderator thinking then responding.
pub fn round(number: u32, confidence: f64) -> Vec<DebateEvent> {
    let mut events = vec![DebateEvent::round_start(number)];
    for agent in AGENTS {
        events.push(DebateEvent::agent_thinking(number, agent).with_message("Thinking..."));
    }
    for agent in AGENTS {
        events.push(DebateEvent::agent_response(
            number,
            agent,
            format!("{} argument for round {}", agent.display_name(), number),
        ));
    }
    events.push(DebateEvent::moderator_thinking(number));
    events.push(DebateEvent::moderator_response(number, summary(confidence)));
    events
}

/// A complete debate of `rounds` rounds ending in a final consensus.
pub fn transcript(rounds: u32) -> Vec<DebateEvent> {
    let mut started = DebateEvent::new(EventType::Started);
    started.target_confidence = Some(80.0);

    let mut events = vec![started];
    for number in 1..=rounds {
        let confidence = 60.0 + 10.0 * number as f64;
        events.extend(round(number, confidence));
        events.push(DebateEvent::new(EventType::Round).with_round(number));
    }

    let mut last = DebateEvent::final_result("Subsidise off-peak travel", Some(85.0));
    last.rounds_completed = Some(rounds);
    events.push(last);
    events
}

/// Encode events as an SSE body.
pub fn sse_body(events: &[DebateEvent]) -> String {
    events
        .iter()
        .map(|event| event.to_frame().expect("event serializes"))
        .collect()
}
