//! Plain-text rendering of feed entries and the session outcome.

use crate::feed::{FeedEntry, FeedKind, Reconciled};
use crate::state::SessionState;

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Render one entry.
///
/// ```text
/// Debate Round 1
/// ════════════════════════════════════════════════════════════
///   … Centre Agent: Thinking...
/// ▸ Centre Agent (Round 1)
///     Public transit first.
/// ```
pub fn format_entry(entry: &FeedEntry) -> String {
    match entry.kind {
        FeedKind::RoundStart => format!("\n{}\n{}", entry.headline(), "═".repeat(LINE_WIDTH)),
        FeedKind::AgentThinking | FeedKind::ModeratorThinking => {
            format!("  … {}", entry.headline())
        }
        FeedKind::AgentResponse => {
            let mut out = format!("▸ {}", entry.headline());
            if let Some(content) = entry.content.as_deref() {
                push_indented(&mut out, content);
            }
            out
        }
        FeedKind::ModeratorResponse => {
            let mut out = format!("◆ {}", entry.headline());
            if let Some(summary) = &entry.moderator {
                if !summary.consensus_statement.is_empty() {
                    push_indented(&mut out, &summary.consensus_statement);
                }
                push_list(&mut out, "Agreements", &summary.agreements);
                push_list(&mut out, "Disagreements", &summary.disagreements);
            }
            out
        }
    }
}

/// Render what a reconcile step added, if anything.
///
/// A superseded placeholder is not reprinted; only the response is.
pub fn format_update(state: &SessionState, outcome: &Reconciled) -> Option<String> {
    let id = match outcome {
        Reconciled::Ignored => return None,
        Reconciled::Appended(id) => *id,
        Reconciled::Superseded { added, .. } => *added,
    };
    state.feed().get(id).map(format_entry)
}

/// Render the end of a session: the consensus, the error, or both.
pub fn format_outcome(state: &SessionState) -> String {
    let mut out = String::new();

    if !state.final_consensus().is_empty() {
        out.push_str(&format!("\nFINAL CONSENSUS\n{}\n", "─".repeat(LINE_WIDTH)));
        out.push_str(state.final_consensus());
        out.push('\n');
        if let Some(confidence) = state.final_confidence() {
            out.push_str(&format!("Confidence: {:.1}%", confidence));
            if let Some(rounds) = state.rounds_completed() {
                out.push_str(&format!(" after {} round(s)", rounds));
            }
            out.push('\n');
        }
    } else if state.last_error().is_none() {
        out.push_str("\nThe debate ended without a final consensus.\n");
    }

    if let Some(error) = state.last_error() {
        out.push_str(&format!("\n✗ {}\n", error));
    }

    out
}

/// Print a reconcile step to stdout.
pub fn print_update(state: &SessionState, outcome: &Reconciled) {
    if let Some(text) = format_update(state, outcome) {
        println!("{}", text);
    }
}

/// Print the session outcome to stdout.
pub fn print_outcome(state: &SessionState) {
    print!("{}", format_outcome(state));
}

fn push_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        out.push_str("\n    ");
        out.push_str(line);
    }
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n    {}:", title));
    for item in items {
        out.push_str(&format!("\n      - {}", item));
    }
}
