//! Ordered, deduplicated debate feed.
//!
//! The feed holds the display-bound events in arrival order. "Thinking"
//! placeholders are superseded by their matching response: an
//! `agent_response` retires the `agent_thinking` with the same round and
//! agent, a `moderator_response` retires the `moderator_thinking` with the
//! same round.
//!
//! Pending placeholders are indexed by [`ThinkingKey`] so the supersession
//! target is a map lookup, and the "at most one placeholder per key"
//! invariant can be checked directly with [`Feed::is_consistent`].

mod entry;
mod reconciliation;

use std::collections::HashMap;

pub use entry::{EntryId, FeedEntry, FeedKind};
pub use reconciliation::Reconciled;

use crate::sse::{Agent, DebateEvent};

/// Where a superseding response lands in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupersessionPolicy {
    /// Remove the placeholder and append the response at the end
    #[default]
    AppendAtEnd,
    /// Replace the placeholder in its slot
    InPlace,
}

/// Composite key pairing a thinking placeholder with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThinkingKey {
    Agent {
        round: Option<u32>,
        agent: Option<Agent>,
    },
    /// The moderator is singular, so only the round matters
    Moderator { round: Option<u32> },
}

impl ThinkingKey {
    /// Key registered by a placeholder entry.
    pub fn for_thinking(kind: FeedKind, event: &DebateEvent) -> Option<Self> {
        match kind {
            FeedKind::AgentThinking => Some(ThinkingKey::Agent {
                round: event.round_number,
                agent: event.agent,
            }),
            FeedKind::ModeratorThinking => Some(ThinkingKey::Moderator {
                round: event.round_number,
            }),
            _ => None,
        }
    }

    /// Key a response looks up to find the placeholder it supersedes.
    pub fn for_response(kind: FeedKind, event: &DebateEvent) -> Option<Self> {
        match kind {
            FeedKind::AgentResponse => Some(ThinkingKey::Agent {
                round: event.round_number,
                agent: event.agent,
            }),
            FeedKind::ModeratorResponse => Some(ThinkingKey::Moderator {
                round: event.round_number,
            }),
            _ => None,
        }
    }
}

/// The reconciled feed.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    entries: Vec<FeedEntry>,
    /// Live placeholder for each key
    pending: HashMap<ThinkingKey, EntryId>,
    /// Never reset, so ids stay unique across `clear`
    next_id: u64,
    policy: SupersessionPolicy,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SupersessionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> SupersessionPolicy {
        self.policy
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&FeedEntry> {
        self.position(id).map(|pos| &self.entries[pos])
    }

    /// The live placeholder for a key, if any.
    pub fn pending(&self, key: &ThinkingKey) -> Option<&FeedEntry> {
        self.pending.get(key).and_then(|id| self.get(*id))
    }

    /// Number of placeholders still awaiting a response.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drop every entry. Ids already handed out are not reused.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending.clear();
    }

    /// Check that the placeholder index matches the entries: every indexed
    /// id is a live placeholder of the right kind, every placeholder is
    /// indexed, and ids are unique.
    pub fn is_consistent(&self) -> bool {
        let thinking = self.entries.iter().filter(|e| e.kind.is_thinking()).count();
        if thinking != self.pending.len() {
            return false;
        }

        let indexed = self.pending.iter().all(|(key, id)| {
            self.get(*id).is_some_and(|entry| {
                ThinkingKey::for_thinking(
                    entry.kind,
                    &DebateEvent {
                        round_number: entry.round_number,
                        agent: entry.agent,
                        ..DebateEvent::new(entry.kind.event_type())
                    },
                ) == Some(*key)
            })
        });

        let mut ids: Vec<EntryId> = self.entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();

        indexed && ids.len() == self.entries.len()
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn remove_entry(&mut self, id: EntryId) -> Option<FeedEntry> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos))
    }
}

impl<'a> IntoIterator for &'a Feed {
    type Item = &'a FeedEntry;
    type IntoIter = std::slice::Iter<'a, FeedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
