//! Event reconciliation for [`Feed`].

use tracing::debug;

use super::{EntryId, Feed, FeedEntry, FeedKind, SupersessionPolicy, ThinkingKey};
use crate::sse::DebateEvent;

/// What [`Feed::reconcile`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// Not a feed-worthy kind; the feed is unchanged
    Ignored,
    /// A new entry was added without retiring anything
    Appended(EntryId),
    /// A response retired its placeholder
    Superseded { removed: EntryId, added: EntryId },
}

impl Feed {
    /// Fold one event into the feed.
    ///
    /// Responses retire the placeholder registered under the same
    /// [`ThinkingKey`]; everything else is appended. A response with no
    /// placeholder is a plain append.
    pub fn reconcile(&mut self, event: &DebateEvent) -> Reconciled {
        let Some(kind) = FeedKind::from_event_type(event.event_type) else {
            return Reconciled::Ignored;
        };

        let id = self.allocate_id();
        let entry = FeedEntry::from_event(id, kind, event);

        if let Some(key) = ThinkingKey::for_response(kind, event) {
            if let Some(removed) = self.pending.remove(&key) {
                self.supersede(removed, entry);
                return Reconciled::Superseded { removed, added: id };
            }
            self.entries.push(entry);
            return Reconciled::Appended(id);
        }

        if let Some(key) = ThinkingKey::for_thinking(kind, event) {
            // At most one placeholder per key: a repeat replaces the older one
            if let Some(stale) = self.pending.insert(key, id) {
                debug!(stale = %stale, key = ?key, "dropping repeated placeholder");
                self.remove_entry(stale);
            }
        }

        self.entries.push(entry);
        Reconciled::Appended(id)
    }

    fn supersede(&mut self, target: EntryId, entry: FeedEntry) {
        match self.policy {
            SupersessionPolicy::AppendAtEnd => {
                self.remove_entry(target);
                self.entries.push(entry);
            }
            SupersessionPolicy::InPlace => match self.position(target) {
                Some(pos) => self.entries[pos] = entry,
                None => self.entries.push(entry),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sse::{Agent, EventType, ModeratorSummary};

    fn kinds(feed: &Feed) -> Vec<FeedKind> {
        feed.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_non_feed_events_are_ignored() {
        let mut feed = Feed::new();
        for event in [
            DebateEvent::new(EventType::Started),
            DebateEvent::new(EventType::Round).with_round(1),
            DebateEvent::final_result("done", Some(90.0)),
            DebateEvent::error("boom"),
        ] {
            assert_eq!(feed.reconcile(&event), Reconciled::Ignored);
        }
        assert!(feed.is_empty());
    }

    #[test]
    fn test_thinking_then_response_leaves_single_response() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::round_start(1));
        let thinking = feed.reconcile(&DebateEvent::agent_thinking(1, Agent::CentreLeft));
        let response =
            feed.reconcile(&DebateEvent::agent_response(1, Agent::CentreLeft, "Argument"));

        let Reconciled::Appended(thinking_id) = thinking else {
            panic!("expected append, got {:?}", thinking);
        };
        match response {
            Reconciled::Superseded { removed, .. } => assert_eq!(removed, thinking_id),
            other => panic!("expected supersession, got {:?}", other),
        }

        assert_eq!(kinds(&feed), vec![FeedKind::RoundStart, FeedKind::AgentResponse]);
        assert_eq!(feed.entries()[1].content.as_deref(), Some("Argument"));
        assert_eq!(feed.pending_count(), 0);
        assert!(feed.is_consistent());
    }

    #[test]
    fn test_response_without_thinking_is_plain_append() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::Centre));

        // Different agent, same round
        let result = feed.reconcile(&DebateEvent::agent_response(1, Agent::CentreRight, "x"));
        assert!(matches!(result, Reconciled::Appended(_)));
        assert_eq!(feed.len(), 2);

        // Same agent, different round
        let result = feed.reconcile(&DebateEvent::agent_response(2, Agent::Centre, "y"));
        assert!(matches!(result, Reconciled::Appended(_)));
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.pending_count(), 1);
        assert!(feed.is_consistent());
    }

    #[test]
    fn test_moderator_supersession_ignores_agent() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::new(EventType::ModeratorThinking).with_round(2));

        let summary = ModeratorSummary {
            confidence: 87.5,
            ..Default::default()
        };
        let result = feed.reconcile(&DebateEvent::moderator_response(2, summary));

        assert!(matches!(result, Reconciled::Superseded { .. }));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.entries()[0].kind, FeedKind::ModeratorResponse);
        assert_eq!(feed.entries()[0].confidence(), Some(87.5));
    }

    #[test]
    fn test_response_is_appended_at_end_by_default() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::CentreLeft));
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::Centre));
        feed.reconcile(&DebateEvent::agent_response(1, Agent::CentreLeft, "first"));

        let agents: Vec<_> = feed.iter().map(|e| (e.kind, e.agent)).collect();
        assert_eq!(
            agents,
            vec![
                (FeedKind::AgentThinking, Some(Agent::Centre)),
                (FeedKind::AgentResponse, Some(Agent::CentreLeft)),
            ]
        );
    }

    #[test]
    fn test_in_place_policy_keeps_slot() {
        let mut feed = Feed::with_policy(SupersessionPolicy::InPlace);
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::CentreLeft));
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::Centre));
        let result = feed.reconcile(&DebateEvent::agent_response(1, Agent::CentreLeft, "first"));

        let Reconciled::Superseded { removed, added } = result else {
            panic!("expected supersession, got {:?}", result);
        };
        assert!(feed.get(removed).is_none());
        assert_eq!(feed.entries()[0].id, added);
        assert_eq!(feed.entries()[0].kind, FeedKind::AgentResponse);
        assert_eq!(feed.entries()[1].kind, FeedKind::AgentThinking);
        assert!(feed.is_consistent());
    }

    #[test]
    fn test_count_grows_by_one_per_append_and_holds_on_supersession() {
        let mut feed = Feed::new();
        let agents = [Agent::CentreLeft, Agent::Centre, Agent::CentreRight];

        for round in 1..=3 {
            let before = feed.len();
            feed.reconcile(&DebateEvent::round_start(round));
            assert_eq!(feed.len(), before + 1);

            for agent in agents {
                let before = feed.len();
                feed.reconcile(&DebateEvent::agent_thinking(round, agent));
                assert_eq!(feed.len(), before + 1);

                feed.reconcile(&DebateEvent::agent_response(round, agent, "text"));
                assert_eq!(feed.len(), before + 1);
            }

            let before = feed.len();
            feed.reconcile(&DebateEvent::moderator_thinking(round));
            feed.reconcile(&DebateEvent::moderator_response(round, ModeratorSummary::default()));
            assert_eq!(feed.len(), before + 1);
            assert!(feed.is_consistent());
        }

        // 3 rounds x (round_start + 3 responses + moderator response)
        assert_eq!(feed.len(), 15);
        assert_eq!(feed.pending_count(), 0);
    }

    #[test]
    fn test_repeated_thinking_keeps_one_placeholder() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::Centre).with_message("a"));
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::Centre).with_message("b"));

        assert_eq!(feed.len(), 1);
        let key = ThinkingKey::Agent {
            round: Some(1),
            agent: Some(Agent::Centre),
        };
        assert_eq!(feed.pending(&key).unwrap().message.as_deref(), Some("b"));

        feed.reconcile(&DebateEvent::agent_response(1, Agent::Centre, "done"));
        assert_eq!(kinds(&feed), vec![FeedKind::AgentResponse]);
        assert!(feed.is_consistent());
    }

    #[test]
    fn test_repeated_moderator_thinking_keeps_one_placeholder() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::moderator_thinking(1));
        feed.reconcile(&DebateEvent::moderator_thinking(1));

        assert_eq!(feed.len(), 1);
        assert_eq!(feed.pending_count(), 1);

        feed.reconcile(&DebateEvent::moderator_response(
            1,
            ModeratorSummary {
                confidence: 72.0,
                ..Default::default()
            },
        ));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.pending_count(), 0);
        assert_eq!(kinds(&feed), vec![FeedKind::ModeratorResponse]);
        assert!(feed.is_consistent());
    }

    #[test]
    fn test_missing_round_only_matches_missing_round() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::new(EventType::AgentThinking).with_agent(Agent::Centre));

        let result = feed.reconcile(&DebateEvent::agent_response(1, Agent::Centre, "x"));
        assert!(matches!(result, Reconciled::Appended(_)));

        let result = feed.reconcile(
            &DebateEvent::new(EventType::AgentResponse).with_agent(Agent::Centre),
        );
        assert!(matches!(result, Reconciled::Superseded { .. }));
        assert_eq!(feed.pending_count(), 0);
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut feed = Feed::new();
        feed.reconcile(&DebateEvent::round_start(1));
        feed.reconcile(&DebateEvent::agent_thinking(1, Agent::Centre));
        let first_id = feed.entries()[0].id;

        feed.reconcile(&DebateEvent::agent_response(1, Agent::Centre, "x"));
        assert_eq!(feed.entries()[0].id, first_id);

        feed.clear();
        feed.reconcile(&DebateEvent::round_start(1));
        assert!(feed.entries()[0].id > first_id);
    }
}
