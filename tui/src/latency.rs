//! Tracks time-to-first-byte / time-to-completion per active request for the
//! sidebar's activity indicators (§4's `RequestActivity`). Purely derived
//! bookkeeping; never the source of truth for session status.

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use fleet_protocol::RequestActivity;
use fleet_protocol::SessionId;

#[derive(Debug, Clone, Default)]
pub struct ActivityTracker {
    by_session: HashMap<SessionId, RequestActivity>,
}

impl ActivityTracker {
    pub fn mark_active(&mut self, session_id: &SessionId, now: DateTime<Utc>) {
        let entry = self.by_session.entry(session_id.clone()).or_insert_with(|| RequestActivity::idle(session_id.clone(), now));
        entry.active = true;
        entry.last_event_at = now;
        entry.total_events = entry.total_events.saturating_add(1);
        if entry.visible_since.is_none() {
            entry.visible_since = Some(now);
        }
    }

    pub fn mark_idle(&mut self, session_id: &SessionId, now: DateTime<Utc>) {
        let entry = self.by_session.entry(session_id.clone()).or_insert_with(|| RequestActivity::idle(session_id.clone(), now));
        entry.active = false;
        entry.visible_since = None;
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&RequestActivity> {
        self.by_session.get(session_id)
    }

    pub fn is_active(&self, session_id: &SessionId) -> bool {
        self.by_session.get(session_id).is_some_and(|a| a.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_idle_clears_visible_since() {
        let mut tracker = ActivityTracker::default();
        let session_id = SessionId::new("s1");
        let now = Utc::now();
        tracker.mark_active(&session_id, now);
        assert!(tracker.is_active(&session_id));
        tracker.mark_idle(&session_id, now);
        assert!(!tracker.is_active(&session_id));
        assert!(tracker.get(&session_id).unwrap().visible_since.is_none());
    }
}
