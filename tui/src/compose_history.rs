//! Per-session compose history and draft text, mirroring a shell's
//! up-arrow history. Bounded so a long-lived session doesn't grow the
//! persisted app state file without limit.

use std::collections::HashMap;
use std::collections::VecDeque;

use fleet_protocol::SessionId;

const MAX_HISTORY_PER_SESSION: usize = 200;
/// Cap on distinct sessions tracked at once; beyond this the session with
/// the lexically smallest id is evicted, same as `Recents` would age it out.
const MAX_SESSIONS: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct ComposeHistory {
    history: HashMap<SessionId, VecDeque<String>>,
    drafts: HashMap<SessionId, String>,
    /// Index into `history` during up/down recall; `None` means the draft is
    /// untouched by recall navigation.
    recall_cursor: HashMap<SessionId, usize>,
}

impl ComposeHistory {
    pub fn record_sent(&mut self, session_id: &SessionId, text: String) {
        if text.trim().is_empty() {
            return;
        }
        let entries = self.history.entry(session_id.clone()).or_default();
        entries.push_back(text);
        while entries.len() > MAX_HISTORY_PER_SESSION {
            entries.pop_front();
        }
        self.recall_cursor.remove(session_id);
        self.drafts.remove(session_id);
        self.evict_oldest_sessions();
    }

    /// Keeps the session count at or under `MAX_SESSIONS` by dropping the
    /// lexically smallest session ids first once it's exceeded.
    fn evict_oldest_sessions(&mut self) {
        while self.history.len() > MAX_SESSIONS {
            let Some(victim) = self.history.keys().min().cloned() else { break };
            self.history.remove(&victim);
            self.drafts.remove(&victim);
            self.recall_cursor.remove(&victim);
        }
    }

    pub fn set_draft(&mut self, session_id: &SessionId, text: String) {
        self.drafts.insert(session_id.clone(), text);
    }

    pub fn draft(&self, session_id: &SessionId) -> &str {
        self.drafts.get(session_id).map(String::as_str).unwrap_or("")
    }

    pub fn clear_draft(&mut self, session_id: &SessionId) {
        self.drafts.remove(session_id);
        self.recall_cursor.remove(session_id);
    }

    /// Moves recall one step older; returns the text to populate the
    /// compose box with, or `None` if there's no older entry.
    pub fn recall_older(&mut self, session_id: &SessionId) -> Option<String> {
        let len = self.history.get(session_id).map(VecDeque::len)?;
        if len == 0 {
            return None;
        }
        let cursor = self.recall_cursor.get(session_id).copied().unwrap_or(len);
        if cursor == 0 {
            return None;
        }
        let next = cursor - 1;
        self.recall_cursor.insert(session_id.clone(), next);
        self.history.get(session_id).and_then(|h| h.get(next)).cloned()
    }

    pub fn recall_newer(&mut self, session_id: &SessionId) -> Option<String> {
        let cursor = *self.recall_cursor.get(session_id)?;
        let len = self.history.get(session_id).map(VecDeque::len).unwrap_or(0);
        let next = cursor + 1;
        if next >= len {
            self.recall_cursor.remove(session_id);
            return Some(String::new());
        }
        self.recall_cursor.insert(session_id.clone(), next);
        self.history.get(session_id).and_then(|h| h.get(next)).cloned()
    }

    pub fn history_for(&self, session_id: &SessionId) -> &[String] {
        self.history.get(session_id).map(|h| h.as_slices().0).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recall_older_walks_back_from_most_recent() {
        let mut history = ComposeHistory::default();
        let session_id = SessionId::new("s1");
        history.record_sent(&session_id, "first".into());
        history.record_sent(&session_id, "second".into());
        assert_eq!(history.recall_older(&session_id), Some("second".into()));
        assert_eq!(history.recall_older(&session_id), Some("first".into()));
        assert_eq!(history.recall_older(&session_id), None);
    }

    #[test]
    fn blank_sends_are_not_recorded() {
        let mut history = ComposeHistory::default();
        let session_id = SessionId::new("s1");
        history.record_sent(&session_id, "   ".into());
        assert!(history.history_for(&session_id).is_empty());
    }

    #[test]
    fn exceeding_the_session_cap_evicts_the_lexically_smallest_id() {
        let mut history = ComposeHistory::default();
        for n in 0..=MAX_SESSIONS {
            history.record_sent(&SessionId::new(&format!("s{n:04}")), "hi".into());
        }
        assert!(history.history_for(&SessionId::new("s0000")).is_empty());
        assert_eq!(history.history_for(&SessionId::new(&format!("s{MAX_SESSIONS:04}"))), ["hi"]);
        assert_eq!(history.history.len(), MAX_SESSIONS);
    }
}
