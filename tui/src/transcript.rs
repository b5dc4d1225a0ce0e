//! Per-session transcript buffer: the ordered list of `ChatBlock`s plus the
//! bookkeeping needed to merge pending approvals into the stream at the
//! right position. A map keyed by `SessionId` rather than a single buffer,
//! since many sessions can be live at once.

use std::collections::HashMap;

use fleet_protocol::ChatBlock;
use fleet_protocol::ChatBlockRole;
use fleet_protocol::ChatBlockStatus;
use fleet_protocol::SessionId;

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub blocks: Vec<ChatBlock>,
    /// Bumped on every mutation; the render pipeline's cache key includes
    /// this so a stale cached render is never reused across an edit.
    pub content_version: u64,
}

impl Transcript {
    pub fn replace_history(&mut self, blocks: Vec<ChatBlock>) {
        self.blocks = blocks;
        self.content_version = self.content_version.wrapping_add(1);
    }

    pub fn push_delta_line(&mut self, role: ChatBlockRole, text: String) {
        let index = self.blocks.len();
        let id = ChatBlock::derive_stable_id(role, index, &text);
        self.blocks.push(ChatBlock {
            id,
            role,
            text,
            collapsed: None,
            status: ChatBlockStatus::None,
            timestamp: Some(chrono::Utc::now()),
            correlation_id: None,
        });
        self.content_version = self.content_version.wrapping_add(1);
    }

    /// Appends text to the last block if it shares `role` and has no
    /// `correlation_id`, otherwise starts a new block. This is how
    /// incremental deltas from the `codex` stream controller get coalesced
    /// into a single chat entry instead of one block per token.
    pub fn append_or_start(&mut self, role: ChatBlockRole, text: &str) {
        if let Some(last) = self.blocks.last_mut() {
            if last.role == role && last.correlation_id.is_none() {
                last.text.push_str(text);
                self.content_version = self.content_version.wrapping_add(1);
                return;
            }
        }
        self.push_delta_line(role, text.to_string());
    }

    /// Inserts or updates a block carrying `correlation_id`, used to splice
    /// an approval's resolved state into the transcript at the point the
    /// request originally appeared.
    pub fn upsert_correlated(&mut self, correlation_id: &str, role: ChatBlockRole, text: String) {
        if let Some(existing) = self.blocks.iter_mut().find(|b| b.correlation_id.as_deref() == Some(correlation_id)) {
            existing.text = text;
        } else {
            let index = self.blocks.len();
            let id = ChatBlock::derive_stable_id(role, index, &text);
            self.blocks.push(ChatBlock {
                id,
                role,
                text,
                collapsed: None,
                status: ChatBlockStatus::None,
                timestamp: Some(chrono::Utc::now()),
                correlation_id: Some(correlation_id.to_string()),
            });
        }
        self.content_version = self.content_version.wrapping_add(1);
    }

    pub fn mark_closed_with_error(&mut self, message: String) {
        self.push_delta_line(ChatBlockRole::SystemNotice, message);
    }

    /// Resolves every reasoning block's `collapsed` flag against `map`:
    /// an explicit user toggle wins, otherwise newly streamed reasoning
    /// auto-expands only while `request_in_flight`.
    pub fn apply_reasoning_collapse(&mut self, map: &crate::reasoning::ReasoningCollapseMap, request_in_flight: bool) {
        for block in self.blocks.iter_mut().filter(|b| b.is_reasoning()) {
            block.collapsed = Some(map.resolve(&block.id, request_in_flight));
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptStore {
    by_session: HashMap<SessionId, Transcript>,
}

impl TranscriptStore {
    pub fn get_or_create(&mut self, session_id: &SessionId) -> &mut Transcript {
        self.by_session.entry(session_id.clone()).or_default()
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&Transcript> {
        self.by_session.get(session_id)
    }

    pub fn remove(&mut self, session_id: &SessionId) {
        self.by_session.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesces_consecutive_same_role_deltas() {
        let mut transcript = Transcript::default();
        transcript.append_or_start(ChatBlockRole::Agent, "Hel");
        transcript.append_or_start(ChatBlockRole::Agent, "lo");
        assert_eq!(transcript.blocks.len(), 1);
        assert_eq!(transcript.blocks[0].text, "Hello");
    }

    #[test]
    fn role_change_starts_new_block() {
        let mut transcript = Transcript::default();
        transcript.append_or_start(ChatBlockRole::Reasoning, "thinking");
        transcript.append_or_start(ChatBlockRole::Agent, "answer");
        assert_eq!(transcript.blocks.len(), 2);
    }

    #[test]
    fn upsert_correlated_replaces_existing_block() {
        let mut transcript = Transcript::default();
        transcript.upsert_correlated("req-1", ChatBlockRole::Approval, "pending".into());
        transcript.upsert_correlated("req-1", ChatBlockRole::Approval, "accepted".into());
        assert_eq!(transcript.blocks.len(), 1);
        assert_eq!(transcript.blocks[0].text, "accepted");
    }
}
