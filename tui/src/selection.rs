//! Selection and focus tracking. Deliberately separate from `sidebar.rs`: the
//! projection describes *what rows exist*, this describes *which one has the
//! cursor* and which session is the active transcript. Kept as a small struct
//! of ids (not row indices) so a sidebar rebuild never invalidates it.

use std::time::Duration;

use fleet_protocol::SessionId;
use fleet_protocol::WorkspaceId;
use fleet_protocol::WorktreeId;

use crate::sidebar::RowKey;

/// How long a session selection must hold still before its history,
/// approvals, and streams are actually loaded. Lets a user arrow past rows
/// quickly without firing a fetch for every row they pass through.
pub const SELECTION_LOAD_DEBOUNCE: Duration = Duration::from_millis(120);

/// Monotonic counter bumped every time the selected session changes, used to
/// tag in-flight history/stream-open commands so a late completion for a
/// session the user has since navigated away from can be dropped (`selectSeq`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectSeq(pub u64);

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub cursor: Option<RowKey>,
    pub active_session_id: Option<SessionId>,
    pub select_seq: SelectSeq,
}

impl Selection {
    pub fn select_session(&mut self, id: SessionId) -> SelectSeq {
        self.active_session_id = Some(id.clone());
        self.cursor = Some(RowKey::Session(id));
        self.select_seq.0 = self.select_seq.0.wrapping_add(1);
        self.select_seq
    }

    pub fn clear_active_session(&mut self) {
        self.active_session_id = None;
    }

    pub fn is_current(&self, seq: SelectSeq) -> bool {
        self.select_seq == seq
    }

    pub fn move_cursor(&mut self, rows: &[crate::sidebar::SidebarRow], delta: isize) {
        if rows.is_empty() {
            self.cursor = None;
            return;
        }
        let current_index = self
            .cursor
            .as_ref()
            .and_then(|key| rows.iter().position(|r| &r.key() == key))
            .unwrap_or(0);
        let len = rows.len() as isize;
        let next = ((current_index as isize + delta).rem_euclid(len)) as usize;
        self.cursor = Some(rows[next].key());
    }

    pub fn set_cursor_to_workspace(&mut self, id: WorkspaceId) {
        self.cursor = Some(RowKey::Workspace(id));
    }

    pub fn set_cursor_to_worktree(&mut self, id: WorktreeId) {
        self.cursor = Some(RowKey::Worktree(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::SidebarRow;
    use fleet_protocol::session::SessionStatus;

    fn rows() -> Vec<SidebarRow> {
        vec![
            SidebarRow::Session {
                id: SessionId::new("a"),
                workspace_id: None,
                worktree_id: None,
                title: "a".into(),
                status: SessionStatus::Idle,
            },
            SidebarRow::Session {
                id: SessionId::new("b"),
                workspace_id: None,
                worktree_id: None,
                title: "b".into(),
                status: SessionStatus::Idle,
            },
        ]
    }

    #[test]
    fn move_cursor_wraps_around() {
        let mut selection = Selection::default();
        let rows = rows();
        selection.cursor = Some(rows[1].key());
        selection.move_cursor(&rows, 1);
        assert_eq!(selection.cursor, Some(rows[0].key()));
    }

    #[test]
    fn select_session_bumps_seq_and_is_current() {
        let mut selection = Selection::default();
        let seq = selection.select_session(SessionId::new("a"));
        assert!(selection.is_current(seq));
        let seq2 = selection.select_session(SessionId::new("b"));
        assert!(!selection.is_current(seq));
        assert!(selection.is_current(seq2));
    }
}
