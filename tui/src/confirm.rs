//! Confirmation prompts for destructive actions (dismiss/kill/delete). A
//! thin pending-action holder rather than a full mode, since it overlays
//! whatever mode was active rather than replacing it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    DismissSession(fleet_protocol::SessionId),
    KillSession(fleet_protocol::SessionId),
    DeleteWorkspace(fleet_protocol::WorkspaceId),
    DeleteWorktree(fleet_protocol::WorktreeId),
    DeleteWorkspaceGroup(fleet_protocol::WorkspaceGroupId),
    DeleteNote(fleet_protocol::NoteId),
}

impl PendingConfirm {
    pub fn prompt_text(&self) -> String {
        match self {
            PendingConfirm::DismissSession(id) => format!("Dismiss session {id}? (y/n)"),
            PendingConfirm::KillSession(id) => format!("Kill session {id}? This cannot be undone. (y/n)"),
            PendingConfirm::DeleteWorkspace(id) => format!("Delete workspace {id}? (y/n)"),
            PendingConfirm::DeleteWorktree(id) => format!("Delete worktree {id}? (y/n)"),
            PendingConfirm::DeleteWorkspaceGroup(id) => format!("Delete group {id}? (y/n)"),
            PendingConfirm::DeleteNote(id) => format!("Delete note {id}? (y/n)"),
        }
    }
}
