use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::ids::NoteId;
use crate::ids::SessionId;
use crate::ids::WorkspaceId;
use crate::ids::WorktreeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum NoteScope {
    Global,
    Workspace(WorkspaceId),
    Worktree(WorktreeId),
    Session(SessionId),
}

impl NoteScope {
    /// The flat key used to index `AppState::note_drafts` and the notes
    /// panel's pending-fetch tracker.
    pub fn key(&self) -> String {
        match self {
            NoteScope::Global => "global".to_string(),
            NoteScope::Workspace(id) => format!("workspace:{id}"),
            NoteScope::Worktree(id) => format!("worktree:{id}"),
            NoteScope::Session(id) => format!("session:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub scope: NoteScope,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
