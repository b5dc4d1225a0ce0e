//! Commands the reducer can request. A `Command` never runs on the reducer's
//! thread; the executor (`crate::executor`) takes ownership of each one,
//! drives it against a `Backend`, and posts the result back as a `Msg`.
//! Keeps the "in" events (`Msg`) and the "out" ops dispatched to a Backend
//! strictly separate, covering the full Backend surface.

use std::path::PathBuf;

use fleet_backend::ApprovalDecisionRequest;
use fleet_backend::CreateNoteRequest;
use fleet_backend::ListSessionsFilter;
use fleet_backend::MoveNoteRequest;
use fleet_backend::SendMessageRequest;
use fleet_backend::StartSessionRequest;
use fleet_protocol::AppState;
use fleet_protocol::NoteId;
use fleet_protocol::Provider;
use fleet_protocol::SessionId;
use fleet_protocol::WorkspaceGroupId;
use fleet_protocol::WorkspaceId;
use fleet_protocol::WorktreeId;

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Command {
    ListWorkspaces,
    CreateWorkspace { name: String, repo_path: PathBuf },
    RenameWorkspace { id: WorkspaceId, name: String },
    DeleteWorkspace { id: WorkspaceId },

    ListWorkspaceGroups,
    CreateWorkspaceGroup { name: String },
    RenameWorkspaceGroup { id: WorkspaceGroupId, name: String },
    DeleteWorkspaceGroup { id: WorkspaceGroupId },
    AssignWorkspacesToGroup { group_id: WorkspaceGroupId, workspace_ids: Vec<WorkspaceId> },

    ListWorktrees { workspace_id: WorkspaceId },
    ListAvailableWorktrees { workspace_id: WorkspaceId },
    CreateWorktree { workspace_id: WorkspaceId, name: String },
    AddExistingWorktree { workspace_id: WorkspaceId, path: PathBuf },
    RenameWorktree { id: WorktreeId, name: String },
    DeleteWorktree { id: WorktreeId },

    ListSessions { filter: ListSessionsFilter },
    StartSession { request: StartSessionRequest },
    RenameSession { id: SessionId, title: String },
    DismissSession { id: SessionId },
    DismissSessions { ids: Vec<SessionId> },
    KillSession { id: SessionId },
    InterruptSession { id: SessionId },
    SendMessage { request: SendMessageRequest },
    FetchHistory { id: SessionId, max_items: usize },
    FetchApprovals { id: SessionId },
    ResolveApproval { request: ApprovalDecisionRequest },

    OpenPlainStream { id: SessionId },
    OpenEventStream { id: SessionId },
    OpenItemsStream { id: SessionId },
    /// Cancel a previously opened stream; the executor looks up the
    /// `CancelHandle` it stashed when the stream was opened.
    CancelStream { id: SessionId },

    ListNotes { scopes: Vec<fleet_protocol::NoteScope> },
    CreateNote { request: CreateNoteRequest },
    UpdateNote { id: NoteId, text: String },
    MoveNote { request: MoveNoteRequest },
    DeleteNote { id: NoteId },

    ReadAppState,
    /// Persist `state` immediately; `save_token` is the `appStateSaveSeq`
    /// value in effect when the save was scheduled, so a stale completion
    /// can be ignored. Used directly by tests and anywhere a save shouldn't
    /// wait out the debounce window.
    SaveAppState { state: AppState, save_token: u64 },

    ProviderOptions { provider: Provider },

    /// Waits out `persistence::SAVE_DEBOUNCE` before persisting `state`, so a
    /// burst of mutating keypresses collapses into one Backend write. Carries
    /// its own snapshot rather than re-reading the Model at fire time, since
    /// the executor has no Model access; a later `DebouncedSave` bumps
    /// `save_token` so the reducer can tell which completion is current.
    DebouncedSave { state: AppState, save_token: u64 },

    /// Waits out `selection::SELECTION_LOAD_DEBOUNCE`, then posts
    /// `Msg::SessionLoadReady` carrying `select_seq` back to the reducer.
    /// The reducer drops the message if `select_seq` is no longer current,
    /// which is what lets rapid reselection skip loading rows the user only
    /// passed through.
    DebouncedSessionLoad { id: SessionId, select_seq: crate::selection::SelectSeq },
}

/// A batch of zero or more commands, as returned by every reducer step.
/// Kept as a `Vec` rather than a single `Option<Command>` because several
/// reducer transitions legitimately kick off more than one piece of async
/// work at once (e.g. starting a session also opens its stream).
pub type Commands = Vec<Command>;

pub fn none() -> Commands {
    Vec::new()
}

pub fn one(command: Command) -> Commands {
    vec![command]
}
