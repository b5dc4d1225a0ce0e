//! The reducer's input alphabet. Every event that can change the Model
//! arrives as a `Msg` over the same channel, whether it originates from the
//! terminal, a background stream worker, or a completed `Command`. Includes
//! a `Redacted` wrapper for payloads we don't want `Debug`-dumped into logs
//! verbatim.

use std::fmt;
use std::path::PathBuf;

use fleet_backend::BackendError;
use fleet_backend::CancelHandle;
use fleet_backend::CodexEvent;
use fleet_backend::ItemsDelta;
use fleet_backend::PlainDelta;
use fleet_backend::ProviderOption;
use fleet_protocol::AppState;
use fleet_protocol::ApprovalRequest;
use fleet_protocol::AvailableWorktree;
use fleet_protocol::ChatBlock;
use fleet_protocol::Note;
use fleet_protocol::NoteId;
use fleet_protocol::Session;
use fleet_protocol::SessionId;
use fleet_protocol::SessionMeta;
use fleet_protocol::Workspace;
use fleet_protocol::WorkspaceGroup;
use fleet_protocol::WorkspaceGroupId;
use fleet_protocol::WorkspaceId;
use fleet_protocol::Worktree;
use fleet_protocol::WorktreeId;

/// Wraps a value whose `Debug` impl is suppressed, so a clipboard/paste
/// payload never lands in a log line.
#[derive(Clone)]
pub struct Redacted<T>(pub T);

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

pub type CmdResult<T> = Result<T, BackendError>;

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Msg {
    // -- Terminal input -------------------------------------------------
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Paste(Redacted<String>),
    Resize { width: u16, height: u16 },
    Tick,
    ExitRequested,

    // -- Stream deltas ----------------------------------------------------
    PlainDelta { session_id: SessionId, delta: PlainDelta },
    CodexEvent { session_id: SessionId, event: CodexEvent },
    ItemsDelta { session_id: SessionId, delta: ItemsDelta },
    StreamOpened { session_id: SessionId, cancel: CancelHandle },
    /// The debounce for a session selection elapsed; `select_seq` is checked
    /// against `Selection::select_seq` before this actually begins loading.
    SessionLoadReady { session_id: SessionId, select_seq: crate::selection::SelectSeq },

    // -- Command completions ----------------------------------------------
    WorkspacesLoaded(CmdResult<Vec<Workspace>>),
    WorkspaceCreated(CmdResult<Workspace>),
    WorkspaceRenamed { id: WorkspaceId, result: CmdResult<()> },
    WorkspaceDeleted { id: WorkspaceId, result: CmdResult<()> },

    WorkspaceGroupsLoaded(CmdResult<Vec<WorkspaceGroup>>),
    WorkspaceGroupCreated(CmdResult<WorkspaceGroup>),
    WorkspaceGroupRenamed { id: WorkspaceGroupId, result: CmdResult<()> },
    WorkspaceGroupDeleted { id: WorkspaceGroupId, result: CmdResult<()> },
    WorkspacesAssignedToGroup { group_id: WorkspaceGroupId, result: CmdResult<()> },

    WorktreesLoaded { workspace_id: WorkspaceId, result: CmdResult<Vec<Worktree>> },
    AvailableWorktreesLoaded { workspace_id: WorkspaceId, result: CmdResult<Vec<AvailableWorktree>> },
    WorktreeCreated(CmdResult<Worktree>),
    ExistingWorktreeAdded(CmdResult<Worktree>),
    WorktreeRenamed { id: WorktreeId, result: CmdResult<()> },
    WorktreeDeleted { id: WorktreeId, result: CmdResult<()> },

    SessionsLoaded(CmdResult<Vec<(Session, SessionMeta)>>),
    SessionStarted(CmdResult<Session>),
    SessionRenamed { id: SessionId, result: CmdResult<()> },
    SessionDismissed { id: SessionId, result: CmdResult<()> },
    SessionsDismissed { ids: Vec<SessionId>, result: CmdResult<()> },
    SessionKilled { id: SessionId, result: CmdResult<()> },
    SessionInterrupted { id: SessionId, result: CmdResult<()> },
    MessageSent { session_id: SessionId, send_token: u64, result: CmdResult<()> },
    HistoryFetched { session_id: SessionId, result: CmdResult<Vec<ChatBlock>> },
    ApprovalsFetched { session_id: SessionId, result: CmdResult<Vec<ApprovalRequest>> },
    ApprovalResolved { session_id: SessionId, request_id: fleet_protocol::RequestId, result: CmdResult<()> },

    NotesLoaded(CmdResult<Vec<Note>>),
    NoteCreated(CmdResult<Note>),
    NoteUpdated { id: NoteId, result: CmdResult<()> },
    NoteMoved { id: NoteId, result: CmdResult<()> },
    NoteDeleted { id: NoteId, result: CmdResult<()> },

    AppStateLoaded(CmdResult<AppState>),
    AppStateSaved { save_token: u64, result: CmdResult<AppState> },

    ProviderOptionsLoaded { provider: fleet_protocol::Provider, result: CmdResult<Vec<ProviderOption>> },

    // -- UI-local, never touch a Backend -----------------------------------
    ToastExpired { toast_id: u64 },
    RecentsRefreshTick,
    FilePickerResolved { target_field: String, path: PathBuf },
}
