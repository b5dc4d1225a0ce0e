//! The single `Model` the reducer owns. Every other module in this crate
//! describes a slice of it; this file is where they're assembled, plus the
//! handful of fields (mode, input buffers) that don't warrant their own
//! module. Kept as one struct rather than split per widget, because there
//! is no separate "widget per session" here — the sidebar addresses many
//! sessions through one Model.

use std::collections::HashMap;

use fleet_protocol::AppState;
use fleet_protocol::Note;
use fleet_protocol::Provider;
use fleet_protocol::Session;
use fleet_protocol::SessionId;
use fleet_protocol::SessionMeta;
use fleet_protocol::TimestampMode;
use fleet_protocol::Workspace;
use fleet_protocol::WorkspaceGroup;
use fleet_protocol::WorkspaceGroupId;
use fleet_protocol::WorkspaceId;
use fleet_protocol::Worktree;
use fleet_protocol::WorktreeId;

use crate::approvals::ApprovalRegistry;
use crate::compose_history::ComposeHistory;
use crate::confirm::PendingConfirm;
use crate::context_menu::ContextMenu;
use crate::latency::ActivityTracker;
use crate::mode::Mode;
use crate::mouse::LayoutSnapshot;
use crate::notes::NoteStore;
use crate::persistence::SaveDebouncer;
use crate::reasoning::ReasoningCollapseMap;
use crate::recents::Recents;
use crate::refresh::RefreshScheduler;
use crate::render::RenderPipeline;
use crate::render::RenderScheduler;
use crate::selection::Selection;
use crate::sidebar::InvalidationReason;
use crate::sidebar::SidebarProjection;
use crate::toast::ToastQueue;
use crate::transcript::TranscriptStore;

/// What a `Rename*` mode's `rename_input` will be committed against once the
/// user presses Enter. Set when the mode is entered, cleared on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameTarget {
    Workspace(WorkspaceId),
    Worktree(WorktreeId),
    Session(SessionId),
    WorkspaceGroup(WorkspaceGroupId),
}

#[derive(Default)]
pub struct Model {
    pub mode: Mode,
    pub quit_requested: bool,

    // -- Domain snapshots, as last seen from the Backend -----------------
    pub workspaces: Vec<Workspace>,
    pub workspace_groups: Vec<WorkspaceGroup>,
    pub worktrees: Vec<Worktree>,
    pub sessions: Vec<Session>,
    pub session_meta: HashMap<SessionId, SessionMeta>,
    pub notes: NoteStore,

    // -- Derived / UI-local state -----------------------------------------
    pub sidebar: SidebarProjection,
    pub selection: Selection,
    pub transcripts: TranscriptStore,
    pub approvals: ApprovalRegistry,
    pub compose_history: ComposeHistory,
    pub recents: Recents,
    pub activity: ActivityTracker,
    pub toasts: ToastQueue,
    pub render_pipeline: RenderPipeline,
    pub render_scheduler: RenderScheduler,
    pub refresh_scheduler: RefreshScheduler,
    pub save_debouncer: SaveDebouncer,
    pub layout: LayoutSnapshot,
    pub pending_confirm: Option<PendingConfirm>,
    pub context_menu: Option<ContextMenu>,
    pub compose_input: String,
    pub search_query: String,
    pub rename_input: String,
    pub note_input: String,
    pub available_worktrees: Vec<fleet_protocol::AvailableWorktree>,
    pub provider_catalog: Vec<Provider>,
    pub picked_provider: Option<Provider>,
    pub assign_group_target: Option<WorkspaceGroupId>,
    pub assign_group_selected: Vec<WorkspaceId>,
    pub note_move_target: Option<fleet_protocol::NoteId>,
    pub pending_rename: Option<RenameTarget>,
    pub pending_start_session: Option<(WorkspaceId, Option<WorktreeId>)>,
    /// Cursor into whatever list the current picker mode is showing
    /// (providers, groups, workspaces). Reset to `0` whenever a picker mode
    /// is entered.
    pub picker_index: usize,
    pub approval_response_input: String,
    pub pending_approval_response: Option<(SessionId, fleet_protocol::RequestId)>,
    pub note_move_workspace: Option<WorkspaceId>,
    pub note_move_worktree: Option<WorktreeId>,

    /// The session the currently in-flight history/approvals/stream fetch
    /// was issued for. History, approvals, and stream-open results that
    /// arrive for any other session are stale and dropped.
    pub pending_session_key: Option<SessionId>,
    pub reasoning_collapse: ReasoningCollapseMap,
    /// Note scopes with a `ListNotes` fetch already in flight, so entering
    /// Notes mode repeatedly doesn't re-issue it.
    pub notes_pending_scopes: std::collections::HashSet<String>,

    // -- Persisted app state mirror ----------------------------------------
    pub app_state: AppState,

    pub loading: bool,
    pub last_error: Option<String>,
}

impl Model {
    pub fn new() -> Self {
        let mut model = Self::default();
        model.app_state.ui_timestamp_mode = TimestampMode::Relative;
        model.app_state.sidebar_show_recents = true;
        model.sidebar.invalidate(InvalidationReason::Workspace);
        model.provider_catalog = crate::capabilities::known_providers();
        model
    }

    pub fn active_group_ids(&self) -> Vec<String> {
        if self.app_state.active_group_ids.is_empty() {
            vec![fleet_protocol::ids::UNGROUPED_GROUP.to_string()]
        } else {
            self.app_state.active_group_ids.iter().map(|g| g.as_str().to_string()).collect()
        }
    }

    pub fn active_session(&self) -> Option<&Session> {
        let id = self.selection.active_session_id.as_ref()?;
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn invalidate_sidebar(&mut self, reason: InvalidationReason) {
        self.sidebar.invalidate(reason);
    }

    pub fn notes_for_active_scope(&self) -> Vec<&Note> {
        self.notes.for_scope(&self.current_note_scope())
    }

    /// The note scope the Notes panel and the "add note" flow both resolve
    /// against: the active session if one is selected, else the active
    /// workspace, else global.
    pub fn current_note_scope(&self) -> fleet_protocol::NoteScope {
        match self.selection.active_session_id.clone() {
            Some(id) => fleet_protocol::NoteScope::Session(id),
            None => match &self.app_state.active_workspace_id {
                Some(id) => fleet_protocol::NoteScope::Workspace(id.clone()),
                None => fleet_protocol::NoteScope::Global,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_model_defaults_to_ungrouped_active_group() {
        let model = Model::new();
        assert_eq!(model.active_group_ids(), vec![fleet_protocol::ids::UNGROUPED_GROUP.to_string()]);
    }

    #[test]
    fn new_model_starts_in_normal_mode_unquit() {
        let model = Model::new();
        assert_eq!(model.mode, Mode::Normal);
        assert!(!model.quit_requested);
    }
}
