use async_trait::async_trait;
use fleet_protocol::AppState;
use fleet_protocol::ApprovalRequest;
use fleet_protocol::AvailableWorktree;
use fleet_protocol::Note;
use fleet_protocol::NoteId;
use fleet_protocol::NoteScope;
use fleet_protocol::Session;
use fleet_protocol::SessionId;
use fleet_protocol::SessionMeta;
use fleet_protocol::Workspace;
use fleet_protocol::WorkspaceGroup;
use fleet_protocol::WorkspaceGroupId;
use fleet_protocol::WorkspaceId;
use fleet_protocol::Worktree;
use fleet_protocol::WorktreeId;

use crate::error::BackendResult;
use crate::requests::ApprovalDecisionRequest;
use crate::requests::CreateNoteRequest;
use crate::requests::ListSessionsFilter;
use crate::requests::MoveNoteRequest;
use crate::requests::ProviderOption;
use crate::requests::SendMessageRequest;
use crate::requests::StartSessionRequest;
use crate::stream::CancelHandle;
use crate::stream::CodexReceiver;
use crate::stream::ItemsReceiver;
use crate::stream::PlainReceiver;

/// The abstract Backend collaborator surface (§6). Transport is
/// deliberately left unspecified; this trait is the seam the reducer's
/// Commands call through. See `fleet_backend::memory` for the shipped
/// in-process implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    // -- Workspaces --------------------------------------------------
    async fn list_workspaces(&self) -> BackendResult<Vec<Workspace>>;
    async fn create_workspace(&self, name: String, repo_path: std::path::PathBuf) -> BackendResult<Workspace>;
    async fn rename_workspace(&self, id: &WorkspaceId, name: String) -> BackendResult<()>;
    async fn delete_workspace(&self, id: &WorkspaceId) -> BackendResult<()>;

    async fn list_workspace_groups(&self) -> BackendResult<Vec<WorkspaceGroup>>;
    async fn create_workspace_group(&self, name: String) -> BackendResult<WorkspaceGroup>;
    async fn rename_workspace_group(&self, id: &WorkspaceGroupId, name: String) -> BackendResult<()>;
    async fn delete_workspace_group(&self, id: &WorkspaceGroupId) -> BackendResult<()>;
    async fn assign_workspaces_to_group(
        &self,
        group_id: &WorkspaceGroupId,
        workspace_ids: Vec<WorkspaceId>,
    ) -> BackendResult<()>;

    // -- Worktrees -----------------------------------------------------
    async fn list_worktrees(&self, workspace_id: &WorkspaceId) -> BackendResult<Vec<Worktree>>;
    async fn list_available_worktrees(&self, workspace_id: &WorkspaceId) -> BackendResult<Vec<AvailableWorktree>>;
    async fn create_worktree(&self, workspace_id: &WorkspaceId, name: String) -> BackendResult<Worktree>;
    async fn add_existing_worktree(
        &self,
        workspace_id: &WorkspaceId,
        path: std::path::PathBuf,
    ) -> BackendResult<Worktree>;
    async fn rename_worktree(&self, id: &WorktreeId, name: String) -> BackendResult<()>;
    async fn delete_worktree(&self, id: &WorktreeId) -> BackendResult<()>;

    // -- Sessions --------------------------------------------------------
    async fn list_sessions(&self, filter: ListSessionsFilter) -> BackendResult<Vec<(Session, SessionMeta)>>;
    async fn start_session(&self, request: StartSessionRequest) -> BackendResult<Session>;
    async fn rename_session(&self, id: &SessionId, title: String) -> BackendResult<()>;
    async fn dismiss_session(&self, id: &SessionId) -> BackendResult<()>;
    async fn dismiss_sessions(&self, ids: Vec<SessionId>) -> BackendResult<()>;
    async fn kill_session(&self, id: &SessionId) -> BackendResult<()>;
    async fn interrupt_session(&self, id: &SessionId) -> BackendResult<()>;
    async fn send_message(&self, request: SendMessageRequest) -> BackendResult<()>;
    async fn fetch_history(&self, id: &SessionId, max_items: usize) -> BackendResult<Vec<fleet_protocol::ChatBlock>>;
    async fn fetch_approvals(&self, id: &SessionId) -> BackendResult<Vec<ApprovalRequest>>;
    async fn resolve_approval(&self, request: ApprovalDecisionRequest) -> BackendResult<()>;

    // -- Streams ---------------------------------------------------------
    async fn open_plain(&self, id: &SessionId) -> BackendResult<(PlainReceiver, CancelHandle)>;
    async fn open_events(&self, id: &SessionId) -> BackendResult<(CodexReceiver, CancelHandle)>;
    async fn open_items(&self, id: &SessionId) -> BackendResult<(ItemsReceiver, CancelHandle)>;

    // -- Notes -------------------------------------------------------------
    async fn list_notes(&self, scopes: Vec<NoteScope>) -> BackendResult<Vec<Note>>;
    async fn create_note(&self, request: CreateNoteRequest) -> BackendResult<Note>;
    async fn update_note(&self, id: &NoteId, text: String) -> BackendResult<()>;
    async fn move_note(&self, request: MoveNoteRequest) -> BackendResult<()>;
    async fn delete_note(&self, id: &NoteId) -> BackendResult<()>;

    // -- App state -----------------------------------------------------
    async fn read_app_state(&self) -> BackendResult<AppState>;
    async fn update_app_state(&self, state: AppState) -> BackendResult<AppState>;

    // -- Provider options -------------------------------------------------
    async fn provider_options(&self, provider: &fleet_protocol::Provider) -> BackendResult<Vec<ProviderOption>>;
}
