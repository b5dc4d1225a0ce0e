use fleet_protocol::ApprovalDecision;
use fleet_protocol::NoteScope;
use fleet_protocol::Provider;
use fleet_protocol::SessionId;
use fleet_protocol::WorkspaceGroupId;
use fleet_protocol::WorkspaceId;
use fleet_protocol::WorktreeId;

#[derive(Debug, Clone)]
pub struct StartSessionRequest {
    pub workspace_id: WorkspaceId,
    pub worktree_id: Option<WorktreeId>,
    pub provider: Provider,
    pub initial_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListSessionsFilter {
    pub workspace_id: Option<WorkspaceId>,
    pub include_dismissed: bool,
}

#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub session_id: SessionId,
    pub text: String,
    /// Monotonic per-session token (`sendSeq`); lets the Backend and the
    /// reducer agree on idempotence for retried sends.
    pub send_token: u64,
}

#[derive(Debug, Clone)]
pub struct ApprovalDecisionRequest {
    pub session_id: SessionId,
    pub request_id: fleet_protocol::RequestId,
    pub decision: ApprovalDecision,
    pub response_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub scope: NoteScope,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct MoveNoteRequest {
    pub note_id: fleet_protocol::NoteId,
    pub new_scope: NoteScope,
}

/// A single selectable option in a provider's compose-overlay catalog (e.g.
/// model name, reasoning effort) — opaque to the reducer beyond label/value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOption {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceGroupAssignment {
    pub group_id: WorkspaceGroupId,
    pub workspace_ids: Vec<WorkspaceId>,
}
