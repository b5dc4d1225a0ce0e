//! An in-process, in-memory `Backend` implementation. Backend transport is
//! deliberately left unspecified at the §1 level (see DESIGN.md's resolution
//! of the corresponding Open Question); this is the demo/default
//! implementation the `tui` binary runs against when no external endpoint is
//! configured. It also stands in as the fake the `tui` crate's integration
//! tests drive the reducer against.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fleet_protocol::AppState;
use fleet_protocol::ApprovalRequest;
use fleet_protocol::AvailableWorktree;
use fleet_protocol::ChatBlock;
use fleet_protocol::ChatBlockRole;
use fleet_protocol::ChatBlockStatus;
use fleet_protocol::Note;
use fleet_protocol::NoteId;
use fleet_protocol::NoteScope;
use fleet_protocol::Session;
use fleet_protocol::SessionId;
use fleet_protocol::SessionMeta;
use fleet_protocol::SessionStatus;
use fleet_protocol::Workspace;
use fleet_protocol::WorkspaceGroup;
use fleet_protocol::WorkspaceGroupId;
use fleet_protocol::WorkspaceId;
use fleet_protocol::Worktree;
use fleet_protocol::WorktreeId;
use tokio::sync::Mutex;
use tokio::sync::mpsc;

use crate::error::BackendError;
use crate::error::BackendResult;
use crate::requests::ApprovalDecisionRequest;
use crate::requests::CreateNoteRequest;
use crate::requests::ListSessionsFilter;
use crate::requests::MoveNoteRequest;
use crate::requests::ProviderOption;
use crate::requests::SendMessageRequest;
use crate::requests::StartSessionRequest;
use crate::stream::CancelHandle;
use crate::stream::CodexEvent;
use crate::stream::CodexReceiver;
use crate::stream::ItemsDelta;
use crate::stream::ItemsReceiver;
use crate::stream::PlainDelta;
use crate::stream::PlainReceiver;
use crate::traits::Backend;

#[derive(Default)]
struct State {
    workspaces: Vec<Workspace>,
    groups: Vec<WorkspaceGroup>,
    worktrees: Vec<Worktree>,
    sessions: Vec<Session>,
    session_meta: HashMap<SessionId, SessionMeta>,
    approvals: HashMap<SessionId, Vec<ApprovalRequest>>,
    history: HashMap<SessionId, Vec<ChatBlock>>,
    notes: Vec<Note>,
    app_state: AppState,
}

pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(State::default())) }
    }

    /// Seed one workspace with one idle session, used for the CLI's default
    /// startup experience and for integration tests that want a non-empty
    /// sidebar without hand-rolling fixtures.
    pub async fn seeded() -> Self {
        let backend = Self::new();
        let workspace = backend
            .create_workspace("Alpha".to_string(), PathBuf::from("."))
            .await
            .unwrap_or_else(|_| unreachable_workspace());
        let mut guard = backend.state.lock().await;
        let session = Session {
            id: SessionId::new("s1"),
            provider: fleet_protocol::Provider::from("codex"),
            status: SessionStatus::Idle,
            title: "Hello".to_string(),
            workspace_id: Some(workspace.id.clone()),
            worktree_id: None,
        };
        guard.session_meta.insert(
            session.id.clone(),
            SessionMeta {
                session_id: session.id.clone(),
                workspace_id: session.workspace_id.clone(),
                worktree_id: None,
                last_active_at: Some(chrono::Utc::now()),
                last_turn_id: None,
            },
        );
        guard.sessions.push(session);
        drop(guard);
        backend
    }

    fn next_id(prefix: &str) -> String {
        format!("{prefix}-{}", uuid::Uuid::new_v4())
    }
}

fn unreachable_workspace() -> Workspace {
    Workspace {
        id: WorkspaceId::unassigned(),
        name: String::new(),
        repo_path: PathBuf::new(),
        group_ids: Vec::new(),
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_workspaces(&self) -> BackendResult<Vec<Workspace>> {
        Ok(self.state.lock().await.workspaces.clone())
    }

    async fn create_workspace(&self, name: String, repo_path: PathBuf) -> BackendResult<Workspace> {
        let workspace = Workspace { id: WorkspaceId::new(Self::next_id("ws")), name, repo_path, group_ids: Vec::new() };
        tracing::debug!(workspace_id = %workspace.id, "creating workspace");
        self.state.lock().await.workspaces.push(workspace.clone());
        Ok(workspace)
    }

    async fn rename_workspace(&self, id: &WorkspaceId, name: String) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let workspace = guard
            .workspaces
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        workspace.name = name;
        Ok(())
    }

    async fn delete_workspace(&self, id: &WorkspaceId) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let before = guard.workspaces.len();
        guard.workspaces.retain(|w| &w.id != id);
        if guard.workspaces.len() == before {
            return Err(BackendError::NotFound(id.to_string()));
        }
        tracing::debug!(workspace_id = %id, "deleted workspace");
        Ok(())
    }

    async fn list_workspace_groups(&self) -> BackendResult<Vec<WorkspaceGroup>> {
        Ok(self.state.lock().await.groups.clone())
    }

    async fn create_workspace_group(&self, name: String) -> BackendResult<WorkspaceGroup> {
        let group = WorkspaceGroup { id: WorkspaceGroupId::new(Self::next_id("grp")), name };
        self.state.lock().await.groups.push(group.clone());
        Ok(group)
    }

    async fn rename_workspace_group(&self, id: &WorkspaceGroupId, name: String) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let group = guard
            .groups
            .iter_mut()
            .find(|g| &g.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        group.name = name;
        Ok(())
    }

    async fn delete_workspace_group(&self, id: &WorkspaceGroupId) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        guard.groups.retain(|g| &g.id != id);
        for workspace in &mut guard.workspaces {
            workspace.group_ids.retain(|g| g != id);
        }
        Ok(())
    }

    async fn assign_workspaces_to_group(
        &self,
        group_id: &WorkspaceGroupId,
        workspace_ids: Vec<WorkspaceId>,
    ) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        for workspace in &mut guard.workspaces {
            if workspace_ids.contains(&workspace.id) && !workspace.group_ids.contains(group_id) {
                workspace.group_ids.push(group_id.clone());
            }
        }
        Ok(())
    }

    async fn list_worktrees(&self, workspace_id: &WorkspaceId) -> BackendResult<Vec<Worktree>> {
        Ok(self
            .state
            .lock()
            .await
            .worktrees
            .iter()
            .filter(|w| &w.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn list_available_worktrees(&self, _workspace_id: &WorkspaceId) -> BackendResult<Vec<AvailableWorktree>> {
        // Disk discovery is outside the core's scope; the in-memory backend
        // reports none.
        Ok(Vec::new())
    }

    async fn create_worktree(&self, workspace_id: &WorkspaceId, name: String) -> BackendResult<Worktree> {
        let worktree = Worktree {
            id: WorktreeId::new(Self::next_id("wt")),
            workspace_id: workspace_id.clone(),
            path: PathBuf::from(&name),
            name,
        };
        self.state.lock().await.worktrees.push(worktree.clone());
        Ok(worktree)
    }

    async fn add_existing_worktree(&self, workspace_id: &WorkspaceId, path: PathBuf) -> BackendResult<Worktree> {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        let worktree = Worktree { id: WorktreeId::new(Self::next_id("wt")), workspace_id: workspace_id.clone(), name, path };
        self.state.lock().await.worktrees.push(worktree.clone());
        Ok(worktree)
    }

    async fn rename_worktree(&self, id: &WorktreeId, name: String) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let worktree = guard
            .worktrees
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        worktree.name = name;
        Ok(())
    }

    async fn delete_worktree(&self, id: &WorktreeId) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        guard.worktrees.retain(|w| &w.id != id);
        Ok(())
    }

    async fn list_sessions(&self, filter: ListSessionsFilter) -> BackendResult<Vec<(Session, SessionMeta)>> {
        let guard = self.state.lock().await;
        let rows = guard
            .sessions
            .iter()
            .filter(|s| filter.include_dismissed || s.status != SessionStatus::Exited)
            .filter(|s| match &filter.workspace_id {
                Some(id) => s.workspace_id.as_ref() == Some(id),
                None => true,
            })
            .map(|s| {
                let meta = guard.session_meta.get(&s.id).cloned().unwrap_or(SessionMeta {
                    session_id: s.id.clone(),
                    workspace_id: s.workspace_id.clone(),
                    worktree_id: s.worktree_id.clone(),
                    last_active_at: None,
                    last_turn_id: None,
                });
                (s.clone(), meta)
            })
            .collect();
        Ok(rows)
    }

    async fn start_session(&self, request: StartSessionRequest) -> BackendResult<Session> {
        let session = Session {
            id: SessionId::new(Self::next_id("sess")),
            provider: request.provider,
            status: SessionStatus::Active,
            title: request.initial_message.clone().unwrap_or_else(|| "New session".to_string()),
            workspace_id: Some(request.workspace_id.clone()),
            worktree_id: request.worktree_id.clone(),
        };
        let mut guard = self.state.lock().await;
        guard.session_meta.insert(
            session.id.clone(),
            SessionMeta {
                session_id: session.id.clone(),
                workspace_id: session.workspace_id.clone(),
                worktree_id: session.worktree_id.clone(),
                last_active_at: Some(chrono::Utc::now()),
                last_turn_id: None,
            },
        );
        guard.sessions.push(session.clone());
        tracing::info!(session_id = %session.id, provider = %session.provider, "started session");
        Ok(session)
    }

    async fn rename_session(&self, id: &SessionId, title: String) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let session = guard
            .sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        session.title = title;
        Ok(())
    }

    async fn dismiss_session(&self, id: &SessionId) -> BackendResult<()> {
        self.dismiss_sessions(vec![id.clone()]).await
    }

    async fn dismiss_sessions(&self, ids: Vec<SessionId>) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        for session in &mut guard.sessions {
            if ids.contains(&session.id) {
                session.status = SessionStatus::Exited;
            }
        }
        Ok(())
    }

    async fn kill_session(&self, id: &SessionId) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let session = guard
            .sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        session.status = SessionStatus::Exited;
        tracing::info!(session_id = %id, "killed session");
        Ok(())
    }

    async fn interrupt_session(&self, id: &SessionId) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let session = guard
            .sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        session.status = SessionStatus::Idle;
        Ok(())
    }

    async fn send_message(&self, request: SendMessageRequest) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let entry = guard.history.entry(request.session_id.clone()).or_default();
        let index = entry.len();
        entry.push(ChatBlock {
            id: ChatBlock::derive_stable_id(ChatBlockRole::User, index, &request.text),
            role: ChatBlockRole::User,
            text: request.text,
            collapsed: None,
            status: ChatBlockStatus::None,
            timestamp: Some(chrono::Utc::now()),
            correlation_id: None,
        });
        Ok(())
    }

    async fn fetch_history(&self, id: &SessionId, max_items: usize) -> BackendResult<Vec<ChatBlock>> {
        let guard = self.state.lock().await;
        let blocks = guard.history.get(id).cloned().unwrap_or_default();
        let start = blocks.len().saturating_sub(max_items);
        Ok(blocks[start..].to_vec())
    }

    async fn fetch_approvals(&self, id: &SessionId) -> BackendResult<Vec<ApprovalRequest>> {
        Ok(self.state.lock().await.approvals.get(id).cloned().unwrap_or_default())
    }

    async fn resolve_approval(&self, request: ApprovalDecisionRequest) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        if let Some(pending) = guard.approvals.get_mut(&request.session_id) {
            pending.retain(|a| a.request_id != request.request_id);
        }
        Ok(())
    }

    async fn open_plain(&self, id: &SessionId) -> BackendResult<(PlainReceiver, CancelHandle)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelHandle::new();
        let token = cancel.child_token();
        let session = id.clone();
        tokio::spawn(async move {
            for line in ["agent: thinking...", "agent: done."] {
                if token.is_cancelled() {
                    return;
                }
                let _ = tx.send(PlainDelta::Line(format!("[{session}] {line}")));
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            let _ = tx.send(PlainDelta::Closed);
        });
        Ok((rx, cancel))
    }

    async fn open_events(&self, _id: &SessionId) -> BackendResult<(CodexReceiver, CancelHandle)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelHandle::new();
        let token = cancel.child_token();
        tokio::spawn(async move {
            let _ = tx.send(CodexEvent::TurnStarted);
            for chunk in ["Looking at the ", "repository...", " Done."] {
                if token.is_cancelled() {
                    return;
                }
                let _ = tx.send(CodexEvent::AgentTextDelta(chunk.to_string()));
                tokio::time::sleep(Duration::from_millis(30)).await;
            }
            let _ = tx.send(CodexEvent::TurnCompleted);
        });
        Ok((rx, cancel))
    }

    async fn open_items(&self, id: &SessionId) -> BackendResult<(ItemsReceiver, CancelHandle)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelHandle::new();
        let token = cancel.child_token();
        let guard = self.state.lock().await;
        let initial = guard.history.get(id).cloned().unwrap_or_default();
        drop(guard);
        tokio::spawn(async move {
            if token.is_cancelled() {
                return;
            }
            let _ = tx.send(ItemsDelta::Snapshot(initial));
        });
        Ok((rx, cancel))
    }

    async fn list_notes(&self, scopes: Vec<NoteScope>) -> BackendResult<Vec<Note>> {
        let guard = self.state.lock().await;
        Ok(guard.notes.iter().filter(|n| scopes.contains(&n.scope)).cloned().collect())
    }

    async fn create_note(&self, request: CreateNoteRequest) -> BackendResult<Note> {
        let now = chrono::Utc::now();
        let note = Note { id: NoteId::new(Self::next_id("note")), scope: request.scope, text: request.text, created_at: now, updated_at: now };
        self.state.lock().await.notes.push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: &NoteId, text: String) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let note = guard.notes.iter_mut().find(|n| &n.id == id).ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        note.text = text;
        note.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn move_note(&self, request: MoveNoteRequest) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        let note = guard
            .notes
            .iter_mut()
            .find(|n| n.id == request.note_id)
            .ok_or_else(|| BackendError::NotFound(request.note_id.to_string()))?;
        note.scope = request.new_scope;
        note.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn delete_note(&self, id: &NoteId) -> BackendResult<()> {
        let mut guard = self.state.lock().await;
        guard.notes.retain(|n| &n.id != id);
        Ok(())
    }

    async fn read_app_state(&self) -> BackendResult<AppState> {
        Ok(self.state.lock().await.app_state.clone())
    }

    async fn update_app_state(&self, state: AppState) -> BackendResult<AppState> {
        let mut guard = self.state.lock().await;
        guard.app_state = state.clone();
        Ok(state)
    }

    async fn provider_options(&self, provider: &fleet_protocol::Provider) -> BackendResult<Vec<ProviderOption>> {
        Ok(vec![ProviderOption {
            id: format!("{provider}-default"),
            label: "Default".to_string(),
            description: None,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_list_workspace_round_trips() {
        let backend = MemoryBackend::new();
        let created = backend.create_workspace("Alpha".to_string(), PathBuf::from("/tmp/alpha")).await.unwrap();
        let listed = backend.list_workspaces().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn dismissed_sessions_are_excluded_by_default() {
        let backend = MemoryBackend::seeded().await;
        let ids: Vec<SessionId> = backend
            .list_sessions(ListSessionsFilter { workspace_id: None, include_dismissed: false })
            .await
            .unwrap()
            .into_iter()
            .map(|(s, _)| s.id)
            .collect();
        assert_eq!(ids, vec![SessionId::new("s1")]);
        backend.dismiss_session(&SessionId::new("s1")).await.unwrap();
        let remaining = backend
            .list_sessions(ListSessionsFilter { workspace_id: None, include_dismissed: false })
            .await
            .unwrap();
        assert!(remaining.is_empty());
        let with_dismissed = backend
            .list_sessions(ListSessionsFilter { workspace_id: None, include_dismissed: true })
            .await
            .unwrap();
        assert_eq!(with_dismissed.len(), 1);
    }

    #[tokio::test]
    async fn resolving_an_approval_removes_it_from_pending() {
        let backend = MemoryBackend::new();
        let session_id = SessionId::new("s1");
        let request_id = fleet_protocol::RequestId::new("r1");
        backend.state.lock().await.approvals.insert(
            session_id.clone(),
            vec![ApprovalRequest {
                request_id: request_id.clone(),
                session_id: session_id.clone(),
                summary: "apply patch".to_string(),
                detail: String::new(),
                needs_response_text: false,
                created_at: chrono::Utc::now(),
            }],
        );
        backend
            .resolve_approval(ApprovalDecisionRequest {
                session_id: session_id.clone(),
                request_id,
                decision: fleet_protocol::ApprovalDecision::Accept,
                response_text: None,
            })
            .await
            .unwrap();
        assert!(backend.fetch_approvals(&session_id).await.unwrap().is_empty());
    }
}
