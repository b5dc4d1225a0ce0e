//! Drives `Command`s against a `Backend` on the tokio runtime and posts
//! their results back as `Msg`s. Each dispatched `Command` runs as its own
//! spawned task, covering the full Backend surface, and replies are wired
//! through `AppEventSender` for priority routing.

use std::sync::Arc;

use fleet_backend::Backend;
use fleet_protocol::SessionId;
use tokio::sync::mpsc::UnboundedSender;

use crate::app_event_sender::AppEventSender;
use crate::capabilities::StreamKind;
use crate::capabilities::stream_kind_for;
use crate::cmd::Command;
use crate::msg::Msg;
use crate::streams::CodexController;
use crate::streams::ItemsController;
use crate::streams::PlainController;
use crate::streams::StreamHandle;

#[derive(Clone)]
pub struct Executor {
    backend: Arc<dyn Backend>,
    msg_tx: AppEventSender,
    stream_ready_tx: UnboundedSender<(SessionId, StreamHandle)>,
}

impl Executor {
    pub fn new(backend: Arc<dyn Backend>, msg_tx: AppEventSender, stream_ready_tx: UnboundedSender<(SessionId, StreamHandle)>) -> Self {
        Self { backend, msg_tx, stream_ready_tx }
    }

    pub fn dispatch(&self, command: Command) {
        let backend = Arc::clone(&self.backend);
        let msg_tx = self.msg_tx.clone();
        let stream_ready_tx = self.stream_ready_tx.clone();

        tokio::spawn(async move {
            match command {
                Command::ListWorkspaces => {
                    msg_tx.send(Msg::WorkspacesLoaded(backend.list_workspaces().await));
                }
                Command::CreateWorkspace { name, repo_path } => {
                    msg_tx.send(Msg::WorkspaceCreated(backend.create_workspace(name, repo_path).await));
                }
                Command::RenameWorkspace { id, name } => {
                    let result = backend.rename_workspace(&id, name).await;
                    msg_tx.send(Msg::WorkspaceRenamed { id, result });
                }
                Command::DeleteWorkspace { id } => {
                    let result = backend.delete_workspace(&id).await;
                    msg_tx.send(Msg::WorkspaceDeleted { id, result });
                }

                Command::ListWorkspaceGroups => {
                    msg_tx.send(Msg::WorkspaceGroupsLoaded(backend.list_workspace_groups().await));
                }
                Command::CreateWorkspaceGroup { name } => {
                    msg_tx.send(Msg::WorkspaceGroupCreated(backend.create_workspace_group(name).await));
                }
                Command::RenameWorkspaceGroup { id, name } => {
                    let result = backend.rename_workspace_group(&id, name).await;
                    msg_tx.send(Msg::WorkspaceGroupRenamed { id, result });
                }
                Command::DeleteWorkspaceGroup { id } => {
                    let result = backend.delete_workspace_group(&id).await;
                    msg_tx.send(Msg::WorkspaceGroupDeleted { id, result });
                }
                Command::AssignWorkspacesToGroup { group_id, workspace_ids } => {
                    let result = backend.assign_workspaces_to_group(&group_id, workspace_ids).await;
                    msg_tx.send(Msg::WorkspacesAssignedToGroup { group_id, result });
                }

                Command::ListWorktrees { workspace_id } => {
                    let result = backend.list_worktrees(&workspace_id).await;
                    msg_tx.send(Msg::WorktreesLoaded { workspace_id, result });
                }
                Command::ListAvailableWorktrees { workspace_id } => {
                    let result = backend.list_available_worktrees(&workspace_id).await;
                    msg_tx.send(Msg::AvailableWorktreesLoaded { workspace_id, result });
                }
                Command::CreateWorktree { workspace_id, name } => {
                    msg_tx.send(Msg::WorktreeCreated(backend.create_worktree(&workspace_id, name).await));
                }
                Command::AddExistingWorktree { workspace_id, path } => {
                    msg_tx.send(Msg::ExistingWorktreeAdded(backend.add_existing_worktree(&workspace_id, path).await));
                }
                Command::RenameWorktree { id, name } => {
                    let result = backend.rename_worktree(&id, name).await;
                    msg_tx.send(Msg::WorktreeRenamed { id, result });
                }
                Command::DeleteWorktree { id } => {
                    let result = backend.delete_worktree(&id).await;
                    msg_tx.send(Msg::WorktreeDeleted { id, result });
                }

                Command::ListSessions { filter } => {
                    msg_tx.send(Msg::SessionsLoaded(backend.list_sessions(filter).await));
                }
                Command::StartSession { request } => {
                    msg_tx.send(Msg::SessionStarted(backend.start_session(request).await));
                }
                Command::RenameSession { id, title } => {
                    let result = backend.rename_session(&id, title).await;
                    msg_tx.send(Msg::SessionRenamed { id, result });
                }
                Command::DismissSession { id } => {
                    let result = backend.dismiss_session(&id).await;
                    msg_tx.send(Msg::SessionDismissed { id, result });
                }
                Command::DismissSessions { ids } => {
                    let result = backend.dismiss_sessions(ids.clone()).await;
                    msg_tx.send(Msg::SessionsDismissed { ids, result });
                }
                Command::KillSession { id } => {
                    let result = backend.kill_session(&id).await;
                    msg_tx.send(Msg::SessionKilled { id, result });
                }
                Command::InterruptSession { id } => {
                    let result = backend.interrupt_session(&id).await;
                    msg_tx.send(Msg::SessionInterrupted { id, result });
                }
                Command::SendMessage { request } => {
                    let session_id = request.session_id.clone();
                    let send_token = request.send_token;
                    let result = backend.send_message(request).await;
                    msg_tx.send(Msg::MessageSent { session_id, send_token, result });
                }
                Command::FetchHistory { id, max_items } => {
                    let result = backend.fetch_history(&id, max_items).await;
                    msg_tx.send(Msg::HistoryFetched { session_id: id, result });
                }
                Command::FetchApprovals { id } => {
                    let result = backend.fetch_approvals(&id).await;
                    msg_tx.send(Msg::ApprovalsFetched { session_id: id, result });
                }
                Command::ResolveApproval { request } => {
                    let session_id = request.session_id.clone();
                    let request_id = request.request_id.clone();
                    let result = backend.resolve_approval(request).await;
                    msg_tx.send(Msg::ApprovalResolved { session_id, request_id, result });
                }

                Command::OpenPlainStream { id } => {
                    if let Ok((receiver, cancel)) = backend.open_plain(&id).await {
                        msg_tx.send(Msg::StreamOpened { session_id: id.clone(), cancel: cancel.clone() });
                        let _ = stream_ready_tx.send((id, StreamHandle::Plain(PlainController::new(receiver), cancel)));
                    }
                }
                Command::OpenEventStream { id } => {
                    if let Ok((receiver, cancel)) = backend.open_events(&id).await {
                        msg_tx.send(Msg::StreamOpened { session_id: id.clone(), cancel: cancel.clone() });
                        let _ = stream_ready_tx.send((id, StreamHandle::Codex(CodexController::new(receiver), cancel)));
                    }
                }
                Command::OpenItemsStream { id } => {
                    if let Ok((receiver, cancel)) = backend.open_items(&id).await {
                        msg_tx.send(Msg::StreamOpened { session_id: id.clone(), cancel: cancel.clone() });
                        let _ = stream_ready_tx.send((id, StreamHandle::Items(ItemsController::new(receiver), cancel)));
                    }
                }
                Command::CancelStream { id: _ } => {
                    // Cancellation itself is applied synchronously against the
                    // main-thread StreamRegistry; nothing async to do here.
                }

                Command::ListNotes { scopes } => {
                    msg_tx.send(Msg::NotesLoaded(backend.list_notes(scopes).await));
                }
                Command::CreateNote { request } => {
                    msg_tx.send(Msg::NoteCreated(backend.create_note(request).await));
                }
                Command::UpdateNote { id, text } => {
                    let result = backend.update_note(&id, text).await;
                    msg_tx.send(Msg::NoteUpdated { id, result });
                }
                Command::MoveNote { request } => {
                    let id = request.note_id.clone();
                    let result = backend.move_note(request).await;
                    msg_tx.send(Msg::NoteMoved { id, result });
                }
                Command::DeleteNote { id } => {
                    let result = backend.delete_note(&id).await;
                    msg_tx.send(Msg::NoteDeleted { id, result });
                }

                Command::ReadAppState => {
                    msg_tx.send(Msg::AppStateLoaded(backend.read_app_state().await));
                }
                Command::SaveAppState { state, save_token } => {
                    let result = backend.update_app_state(state).await;
                    msg_tx.send(Msg::AppStateSaved { save_token, result });
                }
                Command::DebouncedSave { state, save_token } => {
                    tokio::time::sleep(crate::persistence::SAVE_DEBOUNCE).await;
                    let result = backend.update_app_state(state).await;
                    msg_tx.send(Msg::AppStateSaved { save_token, result });
                }
                Command::DebouncedSessionLoad { id, select_seq } => {
                    tokio::time::sleep(crate::selection::SELECTION_LOAD_DEBOUNCE).await;
                    msg_tx.send(Msg::SessionLoadReady { session_id: id, select_seq });
                }

                Command::ProviderOptions { provider } => {
                    let result = backend.provider_options(&provider).await;
                    msg_tx.send(Msg::ProviderOptionsLoaded { provider, result });
                }
            }
        });
    }

    pub fn stream_kind_for_provider(provider: &fleet_protocol::Provider) -> StreamKind {
        stream_kind_for(provider)
    }
}
