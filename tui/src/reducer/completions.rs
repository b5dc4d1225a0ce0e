//! Reduces completed-`Command` messages: merges the Backend's answer into
//! the Model and queues any follow-up `Command`s (e.g. starting a session
//! schedules its debounced load). History, approvals, and stream-open
//! results carry the `session_id` they were issued for; if it no longer
//! matches `model.pending_session_key` the user has since navigated to a
//! different row, and the result is dropped rather than merged.

use fleet_backend::BackendError;
use fleet_protocol::SessionId;

use crate::capabilities::StreamKind;
use crate::capabilities::stream_kind_for;
use crate::cmd::Command;
use crate::cmd::Commands;
use crate::model::Model;
use crate::msg::Msg;
use crate::sidebar::InvalidationReason;
use crate::toast::ToastLevel;

fn report_error(model: &mut Model, context: &str, error: &BackendError) {
    model.last_error = Some(format!("{context}: {error}"));
    model.toasts.push(ToastLevel::Error, format!("{context}: {error}"));
}

pub fn reduce(model: &mut Model, msg: Msg) -> Commands {
    match msg {
        Msg::WorkspacesLoaded(result) => match result {
            Ok(workspaces) => {
                model.workspaces = workspaces;
                model.invalidate_sidebar(InvalidationReason::Workspace);
            }
            Err(error) => report_error(model, "loading workspaces", &error),
        },
        Msg::WorkspaceCreated(result) => match result {
            Ok(workspace) => {
                model.workspaces.push(workspace);
                model.invalidate_sidebar(InvalidationReason::Workspace);
            }
            Err(error) => report_error(model, "creating workspace", &error),
        },
        Msg::WorkspaceRenamed { id, result } => match result {
            Ok(()) => model.invalidate_sidebar(InvalidationReason::Workspace),
            Err(error) => report_error(model, &format!("renaming workspace {id}"), &error),
        },
        Msg::WorkspaceDeleted { id, result } => match result {
            Ok(()) => {
                model.workspaces.retain(|w| w.id != id);
                model.invalidate_sidebar(InvalidationReason::Workspace);
            }
            Err(error) => report_error(model, &format!("deleting workspace {id}"), &error),
        },

        Msg::WorkspaceGroupsLoaded(result) => match result {
            Ok(groups) => {
                model.workspace_groups = groups;
                model.invalidate_sidebar(InvalidationReason::Group);
            }
            Err(error) => report_error(model, "loading groups", &error),
        },
        Msg::WorkspaceGroupCreated(result) => match result {
            Ok(group) => {
                model.workspace_groups.push(group);
                model.invalidate_sidebar(InvalidationReason::Group);
            }
            Err(error) => report_error(model, "creating group", &error),
        },
        Msg::WorkspaceGroupRenamed { id, result } => match result {
            Ok(()) => model.invalidate_sidebar(InvalidationReason::Group),
            Err(error) => report_error(model, &format!("renaming group {id}"), &error),
        },
        Msg::WorkspaceGroupDeleted { id, result } => match result {
            Ok(()) => {
                model.workspace_groups.retain(|g| g.id != id);
                model.invalidate_sidebar(InvalidationReason::Group);
            }
            Err(error) => report_error(model, &format!("deleting group {id}"), &error),
        },
        Msg::WorkspacesAssignedToGroup { group_id, result } => match result {
            Ok(()) => model.invalidate_sidebar(InvalidationReason::Group),
            Err(error) => report_error(model, &format!("assigning workspaces to group {group_id}"), &error),
        },

        Msg::WorktreesLoaded { workspace_id, result } => match result {
            Ok(worktrees) => {
                model.worktrees.retain(|w| w.workspace_id != workspace_id);
                model.worktrees.extend(worktrees);
                model.invalidate_sidebar(InvalidationReason::Worktree);
            }
            Err(error) => report_error(model, &format!("loading worktrees for {workspace_id}"), &error),
        },
        Msg::AvailableWorktreesLoaded { result, .. } => match result {
            Ok(available) => model.available_worktrees = available,
            Err(error) => report_error(model, "loading available worktrees", &error),
        },
        Msg::WorktreeCreated(result) => match result {
            Ok(worktree) => {
                model.worktrees.push(worktree);
                model.invalidate_sidebar(InvalidationReason::Worktree);
            }
            Err(error) => report_error(model, "creating worktree", &error),
        },
        Msg::ExistingWorktreeAdded(result) => match result {
            Ok(worktree) => {
                model.worktrees.push(worktree);
                model.invalidate_sidebar(InvalidationReason::Worktree);
            }
            Err(error) => report_error(model, "adding worktree", &error),
        },
        Msg::WorktreeRenamed { id, result } => match result {
            Ok(()) => model.invalidate_sidebar(InvalidationReason::Worktree),
            Err(error) => report_error(model, &format!("renaming worktree {id}"), &error),
        },
        Msg::WorktreeDeleted { id, result } => match result {
            Ok(()) => {
                model.worktrees.retain(|w| w.id != id);
                model.invalidate_sidebar(InvalidationReason::Worktree);
            }
            Err(error) => report_error(model, &format!("deleting worktree {id}"), &error),
        },

        Msg::SessionsLoaded(result) => match result {
            Ok(entries) => {
                model.sessions = entries.iter().map(|(s, _)| s.clone()).collect();
                model.session_meta = entries.into_iter().map(|(s, m)| (s.id, m)).collect();
                model.invalidate_sidebar(InvalidationReason::Sessions);
            }
            Err(error) => report_error(model, "loading sessions", &error),
        },
        Msg::SessionStarted(result) => match result {
            Ok(session) => return on_session_started(model, session),
            Err(error) => report_error(model, "starting session", &error),
        },
        Msg::SessionRenamed { id, result } => match result {
            Ok(()) => model.invalidate_sidebar(InvalidationReason::Sessions),
            Err(error) => report_error(model, &format!("renaming session {id}"), &error),
        },
        Msg::SessionDismissed { id, result } => match result {
            Ok(()) => {
                if let Some(session) = model.sessions.iter_mut().find(|s| s.id == id) {
                    session.status = fleet_protocol::SessionStatus::Exited;
                }
                model.invalidate_sidebar(InvalidationReason::DismissedFlag);
            }
            Err(error) => report_error(model, &format!("dismissing session {id}"), &error),
        },
        Msg::SessionsDismissed { ids, result } => match result {
            Ok(()) => {
                for session in model.sessions.iter_mut().filter(|s| ids.contains(&s.id)) {
                    session.status = fleet_protocol::SessionStatus::Exited;
                }
                model.invalidate_sidebar(InvalidationReason::DismissedFlag);
            }
            Err(error) => report_error(model, "dismissing sessions", &error),
        },
        Msg::SessionKilled { id, result } => match result {
            Ok(()) => model.invalidate_sidebar(InvalidationReason::Sessions),
            Err(error) => report_error(model, &format!("killing session {id}"), &error),
        },
        Msg::SessionInterrupted { id, result } => {
            if let Err(error) = result {
                report_error(model, &format!("interrupting session {id}"), &error);
            }
        }
        Msg::MessageSent { session_id, result, .. } => {
            if let Err(error) = result {
                report_error(model, &format!("sending message to {session_id}"), &error);
            }
        }
        Msg::HistoryFetched { session_id, result } => {
            if model.pending_session_key.as_ref() == Some(&session_id) {
                match result {
                    Ok(blocks) => {
                        let in_flight = model.activity.is_active(&session_id);
                        let transcript = model.transcripts.get_or_create(&session_id);
                        transcript.replace_history(blocks);
                        transcript.apply_reasoning_collapse(&model.reasoning_collapse, in_flight);
                        model.loading = false;
                    }
                    Err(error) => report_error(model, &format!("fetching history for {session_id}"), &error),
                }
            }
        }
        Msg::ApprovalsFetched { session_id, result } => {
            if model.pending_session_key.as_ref() == Some(&session_id) {
                match result {
                    Ok(requests) => model.approvals.set_pending(session_id, requests),
                    Err(error) => report_error(model, &format!("fetching approvals for {session_id}"), &error),
                }
            }
        }
        Msg::ApprovalResolved { session_id, request_id, result } => match result {
            Ok(()) => {
                model.approvals.resolve(&session_id, &request_id);
            }
            Err(error) => report_error(model, &format!("resolving approval {request_id}"), &error),
        },

        Msg::NotesLoaded(result) => {
            model.notes_pending_scopes.clear();
            match result {
                Ok(notes) => model.notes.replace_all(notes),
                Err(error) => report_error(model, "loading notes", &error),
            }
        }
        Msg::NoteCreated(result) => match result {
            Ok(note) => model.notes.upsert(note),
            Err(error) => report_error(model, "creating note", &error),
        },
        Msg::NoteUpdated { id, result } => {
            if let Err(error) = result {
                report_error(model, &format!("updating note {id}"), &error);
            }
        }
        Msg::NoteMoved { id, result } => {
            if let Err(error) = result {
                report_error(model, &format!("moving note {id}"), &error);
            }
        }
        Msg::NoteDeleted { id, result } => match result {
            Ok(()) => model.notes.remove(&id),
            Err(error) => report_error(model, &format!("deleting note {id}"), &error),
        },

        Msg::AppStateLoaded(result) => match result {
            Ok(state) => {
                model.app_state = state;
                model.invalidate_sidebar(InvalidationReason::AppState);
            }
            Err(error) => report_error(model, "loading app state", &error),
        },
        Msg::AppStateSaved { save_token, result } => {
            if !model.save_debouncer.is_current(save_token) {
                // A newer save has since been scheduled; this reply is stale.
            } else if let Err(error) = result {
                report_error(model, "saving app state", &error);
            }
        }

        Msg::ProviderOptionsLoaded { result, .. } => {
            if let Err(error) = result {
                report_error(model, "loading provider options", &error);
            }
        }

        Msg::ToastExpired { toast_id } => model.toasts.expire(toast_id),
        Msg::RecentsRefreshTick => {}
        Msg::FilePickerResolved { .. } => {}

        Msg::SessionLoadReady { session_id, select_seq } => {
            if model.selection.is_current(select_seq) {
                return begin_session_load(model, session_id);
            }
        }

        _ => {}
    }
    Commands::new()
}

fn on_session_started(model: &mut Model, session: fleet_protocol::Session) -> Commands {
    let session_id = session.id.clone();
    model.sessions.push(session);
    model.invalidate_sidebar(InvalidationReason::Sessions);
    model.recents.touch(session_id.clone());
    let select_seq = model.selection.select_session(session_id.clone());
    crate::cmd::one(Command::DebouncedSessionLoad { id: session_id, select_seq })
}

/// Step 2-3 of the selection-change pipeline: cancel whatever stream the
/// previous pending session had open, clear its approvals, mark `session_id`
/// as the one we're loading for, and kick off the history/approvals/stream
/// fetches that will be gated on `pending_session_key` when they land.
fn begin_session_load(model: &mut Model, session_id: SessionId) -> Commands {
    let mut commands = Commands::new();
    if let Some(previous) = model.pending_session_key.take() {
        if previous != session_id {
            commands.push(Command::CancelStream { id: previous });
        }
    }
    model.pending_session_key = Some(session_id.clone());
    model.approvals.clear_session(&session_id);
    model.transcripts.get_or_create(&session_id);
    model.loading = true;
    model.invalidate_sidebar(InvalidationReason::Sessions);

    commands.push(Command::FetchHistory { id: session_id.clone(), max_items: 500 });
    commands.push(Command::FetchApprovals { id: session_id.clone() });
    if let Some(provider) = model.sessions.iter().find(|s| s.id == session_id).map(|s| s.provider.clone()) {
        commands.push(match stream_kind_for(&provider) {
            StreamKind::Plain => Command::OpenPlainStream { id: session_id },
            StreamKind::Codex => Command::OpenEventStream { id: session_id },
            StreamKind::Items => Command::OpenItemsStream { id: session_id },
        });
    }
    commands
}
