//! Mode-specific key handling: `handle_normal` for the default navigation
//! surface, `handle` for every modal text-entry/picker mode. Kept as two
//! functions rather than one per `Mode` variant, since most modal modes
//! share the same commit-on-Enter/cancel-on-Esc shape (Esc is intercepted
//! earlier, in `global_keys`).

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use unicode_segmentation::UnicodeSegmentation;

use crate::cmd::Command;
use crate::cmd::Commands;
use crate::confirm::PendingConfirm;
use crate::mode::Mode;
use crate::model::Model;
use crate::model::RenameTarget;
use crate::sidebar::RowKey;

pub(crate) fn schedule_save(model: &mut Model) -> Commands {
    let token = model.save_debouncer.schedule();
    vec![Command::DebouncedSave { state: model.app_state.clone(), save_token: token }]
}

/// Saves whatever's in `compose_input` as the active session's draft (or
/// clears the draft if it's now empty) and schedules a save. Called on
/// compose exit and before the selection moves to a different session.
pub(crate) fn save_compose_draft(model: &mut Model) -> Commands {
    let Some(session_id) = model.selection.active_session_id.clone() else { return Commands::new() };
    let text = std::mem::take(&mut model.compose_input);
    if text.trim().is_empty() {
        model.app_state.compose_drafts.remove(&session_id);
    } else {
        model.app_state.compose_drafts.insert(session_id, text);
    }
    schedule_save(model)
}

fn restore_compose_draft(model: &mut Model) {
    model.compose_input =
        model.selection.active_session_id.as_ref().and_then(|id| model.app_state.compose_drafts.get(id).cloned()).unwrap_or_default();
}

/// Mirror of `save_compose_draft` for the note-input buffer, keyed by
/// the current note scope rather than a session id.
pub(crate) fn save_note_draft(model: &mut Model) -> Commands {
    let scope_key = model.current_note_scope().key();
    let text = std::mem::take(&mut model.note_input);
    if text.trim().is_empty() {
        model.app_state.note_drafts.remove(&scope_key);
    } else {
        model.app_state.note_drafts.insert(scope_key, text);
    }
    schedule_save(model)
}

fn restore_note_draft(model: &mut Model) {
    let scope_key = model.current_note_scope().key();
    model.note_input = model.app_state.note_drafts.get(&scope_key).cloned().unwrap_or_default();
}

/// Drops the last grapheme cluster rather than the last byte/char, so
/// backspacing over a multi-codepoint emoji or combining sequence removes it
/// in one keystroke instead of leaving a mangled tail.
fn backspace(buf: &mut String) {
    if let Some((index, _)) = buf.grapheme_indices(true).last() {
        buf.truncate(index);
    }
}

pub fn handle_normal(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Up => {
            let rows = model.sidebar.rows().to_vec();
            model.selection.move_cursor(&rows, -1);
            Commands::new()
        }
        KeyCode::Down => {
            let rows = model.sidebar.rows().to_vec();
            model.selection.move_cursor(&rows, 1);
            Commands::new()
        }
        KeyCode::Enter => activate_cursor(model),
        KeyCode::Char('c') => {
            model.mode = Mode::Compose;
            restore_compose_draft(model);
            Commands::new()
        }
        KeyCode::Char('n') => {
            model.mode = Mode::AddNote;
            restore_note_draft(model);
            Commands::new()
        }
        KeyCode::Char('N') => {
            model.picker_index = 0;
            model.mode = Mode::Notes;
            let scope = model.current_note_scope();
            let scope_key = scope.key();
            if model.notes_pending_scopes.insert(scope_key) {
                return crate::cmd::one(Command::ListNotes { scopes: vec![scope] });
            }
            Commands::new()
        }
        KeyCode::Char('z') => toggle_reasoning_collapse(model),
        KeyCode::Char('w') => {
            model.mode = Mode::AddWorkspace;
            Commands::new()
        }
        KeyCode::Char('W') => {
            model.picker_index = 0;
            model.mode = Mode::PickWorkspaceRename;
            Commands::new()
        }
        KeyCode::Char('t') => {
            model.mode = Mode::AddWorktree;
            Commands::new()
        }
        KeyCode::Char('/') => {
            model.mode = Mode::Search;
            Commands::new()
        }
        KeyCode::Char('r') => {
            model.mode = Mode::Recents;
            Commands::new()
        }
        KeyCode::Char('g') => {
            model.picker_index = 0;
            model.mode = Mode::EditWorkspaceGroups;
            Commands::new()
        }
        KeyCode::Char('p') => begin_start_session(model),
        KeyCode::Char('R') => begin_rename(model),
        KeyCode::Char('m') => {
            super::mouse::open_context_menu(model);
            Commands::new()
        }
        KeyCode::Char('d') => {
            if let Some(session_id) = cursor_session_id(model) {
                model.pending_confirm = Some(PendingConfirm::DismissSession(session_id));
            }
            Commands::new()
        }
        KeyCode::Char('k') => {
            if let Some(session_id) = cursor_session_id(model) {
                model.pending_confirm = Some(PendingConfirm::KillSession(session_id));
            }
            Commands::new()
        }
        KeyCode::Char('y') => begin_approval(model, fleet_protocol::ApprovalDecision::Accept),
        KeyCode::Char('x') => begin_approval(model, fleet_protocol::ApprovalDecision::Decline),
        _ => Commands::new(),
    }
}

/// Toggles collapse on the active session's most recently streamed
/// reasoning block.
fn toggle_reasoning_collapse(model: &mut Model) -> Commands {
    let Some(session_id) = model.selection.active_session_id.clone() else { return Commands::new() };
    let in_flight = model.activity.is_active(&session_id);
    let Some(block_id) =
        model.transcripts.get(&session_id).and_then(|t| t.blocks.iter().rev().find(|b| b.is_reasoning())).map(|b| b.id.clone())
    else {
        return Commands::new();
    };
    let current = model.reasoning_collapse.resolve(&block_id, in_flight);
    model.reasoning_collapse.toggle(&block_id, current);
    model.transcripts.get_or_create(&session_id).apply_reasoning_collapse(&model.reasoning_collapse, in_flight);
    Commands::new()
}

fn cursor_session_id(model: &Model) -> Option<fleet_protocol::SessionId> {
    match &model.selection.cursor {
        Some(RowKey::Session(id)) => Some(id.clone()),
        _ => None,
    }
}

fn approval_session_id(model: &Model) -> Option<fleet_protocol::SessionId> {
    cursor_session_id(model).or_else(|| model.selection.active_session_id.clone())
}

/// `y`/`x` on a session with a pending approval accept/decline it (§4's
/// approval handling). Accepting a request that needs free-text justification
/// drops into `approval_response` instead of resolving immediately.
fn begin_approval(model: &mut Model, decision: fleet_protocol::ApprovalDecision) -> Commands {
    let Some(session_id) = approval_session_id(model) else { return Commands::new() };
    let Some(request) = model.approvals.next_pending(&session_id).cloned() else { return Commands::new() };
    if decision == fleet_protocol::ApprovalDecision::Accept && request.needs_response_text {
        model.pending_approval_response = Some((session_id, request.request_id));
        model.approval_response_input.clear();
        model.mode = Mode::ApprovalResponse;
        return Commands::new();
    }
    vec![Command::ResolveApproval {
        request: fleet_backend::ApprovalDecisionRequest { session_id, request_id: request.request_id, decision, response_text: None },
    }]
}

fn begin_rename(model: &mut Model) {
    let Some(cursor) = model.selection.cursor.clone() else { return };
    match cursor {
        RowKey::Workspace(id) => {
            if let Some(workspace) = model.workspaces.iter().find(|w| w.id == id) {
                model.rename_input = workspace.name.clone();
                model.pending_rename = Some(RenameTarget::Workspace(id));
                model.mode = Mode::RenameWorkspace;
            }
        }
        RowKey::Worktree(id) => {
            if let Some(worktree) = model.worktrees.iter().find(|w| w.id == id) {
                model.rename_input = worktree.name.clone();
                model.pending_rename = Some(RenameTarget::Worktree(id));
                model.mode = Mode::RenameWorktree;
            }
        }
        RowKey::Session(id) => {
            if let Some(session) = model.sessions.iter().find(|s| s.id == id) {
                model.rename_input = session.title.clone();
                model.pending_rename = Some(RenameTarget::Session(id));
                model.mode = Mode::RenameSession;
            }
        }
        _ => {}
    }
}

fn begin_start_session(model: &mut Model) -> Commands {
    let Some(cursor) = model.selection.cursor.clone() else { return Commands::new() };
    let target = match cursor {
        RowKey::Workspace(id) => Some((id, None)),
        RowKey::Worktree(id) => model.worktrees.iter().find(|w| w.id == id).map(|w| (w.workspace_id.clone(), Some(id))),
        _ => None,
    };
    let Some(target) = target else { return Commands::new() };
    model.pending_start_session = Some(target);
    model.picker_index = 0;
    model.mode = Mode::PickProvider;
    Commands::new()
}

fn activate_cursor(model: &mut Model) -> Commands {
    let Some(cursor) = model.selection.cursor.clone() else { return Commands::new() };
    match cursor {
        RowKey::Session(id) => select_session(model, id),
        RowKey::Workspace(id) => {
            let mut commands = leave_active_session(model);
            let expanded = model.app_state.sidebar_workspace_expanded.entry(id.clone()).or_insert(true);
            *expanded = !*expanded;
            model.app_state.active_workspace_id = Some(id);
            model.app_state.active_worktree_id = None;
            model.invalidate_sidebar(crate::sidebar::InvalidationReason::AppState);
            commands.extend(schedule_save(model));
            commands
        }
        RowKey::Worktree(id) => {
            let mut commands = leave_active_session(model);
            let expanded = model.app_state.sidebar_worktree_expanded.entry(id.clone()).or_insert(true);
            *expanded = !*expanded;
            if let Some(worktree) = model.worktrees.iter().find(|w| w.id == id) {
                model.app_state.active_workspace_id = Some(worktree.workspace_id.clone());
            }
            model.app_state.active_worktree_id = Some(id);
            model.invalidate_sidebar(crate::sidebar::InvalidationReason::AppState);
            commands.extend(schedule_save(model));
            commands
        }
        _ => Commands::new(),
    }
}

/// Cancels the stream of whatever session was loading/active, clears the
/// selection, and saves any compose draft in progress, ahead of switching
/// the cursor to a non-session row.
fn leave_active_session(model: &mut Model) -> Commands {
    let mut commands = save_compose_draft(model);
    model.selection.clear_active_session();
    if let Some(previous) = model.pending_session_key.take() {
        commands.push(Command::CancelStream { id: previous });
    }
    commands
}

fn select_session(model: &mut Model, id: fleet_protocol::SessionId) -> Commands {
    let mut commands = save_compose_draft(model);
    let select_seq = model.selection.select_session(id.clone());
    model.recents.touch(id.clone());
    commands.push(Command::DebouncedSessionLoad { id, select_seq });
    commands
}

pub fn handle(model: &mut Model, key: KeyEvent) -> Commands {
    match model.mode {
        Mode::Compose => handle_compose(model, key),
        Mode::AddNote => handle_add_note(model, key),
        Mode::AddWorkspace => handle_add_workspace(model, key),
        Mode::AddWorkspaceGroup => handle_add_workspace_group(model, key),
        Mode::AddWorktree => handle_add_worktree(model, key),
        Mode::Search => handle_search(model, key),
        Mode::RenameWorkspace | Mode::RenameWorktree | Mode::RenameSession | Mode::RenameWorkspaceGroup => handle_rename(model, key),
        Mode::PickProvider => handle_pick_provider(model, key),
        Mode::ApprovalResponse => handle_approval_response(model, key),
        Mode::Notes => handle_notes(model, key),
        Mode::PickWorkspaceRename => handle_pick_workspace_rename(model, key),
        Mode::EditWorkspaceGroups | Mode::PickWorkspaceGroupEdit => handle_pick_workspace_group_edit(model, key),
        Mode::PickWorkspaceGroupRename => handle_pick_workspace_group_rename(model, key),
        Mode::PickWorkspaceGroupAssign => handle_pick_workspace_group_assign(model, key),
        Mode::PickWorkspaceGroupDelete => handle_pick_workspace_group_delete(model, key),
        Mode::AssignGroupWorkspaces => handle_assign_group_workspaces(model, key),
        Mode::Recents => handle_normal(model, key),
        Mode::PickNoteMoveTarget => handle_pick_note_move_target(model, key),
        Mode::PickNoteMoveWorktree => handle_pick_note_move_worktree(model, key),
        Mode::PickNoteMoveSession => handle_pick_note_move_session(model, key),
        Mode::Normal => handle_normal(model, key),
    }
}

fn handle_add_workspace(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.rename_input.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.rename_input);
            Commands::new()
        }
        KeyCode::Enter => {
            let name = std::mem::take(&mut model.rename_input);
            model.mode = Mode::Normal;
            if name.trim().is_empty() {
                return Commands::new();
            }
            vec![Command::CreateWorkspace { name, repo_path: std::env::current_dir().unwrap_or_default() }]
        }
        _ => Commands::new(),
    }
}

fn handle_add_workspace_group(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.rename_input.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.rename_input);
            Commands::new()
        }
        KeyCode::Enter => {
            let name = std::mem::take(&mut model.rename_input);
            model.mode = Mode::Normal;
            if name.trim().is_empty() {
                return Commands::new();
            }
            vec![Command::CreateWorkspaceGroup { name }]
        }
        _ => Commands::new(),
    }
}

/// The workspace a new worktree is created under: the cursor's own workspace
/// row, or the workspace that owns the cursor's worktree row.
fn cursor_workspace_id(model: &Model) -> Option<fleet_protocol::WorkspaceId> {
    match &model.selection.cursor {
        Some(RowKey::Workspace(id)) => Some(id.clone()),
        Some(RowKey::Worktree(id)) => model.worktrees.iter().find(|w| &w.id == id).map(|w| w.workspace_id.clone()),
        _ => None,
    }
}

fn handle_add_worktree(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.rename_input.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.rename_input);
            Commands::new()
        }
        KeyCode::Enter => {
            let name = std::mem::take(&mut model.rename_input);
            model.mode = Mode::Normal;
            let (Some(workspace_id), false) = (cursor_workspace_id(model), name.trim().is_empty()) else { return Commands::new() };
            vec![Command::CreateWorktree { workspace_id, name }]
        }
        _ => Commands::new(),
    }
}

fn handle_rename(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.rename_input.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.rename_input);
            Commands::new()
        }
        KeyCode::Enter => {
            let name = std::mem::take(&mut model.rename_input);
            model.mode = Mode::Normal;
            let Some(target) = model.pending_rename.take() else { return Commands::new() };
            if name.trim().is_empty() {
                return Commands::new();
            }
            let mut commands = match target {
                RenameTarget::Workspace(id) => vec![Command::RenameWorkspace { id, name }],
                RenameTarget::Worktree(id) => vec![Command::RenameWorktree { id, name }],
                RenameTarget::Session(id) => vec![Command::RenameSession { id, title: name }],
                RenameTarget::WorkspaceGroup(id) => vec![Command::RenameWorkspaceGroup { id, name }],
            };
            commands.extend(schedule_save(model));
            commands
        }
        _ => Commands::new(),
    }
}

fn handle_compose(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.compose_input.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.compose_input);
            Commands::new()
        }
        KeyCode::Up => {
            if let Some(session_id) = model.selection.active_session_id.clone() {
                if let Some(text) = model.compose_history.recall_older(&session_id) {
                    model.compose_input = text;
                }
            }
            Commands::new()
        }
        KeyCode::Down => {
            if let Some(session_id) = model.selection.active_session_id.clone() {
                if let Some(text) = model.compose_history.recall_newer(&session_id) {
                    model.compose_input = text;
                }
            }
            Commands::new()
        }
        KeyCode::Enter => send_compose(model),
        _ => Commands::new(),
    }
}

fn send_compose(model: &mut Model) -> Commands {
    let Some(session_id) = model.selection.active_session_id.clone() else { return Commands::new() };
    let text = std::mem::take(&mut model.compose_input);
    if text.trim().is_empty() {
        return Commands::new();
    }
    model.compose_history.record_sent(&session_id, text.clone());
    model.app_state.compose_drafts.remove(&session_id);
    let send_token = model.selection.select_seq.0;
    model.mode = Mode::Normal;
    let mut commands = schedule_save(model);
    commands.push(Command::SendMessage { request: fleet_backend::SendMessageRequest { session_id, text, send_token } });
    commands
}

fn handle_add_note(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.note_input.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.note_input);
            Commands::new()
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut model.note_input);
            model.mode = Mode::Normal;
            let scope = model.current_note_scope();
            model.app_state.note_drafts.remove(&scope.key());
            if text.trim().is_empty() {
                return Commands::new();
            }
            let mut commands = schedule_save(model);
            commands.push(Command::CreateNote { request: fleet_backend::CreateNoteRequest { scope, text } });
            commands
        }
        _ => Commands::new(),
    }
}

fn handle_search(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.search_query.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.search_query);
            Commands::new()
        }
        KeyCode::Enter => {
            model.mode = Mode::Normal;
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_pick_provider(model: &mut Model, key: KeyEvent) -> Commands {
    let len = model.provider_catalog.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            let Some((workspace_id, worktree_id)) = model.pending_start_session.take() else {
                model.mode = Mode::Normal;
                return Commands::new();
            };
            let Some(provider) = model.provider_catalog.get(model.picker_index).cloned() else {
                model.mode = Mode::Normal;
                return Commands::new();
            };
            model.mode = Mode::Normal;
            vec![Command::StartSession {
                request: fleet_backend::StartSessionRequest { workspace_id, worktree_id, provider, initial_message: None },
            }]
        }
        _ => Commands::new(),
    }
}

fn handle_approval_response(model: &mut Model, key: KeyEvent) -> Commands {
    match key.code {
        KeyCode::Char(c) => {
            model.approval_response_input.push(c);
            Commands::new()
        }
        KeyCode::Backspace => {
            backspace(&mut model.approval_response_input);
            Commands::new()
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut model.approval_response_input);
            model.mode = Mode::Normal;
            let Some((session_id, request_id)) = model.pending_approval_response.take() else { return Commands::new() };
            vec![Command::ResolveApproval {
                request: fleet_backend::ApprovalDecisionRequest {
                    session_id,
                    request_id,
                    decision: fleet_protocol::ApprovalDecision::Accept,
                    response_text: Some(text),
                },
            }]
        }
        _ => Commands::new(),
    }
}

fn handle_notes(model: &mut Model, key: KeyEvent) -> Commands {
    let notes = model.notes_for_active_scope();
    let len = notes.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Char('n') => {
            model.mode = Mode::AddNote;
            Commands::new()
        }
        KeyCode::Char('d') => {
            if let Some(note) = notes.get(model.picker_index) {
                model.pending_confirm = Some(PendingConfirm::DeleteNote(note.id.clone()));
            }
            Commands::new()
        }
        KeyCode::Char('m') => {
            if let Some(note) = notes.get(model.picker_index) {
                model.note_move_target = Some(note.id.clone());
                model.note_move_workspace = None;
                model.note_move_worktree = None;
                model.picker_index = 0;
                model.mode = Mode::PickNoteMoveTarget;
            }
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_pick_workspace_rename(model: &mut Model, key: KeyEvent) -> Commands {
    let len = model.workspaces.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            if let Some(workspace) = model.workspaces.get(model.picker_index).cloned() {
                model.rename_input = workspace.name;
                model.pending_rename = Some(RenameTarget::Workspace(workspace.id));
                model.mode = Mode::RenameWorkspace;
            } else {
                model.mode = Mode::Normal;
            }
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_pick_workspace_group_edit(model: &mut Model, key: KeyEvent) -> Commands {
    let len = model.workspace_groups.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Char('n') => {
            model.mode = Mode::AddWorkspaceGroup;
            Commands::new()
        }
        KeyCode::Char('r') => {
            model.mode = Mode::PickWorkspaceGroupRename;
            Commands::new()
        }
        KeyCode::Char('a') => {
            model.mode = Mode::PickWorkspaceGroupAssign;
            Commands::new()
        }
        KeyCode::Char('d') => {
            model.mode = Mode::PickWorkspaceGroupDelete;
            Commands::new()
        }
        KeyCode::Enter => {
            // Toggle this group in the sidebar's active-group filter.
            let mut commands = Commands::new();
            if let Some(group) = model.workspace_groups.get(model.picker_index) {
                let id = group.id.as_str().to_string();
                if let Some(pos) = model.app_state.active_group_ids.iter().position(|g| g.as_str() == id.as_str()) {
                    model.app_state.active_group_ids.remove(pos);
                } else {
                    model.app_state.active_group_ids.push(group.id.clone());
                }
                model.invalidate_sidebar(crate::sidebar::InvalidationReason::Group);
                commands = schedule_save(model);
            }
            model.mode = Mode::Normal;
            commands
        }
        _ => Commands::new(),
    }
}

fn handle_pick_workspace_group_rename(model: &mut Model, key: KeyEvent) -> Commands {
    let len = model.workspace_groups.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            if let Some(group) = model.workspace_groups.get(model.picker_index).cloned() {
                model.rename_input = group.name;
                model.pending_rename = Some(RenameTarget::WorkspaceGroup(group.id));
                model.mode = Mode::RenameWorkspaceGroup;
            } else {
                model.mode = Mode::Normal;
            }
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_pick_workspace_group_delete(model: &mut Model, key: KeyEvent) -> Commands {
    let len = model.workspace_groups.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            if let Some(group) = model.workspace_groups.get(model.picker_index) {
                model.pending_confirm = Some(PendingConfirm::DeleteWorkspaceGroup(group.id.clone()));
            }
            model.mode = Mode::Normal;
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_pick_workspace_group_assign(model: &mut Model, key: KeyEvent) -> Commands {
    let len = model.workspace_groups.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            let Some(group) = model.workspace_groups.get(model.picker_index).cloned() else {
                model.mode = Mode::Normal;
                return Commands::new();
            };
            model.assign_group_selected =
                model.workspaces.iter().filter(|w| w.group_ids.contains(&group.id)).map(|w| w.id.clone()).collect();
            model.assign_group_target = Some(group.id);
            model.picker_index = 0;
            model.mode = Mode::AssignGroupWorkspaces;
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_assign_group_workspaces(model: &mut Model, key: KeyEvent) -> Commands {
    let len = model.workspaces.len();
    match key.code {
        KeyCode::Up if len > 0 => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down if len > 0 => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Char(' ') => {
            if let Some(workspace) = model.workspaces.get(model.picker_index) {
                let id = workspace.id.clone();
                if let Some(pos) = model.assign_group_selected.iter().position(|w| w == &id) {
                    model.assign_group_selected.remove(pos);
                } else {
                    model.assign_group_selected.push(id);
                }
            }
            Commands::new()
        }
        KeyCode::Enter => {
            model.mode = Mode::Normal;
            let Some(group_id) = model.assign_group_target.take() else { return Commands::new() };
            vec![Command::AssignWorkspacesToGroup { group_id, workspace_ids: std::mem::take(&mut model.assign_group_selected) }]
        }
        _ => Commands::new(),
    }
}

fn handle_pick_note_move_target(model: &mut Model, key: KeyEvent) -> Commands {
    // Index 0 is "Global"; the rest mirrors `model.workspaces`.
    let len = 1 + model.workspaces.len();
    match key.code {
        KeyCode::Up => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            if model.picker_index == 0 {
                let Some(note_id) = model.note_move_target.take() else { return Commands::new() };
                model.mode = Mode::Notes;
                return vec![Command::MoveNote {
                    request: fleet_backend::MoveNoteRequest { note_id, new_scope: fleet_protocol::NoteScope::Global },
                }];
            }
            if let Some(workspace) = model.workspaces.get(model.picker_index - 1) {
                model.note_move_workspace = Some(workspace.id.clone());
                model.picker_index = 0;
                model.mode = Mode::PickNoteMoveWorktree;
            }
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_pick_note_move_worktree(model: &mut Model, key: KeyEvent) -> Commands {
    let Some(workspace_id) = model.note_move_workspace.clone() else {
        model.mode = Mode::Notes;
        return Commands::new();
    };
    let worktrees: Vec<fleet_protocol::WorktreeId> =
        model.worktrees.iter().filter(|w| w.workspace_id == workspace_id).map(|w| w.id.clone()).collect();
    let len = 1 + worktrees.len();
    match key.code {
        KeyCode::Up => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            if model.picker_index == 0 {
                let Some(note_id) = model.note_move_target.take() else { return Commands::new() };
                model.mode = Mode::Notes;
                return vec![Command::MoveNote {
                    request: fleet_backend::MoveNoteRequest { note_id, new_scope: fleet_protocol::NoteScope::Workspace(workspace_id) },
                }];
            }
            if let Some(worktree_id) = worktrees.get(model.picker_index - 1).cloned() {
                model.note_move_worktree = Some(worktree_id);
                model.picker_index = 0;
                model.mode = Mode::PickNoteMoveSession;
            }
            Commands::new()
        }
        _ => Commands::new(),
    }
}

fn handle_pick_note_move_session(model: &mut Model, key: KeyEvent) -> Commands {
    let Some(worktree_id) = model.note_move_worktree.clone() else {
        model.mode = Mode::Notes;
        return Commands::new();
    };
    let sessions: Vec<fleet_protocol::SessionId> =
        model.sessions.iter().filter(|s| s.worktree_id.as_ref() == Some(&worktree_id)).map(|s| s.id.clone()).collect();
    let len = 1 + sessions.len();
    match key.code {
        KeyCode::Up => {
            model.picker_index = (model.picker_index + len - 1) % len;
            Commands::new()
        }
        KeyCode::Down => {
            model.picker_index = (model.picker_index + 1) % len;
            Commands::new()
        }
        KeyCode::Enter => {
            if model.picker_index == 0 {
                let Some(note_id) = model.note_move_target.take() else { return Commands::new() };
                model.mode = Mode::Notes;
                return vec![Command::MoveNote {
                    request: fleet_backend::MoveNoteRequest { note_id, new_scope: fleet_protocol::NoteScope::Worktree(worktree_id) },
                }];
            }
            if let Some(session_id) = sessions.get(model.picker_index - 1).cloned() {
                let Some(note_id) = model.note_move_target.take() else { return Commands::new() };
                model.mode = Mode::Notes;
                return vec![Command::MoveNote {
                    request: fleet_backend::MoveNoteRequest { note_id, new_scope: fleet_protocol::NoteScope::Session(session_id) },
                }];
            }
            Commands::new()
        }
        _ => Commands::new(),
    }
}

pub fn apply_confirm(model: &mut Model, confirm: Option<PendingConfirm>) -> Commands {
    let Some(confirm) = confirm else { return Commands::new() };
    let mut commands = match confirm {
        PendingConfirm::DismissSession(id) => vec![Command::DismissSession { id }],
        PendingConfirm::KillSession(id) => vec![Command::KillSession { id }],
        PendingConfirm::DeleteWorkspace(id) => vec![Command::DeleteWorkspace { id }],
        PendingConfirm::DeleteWorktree(id) => vec![Command::DeleteWorktree { id }],
        PendingConfirm::DeleteWorkspaceGroup(id) => vec![Command::DeleteWorkspaceGroup { id }],
        PendingConfirm::DeleteNote(id) => vec![Command::DeleteNote { id }],
    };
    commands.extend(schedule_save(model));
    commands
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE, kind: KeyEventKind::Press, state: crossterm::event::KeyEventState::NONE }
    }

    #[test]
    fn c_enters_compose_mode() {
        let mut model = Model::new();
        handle_normal(&mut model, key(KeyCode::Char('c')));
        assert_matches!(model.mode, Mode::Compose);
    }

    #[test]
    fn sending_compose_with_no_active_session_leaves_mode_and_draft_untouched() {
        let mut model = Model::new();
        model.mode = Mode::Compose;
        model.compose_input = "draft".to_string();
        handle(&mut model, key(KeyCode::Enter));
        assert_matches!(model.mode, Mode::Compose);
        assert_eq!(model.compose_input, "draft");
    }

    #[test]
    fn sending_compose_with_an_active_session_returns_to_normal() {
        let mut model = Model::new();
        model.mode = Mode::Compose;
        model.compose_input = "draft".to_string();
        model.selection.select_session(fleet_protocol::SessionId::new("s1"));
        handle(&mut model, key(KeyCode::Enter));
        assert_matches!(model.mode, Mode::Normal);
        assert!(model.compose_input.is_empty());
    }

    #[test]
    fn backspace_drops_a_full_grapheme_cluster() {
        let mut buf = "hi\u{1F600}".to_string();
        backspace(&mut buf);
        assert_eq!(buf, "hi");
    }

    #[test]
    fn r_on_an_empty_cursor_leaves_normal_mode_unchanged() {
        let mut model = Model::new();
        begin_rename(&mut model);
        assert_matches!(model.mode, Mode::Normal);
    }
}
