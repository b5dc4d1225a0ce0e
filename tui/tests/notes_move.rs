//! Moving a note between scopes updates it in place at the Backend and the
//! reducer simply re-lists notes for whichever scope is now active, rather
//! than tracking the move itself (§4's notes modes, §8's "notes move"
//! scenario).

mod support;

use fleet_backend::CreateNoteRequest;
use fleet_backend::MoveNoteRequest;
use fleet_protocol::NoteScope;
use fleet_protocol::WorkspaceId;
use support::Harness;

#[tokio::test]
async fn moving_a_note_from_global_to_a_workspace_scope_is_reflected_on_reload() {
    let mut harness = Harness::new();

    harness.dispatch(fleet_tui::cmd::Command::CreateNote {
        request: CreateNoteRequest { scope: NoteScope::Global, text: "remember this".to_string() },
    });
    harness.next().await;
    let note_id = harness.model.notes.for_scope(&NoteScope::Global)[0].id.clone();

    let workspace_id = WorkspaceId::new("w1");
    harness.dispatch(fleet_tui::cmd::Command::MoveNote {
        request: MoveNoteRequest { note_id: note_id.clone(), new_scope: NoteScope::Workspace(workspace_id.clone()) },
    });
    harness.next().await;
    assert!(harness.model.last_error.is_none());

    harness.dispatch(fleet_tui::cmd::Command::ListNotes {
        scopes: vec![NoteScope::Global, NoteScope::Workspace(workspace_id.clone())],
    });
    harness.next().await;

    assert!(harness.model.notes.for_scope(&NoteScope::Global).is_empty());
    let moved = harness.model.notes.for_scope(&NoteScope::Workspace(workspace_id));
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].id, note_id);
    assert_eq!(moved[0].text, "remember this");
}

#[tokio::test]
async fn moving_an_unknown_note_reports_an_error_without_touching_the_store() {
    let mut harness = Harness::new();

    harness.dispatch(fleet_tui::cmd::Command::MoveNote {
        request: MoveNoteRequest {
            note_id: fleet_protocol::NoteId::new("ghost"),
            new_scope: NoteScope::Global,
        },
    });
    harness.next().await;

    assert!(harness.model.last_error.is_some());
}
