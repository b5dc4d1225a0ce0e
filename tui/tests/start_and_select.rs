//! Starting a session drives §4's full chain: the new session lands in
//! `Model::sessions`, becomes the active selection, and schedules a debounced
//! load that, once it fires, kicks off `FetchHistory`, `FetchApprovals`, and
//! an open-stream command settling cleanly against `MemoryBackend`.

mod support;

use fleet_backend::StartSessionRequest;
use fleet_protocol::Provider;
use support::Harness;

#[tokio::test]
async fn starting_a_session_selects_it_and_loads_its_history() {
    let mut harness = Harness::new();

    harness.dispatch(fleet_tui::cmd::Command::CreateWorkspace {
        name: "demo".to_string(),
        repo_path: "/tmp/demo".into(),
    });
    let commands = harness.next().await;
    assert!(commands.is_empty());
    let workspace = harness.model.workspaces.first().cloned().expect("workspace created");

    harness.dispatch(fleet_tui::cmd::Command::StartSession {
        request: StartSessionRequest {
            workspace_id: workspace.id.clone(),
            worktree_id: None,
            provider: Provider::from("codex"),
            initial_message: None,
        },
    });
    let commands = harness.next().await;
    assert_eq!(commands.len(), 1, "session start should schedule a single debounced load");
    assert!(matches!(commands[0], fleet_tui::cmd::Command::DebouncedSessionLoad { .. }));
    for command in commands {
        harness.dispatch(command);
    }

    harness.settle().await;

    assert_eq!(harness.model.sessions.len(), 1);
    let session = &harness.model.sessions[0];
    assert_eq!(session.workspace_id.as_ref(), Some(&workspace.id));
    assert_eq!(harness.model.selection.active_session_id.as_ref(), Some(&session.id));
    assert!(harness.model.last_error.is_none());
}
