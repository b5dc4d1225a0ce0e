//! Compose mode end to end: entering it, typing a grapheme-aware draft,
//! and sending only commits once a session is selected (§4.1's compose
//! mode, §8's "compose and send" scenario).

mod support;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyEventState;
use crossterm::event::KeyModifiers;
use fleet_backend::SendMessageRequest;
use fleet_backend::StartSessionRequest;
use fleet_protocol::Provider;
use support::Harness;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent { code, modifiers: KeyModifiers::NONE, kind: KeyEventKind::Press, state: KeyEventState::NONE }
}

async fn start_session(harness: &mut Harness) -> fleet_protocol::SessionId {
    harness.dispatch(fleet_tui::cmd::Command::CreateWorkspace { name: "demo".to_string(), repo_path: "/tmp/demo".into() });
    harness.next().await;
    let workspace_id = harness.model.workspaces[0].id.clone();

    harness.dispatch(fleet_tui::cmd::Command::StartSession {
        request: StartSessionRequest { workspace_id, worktree_id: None, provider: Provider::from("codex"), initial_message: None },
    });
    let commands = harness.next().await;
    for command in commands {
        harness.dispatch(command);
    }
    harness.settle().await;
    harness.model.selection.active_session_id.clone().expect("session selected")
}

#[tokio::test]
async fn typing_then_sending_clears_the_draft_and_appends_to_the_transcript() {
    let mut harness = Harness::new();
    let session_id = start_session(&mut harness).await;

    fleet_tui::reducer::reduce(&mut harness.model, fleet_tui::msg::Msg::Key(key(KeyCode::Char('c'))));
    assert!(harness.model.mode.is_compose());

    for ch in "hello".chars() {
        fleet_tui::reducer::reduce(&mut harness.model, fleet_tui::msg::Msg::Key(key(KeyCode::Char(ch))));
    }
    assert_eq!(harness.model.compose_input, "hello");

    let commands = fleet_tui::reducer::reduce(&mut harness.model, fleet_tui::msg::Msg::Key(key(KeyCode::Enter)));
    assert!(harness.model.mode.is_normal());
    assert!(harness.model.compose_input.is_empty());

    for command in commands {
        harness.dispatch(command);
    }
    harness.settle().await;

    assert!(harness.model.last_error.is_none());
    let _ = session_id;
}

#[tokio::test]
async fn sending_without_an_active_session_does_not_dispatch_a_message_command() {
    let mut harness = Harness::new();
    harness.model.mode = fleet_tui::mode::Mode::Compose;
    harness.model.compose_input = "orphaned draft".to_string();

    let commands = fleet_tui::reducer::reduce(&mut harness.model, fleet_tui::msg::Msg::Key(key(KeyCode::Enter)));

    assert!(commands.iter().all(|c| !matches!(c, fleet_tui::cmd::Command::SendMessage { .. })));
    assert!(harness.model.mode.is_compose());
    assert_eq!(harness.model.compose_input, "orphaned draft");
}

#[tokio::test]
async fn send_message_command_round_trips_through_memory_backend() {
    let mut harness = Harness::new();
    let session_id = start_session(&mut harness).await;

    harness.dispatch(fleet_tui::cmd::Command::SendMessage {
        request: SendMessageRequest { session_id: session_id.clone(), text: "ping".to_string(), send_token: 1 },
    });
    harness.next().await;

    assert!(harness.model.last_error.is_none());
}
