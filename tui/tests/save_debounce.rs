//! `DebouncedSave` actually reaches the Backend (not just the reducer's
//! token bookkeeping), and a stale completion for a token a later save has
//! superseded is swallowed rather than surfaced as an error (§3/§4.10, §8's
//! "save debounce" scenario).

mod support;

use fleet_protocol::TimestampMode;
use support::Harness;

#[tokio::test]
async fn a_debounced_save_persists_app_state_to_the_backend() {
    let mut harness = Harness::new();
    harness.model.app_state.ui_timestamp_mode = TimestampMode::Absolute;

    let token = harness.model.save_debouncer.schedule();
    harness.dispatch(fleet_tui::cmd::Command::DebouncedSave { state: harness.model.app_state.clone(), save_token: token });
    harness.next().await;

    assert!(harness.model.last_error.is_none());

    harness.dispatch(fleet_tui::cmd::Command::ReadAppState);
    harness.next().await;
    assert_eq!(harness.model.app_state.ui_timestamp_mode, TimestampMode::Absolute);
}

#[tokio::test]
async fn a_stale_save_completion_is_dropped_once_a_newer_one_is_scheduled() {
    let mut harness = Harness::new();
    let stale_token = harness.model.save_debouncer.schedule();
    let _current_token = harness.model.save_debouncer.schedule();

    fleet_tui::reducer::reduce(
        &mut harness.model,
        fleet_tui::msg::Msg::AppStateSaved { save_token: stale_token, result: Err(fleet_backend::BackendError::NotFound("state".to_string())) },
    );

    assert!(harness.model.last_error.is_none(), "a superseded save's error should not surface");
}

#[tokio::test]
async fn an_immediate_save_flush_reports_a_backend_error() {
    let mut harness = Harness::new();
    let token = harness.model.save_debouncer.schedule();

    fleet_tui::reducer::reduce(
        &mut harness.model,
        fleet_tui::msg::Msg::AppStateSaved { save_token: token, result: Err(fleet_backend::BackendError::NotFound("state".to_string())) },
    );

    assert!(harness.model.last_error.is_some());
}
