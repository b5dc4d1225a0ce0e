//! Switching the active session quickly bumps `selectSeq` on every
//! selection, and results that land for a session the user has since
//! navigated away from are dropped: `pending_session_key` only ever names
//! the most recently requested session, so a `HistoryFetched` tagged with
//! an older id is discarded rather than merged (§4's selection-debounce
//! invariant).

mod support;

use fleet_protocol::ChatBlock;
use fleet_protocol::ChatBlockRole;
use fleet_protocol::ChatBlockStatus;
use fleet_protocol::SessionId;
use support::Harness;

fn block(text: &str) -> ChatBlock {
    ChatBlock {
        id: "b1".to_string(),
        role: ChatBlockRole::Agent,
        text: text.to_string(),
        collapsed: None,
        status: ChatBlockStatus::None,
        timestamp: None,
        correlation_id: None,
    }
}

#[tokio::test]
async fn a_late_history_fetch_for_a_deselected_session_is_dropped() {
    let mut harness = Harness::new();
    let first = SessionId::new("s1");
    let second = SessionId::new("s2");

    // Both selections land, but only `second` is the one actually loading.
    harness.model.selection.select_session(first.clone());
    harness.model.selection.select_session(second.clone());
    harness.model.pending_session_key = Some(second.clone());

    fleet_tui::reducer::reduce(
        &mut harness.model,
        fleet_tui::msg::Msg::HistoryFetched { session_id: first.clone(), result: Ok(vec![block("stale")]) },
    );

    assert!(harness.model.transcripts.get(&first).is_none(), "history for a deselected session must not be merged");

    fleet_tui::reducer::reduce(
        &mut harness.model,
        fleet_tui::msg::Msg::HistoryFetched { session_id: second.clone(), result: Ok(vec![block("current")]) },
    );
    let transcript = harness.model.transcripts.get(&second).expect("history merged for the pending session");
    assert_eq!(transcript.blocks[0].text, "current");
}

#[tokio::test]
async fn reselecting_the_same_session_still_bumps_the_sequence() {
    let mut harness = Harness::new();
    let session_id = SessionId::new("s1");
    let first = harness.model.selection.select_session(session_id.clone());
    let second = harness.model.selection.select_session(session_id);
    assert_ne!(first, second, "re-selecting still bumps selectSeq even when the session is unchanged");
}

#[tokio::test]
async fn only_the_last_of_several_rapid_selections_ends_up_loading() {
    let mut harness = Harness::new();
    let sessions: Vec<SessionId> = (0..5).map(|n| SessionId::new(&format!("s{n}"))).collect();

    let mut last_seq = None;
    for id in &sessions {
        harness.dispatch(fleet_tui::cmd::Command::DebouncedSessionLoad { id: id.clone(), select_seq: harness.model.selection.select_session(id.clone()) });
        last_seq = Some(harness.model.selection.select_seq);
    }

    harness.settle().await;

    assert_eq!(harness.model.pending_session_key, Some(sessions.last().unwrap().clone()));
    assert!(harness.model.selection.is_current(last_seq.unwrap()));
}
