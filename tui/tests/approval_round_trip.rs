//! Resolving a pending approval removes it from the registry once the
//! Backend confirms the decision (§4.2, §8's "approval round-trip"
//! scenario). The approval is seeded directly into the registry rather than
//! through `MemoryBackend`, since its pending-approval state is private to
//! the crate and only reachable through `fetch_approvals`/`start_session`.

mod support;

use chrono::Utc;
use fleet_backend::ApprovalDecisionRequest;
use fleet_protocol::ApprovalDecision;
use fleet_protocol::ApprovalRequest;
use fleet_protocol::RequestId;
use fleet_protocol::SessionId;
use support::Harness;

fn request(id: &str, session_id: &SessionId) -> ApprovalRequest {
    ApprovalRequest {
        request_id: RequestId::new(id),
        session_id: session_id.clone(),
        summary: "run a command".to_string(),
        detail: "rm -rf build/".to_string(),
        needs_response_text: false,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn accepting_a_pending_approval_clears_it_from_the_registry() {
    let mut harness = Harness::new();
    let session_id = SessionId::new("s1");
    harness.model.approvals.push(session_id.clone(), request("r1", &session_id));
    assert!(harness.model.approvals.has_pending(&session_id));

    harness.dispatch(fleet_tui::cmd::Command::ResolveApproval {
        request: ApprovalDecisionRequest {
            session_id: session_id.clone(),
            request_id: RequestId::new("r1"),
            decision: ApprovalDecision::Accept,
            response_text: None,
        },
    });
    harness.next().await;

    assert!(!harness.model.approvals.has_pending(&session_id));
    assert!(harness.model.last_error.is_none());
}

#[tokio::test]
async fn resolving_an_unknown_request_id_is_a_harmless_backend_no_op() {
    let mut harness = Harness::new();
    let session_id = SessionId::new("s1");

    harness.dispatch(fleet_tui::cmd::Command::ResolveApproval {
        request: ApprovalDecisionRequest {
            session_id: session_id.clone(),
            request_id: RequestId::new("ghost"),
            decision: ApprovalDecision::Decline,
            response_text: Some("no".to_string()),
        },
    });
    harness.next().await;

    assert!(harness.model.last_error.is_none());
    assert!(!harness.model.approvals.has_pending(&session_id));
}
