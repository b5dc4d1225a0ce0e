//! Structured-event stream controller for providers that emit text deltas,
//! turn lifecycle markers, and approval requests/resolutions on one channel,
//! coalescing consecutive deltas the way the plain-text controller does.

use fleet_backend::CodexEvent;
use fleet_backend::CodexReceiver;
use fleet_protocol::ChatBlockRole;

use crate::approvals::ApprovalRegistry;
use crate::approvals::resolution_summary;
use crate::transcript::Transcript;

use super::ConsumeOutcome;

pub struct CodexController {
    receiver: CodexReceiver,
}

impl CodexController {
    pub fn new(receiver: CodexReceiver) -> Self {
        Self { receiver }
    }

    pub fn consume_tick(
        &mut self,
        session_id: &fleet_protocol::SessionId,
        transcript: &mut Transcript,
        approvals: &mut ApprovalRegistry,
        max_per_tick: usize,
    ) -> ConsumeOutcome {
        let mut outcome = ConsumeOutcome::default();
        for _ in 0..max_per_tick {
            match self.receiver.try_recv() {
                Ok(CodexEvent::AgentTextDelta(text)) => {
                    transcript.append_or_start(ChatBlockRole::Agent, &text);
                    outcome.applied += 1;
                }
                Ok(CodexEvent::ReasoningTextDelta(text)) => {
                    transcript.append_or_start(ChatBlockRole::Reasoning, &text);
                    outcome.applied += 1;
                }
                Ok(CodexEvent::TurnStarted) => {
                    outcome.applied += 1;
                }
                Ok(CodexEvent::TurnCompleted) => {
                    outcome.applied += 1;
                }
                Ok(CodexEvent::ApprovalRequested(request)) => {
                    transcript.upsert_correlated(request.request_id.as_str(), ChatBlockRole::Approval, request.summary.clone());
                    approvals.push(session_id.clone(), request);
                    outcome.applied += 1;
                }
                Ok(CodexEvent::ApprovalResolved(resolution)) => {
                    approvals.resolve(session_id, &resolution.request_id);
                    let text = resolution_summary(resolution.decision, resolution.response_text.as_deref());
                    transcript.upsert_correlated(resolution.request_id.as_str(), ChatBlockRole::Approval, text);
                    outcome.applied += 1;
                }
                Ok(CodexEvent::Closed) => {
                    outcome.closed = true;
                    break;
                }
                Ok(CodexEvent::Error(message)) => {
                    transcript.mark_closed_with_error(message);
                    outcome.closed = true;
                    break;
                }
                Err(_) => break,
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fleet_protocol::ApprovalRequest;
    use fleet_protocol::RequestId;
    use fleet_protocol::SessionId;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test]
    async fn approval_request_adds_to_registry_and_transcript() {
        let (tx, rx) = unbounded_channel();
        let session_id = SessionId::new("s1");
        tx.send(CodexEvent::ApprovalRequested(ApprovalRequest {
            request_id: RequestId::new("r1"),
            session_id: session_id.clone(),
            summary: "run rm -rf".into(),
            detail: "details".into(),
            needs_response_text: false,
            created_at: Utc::now(),
        }))
        .unwrap();
        let mut controller = CodexController::new(rx);
        let mut transcript = Transcript::default();
        let mut approvals = ApprovalRegistry::default();
        controller.consume_tick(&session_id, &mut transcript, &mut approvals, 10);
        assert!(approvals.has_pending(&session_id));
        assert_eq!(transcript.blocks.len(), 1);
    }

    #[tokio::test]
    async fn consecutive_text_deltas_coalesce_into_one_block() {
        let (tx, rx) = unbounded_channel();
        let session_id = SessionId::new("s1");
        tx.send(CodexEvent::AgentTextDelta("Hel".into())).unwrap();
        tx.send(CodexEvent::AgentTextDelta("lo".into())).unwrap();
        let mut controller = CodexController::new(rx);
        let mut transcript = Transcript::default();
        let mut approvals = ApprovalRegistry::default();
        controller.consume_tick(&session_id, &mut transcript, &mut approvals, 10);
        assert_eq!(transcript.blocks.len(), 1);
        assert_eq!(transcript.blocks[0].text, "Hello");
    }
}
