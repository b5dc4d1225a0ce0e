//! Pending-approval registry (§4.2's approval handling, §8 scenario "approval
//! round-trip"). Distinct from the transcript: a request is pending here
//! until resolved, after which its resolution is spliced into the transcript
//! by correlation id and the entry is dropped from this registry.

use std::collections::HashMap;

use fleet_protocol::ApprovalDecision;
use fleet_protocol::ApprovalRequest;
use fleet_protocol::RequestId;
use fleet_protocol::SessionId;

#[derive(Debug, Clone, Default)]
pub struct ApprovalRegistry {
    pending: HashMap<SessionId, Vec<ApprovalRequest>>,
}

impl ApprovalRegistry {
    pub fn set_pending(&mut self, session_id: SessionId, requests: Vec<ApprovalRequest>) {
        self.pending.insert(session_id, requests);
    }

    pub fn push(&mut self, session_id: SessionId, request: ApprovalRequest) {
        self.pending.entry(session_id).or_default().push(request);
    }

    pub fn pending_for(&self, session_id: &SessionId) -> &[ApprovalRequest] {
        self.pending.get(session_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_pending(&self, session_id: &SessionId) -> bool {
        !self.pending_for(session_id).is_empty()
    }

    pub fn next_pending(&self, session_id: &SessionId) -> Option<&ApprovalRequest> {
        self.pending_for(session_id).first()
    }

    /// Removes the request by id, returning it so the caller can splice its
    /// resolution into the transcript. `None` if it was already removed
    /// (e.g. a duplicate resolution message arrived).
    pub fn resolve(&mut self, session_id: &SessionId, request_id: &RequestId) -> Option<ApprovalRequest> {
        let list = self.pending.get_mut(session_id)?;
        let index = list.iter().position(|r| &r.request_id == request_id)?;
        Some(list.remove(index))
    }

    pub fn clear_session(&mut self, session_id: &SessionId) {
        self.pending.remove(session_id);
    }
}

pub fn resolution_summary(decision: ApprovalDecision, response_text: Option<&str>) -> String {
    match (decision, response_text) {
        (ApprovalDecision::Accept, Some(text)) if !text.is_empty() => format!("Approved: {text}"),
        (ApprovalDecision::Accept, _) => "Approved".to_string(),
        (ApprovalDecision::Decline, Some(text)) if !text.is_empty() => format!("Declined: {text}"),
        (ApprovalDecision::Decline, _) => "Declined".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(id: &str) -> ApprovalRequest {
        ApprovalRequest {
            request_id: RequestId::new(id),
            session_id: SessionId::new("s1"),
            summary: "do thing".into(),
            detail: "detail".into(),
            needs_response_text: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn resolve_removes_and_returns_the_matching_request() {
        let mut registry = ApprovalRegistry::default();
        let session_id = SessionId::new("s1");
        registry.push(session_id.clone(), request("r1"));
        registry.push(session_id.clone(), request("r2"));
        let resolved = registry.resolve(&session_id, &RequestId::new("r1"));
        assert!(resolved.is_some());
        assert_eq!(registry.pending_for(&session_id).len(), 1);
        assert_eq!(registry.pending_for(&session_id)[0].request_id.as_str(), "r2");
    }

    #[test]
    fn resolving_unknown_request_is_a_no_op() {
        let mut registry = ApprovalRegistry::default();
        let session_id = SessionId::new("s1");
        registry.push(session_id.clone(), request("r1"));
        let resolved = registry.resolve(&session_id, &RequestId::new("missing"));
        assert!(resolved.is_none());
        assert_eq!(registry.pending_for(&session_id).len(), 1);
    }
}
