use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

use crate::ids::RequestId;
use crate::ids::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub request_id: RequestId,
    pub session_id: SessionId,
    pub summary: String,
    pub detail: String,
    pub needs_response_text: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Accept,
    Decline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalResolution {
    pub request_id: RequestId,
    pub session_id: SessionId,
    pub decision: ApprovalDecision,
    pub response_text: Option<String>,
    pub resolved_at: DateTime<Utc>,
}
