use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::ids::SessionId;

/// Tracks whether a session currently has an "in-flight turn", driving
/// auto-refresh and auto-expand-reasoning. At most one concurrently active
/// entry exists per the invariant in the data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestActivity {
    pub session_id: SessionId,
    pub active: bool,
    pub last_event_at: DateTime<Utc>,
    pub total_events: u64,
    pub visible_since: Option<DateTime<Utc>>,
}

impl RequestActivity {
    pub fn idle(session_id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            session_id,
            active: false,
            last_event_at: now,
            total_events: 0,
            visible_since: None,
        }
    }
}
