use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

use crate::ids::SessionId;
use crate::ids::WorkspaceId;
use crate::ids::WorktreeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Idle,
    Exited,
    Error,
}

impl SessionStatus {
    /// `isActive ⇔ status ∈ {active, idle}`.
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Active | SessionStatus::Idle)
    }
}

/// Agent backend identifier. Drives the capability lookup in the reducer
/// (see `ProviderCapabilities`); the set of known providers is open-ended so
/// this is a newtype rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provider(pub String);

impl Provider {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Provider {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub uses_items_stream: bool,
    pub supports_events: bool,
    pub supports_approvals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub provider: Provider,
    pub status: SessionStatus,
    pub title: String,
    pub workspace_id: Option<WorkspaceId>,
    pub worktree_id: Option<WorktreeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub session_id: SessionId,
    pub workspace_id: Option<WorkspaceId>,
    pub worktree_id: Option<WorktreeId>,
    pub last_active_at: Option<DateTime<Utc>>,
    pub last_turn_id: Option<String>,
}
