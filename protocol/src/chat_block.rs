use std::hash::Hash;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ChatBlockRole {
    User,
    Agent,
    Reasoning,
    Meta,
    SystemNotice,
    Approval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChatBlockStatus {
    #[default]
    None,
    Sending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBlock {
    pub id: String,
    pub role: ChatBlockRole,
    pub text: String,
    pub collapsed: Option<bool>,
    pub status: ChatBlockStatus,
    pub timestamp: Option<DateTime<Utc>>,
    pub correlation_id: Option<String>,
}

impl ChatBlock {
    /// A stable id derived from role + index + text, used when the Backend
    /// does not supply one. Stability across snapshots is required so that
    /// per-block collapse state, keyed by this id, survives a re-snapshot of
    /// the same logical block.
    pub fn derive_stable_id(role: ChatBlockRole, index: usize, text: &str) -> String {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        role.hash(&mut hasher);
        index.hash(&mut hasher);
        text.hash(&mut hasher);
        format!("blk-{:016x}", hasher.finish())
    }

    pub fn is_reasoning(&self) -> bool {
        matches!(self.role, ChatBlockRole::Reasoning)
    }
}
