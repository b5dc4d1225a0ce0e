use std::collections::HashMap;
use std::collections::VecDeque;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

use crate::ids::SessionId;
use crate::ids::WorkspaceGroupId;
use crate::ids::WorkspaceId;
use crate::ids::WorktreeId;
use crate::session::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TimestampMode {
    Absolute,
    #[default]
    Relative,
    None,
}

/// Persisted, Backend-authoritative application state. The reducer treats
/// this as an opaque structured record: fields are read/written wholesale on
/// debounced save (see the `tui` crate's `persistence` module) and merged
/// back verbatim from the Backend's normalized response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub active_workspace_id: Option<WorkspaceId>,
    pub active_worktree_id: Option<WorktreeId>,
    pub active_group_ids: Vec<WorkspaceGroupId>,
    pub sidebar_collapsed: bool,
    pub sidebar_workspace_expanded: HashMap<WorkspaceId, bool>,
    pub sidebar_worktree_expanded: HashMap<WorktreeId, bool>,
    pub compose_history: HashMap<SessionId, VecDeque<String>>,
    pub compose_drafts: HashMap<SessionId, String>,
    pub note_drafts: HashMap<String, String>,
    pub provider_badges: HashMap<Provider, String>,
    pub ui_timestamp_mode: TimestampMode,
    pub sidebar_show_recents: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_workspace_id: None,
            active_worktree_id: None,
            active_group_ids: Vec::new(),
            sidebar_collapsed: false,
            sidebar_workspace_expanded: HashMap::new(),
            sidebar_worktree_expanded: HashMap::new(),
            compose_history: HashMap::new(),
            compose_drafts: HashMap::new(),
            note_drafts: HashMap::new(),
            provider_badges: HashMap::new(),
            ui_timestamp_mode: TimestampMode::default(),
            sidebar_show_recents: true,
        }
    }
}
