//! Sidebar projection & selection (§4.2): filters workspaces/worktrees/
//! sessions by active group(s), flattens into addressable rows, and tracks
//! the cursor. Rebuilt lazily via a revision counter rather than on every
//! write: a derived view is cached and invalidated by reason rather than
//! recomputed on every mutation.

use std::collections::HashMap;

use fleet_protocol::Session;
use fleet_protocol::SessionMeta;
use fleet_protocol::Workspace;
use fleet_protocol::WorkspaceId;
use fleet_protocol::Worktree;
use fleet_protocol::WorktreeId;
use fleet_protocol::ids::UNGROUPED_GROUP;
use fleet_protocol::session::SessionStatus;
use itertools::Itertools;
use strum_macros::Display;

/// A reason a write can invalidate the sidebar projection. Kept as an enum
/// (rather than a single dirty bit) purely so call sites self-document why
/// they're bumping the revision; the reducer does not currently branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidationReason {
    Workspace,
    Worktree,
    Sessions,
    Group,
    DismissedFlag,
    AppState,
}

/// Addressable identity of a single sidebar row. Stable across rebuilds so
/// the cursor position can survive a projection refresh by key comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum RowKey {
    #[strum(to_string = "recents:all")]
    RecentsAll,
    #[strum(to_string = "recents:ready")]
    RecentsReady,
    #[strum(to_string = "recents:running")]
    RecentsRunning,
    #[strum(to_string = "workspace:{0}")]
    Workspace(WorkspaceId),
    #[strum(to_string = "worktree:{0}")]
    Worktree(WorktreeId),
    #[strum(to_string = "session:{0}")]
    Session(fleet_protocol::SessionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    RecentsAll,
    RecentsReady,
    RecentsRunning,
    Workspace { id: WorkspaceId, name: String, expanded: bool },
    Worktree { id: WorktreeId, workspace_id: WorkspaceId, name: String, expanded: bool },
    Session { id: fleet_protocol::SessionId, workspace_id: Option<WorkspaceId>, worktree_id: Option<WorktreeId>, title: String, status: SessionStatus },
}

impl SidebarRow {
    pub fn key(&self) -> RowKey {
        match self {
            SidebarRow::RecentsAll => RowKey::RecentsAll,
            SidebarRow::RecentsReady => RowKey::RecentsReady,
            SidebarRow::RecentsRunning => RowKey::RecentsRunning,
            SidebarRow::Workspace { id, .. } => RowKey::Workspace(id.clone()),
            SidebarRow::Worktree { id, .. } => RowKey::Worktree(id.clone()),
            SidebarRow::Session { id, .. } => RowKey::Session(id.clone()),
        }
    }

    pub fn is_expandable(&self) -> bool {
        matches!(self, SidebarRow::Workspace { .. } | SidebarRow::Worktree { .. })
    }
}

/// Inputs needed to rebuild the projection. Borrowed rather than owned by
/// the projection itself, since the Model is the source of truth.
pub struct ProjectionInputs<'a> {
    pub workspaces: &'a [Workspace],
    pub worktrees: &'a [Worktree],
    pub sessions: &'a [Session],
    pub session_meta: &'a HashMap<fleet_protocol::SessionId, SessionMeta>,
    pub active_group_ids: &'a [String],
    pub show_dismissed: bool,
    pub show_recents: bool,
    pub workspace_expanded: &'a HashMap<WorkspaceId, bool>,
    pub worktree_expanded: &'a HashMap<WorktreeId, bool>,
}

#[derive(Debug, Default)]
pub struct SidebarProjection {
    pub revision: u64,
    pub applied_revision: u64,
    rows: Vec<SidebarRow>,
}

impl SidebarProjection {
    pub fn invalidate(&mut self, _reason: InvalidationReason) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn is_stale(&self) -> bool {
        self.applied_revision != self.revision
    }

    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    /// Rebuild iff stale; returns whether a rebuild happened.
    pub fn rebuild_if_stale(&mut self, inputs: &ProjectionInputs<'_>) -> bool {
        if !self.is_stale() {
            return false;
        }
        self.rows = build_rows(inputs);
        self.applied_revision = self.revision;
        true
    }
}

fn workspace_visible(workspace: &Workspace, active_group_ids: &[String]) -> bool {
    if workspace.group_ids.is_empty() {
        return active_group_ids.iter().any(|g| g == UNGROUPED_GROUP);
    }
    workspace.group_ids.iter().any(|g| active_group_ids.iter().any(|a| a == g.as_str()))
}

fn build_rows(inputs: &ProjectionInputs<'_>) -> Vec<SidebarRow> {
    let mut rows = Vec::new();
    if inputs.show_recents {
        rows.push(SidebarRow::RecentsAll);
        rows.push(SidebarRow::RecentsReady);
        rows.push(SidebarRow::RecentsRunning);
    }

    let visible_workspaces: HashMap<&WorkspaceId, &Workspace> = inputs
        .workspaces
        .iter()
        .filter(|w| workspace_visible(w, inputs.active_group_ids))
        .map(|w| (&w.id, w))
        .collect();

    let sorted_workspaces: Vec<&Workspace> = visible_workspaces.values().copied().sorted_by_key(|w| &w.name).collect();

    for workspace in sorted_workspaces {
        let expanded = *inputs.workspace_expanded.get(&workspace.id).unwrap_or(&true);
        rows.push(SidebarRow::Workspace { id: workspace.id.clone(), name: workspace.name.clone(), expanded });
        if !expanded {
            continue;
        }

        let worktrees: Vec<&Worktree> =
            inputs.worktrees.iter().filter(|w| w.workspace_id == workspace.id).sorted_by_key(|w| &w.name).collect();

        for worktree in &worktrees {
            let wt_expanded = *inputs.worktree_expanded.get(&worktree.id).unwrap_or(&true);
            rows.push(SidebarRow::Worktree {
                id: worktree.id.clone(),
                workspace_id: workspace.id.clone(),
                name: worktree.name.clone(),
                expanded: wt_expanded,
            });
            if wt_expanded {
                rows.extend(sessions_for(inputs, Some(&worktree.id), None));
            }
        }

        rows.extend(sessions_for(inputs, None, Some(&workspace.id)));
    }

    if inputs.active_group_ids.iter().any(|g| g == UNGROUPED_GROUP) {
        rows.extend(unassigned_sessions(inputs));
    }

    rows
}

fn session_visible(session: &Session, show_dismissed: bool) -> bool {
    show_dismissed || session.status != SessionStatus::Exited
}

fn sessions_for<'a>(
    inputs: &ProjectionInputs<'a>,
    worktree_id: Option<&WorktreeId>,
    workspace_id_if_no_worktree: Option<&WorkspaceId>,
) -> Vec<SidebarRow> {
    let mut matches: Vec<&Session> = inputs
        .sessions
        .iter()
        .filter(|s| session_visible(s, inputs.show_dismissed))
        .filter(|s| match worktree_id {
            Some(wt) => s.worktree_id.as_ref() == Some(wt),
            None => s.worktree_id.is_none() && s.workspace_id.as_ref() == workspace_id_if_no_worktree,
        })
        .collect();
    sort_sessions(&mut matches, inputs.session_meta);
    matches
        .into_iter()
        .map(|s| SidebarRow::Session {
            id: s.id.clone(),
            workspace_id: s.workspace_id.clone(),
            worktree_id: s.worktree_id.clone(),
            title: s.title.clone(),
            status: s.status,
        })
        .collect()
}

fn unassigned_sessions(inputs: &ProjectionInputs<'_>) -> Vec<SidebarRow> {
    let known_workspace_ids: std::collections::HashSet<&WorkspaceId> = inputs.workspaces.iter().map(|w| &w.id).collect();
    let mut matches: Vec<&Session> = inputs
        .sessions
        .iter()
        .filter(|s| session_visible(s, inputs.show_dismissed))
        .filter(|s| s.worktree_id.is_none())
        .filter(|s| match &s.workspace_id {
            None => true,
            Some(id) => !known_workspace_ids.contains(id),
        })
        .collect();
    sort_sessions(&mut matches, inputs.session_meta);
    matches
        .into_iter()
        .map(|s| SidebarRow::Session {
            id: s.id.clone(),
            workspace_id: s.workspace_id.clone(),
            worktree_id: s.worktree_id.clone(),
            title: s.title.clone(),
            status: s.status,
        })
        .collect()
}

fn sort_sessions(sessions: &mut [&Session], session_meta: &HashMap<fleet_protocol::SessionId, SessionMeta>) {
    sessions.sort_by(|a, b| {
        let a_time = session_meta.get(&a.id).and_then(|m| m.last_active_at);
        let b_time = session_meta.get(&b.id).and_then(|m| m.last_active_at);
        b_time.cmp(&a_time).then_with(|| a.id.as_str().cmp(b.id.as_str()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_protocol::Provider;
    use fleet_protocol::SessionId;
    use std::path::PathBuf;

    fn workspace(id: &str, name: &str, groups: &[&str]) -> Workspace {
        Workspace {
            id: WorkspaceId::new(id),
            name: name.to_string(),
            repo_path: PathBuf::from("/tmp"),
            group_ids: groups.iter().map(|g| fleet_protocol::WorkspaceGroupId::new(*g)).collect(),
        }
    }

    fn session(id: &str, workspace_id: &str, status: SessionStatus) -> Session {
        Session {
            id: SessionId::new(id),
            provider: Provider::from("codex"),
            status,
            title: id.to_string(),
            workspace_id: Some(WorkspaceId::new(workspace_id)),
            worktree_id: None,
        }
    }

    #[test]
    fn hides_exited_sessions_unless_show_dismissed() {
        let workspaces = vec![workspace("ws1", "Alpha", &[])];
        let worktrees = vec![];
        let sessions = vec![session("s1", "ws1", SessionStatus::Idle), session("s2", "ws1", SessionStatus::Exited)];
        let meta = HashMap::new();
        let workspace_expanded = HashMap::new();
        let worktree_expanded = HashMap::new();
        let active_groups = vec![UNGROUPED_GROUP.to_string()];
        let inputs = ProjectionInputs {
            workspaces: &workspaces,
            worktrees: &worktrees,
            sessions: &sessions,
            session_meta: &meta,
            active_group_ids: &active_groups,
            show_dismissed: false,
            show_recents: false,
            workspace_expanded: &workspace_expanded,
            worktree_expanded: &worktree_expanded,
        };
        let mut projection = SidebarProjection::default();
        projection.invalidate(InvalidationReason::Sessions);
        projection.rebuild_if_stale(&inputs);
        let session_rows: Vec<_> = projection.rows().iter().filter(|r| matches!(r, SidebarRow::Session { .. })).collect();
        assert_eq!(session_rows.len(), 1);
    }

    #[test]
    fn workspace_without_groups_only_visible_when_ungrouped_active() {
        let workspaces = vec![workspace("ws1", "Alpha", &[])];
        let meta = HashMap::new();
        let workspace_expanded = HashMap::new();
        let worktree_expanded = HashMap::new();
        let worktrees = vec![];
        let sessions = vec![];
        let inputs = ProjectionInputs {
            workspaces: &workspaces,
            worktrees: &worktrees,
            sessions: &sessions,
            session_meta: &meta,
            active_group_ids: &[],
            show_dismissed: false,
            show_recents: false,
            workspace_expanded: &workspace_expanded,
            worktree_expanded: &worktree_expanded,
        };
        let mut projection = SidebarProjection::default();
        projection.invalidate(InvalidationReason::Group);
        projection.rebuild_if_stale(&inputs);
        assert!(projection.rows().is_empty());
    }

    #[test]
    fn rebuild_is_a_no_op_when_not_stale() {
        let mut projection = SidebarProjection::default();
        let workspaces = vec![];
        let worktrees = vec![];
        let sessions = vec![];
        let meta = HashMap::new();
        let workspace_expanded = HashMap::new();
        let worktree_expanded = HashMap::new();
        let inputs = ProjectionInputs {
            workspaces: &workspaces,
            worktrees: &worktrees,
            sessions: &sessions,
            session_meta: &meta,
            active_group_ids: &[],
            show_dismissed: false,
            show_recents: false,
            workspace_expanded: &workspace_expanded,
            worktree_expanded: &worktree_expanded,
        };
        assert!(!projection.rebuild_if_stale(&inputs));
    }
}
