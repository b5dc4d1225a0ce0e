use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::ids::WorkspaceGroupId;
use crate::ids::WorkspaceId;
use crate::ids::WorktreeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub repo_path: PathBuf,
    pub group_ids: Vec<WorkspaceGroupId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceGroup {
    pub id: WorkspaceGroupId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worktree {
    pub id: WorktreeId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub path: PathBuf,
}

/// A worktree discovered on disk but not yet registered with the Backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableWorktree {
    pub name: String,
    pub path: PathBuf,
}
