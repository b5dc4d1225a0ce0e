use derive_more::IsVariant;
use strum_macros::Display;

/// The reducer's mode machine (§4.1). Initial state is `Normal`; there is no
/// terminal state — the process exits only on an explicit quit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IsVariant)]
pub enum Mode {
    Normal,
    Compose,
    Search,
    AddWorkspace,
    AddWorkspaceGroup,
    AddWorktree,
    PickProvider,
    ApprovalResponse,
    Notes,
    AddNote,
    RenameWorkspace,
    RenameWorktree,
    RenameSession,
    RenameWorkspaceGroup,
    PickWorkspaceRename,
    PickWorkspaceGroupEdit,
    PickWorkspaceGroupRename,
    PickWorkspaceGroupAssign,
    PickWorkspaceGroupDelete,
    EditWorkspaceGroups,
    AssignGroupWorkspaces,
    Recents,
    PickNoteMoveTarget,
    PickNoteMoveWorktree,
    PickNoteMoveSession,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Normal
    }
}

impl Mode {
    /// Whether this mode owns a modal text-entry/picker surface, i.e. it is
    /// not `Normal` and not a key-routing passthrough mode. Used by the
    /// dispatch order (§4.1 step 6) to decide whether to try the mode-specific
    /// reducer before falling through to global keys.
    pub fn is_modal(self) -> bool {
        !matches!(self, Mode::Normal)
    }
}
