//! Right-click / long-press context menu model (§4's mouse routing). A menu
//! is anchored at the row it was opened on and holds a fixed action list for
//! that row kind; selecting an action closes the menu and yields a `Msg`-
//! producing side effect through the normal reducer path.

use crate::sidebar::RowKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    Rename,
    Dismiss,
    Kill,
    Delete,
    AddWorktree,
    AddNote,
}

#[derive(Debug, Clone)]
pub struct ContextMenu {
    pub anchor: RowKey,
    pub actions: Vec<ContextAction>,
    pub highlighted: usize,
}

impl ContextMenu {
    pub fn for_row(row: &crate::sidebar::SidebarRow) -> Option<Self> {
        let (anchor, actions) = match row {
            crate::sidebar::SidebarRow::Workspace { id, .. } => {
                (RowKey::Workspace(id.clone()), vec![ContextAction::Rename, ContextAction::AddWorktree, ContextAction::AddNote, ContextAction::Delete])
            }
            crate::sidebar::SidebarRow::Worktree { id, .. } => {
                (RowKey::Worktree(id.clone()), vec![ContextAction::Rename, ContextAction::AddNote, ContextAction::Delete])
            }
            crate::sidebar::SidebarRow::Session { id, .. } => {
                (RowKey::Session(id.clone()), vec![ContextAction::Rename, ContextAction::AddNote, ContextAction::Dismiss, ContextAction::Kill])
            }
            _ => return None,
        };
        Some(Self { anchor, actions, highlighted: 0 })
    }

    pub fn move_highlight(&mut self, delta: isize) {
        if self.actions.is_empty() {
            return;
        }
        let len = self.actions.len() as isize;
        self.highlighted = ((self.highlighted as isize + delta).rem_euclid(len)) as usize;
    }

    pub fn selected_action(&self) -> Option<ContextAction> {
        self.actions.get(self.highlighted).copied()
    }
}
