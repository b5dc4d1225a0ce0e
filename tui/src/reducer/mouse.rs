//! Reduces routed mouse targets (§4.3) into selection/context-menu changes.

use crate::cmd::Commands;
use crate::context_menu::ContextMenu;
use crate::model::Model;
use crate::mouse::MouseTarget;
use crate::mouse::row_key_at;
use crate::sidebar::RowKey;

pub fn reduce(model: &mut Model, event: crossterm::event::MouseEvent) -> Commands {
    let target = crate::mouse::route(event, &model.layout.clone());
    match target {
        MouseTarget::SidebarRow(index) => {
            let rows = model.sidebar.rows().to_vec();
            if let Some(key) = row_key_at(&model.layout, &rows, index) {
                apply_row_selection(model, key);
            }
            Commands::new()
        }
        MouseTarget::ScrollUp => {
            let rows = model.sidebar.rows().to_vec();
            model.selection.move_cursor(&rows, -1);
            Commands::new()
        }
        MouseTarget::ScrollDown => {
            let rows = model.sidebar.rows().to_vec();
            model.selection.move_cursor(&rows, 1);
            Commands::new()
        }
        MouseTarget::Compose | MouseTarget::Transcript { .. } | MouseTarget::Outside => Commands::new(),
    }
}

fn apply_row_selection(model: &mut Model, key: RowKey) {
    model.context_menu = None;
    match key {
        RowKey::Session(id) => {
            let seq = model.selection.select_session(id.clone());
            let _ = seq;
        }
        RowKey::Workspace(id) => model.selection.set_cursor_to_workspace(id),
        RowKey::Worktree(id) => model.selection.set_cursor_to_worktree(id),
        other => model.selection.cursor = Some(other),
    }
}

pub fn open_context_menu(model: &mut Model) {
    if let Some(cursor) = model.selection.cursor.clone() {
        if let Some(row) = model.sidebar.rows().iter().find(|r| r.key() == cursor) {
            model.context_menu = ContextMenu::for_row(row);
        }
    }
}
