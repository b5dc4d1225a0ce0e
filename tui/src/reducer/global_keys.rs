//! Keys that apply regardless of mode (§4.1 step 6, tried first): quit,
//! force-redraw, and the sidebar/group toggles, kept at the top level of
//! the key match rather than scattered into each mode's handler.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;

use crate::cmd::Commands;
use crate::mode::Mode;
use crate::model::Model;
use crate::sidebar::InvalidationReason;

pub fn try_handle(model: &mut Model, key: KeyEvent) -> Option<Commands> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            model.quit_requested = true;
            Some(Commands::new())
        }
        (KeyCode::Esc, KeyModifiers::NONE) if model.mode != Mode::Normal && model.pending_confirm.is_none() => {
            let commands = match model.mode {
                Mode::Compose => super::mode_keys::save_compose_draft(model),
                Mode::AddNote => super::mode_keys::save_note_draft(model),
                _ => Commands::new(),
            };
            model.mode = Mode::Normal;
            Some(commands)
        }
        (KeyCode::Char('y'), KeyModifiers::NONE) if model.pending_confirm.is_some() => {
            let confirmed = model.pending_confirm.take();
            Some(super::mode_keys::apply_confirm(model, confirmed))
        }
        (KeyCode::Char('n'), KeyModifiers::NONE) if model.pending_confirm.is_some() => {
            model.pending_confirm = None;
            Some(Commands::new())
        }
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => {
            model.app_state.sidebar_collapsed = !model.app_state.sidebar_collapsed;
            model.invalidate_sidebar(InvalidationReason::AppState);
            Some(super::mode_keys::schedule_save(model))
        }
        _ => None,
    }
}
