//! Top-level reducer dispatch (§4.1 step 6: global keys, then mode-specific
//! keys, then fall through). `reduce` is the crate's one pure entry point:
//! given the current `Model` and an incoming `Msg`, it mutates the Model in
//! place and returns the `Commands` the executor should run. No `Command`
//! is ever run from inside `reduce` itself.

mod completions;
mod global_keys;
mod mode_keys;
mod mouse;
mod streams;

use crate::cmd::Commands;
use crate::mode::Mode;
use crate::model::Model;
use crate::msg::Msg;

pub fn reduce(model: &mut Model, msg: Msg) -> Commands {
    match msg {
        Msg::Tick => on_tick(model),
        Msg::Key(key) => on_key(model, key),
        Msg::Mouse(event) => mouse::reduce(model, event),
        Msg::Paste(text) => {
            model.compose_input.push_str(&text.0);
            Commands::new()
        }
        Msg::Resize { width, height } => {
            model.render_pipeline.invalidate();
            let _ = (width, height);
            Commands::new()
        }
        Msg::ExitRequested => {
            model.quit_requested = true;
            Commands::new()
        }

        Msg::PlainDelta { .. } | Msg::CodexEvent { .. } | Msg::ItemsDelta { .. } | Msg::StreamOpened { .. } => {
            streams::reduce(model, msg)
        }

        _ => completions::reduce(model, msg),
    }
}

fn on_tick(model: &mut Model) -> Commands {
    model.render_scheduler.request_redraw();
    Commands::new()
}

fn on_key(model: &mut Model, key: crossterm::event::KeyEvent) -> Commands {
    if let Some(commands) = global_keys::try_handle(model, key) {
        return commands;
    }
    if model.mode != Mode::Normal {
        return mode_keys::handle(model, key);
    }
    mode_keys::handle_normal(model, key)
}
