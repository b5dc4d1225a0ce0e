//! Reduces the small slice of `Msg` variants that originate from a stream
//! controller rather than a completed `Command`. The bulk of delta
//! application happens inside `StreamRegistry::consume_all`, driven from
//! `app.rs`'s main loop rather than through individual messages — these
//! variants only cover the moment a stream is opened.

use crate::cmd::Command;
use crate::cmd::Commands;
use crate::model::Model;
use crate::msg::Msg;
use crate::sidebar::InvalidationReason;

pub fn reduce(model: &mut Model, msg: Msg) -> Commands {
    match msg {
        Msg::StreamOpened { session_id, .. } => {
            if model.pending_session_key.as_ref() != Some(&session_id) {
                // Opened for a session we've since navigated away from.
                return crate::cmd::one(Command::CancelStream { id: session_id });
            }
            model.activity.mark_active(&session_id, chrono::Utc::now());
            model.invalidate_sidebar(InvalidationReason::Sessions);
            Commands::new()
        }
        // Individual delta variants are currently only constructed for
        // tests exercising the stream controllers in isolation; the live
        // path drains receivers directly via `StreamRegistry::consume_all`.
        Msg::PlainDelta { session_id, .. } | Msg::CodexEvent { session_id, .. } | Msg::ItemsDelta { session_id, .. } => {
            model.activity.mark_active(&session_id, chrono::Utc::now());
            Commands::new()
        }
        _ => Commands::new(),
    }
}
