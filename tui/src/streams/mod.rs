//! Stream controllers (§5): the non-blocking adapters between a `Backend`'s
//! mpsc receiver and the reducer's `ConsumeTick` draining. Three variants,
//! one per provider capability profile — see `crate::capabilities`.

mod codex;
mod items;
mod plain;

pub use codex::CodexController;
pub use items::ItemsController;
pub use plain::PlainController;

use std::collections::HashMap;

use fleet_backend::CancelHandle;
use fleet_protocol::SessionId;

use crate::approvals::ApprovalRegistry;
use crate::latency::ActivityTracker;
use crate::reasoning::ReasoningCollapseMap;
use crate::transcript::TranscriptStore;

/// Outcome of a single `consume_tick`: how many deltas were applied, so the
/// caller can decide whether to request another render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumeOutcome {
    pub applied: usize,
    pub closed: bool,
}

/// Maximum deltas a single controller applies per `Tick`, bounding how long
/// one frame's drain can take when a provider floods the channel.
const MAX_DELTAS_PER_TICK: usize = 64;

/// An opened stream of whichever variant the session's provider uses,
/// paired with the cancel handle the executor obtained alongside it.
pub enum StreamHandle {
    Plain(PlainController, CancelHandle),
    Codex(CodexController, CancelHandle),
    Items(ItemsController, CancelHandle),
}

/// Lives on the main loop thread (never sent across tasks): every open
/// stream's receiver is drained here via non-blocking `try_recv`, which is
/// why this can sit alongside the Model instead of behind a spawned task.
#[derive(Default)]
pub struct StreamRegistry {
    streams: HashMap<SessionId, StreamHandle>,
}

impl StreamRegistry {
    pub fn register(&mut self, session_id: SessionId, handle: StreamHandle) {
        self.streams.insert(session_id, handle);
    }

    pub fn cancel_and_remove(&mut self, session_id: &SessionId) {
        if let Some(handle) = self.streams.remove(session_id) {
            match handle {
                StreamHandle::Plain(_, cancel) => cancel.cancel(),
                StreamHandle::Codex(_, cancel) => cancel.cancel(),
                StreamHandle::Items(_, cancel) => cancel.cancel(),
            }
        }
    }

    pub fn is_open(&self, session_id: &SessionId) -> bool {
        self.streams.contains_key(session_id)
    }

    /// Drains every registered stream once; returns whether anything was
    /// applied (i.e. whether a redraw should be requested). Also keeps the
    /// activity tracker and each transcript's reasoning-collapse state in
    /// sync with what was just applied.
    pub fn consume_all(
        &mut self,
        transcripts: &mut TranscriptStore,
        approvals: &mut ApprovalRegistry,
        activity: &mut ActivityTracker,
        reasoning: &ReasoningCollapseMap,
    ) -> bool {
        let mut any_applied = false;
        let mut closed = Vec::new();
        let now = chrono::Utc::now();
        for (session_id, handle) in self.streams.iter_mut() {
            let transcript = transcripts.get_or_create(session_id);
            let outcome = match handle {
                StreamHandle::Plain(controller, _) => controller.consume_tick(transcript, MAX_DELTAS_PER_TICK),
                StreamHandle::Codex(controller, _) => controller.consume_tick(session_id, transcript, approvals, MAX_DELTAS_PER_TICK),
                StreamHandle::Items(controller, _) => controller.consume_tick(transcript, MAX_DELTAS_PER_TICK),
            };
            any_applied = any_applied || outcome.applied > 0;
            if outcome.applied > 0 {
                activity.mark_active(session_id, now);
            }
            if outcome.closed {
                activity.mark_idle(session_id, now);
                closed.push(session_id.clone());
            }
            transcript.apply_reasoning_collapse(reasoning, activity.is_active(session_id));
        }
        for session_id in closed {
            self.streams.remove(&session_id);
        }
        any_applied
    }
}
