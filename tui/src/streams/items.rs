//! Block-oriented stream controller: each delta is a complete replacement
//! snapshot of the session's chat blocks rather than an incremental patch.
//! Used by providers that already maintain structured transcript state
//! server-side (§5).

use fleet_backend::ItemsDelta;
use fleet_backend::ItemsReceiver;

use crate::transcript::Transcript;

use super::ConsumeOutcome;

pub struct ItemsController {
    receiver: ItemsReceiver,
}

impl ItemsController {
    pub fn new(receiver: ItemsReceiver) -> Self {
        Self { receiver }
    }

    /// Only the last snapshot in the buffered batch matters, since each one
    /// fully replaces the transcript; earlier ones in the same tick are
    /// discarded unapplied.
    pub fn consume_tick(&mut self, transcript: &mut Transcript, max_per_tick: usize) -> ConsumeOutcome {
        let mut outcome = ConsumeOutcome::default();
        let mut latest_snapshot = None;
        for _ in 0..max_per_tick {
            match self.receiver.try_recv() {
                Ok(ItemsDelta::Snapshot(blocks)) => {
                    latest_snapshot = Some(blocks);
                    outcome.applied += 1;
                }
                Ok(ItemsDelta::Closed) => {
                    outcome.closed = true;
                    break;
                }
                Ok(ItemsDelta::Error(message)) => {
                    transcript.mark_closed_with_error(message);
                    outcome.closed = true;
                    break;
                }
                Err(_) => break,
            }
        }
        if let Some(blocks) = latest_snapshot {
            transcript.replace_history(blocks);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_protocol::ChatBlock;
    use fleet_protocol::ChatBlockRole;
    use fleet_protocol::ChatBlockStatus;
    use tokio::sync::mpsc::unbounded_channel;

    fn block(text: &str) -> ChatBlock {
        ChatBlock {
            id: format!("blk-{text}"),
            role: ChatBlockRole::Agent,
            text: text.to_string(),
            collapsed: None,
            status: ChatBlockStatus::None,
            timestamp: None,
            correlation_id: None,
        }
    }

    #[tokio::test]
    async fn only_the_latest_snapshot_in_a_tick_is_applied() {
        let (tx, rx) = unbounded_channel();
        tx.send(ItemsDelta::Snapshot(vec![block("a")])).unwrap();
        tx.send(ItemsDelta::Snapshot(vec![block("a"), block("b")])).unwrap();
        let mut controller = ItemsController::new(rx);
        let mut transcript = Transcript::default();
        controller.consume_tick(&mut transcript, 10);
        assert_eq!(transcript.blocks.len(), 2);
    }
}
