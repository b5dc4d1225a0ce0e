//! Plain-line stream controller: the simplest of the three, used for
//! providers with no structured event protocol. Each delta is one line of
//! output text.

use fleet_backend::PlainDelta;
use fleet_backend::PlainReceiver;
use fleet_protocol::ChatBlockRole;

use crate::transcript::Transcript;

use super::ConsumeOutcome;

pub struct PlainController {
    receiver: PlainReceiver,
}

impl PlainController {
    pub fn new(receiver: PlainReceiver) -> Self {
        Self { receiver }
    }

    /// Drains whatever is currently buffered without blocking, applying each
    /// delta to `transcript`. Bounded by `max_per_tick` so a burst of output
    /// can't starve input handling for a whole frame.
    pub fn consume_tick(&mut self, transcript: &mut Transcript, max_per_tick: usize) -> ConsumeOutcome {
        let mut outcome = ConsumeOutcome::default();
        for _ in 0..max_per_tick {
            match self.receiver.try_recv() {
                Ok(PlainDelta::Line(line)) => {
                    transcript.push_delta_line(ChatBlockRole::Agent, line);
                    outcome.applied += 1;
                }
                Ok(PlainDelta::Closed) => {
                    outcome.closed = true;
                    break;
                }
                Ok(PlainDelta::Error(message)) => {
                    transcript.mark_closed_with_error(message);
                    outcome.closed = true;
                    break;
                }
                Err(_) => break,
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test]
    async fn consume_tick_applies_buffered_lines_and_stops_on_empty() {
        let (tx, rx) = unbounded_channel();
        tx.send(PlainDelta::Line("hello".into())).unwrap();
        tx.send(PlainDelta::Line("world".into())).unwrap();
        let mut controller = PlainController::new(rx);
        let mut transcript = Transcript::default();
        let outcome = controller.consume_tick(&mut transcript, 10);
        assert_eq!(outcome.applied, 2);
        assert!(!outcome.closed);
        assert_eq!(transcript.blocks.len(), 2);
    }

    #[tokio::test]
    async fn consume_tick_respects_the_closed_marker() {
        let (tx, rx) = unbounded_channel();
        tx.send(PlainDelta::Line("hello".into())).unwrap();
        tx.send(PlainDelta::Closed).unwrap();
        let mut controller = PlainController::new(rx);
        let mut transcript = Transcript::default();
        let outcome = controller.consume_tick(&mut transcript, 10);
        assert!(outcome.closed);
        assert_eq!(outcome.applied, 1);
    }
}
