//! Splits outgoing `Msg`s across two channels by priority, so input and
//! redraw stay responsive under a bulk stream of history/delta events. Wraps
//! tokio's unbounded channel, since commands complete on the async executor
//! rather than a synchronous event loop.

use tokio::sync::mpsc::UnboundedSender;

use crate::msg::Msg;

#[derive(Clone)]
pub struct AppEventSender {
    high_tx: UnboundedSender<Msg>,
    bulk_tx: UnboundedSender<Msg>,
}

impl AppEventSender {
    pub fn new_dual(high_tx: UnboundedSender<Msg>, bulk_tx: UnboundedSender<Msg>) -> Self {
        Self { high_tx, bulk_tx }
    }

    pub fn new(tx: UnboundedSender<Msg>) -> Self {
        Self { high_tx: tx.clone(), bulk_tx: tx }
    }

    pub fn send(&self, msg: Msg) {
        let is_high = matches!(
            msg,
            Msg::Key(_) | Msg::Mouse(_) | Msg::Paste(_) | Msg::Resize { .. } | Msg::ExitRequested | Msg::Tick
        );
        let tx = if is_high { &self.high_tx } else { &self.bulk_tx };
        if tx.send(msg).is_err() {
            tracing::error!("failed to send message: receiver dropped");
        }
    }
}
