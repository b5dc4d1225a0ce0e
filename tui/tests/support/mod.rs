//! Shared scaffolding for the integration tests in this directory: a single
//! channel wired through `AppEventSender::new` so completions post back as
//! plain `Msg`s, and a helper that drains whatever is waiting on it and
//! folds each one through the reducer.

use std::sync::Arc;
use std::time::Duration;

use fleet_backend::Backend;
use fleet_backend::MemoryBackend;
use fleet_tui::app_event_sender::AppEventSender;
use fleet_tui::cmd::Command;
use fleet_tui::executor::Executor;
use fleet_tui::model::Model;
use fleet_tui::msg::Msg;
use fleet_tui::reducer;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;

pub struct Harness {
    pub model: Model,
    pub executor: Executor,
    rx: UnboundedReceiver<Msg>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        let (tx, rx) = unbounded_channel();
        let (stream_ready_tx, _stream_ready_rx) = unbounded_channel();
        let msg_tx = AppEventSender::new(tx);
        let executor = Executor::new(backend, msg_tx, stream_ready_tx);
        Self { model: Model::new(), executor, rx }
    }

    pub fn dispatch(&self, command: Command) {
        self.executor.dispatch(command);
    }

    /// Waits for the next posted `Msg` and folds it through the reducer,
    /// returning any follow-up commands it produced.
    pub async fn next(&mut self) -> fleet_tui::cmd::Commands {
        let msg = self.rx.recv().await.expect("executor task dropped the sender");
        reducer::reduce(&mut self.model, msg)
    }

    /// Drains every `Msg` currently queued (with a short grace period for
    /// ones still in flight on the executor's spawned tasks), dispatching
    /// any follow-up commands it produces and folding their completions in
    /// turn, until the channel goes quiet.
    pub async fn settle(&mut self) {
        loop {
            match tokio::time::timeout(Duration::from_millis(200), self.rx.recv()).await {
                Ok(Some(msg)) => {
                    let commands = reducer::reduce(&mut self.model, msg);
                    for command in commands {
                        self.dispatch(command);
                    }
                }
                _ => break,
            }
        }
    }
}
