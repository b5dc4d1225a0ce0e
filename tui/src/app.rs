//! The async run loop: owns the `Model`, the `Executor`, and the
//! `StreamRegistry`, and ties the terminal, the tick interval, and the
//! `Msg` channel together. A dedicated OS thread polls crossterm so
//! `read()`'s internal lock never blocks the async side; that thread
//! forwards events through `AppEventSender` onto the tokio runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use fleet_backend::Backend;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;

use crate::app_event_sender::AppEventSender;
use crate::cmd::Command;
use crate::executor::Executor;
use crate::model::Model;
use crate::msg::Msg;
use crate::reducer;
use crate::streams::StreamRegistry;
use crate::tui_term::Tui;

pub struct App {
    model: Model,
    executor: Executor,
    stream_registry: StreamRegistry,
    high_rx: UnboundedReceiver<Msg>,
    bulk_rx: UnboundedReceiver<Msg>,
    stream_ready_rx: UnboundedReceiver<(fleet_protocol::SessionId, crate::streams::StreamHandle)>,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, seed_demo: bool) -> Self {
        let (high_tx, high_rx) = unbounded_channel();
        let (bulk_tx, bulk_rx) = unbounded_channel();
        let msg_tx = AppEventSender::new_dual(high_tx.clone(), bulk_tx.clone());
        let (stream_ready_tx, stream_ready_rx) = unbounded_channel();

        spawn_input_thread(msg_tx.clone());

        let executor = Executor::new(backend, msg_tx, stream_ready_tx);
        let mut model = Model::new();
        model.app_state.sidebar_show_recents = true;
        let _ = seed_demo;

        Self { model, executor, stream_registry: StreamRegistry::default(), high_rx, bulk_rx, stream_ready_rx }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.executor.dispatch(Command::ReadAppState);
        self.executor.dispatch(Command::ListWorkspaces);
        self.executor.dispatch(Command::ListWorkspaceGroups);
        self.executor.dispatch(Command::ListSessions { filter: fleet_backend::ListSessionsFilter { workspace_id: None, include_dismissed: false } });

        let mut tick_interval = tokio::time::interval(Duration::from_millis(50));

        loop {
            while let Ok((session_id, handle)) = self.stream_ready_rx.try_recv() {
                self.stream_registry.register(session_id, handle);
            }

            let msg = tokio::select! {
                biased;
                Some(msg) = self.high_rx.recv() => msg,
                Some(msg) = self.bulk_rx.recv() => msg,
                _ = tick_interval.tick() => Msg::Tick,
            };

            let is_tick = matches!(msg, Msg::Tick);
            let commands = reducer::reduce(&mut self.model, msg);
            for command in commands {
                self.run_or_dispatch(command);
            }

            if is_tick {
                let applied = self.stream_registry.consume_all(
                    &mut self.model.transcripts,
                    &mut self.model.approvals,
                    &mut self.model.activity,
                    &self.model.reasoning_collapse,
                );
                if applied {
                    self.model.render_scheduler.request_redraw();
                }
                if self.model.refresh_scheduler.due(std::time::Instant::now()) {
                    self.executor.dispatch(Command::ListSessions { filter: fleet_backend::ListSessionsFilter { workspace_id: None, include_dismissed: false } });
                }
            }

            self.rebuild_sidebar_if_stale();

            if self.model.render_scheduler.poll(std::time::Instant::now()) {
                terminal.draw(|frame| crate::view::draw(frame, &mut self.model))?;
            }

            if self.model.quit_requested {
                let save_token = self.model.save_debouncer.schedule();
                self.executor.dispatch(Command::SaveAppState { state: self.model.app_state.clone(), save_token });
                break;
            }
        }
        Ok(())
    }

    fn run_or_dispatch(&mut self, command: Command) {
        if let Command::CancelStream { id } = &command {
            self.stream_registry.cancel_and_remove(id);
            return;
        }
        self.executor.dispatch(command);
    }

    fn rebuild_sidebar_if_stale(&mut self) {
        if !self.model.sidebar.is_stale() {
            return;
        }
        let active_group_ids = self.model.active_group_ids();
        let inputs = crate::sidebar::ProjectionInputs {
            workspaces: &self.model.workspaces,
            worktrees: &self.model.worktrees,
            sessions: &self.model.sessions,
            session_meta: &self.model.session_meta,
            active_group_ids: &active_group_ids,
            show_dismissed: false,
            show_recents: self.model.app_state.sidebar_show_recents,
            workspace_expanded: &self.model.app_state.sidebar_workspace_expanded,
            worktree_expanded: &self.model.app_state.sidebar_worktree_expanded,
        };
        self.model.sidebar.rebuild_if_stale(&inputs);
    }
}

fn spawn_input_thread(msg_tx: AppEventSender) {
    std::thread::spawn(move || {
        loop {
            if let Ok(true) = crossterm::event::poll(Duration::from_millis(100)) {
                if let Ok(event) = crossterm::event::read() {
                    match event {
                        crossterm::event::Event::Key(key_event) => {
                            msg_tx.send(Msg::Key(key_event));
                        }
                        crossterm::event::Event::Mouse(mouse_event) => {
                            msg_tx.send(Msg::Mouse(mouse_event));
                        }
                        crossterm::event::Event::Resize(width, height) => {
                            msg_tx.send(Msg::Resize { width, height });
                        }
                        crossterm::event::Event::Paste(pasted) => {
                            let pasted = pasted.replace('\r', "\n");
                            msg_tx.send(Msg::Paste(crate::msg::Redacted(pasted)));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

pub fn default_log_path() -> PathBuf {
    crate::config::default_log_path()
}
