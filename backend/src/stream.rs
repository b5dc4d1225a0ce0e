use fleet_protocol::ApprovalRequest;
use fleet_protocol::ApprovalResolution;
use fleet_protocol::ChatBlock;
use tokio_util::sync::CancellationToken;

/// Handle returned alongside every stream open. Invoking `cancel()` is the
/// only way the reducer tells a background worker to stop; the worker is
/// responsible for observing it and closing its sender side of the channel.
#[derive(Debug, Clone)]
pub struct CancelHandle(CancellationToken);

impl CancelHandle {
    pub fn new() -> Self {
        Self(CancellationToken::new())
    }

    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }

    pub fn child_token(&self) -> CancellationToken {
        self.0.clone()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Delta kind for the legacy plain-line stream controller.
#[derive(Debug, Clone)]
pub enum PlainDelta {
    Line(String),
    Closed,
    Error(String),
}

/// Delta kind for the `codex` structured-event stream controller: carries
/// incremental text plus approval lifecycle events.
#[derive(Debug, Clone)]
pub enum CodexEvent {
    AgentTextDelta(String),
    ReasoningTextDelta(String),
    TurnStarted,
    TurnCompleted,
    ApprovalRequested(ApprovalRequest),
    ApprovalResolved(ApprovalResolution),
    Closed,
    Error(String),
}

/// Delta kind for the block-oriented `items` stream controller: each message
/// is a complete replacement snapshot, never an incremental patch.
#[derive(Debug, Clone)]
pub enum ItemsDelta {
    Snapshot(Vec<ChatBlock>),
    Closed,
    Error(String),
}

pub type PlainReceiver = tokio::sync::mpsc::UnboundedReceiver<PlainDelta>;
pub type CodexReceiver = tokio::sync::mpsc::UnboundedReceiver<CodexEvent>;
pub type ItemsReceiver = tokio::sync::mpsc::UnboundedReceiver<ItemsDelta>;
