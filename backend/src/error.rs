use thiserror::Error;

/// Error taxonomy for the Backend collaborator surface (§7). The category
/// a `BackendError` maps to is what the reducer uses to pick a toast
/// category (workspaces, sessions, notes, state save, stream, approvals)
/// without inspecting message text.
#[derive(Debug, Error, Clone)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type BackendResult<T> = Result<T, BackendError>;
