//! The Backend collaborator surface (§6) and its in-process demo
//! implementation, kept in its own crate so the reducer depends only on
//! the `Backend` trait, never on a concrete transport.

pub mod error;
pub mod memory;
pub mod requests;
pub mod stream;
pub mod traits;

pub use error::BackendError;
pub use error::BackendResult;
pub use memory::MemoryBackend;
pub use requests::ApprovalDecisionRequest;
pub use requests::CreateNoteRequest;
pub use requests::ListSessionsFilter;
pub use requests::MoveNoteRequest;
pub use requests::ProviderOption;
pub use requests::SendMessageRequest;
pub use requests::StartSessionRequest;
pub use requests::WorkspaceGroupAssignment;
pub use stream::CancelHandle;
pub use stream::CodexEvent;
pub use stream::CodexReceiver;
pub use stream::ItemsDelta;
pub use stream::ItemsReceiver;
pub use stream::PlainDelta;
pub use stream::PlainReceiver;
pub use traits::Backend;
