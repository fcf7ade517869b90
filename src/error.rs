//! # Session Errors
//!
//! Coordination errors raised by the actor plumbing itself. Operation
//! failures (a rejected login, an unreachable backend) are not errors at
//! this level; they travel through the session context as `error_message`.

/// Errors surfaced by the client and lifecycle layers.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session actor's command channel is closed.
    #[error("Session actor closed")]
    ActorClosed,
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
    /// The session actor task panicked or was cancelled.
    #[error("Session task failed: {0}")]
    TaskFailed(String),
}
