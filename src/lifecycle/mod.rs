//! # System Lifecycle
//!
//! Starting and stopping the session system, plus observability setup.
//! The session actor itself lives in [`session`](crate::session); this
//! module owns spawning it, handing out the client, and shutting it down
//! cleanly.

pub mod session_system;
pub mod tracing;

pub use session_system::SessionSystem;
pub use tracing::setup_tracing;
