//! # Clients
//!
//! Type-safe wrappers that hide the message-passing plumbing from the
//! embedding application.

pub mod session_client;

pub use session_client::SessionClient;
