//! # Bistro Session
//!
//! An actor-based session state machine for a food-ordering client. The
//! crate coordinates client-side application state (authentication, menu
//! retrieval, order retrieval) with a set of backend HTTP calls, so that
//! every user-visible state transition is driven by the outcome of exactly
//! one well-defined network request.
//!
//! ## Architecture
//!
//! Two actors, composed hierarchically:
//!
//! - **[`SessionActor`]** (root): owns the [`SessionContext`], encodes the
//!   legal sequencing of operations as an explicit state machine, and
//!   spawns a fresh fetch actor for every outbound call.
//! - **[`FetchActor`]** (leaf): performs exactly one HTTP request per
//!   activation and reports a single normalized outcome to its spawner. It
//!   has no knowledge of application semantics; routing happens through
//!   opaque [`OutcomeLabel`] tokens chosen by the session actor.
//!
//! All coordination is asynchronous message passing over Tokio channels;
//! the two actors never share mutable memory. Subscribers (a UI layer, a
//! test harness) observe the session through a watch channel that carries a
//! full [`SessionSnapshot`] after every transition.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bistro_session::{setup_tracing, SessionConfig, SessionState, SessionSystem};
//!
//! setup_tracing();
//! let config = SessionConfig::new("http://localhost:3001".parse()?);
//! let system = SessionSystem::new(config)?;
//!
//! let mut snapshots = system.client.subscribe();
//! system.client.login("a@b.com".into(), "secret".into()).await?;
//!
//! while snapshots.changed().await.is_ok() {
//!     let snapshot = snapshots.borrow().clone();
//!     if snapshot.state == SessionState::LoggedIn {
//!         println!("logged in as {:?}", snapshot.context.user);
//!         break;
//!     }
//! }
//! system.shutdown().await?;
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod fetch_actor;
pub mod lifecycle;
pub mod model;
pub mod session;

// Re-export core types for convenience
pub use clients::SessionClient;
pub use config::SessionConfig;
pub use error::SessionError;
pub use fetch_actor::{FetchActor, FetchHandle, FetchInstruction, FetchOutcome, OutcomeLabel};
pub use lifecycle::{setup_tracing, SessionSystem};
pub use session::{
    ContextEvent, SessionActor, SessionCommand, SessionContext, SessionSnapshot, SessionState,
    MISSING_SIGNUP_FIELDS_MESSAGE,
};
