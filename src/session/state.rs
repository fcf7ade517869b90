//! # Session States
//!
//! The thirteen states of the session machine and the table of commands
//! each one accepts. Request states accept no external command at all;
//! they settle only through a fetch outcome.

use crate::session::command::SessionCommand;
use serde::Serialize;

/// The session machine's state.
///
/// Every operation follows the same shape: a stable state accepts the
/// command, the machine enters the operation's `*Request` state, and the
/// fetch outcome moves it to the matching success or error state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SessionState {
    #[default]
    Idle,
    LoginRequest,
    LoggedIn,
    LoginError,
    SignupRequest,
    SignedUp,
    SignupError,
    MenuFetchRequest,
    MenuFetched,
    MenuError,
    OrdersFetchRequest,
    OrdersFetched,
    OrdersError,
}

impl SessionState {
    /// True while a fetch actor is (logically) in flight.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::LoginRequest
                | Self::SignupRequest
                | Self::MenuFetchRequest
                | Self::OrdersFetchRequest
        )
    }

    /// Whether this state accepts the given external command.
    ///
    /// This is the machine's transition guard: a command rejected here is
    /// dropped by the session actor with a warning, so a second fetch can
    /// never start while one is in flight.
    pub fn accepts(&self, command: &SessionCommand) -> bool {
        match (self, command) {
            // Idle accepts every operation, and logout as a no-op reset.
            (Self::Idle, _) => true,

            // Request states are internal; they settle via outcomes only.
            (state, _) if state.is_request() => false,

            // Error states accept a retry of their own operation or logout.
            (Self::LoginError, SessionCommand::Login { .. }) => true,
            (Self::SignupError, SessionCommand::Signup { .. }) => true,
            (Self::MenuError, SessionCommand::MenuFetch) => true,
            (Self::OrdersError, SessionCommand::OrdersFetch { .. }) => true,

            // Terminal success states.
            (Self::LoggedIn, SessionCommand::MenuFetch) => true,
            (Self::LoggedIn, SessionCommand::OrdersFetch { .. }) => true,
            (Self::SignedUp, SessionCommand::Login { .. }) => true,
            (Self::MenuFetched, SessionCommand::MenuFetch) => true,
            (Self::OrdersFetched, SessionCommand::OrdersFetch { .. }) => true,

            // Logout is accepted from every stable state.
            (_, SessionCommand::Logout) => true,

            _ => false,
        }
    }
}
