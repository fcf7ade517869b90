//! The external command surface accepted by the session actor.

/// A command sent by the embedding application (typically a UI layer).
///
/// Commands are fire-and-forget; the resulting state is observed through
/// the snapshot channel, never through a reply.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    Login {
        email: String,
        password: String,
    },
    Signup {
        name: String,
        email: String,
        password: String,
        role: String,
    },
    MenuFetch,
    OrdersFetch {
        user_email: String,
        user_role: String,
    },
    Logout,
}

impl SessionCommand {
    /// Short name used in log fields.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "LOGIN",
            Self::Signup { .. } => "SIGNUP",
            Self::MenuFetch => "MENU_FETCH",
            Self::OrdersFetch { .. } => "ORDERS_FETCH",
            Self::Logout => "LOGOUT",
        }
    }
}
