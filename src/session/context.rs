//! # Session Context
//!
//! The session actor's owned data record and the pure reducer that evolves
//! it. Every mutation goes through [`SessionContext::apply`], which takes
//! the prior context and one [`ContextEvent`] and returns the next context.
//! Keeping the reducer total and side-effect-free lets the merge rules be
//! tested without any actor or network in the picture.

use crate::model::{
    AuthUser, Credentials, MenuItem, OrderRecord, RequestorIdentity, SignupAck, SignupProfile,
};
use serde::Serialize;

/// The externally visible session record.
///
/// Fields are owned by operation families: login owns `credentials` and
/// `user`, signup owns `profile` and `signup_ack`, and so on. An operation
/// never touches another family's fields; only logout clears them all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionContext {
    pub credentials: Option<Credentials>,
    pub profile: Option<SignupProfile>,
    pub user: Option<AuthUser>,
    pub menu_items: Option<Vec<MenuItem>>,
    pub orders: Option<Vec<OrderRecord>>,
    pub requestor_identity: Option<RequestorIdentity>,
    pub signup_ack: Option<SignupAck>,
    pub error_message: Option<String>,
}

/// One step of context evolution.
///
/// `*Submitted`/`*Requested` events fold the command's input fields in and
/// clear any stale error, so the error is already gone while the new
/// attempt is in flight. Settlement events merge the operation's result.
#[derive(Debug, Clone)]
pub enum ContextEvent {
    LoginSubmitted { email: String, password: String },
    SignupSubmitted { profile: SignupProfile },
    MenuRequested,
    OrdersRequested { identity: RequestorIdentity },
    LoginSucceeded { user: AuthUser },
    SignupSucceeded { ack: SignupAck },
    MenuFetched { items: Vec<MenuItem> },
    OrdersFetched { orders: Vec<OrderRecord> },
    Failed { message: String },
    LoggedOut,
}

impl SessionContext {
    /// The reducer: merges one event into the context.
    pub fn apply(self, event: ContextEvent) -> Self {
        match event {
            ContextEvent::LoginSubmitted { email, password } => Self {
                credentials: Some(Credentials { email, password }),
                error_message: None,
                ..self
            },
            ContextEvent::SignupSubmitted { profile } => Self {
                profile: Some(profile),
                error_message: None,
                ..self
            },
            ContextEvent::MenuRequested => Self {
                error_message: None,
                ..self
            },
            ContextEvent::OrdersRequested { identity } => Self {
                requestor_identity: Some(identity),
                error_message: None,
                ..self
            },
            // Credentials have served their purpose once the login settles.
            ContextEvent::LoginSucceeded { user } => Self {
                user: Some(user),
                credentials: None,
                error_message: None,
                ..self
            },
            ContextEvent::SignupSucceeded { ack } => Self {
                signup_ack: Some(ack),
                profile: None,
                error_message: None,
                ..self
            },
            ContextEvent::MenuFetched { items } => Self {
                menu_items: Some(items),
                error_message: None,
                ..self
            },
            ContextEvent::OrdersFetched { orders } => Self {
                orders: Some(orders),
                error_message: None,
                ..self
            },
            ContextEvent::Failed { message } => Self {
                error_message: Some(message),
                ..self
            },
            ContextEvent::LoggedOut => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: 1,
            email: "a@b.com".into(),
            name: None,
            role: None,
        }
    }

    fn menu() -> Vec<MenuItem> {
        vec![MenuItem {
            id: 1,
            name: "Soup".into(),
            price: 4.5,
            description: None,
            category: None,
        }]
    }

    #[test]
    fn login_submission_stores_credentials_and_clears_error() {
        let ctx = SessionContext {
            error_message: Some("bad credentials".into()),
            ..Default::default()
        };
        let ctx = ctx.apply(ContextEvent::LoginSubmitted {
            email: "a@b.com".into(),
            password: "x".into(),
        });
        assert_eq!(
            ctx.credentials,
            Some(Credentials {
                email: "a@b.com".into(),
                password: "x".into(),
            })
        );
        assert_eq!(ctx.error_message, None);
    }

    #[test]
    fn login_success_sets_user_and_drops_credentials() {
        let ctx = SessionContext::default()
            .apply(ContextEvent::LoginSubmitted {
                email: "a@b.com".into(),
                password: "x".into(),
            })
            .apply(ContextEvent::LoginSucceeded { user: user() });
        assert_eq!(ctx.user, Some(user()));
        assert_eq!(ctx.credentials, None);
    }

    #[test]
    fn failure_only_touches_the_error_message() {
        let ctx = SessionContext::default()
            .apply(ContextEvent::MenuFetched { items: menu() })
            .apply(ContextEvent::Failed {
                message: "db down".into(),
            });
        assert_eq!(ctx.error_message.as_deref(), Some("db down"));
        assert_eq!(ctx.menu_items, Some(menu()));
    }

    #[test]
    fn unrelated_operations_leave_other_families_alone() {
        let ctx = SessionContext::default()
            .apply(ContextEvent::LoginSucceeded { user: user() })
            .apply(ContextEvent::MenuRequested)
            .apply(ContextEvent::MenuFetched { items: menu() });
        assert_eq!(ctx.user, Some(user()));
        assert_eq!(ctx.menu_items, Some(menu()));
    }

    #[test]
    fn logout_resets_everything() {
        let ctx = SessionContext::default()
            .apply(ContextEvent::LoginSucceeded { user: user() })
            .apply(ContextEvent::MenuFetched { items: menu() })
            .apply(ContextEvent::Failed {
                message: "late failure".into(),
            })
            .apply(ContextEvent::LoggedOut);
        assert_eq!(ctx, SessionContext::default());
    }
}
