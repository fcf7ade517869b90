//! # Session Client
//!
//! Provides a high-level API for interacting with the session actor. It
//! wraps the command channel and the snapshot watch channel and exposes
//! one method per command.

use crate::error::SessionError;
use crate::session::{SessionCommand, SessionSnapshot};
use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

/// Client for interacting with the session actor.
///
/// Commands are fire-and-forget: the actor applies its transition guard and
/// the resulting state is observed through [`subscribe`](Self::subscribe).
/// The client is cheap to clone; dropping every clone closes the command
/// channel and shuts the actor down.
#[derive(Debug, Clone)]
pub struct SessionClient {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionClient {
    pub(crate) fn new(
        commands: mpsc::Sender<SessionCommand>,
        snapshots: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self {
            commands,
            snapshots,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: String, password: String) -> Result<(), SessionError> {
        debug!("Sending command");
        self.send(SessionCommand::Login { email, password }).await
    }

    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        name: String,
        email: String,
        password: String,
        role: String,
    ) -> Result<(), SessionError> {
        debug!("Sending command");
        self.send(SessionCommand::Signup {
            name,
            email,
            password,
            role,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn menu_fetch(&self) -> Result<(), SessionError> {
        debug!("Sending command");
        self.send(SessionCommand::MenuFetch).await
    }

    #[instrument(skip(self))]
    pub async fn orders_fetch(
        &self,
        user_email: String,
        user_role: String,
    ) -> Result<(), SessionError> {
        debug!("Sending command");
        self.send(SessionCommand::OrdersFetch {
            user_email,
            user_role,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        debug!("Sending command");
        self.send(SessionCommand::Logout).await
    }

    /// Returns a receiver that yields a [`SessionSnapshot`] after every
    /// transition. Intended for reactive consumers such as a UI layer.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::ActorClosed)
    }
}
