use crate::clients::SessionClient;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::session::SessionActor;
use tracing::{error, info};

/// The runtime harness for one session actor.
///
/// `SessionSystem` is responsible for:
/// - building the HTTP client and the session actor from a [`SessionConfig`]
/// - spawning the actor's event loop in a background task
/// - shutting the system down gracefully
///
/// # Example
///
/// ```ignore
/// let system = SessionSystem::new(SessionConfig::new(base_url))?;
/// system.client.login("a@b.com".into(), "secret".into()).await?;
/// let snapshot = system.client.snapshot();
/// system.shutdown().await?;
/// ```
pub struct SessionSystem {
    /// Client for sending commands and observing snapshots.
    pub client: SessionClient,
    /// Task handle for the session actor, used for graceful shutdown.
    handle: tokio::task::JoinHandle<()>,
}

impl SessionSystem {
    /// Creates the session actor and spawns it, returning a running system.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let (actor, client) = SessionActor::new(config)?;
        let handle = tokio::spawn(actor.run());
        Ok(Self { client, handle })
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the command channel; the actor detects
    /// the closure, exits its loop, and the task is awaited. Any client
    /// clones held elsewhere keep the actor alive until they are dropped
    /// too.
    pub async fn shutdown(self) -> Result<(), SessionError> {
        info!("Shutting down session system");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Session actor task failed");
            return Err(SessionError::TaskFailed(e.to_string()));
        }

        info!("Session system shutdown complete");
        Ok(())
    }
}
