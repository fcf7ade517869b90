//! # Session Configuration
//!
//! Runtime configuration for the session system: where the backend lives,
//! how long the HTTP client waits, and how deep the actor mailboxes are.

use std::time::Duration;
use url::Url;

/// Default timeout applied to the HTTP client. This bounds the transport,
/// not the actors; the session itself imposes no deadline on a fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default mailbox capacity for the command and outcome channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Configuration for a [`SessionSystem`](crate::lifecycle::SessionSystem).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the backend, e.g. `http://localhost:3001`.
    pub base_url: Url,
    /// Request timeout for the HTTP client.
    pub timeout: Duration,
    /// Capacity of the actor mailboxes.
    pub channel_capacity: usize,
}

impl SessionConfig {
    /// Creates a configuration for the given backend with default timeout
    /// and channel capacity.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Resolves an API path against the configured base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}
