//! # Fetch Actor
//!
//! The leaf actor of the system: it performs exactly one HTTP call per
//! activation and reports a single normalized outcome to its spawner.
//!
//! # Architecture Note
//! The actor knows nothing about login, menus, or orders. It receives a
//! [`FetchInstruction`] describing the call and a pair of opaque outcome
//! labels, performs the request, and sends exactly one [`FetchOutcome`]
//! back over the outcome channel it was created with. All three failure
//! taxonomies (HTTP error status, transport error, malformed body) are
//! normalized into the same failure shape here, so the parent only ever
//! sees "succeeded with payload" or "failed with message".
//!
//! The session actor spawns a fresh fetch actor for every operation, so the
//! `Idle -> Fetching -> Idle` cycle runs at most once per spawn in practice;
//! the loop ends when the parent drops its [`FetchHandle`].

pub mod instruction;

pub use instruction::{FetchInstruction, FetchOutcome, OutcomeLabel};

use crate::error::SessionError;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Mailbox message for the fetch actor. Only one request shape exists.
#[derive(Debug)]
enum FetchRequest {
    Submit { instruction: FetchInstruction },
}

/// Handle owned by the session actor for the duration of one request state.
///
/// Dropping the handle closes the actor's mailbox, which lets a superseded
/// actor wind down after its in-flight call completes.
#[derive(Debug, Clone)]
pub struct FetchHandle {
    sender: mpsc::Sender<FetchRequest>,
    generation: u64,
}

impl FetchHandle {
    /// Submits the one instruction this actor will execute.
    pub async fn submit(&self, instruction: FetchInstruction) -> Result<(), SessionError> {
        self.sender
            .send(FetchRequest::Submit { instruction })
            .await
            .map_err(|_| SessionError::ActorClosed)
    }

    /// The spawn generation this handle belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The fetch actor itself. Created with [`FetchActor::new`] and driven by
/// [`FetchActor::run`] in its own task.
pub struct FetchActor {
    receiver: mpsc::Receiver<FetchRequest>,
    http: reqwest::Client,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    generation: u64,
}

impl FetchActor {
    /// Creates a fetch actor wired to the given outcome channel, plus the
    /// handle used to submit its instruction.
    pub fn new(
        http: reqwest::Client,
        outcome_tx: mpsc::Sender<FetchOutcome>,
        generation: u64,
    ) -> (Self, FetchHandle) {
        let (sender, receiver) = mpsc::channel(1);
        let actor = Self {
            receiver,
            http,
            outcome_tx,
            generation,
        };
        let handle = FetchHandle { sender, generation };
        (actor, handle)
    }

    /// Runs the actor's event loop: wait idle for an instruction, perform
    /// the call, emit the outcome, return to idle. The loop ends when the
    /// parent drops its handle.
    pub async fn run(mut self) {
        debug!(generation = self.generation, "Fetch actor started");

        while let Some(FetchRequest::Submit { instruction }) = self.receiver.recv().await {
            info!(
                generation = self.generation,
                method = %instruction.method,
                url = %instruction.url,
                "Fetching"
            );

            let outcome = match perform(&self.http, &instruction).await {
                Ok(result) => {
                    debug!(generation = self.generation, "Fetch succeeded");
                    FetchOutcome::Success {
                        generation: self.generation,
                        label: instruction.on_success,
                        result,
                    }
                }
                Err(message) => {
                    warn!(generation = self.generation, error = %message, "Fetch failed");
                    FetchOutcome::Failure {
                        generation: self.generation,
                        label: instruction.on_failure,
                        message,
                    }
                }
            };

            if self.outcome_tx.send(outcome).await.is_err() {
                warn!(generation = self.generation, "Parent gone, dropping fetch outcome");
            }
        }

        debug!(generation = self.generation, "Fetch actor shutdown");
    }
}

/// Performs the HTTP call and normalizes every failure into a message.
///
/// A 2xx response yields its JSON body. A non-2xx response yields the
/// `message` field of its error body when one exists, otherwise
/// `HTTP <status>`. Transport errors and unparseable 2xx bodies yield the
/// underlying error's text.
async fn perform(http: &reqwest::Client, instruction: &FetchInstruction) -> Result<Value, String> {
    let mut request = http.request(instruction.method.clone(), instruction.url.clone());

    for (name, value) in &instruction.headers {
        request = request.header(name, value);
    }

    if instruction.method != reqwest::Method::GET {
        if let Some(payload) = &instruction.payload {
            request = request.json(payload);
        }
    }

    let response = request.send().await.map_err(|e| e.to_string())?;
    let status = response.status();

    if !status.is_success() {
        let fallback = format!("HTTP {}", status.as_u16());
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or(fallback);
        return Err(message);
    }

    response.json::<Value>().await.map_err(|e| e.to_string())
}
