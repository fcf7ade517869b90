//! # Session Actor
//!
//! The root actor of the system. It owns the [`SessionContext`], encodes
//! the legal sequencing of login, signup, menu and orders operations as a
//! state machine, and spawns one [`FetchActor`](crate::fetch_actor::FetchActor)
//! per outbound call.
//!
//! # Architecture Note
//! The actor is purely reactive: it never blocks and it suspends only on
//! its two mailboxes (external commands and fetch outcomes). Entering a
//! `*Request` state spawns a fresh fetch actor and submits the operation's
//! instruction; the matching outcome settles the state into a terminal
//! success or error state. While a request is in flight the state machine
//! structurally rejects every external command, so at most one fetch actor
//! is ever live per session.
//!
//! # Stale Outcomes
//! Every spawn carries a monotonically increasing generation. An outcome
//! whose generation is not the current one belongs to a superseded actor
//! and is dropped; a fetch that was abandoned can never settle a later
//! operation.

pub mod command;
pub mod context;
pub mod state;

pub use command::SessionCommand;
pub use context::{ContextEvent, SessionContext};
pub use state::SessionState;

use crate::clients::SessionClient;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::fetch_actor::{FetchActor, FetchHandle, FetchInstruction, FetchOutcome, OutcomeLabel};
use crate::model::{AuthUser, MenuItem, OrderRecord, RequestorIdentity, SignupAck, SignupProfile};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Failure message synthesized when the signup guard rejects the form
/// before any network call is made.
pub const MISSING_SIGNUP_FIELDS_MESSAGE: &str = "Missing required fields in FSM context";

/// The state and context published to subscribers after every transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub context: SessionContext,
}

/// The four operations that go through a fetch actor.
#[derive(Debug, Clone, Copy)]
enum OperationKind {
    Login,
    Signup,
    Menu,
    Orders,
}

impl OperationKind {
    fn request_state(self) -> SessionState {
        match self {
            Self::Login => SessionState::LoginRequest,
            Self::Signup => SessionState::SignupRequest,
            Self::Menu => SessionState::MenuFetchRequest,
            Self::Orders => SessionState::OrdersFetchRequest,
        }
    }

    fn failure_label(self) -> OutcomeLabel {
        match self {
            Self::Login => OutcomeLabel::LoginFailure,
            Self::Signup => OutcomeLabel::SignupFailure,
            Self::Menu => OutcomeLabel::MenuFetchFailure,
            Self::Orders => OutcomeLabel::OrdersFetchFailure,
        }
    }
}

/// The session actor. Created with [`SessionActor::new`] and driven by
/// [`SessionActor::run`] in its own task; interaction goes through the
/// returned [`SessionClient`].
pub struct SessionActor {
    commands: mpsc::Receiver<SessionCommand>,
    outcomes: mpsc::Receiver<FetchOutcome>,
    /// Cloned into every spawned fetch actor. Keeping one sender here also
    /// guarantees `outcomes.recv()` never yields `None` while we run.
    outcome_tx: mpsc::Sender<FetchOutcome>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    http: reqwest::Client,
    config: SessionConfig,
    state: SessionState,
    context: SessionContext,
    /// Handle to the current fetch actor; superseded per attempt.
    fetch: Option<FetchHandle>,
    generation: u64,
}

impl SessionActor {
    /// Creates the session actor and its client.
    ///
    /// The actor does nothing until [`run`](Self::run) is spawned:
    ///
    /// ```ignore
    /// let (actor, client) = SessionActor::new(config)?;
    /// tokio::spawn(actor.run());
    /// client.login("a@b.com".into(), "secret".into()).await?;
    /// ```
    pub fn new(config: SessionConfig) -> Result<(Self, SessionClient), SessionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SessionError::HttpClient(e.to_string()))?;

        let (command_tx, commands) = mpsc::channel(config.channel_capacity);
        let (outcome_tx, outcomes) = mpsc::channel(config.channel_capacity);
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

        let actor = Self {
            commands,
            outcomes,
            outcome_tx,
            snapshot_tx,
            http,
            config,
            state: SessionState::Idle,
            context: SessionContext::default(),
            fetch: None,
            generation: 0,
        };
        let client = SessionClient::new(command_tx, snapshot_rx);

        Ok((actor, client))
    }

    /// Runs the actor's event loop until the command channel closes.
    pub async fn run(mut self) {
        info!(base_url = %self.config.base_url, "Session actor started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                Some(outcome) = self.outcomes.recv() => self.handle_outcome(outcome),
            }
        }

        info!(state = ?self.state, "Session actor shutdown");
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        if !self.state.accepts(&command) {
            warn!(
                state = ?self.state,
                command = command.name(),
                "Command rejected in current state"
            );
            return;
        }
        debug!(state = ?self.state, command = command.name(), "Command accepted");

        match command {
            SessionCommand::Login { email, password } => {
                self.apply(ContextEvent::LoginSubmitted { email, password });
                self.start(OperationKind::Login).await;
            }
            SessionCommand::Signup {
                name,
                email,
                password,
                role,
            } => {
                self.apply(ContextEvent::SignupSubmitted {
                    profile: SignupProfile {
                        name,
                        email,
                        password,
                        role,
                    },
                });
                self.start(OperationKind::Signup).await;
            }
            SessionCommand::MenuFetch => {
                self.apply(ContextEvent::MenuRequested);
                self.start(OperationKind::Menu).await;
            }
            SessionCommand::OrdersFetch {
                user_email,
                user_role,
            } => {
                self.apply(ContextEvent::OrdersRequested {
                    identity: RequestorIdentity {
                        user_email,
                        user_role,
                    },
                });
                self.start(OperationKind::Orders).await;
            }
            SessionCommand::Logout => {
                info!("Logging out");
                self.apply(ContextEvent::LoggedOut);
                self.transition(SessionState::Idle);
            }
        }
    }

    /// Enters the operation's request state and dispatches its fetch.
    ///
    /// A pre-flight rejection (signup guard, missing context, bad URL)
    /// synthesizes a failure outcome instead of calling out, so local and
    /// remote failures settle through the same path.
    async fn start(&mut self, op: OperationKind) {
        self.transition(op.request_state());
        self.generation += 1;

        match self.build_instruction(op) {
            Ok(instruction) => self.spawn_fetch(instruction).await,
            Err(message) => {
                debug!(error = %message, "Pre-flight rejection, synthesizing failure outcome");
                self.handle_outcome(FetchOutcome::Failure {
                    generation: self.generation,
                    label: op.failure_label(),
                    message,
                });
            }
        }
    }

    /// Builds the fetch instruction for the active operation from the
    /// current context.
    fn build_instruction(&self, op: OperationKind) -> Result<FetchInstruction, String> {
        let mut headers = vec![("content-type".to_owned(), "application/json".to_owned())];

        match op {
            OperationKind::Login => {
                let credentials = self
                    .context
                    .credentials
                    .as_ref()
                    .ok_or("Missing credentials in session context")?;
                Ok(FetchInstruction {
                    url: self.endpoint("/api/login")?,
                    method: reqwest::Method::POST,
                    payload: Some(serde_json::json!({
                        "email": credentials.email,
                        "password": credentials.password,
                    })),
                    headers,
                    on_success: OutcomeLabel::LoginSuccess,
                    on_failure: OutcomeLabel::LoginFailure,
                })
            }
            OperationKind::Signup => {
                let profile = self
                    .context
                    .profile
                    .as_ref()
                    .filter(|profile| profile.has_required_fields())
                    .ok_or(MISSING_SIGNUP_FIELDS_MESSAGE)?;
                Ok(FetchInstruction {
                    url: self.endpoint("/api/signup")?,
                    method: reqwest::Method::POST,
                    payload: Some(serde_json::json!({
                        "name": profile.name,
                        "email": profile.email,
                        "password": profile.password,
                        "role": profile.role,
                    })),
                    headers,
                    on_success: OutcomeLabel::SignupSuccess,
                    on_failure: OutcomeLabel::SignupFailure,
                })
            }
            OperationKind::Menu => Ok(FetchInstruction {
                url: self.endpoint("/api/menu")?,
                method: reqwest::Method::GET,
                payload: None,
                headers,
                on_success: OutcomeLabel::MenuFetchSuccess,
                on_failure: OutcomeLabel::MenuFetchFailure,
            }),
            OperationKind::Orders => {
                let identity = self
                    .context
                    .requestor_identity
                    .as_ref()
                    .ok_or("Missing requestor identity in session context")?;
                headers.push(("x-user-email".to_owned(), identity.user_email.clone()));
                headers.push(("x-user-role".to_owned(), identity.user_role.clone()));
                Ok(FetchInstruction {
                    url: self.endpoint("/api/orders")?,
                    method: reqwest::Method::GET,
                    payload: None,
                    headers,
                    on_success: OutcomeLabel::OrdersFetchSuccess,
                    on_failure: OutcomeLabel::OrdersFetchFailure,
                })
            }
        }
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, String> {
        self.config.endpoint(path).map_err(|e| e.to_string())
    }

    /// Spawns a fresh fetch actor for the current generation and submits
    /// the instruction to it.
    async fn spawn_fetch(&mut self, instruction: FetchInstruction) {
        let failure_label = instruction.on_failure;
        let (actor, handle) = FetchActor::new(
            self.http.clone(),
            self.outcome_tx.clone(),
            self.generation,
        );
        tokio::spawn(actor.run());

        match handle.submit(instruction).await {
            Ok(()) => self.fetch = Some(handle),
            Err(e) => {
                // Only reachable if the freshly spawned task died immediately.
                warn!(generation = self.generation, error = %e, "Fetch actor unavailable");
                self.handle_outcome(FetchOutcome::Failure {
                    generation: self.generation,
                    label: failure_label,
                    message: e.to_string(),
                });
            }
        }
    }

    fn handle_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation() != self.generation {
            warn!(
                generation = outcome.generation(),
                current = self.generation,
                label = ?outcome.label(),
                "Ignoring stale fetch outcome"
            );
            return;
        }
        if !self.state.is_request() {
            warn!(state = ?self.state, label = ?outcome.label(), "Outcome outside a request state");
            return;
        }

        if let Some(handle) = self.fetch.take() {
            debug!(generation = handle.generation(), "Releasing fetch actor handle");
        }

        match outcome {
            FetchOutcome::Success { label, result, .. } => self.settle_success(label, result),
            FetchOutcome::Failure { message, .. } => self.settle_failure(message),
        }
    }

    /// Extracts the operation's typed result and enters the terminal
    /// success state. A body that does not decode follows the failure path
    /// with the decode error as the message.
    fn settle_success(&mut self, label: OutcomeLabel, result: Value) {
        match (self.state, label) {
            (SessionState::LoginRequest, OutcomeLabel::LoginSuccess) => {
                let user = result
                    .get("user")
                    .cloned()
                    .ok_or_else(|| "Login response missing user field".to_owned())
                    .and_then(|value| {
                        serde_json::from_value::<AuthUser>(value).map_err(|e| e.to_string())
                    });
                match user {
                    Ok(user) => {
                        info!(user_id = user.id, "Login succeeded");
                        self.apply(ContextEvent::LoginSucceeded { user });
                        self.transition(SessionState::LoggedIn);
                    }
                    Err(message) => self.settle_failure(message),
                }
            }
            (SessionState::SignupRequest, OutcomeLabel::SignupSuccess) => {
                match serde_json::from_value::<SignupAck>(result) {
                    Ok(ack) => {
                        info!(success = ack.success, "Signup succeeded");
                        self.apply(ContextEvent::SignupSucceeded { ack });
                        self.transition(SessionState::SignedUp);
                    }
                    Err(e) => self.settle_failure(e.to_string()),
                }
            }
            (SessionState::MenuFetchRequest, OutcomeLabel::MenuFetchSuccess) => {
                match serde_json::from_value::<Vec<MenuItem>>(result) {
                    Ok(items) => {
                        info!(count = items.len(), "Menu fetched");
                        self.apply(ContextEvent::MenuFetched { items });
                        self.transition(SessionState::MenuFetched);
                    }
                    Err(e) => self.settle_failure(e.to_string()),
                }
            }
            (SessionState::OrdersFetchRequest, OutcomeLabel::OrdersFetchSuccess) => {
                match serde_json::from_value::<Vec<OrderRecord>>(result) {
                    Ok(orders) => {
                        info!(count = orders.len(), "Orders fetched");
                        self.apply(ContextEvent::OrdersFetched { orders });
                        self.transition(SessionState::OrdersFetched);
                    }
                    Err(e) => self.settle_failure(e.to_string()),
                }
            }
            (state, label) => {
                warn!(state = ?state, label = ?label, "Outcome label does not match active operation");
            }
        }
    }

    /// Records the failure message and enters the active operation's error
    /// state.
    fn settle_failure(&mut self, message: String) {
        let error_state = match self.state {
            SessionState::LoginRequest => SessionState::LoginError,
            SessionState::SignupRequest => SessionState::SignupError,
            SessionState::MenuFetchRequest => SessionState::MenuError,
            SessionState::OrdersFetchRequest => SessionState::OrdersError,
            state => {
                warn!(state = ?state, error = %message, "Failure outside a request state");
                return;
            }
        };
        warn!(error = %message, "Operation failed");
        self.apply(ContextEvent::Failed { message });
        self.transition(error_state);
    }

    fn apply(&mut self, event: ContextEvent) {
        self.context = std::mem::take(&mut self.context).apply(event);
    }

    /// Moves to the next state and publishes a snapshot. Publishing on
    /// every transition, request entries included, keeps subscribers able
    /// to observe the in-flight context of a retry.
    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
        self.snapshot_tx.send_replace(SessionSnapshot {
            state: self.state,
            context: self.context.clone(),
        });
    }
}
